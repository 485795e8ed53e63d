use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifiers are per-type integer sequences assigned by the store.
pub type Id = i64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{label}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

/// Self-reported mood, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Great,
    Good,
    Okay,
    Bad,
    Terrible,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Great, Mood::Good, Mood::Okay, Mood::Bad, Mood::Terrible];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Great => "Great",
            Mood::Good => "Good",
            Mood::Okay => "Okay",
            Mood::Bad => "Bad",
            Mood::Terrible => "Terrible",
        }
    }

    /// Chart score: Great = 5 down to Terrible = 1.
    pub fn score(&self) -> u8 {
        match self {
            Mood::Great => 5,
            Mood::Good => 4,
            Mood::Okay => 3,
            Mood::Bad => 2,
            Mood::Terrible => 1,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownLabel { kind: "mood", label: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stress {
    Low,
    Medium,
    High,
}

impl Stress {
    pub const ALL: [Stress; 3] = [Stress::Low, Stress::Medium, Stress::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stress::Low => "Low",
            Stress::Medium => "Medium",
            Stress::High => "High",
        }
    }

    pub fn score(&self) -> u8 {
        match self {
            Stress::Low => 1,
            Stress::Medium => 2,
            Stress::High => 3,
        }
    }
}

impl fmt::Display for Stress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stress {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stress::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownLabel { kind: "stress level", label: s.to_string() })
    }
}

// -- Entities --

/// A registered account. The password field holds the Argon2 hash and is
/// never serialized; use [`PublicUser`] for anything leaving the server.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Id,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Id,
    pub user_id: Id,
    pub mood: Mood,
    pub stress: Option<Stress>,
    /// Sleep quality label, e.g. "Fair".
    pub sleep: Option<String>,
    pub sleep_duration: Option<String>,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Id,
    pub user_id: Id,
    pub title: String,
    pub content: String,
    /// Free-text tag; not tied to the [`Mood`] labels.
    pub mood: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Id,
    pub user_id: Id,
    pub message: String,
    /// False for companion replies.
    pub is_user_message: bool,
    pub timestamp: DateTime<Utc>,
}

// -- Insert payloads: id, owner and timestamp are assigned by the store --

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMoodEntry {
    pub mood: Mood,
    pub stress: Option<Stress>,
    pub sleep: Option<String>,
    pub sleep_duration: Option<String>,
    pub notes: Option<String>,
}

impl NewMoodEntry {
    pub fn new(mood: Mood) -> Self {
        Self {
            mood,
            stress: None,
            sleep: None,
            sleep_duration: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewChatMessage {
    pub message: String,
    pub is_user_message: bool,
}

impl NewChatMessage {
    pub fn from_user(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_user_message: true }
    }

    pub fn from_companion(message: impl Into<String>) -> Self {
        Self { message: message.into(), is_user_message: false }
    }
}
