use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    Id, MoodEntry, NewChatMessage, NewJournalEntry, NewMoodEntry, PublicUser,
};

// -- JWT Claims --

/// Bearer token claims. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Id,
    pub username: String,
    pub exp: usize,
}

/// A request payload that failed validation on one field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
}

// -- Moods --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoodRequest {
    pub mood: String,
    #[serde(default)]
    pub stress: Option<String>,
    #[serde(default)]
    pub sleep: Option<String>,
    #[serde(default)]
    pub sleep_duration: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TryFrom<CreateMoodRequest> for NewMoodEntry {
    type Error = FieldError;

    fn try_from(req: CreateMoodRequest) -> Result<Self, Self::Error> {
        let mood = req
            .mood
            .parse()
            .map_err(|e| FieldError::new("mood", format!("{e}")))?;
        let stress = req
            .stress
            .map(|s| s.parse())
            .transpose()
            .map_err(|e| FieldError::new("stress", format!("{e}")))?;

        Ok(NewMoodEntry {
            mood,
            stress,
            sleep: req.sleep,
            sleep_duration: req.sleep_duration,
            notes: req.notes,
        })
    }
}

/// Window for the mood/stress trend chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendRange {
    #[default]
    Week,
    Month,
    Year,
}

impl TrendRange {
    /// Earliest timestamp included in the window ending at `now`.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let cutoff = match self {
            TrendRange::Week => now.checked_sub_signed(Duration::days(7)),
            TrendRange::Month => now.checked_sub_months(Months::new(1)),
            TrendRange::Year => now.checked_sub_months(Months::new(12)),
        };
        cutoff.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    #[serde(default)]
    pub range: TrendRange,
}

/// One chart sample. Entries without a stress label score as Medium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub mood: u8,
    pub stress: u8,
}

impl From<&MoodEntry> for TrendPoint {
    fn from(entry: &MoodEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            mood: entry.mood.score(),
            stress: entry.stress.map_or(2, |s| s.score()),
        }
    }
}

// -- Journals --

#[derive(Debug, Deserialize)]
pub struct CreateJournalRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub mood: Option<String>,
}

impl From<CreateJournalRequest> for NewJournalEntry {
    fn from(req: CreateJournalRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            mood: req.mood,
        }
    }
}

// -- Chats --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRequest {
    pub message: String,
    pub is_user_message: bool,
}

impl From<CreateChatRequest> for NewChatMessage {
    fn from(req: CreateChatRequest) -> Self {
        Self {
            message: req.message,
            is_user_message: req.is_user_message,
        }
    }
}
