use std::cmp::Reverse;

use tracing::debug;

use mindful_types::models::{
    ChatMessage, Id, JournalEntry, MoodEntry, NewChatMessage, NewJournalEntry, NewMoodEntry,
    NewUser, User,
};

use crate::{Store, StoreError, lock};

impl Store {
    // -- Users --

    pub fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut users = lock(&self.users);

        if users.values().any(|u| u.username == new.username) {
            return Err(StoreError::UsernameTaken(new.username));
        }

        let user = users
            .insert_with(self.clock.now(), |id, _| User {
                id,
                username: new.username,
                password: new.password,
                name: new.name,
                email: new.email,
            })
            .clone();

        debug!(user_id = user.id, "user created");
        Ok(user)
    }

    pub fn get_user(&self, id: Id) -> Option<User> {
        lock(&self.users).get(id).cloned()
    }

    pub fn get_user_by_username(&self, username: &str) -> Option<User> {
        lock(&self.users)
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    // -- Moods --

    pub fn create_mood(&self, owner: Id, new: NewMoodEntry) -> MoodEntry {
        let entry = lock(&self.moods)
            .insert_with(self.clock.now(), |id, timestamp| MoodEntry {
                id,
                user_id: owner,
                mood: new.mood,
                stress: new.stress,
                sleep: new.sleep,
                sleep_duration: new.sleep_duration,
                notes: new.notes,
                timestamp,
            })
            .clone();

        debug!(mood_id = entry.id, owner, "mood entry created");
        entry
    }

    /// All of `owner`'s mood entries, newest first.
    pub fn list_moods(&self, owner: Id) -> Vec<MoodEntry> {
        let mut entries: Vec<MoodEntry> = lock(&self.moods)
            .values()
            .filter(|m| m.user_id == owner)
            .cloned()
            .collect();
        entries.sort_by_key(|m| Reverse((m.timestamp, m.id)));
        entries
    }

    pub fn get_mood(&self, id: Id) -> Option<MoodEntry> {
        lock(&self.moods).get(id).cloned()
    }

    // -- Journals --

    pub fn create_journal(&self, owner: Id, new: NewJournalEntry) -> JournalEntry {
        let entry = lock(&self.journals)
            .insert_with(self.clock.now(), |id, timestamp| JournalEntry {
                id,
                user_id: owner,
                title: new.title,
                content: new.content,
                mood: new.mood,
                timestamp,
            })
            .clone();

        debug!(journal_id = entry.id, owner, "journal entry created");
        entry
    }

    /// All of `owner`'s journal entries, newest first.
    pub fn list_journals(&self, owner: Id) -> Vec<JournalEntry> {
        let mut entries: Vec<JournalEntry> = lock(&self.journals)
            .values()
            .filter(|j| j.user_id == owner)
            .cloned()
            .collect();
        entries.sort_by_key(|j| Reverse((j.timestamp, j.id)));
        entries
    }

    pub fn get_journal(&self, id: Id) -> Option<JournalEntry> {
        lock(&self.journals).get(id).cloned()
    }

    // -- Chats --

    pub fn create_chat_message(&self, owner: Id, new: NewChatMessage) -> ChatMessage {
        let message = lock(&self.chats)
            .insert_with(self.clock.now(), |id, timestamp| ChatMessage {
                id,
                user_id: owner,
                message: new.message,
                is_user_message: new.is_user_message,
                timestamp,
            })
            .clone();

        debug!(chat_id = message.id, owner, from_user = message.is_user_message, "chat message stored");
        message
    }

    /// The conversation with `owner`, oldest first.
    pub fn list_chat_messages(&self, owner: Id) -> Vec<ChatMessage> {
        let mut messages: Vec<ChatMessage> = lock(&self.chats)
            .values()
            .filter(|c| c.user_id == owner)
            .cloned()
            .collect();
        messages.sort_by_key(|c| (c.timestamp, c.id));
        messages
    }
}
