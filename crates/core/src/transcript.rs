//! Conversation Transcript
//!
//! Append-only record of everything said during a simulation, in the order
//! it happened. Insertion order is display order; entries are never mutated
//! or removed except by a full reset.

use crate::character::Character;
use crate::script::{Emotion, ScriptLine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryRole {
    User,
    Avatar,
}

impl fmt::Display for EntryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryRole::User => write!(f, "user"),
            EntryRole::Avatar => write!(f, "avatar"),
        }
    }
}

/// One logged unit of dialogue or trainee input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: EntryRole,
    pub content: String,
    /// Emotion tag of the scripted line; absent for trainee input.
    pub emotion: Option<Emotion>,
    pub timestamp: DateTime<Utc>,
    /// Which character spoke; absent for trainee input.
    pub speaker: Option<Character>,
}

/// The append-only conversation log.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<ConversationEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scripted line spoken by `speaker`.
    pub fn push_line(&mut self, speaker: Character, line: &ScriptLine) {
        self.entries.push(ConversationEntry {
            role: EntryRole::Avatar,
            content: line.text.to_string(),
            emotion: Some(line.emotion),
            timestamp: Utc::now(),
            speaker: Some(speaker),
        });
    }

    /// Appends a trainee response.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.entries.push(ConversationEntry {
            role: EntryRole::User,
            content: text.into(),
            emotion: None,
            timestamp: Utc::now(),
            speaker: None,
        });
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry. Only the simulation reset path calls this.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
