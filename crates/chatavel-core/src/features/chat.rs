//! Message thread shown in the chat window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// `HH:MM` send time, as shown under each bubble.
    pub fn time_label(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

/// Messages in send order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThread {
    messages: Vec<ChatMessage>,
}

impl ChatThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Append a message from `sender`.
    ///
    /// Whitespace-only input is ignored and returns `None`. The text is kept
    /// as typed, surrounding whitespace included.
    pub fn send(&mut self, sender: &str, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            debug!(event = "core.chat.send_ignored", reason = "empty");
            return None;
        }

        let message = ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            sender: sender.to_string(),
            text: text.to_string(),
            sent_at: Utc::now(),
        };
        info!(
            event = "core.chat.message_sent",
            message_id = %message.id,
            sender = sender,
            message_count = self.messages.len() + 1
        );
        self.messages.push(message);
        self.messages.last()
    }
}
