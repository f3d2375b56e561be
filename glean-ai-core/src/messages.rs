//! Chat message types exchanged with a model.
//!
//! This module defines the request payload sent TO a chat model and the
//! response shapes that come back FROM it, in both the complete and the
//! streamed form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::settings::RequestSettings;

/// The role a chat message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the whole conversation.
    System,
    /// Content supplied by the caller.
    User,
    /// Content produced by the model.
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who the message is attributed to.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A complete request payload for one model invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The model the request is addressed to.
    pub model: String,
    /// The conversation messages, in order.
    pub messages: Vec<ChatMessage>,
    /// Generation settings.
    #[serde(default, skip_serializing_if = "RequestSettings::is_empty")]
    pub settings: RequestSettings,
}

impl ChatRequest {
    /// Create a request for the given model with no messages.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            settings: RequestSettings::default(),
        }
    }

    /// Append a system message.
    pub fn add_system_prompt(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::system(content));
    }

    /// Append a user message.
    pub fn add_user_prompt(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Append a message.
    #[must_use]
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Set the generation settings.
    #[must_use]
    pub fn with_settings(mut self, settings: RequestSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// A complete (non-streamed) model response.
///
/// `content` is optional: a model can legitimately answer with no textual
/// content at all. That state is distinct from an empty string, and
/// downstream code treats the two differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The textual content of the response, if the model produced any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Name of the model that generated this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// When this response was received.
    pub timestamp: DateTime<Utc>,
}

impl ChatResponse {
    /// Create a response with no content.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            content: None,
            model_name: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a response with the given textual content.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::empty()
        }
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// The textual content, if present.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

impl Default for ChatResponse {
    fn default() -> Self {
        Self::empty()
    }
}

/// One increment of a streamed model response.
///
/// `delta` carries the next slice of text. Fragments without a delta occur
/// in real provider streams (role announcements, keep-alives) and carry no
/// information for consumers of the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatFragment {
    /// The next slice of textual content, if this fragment carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

impl ChatFragment {
    /// Create a fragment carrying the given text.
    #[must_use]
    pub fn delta(text: impl Into<String>) -> Self {
        Self {
            delta: Some(text.into()),
        }
    }

    /// Create a fragment with no content.
    #[must_use]
    pub fn empty() -> Self {
        Self { delta: None }
    }

    /// Whether this fragment contributes no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delta.as_deref().map_or(true, str::is_empty)
    }
}
