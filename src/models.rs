// src/models.rs

use chrono::{DateTime, Local, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Represents a message in the transcript.
///
/// Messages carry no identity beyond their position in the transcript, and
/// there is no way to edit one after it has been created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
    sent_at: DateTime<Local>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            sent_at: Local::now(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Local> {
        self.sent_at
    }

    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// A film offered as a one-key query shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl CatalogEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_ref: None,
        }
    }
}

static DEFAULT_CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    [
        "Aliens",
        "Drive",
        "Jaws",
        "Kill Bill",
        "La La Land",
        "No Country For Old Men",
        "Pulp Fiction",
        "The Dark Knight Rises",
        "The Shawshank Redemption",
        "The Silence of the Lambs",
    ]
    .into_iter()
    .map(CatalogEntry::new)
    .collect()
});

/// The films the answering service has scripts for.
pub fn default_catalog() -> Vec<CatalogEntry> {
    DEFAULT_CATALOG.clone()
}

/// Logs details of each API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: Option<u16>,
    pub response_time_ms: u128,
}
