use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum post length, in characters.
pub const MAX_CONTENT_LENGTH: usize = 280;

/// Post entity - a read projection of one key-value record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub key: String,
    pub content: String,
    pub author: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Assemble a post from a stored value and its metadata.
    pub fn from_record(key: String, content: String, metadata: Option<PostMetadata>) -> Self {
        let metadata = metadata.unwrap_or_default();
        let posted_at = metadata
            .posted_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc));

        Self {
            key,
            content,
            author: metadata.author,
            posted_at,
        }
    }

    /// Validate submitted content, returning the text to store.
    pub fn validate_content(input: ContentInput) -> Result<String, ValidationError> {
        let content = match input {
            ContentInput::Missing => return Err(ValidationError::EmptyContent),
            ContentInput::Binary => return Err(ValidationError::InvalidContentType),
            ContentInput::Text(content) => content,
        };

        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        let length = content.chars().count();
        if length > MAX_CONTENT_LENGTH {
            return Err(ValidationError::ContentTooLong {
                max: MAX_CONTENT_LENGTH,
                actual: length,
            });
        }

        Ok(content)
    }
}

/// Metadata stored next to each post value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
}

impl PostMetadata {
    /// Metadata for a post written by `author` at `posted_at`.
    pub fn new(author: impl Into<String>, posted_at: DateTime<Utc>) -> Self {
        Self {
            author: Some(author.into()),
            posted_at: Some(posted_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

/// The `content` field of a submission as it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentInput {
    /// Field absent from the submission.
    Missing,
    /// A plain text value.
    Text(String),
    /// A file upload or other non-text payload.
    Binary,
}

impl ContentInput {
    /// The submitted text, if any. Binary payloads never expose their bytes.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentInput::Text(content) => Some(content),
            _ => None,
        }
    }
}

impl From<Option<String>> for ContentInput {
    fn from(value: Option<String>) -> Self {
        value.map_or(ContentInput::Missing, ContentInput::Text)
    }
}
