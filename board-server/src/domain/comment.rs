use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::post::validate_positive_i64;

pub(crate) const CONTENT_MIN_CHARS: usize = 2;
pub(crate) const CONTENT_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) user_id: i64,
    pub(crate) content: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl Comment {
    pub(crate) fn new(
        id: i64,
        post_id: i64,
        user_id: i64,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("post_id", post_id)?;
        validate_positive_i64("user_id", user_id)?;
        Ok(Self {
            id,
            post_id,
            user_id,
            content: normalize_content(&content.into())?,
            created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateCommentRequest {
    pub(crate) content: String,
}

impl CreateCommentRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_content(&self.content)?,
        })
    }
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    let len = content.chars().count();
    if !(CONTENT_MIN_CHARS..=CONTENT_MAX_CHARS).contains(&len) {
        return Err(DomainError::Validation {
            field: "content",
            message: "must be 2..1000 chars",
        });
    }
    Ok(content.to_string())
}
