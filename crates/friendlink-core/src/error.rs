use thiserror::Error;

#[derive(Debug, Error)]
pub enum FriendLinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
}

impl FriendLinkError {
    /// True when the error means the snapshot file does not exist yet.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, FriendLinkError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, FriendLinkError>;
