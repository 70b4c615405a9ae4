use thiserror::Error;

/// Coarse classification of a data load failure, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Status,
    Transport,
    Decode,
    Cancelled,
}

/// The single failure kind of the directory: the dataset could not be loaded.
///
/// `Display` is the message shown to the user in place of the list.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Error fetching doctors: {status}")]
    Status { status: u16, url: String },
    #[error("Failed to fetch doctors: {0}")]
    Transport(String),
    #[error("Failed to read doctor listing: {0}")]
    Decode(String),
    #[error("Doctor listing load was cancelled")]
    Cancelled,
}

impl DirectoryError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Status { .. } => FailureKind::Status,
            Self::Transport(_) => FailureKind::Transport,
            Self::Decode(_) => FailureKind::Decode,
            Self::Cancelled => FailureKind::Cancelled,
        }
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}
