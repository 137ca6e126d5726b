use thiserror::Error;

/// the filesystem document (or an api payload) could not be fetched or parsed
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Fetch(String),
    #[error("server answered with HTTP {0}")]
    Status(u16),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed document at {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl LoadError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::Malformed { path: path.into(), reason: reason.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VfsError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not a file: {0}")]
    NotAFile(String),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("Filesystem not initialized.")]
    NotInitialized,
}

/// everything a command handler can fail with; the dispatcher renders
/// each variant as a single red line and keeps the session alive
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command not found. Type \"help\" for available commands.")]
    UnknownCommand(String),
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Vfs(#[from] VfsError),
    #[error("Error executing command: {0}")]
    Handler(String),
    #[error("{0}")]
    Api(String),
}

impl From<LoadError> for CommandError {
    fn from(err: LoadError) -> Self {
        CommandError::Api(format!("Failed to load data: {}", err))
    }
}

/// saving or restoring the session snapshot
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("compression: {0}")]
    Compression(#[from] std::io::Error),
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("localStorage unavailable")]
    Unavailable,
}
