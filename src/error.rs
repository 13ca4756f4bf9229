use std::path::PathBuf;

/// Errors surfaced by the host binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("cannot read or write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store {path} is not a valid canvas store: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },
    #[error("no canvas stored for record `{0}`")]
    UnknownRecord(String),
}

impl HostError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script { line, message: message.into() }
    }
}
