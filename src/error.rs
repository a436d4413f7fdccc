use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid json")]
    InvalidJson(#[from] serde_json::Error),

    #[error("payload.{0} is required")]
    MissingField(&'static str),

    #[error("invalid payload.{field}: {message}")]
    InvalidPayload {
        field: &'static str,
        message: String,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write csv: {0}")]
    Export(#[from] csv::Error),

    #[error("unknown command")]
    UnknownCommand,
}

pub type Result<T> = std::result::Result<T, CoreError>;
