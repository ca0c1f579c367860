use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration load error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Transport error: {context} failed: {source}")]
    Transport {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP status code {status} returned from {context}. Response: {body}")]
    HttpStatus {
        status: u16,
        body: String,
        context: String,
    },

    #[error("API returned error code {} from {context}. Error message: {message}", .code.map(|c| c.to_string()).unwrap_or_else(|| "none".into()))]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
        more_info: Option<String>,
        context: String,
    },

    #[error("Could not parse response from {context}: {source}. Response: {body}")]
    Parse {
        body: String,
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Coarse classification of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    HttpStatus,
    Api,
    Parse,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) | AppError::ConfigLoad(_) | AppError::Url(_) => ErrorKind::Configuration,
            AppError::Transport { .. } => ErrorKind::Transport,
            AppError::HttpStatus { .. } => ErrorKind::HttpStatus,
            AppError::Api { .. } => ErrorKind::Api,
            AppError::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// HTTP status of the response that produced this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::HttpStatus { status, .. } | AppError::Api { status, .. } => Some(*status),
            AppError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
