use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("File type not allowed or recognised: {0}")]
    UnsupportedMediaType(String),

    #[error("Could not detect {provider} video id in '{url}'")]
    VideoIdNotFound { provider: &'static str, url: String },

    #[error("Template error: {0}")]
    Template(String),
}

/// Convenience type alias for Results with ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
