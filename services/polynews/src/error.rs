use thiserror::Error;

pub type Result<T> = std::result::Result<T, PolynewsError>;

#[derive(Debug, Error)]
pub enum PolynewsError {
    /// Caller broke an argument contract (e.g. a negative day count).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("unexpected response format: {0}")]
    Decode(String),

    #[error("invalid config: {0}")]
    Config(String),
}

impl From<reqwest::Error> for PolynewsError {
    fn from(e: reqwest::Error) -> Self {
        PolynewsError::Fetch(e.to_string())
    }
}
