use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid origin ({lat}, {lng}): {reason}")]
    InvalidOrigin { lat: f64, lng: f64, reason: String },
    #[error("invalid stop {id}: {reason}")]
    InvalidStop { id: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("stop store: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_stop(id: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidStop {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// True for errors caused by the caller's input rather than by the system.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidOrigin { .. } | Error::InvalidStop { .. })
    }
}
