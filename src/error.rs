use thiserror::Error;

use crate::api::ApiError;
use crate::source::SourceError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("config error: {0}")]
    Config(String),

    #[error("data source error: {0}")]
    Source(#[from] SourceError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("status polling gave up after {rounds} round(s)")]
    PollBudgetExhausted { rounds: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SyncError {
    /// True for failures scoped to a single connection's work: a data source
    /// that cannot be read, a submission the platform rejected, or an
    /// exhausted polling budget. Configuration and transport failures abort
    /// the whole run instead.
    pub fn is_connection_scoped(&self) -> bool {
        matches!(
            self,
            SyncError::Source(_)
                | SyncError::Api(ApiError::Application { .. })
                | SyncError::Api(ApiError::Malformed(_))
                | SyncError::PollBudgetExhausted { .. }
        )
    }
}
