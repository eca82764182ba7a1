use thiserror::Error;

use crate::interaction::EditorTab;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid chart configuration: {0}")]
    InvalidConfiguration(String),

    #[error("editor tab `{tab}` is not available for this chart")]
    UnavailableTab { tab: EditorTab },

    #[error("request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ChartError {
    /// Text shown to the operator when a request-level failure is surfaced.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::RequestFailed { message, .. } => message.clone(),
            Self::Transport(message) | Self::InvalidResponse(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
