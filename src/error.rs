// src/error.rs
use thiserror::Error;

use crate::validator::ValidationError;

/// Everything that can keep the wizard on its current step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// Rejected locally, nothing was sent.
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),
    /// Network failure, non-2xx status or an unreadable body.
    #[error("transport error: {0}")]
    Transport(String),
    /// 2xx response whose payload carries an `error` field.
    #[error("backend reported an error: {0}")]
    Application(String),
}

impl WizardError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(e) => e.code(),
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Application(_) => "APPLICATION_ERROR",
        }
    }

    /// Banner text. Validation messages are shown as-is; backend failures
    /// collapse to `generic`, optionally followed by the backend's own text.
    pub fn user_message(&self, generic: &str, verbose: bool) -> String {
        match self {
            Self::InvalidInput(e) => e.message.clone(),
            Self::Application(detail) if verbose => format!("{} ({})", generic, detail),
            Self::Transport(_) | Self::Application(_) => generic.to_string(),
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidInput(e) => Some(&e.suggestion),
            Self::Transport(_) | Self::Application(_) => None,
        }
    }
}
