//! Error types for flashforge-core.
//!
//! Only the lookup flow and the choice rendezvous can fail; the text
//! functions are total.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using FlowError.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Failures of a pending choice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RendezvousError {
    #[error("selection surface closed before a choice was made")]
    SurfaceClosed,

    #[error("no choice was made within {0:?}")]
    TimedOut(Duration),
}

/// Errors that end a lookup-and-build operation.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("cancelled by user")]
    UserCancelled,

    #[error("no definitions found for {key:?}")]
    NoDefinitionsFound { key: String },

    #[error("dictionary lookup failed: {0}")]
    Dictionary(String),

    #[error(transparent)]
    Rendezvous(#[from] RendezvousError),
}

impl FlowError {
    /// Stable name used when reporting the error to the user.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserCancelled => "cancelled",
            Self::NoDefinitionsFound { .. } => "no_definitions",
            Self::Dictionary(_) => "dictionary_error",
            Self::Rendezvous(RendezvousError::TimedOut(_)) => "choice_timeout",
            Self::Rendezvous(RendezvousError::SurfaceClosed) => "surface_closed",
        }
    }
}
