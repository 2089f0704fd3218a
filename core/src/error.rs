use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Invalid argument: {what} = {value}")]
    InvalidArgument { what: &'static str, value: String },

    #[error("No protection tokens available")]
    NoTokensAvailable,

    #[error("Invalid allocation {equity}/{corporate}/{govt}: {reason}")]
    InvalidAllocation {
        equity:    u32,
        corporate: u32,
        govt:      u32,
        reason:    String,
    },

    #[error("A turn is already in progress")]
    TurnInProgress,

    #[error("No turn is waiting to be resolved")]
    TurnNotStarted,

    #[error("Turn has not been resolved yet")]
    TurnNotResolved,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ForgeError {
    pub(crate) fn invalid(what: &'static str, value: impl ToString) -> Self {
        Self::InvalidArgument { what, value: value.to_string() }
    }
}

pub type ForgeResult<T> = Result<T, ForgeError>;
