use thiserror::Error;

/// Errors raised at the edges of the crate.
///
/// The state machine itself never fails: rejected triggers are reported
/// through the resulting state and message only. These variants cover
/// parsing user input and writing output.
#[derive(Debug, Error)]
pub enum ElevatorError {
    /// Text that does not name a trigger
    #[error("invalid trigger `{input}`: {reason}")]
    InvalidTrigger {
        /// The offending text
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// Script contained no triggers
    #[error("trigger script is empty")]
    EmptyScript,

    /// Writing a file failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Rendering the transcript as JSON failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used by the fallible edges of the crate
pub type Result<T> = std::result::Result<T, ElevatorError>;
