//! Error types for simple-forms

use crate::presenter::PresenterError;
use thiserror::Error;

/// Structural problems in a form, detected before anything is shown
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No form kind was set
    #[error("form kind not set")]
    MissingKind,

    /// Kind tag does not name a known form shape
    #[error("unrecognized form kind: {0}")]
    UnknownKind(String),

    /// No title was set
    #[error("form title not set")]
    MissingTitle,

    /// Choice form without a single usable button
    #[error("choice form needs at least one button")]
    NoButtons,

    /// Message form with the wrong number of buttons
    #[error("message form needs exactly 2 buttons, got {0}")]
    ButtonCount(usize),

    /// Message form with an empty button slot
    #[error("message form button {0} is empty")]
    EmptyButton(usize),

    /// Modal form without somewhere to send its values
    #[error("modal form has no feedback handler")]
    MissingFeedback,
}

/// simple-forms error type
#[derive(Error, Debug)]
pub enum FormError {
    /// Invalid form configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Presenter rejected a call
    #[error("presenter error: {0}")]
    Presenter(#[from] PresenterError),

    /// A response handler failed during dispatch
    #[error("handler for response {index} failed: {message}")]
    Handler { index: i32, message: String },

    /// The feedback handler failed
    #[error("feedback handler failed: {0}")]
    Feedback(String),

    /// Layout could not be parsed
    #[error("layout error: {0}")]
    Layout(#[from] serde_json::Error),

    /// `execute` was called outside a tokio runtime
    #[error("no tokio runtime available")]
    NoRuntime,

    /// The spawned form task panicked
    #[error("form task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl FormError {
    /// Whether this error was raised by validation, before any presenter call
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type for simple-forms
pub type Result<T> = std::result::Result<T, FormError>;
