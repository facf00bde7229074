//! Presenter - Boundary to the host that renders forms
//!
//! The host owns widgets, display and input. This crate only drives the
//! construction calls below in order and waits on a single `show`.
//!
//! Every construction call is fallible so that host-side validation (slider
//! bounds, empty dropdowns) reaches the caller unchanged.

pub mod scripted;

pub use scripted::{Call, ScriptedPresenter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Presenter result type
pub type PresenterResult<T> = Result<T, PresenterError>;

/// Errors raised by the host presenter
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PresenterError {
    /// A construction call was refused
    #[error("rejected: {0}")]
    Rejected(String),

    /// The form was abandoned before the user answered
    #[error("form closed: {0}")]
    Closed(String),

    /// Any other host failure
    #[error("{0}")]
    Other(String),
}

/// Opaque reference to the user a form is shown to
///
/// Passed through to handlers unchanged.
pub trait Identity: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Identity for T {}

/// Outcome of a choice or message form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResponse {
    /// Index of the pressed button, in registration order
    pub selection: Option<usize>,
    pub canceled: bool,
}

impl SelectionResponse {
    /// User pressed button `index`
    pub fn selected(index: usize) -> Self {
        Self {
            selection: Some(index),
            canceled: false,
        }
    }

    /// User dismissed the form
    pub fn canceled() -> Self {
        Self {
            selection: None,
            canceled: true,
        }
    }
}

/// One value returned by a modal form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Index(usize),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Toggle state
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Slider value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Index(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Dropdown selection
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            _ => None,
        }
    }

    /// Text field contents
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Outcome of a modal form
///
/// `values` follow the registration order of value-producing fields and are
/// empty when the form was canceled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResponse {
    pub values: Vec<FieldValue>,
    pub canceled: bool,
}

impl FieldResponse {
    /// User submitted the form
    pub fn submitted(values: Vec<FieldValue>) -> Self {
        Self {
            values,
            canceled: false,
        }
    }

    /// User dismissed the form
    pub fn canceled() -> Self {
        Self {
            values: Vec::new(),
            canceled: true,
        }
    }
}

/// Host capability that creates dialogs
pub trait Presenter<I: Identity>: Send + Sync {
    /// New list-of-buttons dialog
    fn choice_dialog(&self) -> Box<dyn ChoiceDialog<I>>;

    /// New two-button message dialog
    fn message_dialog(&self) -> Box<dyn MessageDialog<I>>;

    /// New dialog of input fields
    fn field_dialog(&self) -> Box<dyn FieldDialog<I>>;
}

/// Dialog listing any number of buttons
#[async_trait]
pub trait ChoiceDialog<I: Identity>: Send {
    fn title(&mut self, title: &str) -> PresenterResult<()>;
    fn body(&mut self, body: &str) -> PresenterResult<()>;
    fn button(&mut self, text: &str, icon: Option<&str>) -> PresenterResult<()>;

    /// Display the dialog and wait for the user
    async fn show(self: Box<Self>, identity: I) -> PresenterResult<SelectionResponse>;
}

/// Dialog with a body and exactly two buttons
#[async_trait]
pub trait MessageDialog<I: Identity>: Send {
    fn title(&mut self, title: &str) -> PresenterResult<()>;
    fn body(&mut self, body: &str) -> PresenterResult<()>;
    fn primary(&mut self, text: &str) -> PresenterResult<()>;
    fn secondary(&mut self, text: &str) -> PresenterResult<()>;

    /// Display the dialog and wait for the user
    async fn show(self: Box<Self>, identity: I) -> PresenterResult<SelectionResponse>;
}

/// Dialog of input fields
#[async_trait]
pub trait FieldDialog<I: Identity>: Send {
    fn title(&mut self, title: &str) -> PresenterResult<()>;
    fn body(&mut self, body: &str) -> PresenterResult<()>;
    fn toggle(&mut self, label: &str, default_value: Option<bool>) -> PresenterResult<()>;
    fn slider(
        &mut self,
        label: &str,
        min: f64,
        max: f64,
        step: f64,
        default_value: Option<f64>,
    ) -> PresenterResult<()>;
    fn dropdown(
        &mut self,
        label: &str,
        options: &[String],
        default_index: Option<usize>,
    ) -> PresenterResult<()>;
    fn text_field(
        &mut self,
        label: &str,
        placeholder: Option<&str>,
        default_value: Option<&str>,
    ) -> PresenterResult<()>;
    fn icon(&mut self, path: &str) -> PresenterResult<()>;

    /// Display the dialog and wait for the user
    async fn show(self: Box<Self>, identity: I) -> PresenterResult<FieldResponse>;
}
