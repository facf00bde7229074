//! Form - Fluent configuration tree for one dialog request
//!
//! Setters only record values. Nothing is checked until [`Form::execute`] or
//! [`Form::show`], and calling a setter the chosen kind never reads is fine.
//!
//! ```no_run
//! use simple_forms::{Action, Button, Form, FormKind, Presenter, Response, ScriptedPresenter};
//! use std::sync::Arc;
//!
//! # async fn demo() -> simple_forms::Result<()> {
//! let presenter: Arc<dyn Presenter<String>> = Arc::new(ScriptedPresenter::new());
//!
//! let mut form = Form::new();
//! form.kind(FormKind::Choice)
//!     .title("Teleport")
//!     .buttons([Button::new("Spawn"), Button::new("Arena")])
//!     .responses([
//!         Response::new(0, Action::callback(|player: &String| {
//!             println!("{player} -> spawn");
//!             Ok(())
//!         })),
//!     ]);
//!
//! form.execute(&presenter, "steve".to_string())?.wait().await?;
//! # Ok(())
//! # }
//! ```

use crate::element::{Button, Field};
use crate::error::{ConfigError, FormError, Result};
use crate::presenter::{Identity, Presenter};
use crate::response::{Feedback, Response};
use crate::strategy;
use crate::task::FormTask;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The three dialog shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    /// List of buttons, answered by a button index
    Choice,
    /// Input fields, answered by a list of values
    Modal,
    /// Body text with two buttons
    Message,
}

impl FromStr for FormKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "choice" | "action" | "ActionForm" => Ok(Self::Choice),
            "modal" | "ModalForm" => Ok(Self::Modal),
            "message" | "MessageForm" => Ok(Self::Message),
            other => Err(ConfigError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Choice => "choice",
            Self::Modal => "modal",
            Self::Message => "message",
        };
        f.write_str(name)
    }
}

/// Form kind as given to [`Form::kind`], resolved at execution time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KindTag {
    Kind(FormKind),
    Named(String),
}

impl KindTag {
    pub fn resolve(&self) -> std::result::Result<FormKind, ConfigError> {
        match self {
            Self::Kind(kind) => Ok(*kind),
            Self::Named(name) => name.parse(),
        }
    }
}

impl From<FormKind> for KindTag {
    fn from(kind: FormKind) -> Self {
        Self::Kind(kind)
    }
}

impl From<&str> for KindTag {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for KindTag {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => kind.fmt(f),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Declarative description of a form, without handlers
///
/// This is the shape forms take in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormLayout {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Option<Button>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl FormLayout {
    /// Parse a layout from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the layout to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configuration tree for one dialog
pub struct Form<I: Identity> {
    pub(crate) kind: Option<KindTag>,
    pub(crate) title: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) buttons: Vec<Option<Button>>,
    pub(crate) fields: Vec<Field>,
    pub(crate) responses: Vec<Response<I>>,
    pub(crate) feedback: Option<Feedback<I>>,
}

impl<I: Identity> Form<I> {
    pub fn new() -> Self {
        Self {
            kind: None,
            title: None,
            body: None,
            buttons: Vec::new(),
            fields: Vec::new(),
            responses: Vec::new(),
            feedback: None,
        }
    }

    /// Build a form from a layout; handlers are attached afterwards
    pub fn from_layout(layout: FormLayout) -> Self {
        let mut form = Self::new();
        form.kind = layout.kind.map(KindTag::Named);
        form.title = layout.title;
        form.body = layout.body;
        form.buttons = layout.buttons;
        form.fields = layout.fields;
        form
    }

    /// Set the dialog shape
    pub fn kind(&mut self, kind: impl Into<KindTag>) -> &mut Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(&mut self, body: impl Into<String>) -> &mut Self {
        self.body = Some(body.into());
        self
    }

    /// Replace the button list
    ///
    /// `None` entries are skipped by choice forms and do not take an index.
    pub fn buttons<B: Into<Option<Button>>>(
        &mut self,
        buttons: impl IntoIterator<Item = B>,
    ) -> &mut Self {
        self.buttons = buttons.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the field list (modal forms)
    pub fn fields(&mut self, fields: impl IntoIterator<Item = Field>) -> &mut Self {
        self.fields = fields.into_iter().collect();
        self
    }

    /// Replace the response handlers (choice and message forms)
    pub fn responses(&mut self, responses: impl IntoIterator<Item = Response<I>>) -> &mut Self {
        self.responses = responses.into_iter().collect();
        self
    }

    /// Set the feedback handler (modal forms)
    pub fn feedback(&mut self, feedback: Feedback<I>) -> &mut Self {
        self.feedback = Some(feedback);
        self
    }

    /// Snapshot of everything but the handlers
    pub fn layout(&self) -> FormLayout {
        FormLayout {
            kind: self.kind.as_ref().map(ToString::to_string),
            title: self.title.clone(),
            body: self.body.clone(),
            buttons: self.buttons.clone(),
            fields: self.fields.clone(),
        }
    }

    pub fn response_handlers(&self) -> &[Response<I>] {
        &self.responses
    }

    pub fn has_feedback(&self) -> bool {
        self.feedback.is_some()
    }

    /// Check structural requirements for the configured kind
    pub fn validate(&self) -> std::result::Result<FormKind, ConfigError> {
        let kind = self.kind.as_ref().ok_or(ConfigError::MissingKind)?.resolve()?;
        if self.title.is_none() {
            return Err(ConfigError::MissingTitle);
        }

        match kind {
            FormKind::Choice => {
                if self.buttons.iter().all(Option::is_none) {
                    return Err(ConfigError::NoButtons);
                }
            }
            FormKind::Message => {
                if self.buttons.len() != 2 {
                    return Err(ConfigError::ButtonCount(self.buttons.len()));
                }
                if let Some(slot) = self.buttons.iter().position(Option::is_none) {
                    return Err(ConfigError::EmptyButton(slot));
                }
            }
            FormKind::Modal => {
                if self.feedback.is_none() {
                    return Err(ConfigError::MissingFeedback);
                }
            }
        }

        Ok(kind)
    }

    /// Build the dialog now and show it in the background
    ///
    /// Fails before any presenter call if the form is misconfigured or there
    /// is no tokio runtime. The returned task resolves once dispatch is done.
    pub fn execute(&self, presenter: &Arc<dyn Presenter<I>>, identity: I) -> Result<FormTask> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| FormError::NoRuntime)?;
        let prepared = strategy::prepare(self, presenter.as_ref())?;
        Ok(FormTask::spawn(&runtime, prepared, Arc::clone(presenter), identity))
    }

    /// Build, show and dispatch inline
    pub async fn show(&self, presenter: &Arc<dyn Presenter<I>>, identity: I) -> Result<()> {
        strategy::prepare(self, presenter.as_ref())?
            .complete(Arc::clone(presenter), identity)
            .await
    }
}

impl<I: Identity> Default for Form<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Identity> Clone for Form<I> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            title: self.title.clone(),
            body: self.body.clone(),
            buttons: self.buttons.clone(),
            fields: self.fields.clone(),
            responses: self.responses.clone(),
            feedback: self.feedback.clone(),
        }
    }
}

impl<I: Identity> fmt::Debug for Form<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("body", &self.body)
            .field("buttons", &self.buttons)
            .field("fields", &self.fields)
            .field("responses", &self.responses)
            .field("feedback", &self.feedback)
            .finish()
    }
}
