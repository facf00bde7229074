//! Construction strategies, one per form kind
//!
//! [`prepare`] validates a form, then drives the presenter's construction
//! calls in order. The result is a dialog that has not been shown yet, paired
//! with the handlers its answer goes to.

use crate::dispatch;
use crate::element::Field;
use crate::error::{ConfigError, Result};
use crate::form::{Form, FormKind};
use crate::presenter::{
    ChoiceDialog, FieldDialog, Identity, MessageDialog, Presenter, PresenterResult,
};
use crate::response::{Feedback, Response};
use std::sync::Arc;

/// A built dialog waiting to be shown
pub(crate) enum Prepared<I: Identity> {
    Choice {
        dialog: Box<dyn ChoiceDialog<I>>,
        responses: Vec<Response<I>>,
    },
    Message {
        dialog: Box<dyn MessageDialog<I>>,
        responses: Vec<Response<I>>,
    },
    Modal {
        dialog: Box<dyn FieldDialog<I>>,
        feedback: Feedback<I>,
    },
}

impl<I: Identity> Prepared<I> {
    pub(crate) fn kind(&self) -> FormKind {
        match self {
            Self::Choice { .. } => FormKind::Choice,
            Self::Message { .. } => FormKind::Message,
            Self::Modal { .. } => FormKind::Modal,
        }
    }

    /// Show the dialog and dispatch its answer
    pub(crate) async fn complete(
        self,
        presenter: Arc<dyn Presenter<I>>,
        identity: I,
    ) -> Result<()> {
        match self {
            Self::Choice { dialog, responses } => {
                let response = dialog.show(identity.clone()).await?;
                tracing::debug!("choice form answered: {:?}", response);
                dispatch::dispatch_selection(&responses, &response, &presenter, &identity)?;
            }
            Self::Message { dialog, responses } => {
                let response = dialog.show(identity.clone()).await?;
                tracing::debug!("message form answered: {:?}", response);
                dispatch::dispatch_selection(&responses, &response, &presenter, &identity)?;
            }
            Self::Modal { dialog, feedback } => {
                let response = dialog.show(identity.clone()).await?;
                tracing::debug!(
                    canceled = response.canceled,
                    values = response.values.len(),
                    "modal form answered"
                );
                dispatch::dispatch_feedback(&feedback, &identity, response)?;
            }
        }
        Ok(())
    }
}

/// Validate `form` and build its dialog
pub(crate) fn prepare<I: Identity>(
    form: &Form<I>,
    presenter: &dyn Presenter<I>,
) -> Result<Prepared<I>> {
    let kind = form.validate()?;
    let title = form.title.as_deref().ok_or(ConfigError::MissingTitle)?;

    tracing::debug!(
        %kind,
        title,
        buttons = form.buttons.len(),
        fields = form.fields.len(),
        "building form"
    );

    let prepared = match kind {
        FormKind::Choice => Prepared::Choice {
            dialog: build_choice(form, title, presenter)?,
            responses: form.responses.clone(),
        },
        FormKind::Message => Prepared::Message {
            dialog: build_message(form, title, presenter)?,
            responses: form.responses.clone(),
        },
        FormKind::Modal => {
            let feedback = form.feedback.clone().ok_or(ConfigError::MissingFeedback)?;
            Prepared::Modal {
                dialog: build_modal(form, title, presenter)?,
                feedback,
            }
        }
    };
    Ok(prepared)
}

fn build_choice<I: Identity>(
    form: &Form<I>,
    title: &str,
    presenter: &dyn Presenter<I>,
) -> PresenterResult<Box<dyn ChoiceDialog<I>>> {
    let mut dialog = presenter.choice_dialog();
    dialog.title(title)?;
    if let Some(body) = &form.body {
        dialog.body(body)?;
    }

    // Skipped slots take no index: the presenter numbers what it receives.
    for button in form.buttons.iter().flatten() {
        dialog.button(&button.text, button.icon.as_deref())?;
    }
    Ok(dialog)
}

fn build_message<I: Identity>(
    form: &Form<I>,
    title: &str,
    presenter: &dyn Presenter<I>,
) -> Result<Box<dyn MessageDialog<I>>> {
    let (primary, secondary) = match form.buttons.as_slice() {
        [Some(primary), Some(secondary)] => (primary, secondary),
        [_, _] => {
            let slot = form.buttons.iter().position(Option::is_none).unwrap_or(0);
            return Err(ConfigError::EmptyButton(slot).into());
        }
        other => return Err(ConfigError::ButtonCount(other.len()).into()),
    };

    let mut dialog = presenter.message_dialog();
    dialog.title(title)?;
    if let Some(body) = &form.body {
        dialog.body(body)?;
    }
    dialog.primary(&primary.text)?;
    dialog.secondary(&secondary.text)?;
    Ok(dialog)
}

fn build_modal<I: Identity>(
    form: &Form<I>,
    title: &str,
    presenter: &dyn Presenter<I>,
) -> PresenterResult<Box<dyn FieldDialog<I>>> {
    let mut dialog = presenter.field_dialog();
    dialog.title(title)?;
    if let Some(body) = &form.body {
        dialog.body(body)?;
    }

    for field in &form.fields {
        match field {
            Field::Toggle(t) => dialog.toggle(&t.label, t.default_value)?,
            Field::Slider(s) => dialog.slider(&s.label, s.min, s.max, s.step, s.default_value)?,
            Field::Dropdown(d) => dialog.dropdown(&d.label, &d.options, d.default_index)?,
            Field::TextField(t) => dialog.text_field(
                &t.label,
                t.placeholder.as_deref(),
                t.default_value.as_deref(),
            )?,
            Field::Icon(i) => dialog.icon(&i.path)?,
            Field::Unknown => {}
        }
    }
    Ok(dialog)
}
