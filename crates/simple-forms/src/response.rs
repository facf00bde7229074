//! Response handlers
//!
//! A [`Response`] binds a button index (or [`CANCELED`]) to an [`Action`].
//! A [`Feedback`] receives the raw values of a modal form.

use crate::error::FormError;
use crate::form::Form;
use crate::presenter::{FieldResponse, Identity, Presenter, SelectionResponse};
use std::fmt;
use std::sync::Arc;

/// Trigger index matching a dismissed form
pub const CANCELED: i32 = -1;

type CallbackFn<I> = dyn Fn(&I) -> anyhow::Result<()> + Send + Sync;
type FeedbackFn<I> = dyn Fn(&I, FieldResponse) -> anyhow::Result<()> + Send + Sync;

/// What runs when a response fires
pub enum Action<I: Identity> {
    /// Plain callback, invoked with the identity
    Callback(Arc<CallbackFn<I>>),
    /// Nested form, executed for the same identity
    Form(Arc<Form<I>>),
    /// Actions run one after another in order
    Sequence(Vec<Action<I>>),
}

impl<I: Identity> Action<I> {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(&I) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::Callback(Arc::new(f))
    }

    pub fn form(form: Form<I>) -> Self {
        Self::Form(Arc::new(form))
    }

    pub fn sequence(actions: impl IntoIterator<Item = Action<I>>) -> Self {
        Self::Sequence(actions.into_iter().collect())
    }

    /// Run this action for `identity`
    ///
    /// Nested forms are scheduled, not awaited. The first failure stops the
    /// rest of a sequence.
    pub fn run(&self, presenter: &Arc<dyn Presenter<I>>, identity: &I) -> anyhow::Result<()> {
        match self {
            Self::Callback(f) => f(identity),
            Self::Form(form) => {
                let task = form.execute(presenter, identity.clone())?;
                tracing::debug!("scheduled nested form task {}", task.id());
                Ok(())
            }
            Self::Sequence(actions) => {
                for action in actions {
                    action.run(presenter, identity)?;
                }
                Ok(())
            }
        }
    }
}

impl<I: Identity> Clone for Action<I> {
    fn clone(&self) -> Self {
        match self {
            Self::Callback(f) => Self::Callback(Arc::clone(f)),
            Self::Form(form) => Self::Form(Arc::clone(form)),
            Self::Sequence(actions) => Self::Sequence(actions.clone()),
        }
    }
}

impl<I: Identity> fmt::Debug for Action<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::Form(form) => f.debug_tuple("Form").field(form).finish(),
            Self::Sequence(actions) => f.debug_tuple("Sequence").field(actions).finish(),
        }
    }
}

impl<I: Identity> From<Form<I>> for Action<I> {
    fn from(form: Form<I>) -> Self {
        Self::form(form)
    }
}

impl<I: Identity> From<Vec<Action<I>>> for Action<I> {
    fn from(actions: Vec<Action<I>>) -> Self {
        Self::Sequence(actions)
    }
}

/// Handler bound to a button index
pub struct Response<I: Identity> {
    index: i32,
    action: Action<I>,
}

impl<I: Identity> Response<I> {
    /// Fire `action` when button `index` is pressed, or on cancel for [`CANCELED`]
    pub fn new(index: i32, action: impl Into<Action<I>>) -> Self {
        Self {
            index,
            action: action.into(),
        }
    }

    /// Fire `action` when the form is dismissed
    pub fn on_cancel(action: impl Into<Action<I>>) -> Self {
        Self::new(CANCELED, action)
    }

    pub fn set_index(&mut self, index: i32) -> &mut Self {
        self.index = index;
        self
    }

    pub fn set_action(&mut self, action: impl Into<Action<I>>) -> &mut Self {
        self.action = action.into();
        self
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn action(&self) -> &Action<I> {
        &self.action
    }

    /// Whether this handler fires for `response`
    pub fn fires_on(&self, response: &SelectionResponse) -> bool {
        if response.canceled {
            return self.index == CANCELED;
        }
        response
            .selection
            .is_some_and(|selection| i32::try_from(selection) == Ok(self.index))
    }

    /// Run the bound action
    pub fn run(&self, presenter: &Arc<dyn Presenter<I>>, identity: &I) -> Result<(), FormError> {
        self.action
            .run(presenter, identity)
            .map_err(|e| FormError::Handler {
                index: self.index,
                message: format!("{e:#}"),
            })
    }
}

impl<I: Identity> Clone for Response<I> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            action: self.action.clone(),
        }
    }
}

impl<I: Identity> fmt::Debug for Response<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("index", &self.index)
            .field("action", &self.action)
            .finish()
    }
}

/// Receiver for modal form values
pub struct Feedback<I: Identity> {
    callback: Arc<FeedbackFn<I>>,
}

impl<I: Identity> Feedback<I> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&I, FieldResponse) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self { callback: Arc::new(f) }
    }

    pub fn set_callback<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&I, FieldResponse) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.callback = Arc::new(f);
        self
    }

    /// Hand `response` to the callback unchanged
    pub fn run(&self, identity: &I, response: FieldResponse) -> Result<(), FormError> {
        (self.callback)(identity, response).map_err(|e| FormError::Feedback(format!("{e:#}")))
    }
}

impl<I: Identity> Clone for Feedback<I> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<I: Identity> fmt::Debug for Feedback<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Feedback(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::ScriptedPresenter;
    use parking_lot::Mutex;

    fn presenter() -> Arc<dyn Presenter<u32>> {
        Arc::new(ScriptedPresenter::new())
    }

    fn noop() -> Action<u32> {
        Action::callback(|_| Ok(()))
    }

    fn recorder(log: &Arc<Mutex<Vec<String>>>, name: &str) -> Action<u32> {
        let log = Arc::clone(log);
        let name = name.to_string();
        Action::callback(move |player: &u32| {
            log.lock().push(format!("{name}:{player}"));
            Ok(())
        })
    }

    #[test]
    fn test_fires_on_selection() {
        let response = Response::<u32>::new(1, noop());
        assert!(response.fires_on(&SelectionResponse::selected(1)));
        assert!(!response.fires_on(&SelectionResponse::selected(0)));
        assert!(!response.fires_on(&SelectionResponse::canceled()));
    }

    #[test]
    fn test_cancel_ignores_selection() {
        let response = Response::<u32>::on_cancel(noop());
        let stale = SelectionResponse { selection: Some(0), canceled: true };
        assert!(response.fires_on(&stale));
        assert!(!response.fires_on(&SelectionResponse::selected(0)));
    }

    #[test]
    fn test_negative_index_never_fires_on_selection() {
        let response = Response::<u32>::new(-2, noop());
        assert!(!response.fires_on(&SelectionResponse::canceled()));
        assert!(!response.fires_on(&SelectionResponse::selected(usize::MAX)));
    }

    #[test]
    fn test_setters() {
        let mut response = Response::<u32>::new(0, noop());
        response.set_index(3).set_action(Vec::<Action<u32>>::new());
        assert_eq!(response.index(), 3);
        assert!(matches!(response.action(), Action::Sequence(a) if a.is_empty()));
    }

    #[test]
    fn test_sequence_runs_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let action = Action::sequence([recorder(&log, "a"), recorder(&log, "b")]);
        action.run(&presenter(), &9).unwrap();
        assert_eq!(*log.lock(), vec!["a:9", "b:9"]);
    }

    #[test]
    fn test_sequence_stops_at_first_failure() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let action = Action::sequence([
            recorder(&log, "a"),
            Action::callback(|_| Err(anyhow::anyhow!("denied"))),
            recorder(&log, "c"),
        ]);
        let response = Response::new(0, action);
        let err = response.run(&presenter(), &1).unwrap_err();
        assert!(matches!(err, FormError::Handler { index: 0, ref message } if message == "denied"));
        assert_eq!(*log.lock(), vec!["a:1"]);
    }

    #[test]
    fn test_feedback_error_keeps_context() {
        let feedback = Feedback::<u32>::new(|_, _| {
            Err(anyhow::anyhow!("disk full")).map_err(|e| e.context("saving settings"))
        });
        let err = feedback.run(&1, FieldResponse::canceled()).unwrap_err();
        assert_eq!(err.to_string(), "feedback handler failed: saving settings: disk full");
    }
}
