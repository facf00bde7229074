//! simple-forms - Declarative dialog forms with automatic response dispatch
//!
//! Describe a dialog as a tree of values, attach handlers to button indices,
//! and let the crate route the user's answer. Rendering is left to the host
//! through the [`Presenter`] traits.
//!
//! # Form kinds
//!
//! | Kind | Built from | Answer | Routed to |
//! |------|-----------|--------|-----------|
//! | [`FormKind::Choice`] | any number of buttons | button index or cancel | [`Response`] handlers |
//! | [`FormKind::Message`] | exactly two buttons | button index or cancel | [`Response`] handlers |
//! | [`FormKind::Modal`] | toggles, sliders, dropdowns, text fields, icons | list of values | one [`Feedback`] |
//!
//! # Flow
//!
//! ```text
//! ┌──────────┐  execute   ┌──────────────┐  show   ┌───────────┐
//! │   Form   │──────────▶│   Strategy   │───────▶│ Presenter │
//! │ (config) │  validate  │ (per kind)   │  await  │  (host)   │
//! └──────────┘            └──────────────┘         └─────┬─────┘
//!                                                        │ answer
//!                                  ┌─────────────────────▼─────┐
//!                                  │ Dispatch: Response fan-out │
//!                                  │        or Feedback         │
//!                                  └─────────────┬─────────────┘
//!                                                │
//!                           Callback │ nested Form │ Sequence
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dispatch;
pub mod element;
pub mod error;
pub mod form;
pub mod presenter;
pub mod response;
mod strategy;
mod task;

pub use element::{Button, Dropdown, Field, Icon, Slider, TextField, Toggle};
pub use error::{ConfigError, FormError, Result};
pub use form::{Form, FormKind, FormLayout, KindTag};
pub use presenter::{
    ChoiceDialog, FieldDialog, FieldResponse, FieldValue, Identity, MessageDialog, Presenter,
    PresenterError, ScriptedPresenter, SelectionResponse,
};
pub use response::{Action, Feedback, Response, CANCELED};
pub use task::FormTask;

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use presenter::Call;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio_test::{assert_err, assert_ok};

    type Player = String;

    fn steve() -> Player {
        "steve".to_string()
    }

    fn shared(presenter: &ScriptedPresenter) -> Arc<dyn Presenter<Player>> {
        Arc::new(presenter.clone())
    }

    fn log_to(log: &Arc<Mutex<Vec<String>>>, name: &str) -> Action<Player> {
        let log = Arc::clone(log);
        let name = name.to_string();
        Action::callback(move |player: &Player| {
            log.lock().push(format!("{name}:{player}"));
            Ok(())
        })
    }

    fn warp_menu(log: &Arc<Mutex<Vec<String>>>) -> Form<Player> {
        let mut form = Form::<Player>::new();
        form.kind(FormKind::Choice)
            .title("Warps")
            .body("Pick a destination")
            .buttons([Button::new("A"), Button::new("B"), Button::new("C")])
            .responses([
                Response::new(1, log_to(log, "f")),
                Response::new(1, log_to(log, "g")),
                Response::on_cancel(log_to(log, "h")),
            ]);
        form
    }

    #[tokio::test]
    async fn test_choice_selection_scenario() {
        let scripted = ScriptedPresenter::new();
        scripted.push_selection(SelectionResponse::selected(1));
        let log = Arc::new(Mutex::new(Vec::new()));

        let task = assert_ok!(warp_menu(&log).execute(&shared(&scripted), steve()));
        assert_ok!(task.wait().await);

        assert_eq!(*log.lock(), vec!["f:steve", "g:steve"]);
        assert_eq!(scripted.shows(), 1);
    }

    #[tokio::test]
    async fn test_choice_cancel_scenario() {
        let scripted = ScriptedPresenter::new();
        scripted.push_selection(SelectionResponse::canceled());
        let log = Arc::new(Mutex::new(Vec::new()));

        assert_ok!(warp_menu(&log).show(&shared(&scripted), steve()).await);
        assert_eq!(*log.lock(), vec!["h:steve"]);
    }

    #[tokio::test]
    async fn test_skipped_button_does_not_shift_indices() {
        let scripted = ScriptedPresenter::new();
        scripted.push_selection(SelectionResponse::selected(1));
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut form = Form::<Player>::new();
        form.kind(FormKind::Choice)
            .title("Shop")
            .buttons([Some(Button::new("Swords")), None, Some(Button::new("Armor"))])
            .responses([
                Response::new(1, log_to(&log, "armor")),
                Response::new(2, log_to(&log, "never")),
            ]);

        assert_ok!(form.show(&shared(&scripted), steve()).await);
        assert_eq!(*log.lock(), vec!["armor:steve"]);
        let buttons = scripted
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Button { .. }))
            .count();
        assert_eq!(buttons, 2);
    }

    #[tokio::test]
    async fn test_message_wrong_button_count_never_shows() {
        let scripted = ScriptedPresenter::new();
        scripted.push_selection(SelectionResponse::selected(0));

        for count in [0usize, 1, 3] {
            let mut form = Form::<Player>::new();
            form.kind(FormKind::Message)
                .title("Confirm")
                .buttons((0..count).map(|i| Button::new(format!("b{i}"))));

            let err = assert_err!(form.execute(&shared(&scripted), steve()));
            assert!(matches!(err, FormError::Config(ConfigError::ButtonCount(n)) if n == count));
        }
        assert_eq!(scripted.shows(), 0);
        assert!(scripted.calls().is_empty());
    }

    #[tokio::test]
    async fn test_message_form_dispatch() {
        let scripted = ScriptedPresenter::new();
        scripted.push_selection(SelectionResponse::selected(0));
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut form = Form::<Player>::new();
        form.kind("MessageForm")
            .title("Reset world?")
            .buttons([Button::new("Reset"), Button::new("Keep")])
            .responses([
                Response::new(0, log_to(&log, "reset")),
                Response::new(1, log_to(&log, "keep")),
            ]);

        assert_ok!(form.show(&shared(&scripted), steve()).await);
        assert_eq!(*log.lock(), vec!["reset:steve"]);
    }

    #[tokio::test]
    async fn test_modal_feedback_scenario() {
        let scripted = ScriptedPresenter::new();
        let answer =
            FieldResponse::submitted(vec![FieldValue::Bool(true), FieldValue::Number(5.0)]);
        scripted.push_submission(answer.clone());

        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let fired = Arc::new(Mutex::new(Vec::new()));

        let mut form = Form::<Player>::new();
        form.kind(FormKind::Modal)
            .title("Settings")
            .fields([
                Field::toggle("PvP", None),
                Field::slider("Radius", 0.0, 10.0, 1.0, None),
            ])
            .responses([Response::new(0, log_to(&fired, "unused"))])
            .feedback(Feedback::new(move |player: &Player, response| {
                sink.lock().push((player.clone(), response));
                Ok(())
            }));

        let task = assert_ok!(form.execute(&shared(&scripted), steve()));
        assert_ok!(task.wait().await);

        assert_eq!(*received.lock(), vec![(steve(), answer)]);
        assert!(fired.lock().is_empty());
    }

    #[tokio::test]
    async fn test_modal_cancel_still_reaches_feedback() {
        let scripted = ScriptedPresenter::new();
        scripted.push_submission(FieldResponse::canceled());
        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);

        let mut form = Form::<Player>::new();
        form.kind(FormKind::Modal)
            .title("Settings")
            .fields([Field::toggle("PvP", None)])
            .feedback(Feedback::new(move |_, response| {
                assert!(response.canceled);
                *counter.lock() += 1;
                Ok(())
            }));

        assert_ok!(form.show(&shared(&scripted), steve()).await);
        assert_eq!(*count.lock(), 1);
    }

    #[tokio::test]
    async fn test_nested_form_is_scheduled() {
        let scripted = ScriptedPresenter::new();
        scripted.push_selection(SelectionResponse::selected(0));
        scripted.push_selection(SelectionResponse::selected(1));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let confirm_tx = tx.clone();

        let mut confirm = Form::<Player>::new();
        confirm
            .kind(FormKind::Message)
            .title("Sure?")
            .buttons([Button::new("No"), Button::new("Yes")])
            .responses([Response::new(
                1,
                Action::callback(move |player: &Player| {
                    confirm_tx.send(format!("confirmed:{player}"))?;
                    Ok(())
                }),
            )]);

        let mut menu = Form::<Player>::new();
        menu.kind(FormKind::Choice)
            .title("Admin")
            .buttons([Button::new("Wipe")])
            .responses([Response::new(
                0,
                Action::sequence([
                    Action::callback(move |_: &Player| {
                        tx.send("opened".to_string())?;
                        Ok(())
                    }),
                    Action::form(confirm),
                ]),
            )]);

        let task = assert_ok!(menu.execute(&shared(&scripted), steve()));
        assert_ok!(task.wait().await);

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        let second = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert_eq!(first.ok().flatten().as_deref(), Some("opened"));
        assert_eq!(second.ok().flatten().as_deref(), Some("confirmed:steve"));
        assert_eq!(scripted.shows(), 2);
    }

    #[tokio::test]
    async fn test_nested_config_error_fails_the_handler() {
        let scripted = ScriptedPresenter::new();
        scripted.push_selection(SelectionResponse::selected(0));
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut broken = Form::<Player>::new();
        broken.kind(FormKind::Message).title("Broken");

        let mut menu = Form::<Player>::new();
        menu.kind(FormKind::Choice)
            .title("Admin")
            .buttons([Button::new("Go")])
            .responses([Response::new(
                0,
                Action::sequence([Action::form(broken), log_to(&log, "after")]),
            )]);

        let task = assert_ok!(menu.execute(&shared(&scripted), steve()));
        let err = assert_err!(task.wait().await);
        assert!(matches!(err, FormError::Handler { index: 0, .. }));
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn test_abandoned_form_surfaces_presenter_error() {
        let scripted = ScriptedPresenter::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let err = assert_err!(warp_menu(&log).show(&shared(&scripted), steve()).await);
        assert!(matches!(err, FormError::Presenter(PresenterError::Closed(_))));
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_execute_without_runtime() {
        let scripted = ScriptedPresenter::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let err = assert_err!(warp_menu(&log).execute(&shared(&scripted), steve()));
        assert!(matches!(err, FormError::NoRuntime));
        assert!(scripted.calls().is_empty());
    }

    #[tokio::test]
    async fn test_form_from_layout() {
        let scripted = ScriptedPresenter::new();
        scripted.push_selection(SelectionResponse::selected(0));
        let log = Arc::new(Mutex::new(Vec::new()));

        let layout = assert_ok!(FormLayout::from_json(
            r#"{"kind":"ActionForm","title":"Kits","buttons":[{"text":"Starter","icon":"kits/starter"}]}"#
        ));
        let mut form = Form::from_layout(layout);
        form.responses([Response::new(0, log_to(&log, "starter"))]);

        assert_ok!(form.show(&shared(&scripted), steve()).await);
        assert_eq!(*log.lock(), vec!["starter:steve"]);
        assert!(scripted.calls().contains(&Call::Button {
            text: "Starter".into(),
            icon: Some("kits/starter".into()),
        }));
    }
}
