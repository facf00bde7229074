//! Scripted presenter (for testing and development)
//!
//! Records every construction call in order and answers `show` from queued
//! responses. Mirrors the checks a real host makes on sliders and dropdowns.

use super::{
    ChoiceDialog, FieldDialog, FieldResponse, Identity, MessageDialog, Presenter, PresenterError,
    PresenterResult, SelectionResponse,
};
use crate::form::FormKind;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// A recorded presenter call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Open(FormKind),
    Title(String),
    Body(String),
    Button { text: String, icon: Option<String> },
    Primary(String),
    Secondary(String),
    Toggle { label: String, default_value: Option<bool> },
    Slider { label: String, min: f64, max: f64, step: f64, default_value: Option<f64> },
    Dropdown { label: String, options: Vec<String>, default_index: Option<usize> },
    TextField { label: String, placeholder: Option<String>, default_value: Option<String> },
    Icon(String),
    Show(FormKind),
}

#[derive(Default)]
struct Script {
    calls: Vec<Call>,
    selections: VecDeque<SelectionResponse>,
    submissions: VecDeque<FieldResponse>,
}

/// In-memory presenter driven by queued responses
///
/// Clones share the same call log and queues.
#[derive(Clone, Default)]
pub struct ScriptedPresenter {
    script: Arc<Mutex<Script>>,
}

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next choice or message dialog
    pub fn push_selection(&self, response: SelectionResponse) -> &Self {
        self.script.lock().selections.push_back(response);
        self
    }

    /// Queue the answer for the next field dialog
    pub fn push_submission(&self, response: FieldResponse) -> &Self {
        self.script.lock().submissions.push_back(response);
        self
    }

    /// Every call made so far
    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().calls.clone()
    }

    /// Number of dialogs shown
    pub fn shows(&self) -> usize {
        self.script
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Show(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.script.lock().calls.push(call);
    }

    fn next_selection(&self, kind: FormKind) -> PresenterResult<SelectionResponse> {
        let mut script = self.script.lock();
        script.calls.push(Call::Show(kind));
        script
            .selections
            .pop_front()
            .ok_or_else(|| PresenterError::Closed("no scripted selection".into()))
    }

    fn next_submission(&self) -> PresenterResult<FieldResponse> {
        let mut script = self.script.lock();
        script.calls.push(Call::Show(FormKind::Modal));
        script
            .submissions
            .pop_front()
            .ok_or_else(|| PresenterError::Closed("no scripted submission".into()))
    }
}

impl std::fmt::Debug for ScriptedPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let script = self.script.lock();
        f.debug_struct("ScriptedPresenter")
            .field("calls", &script.calls.len())
            .field("selections", &script.selections.len())
            .field("submissions", &script.submissions.len())
            .finish()
    }
}

impl<I: Identity> Presenter<I> for ScriptedPresenter {
    fn choice_dialog(&self) -> Box<dyn ChoiceDialog<I>> {
        self.record(Call::Open(FormKind::Choice));
        Box::new(ScriptedDialog { presenter: self.clone() })
    }

    fn message_dialog(&self) -> Box<dyn MessageDialog<I>> {
        self.record(Call::Open(FormKind::Message));
        Box::new(ScriptedDialog { presenter: self.clone() })
    }

    fn field_dialog(&self) -> Box<dyn FieldDialog<I>> {
        self.record(Call::Open(FormKind::Modal));
        Box::new(ScriptedDialog { presenter: self.clone() })
    }
}

struct ScriptedDialog {
    presenter: ScriptedPresenter,
}

impl ScriptedDialog {
    fn record(&self, call: Call) -> PresenterResult<()> {
        self.presenter.record(call);
        Ok(())
    }
}

#[async_trait]
impl<I: Identity> ChoiceDialog<I> for ScriptedDialog {
    fn title(&mut self, title: &str) -> PresenterResult<()> {
        self.record(Call::Title(title.to_string()))
    }

    fn body(&mut self, body: &str) -> PresenterResult<()> {
        self.record(Call::Body(body.to_string()))
    }

    fn button(&mut self, text: &str, icon: Option<&str>) -> PresenterResult<()> {
        self.record(Call::Button {
            text: text.to_string(),
            icon: icon.map(str::to_string),
        })
    }

    async fn show(self: Box<Self>, _identity: I) -> PresenterResult<SelectionResponse> {
        self.presenter.next_selection(FormKind::Choice)
    }
}

#[async_trait]
impl<I: Identity> MessageDialog<I> for ScriptedDialog {
    fn title(&mut self, title: &str) -> PresenterResult<()> {
        self.record(Call::Title(title.to_string()))
    }

    fn body(&mut self, body: &str) -> PresenterResult<()> {
        self.record(Call::Body(body.to_string()))
    }

    fn primary(&mut self, text: &str) -> PresenterResult<()> {
        self.record(Call::Primary(text.to_string()))
    }

    fn secondary(&mut self, text: &str) -> PresenterResult<()> {
        self.record(Call::Secondary(text.to_string()))
    }

    async fn show(self: Box<Self>, _identity: I) -> PresenterResult<SelectionResponse> {
        self.presenter.next_selection(FormKind::Message)
    }
}

#[async_trait]
impl<I: Identity> FieldDialog<I> for ScriptedDialog {
    fn title(&mut self, title: &str) -> PresenterResult<()> {
        self.record(Call::Title(title.to_string()))
    }

    fn body(&mut self, body: &str) -> PresenterResult<()> {
        self.record(Call::Body(body.to_string()))
    }

    fn toggle(&mut self, label: &str, default_value: Option<bool>) -> PresenterResult<()> {
        self.record(Call::Toggle {
            label: label.to_string(),
            default_value,
        })
    }

    fn slider(
        &mut self,
        label: &str,
        min: f64,
        max: f64,
        step: f64,
        default_value: Option<f64>,
    ) -> PresenterResult<()> {
        if step <= 0.0 {
            return Err(PresenterError::Rejected(format!(
                "slider {label}: step must be positive, got {step}"
            )));
        }
        if min > max {
            return Err(PresenterError::Rejected(format!(
                "slider {label}: min {min} exceeds max {max}"
            )));
        }
        if let Some(value) = default_value {
            if value < min || value > max {
                return Err(PresenterError::Rejected(format!(
                    "slider {label}: default {value} outside [{min}, {max}]"
                )));
            }
        }
        self.record(Call::Slider {
            label: label.to_string(),
            min,
            max,
            step,
            default_value,
        })
    }

    fn dropdown(
        &mut self,
        label: &str,
        options: &[String],
        default_index: Option<usize>,
    ) -> PresenterResult<()> {
        if options.is_empty() {
            return Err(PresenterError::Rejected(format!("dropdown {label}: no options")));
        }
        if let Some(index) = default_index {
            if index >= options.len() {
                return Err(PresenterError::Rejected(format!(
                    "dropdown {label}: default index {index} out of range"
                )));
            }
        }
        self.record(Call::Dropdown {
            label: label.to_string(),
            options: options.to_vec(),
            default_index,
        })
    }

    fn text_field(
        &mut self,
        label: &str,
        placeholder: Option<&str>,
        default_value: Option<&str>,
    ) -> PresenterResult<()> {
        self.record(Call::TextField {
            label: label.to_string(),
            placeholder: placeholder.map(str::to_string),
            default_value: default_value.map(str::to_string),
        })
    }

    fn icon(&mut self, path: &str) -> PresenterResult<()> {
        self.record(Call::Icon(path.to_string()))
    }

    async fn show(self: Box<Self>, _identity: I) -> PresenterResult<FieldResponse> {
        self.presenter.next_submission()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_choice_dialog_records_calls() {
        let presenter = ScriptedPresenter::new();
        presenter.push_selection(SelectionResponse::selected(0));

        let mut dialog = Presenter::<u32>::choice_dialog(&presenter);
        dialog.title("Menu").unwrap();
        dialog.button("Play", Some("icons/play")).unwrap();
        let response = dialog.show(7).await.unwrap();

        assert_eq!(response, SelectionResponse::selected(0));
        assert_eq!(
            presenter.calls(),
            vec![
                Call::Open(FormKind::Choice),
                Call::Title("Menu".into()),
                Call::Button { text: "Play".into(), icon: Some("icons/play".into()) },
                Call::Show(FormKind::Choice),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_queue_closes_dialog() {
        let presenter = ScriptedPresenter::new();
        let dialog = Presenter::<u32>::message_dialog(&presenter);
        let err = dialog.show(1).await.unwrap_err();
        assert!(matches!(err, PresenterError::Closed(_)));
        assert_eq!(presenter.shows(), 1);
    }

    #[test]
    fn test_field_dialog_validation() {
        let presenter = ScriptedPresenter::new();
        let mut dialog = Presenter::<u32>::field_dialog(&presenter);

        assert!(dialog.slider("Volume", 0.0, 10.0, 0.0, None).is_err());
        assert!(dialog.slider("Volume", 0.0, 10.0, 1.0, Some(11.0)).is_err());
        assert!(dialog.dropdown("Mode", &[], None).is_err());
        assert!(dialog.dropdown("Mode", &["a".into()], Some(1)).is_err());
        assert!(dialog.slider("Volume", 0.0, 10.0, 1.0, Some(5.0)).is_ok());
    }
}
