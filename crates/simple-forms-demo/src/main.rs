//! simple-forms demo
//!
//! Loads a form layout, answers it from the command line through the scripted
//! presenter, and logs which handlers fired.
//!
//! # Usage
//!
//! ```bash
//! simple-forms-demo --select 1
//! simple-forms-demo --cancel
//! simple-forms-demo --layout layouts/settings.json --values '[true, 16, 3, "hi"]'
//! RUST_LOG=simple_forms=trace simple-forms-demo --select 0
//! ```

use clap::Parser;
use simple_forms::{
    Action, Feedback, FieldResponse, FieldValue, Form, FormLayout, Presenter, Response,
    ScriptedPresenter, SelectionResponse,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LAYOUT: &str = include_str!("../layouts/warps.json");

#[derive(Parser)]
#[command(name = "simple-forms-demo")]
#[command(about = "Walk a form layout through scripted answers", long_about = None)]
struct Cli {
    /// Form layout (JSON); defaults to the bundled warp menu
    #[arg(long, short, env = "SIMPLE_FORMS_LAYOUT")]
    layout: Option<PathBuf>,

    /// Player the form is shown to
    #[arg(long, default_value = "steve")]
    player: String,

    /// Button index to press
    #[arg(long, short, conflicts_with = "cancel")]
    select: Option<usize>,

    /// Field values to submit, as a JSON array
    #[arg(long, conflicts_with = "cancel")]
    values: Option<String>,

    /// Dismiss the form instead of answering
    #[arg(long)]
    cancel: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let layout = match &cli.layout {
        Some(path) => FormLayout::from_json(&std::fs::read_to_string(path)?)?,
        None => FormLayout::from_json(DEFAULT_LAYOUT)?,
    };

    let scripted = ScriptedPresenter::new();
    if cli.cancel {
        scripted.push_selection(SelectionResponse::canceled());
        scripted.push_submission(FieldResponse::canceled());
    } else {
        if let Some(index) = cli.select {
            scripted.push_selection(SelectionResponse::selected(index));
        }
        if let Some(values) = &cli.values {
            let values: Vec<FieldValue> = serde_json::from_str(values)?;
            scripted.push_submission(FieldResponse::submitted(values));
        }
    }

    let form = build_form(layout);
    let presenter: Arc<dyn Presenter<String>> = Arc::new(scripted.clone());

    form.execute(&presenter, cli.player)?.wait().await?;

    tracing::info!("{} presenter calls", scripted.calls().len());
    Ok(())
}

/// Attach a logging handler to every button, the cancel slot and the feedback
fn build_form(layout: FormLayout) -> Form<String> {
    let labels: Vec<String> = layout.buttons.iter().flatten().map(|b| b.text.clone()).collect();

    let mut responses: Vec<Response<String>> = labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| {
            Response::new(
                index as i32,
                Action::callback(move |player: &String| {
                    tracing::info!("{} chose {}", player, label);
                    Ok(())
                }),
            )
        })
        .collect();
    responses.push(Response::on_cancel(Action::callback(|player: &String| {
        tracing::info!("{} closed the form", player);
        Ok(())
    })));

    let mut form = Form::from_layout(layout);
    form.responses(responses)
        .feedback(Feedback::new(|player: &String, response| {
            tracing::info!("{} submitted {}", player, serde_json::to_string(&response)?);
            Ok(())
        }));
    form
}
