use anyhow::Result;
use log::debug;

use super::resolve_target;
use crate::cli::ui;
use flipper::models::property::PropertyId;
use flipper::{ App, KeyValueStore };

/// Run one analysis with a spinner, then render the results or an error banner
pub async fn run<S: KeyValueStore>(app: &mut App<S>, id: &PropertyId) {
    let address = app.store()
        .get(id)
        .map(|p| p.address.clone())
        .unwrap_or_default();
    let spinner = ui::spinner_with_message(
        &format!("Gemini AI is analyzing {} ({})...", address, app.state().model.display_name())
    );

    let outcome = app.analyze(id).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(analysis) => ui::display_analysis(analysis),
        Err(e) => {
            debug!("Analysis failed: {:?}", e);
            ui::print_error_banner(e.kind(), &e.to_string());
        }
    }
}

pub async fn execute<S: KeyValueStore>(app: &mut App<S>, target: &str) -> Result<()> {
    match resolve_target(app.properties(), target)? {
        Some(id) => run(app, &id).await,
        None => ui::print_error(&format!("No property matches {}", target)),
    }
    Ok(())
}
