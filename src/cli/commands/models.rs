use anyhow::Result;
use colored::*;

use crate::cli::ui;
use flipper::ModelVariant;

pub fn execute(current: &ModelVariant) -> Result<()> {
    ui::print_header("Gemini Models");
    for model in ModelVariant::ALL.iter() {
        let marker = if model == current { "*" } else { " " };
        println!("{} {:<18} {}", marker, model.api_name().bold(), model.display_name());
    }
    Ok(())
}
