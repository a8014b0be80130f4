use anyhow::Result;

use crate::cli::ui;
use flipper::models::property::PropertyInput;
use flipper::{ App, FlipperError, KeyValueStore };

/// Add-property command; `input` of `None` means ask interactively
pub fn execute<S: KeyValueStore>(app: &mut App<S>, input: Option<PropertyInput>) -> Result<()> {
    let input = match input {
        Some(input) => input,
        None => {
            ui::print_header("Add Property");
            ui::prompt_property_input()?
        }
    };

    match app.add_property(&input) {
        Ok(property) => {
            ui::print_success(&format!("Added {} ({})", property.address, property.id));
            Ok(())
        }
        Err(FlipperError::Validation(message)) => {
            ui::print_error(&message);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
