use anyhow::Result;

use super::resolve_target;
use crate::cli::ui;
use flipper::{ App, KeyValueStore };

pub fn execute<S: KeyValueStore>(app: &mut App<S>, target: &str) -> Result<()> {
    let removed = match resolve_target(app.properties(), target)? {
        Some(id) => app.remove_property(&id),
        None => None,
    };

    match removed {
        Some(property) => ui::print_success(&format!("Removed {}", property.address)),
        None => ui::print_info(&format!("No property matches {}; nothing removed.", target)),
    }
    Ok(())
}
