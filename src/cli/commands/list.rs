use anyhow::Result;

use crate::cli::ui;
use flipper::{ App, KeyValueStore };

pub fn execute<S: KeyValueStore>(app: &App<S>) -> Result<()> {
    if app.store().load_failed() {
        ui::print_warning("Saved properties could not be read; starting with an empty list.");
    }
    ui::display_properties(app.properties(), None);
    Ok(())
}
