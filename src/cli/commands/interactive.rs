use anyhow::Result;
use dialoguer::Select;

use crate::cli::ui;
use flipper::{ App, KeyValueStore };

enum Action {
    Analyze,
    Add,
    Remove,
    List,
    SwitchModel,
    DismissError,
    Quit,
}

/// Menu loop over one session: add, analyse, remove, switch model
pub async fn execute<S: KeyValueStore>(app: &mut App<S>) -> Result<()> {
    ui::print_header("AI Real Estate Flipper");
    ui::print_info(&format!("Backend: {}", app.backend_name()));
    if app.store().load_failed() {
        ui::print_warning("Saved properties could not be read; starting with an empty list.");
    }

    loop {
        let mut actions = vec![
            (Action::Analyze, "Analyze a property".to_string()),
            (Action::Add, "Add a property".to_string()),
            (Action::Remove, "Remove a property".to_string()),
            (Action::List, format!("List properties ({})", app.properties().len())),
            (Action::SwitchModel, format!("Switch model (current: {})", app.state().model.display_name())),
        ];
        if app.state().error.is_some() {
            actions.push((Action::DismissError, "Dismiss error".to_string()));
        }
        actions.push((Action::Quit, "Quit".to_string()));

        let labels: Vec<&str> = actions
            .iter()
            .map(|(_, label)| label.as_str())
            .collect();
        let choice = Select::with_theme(&ui::get_theme())
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        match actions[choice].0 {
            Action::Analyze => {
                let highlighted = app.state().analysis.as_ref().map(|a| &a.property);
                ui::display_properties(app.properties(), highlighted);
                match ui::select_property(app.properties(), "Property to analyze")? {
                    Some(index) => {
                        let id = app.properties()[index].id;
                        super::analyze::run(app, &id).await;
                    }
                    None => ui::print_info("Add a property to get started"),
                }
            }
            Action::Add => super::add::execute(app, None)?,
            Action::Remove => {
                match ui::select_property(app.properties(), "Property to remove")? {
                    Some(index) => {
                        let property = app.properties()[index].clone();
                        if ui::confirm_action(&format!("Remove {}?", property.address))? {
                            app.remove_property(&property.id);
                            ui::print_success(&format!("Removed {}", property.address));
                        }
                    }
                    None => ui::print_info("No properties to remove"),
                }
            }
            Action::List => super::list::execute(app)?,
            Action::SwitchModel => {
                let model = ui::select_model(&app.state().model)?;
                app.select_model(model);
            }
            Action::DismissError => app.dismiss_error(),
            Action::Quit => break,
        }
    }

    Ok(())
}
