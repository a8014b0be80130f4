use anyhow::{ anyhow, Result };

use flipper::models::property::{ Property, PropertyId };

pub mod add;
pub mod analyze;
pub mod interactive;
pub mod list;
pub mod models;
pub mod remove;

/// Resolve a UUID or a 1-based list position to a property id
pub fn resolve_target(properties: &[Property], target: &str) -> Result<Option<PropertyId>> {
    let target = target.trim();
    if let Ok(id) = target.parse::<PropertyId>() {
        return Ok(properties.iter().find(|p| p.id == id).map(|p| p.id));
    }
    if let Ok(position) = target.parse::<usize>() {
        return Ok(position.checked_sub(1).and_then(|i| properties.get(i)).map(|p| p.id));
    }
    Err(anyhow!("Expected a property id or list number, got {:?}", target))
}
