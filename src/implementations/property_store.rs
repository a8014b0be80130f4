use log::{ debug, info, warn };
use uuid::Uuid;

use crate::errors::{ FlipperError, FlipperResult };
use crate::models::property::{
    parse_form_integer,
    Condition,
    Property,
    PropertyId,
    PropertyInput,
    DEFAULT_BATHROOMS,
    DEFAULT_BEDROOMS,
};
use crate::traits::key_value_store::KeyValueStore;

/// Key the property list is persisted under
pub const STORAGE_KEY: &str = "realEstateProperties";

/// Ordered list of properties mirrored to a key-value store.
///
/// The backing store is a convenience cache: load and save failures are
/// logged and swallowed, and the in-memory list stays authoritative.
pub struct PropertyStore<S: KeyValueStore> {
    storage: S,
    properties: Vec<Property>,
    load_failed: bool,
}

impl<S: KeyValueStore> PropertyStore<S> {
    /// Open the store, restoring whatever list was persisted last
    pub fn open(storage: S) -> Self {
        let (properties, load_failed) = match storage.get(STORAGE_KEY) {
            Ok(None) => {
                debug!("No saved properties under {}", STORAGE_KEY);
                (Vec::new(), false)
            }
            Ok(Some(payload)) =>
                match serde_json::from_str::<Vec<Property>>(&payload) {
                    Ok(properties) => {
                        info!("Restored {} saved properties", properties.len());
                        (properties, false)
                    }
                    Err(e) => {
                        warn!("Saved properties are corrupt, starting empty: {}", e);
                        (Vec::new(), true)
                    }
                }
            Err(e) => {
                warn!("Could not read saved properties, starting empty: {}", e);
                (Vec::new(), true)
            }
        };

        Self { storage, properties, load_failed }
    }

    /// True when the persisted list existed but could not be read
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Validate and coerce form input, then append and persist it
    pub fn add(&mut self, input: &PropertyInput) -> FlipperResult<Property> {
        let property = Self::build(input)?;
        info!("Adding property {} ({})", property.address, property.id);
        self.properties.push(property.clone());
        self.persist();
        Ok(property)
    }

    /// Remove the property with `id`; unknown ids are ignored
    pub fn remove(&mut self, id: &PropertyId) -> Option<Property> {
        let index = self.properties.iter().position(|p| &p.id == id)?;
        let removed = self.properties.remove(index);
        info!("Removed property {} ({})", removed.address, removed.id);
        self.persist();
        Some(removed)
    }

    pub fn list(&self) -> &[Property] {
        &self.properties
    }

    pub fn get(&self, id: &PropertyId) -> Option<&Property> {
        self.properties.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn build(input: &PropertyInput) -> FlipperResult<Property> {
        let address = input.address.trim();
        let mut missing = Vec::new();
        if address.is_empty() {
            missing.push("address");
        }
        if input.purchase_price.trim().is_empty() {
            missing.push("purchase price");
        }
        if input.square_feet.trim().is_empty() {
            missing.push("square feet");
        }
        if !missing.is_empty() {
            return Err(
                FlipperError::Validation(
                    format!("Please fill in required fields: {}", missing.join(", "))
                )
            );
        }

        let purchase_price = parse_form_integer(&input.purchase_price).ok_or_else(||
            FlipperError::Validation(
                format!("Purchase price must be a number, got {:?}", input.purchase_price.trim())
            )
        )?;
        let square_feet = parse_form_integer(&input.square_feet)
            .filter(|sqft| *sqft > 0)
            .ok_or_else(||
                FlipperError::Validation(
                    format!(
                        "Square feet must be a positive number, got {:?}",
                        input.square_feet.trim()
                    )
                )
            )?;

        Ok(Property {
            id: Uuid::new_v4(),
            address: address.to_string(),
            purchase_price,
            square_feet,
            bedrooms: positive_or(&input.bedrooms, DEFAULT_BEDROOMS),
            bathrooms: positive_or(&input.bathrooms, DEFAULT_BATHROOMS),
            condition: Condition::parse_lenient(&input.condition),
            market_description: input.market_description.trim().to_string(),
        })
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.properties) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not serialize properties: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(STORAGE_KEY, &payload) {
            warn!("Could not save properties: {}", e);
        }
    }
}

fn positive_or(text: &str, default: u32) -> u32 {
    parse_form_integer(text)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}
