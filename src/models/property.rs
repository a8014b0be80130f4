use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_BEDROOMS: u32 = 3;
pub const DEFAULT_BATHROOMS: u32 = 2;

/// Stable identifier assigned when a property is added
pub type PropertyId = Uuid;

/// A candidate property awaiting analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    pub purchase_price: u64,
    pub square_feet: u64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub market_description: String,
}

/// Physical condition of the property as judged by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Poor,
    #[default]
    Average,
    Good,
    Excellent,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::Poor,
        Condition::Average,
        Condition::Good,
        Condition::Excellent,
    ];

    /// Unrecognised text falls back to `Average`
    pub fn parse_lenient(text: &str) -> Self {
        text.parse().unwrap_or_default()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Condition::Poor => "poor",
            Condition::Average => "average",
            Condition::Good => "good",
            Condition::Excellent => "excellent",
        };
        f.write_str(name)
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poor" => Ok(Condition::Poor),
            "average" => Ok(Condition::Average),
            "good" => Ok(Condition::Good),
            "excellent" => Ok(Condition::Excellent),
            other => Err(format!("Unknown condition: {}", other)),
        }
    }
}

/// Raw form input, every field as typed by the user
#[derive(Debug, Clone, Default)]
pub struct PropertyInput {
    pub address: String,
    pub purchase_price: String,
    pub square_feet: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub condition: String,
    pub market_description: String,
}

/// Parse the leading integer of a form field.
///
/// Whitespace is trimmed and `$`/`,` separators are ignored, so `"$250,000"`
/// reads as 250000 and `"1200 sqft"` as 1200. Returns `None` when no digit
/// leads the text.
pub fn parse_form_integer(text: &str) -> Option<u64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    let digits: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_integers_follow_leading_digits() {
        assert_eq!(parse_form_integer("250000"), Some(250_000));
        assert_eq!(parse_form_integer("  $250,000 "), Some(250_000));
        assert_eq!(parse_form_integer("1200 sqft"), Some(1200));
        assert_eq!(parse_form_integer("12.9"), Some(12));
        assert_eq!(parse_form_integer("abc"), None);
        assert_eq!(parse_form_integer(""), None);
        assert_eq!(parse_form_integer("-5"), None);
    }

    #[test]
    fn condition_falls_back_to_average() {
        assert_eq!(Condition::parse_lenient("EXCELLENT"), Condition::Excellent);
        assert_eq!(Condition::parse_lenient("derelict"), Condition::Average);
        assert_eq!(Condition::parse_lenient(""), Condition::Average);
    }

    #[test]
    fn property_serializes_with_camel_case_fields() {
        let property = Property {
            id: Uuid::nil(),
            address: "1 Main St".to_string(),
            purchase_price: 100,
            square_feet: 900,
            bedrooms: 3,
            bathrooms: 2,
            condition: Condition::Good,
            market_description: String::new(),
        };
        let json = serde_json::to_value(&property).unwrap();
        assert_eq!(json["purchasePrice"], 100);
        assert_eq!(json["squareFeet"], 900);
        assert_eq!(json["condition"], "good");
    }
}
