use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Deserializer };
use serde_json::Value;
use std::fmt;

use crate::models::common::ModelVariant;
use crate::models::property::Property;

/// Share of total investment reserved for holding costs
pub const HOLDING_COST_RATE: f64 = 0.05;

/// The JSON object the model is instructed to return
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelAssessment {
    #[serde(deserialize_with = "lenient_amount")]
    pub predicted_resale_value: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub estimated_renovation_costs: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub market_analysis: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub renovation_breakdown: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub risk_factors: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub investment_rating: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub recommendation_summary: String,
}

/// Narrative fields: `null` is empty, a list of points is joined one per line
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error> where D: Deserializer<'de> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(text) => Some(text),
                other => Some(other.to_string()),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    })
}

/// Anything but a string leaves the rating blank, which displays as unknown
fn lenient_rating<'de, D>(deserializer: D) -> Result<String, D::Error> where D: Deserializer<'de> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

/// Accept `400000`, `400000.0` or `"$400,000"` for currency amounts
fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error> where D: Deserializer<'de> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) if n.is_finite() => Ok(n),
        Amount::Number(n) => Err(serde::de::Error::custom(format!("not a currency amount: {}", n))),
        Amount::Text(text) => {
            let cleaned: String = text
                .trim()
                .chars()
                .filter(|c| *c != '$' && *c != ',')
                .collect();
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| serde::de::Error::custom(format!("not a currency amount: {:?}", text)))
        }
    }
}

/// Return on investment, undefined when nothing was invested
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Roi {
    Percent(f64),
    Undefined,
}

impl Roi {
    pub fn from_ratio(profit: f64, total_investment: f64) -> Self {
        if total_investment == 0.0 {
            return Roi::Undefined;
        }
        let percent = (profit / total_investment) * 100.0;
        if percent.is_finite() {
            Roi::Percent(percent)
        } else {
            Roi::Undefined
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Roi::Percent(p) => Some(*p),
            Roi::Undefined => None,
        }
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Roi::Percent(p) => write!(f, "{:.2}", p),
            Roi::Undefined => f.write_str("N/A"),
        }
    }
}

/// Model-provided verdict on the deal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvestmentRating {
    Excellent,
    Good,
    Moderate,
    Poor,
    /// Anything the model returned that we do not recognise, kept verbatim
    Unknown(String),
}

impl InvestmentRating {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "EXCELLENT" => InvestmentRating::Excellent,
            "GOOD" => InvestmentRating::Good,
            "MODERATE" => InvestmentRating::Moderate,
            "POOR" => InvestmentRating::Poor,
            _ => InvestmentRating::Unknown(raw.trim().to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, InvestmentRating::Unknown(_))
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            InvestmentRating::Excellent => "🚀",
            InvestmentRating::Good => "👍",
            InvestmentRating::Moderate => "⚠️",
            InvestmentRating::Poor => "⛔",
            InvestmentRating::Unknown(_) => "❓",
        }
    }
}

impl fmt::Display for InvestmentRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvestmentRating::Excellent => f.write_str("EXCELLENT"),
            InvestmentRating::Good => f.write_str("GOOD"),
            InvestmentRating::Moderate => f.write_str("MODERATE"),
            InvestmentRating::Poor => f.write_str("POOR"),
            InvestmentRating::Unknown(raw) if raw.is_empty() => f.write_str("UNKNOWN"),
            InvestmentRating::Unknown(raw) => f.write_str(raw),
        }
    }
}

/// Figures computed locally from the purchase price and the model's estimates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialSummary {
    pub resale_value: f64,
    pub renovation_costs: f64,
    pub total_investment: f64,
    pub profit: f64,
    pub roi: Roi,
    pub holding_costs: f64,
    pub net_profit: f64,
}

impl FinancialSummary {
    pub fn derive(purchase_price: u64, assessment: &ModelAssessment) -> Self {
        let resale_value = assessment.predicted_resale_value;
        let renovation_costs = assessment.estimated_renovation_costs;
        let total_investment = (purchase_price as f64) + renovation_costs;
        let profit = resale_value - total_investment;
        let holding_costs = (total_investment * HOLDING_COST_RATE).round();

        Self {
            resale_value,
            renovation_costs,
            total_investment,
            profit,
            roi: Roi::from_ratio(profit, total_investment),
            holding_costs,
            net_profit: profit - holding_costs,
        }
    }
}

/// The investment report for one property
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub property: Property,
    pub financials: FinancialSummary,
    pub investment_rating: InvestmentRating,
    pub market_analysis: String,
    pub renovation_breakdown: String,
    pub risk_factors: String,
    pub recommendation_summary: String,
    pub model: ModelVariant,
    pub generated_at: DateTime<Utc>,
}

impl Analysis {
    pub fn assemble(property: Property, assessment: ModelAssessment, model: ModelVariant) -> Self {
        let financials = FinancialSummary::derive(property.purchase_price, &assessment);
        Self {
            property,
            financials,
            investment_rating: InvestmentRating::parse(&assessment.investment_rating),
            market_analysis: assessment.market_analysis,
            renovation_breakdown: assessment.renovation_breakdown,
            risk_factors: assessment.risk_factors,
            recommendation_summary: assessment.recommendation_summary,
            model,
            generated_at: Utc::now(),
        }
    }
}
