pub mod analysis;
pub mod common;
pub mod property;

// Re-export common model types
pub use analysis::{ Analysis, FinancialSummary, InvestmentRating, ModelAssessment, Roi };
pub use common::{ Backend, ModelVariant };
pub use property::{ Condition, Property, PropertyId, PropertyInput };
