pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::FlipperConfig;
pub use errors::{ FlipperError, FlipperResult };
pub use implementations::analysis_pipeline::{ parse_assessment, strip_code_fence, FlipAnalyzer };
pub use implementations::app::{ build_generator, App, AnalysisJob };
pub use implementations::app_state::{ AppEvent, AppState };
pub use implementations::config::GeminiConfig;
pub use implementations::file_store::FileStore;
pub use implementations::gemini_client::GeminiClient;
pub use implementations::memory_store::MemoryStore;
pub use implementations::mock_generator::MockGenerator;
pub use implementations::property_store::{ PropertyStore, STORAGE_KEY };
pub use models::{
    analysis::{ Analysis, FinancialSummary, InvestmentRating, ModelAssessment, Roi },
    common::{ Backend, ModelVariant },
    property::{ Condition, Property, PropertyId, PropertyInput },
};
pub use traits::{ GenerationRequest, KeyValueStore, TextGenerator };
