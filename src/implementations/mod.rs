pub mod analysis_pipeline;
pub mod app;
pub mod app_state;
pub mod config;
pub mod file_store;
pub mod gemini_client;
pub mod memory_store;
pub mod mock_generator;
pub mod property_store;
