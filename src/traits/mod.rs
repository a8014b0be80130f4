pub mod key_value_store;
pub mod text_generator;

// Re-export traits
pub use key_value_store::KeyValueStore;
pub use text_generator::{ GenerationRequest, TextGenerator };
