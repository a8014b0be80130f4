use crate::errors::FlipperResult;

/// String key-value persistence, the local-storage collaborator
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> FlipperResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> FlipperResult<()>;
}
