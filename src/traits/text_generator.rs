use async_trait::async_trait;

use crate::errors::FlipperResult;
use crate::models::common::ModelVariant;
use crate::models::property::Property;

/// One prompt bound for a text generation backend
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub model: &'a ModelVariant,
    pub prompt: &'a str,
    /// The property the prompt was rendered from
    pub property: &'a Property,
}

/// Collaborator that turns a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce the raw text reply for a single prompt
    async fn generate(&self, request: GenerationRequest<'_>) -> FlipperResult<String>;

    /// Human readable backend name for logs and banners
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate(&self, request: GenerationRequest<'_>) -> FlipperResult<String> {
        (**self).generate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
