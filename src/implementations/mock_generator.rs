use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use crate::errors::FlipperResult;
use crate::traits::text_generator::{ GenerationRequest, TextGenerator };

/// Offline stand-in for the live model.
///
/// Replies with a fenced JSON assessment scaled from the purchase price,
/// after an optional artificial delay, so the full pipeline can be exercised
/// without a network or a credential.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    delay: Duration,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: GenerationRequest<'_>) -> FlipperResult<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let price = request.property.purchase_price as f64;
        let reply =
            serde_json::json!({
            "predictedResaleValue": (price * 1.7).round(),
            "estimatedRenovationCosts": (price * 0.2).round(),
            "marketAnalysis": "Strong local appreciation, low supply, high buyer demand.",
            "renovationBreakdown": "Kitchen remodel, new roof, and landscaping.",
            "riskFactors": "Rising interest rates, local permit delays.",
            "investmentRating": "EXCELLENT",
            "recommendationSummary": "High upside potential. Buy, renovate quickly, and resell.",
        });
        debug!("Mock reply for {} using {}", request.property.address, request.model);

        Ok(format!("```json\n{:#}\n```", reply))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
