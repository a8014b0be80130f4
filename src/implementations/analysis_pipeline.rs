use std::collections::HashMap;

use log::{ debug, info, warn };

use crate::errors::{ FlipperError, FlipperResult };
use crate::implementations::config::{ GeminiConfig, FLIP_ANALYSIS_TEMPLATE };
use crate::models::analysis::{ Analysis, ModelAssessment };
use crate::models::common::ModelVariant;
use crate::models::property::Property;
use crate::traits::text_generator::{ GenerationRequest, TextGenerator };

/// Turns a property into an `Analysis` by way of a text generator.
///
/// The analyzer holds no per-request state, so one instance can serve
/// concurrent requests for different properties.
pub struct FlipAnalyzer<G: TextGenerator> {
    generator: G,
    template: String,
}

impl<G: TextGenerator> FlipAnalyzer<G> {
    pub fn new(generator: G, config: &GeminiConfig) -> FlipperResult<Self> {
        let template = config
            .get_template(FLIP_ANALYSIS_TEMPLATE)
            .ok_or_else(||
                FlipperError::Configuration(
                    format!("Template not found: {}", FLIP_ANALYSIS_TEMPLATE)
                )
            )?;
        Ok(Self { generator, template })
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Run the whole pipeline for one property
    pub async fn analyze(&self, property: &Property, model: &ModelVariant) -> FlipperResult<Analysis> {
        info!("Analyzing {} with {} via {}", property.address, model, self.generator.name());

        let prompt = self.build_prompt(property);
        debug!("Prompt length: {} characters", prompt.len());

        let text = self.generator.generate(GenerationRequest {
            model,
            prompt: &prompt,
            property,
        }).await?;
        debug!("Response length: {} characters", text.len());

        let assessment = parse_assessment(&text)?;
        let analysis = Analysis::assemble(property.clone(), assessment, model.clone());

        info!(
            "Analysis complete for {}: rating {}, ROI {}",
            property.address,
            analysis.investment_rating,
            analysis.financials.roi
        );
        Ok(analysis)
    }

    /// Render the property into the analysis prompt
    pub fn build_prompt(&self, property: &Property) -> String {
        let mut params = HashMap::new();
        params.insert("address", property.address.clone());
        params.insert("purchase_price", property.purchase_price.to_string());
        params.insert("square_feet", property.square_feet.to_string());
        params.insert("bedrooms", property.bedrooms.to_string());
        params.insert("bathrooms", property.bathrooms.to_string());
        params.insert("condition", property.condition.to_string());
        params.insert("market_description", if property.market_description.is_empty() {
            "Not provided".to_string()
        } else {
            property.market_description.clone()
        });
        render_template(&self.template, &params)
    }
}

/// Replace every `{{key}}` in `template` with its value
fn render_template(template: &str, params: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

/// Remove a surrounding Markdown code fence such as ```` ```json ... ``` ````
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) up to the end of the opening line
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse the model's text reply into the assessment it was asked for
pub fn parse_assessment(text: &str) -> FlipperResult<ModelAssessment> {
    let payload = strip_code_fence(text);
    serde_json::from_str(payload).map_err(|e| {
        warn!("Model response is not the expected JSON: {}", e);
        FlipperError::Parse { message: e.to_string(), raw: text.to_string() }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::property::Condition;
    use uuid::Uuid;

    const PAYLOAD: &str =
        r#"{"predictedResaleValue": 400000, "estimatedRenovationCosts": 50000,
            "marketAnalysis": "Hot", "renovationBreakdown": "Kitchen",
            "riskFactors": "Rates", "investmentRating": "GOOD",
            "recommendationSummary": "Buy"}"#;

    #[test]
    fn fenced_payload_parses_like_bare_payload() {
        let bare = parse_assessment(PAYLOAD).unwrap();
        let fenced = parse_assessment(&format!("```json\n{}\n```", PAYLOAD)).unwrap();
        let plain_fence = parse_assessment(&format!("```\n{}\n```\n", PAYLOAD)).unwrap();
        assert_eq!(bare, fenced);
        assert_eq!(bare, plain_fence);
        assert_eq!(bare.investment_rating, "GOOD");
    }

    #[test]
    fn strips_single_line_fence() {
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn malformed_json_keeps_raw_text() {
        let raw = "```json\n{\"predictedResaleValue\": 1,\n```";
        match parse_assessment(raw) {
            Err(FlipperError::Parse { raw: kept, .. }) => assert_eq!(kept, raw),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn missing_numeric_field_is_a_parse_error() {
        let err = parse_assessment(r#"{"predictedResaleValue": 1}"#).unwrap_err();
        assert!(matches!(err, FlipperError::Parse { .. }));
    }

    #[test]
    fn prompt_renders_every_field() {
        struct Silent;
        #[async_trait::async_trait]
        impl TextGenerator for Silent {
            async fn generate(&self, _request: GenerationRequest<'_>) -> FlipperResult<String> {
                Ok(String::new())
            }
            fn name(&self) -> &str {
                "silent"
            }
        }

        let analyzer = FlipAnalyzer::new(Silent, &GeminiConfig::default()).unwrap();
        let property = Property {
            id: Uuid::new_v4(),
            address: "9 Birch Rd".to_string(),
            purchase_price: 185_000,
            square_feet: 1320,
            bedrooms: 4,
            bathrooms: 1,
            condition: Condition::Poor,
            market_description: String::new(),
        };
        let prompt = analyzer.build_prompt(&property);
        assert!(prompt.contains("Address: 9 Birch Rd"));
        assert!(prompt.contains("Purchase Price: $185000"));
        assert!(prompt.contains("Square Feet: 1320"));
        assert!(prompt.contains("Bedrooms: 4"));
        assert!(prompt.contains("Bathrooms: 1"));
        assert!(prompt.contains("Condition: poor"));
        assert!(prompt.contains("Market Description: Not provided"));
        assert!(!prompt.contains("{{"));
        for field in [
            "predictedResaleValue",
            "estimatedRenovationCosts",
            "marketAnalysis",
            "renovationBreakdown",
            "riskFactors",
            "investmentRating",
            "recommendationSummary",
        ] {
            assert!(prompt.contains(field), "prompt is missing {}", field);
        }
        assert_eq!(prompt, analyzer.build_prompt(&property));
    }
}
