use serde::{ Deserialize, Serialize };
use std::collections::HashMap;
use thiserror::Error;

use crate::errors::FlipperError;

/// Name of the prompt template used for flip analysis
pub const FLIP_ANALYSIS_TEMPLATE: &str = "flip_analysis";

/// Environment variables checked for the Gemini credential, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required API key: {0}")]
    MissingApiKey(String),
}

impl From<ConfigError> for FlipperError {
    fn from(err: ConfigError) -> Self {
        FlipperError::Configuration(err.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key for the Gemini service; prefer the environment
    pub api_key: Option<String>,

    /// Base URL; the model name and `:generateContent` are appended
    pub api_endpoint: Option<String>,

    /// Temperature for generation (0.0-2.0)
    pub temperature: Option<f32>,

    /// Maximum tokens in the reply
    pub max_output_tokens: Option<u32>,

    /// Upper bound on one request, in seconds
    pub timeout_secs: Option<u64>,

    /// Prompt templates keyed by name, `{{placeholder}}` syntax
    pub prompt_templates: HashMap<String, String>,
}

impl GeminiConfig {
    /// Get the API key, checking environment variables if not in config
    pub fn get_api_key(&self) -> Result<String, ConfigError> {
        use log::debug;

        if let Some(api_key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            debug!("Using API key from config");
            return Ok(api_key.clone());
        }

        for env_var in API_KEY_ENV_VARS {
            match std::env::var(env_var) {
                Ok(key) if !key.trim().is_empty() => {
                    debug!("Using API key from {}", env_var);
                    return Ok(key);
                }
                _ => debug!("{} not set", env_var),
            }
        }

        Err(
            ConfigError::MissingApiKey(
                format!("set {} in the environment or api_key in the config file", API_KEY_ENV_VARS[0])
            )
        )
    }

    pub fn endpoint(&self) -> &str {
        self.api_endpoint
            .as_deref()
            .unwrap_or("https://generativelanguage.googleapis.com/v1beta/models")
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.unwrap_or(60))
    }

    /// Get the template for a specific task, falling back to the built-in one
    pub fn get_template(&self, template_name: &str) -> Option<String> {
        self.prompt_templates
            .get(template_name)
            .cloned()
            .or_else(|| {
                (template_name == FLIP_ANALYSIS_TEMPLATE).then(|| DEFAULT_FLIP_TEMPLATE.to_string())
            })
    }
}

/// Default configuration
impl Default for GeminiConfig {
    fn default() -> Self {
        let mut prompt_templates = HashMap::new();
        prompt_templates.insert(FLIP_ANALYSIS_TEMPLATE.to_string(), DEFAULT_FLIP_TEMPLATE.to_string());

        GeminiConfig {
            api_key: None,
            api_endpoint: None,
            temperature: Some(0.7),
            max_output_tokens: Some(2048),
            timeout_secs: Some(60),
            prompt_templates,
        }
    }
}

/// Field names here must stay in step with `ModelAssessment`
const DEFAULT_FLIP_TEMPLATE: &str =
    r#"You are an expert real estate investment analyst specialising in fix-and-flip deals.

Analyse the following property as a flip opportunity:

Address: {{address}}
Purchase Price: ${{purchase_price}}
Square Feet: {{square_feet}}
Bedrooms: {{bedrooms}}
Bathrooms: {{bathrooms}}
Condition: {{condition}}
Market Description: {{market_description}}

Respond ONLY with a JSON object containing exactly these fields:
{
  "predictedResaleValue": <number, expected resale price after renovation in dollars>,
  "estimatedRenovationCosts": <number, total renovation budget in dollars>,
  "marketAnalysis": "<string, local market conditions and comparable sales>",
  "renovationBreakdown": "<string, itemised renovation plan with costs>",
  "riskFactors": "<string, main risks to the deal>",
  "investmentRating": "<one of EXCELLENT, GOOD, MODERATE, POOR>",
  "recommendationSummary": "<string, overall recommendation>"
}

Use plain numbers without currency symbols or separators. Do not include any text outside the JSON object."#;
