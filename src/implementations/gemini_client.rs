use async_trait::async_trait;
use log::{ debug, info, warn };
use serde::{ Deserialize, Serialize };

use crate::errors::{ FlipperError, FlipperResult };
use crate::implementations::config::GeminiConfig;
use crate::traits::text_generator::{ GenerationRequest, TextGenerator };

/// Gemini `generateContent` request and response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Live text generator backed by the Gemini API.
///
/// # API Keys
/// The credential comes from `api_key` in the configuration or from the
/// `GEMINI_API_KEY` / `GOOGLE_API_KEY` environment variables. Without one,
/// every request fails with a configuration error before touching the network.
#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> FlipperResult<Self> {
        let http_client = reqwest::Client
            ::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FlipperError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http_client })
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.config.endpoint().trim_end_matches('/'), model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: GenerationRequest<'_>) -> FlipperResult<String> {
        let api_key = self.config.get_api_key().map_err(|e| {
            warn!("API key error: {}", e);
            FlipperError::from(e)
        })?;

        let url = self.url_for(request.model.api_name());
        let body = GenerateContentRequest {
            contents: vec![Content { parts: vec![RequestPart { text: request.prompt }] }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        info!("Making Gemini API request with {}", request.model);
        debug!("API endpoint: {}", url);
        debug!("Prompt length: {} characters", request.prompt.len());

        let response = self.http_client
            .post(&url)
            .header("x-goog-api-key", &api_key)
            .json(&body)
            .send().await
            .map_err(|e| {
                if e.is_timeout() {
                    warn!("Request timed out");
                    return FlipperError::Service(
                        format!("Gemini API did not answer within {:?}", self.config.timeout())
                    );
                }
                if e.is_connect() {
                    warn!("Connection error - check network connectivity");
                }
                FlipperError::Service(format!("Network error when calling Gemini API: {}", e))
            })?;

        let status = response.status();
        let response_text = response
            .text().await
            .map_err(|e| FlipperError::Service(format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            warn!("API error: HTTP {} - {}", status.as_u16(), response_text);
            return Err(FlipperError::Service(service_error_message(status.as_u16(), &response_text)));
        }

        info!("Successfully received response from Gemini API");
        let envelope: GenerateContentResponse = serde_json
            ::from_str(&response_text)
            .map_err(|e| FlipperError::Service(format!("Unreadable Gemini response: {}", e)))?;

        extract_candidate_text(&envelope)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Prefer the service's own `error.message`, else a generic status line
pub fn service_error_message(status: u16, body: &str) -> String {
    serde_json
        ::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Gemini API request failed with status {}", status))
}

/// Pull `candidates[0].content.parts[0].text` out of a response envelope
pub fn extract_candidate_text(envelope: &GenerateContentResponse) -> FlipperResult<String> {
    let candidate = envelope.candidates.first().ok_or_else(|| {
        let reason = envelope.prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref());
        match reason {
            Some(reason) => FlipperError::Service(format!("Prompt was blocked: {}", reason)),
            None => FlipperError::Service("Gemini returned no candidates".to_string()),
        }
    })?;

    candidate.content
        .as_ref()
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .ok_or_else(|| {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            FlipperError::Service(format!("Gemini returned no text (finish reason: {})", reason))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::ModelVariant;
    use crate::models::property::{ Condition, Property };

    fn envelope(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_first_part_of_first_candidate() {
        let env = envelope(
            r#"{"candidates":[{"content":{"parts":[{"text":"first"},{"text":"second"}]}},
                              {"content":{"parts":[{"text":"other"}]}}]}"#
        );
        assert_eq!(extract_candidate_text(&env).unwrap(), "first");
    }

    #[test]
    fn empty_or_blocked_envelopes_are_service_errors() {
        let blocked = envelope(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        match extract_candidate_text(&blocked) {
            Err(FlipperError::Service(msg)) => assert!(msg.contains("SAFETY")),
            other => panic!("unexpected {:?}", other),
        }

        let no_parts = envelope(r#"{"candidates":[{"finishReason":"MAX_TOKENS","content":{"parts":[]}}]}"#);
        match extract_candidate_text(&no_parts) {
            Err(FlipperError::Service(msg)) => assert!(msg.contains("MAX_TOKENS")),
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(extract_candidate_text(&envelope("{}")), Err(FlipperError::Service(_))));
    }

    #[test]
    fn service_errors_prefer_provider_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(service_error_message(400, body), "API key not valid.");
        assert_eq!(
            service_error_message(503, "<html>down</html>"),
            "Gemini API request failed with status 503"
        );
    }

    #[test]
    fn request_body_matches_gemini_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content { parts: vec![RequestPart { text: "hi" }] }],
            generation_config: GenerationConfig { temperature: Some(0.5), max_output_tokens: None },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
        assert!(json["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[tokio::test]
    async fn missing_credential_fails_before_network() {
        // Unroutable endpoint: reaching the network would surface a service error instead
        let config = GeminiConfig {
            api_key: Some("   ".to_string()),
            api_endpoint: Some("http://127.0.0.1:9".to_string()),
            ..Default::default()
        };
        let client = GeminiClient::new(config).unwrap();
        if crate::implementations::config::API_KEY_ENV_VARS
            .iter()
            .any(|var| std::env::var(var).map(|v| !v.trim().is_empty()).unwrap_or(false))
        {
            return;
        }

        let property = Property {
            id: uuid::Uuid::new_v4(),
            address: "1 Test Way".to_string(),
            purchase_price: 1,
            square_feet: 1,
            bedrooms: 3,
            bathrooms: 2,
            condition: Condition::Average,
            market_description: String::new(),
        };
        let result = client.generate(GenerationRequest {
            model: &ModelVariant::Flash25,
            prompt: "hello",
            property: &property,
        }).await;
        assert!(matches!(result, Err(FlipperError::Configuration(_))));
    }
}
