// Gemini generateContent client
//
// POST {api_base}/v1beta/models/{model}:generateContent
// Key travels in the `x-goog-api-key` header. JSON mode sets
// `generationConfig.responseMimeType`.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{AiError, GenerateRequest, ResponseFormat, TextGenerator};

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_base: &str, api_key: String) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AiError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: api_base.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_request(&self, request: &GenerateRequest) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );

        let mut body = json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }],
        });
        if request.format == ResponseFormat::Json {
            body["generationConfig"] = json!({ "responseMimeType": "application/json" });
        }

        self.client
            .post(&url)
            .timeout(request.timeout)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
    }

    async fn parse_response(response: reqwest::Response) -> Result<String, AiError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::Parse(format!("Failed to parse response: {}", e)))?;

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AiError::Parse("response had no candidates".to_string()))?;

        Ok(candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError> {
        let response = self.build_request(request).send().await.map_err(|e| {
            if e.is_timeout() {
                AiError::Timeout(request.timeout)
            } else {
                AiError::Request(e.to_string())
            }
        })?;

        Self::parse_response(response).await
    }
}
