use std::time::Duration;

use reqwest::Client;

use super::error::GeminiError;
use super::types::{GenerateContentRequest, GenerateContentResponse};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Seam for mocking the generation call in tests.
pub trait GenerateContent {
    async fn generate_content(
        &self,
        model: &str,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError>;
}

pub struct GeminiClient {
    api_key: String,
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, API_BASE_URL.to_string())
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to build HTTP client");
        Self {
            api_key,
            client,
            base_url,
        }
    }
}

impl GenerateContent for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(req)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000)
                .unwrap_or(1000);
            return Err(GeminiError::RateLimited {
                retry_after_ms: retry_after,
            });
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<GenerateContentResponse>().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::types::{Content, Part};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline_data("image/jpeg", "aGVsbG8="),
                    Part::text("brighten the shadows"),
                ],
            }],
        }
    }

    #[tokio::test]
    async fn generate_content_parses_success() {
        let server = MockServer::start().await;
        let body = r#"{
            "candidates": [{
                "content": {"parts": [{"inlineData": {"mimeType": "image/png", "data": "cG5n"}}]},
                "finishReason": "STOP"
            }]
        }"#;
        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "key-123"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("key-123".into(), server.uri());
        let resp = client
            .generate_content("gemini-test", &sample_request())
            .await
            .unwrap();

        assert_eq!(resp.parts().len(), 1);
        assert_eq!(
            resp.parts()[0].inline_data.as_ref().unwrap().data,
            "cG5n"
        );
    }

    #[tokio::test]
    async fn rate_limit_maps_to_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("key".into(), server.uri());
        let err = client
            .generate_content("gemini-test", &sample_request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GeminiError::RateLimited {
                retry_after_ms: 7000
            }
        ));
    }

    #[tokio::test]
    async fn rate_limit_without_header_defaults_to_one_second() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("key".into(), server.uri());
        let err = client
            .generate_content("gemini-test", &sample_request())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GeminiError::RateLimited {
                retry_after_ms: 1000
            }
        ));
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal failure"))
            .mount(&server)
            .await;

        let client = GeminiClient::with_base_url("key".into(), server.uri());
        let err = client
            .generate_content("gemini-test", &sample_request())
            .await
            .unwrap_err();

        match err {
            GeminiError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal failure");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }
}
