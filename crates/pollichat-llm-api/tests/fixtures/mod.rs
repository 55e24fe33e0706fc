#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock server utilities for testing the text API client
pub struct TextApiMockServer {
    server: MockServer,
}

impl TextApiMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Mock a successful event stream made of the given `data:` payloads
    pub async fn mock_chat_stream(&self, payloads: &[&str]) {
        let body: String = payloads.iter().map(|p| format!("data: {}\n", p)).collect();

        Mock::given(method("POST"))
            .and(path("/openai"))
            .and(header("accept", "text/event-stream"))
            .and(header("content-type", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(body),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock an error status on the chat endpoint
    pub async fn mock_chat_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/openai"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": "Internal server error"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock the model catalog
    pub async fn mock_models(&self, models: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(models))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_models_raw(&self, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body.to_string()))
            .mount(&self.server)
            .await;
    }

    /// Mock the image endpoint for any prompt
    pub async fn mock_image(&self, bytes: Vec<u8>) {
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(bytes),
            )
            .mount(&self.server)
            .await;
    }
}

/// Sample catalog covering every group
pub fn sample_catalog() -> serde_json::Value {
    json!([
        {
            "name": "openai",
            "description": "OpenAI GPT-4o mini",
            "provider": "Azure",
            "input_modalities": ["text", "image"],
            "vision": true
        },
        {
            "name": "qwen-coder",
            "description": "Qwen 2.5 Coder 32B",
            "provider": "Scaleway",
            "input_modalities": ["text"]
        },
        {
            "name": "deepseek-reasoner",
            "description": "DeepSeek R1",
            "provider": "DeepSeek",
            "reasoning": true,
            "input_modalities": ["text"]
        },
        {
            "name": "mistral",
            "description": "Mistral Small",
            "provider": "Scaleway",
            "input_modalities": ["text"]
        }
    ])
}
