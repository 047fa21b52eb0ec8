use base64::{Engine as _, engine::general_purpose};
use bon::bon;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error (status {status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

pub type VisionResult<T> = Result<T, VisionError>;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Message {
    pub role: String,
    pub content: MessageContent,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<MessagePart>),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum MessagePart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    temperature: f32,
    top_p: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint, as served
/// by llama.cpp or Ollama. Images go along as base64 data URLs.
#[derive(Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
    top_p: f32,
}

#[bon]
impl VisionClient {
    #[builder(start_fn = with_base_url)]
    #[must_use]
    pub fn new(
        #[builder(start_fn)] base_url: &str,
        model: Option<String>,
        temperature: Option<f32>,
        top_p: Option<f32>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_default(),
            temperature: temperature.unwrap_or(0.25),
            top_p: top_p.unwrap_or(0.9),
        }
    }

    pub async fn prepare_message(&self, prompt: &str, images: &[&Path]) -> VisionResult<Message> {
        let mut parts = vec![MessagePart::Text {
            text: prompt.to_string(),
        }];
        for path in images {
            let bytes = fs::read(path).await?;
            let mime_type = infer::get(&bytes).map_or("image/jpeg", |kind| kind.mime_type());
            let b64 = general_purpose::STANDARD.encode(&bytes);
            parts.push(MessagePart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{mime_type};base64,{b64}"),
                },
            });
        }
        Ok(Message {
            role: "user".to_string(),
            content: MessageContent::Parts(parts),
        })
    }

    #[builder]
    pub async fn chat(
        &self,
        #[builder(start_fn)] prompt: &str,
        system: Option<&str>,
        images: Option<&[&Path]>,
        /// Overrides the client temperature for this call only.
        temperature: Option<f32>,
    ) -> VisionResult<String> {
        let mut messages = Vec::new();
        if let Some(system) = system {
            messages.push(Message {
                role: "system".to_string(),
                content: MessageContent::Text(system.to_string()),
            });
        }
        messages.push(
            self.prepare_message(prompt, images.unwrap_or_default())
                .await?,
        );
        self.call_with(messages, temperature.unwrap_or(self.temperature))
            .await
    }

    pub async fn call(&self, messages: Vec<Message>) -> VisionResult<String> {
        self.call_with(messages, self.temperature).await
    }

    async fn call_with(&self, messages: Vec<Message>, temperature: f32) -> VisionResult<String> {
        let req_body = ChatRequest {
            model: self.model.clone(),
            messages,
            stream: false,
            temperature,
            top_p: self.top_p,
        };
        let url = format!("{}/v1/chat/completions", self.base_url);
        let response = self.http.post(url).json(&req_body).send().await?;
        if !response.status().is_success() {
            return Err(VisionError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let full: ChatResponse = response.json().await?;
        Ok(full
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default())
    }
}
