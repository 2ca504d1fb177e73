use std::time::Duration;

use crate::api::middleware::error::{ApiError, ApiResult};

const SYSTEM_PROMPT: &str = "You are a helpful AI assistant for a food tracker application. \
Users track food items with expiry dates, add reviews for food items, like food items, and \
get notifications for expiring foods. Answer questions about food tracking and expiry \
management, food storage best practices, reducing food waste, nutrition, recipe suggestions \
based on available ingredients, and food safety guidelines. Be polite, helpful, and give \
practical advice. If users ask about non-food topics, gently steer them back to food-related \
questions.";

/// Proxies chat messages to an OpenAI-compatible chat-completions API
#[derive(Clone)]
pub struct ChatService {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl ChatService {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            api_base,
            model,
        }
    }

    pub async fn ask(&self, message: &str) -> ApiResult<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": message }
            ],
            "temperature": 0.7,
            "max_tokens": 500
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Internal(format!("Assistant request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::Internal(format!(
                "Assistant returned status {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Internal(format!("Invalid assistant response: {}", e)))?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ApiError::Internal("Assistant response missing content".to_string()))
    }
}
