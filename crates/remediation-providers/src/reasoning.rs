// crates/remediation-providers/src/reasoning.rs
// ============================================================================
// Module: Reasoning Clients
// Description: Chat-completion and text-generation model clients.
// Purpose: Build model requests and pull generated text out of responses.
// Dependencies: remediation-core, serde_json, crate::transport
// ============================================================================

//! ## Overview
//! Two response shapes are supported. Chat completion sends a `messages`
//! array and reads `choices[0].message.content`; it pairs with the free-text
//! prompt. Text generation sends `inputs` plus sampling `parameters` and
//! reads `generated_text`, `outputs`, or `choices[0].text`, including the
//! single-element array form some servers return; it pairs with the JSON
//! prompt. Both run over any [`InferenceTransport`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use remediation_core::ApiCredentials;
use remediation_core::PromptStyle;
use remediation_core::ReasoningClient;
use remediation_core::ReasoningError;
use serde_json::Value;
use serde_json::json;

use crate::transport::InferenceTransport;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Generation settings shared by both clients.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    /// Model identifier.
    pub model: String,
    /// Maximum generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "meta/llama-3.1-nemotron-70b-instruct".to_string(),
            max_tokens: 300,
            temperature: 0.1,
        }
    }
}

// ============================================================================
// SECTION: Chat Completion
// ============================================================================

/// Client for chat-completion endpoints.
pub struct ChatCompletionReasoner {
    /// Transport to the endpoint.
    transport: Arc<dyn InferenceTransport>,
    /// Generation settings.
    settings: GenerationSettings,
}

impl ChatCompletionReasoner {
    /// Creates a chat-completion client.
    #[must_use]
    pub fn new(transport: Arc<dyn InferenceTransport>, settings: GenerationSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Builds the request payload for a prompt.
    #[must_use]
    pub fn request(&self, prompt: &str) -> Value {
        json!({
            "model": self.settings.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
        })
    }
}

impl ReasoningClient for ChatCompletionReasoner {
    fn model(&self) -> &str {
        &self.settings.model
    }

    fn prompt_style(&self) -> PromptStyle {
        PromptStyle::FreeText
    }

    fn complete(
        &self,
        prompt: &str,
        credentials: Option<&ApiCredentials>,
    ) -> Result<String, ReasoningError> {
        let response = self.transport.post_json(&self.request(prompt), credentials)?;
        chat_completion_text(&response).ok_or_else(|| {
            ReasoningError::Invalid("missing choices[0].message.content".to_string())
        })
    }
}

/// Reads `choices[0].message.content`.
#[must_use]
pub fn chat_completion_text(response: &Value) -> Option<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

// ============================================================================
// SECTION: Text Generation
// ============================================================================

/// Client for raw text-generation endpoints.
pub struct TextGenerationReasoner {
    /// Transport to the endpoint.
    transport: Arc<dyn InferenceTransport>,
    /// Generation settings.
    settings: GenerationSettings,
}

impl TextGenerationReasoner {
    /// Nucleus sampling cutoff sent with every request.
    const TOP_P: f64 = 0.9;

    /// Creates a text-generation client.
    #[must_use]
    pub fn new(transport: Arc<dyn InferenceTransport>, settings: GenerationSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Builds the request payload for a prompt.
    #[must_use]
    pub fn request(&self, prompt: &str) -> Value {
        json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": self.settings.max_tokens,
                "temperature": self.settings.temperature,
                "do_sample": true,
                "top_p": Self::TOP_P,
            },
        })
    }
}

impl ReasoningClient for TextGenerationReasoner {
    fn model(&self) -> &str {
        &self.settings.model
    }

    fn prompt_style(&self) -> PromptStyle {
        PromptStyle::Json
    }

    fn complete(
        &self,
        prompt: &str,
        credentials: Option<&ApiCredentials>,
    ) -> Result<String, ReasoningError> {
        let response = self.transport.post_json(&self.request(prompt), credentials)?;
        generated_text(&response)
            .ok_or_else(|| ReasoningError::Invalid("missing generated text".to_string()))
    }
}

/// Reads generated text from the known response layouts.
#[must_use]
pub fn generated_text(response: &Value) -> Option<String> {
    if let Value::Array(items) = response {
        return items.first().and_then(generated_text);
    }
    if let Some(text) = response.get("generated_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    match response.get("outputs") {
        Some(Value::String(text)) => return Some(text.clone()),
        Some(Value::Array(outputs)) => {
            if let Some(text) = outputs.first().and_then(|first| {
                first.as_str().map(ToString::to_string).or_else(|| generated_text(first))
            }) {
                return Some(text);
            }
        }
        _ => {}
    }
    response.pointer("/choices/0/text").and_then(Value::as_str).map(ToString::to_string)
}
