// src/generation/models.rs
#![allow(dead_code)]
use serde::{Deserialize, Serialize};

/// Body of a non-streaming Ollama chat request.
/// Example: POST http://localhost:11434/api/chat
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// A single user turn carrying the whole prompt.
    pub fn user_prompt(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub model: Option<String>,
    pub message: Option<ReplyMessage>,
    #[serde(default)]
    pub done: bool,
    pub total_duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyMessage {
    pub role: String,
    pub content: String,
}

impl ChatResponse {
    pub fn content(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.content.as_str())
    }
}
