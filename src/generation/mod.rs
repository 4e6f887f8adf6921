// src/generation/mod.rs
pub mod client;
pub mod models;
pub mod prompts;

#[allow(unused_imports)]
pub use client::{OllamaClient, TextGenerator};
#[allow(unused_imports)]
pub use prompts::{PromptTemplate, PART_ONE, PART_TWO};
