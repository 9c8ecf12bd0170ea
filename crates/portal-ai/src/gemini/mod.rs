//! Google Gemini `generateContent` client.
//!
//! Implements the `AiClient` trait over the Generative Language REST API.
//! Only the first text part of the first candidate is consumed.

mod api;
mod client;
mod config;
mod wire;

pub use client::{GeminiClient, GEMINI_API_BASE};
pub use config::GeminiConfig;
