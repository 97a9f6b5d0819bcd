//! `gameplan-agent` — LLM client for game-plan generation.
//!
//! Talks to any OpenAI-compatible chat completions endpoint and parses the
//! model's output defensively: structured payloads deserialize into typed
//! values when possible, and fall back to the raw text when not, so a bad
//! model response never becomes a hard failure for the caller.

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;


pub use client::ChatClient;
pub use error::AgentError;
pub use prompt::{game_plan_messages, scouting_analysis_messages, ScoutingBrief};
pub use types::{
    parse_model_json, ChatMessage, ChatRequest, ChatResponse, GamePlan, Parsed, ScoutingAnalysis,
};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, AgentError>;
