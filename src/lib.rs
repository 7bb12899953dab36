//! Kaiwatore - conversational practice backend library
//!
//! This library provides the core functionality for the Kaiwatore
//! conversation trainer: the coach pipeline, provider abstractions,
//! session state, HTTP transport, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `coach`: Utterance filtering, emotion classification, reply and
//!   feedback generation, impression summarization, orchestration
//! - `providers`: Completion provider abstraction and implementations
//!   (Gemini, disabled)
//! - `session`: In-memory session store and turn history
//! - `server`: axum HTTP transport
//! - `prompts`: Prompt builder functions
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use kaiwatore::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     kaiwatore::server::run(config).await
//! }
//! ```

pub mod cli;
pub mod coach;
pub mod config;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod server;
pub mod session;

// Re-export commonly used types
pub use coach::{EmotionLabel, ImpressionResult, TurnOrchestrator, TurnOutcome};
pub use config::Config;
pub use error::{KaiwatoreError, Result};
pub use session::{Role, Session, SessionStore, Turn};

pub mod test_utils;
