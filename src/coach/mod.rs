//! Conversation coaching pipeline
//!
//! Everything between the HTTP surface and the completion provider:
//! rule-based utterance filtering, emotion classification, in-character
//! reply generation, coaching feedback, end-of-session impression
//! summarization, and the orchestrator that sequences them per message.

pub mod emotion;
pub mod feedback;
pub mod filter;
pub mod impression;
pub mod orchestrator;
pub mod reply;

pub use emotion::{EmotionClassifier, EmotionLabel};
pub use feedback::FeedbackGenerator;
pub use impression::{ImpressionResult, ImpressionSummarizer, Tier};
pub use orchestrator::{TurnOrchestrator, TurnOutcome};
pub use reply::ReplyGenerator;
