//! Prompt templates for the coach pipeline
//!
//! This module provides the prompt builders used by the coach components:
//! emotion classification, the persona-constrained character reply,
//! per-turn coaching feedback, and the tier-conditioned end-of-session
//! impression. All prompt text lives here so the components stay focused
//! on windowing, parsing, and fallback policy.

pub mod analysis_prompt;
pub mod coaching_prompt;
pub mod impression_prompt;
pub mod persona_prompt;

pub use analysis_prompt::generate_analysis_prompt;
pub use coaching_prompt::generate_coaching_prompt;
pub use impression_prompt::generate_impression_prompt;
pub use persona_prompt::generate_persona_prompt;
