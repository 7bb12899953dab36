//! In-character reply generation
//!
//! Builds a persona-constrained prompt from the current utterance and
//! the last few turns of history, calls the provider once, and strips
//! formatting artifacts from the reply. A call failure yields a fixed
//! short in-character filler; the error never propagates.

use crate::error::Result;
use crate::prompts::generate_persona_prompt;
use crate::providers::CompletionProvider;
use crate::session::{Role, Turn};
use std::sync::Arc;

/// Fixed in-character filler returned when the provider call fails
const REPLY_FILLER: &str = "えーっと、ちょっと考えちゃった〜💦";

/// Character reply generator
pub struct ReplyGenerator {
    provider: Arc<dyn CompletionProvider>,
    history_turns: usize,
}

impl ReplyGenerator {
    /// Creates a generator over the given provider
    ///
    /// # Arguments
    ///
    /// * `provider` - Completion provider
    /// * `history_turns` - Number of trailing turns included in the prompt
    pub fn new(provider: Arc<dyn CompletionProvider>, history_turns: usize) -> Self {
        Self {
            provider,
            history_turns,
        }
    }

    /// Generates the character's reply to the current utterance
    ///
    /// Never errors: any provider failure yields the fixed filler.
    pub async fn generate(&self, user_message: &str, history: &[Turn]) -> String {
        let history_text = format_history_window(history, self.history_turns);
        let prompt = generate_persona_prompt(&history_text, user_message);

        reply_from_completion(self.provider.complete(&prompt).await)
    }
}

/// Fallback policy for a reply call, as a pure function of the provider
/// result
fn reply_from_completion(result: Result<String>) -> String {
    match result {
        Ok(raw) => clean_reply(&raw),
        Err(e) => {
            tracing::warn!("Reply generation failed, using filler: {}", e);
            REPLY_FILLER.to_string()
        }
    }
}

/// Formats the last `turns` history entries as alternating お客様/みお
/// lines; voice turns inside the window are skipped, earlier turns are
/// dropped entirely
fn format_history_window(history: &[Turn], turns: usize) -> String {
    let start = history.len().saturating_sub(turns);
    let mut text = String::new();
    for turn in &history[start..] {
        match turn.role {
            Role::User => {
                text.push_str("お客様: ");
                text.push_str(&turn.content);
                text.push('\n');
            }
            Role::Bot => {
                text.push_str("みお: ");
                text.push_str(&turn.content);
                text.push('\n');
            }
            Role::Voice => {}
        }
    }
    text
}

/// Trims the raw reply and strips a leading name-prefix label
/// ("みお：" full-width or "みお:" half-width)
fn clean_reply(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix("みお：")
        .or_else(|| trimmed.strip_prefix("みお:"))
        .unwrap_or(trimmed);
    stripped.trim().to_string()
}
