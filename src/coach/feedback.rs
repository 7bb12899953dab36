//! Coaching feedback generation ("voice")
//!
//! Runs the rule-based filter first; a hit returns its canned message
//! immediately with no provider call. Otherwise builds a coaching prompt
//! over the most recent conversational window and the detected emotion,
//! calls the provider once, and applies a section-preserving length cap.
//! A call failure yields an empty string, which callers must treat as
//! "feedback unavailable" rather than "no violation".

use crate::coach::emotion::EmotionLabel;
use crate::coach::filter;
use crate::error::Result;
use crate::prompts::generate_coaching_prompt;
use crate::providers::CompletionProvider;
use crate::session::{Role, Turn};
use std::sync::Arc;

/// Coaching feedback generator
pub struct FeedbackGenerator {
    provider: Arc<dyn CompletionProvider>,
    user_turn_window: usize,
    max_chars: usize,
}

impl FeedbackGenerator {
    /// Creates a generator over the given provider
    ///
    /// # Arguments
    ///
    /// * `provider` - Completion provider
    /// * `user_turn_window` - How many recent user turns bound the
    ///   conversational window in the prompt
    /// * `max_chars` - Hard cap on generated feedback length, in chars
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        user_turn_window: usize,
        max_chars: usize,
    ) -> Self {
        Self {
            provider,
            user_turn_window,
            max_chars,
        }
    }

    /// Generates coaching feedback for the current utterance
    ///
    /// Never errors: rule violations return their canned message without
    /// a provider call, and provider failures return an empty string.
    pub async fn generate(
        &self,
        user_message: &str,
        emotion: EmotionLabel,
        history: &[Turn],
    ) -> String {
        if let Some(canned) = filter::check(user_message) {
            tracing::debug!("Rule-based filter fired; skipping AI feedback");
            return canned.to_string();
        }

        let recent = extract_recent_conversation(history, self.user_turn_window);
        let prompt = generate_coaching_prompt(&recent, user_message, emotion.as_str());

        feedback_from_completion(self.provider.complete(&prompt).await, self.max_chars)
    }
}

/// Fallback policy for a feedback call, as a pure function of the
/// provider result
fn feedback_from_completion(result: Result<String>, max_chars: usize) -> String {
    match result {
        Ok(raw) => cap_feedback(raw.trim(), max_chars),
        Err(e) => {
            tracing::warn!("AI feedback generation failed, returning empty: {}", e);
            String::new()
        }
    }
}

/// Extracts the most recent conversational window
///
/// Walks history in reverse keeping user/bot turns, stopping once
/// `user_turns` user turns have been collected, then restores
/// chronological order and formats あなた/みお lines.
fn extract_recent_conversation(history: &[Turn], user_turns: usize) -> String {
    let mut recent: Vec<&Turn> = Vec::new();
    let mut seen_user_turns = 0;

    for turn in history.iter().rev() {
        if turn.role == Role::User {
            seen_user_turns += 1;
            if seen_user_turns > user_turns {
                break;
            }
        }
        if matches!(turn.role, Role::User | Role::Bot) {
            recent.push(turn);
        }
    }

    recent.reverse();

    let mut text = String::new();
    for turn in recent {
        match turn.role {
            Role::User => {
                text.push_str("あなた: ");
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
    text.trim().to_string()
}

/// Applies the section-preserving length cap
///
/// Output over the cap is split on blank-line boundaries; if at least
/// four sections resulted only the first four are kept, otherwise the
/// text is hard-truncated three characters short of the cap with an
/// ellipsis marker. Counts are Unicode scalar counts, not bytes.
fn cap_feedback(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let sections: Vec<&str> = text.split("\n\n").collect();
    if sections.len() >= 4 {
        sections[..4].join("\n\n")
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FailingProvider, ScriptedProvider};

    fn exchange(i: usize) -> [Turn; 3] {
        [
            Turn::user(format!("user {}", i)),
            Turn::bot(format!("bot {}", i)),
            Turn::voice(format!("voice {}", i)),
        ]
    }

    #[test]
    fn test_window_bounds_to_three_user_turns() {
        let mut history = Vec::new();
        for i in 0..6 {
            history.extend(exchange(i));
        }

        let text = extract_recent_conversation(&history, 3);
        assert!(!text.contains("user 2"));
        assert!(text.contains("user 3"));
        assert!(text.contains("user 5"));
        assert!(text.contains("みお: bot 5"));
        assert!(!text.contains("voice"));
    }

    #[test]
    fn test_window_restores_chronological_order() {
        let history = vec![
            Turn::user("一番目"),
            Turn::bot("返し"),
            Turn::user("二番目"),
        ];
        let text = extract_recent_conversation(&history, 3);
        let first = text.find("一番目").unwrap();
        let second = text.find("二番目").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_window_empty_history() {
        assert_eq!(extract_recent_conversation(&[], 3), "");
    }

    #[test]
    fn test_cap_short_text_untouched() {
        assert_eq!(cap_feedback("短いフィードバック", 400), "短いフィードバック");
    }

    #[test]
    fn test_cap_keeps_first_four_sections() {
        let section = "あ".repeat(120);
        let text = vec![section.clone(); 5].join("\n\n");
        assert!(text.chars().count() > 400);

        let capped = cap_feedback(&text, 400);
        assert_eq!(capped.split("\n\n").count(), 4);
        assert_eq!(capped, vec![section; 4].join("\n\n"));
    }

    #[test]
    fn test_cap_hard_truncates_without_sections() {
        let text = "あ".repeat(500);
        let capped = cap_feedback(&text, 400);
        assert_eq!(capped.chars().count(), 400);
        assert!(capped.ends_with("..."));
    }

    #[tokio::test]
    async fn test_rule_violation_short_circuits_provider() {
        // A failing provider proves no call is made on the rule path
        let generator = FeedbackGenerator::new(Arc::new(FailingProvider), 3, 400);
        let feedback = generator.generate("はい", EmotionLabel::Neutral, &[]).await;
        assert!(feedback.contains("もう少し詳しく話してくれたら"));
    }

    #[tokio::test]
    async fn test_ai_feedback_path() {
        let provider = Arc::new(ScriptedProvider::with_responses([
            "【みおの気持ち】\n嬉しそうやで。\n\n【良かった点】\n共感できてた。\n\n【気になった点】\n特になし。\n\n【アドバイス】\nこの調子で。",
        ]));
        let generator = FeedbackGenerator::new(provider, 3, 400);
        let feedback = generator
            .generate("昨日は映画を観てきたんですよ", EmotionLabel::Joy, &[])
            .await;
        assert!(feedback.contains("【アドバイス】"));
    }

    #[tokio::test]
    async fn test_provider_failure_returns_empty() {
        let generator = FeedbackGenerator::new(Arc::new(FailingProvider), 3, 400);
        let feedback = generator
            .generate("昨日は映画を観てきたんですよ", EmotionLabel::Joy, &[])
            .await;
        assert!(feedback.is_empty());
    }

    #[tokio::test]
    async fn test_long_ai_feedback_is_capped() {
        let long = "あ".repeat(450);
        let provider = Arc::new(ScriptedProvider::with_responses([long]));
        let generator = FeedbackGenerator::new(provider, 3, 400);
        let feedback = generator
            .generate("昨日は映画を観てきたんですよ", EmotionLabel::Joy, &[])
            .await;
        assert_eq!(feedback.chars().count(), 400);
        assert!(feedback.ends_with("..."));
    }
}
