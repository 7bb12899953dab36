//! Per-message pipeline orchestration
//!
//! Drives one user message through the coach pipeline in a fixed
//! sequence: emotion classification, in-character reply, coaching
//! feedback. The three stages run sequentially against the history
//! snapshot taken before the message, then the user/bot/voice turns are
//! appended to the session in that order.

use crate::coach::emotion::{EmotionClassifier, EmotionLabel};
use crate::coach::feedback::FeedbackGenerator;
use crate::coach::reply::ReplyGenerator;
use crate::config::CoachConfig;
use crate::error::Result;
use crate::providers::CompletionProvider;
use crate::session::{SessionStore, Turn};
use std::sync::Arc;

/// Result of processing one user message
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// In-character reply shown to the user
    pub bot_reply: String,
    /// Coaching feedback; empty means unavailable, not "no violation"
    pub voice_feedback: String,
    /// Detected emotion for this utterance
    pub emotion: EmotionLabel,
}

/// Orchestrates the coach pipeline over a session store
pub struct TurnOrchestrator {
    store: SessionStore,
    classifier: EmotionClassifier,
    reply: ReplyGenerator,
    feedback: FeedbackGenerator,
}

impl TurnOrchestrator {
    /// Creates an orchestrator wiring all three stages to one provider
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        store: SessionStore,
        coach: &CoachConfig,
    ) -> Self {
        Self {
            store,
            classifier: EmotionClassifier::new(provider.clone()),
            reply: ReplyGenerator::new(provider.clone(), coach.reply_history_turns),
            feedback: FeedbackGenerator::new(
                provider,
                coach.feedback_user_turns,
                coach.feedback_max_chars,
            ),
        }
    }

    /// Processes one user message within a session
    ///
    /// The session's stored history is authoritative; each stage sees the
    /// history as it was before this message. Stage failures surface as
    /// each stage's fallback output, never as an error here.
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if the session id is unknown
    pub async fn process_message(
        &self,
        session_id: &str,
        user_message: &str,
    ) -> Result<TurnOutcome> {
        let history = self.store.history(session_id)?;

        let emotion = self.classifier.classify(user_message).await;
        let bot_reply = self.reply.generate(user_message, &history).await;
        let voice_feedback = self
            .feedback
            .generate(user_message, emotion, &history)
            .await;

        self.store.append(
            session_id,
            vec![
                Turn::user(user_message),
                Turn::bot(bot_reply.clone()),
                Turn::voice(voice_feedback.clone()),
            ],
        )?;

        tracing::info!(
            "Processed message in session {}: emotion={}",
            session_id,
            emotion
        );

        Ok(TurnOutcome {
            bot_reply,
            voice_feedback,
            emotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use crate::test_utils::{FailingProvider, ScriptedProvider};

    #[tokio::test]
    async fn test_unknown_session_is_rejected_before_any_stage() {
        // A failing provider proves no stage runs for an unknown session
        let orchestrator = TurnOrchestrator::new(
            Arc::new(FailingProvider),
            SessionStore::new(),
            &CoachConfig::default(),
        );
        assert!(orchestrator
            .process_message("missing", "こんにちは")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_happy_path_appends_three_turns() {
        let store = SessionStore::new();
        let session = store.create();

        // Stage order: emotion, reply, feedback
        let provider = Arc::new(ScriptedProvider::with_responses([
            "喜び",
            "みお：ほんまに？嬉しいわ〜！",
            "【みおの気持ち】\n喜んでるで。",
        ]));
        let orchestrator =
            TurnOrchestrator::new(provider, store.clone(), &CoachConfig::default());

        let outcome = orchestrator
            .process_message(&session.id, "昨日は映画を観てきたんですよ")
            .await
            .unwrap();

        assert_eq!(outcome.emotion, EmotionLabel::Joy);
        assert_eq!(outcome.bot_reply, "ほんまに？嬉しいわ〜！");
        assert!(outcome.voice_feedback.contains("みおの気持ち"));

        let history = store.history(&session.id).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].content, "昨日は映画を観てきたんですよ");
        assert_eq!(history[1].role, Role::Bot);
        assert_eq!(history[1].content, outcome.bot_reply);
        assert_eq!(history[2].role, Role::Voice);
        assert_eq!(history[2].content, outcome.voice_feedback);
    }

    #[tokio::test]
    async fn test_all_stages_degrade_on_provider_failure() {
        let store = SessionStore::new();
        let session = store.create();
        let orchestrator = TurnOrchestrator::new(
            Arc::new(FailingProvider),
            store.clone(),
            &CoachConfig::default(),
        );

        let outcome = orchestrator
            .process_message(&session.id, "昨日は映画を観てきたんですよ")
            .await
            .unwrap();

        assert_eq!(outcome.emotion, EmotionLabel::Neutral);
        assert_eq!(outcome.bot_reply, "えーっと、ちょっと考えちゃった〜💦");
        assert!(outcome.voice_feedback.is_empty());
        // Degraded turns are still recorded
        assert_eq!(store.history(&session.id).unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_rule_violation_skips_feedback_call() {
        let store = SessionStore::new();
        let session = store.create();

        // Only two responses queued: emotion and reply. The rule path
        // must not consume a third.
        let provider = Arc::new(ScriptedProvider::with_responses([
            "中立",
            "そうなんや〜もっと聞かせてや！",
        ]));
        let orchestrator =
            TurnOrchestrator::new(provider, store.clone(), &CoachConfig::default());

        let outcome = orchestrator
            .process_message(&session.id, "はい")
            .await
            .unwrap();

        assert!(outcome.voice_feedback.contains("もう少し詳しく"));
    }
}
