//! End-of-session impression summarization
//!
//! Computes heuristic emotion scores and memorable-moment tags from the
//! full session history, derives a bounded want-to-talk-again score, and
//! asks the provider for a closing remark toned to the score tier. The
//! tier fallback string is pre-selected from a fixed pool before the
//! provider call so a failed or empty completion degrades to it
//! deterministically under a seeded RNG.

use crate::error::Result;
use crate::prompts::generate_impression_prompt;
use crate::providers::CompletionProvider;
use crate::session::{Role, SessionStore, Turn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Named emotion dimensions mapped to integer scores
pub type ScoreBundle = BTreeMap<String, i64>;

/// Positive words that raise the enjoyment score, once per containing turn
const POSITIVE_WORDS: &[&str] = &["楽しい", "嬉しい", "ありがとう", "素敵", "いいね"];

/// Gratitude/positivity words that tag a memorable moment
const KIND_WORDS: &[&str] = &["ありがとう", "嬉しい", "楽しい"];

/// Canned closing remarks for a low-scoring session
const LOW_FALLBACKS: [&str; 3] = [
    "正直な話、今日はちょっとしんどかった...💦 会話が続かへんし、何話してええか分からんくて困ったわ。もうちょっと積極的に話してくれたら嬉しいんやけどなあ。",
    "うーん、今日はあんまり盛り上がらんかったなあ。一言二言で終わるし、私ばっかり喋ってる感じやった。次はもっと頑張って欲しいわ。",
    "会話が全然弾まへんかった...何か緊張してるんかな？もう少しリラックスして話してくれたら、きっともっと楽しくなると思うで。",
];

/// Canned closing remarks for a middling session
const MEDIUM_FALLBACKS: [&str; 3] = [
    "今日はまあまあかな〜。話は聞いてくれるけど、もうちょっと私のことも聞いてくれたら嬉しかったかも。でも優しい人やったから、また話してみたいかな。",
    "悪くはなかったけど、会話のキャッチボールがもう少し上手になったら、もっと楽しくなりそうやで！でも真面目で誠実な感じが伝わってきたわ。",
    "普通って感じかな。緊張してるのは分かるけど、もう少し自然に話せるようになったら、きっともっと楽しい時間になるで〜。",
];

/// Canned closing remarks for a great session
const HIGH_FALLBACKS: [&str; 3] = [
    "今日めっちゃ楽しかった〜！💕 話し方すごく優しくて安心できたわ。私の話もちゃんと聞いてくれるし、質問も上手やし、一緒におった時間があっという間やった！",
    "すごく良い時間やった〜✨ 会話のテンポも良いし、ちゃんと私のことを気にかけてくれるのが嬉しかったわ。絶対また話したいわ！",
    "最高やった！😊 こんなに楽しく話せる人に会えるなんて思わんかったわ。優しいし面白いし、ずっと一緒におりたい気分になったで〜。",
];

/// Generic degraded impression text used when the pipeline itself fails
const GENERIC_FALLBACK_TEXT: &str =
    "今日はありがとうございました〜！エラーが発生しましたが、お疲れ様でした💦";

/// Tone tier derived from the want-to-talk-again score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Score 30 or below: blunt, disappointed
    Low,
    /// Score 31-70: even-handed
    Medium,
    /// Score above 70: warm, eager
    High,
}

impl Tier {
    /// Maps a want-to-talk-again score to its tier
    pub fn from_score(score: i64) -> Self {
        if score <= 30 {
            Tier::Low
        } else if score <= 70 {
            Tier::Medium
        } else {
            Tier::High
        }
    }

    /// The tier's fixed fallback pool
    fn fallbacks(&self) -> &'static [&'static str; 3] {
        match self {
            Tier::Low => &LOW_FALLBACKS,
            Tier::Medium => &MEDIUM_FALLBACKS,
            Tier::High => &HIGH_FALLBACKS,
        }
    }
}

/// End-of-session summary returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpressionResult {
    /// First-person closing remark from the character
    pub impression_text: String,
    /// Heuristic emotion scores
    pub emotion_scores: ScoreBundle,
    /// Up to three memorable-moment tags, in first-encountered order
    pub memorable_moments: Vec<String>,
    /// Bounded want-to-talk-again score, always in [10, 95]
    pub want_to_talk_again: i64,
}

impl ImpressionResult {
    /// The fixed generic result used when summarization itself fails
    ///
    /// No partial result is ever returned: any unexpected failure in the
    /// pipeline degrades to this whole.
    pub fn fallback() -> Self {
        let mut scores = ScoreBundle::new();
        scores.insert("楽しさ".to_string(), 50);
        scores.insert("安心感".to_string(), 50);
        Self {
            impression_text: GENERIC_FALLBACK_TEXT.to_string(),
            emotion_scores: scores,
            memorable_moments: vec!["会話練習お疲れ様でした".to_string()],
            want_to_talk_again: 50,
        }
    }
}

/// End-of-session impression summarizer
pub struct ImpressionSummarizer {
    provider: Arc<dyn CompletionProvider>,
    store: SessionStore,
    rng: Mutex<StdRng>,
}

impl ImpressionSummarizer {
    /// Creates a summarizer over the given provider and store
    ///
    /// # Arguments
    ///
    /// * `provider` - Completion provider for the closing remark
    /// * `store` - Session store to read full histories from
    /// * `rng_seed` - Optional seed pinning down fallback selection;
    ///   unseeded in production
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        store: SessionStore,
        rng_seed: Option<u64>,
    ) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            provider,
            store,
            rng: Mutex::new(rng),
        }
    }

    /// Summarizes a finished session by id
    ///
    /// # Errors
    ///
    /// Returns `SessionNotFound` if the session id is unknown. Every
    /// other failure degrades to a fallback result instead of erroring.
    pub async fn summarize(&self, session_id: &str) -> Result<ImpressionResult> {
        let history = self.store.history(session_id)?;
        tracing::debug!(
            "Summarizing session {}: {} turns",
            session_id,
            history.len()
        );
        Ok(self.summarize_history(&history).await)
    }

    /// Runs the scoring pipeline over a history snapshot
    async fn summarize_history(&self, history: &[Turn]) -> ImpressionResult {
        let emotion_scores = calculate_emotion_scores(history);
        let memorable_moments = extract_memorable_moments(history);
        let want_to_talk_again =
            calculate_want_to_talk_again(&emotion_scores, &memorable_moments, history);
        let tier = Tier::from_score(want_to_talk_again);

        // Pre-select the fallback before the provider call so a failed
        // completion degrades deterministically under a seeded RNG
        let fallback_text = match self.pick_fallback(tier) {
            Some(text) => text,
            None => {
                tracing::error!("Impression pipeline failed, returning generic fallback");
                return ImpressionResult::fallback();
            }
        };

        let transcript = build_transcript(history);
        let prompt = generate_impression_prompt(&transcript, tier);
        let impression_text = match self.provider.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!("Impression completion was empty, using tier fallback");
                fallback_text
            }
            Err(e) => {
                tracing::warn!("Impression completion failed, using tier fallback: {}", e);
                fallback_text
            }
        };

        ImpressionResult {
            impression_text,
            emotion_scores,
            memorable_moments,
            want_to_talk_again,
        }
    }

    /// Picks one canned remark from the tier pool; `None` on RNG failure
    fn pick_fallback(&self, tier: Tier) -> Option<String> {
        let pool = tier.fallbacks();
        let mut rng = self.rng.lock().ok()?;
        let index = rng.random_range(0..pool.len());
        Some(pool[index].to_string())
    }
}

/// Concatenates the full history into a transcript
///
/// Only user and bot lines are included; voice lines are excluded.
fn build_transcript(history: &[Turn]) -> String {
    let mut transcript = String::new();
    for turn in history {
        match turn.role {
            Role::User => {
                transcript.push_str("お客様: ");
                transcript.push_str(&turn.content);
                transcript.push('\n');
            }
            Role::Bot => {
                transcript.push_str("みお: ");
                transcript.push_str(&turn.content);
                transcript.push('\n');
            }
            Role::Voice => {}
        }
    }
    transcript.trim().to_string()
}

/// Computes heuristic emotion scores from the history
///
/// Starts from a fixed baseline; more than ten user turns raise
/// closeness, and every (user turn, positive word) containment match
/// raises enjoyment by 5 with only the 100 ceiling applied per addition.
/// The repeat-without-per-word-cap behavior is intentional.
fn calculate_emotion_scores(history: &[Turn]) -> ScoreBundle {
    let mut scores = ScoreBundle::new();
    scores.insert("楽しさ".to_string(), 70);
    scores.insert("安心感".to_string(), 75);
    scores.insert("興味深さ".to_string(), 65);
    scores.insert("親密度".to_string(), 60);

    let user_turns: Vec<&Turn> = history.iter().filter(|t| t.role == Role::User).collect();

    if user_turns.len() > 10 {
        if let Some(closeness) = scores.get_mut("親密度") {
            *closeness += 15;
        }
    }

    for turn in &user_turns {
        for word in POSITIVE_WORDS {
            if turn.content.contains(word) {
                if let Some(enjoyment) = scores.get_mut("楽しさ") {
                    *enjoyment = (*enjoyment + 5).min(100);
                }
            }
        }
    }

    scores
}

/// Scans user turns for memorable moments, keeping the first three
///
/// A single turn may contribute multiple tags; the truncation keeps the
/// first three encountered in chronological scan order, not a
/// highest-priority three.
fn extract_memorable_moments(history: &[Turn]) -> Vec<String> {
    let mut moments = Vec::new();

    for turn in history.iter().filter(|t| t.role == Role::User) {
        if turn.content.chars().count() > 50 {
            moments.push("たくさん話してくれた時".to_string());
        }
        if turn.content.contains('!') || turn.content.contains('！') {
            moments.push("熱く語ってくれた時".to_string());
        }
        if KIND_WORDS.iter().any(|word| turn.content.contains(word)) {
            moments.push("優しい言葉をかけてくれた時".to_string());
        }
    }

    moments.truncate(3);
    moments
}

/// Derives the bounded want-to-talk-again score
///
/// Base 50, adjusted by the emotion-score average, 8 points per retained
/// memorable moment, turn-count bonuses, and a total-length adjustment
/// applied only when the user actually spoke; clamped to [10, 95].
fn calculate_want_to_talk_again(
    emotion_scores: &ScoreBundle,
    memorable_moments: &[String],
    history: &[Turn],
) -> i64 {
    let mut score: i64 = 50;

    if !emotion_scores.is_empty() {
        let sum: i64 = emotion_scores.values().sum();
        let avg = sum as f64 / emotion_scores.len() as f64;
        // Truncation toward zero, matching the heuristic's worked examples
        score += ((avg - 65.0) * 0.5) as i64;
    }

    score += memorable_moments.len().min(3) as i64 * 8;

    let user_turns: Vec<&Turn> = history.iter().filter(|t| t.role == Role::User).collect();
    if user_turns.len() >= 5 {
        score += 5;
    }
    if user_turns.len() > 8 {
        score += 10;
    }

    if !user_turns.is_empty() {
        let total_length: usize = user_turns.iter().map(|t| t.content.chars().count()).sum();
        if total_length < 50 {
            score -= 20;
        } else if total_length > 200 {
            score += 10;
        }
    }

    score.clamp(10, 95)
}
