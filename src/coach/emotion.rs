//! Emotion classification for user utterances
//!
//! Single-call wrapper around the completion provider: constrains the
//! model to a closed ten-label set and coerces anything else (including
//! any call failure) to 中立. Classification never raises outward; it
//! degrades silently with no retries.

use crate::error::Result;
use crate::prompts::generate_analysis_prompt;
use crate::providers::CompletionProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Closed set of emotion labels
///
/// Serialized as the Japanese label names the classifier prompt uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmotionLabel {
    #[serde(rename = "喜び")]
    Joy,
    #[serde(rename = "安心")]
    Relief,
    #[serde(rename = "期待")]
    Anticipation,
    #[serde(rename = "不安")]
    Anxiety,
    #[serde(rename = "困惑")]
    Confusion,
    #[serde(rename = "悲しみ")]
    Sadness,
    #[serde(rename = "怒り")]
    Anger,
    #[serde(rename = "焦り")]
    Impatience,
    #[serde(rename = "落ち込み")]
    Despondency,
    #[serde(rename = "中立")]
    Neutral,
}

impl EmotionLabel {
    /// All valid labels, in prompt order
    pub const ALL: [EmotionLabel; 10] = [
        EmotionLabel::Joy,
        EmotionLabel::Relief,
        EmotionLabel::Anticipation,
        EmotionLabel::Anxiety,
        EmotionLabel::Confusion,
        EmotionLabel::Sadness,
        EmotionLabel::Anger,
        EmotionLabel::Impatience,
        EmotionLabel::Despondency,
        EmotionLabel::Neutral,
    ];

    /// The Japanese label name
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Joy => "喜び",
            EmotionLabel::Relief => "安心",
            EmotionLabel::Anticipation => "期待",
            EmotionLabel::Anxiety => "不安",
            EmotionLabel::Confusion => "困惑",
            EmotionLabel::Sadness => "悲しみ",
            EmotionLabel::Anger => "怒り",
            EmotionLabel::Impatience => "焦り",
            EmotionLabel::Despondency => "落ち込み",
            EmotionLabel::Neutral => "中立",
        }
    }

    /// Parses raw model output into a label
    ///
    /// Strips whitespace and single/double quotes; anything that is not
    /// an exact match for one of the ten labels coerces to 中立.
    ///
    /// # Examples
    ///
    /// ```
    /// use kaiwatore::coach::emotion::EmotionLabel;
    ///
    /// assert_eq!(EmotionLabel::from_model_output("喜び"), EmotionLabel::Joy);
    /// assert_eq!(
    ///     EmotionLabel::from_model_output("ワクワク度MAX"),
    ///     EmotionLabel::Neutral
    /// );
    /// ```
    pub fn from_model_output(raw: &str) -> Self {
        let cleaned: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '"' && *c != '\'')
            .collect();
        let cleaned = cleaned.trim();

        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == cleaned)
            .unwrap_or(EmotionLabel::Neutral)
    }
}

impl std::fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fallback policy for a classification call, as a pure function of the
/// provider result
fn label_from_completion(result: Result<String>) -> EmotionLabel {
    match result {
        Ok(raw) => EmotionLabel::from_model_output(&raw),
        Err(e) => {
            tracing::warn!("Emotion classification failed, defaulting to 中立: {}", e);
            EmotionLabel::Neutral
        }
    }
}

/// Emotion classifier over a completion provider
pub struct EmotionClassifier {
    provider: Arc<dyn CompletionProvider>,
}

impl EmotionClassifier {
    /// Creates a classifier over the given provider
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Classifies the latest user utterance
    ///
    /// Only the utterance itself is considered; history is not used.
    /// Never errors: invalid output and call failures both yield 中立.
    pub async fn classify(&self, user_message: &str) -> EmotionLabel {
        let prompt = generate_analysis_prompt(user_message);
        let label = label_from_completion(self.provider.complete(&prompt).await);
        tracing::debug!("Detected emotion: {}", label);
        label
    }
}
