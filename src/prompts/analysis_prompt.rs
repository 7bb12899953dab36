//! Emotion classification prompt
//!
//! Constrains the model to output exactly one label from the fixed
//! ten-label set. The classifier parses the output defensively and
//! coerces anything else to 中立.

/// Generates the classification prompt for a single user utterance
///
/// # Arguments
///
/// * `user_message` - The latest user utterance (history is not used)
///
/// # Examples
///
/// ```
/// use kaiwatore::prompts::analysis_prompt::generate_analysis_prompt;
///
/// let prompt = generate_analysis_prompt("今日は楽しかった！");
/// assert!(prompt.contains("喜び"));
/// assert!(prompt.contains("今日は楽しかった！"));
/// ```
pub fn generate_analysis_prompt(user_message: &str) -> String {
    format!(
        r#"
あなたは会話分析AIです。次のユーザー発言の主な感情を1つだけ分類してください。

選択肢：喜び、安心、期待、不安、困惑、悲しみ、怒り、焦り、落ち込み、中立

ユーザー発言: {user_message}

感情名のみ出力してください（例：喜び）。余計な説明は不要です。
"#
    )
}
