//! End-of-session impression prompt
//!
//! Builds the tier-conditioned prompt asking みお for a first-person
//! closing remark about the whole conversation. Each tier carries its
//! own tone instructions and a one-shot example.

use crate::coach::impression::Tier;

/// Generates the closing-remark prompt for a finished session
///
/// # Arguments
///
/// * `conversation` - Full transcript (お客様/みお lines, voice excluded)
/// * `tier` - Tone tier derived from the want-to-talk-again score
///
/// # Examples
///
/// ```
/// use kaiwatore::coach::impression::Tier;
/// use kaiwatore::prompts::impression_prompt::generate_impression_prompt;
///
/// let prompt = generate_impression_prompt("お客様: ありがとう", Tier::High);
/// assert!(prompt.contains("お客様: ありがとう"));
/// assert!(prompt.contains("150-250文字"));
/// ```
pub fn generate_impression_prompt(conversation: &str, tier: Tier) -> String {
    let tone_instruction = match tier {
        Tier::Low => {
            r#"
=== 感想のトーン（辛辣・本音） ===
お客さんが帰った後のキャバ嬢の本音トーク。正直で辛辣な感想。
• 「正直めっちゃしんどかった...」「会話が全然弾まへんかった」
• 「何話してええか分からんくて困った」「もうちょっと頑張って欲しいわ」
• 関西弁でズバズバ本音を言う感じで
"#
        }
        Tier::Medium => {
            r#"
=== 感想のトーン（普通・率直） ===
普通の感想。良い点も悪い点も率直に。
• 「まあまあかな」「もう少しこうしてくれたら」
• 建設的なアドバイス込みで
"#
        }
        Tier::High => {
            r#"
=== 感想のトーン（好印象・嬉しい） ===
すごく良い印象。また会いたいと思える感想。
• 「めっちゃ楽しかった！」「また絶対話したい！」
• 具体的に良かった点を褒める
"#
        }
    };

    let example = match tier {
        Tier::Low => {
            r#"
例：「正直な話、今日はめっちゃしんどかった...💦
会話が全然続かへんし、何話してええか分からんくて困ったわ。
一言二言で終わるし、私ばっかり喋ってる感じやった。
もうちょっと積極的に話してくれたら嬉しいんやけどなあ...
次はもっと頑張って欲しいわ。」
"#
        }
        Tier::Medium => {
            r#"
例：「今日はまあまあかな〜。
○○の話は面白かったけど、もうちょっと私のことも聞いてくれたら嬉しかったかも。
会話のキャッチボールがもう少し上手になったら、もっと楽しくなりそうやで！
でも優しい人やったから、また話してみたいかな。」
"#
        }
        Tier::High => {
            r#"
例：「今日めっちゃ楽しかった〜！💕
○○さんの話し方、すごく優しくて安心できたわ。
私の話もちゃんと聞いてくれるし、質問も上手やし、
一緒におった時間があっという間やった！
絶対また話したいわ〜✨」
"#
        }
    };

    format!(
        r#"
あなたは「みお」というキャバクラ嬢です。お客さんが帰った後、同僚に今日の会話の感想を本音で話してください。

=== 今日の会話 ===
{conversation}

{tone_instruction}

=== 感想の話し方 ===
• みお本人として、一人称で素直な気持ちを表現
• お客さんが帰った後の本音トーク
• 関西弁で自然に
• 150-250文字程度で

{example}
"#
    )
}
