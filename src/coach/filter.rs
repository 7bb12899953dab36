//! Rule-based utterance filter
//!
//! Pure string-matching checks over a single user utterance, evaluated
//! as an ordered chain where the first match wins. A hit returns a
//! canned coaching message and short-circuits the AI feedback path;
//! `None` means no violation (distinct from an empty string, which
//! callers use for "feedback unavailable").
//!
//! Matching is case-sensitive substring/suffix matching exactly as
//! listed; no stemming or normalization beyond whitespace trim.

/// Explicit/vulgar terms that trigger the inappropriate-content message
const INAPPROPRIATE_WORDS: &[&str] = &[
    "おしっこ",
    "うんち",
    "うんこ",
    "セックス",
    "エロ",
    "ちんちん",
    "おっぱい",
];

/// Minimal acknowledgement words that end a conversation dead
const SHORT_RESPONSES: &[&str] = &[
    "はい",
    "いいえ",
    "うん",
    "そう",
    "はーい",
    "おー",
    "へー",
    "ふーん",
    "どうも",
];

/// Dismissive/insulting phrases
const RUDE_PHRASES: &[&str] = &[
    "似合ってない",
    "ダメ",
    "つまらん",
    "面白くない",
    "やめて",
    "うざい",
    "きもい",
];

/// Imperative sentence endings
const COMMAND_ENDINGS: &[&str] = &["やめろ", "しろ", "するな", "やめときな", "だまれ"];

const INAPPROPRIATE_MESSAGE: &str = "その話はちょっと...みおちゃんも困っちゃうと思うから、もう少し普通の話題にしてくれる？お互い楽しく話せる内容の方がええで〜";

const SHORT_RESPONSE_MESSAGE: &str = "その返事やと、みおちゃんがもっと知りたがってるのに会話が終わっちゃうで。『〜なんですよ』とか『〜だったんです』みたいに、もう少し詳しく話してくれたら、みおちゃんも喜ぶと思うで！";

const RUDE_LANGUAGE_MESSAGE: &str = "その言い方やと、みおちゃんが傷ついちゃうかも...。相手の気持ちを考えて、『あまり好みじゃないです』とか優しい表現に変えてみて。そうすれば、みおちゃんも安心して話せるで";

const COMMAND_TONE_MESSAGE: &str = "命令口調やとみおちゃんが怖がっちゃうで...。『〜してもらえますか？』とか『〜していただけると嬉しいです』みたいにお願いする感じで言うと、みおちゃんも気持ちよく応えてくれるで〜";

/// Runs the ordered rule chain over one utterance
///
/// # Arguments
///
/// * `message` - The user utterance to check
///
/// # Returns
///
/// Returns the canned message of the first matching rule, or `None`
/// when no rule fires
///
/// # Examples
///
/// ```
/// use kaiwatore::coach::filter::check;
///
/// assert!(check("はい").is_some());
/// assert!(check("昨日は友達と映画を観に行きました").is_none());
/// ```
pub fn check(message: &str) -> Option<&'static str> {
    check_inappropriate_content(message)
        .or_else(|| check_short_response(message))
        .or_else(|| check_rude_language(message))
        .or_else(|| check_command_tone(message))
}

fn check_inappropriate_content(message: &str) -> Option<&'static str> {
    INAPPROPRIATE_WORDS
        .iter()
        .any(|word| message.contains(word))
        .then_some(INAPPROPRIATE_MESSAGE)
}

fn check_short_response(message: &str) -> Option<&'static str> {
    let trimmed = message.trim();
    (SHORT_RESPONSES.contains(&trimmed) || trimmed.chars().count() <= 3)
        .then_some(SHORT_RESPONSE_MESSAGE)
}

fn check_rude_language(message: &str) -> Option<&'static str> {
    RUDE_PHRASES
        .iter()
        .any(|phrase| message.contains(phrase))
        .then_some(RUDE_LANGUAGE_MESSAGE)
}

fn check_command_tone(message: &str) -> Option<&'static str> {
    COMMAND_ENDINGS
        .iter()
        .any(|ending| message.ends_with(ending))
        .then_some(COMMAND_TONE_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inappropriate_content_fires() {
        for word in INAPPROPRIATE_WORDS {
            let message = format!("ねえ、{}の話しようよ", word);
            assert_eq!(check(&message), Some(INAPPROPRIATE_MESSAGE));
        }
    }

    #[test]
    fn test_short_acknowledgement_word_fires() {
        assert_eq!(check("はい"), Some(SHORT_RESPONSE_MESSAGE));
        assert_eq!(check("  ふーん  "), Some(SHORT_RESPONSE_MESSAGE));
    }

    #[test]
    fn test_three_chars_or_fewer_fires() {
        // 3 chars, not in the acknowledgement list
        assert_eq!(check("えっと"), Some(SHORT_RESPONSE_MESSAGE));
        // 4 chars passes
        assert_eq!(check("なるほどね"), None);
    }

    #[test]
    fn test_char_count_is_not_byte_count() {
        // "うん" is 6 bytes but 2 chars; must fire on the char count
        assert_eq!(check("そか"), Some(SHORT_RESPONSE_MESSAGE));
    }

    #[test]
    fn test_rude_language_fires() {
        assert_eq!(
            check("その服、似合ってないと思う"),
            Some(RUDE_LANGUAGE_MESSAGE)
        );
        assert_eq!(check("この店つまらんなあ"), Some(RUDE_LANGUAGE_MESSAGE));
    }

    #[test]
    fn test_command_tone_requires_suffix() {
        assert_eq!(check("その話はもうやめろ"), Some(COMMAND_TONE_MESSAGE));
        // Ending mid-sentence does not fire the suffix rule
        assert_eq!(check("やめろとまでは言わないけどさ"), None);
    }

    #[test]
    fn test_rule_order_first_match_wins() {
        // Contains both an inappropriate word and a rude phrase; the
        // inappropriate check is evaluated first
        let message = "エロい話とかうざいからやめて";
        assert_eq!(check(message), Some(INAPPROPRIATE_MESSAGE));
    }

    #[test]
    fn test_clean_message_passes() {
        assert_eq!(check("昨日は友達とカフェに行って楽しかったです"), None);
    }
}
