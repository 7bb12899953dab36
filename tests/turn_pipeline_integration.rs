use std::sync::Arc;

use kaiwatore::coach::{EmotionLabel, ImpressionSummarizer, TurnOrchestrator};
use kaiwatore::config::CoachConfig;
use kaiwatore::session::SessionStore;
use kaiwatore::test_utils::ScriptedProvider;

/// Full pipeline over one grateful, enthusiastic utterance: emotion
/// lands in the fixed label set, both texts are non-empty, and the
/// summary tags both the kind words and the exclamation
#[tokio::test]
async fn test_grateful_utterance_end_to_end() {
    let store = SessionStore::new();
    let session = store.create();

    let provider = Arc::new(ScriptedProvider::with_responses([
        // emotion, reply, feedback for the one message
        "喜び",
        "こちらこそありがとうな〜！また話そな💕",
        "【みおの気持ち】\nめっちゃ喜んでるで。\n\n【良かった点】\n感謝を言葉にできてた。\n\n【気になった点】\n特になし。\n\n【アドバイス】\nその調子でいこな。",
        // closing remark for end-session
        "今日はほんまに楽しかったわ〜！絶対また来てな！",
    ]));

    let orchestrator =
        TurnOrchestrator::new(provider.clone(), store.clone(), &CoachConfig::default());
    let outcome = orchestrator
        .process_message(&session.id, "ありがとう、楽しかったです！")
        .await
        .unwrap();

    assert!(EmotionLabel::ALL.contains(&outcome.emotion));
    assert!(!outcome.bot_reply.is_empty());
    assert!(!outcome.voice_feedback.is_empty());

    let summarizer = ImpressionSummarizer::new(provider, store, Some(9));
    let result = summarizer.summarize(&session.id).await.unwrap();

    assert!((10..=95).contains(&result.want_to_talk_again));
    assert!(result
        .memorable_moments
        .contains(&"優しい言葉をかけてくれた時".to_string()));
    assert!(result
        .memorable_moments
        .contains(&"熱く語ってくれた時".to_string()));
}

/// Multi-message session: a rule violation mid-session skips the AI
/// feedback call but still records its three turns, and the closing
/// summary sees the whole history
#[tokio::test]
async fn test_mixed_session_history_and_summary() {
    let store = SessionStore::new();
    let session = store.create();

    let provider = Arc::new(ScriptedProvider::with_responses([
        // message 1: full provider path
        "期待",
        "へえ、釣りかあ！ええ趣味やん！",
        "【みおの気持ち】\n興味津々やで。",
        // message 2 ("はい"): emotion and reply only, feedback is canned
        "中立",
        "そうなんや〜",
        // message 3: full provider path
        "喜び",
        "ほんまに？また聞かせてな！",
        "【みおの気持ち】\n喜んでるで。",
        // closing remark
        "今日もおおきに〜！",
    ]));

    let orchestrator =
        TurnOrchestrator::new(provider.clone(), store.clone(), &CoachConfig::default());

    orchestrator
        .process_message(&session.id, "週末はよく釣りに行くんですよ")
        .await
        .unwrap();
    let short = orchestrator
        .process_message(&session.id, "はい")
        .await
        .unwrap();
    orchestrator
        .process_message(&session.id, "今度ぜひ写真を見せたいです、楽しいですよ")
        .await
        .unwrap();

    assert!(short.voice_feedback.contains("もう少し詳しく"));

    let history = store.history(&session.id).unwrap();
    assert_eq!(history.len(), 9);

    let summarizer = ImpressionSummarizer::new(provider, store, Some(9));
    let result = summarizer.summarize(&session.id).await.unwrap();
    assert_eq!(result.impression_text, "今日もおおきに〜！");
    assert!((10..=95).contains(&result.want_to_talk_again));
}
