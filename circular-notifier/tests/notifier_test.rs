use circular_notifier::notifier::{
    escape_html, format_summary_message, format_title_message, split_message, TelegramConfig,
    MESSAGE_CHAR_LIMIT,
};
use circular_notifier::{Notifier, TelegramNotifier};
use std::time::{Duration, Instant};
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn normalized(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn long_body_is_split_on_word_boundaries() {
    let words = ["reserve", "bank", "circular", "liquidity", "repo", "rate", "penalty"];
    let mut body = String::new();
    let mut i = 0;
    while body.chars().count() < 9000 {
        if !body.is_empty() {
            body.push(if i % 17 == 0 { '\n' } else { ' ' });
        }
        body.push_str(words[i % words.len()]);
        i += 1;
    }

    let chunks = split_message(&body, MESSAGE_CHAR_LIMIT);

    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= MESSAGE_CHAR_LIMIT);
        assert!(!chunk.starts_with(char::is_whitespace));
        assert!(!chunk.ends_with(char::is_whitespace));
        for word in chunk.split_whitespace() {
            assert!(words.contains(&word), "word was split: {}", word);
        }
    }
    assert_eq!(normalized(&chunks.join(" ")), normalized(&body));
}

#[test]
fn short_text_is_a_single_untouched_chunk() {
    let text = "Summary line.\n\n🔗 <a href=\"https://example.org\">Read full circular</a>";
    assert_eq!(split_message(text, MESSAGE_CHAR_LIMIT), vec![text.to_string()]);
}

#[test]
fn line_breaks_inside_a_chunk_are_kept() {
    let chunks = split_message("one two\nthree four five", 13);
    assert_eq!(chunks, vec!["one two\nthree", "four five"]);
}

#[test]
fn oversized_word_is_cut() {
    let chunks = split_message("ab abcdefghij cd", 4);
    assert_eq!(chunks, vec!["ab", "abcd", "efgh", "ij", "cd"]);
}

#[test]
fn limit_counts_characters_not_bytes() {
    let chunks = split_message("ऋण नीति", 4);
    assert_eq!(chunks, vec!["ऋण", "नीति"]);
}

#[test]
fn blank_text_produces_no_chunks() {
    assert!(split_message("", MESSAGE_CHAR_LIMIT).is_empty());
    assert!(split_message(" \n\t ", MESSAGE_CHAR_LIMIT).is_empty());
}

#[test]
fn messages_escape_markup_in_content() {
    assert_eq!(escape_html("A & B <C> \"D\""), "A &amp; B &lt;C&gt; &quot;D&quot;");
    assert_eq!(
        format_title_message("Repo Rate & Reverse Repo"),
        "<b>Repo Rate &amp; Reverse Repo</b>"
    );
    assert_eq!(
        format_summary_message("Rates kept unchanged.", "https://rbi.org.in/x?a=1&b=2"),
        "Rates kept unchanged.\n\n🔗 <a href=\"https://rbi.org.in/x?a=1&amp;b=2\">Read full circular</a>"
    );
}

fn telegram_config(server: &MockServer) -> TelegramConfig {
    let mut config = TelegramConfig::new("123:abc", "-100200");
    config.api_base = server.uri();
    config.pacing = Duration::ZERO;
    config
}

#[tokio::test]
async fn send_posts_form_encoded_html_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_string_contains("chat_id=-100200"))
        .and(body_string_contains("parse_mode=HTML"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let notifier = TelegramNotifier::new(telegram_config(&mock_server)).unwrap();
    notifier.send("<b>Hello</b>").await;
}

#[tokio::test]
async fn send_transmits_chunks_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(4)
        .mount(&mock_server)
        .await;

    let mut config = telegram_config(&mock_server);
    config.chunk_limit = 5;
    let notifier = TelegramNotifier::new(config).unwrap();
    notifier.send("alpha bravo charlie").await;

    let requests = mock_server.received_requests().await.unwrap();
    let texts: Vec<String> = requests
        .iter()
        .map(|r| String::from_utf8_lossy(&r.body).to_string())
        .collect();
    assert!(texts[0].contains("text=alpha"));
    assert!(texts[1].contains("text=bravo"));
    // "charlie" is longer than the limit and gets cut
    assert!(texts[2].contains("text=charl"));
    assert!(texts[3].contains("text=ie"));
}

#[tokio::test]
async fn rejected_chunk_does_not_stop_the_rest() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("text=first"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"ok":false}"#))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("text=second"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = telegram_config(&mock_server);
    config.chunk_limit = 6;
    let notifier = TelegramNotifier::new(config).unwrap();
    notifier.send("first second").await;
}

#[tokio::test]
async fn chunks_are_spaced_by_the_pacing_interval() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut config = telegram_config(&mock_server);
    config.chunk_limit = 5;
    config.pacing = Duration::from_millis(100);
    let notifier = TelegramNotifier::new(config).unwrap();

    let started = Instant::now();
    notifier.send("alpha bravo delta").await;

    assert!(
        started.elapsed() >= Duration::from_millis(300),
        "three chunks sent in {:?}",
        started.elapsed()
    );
}
