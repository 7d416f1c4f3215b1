use circular_notifier::summarizer::SummarizerConfig;
use circular_notifier::{HuggingFaceSummarizer, NotifierError, Summarizer};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn summarizer(server: &MockServer) -> HuggingFaceSummarizer {
    let mut config = SummarizerConfig::new("hf_test_token");
    config.api_base = server.uri();
    HuggingFaceSummarizer::new(config).unwrap()
}

#[tokio::test]
async fn returns_first_summary_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/facebook/bart-large-cnn"))
        .and(header("authorization", "Bearer hf_test_token"))
        .and(body_json(json!({
            "inputs": "Long circular text",
            "parameters": { "max_length": 200 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "summary_text": "The RBI kept the repo rate unchanged." }
        ])))
        .mount(&mock_server)
        .await;

    let summary = summarizer(&mock_server)
        .summarize("Long circular text", 200)
        .await
        .unwrap();

    assert_eq!(summary, "The RBI kept the repo rate unchanged.");
}

#[tokio::test]
async fn api_error_is_reported_with_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(json!({ "error": "Model is currently loading" })),
        )
        .mount(&mock_server)
        .await;

    let err = summarizer(&mock_server).summarize("text", 200).await.unwrap_err();

    match err {
        NotifierError::Summarization { status, message } => {
            assert_eq!(status, Some(503));
            assert_eq!(message, "Model is currently loading");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_result_list_is_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = summarizer(&mock_server).summarize("text", 200).await;
    assert!(matches!(result, Err(NotifierError::Summarization { .. })));
}

#[tokio::test]
async fn unexpected_body_is_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let result = summarizer(&mock_server).summarize("text", 200).await;
    assert!(matches!(result, Err(NotifierError::Serialization(_))));
}

#[test]
fn debug_output_hides_token() {
    let config = SummarizerConfig::new("hf_secret");
    assert!(!format!("{config:?}").contains("hf_secret"));
}
