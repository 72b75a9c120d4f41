//! Integration tests for the OpenRouter provider.
//!
//! These tests make real API calls to OpenRouter.
//! Run with: OPENROUTER_API_KEY=your_key cargo test --test llm_integration -- --ignored

use std::sync::Arc;

use debate_coach::analysis::{AnalysisRequest, Analyzer, AnalyzerSettings};
use debate_coach::llm::{GenerationRequest, LlmProvider, Message, OpenRouterProvider};
use debate_coach::LlmError;

fn get_test_api_key() -> String {
    std::env::var("OPENROUTER_API_KEY")
        .expect("OPENROUTER_API_KEY environment variable must be set for integration tests")
}

fn create_test_provider() -> OpenRouterProvider {
    OpenRouterProvider::new(Some(get_test_api_key())).expect("client should build")
}

#[tokio::test]
#[ignore] // Run with: cargo test --test llm_integration -- --ignored
async fn test_simple_generation() {
    let provider = create_test_provider();

    let request = GenerationRequest::new(
        provider.default_model(),
        vec![
            Message::system("You are a helpful assistant. Reply concisely."),
            Message::user("What is 2 + 2? Reply with just the number."),
        ],
    )
    .with_max_tokens(200)
    .with_temperature(0.0);

    let response = provider.generate(request).await;
    assert!(response.is_ok(), "Generation failed: {:?}", response.err());

    let response = response.expect("Should have response");
    let content = response.first_content().expect("Should have content");
    assert!(
        content.contains('4'),
        "Response should contain '4', got: {}",
        content
    );
}

#[tokio::test]
#[ignore]
async fn test_debate_analysis_end_to_end() {
    let analyzer = Analyzer::new(
        Arc::new(create_test_provider()),
        AnalyzerSettings::default(),
    );

    let response = analyzer
        .analyze(AnalysisRequest::new(
            "Should homework be banned?",
            Some("Homework has no benefit for students."),
            "fallacies",
        ))
        .await
        .expect("valid request should always produce a result");

    assert!(!response.result.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_invalid_api_key() {
    let provider =
        OpenRouterProvider::new(Some("invalid-key".to_string())).expect("client should build");

    let request = GenerationRequest::new("", vec![Message::user("test")]).with_max_tokens(5);

    let err = provider
        .generate(request)
        .await
        .expect_err("Should fail with invalid API key");
    assert!(matches!(err, LlmError::ApiError { code: 401, .. }), "got {err:?}");
}
