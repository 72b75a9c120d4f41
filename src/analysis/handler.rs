//! The analysis request handler.
//!
//! Per request: `Received -> PromptBuilt -> RemoteAttempted ->
//! {RemoteAccepted | RemoteRejected -> FallbackSelected} -> Responded`.
//! Invalid input is rejected before a prompt is built.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::fallback::FallbackCatalog;
use super::prompts::{build_prompt, DEBATE_COACH_SYSTEM_PROMPT};
use super::remote::{self, RemoteOutcome, TruncationHeuristic};
use super::types::{AnalysisRequest, AnalysisResponse, ValidatedRequest};
use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::llm::{GenerationRequest, LlmProvider, Message};

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Remote,
    Fallback,
}

/// An answer together with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl From<Answer> for AnalysisResponse {
    fn from(answer: Answer) -> Self {
        Self {
            result: answer.text,
        }
    }
}

/// Generation parameters that never change per request.
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub request_timeout: Duration,
    pub truncation: TruncationHeuristic,
    pub fallback_delay: Duration,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for AnalyzerSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            request_timeout: config.request_timeout,
            truncation: TruncationHeuristic::new(
                config.truncation_threshold,
                config.truncation_marker.clone(),
            ),
            fallback_delay: config.fallback_delay,
        }
    }
}

/// Answers debate analysis requests from a remote model, falling back to
/// static text.
///
/// Holds no mutable state, so one instance is shared by all requests.
pub struct Analyzer {
    provider: Arc<dyn LlmProvider>,
    fallbacks: FallbackCatalog,
    settings: AnalyzerSettings,
}

impl Analyzer {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: AnalyzerSettings) -> Self {
        Self {
            provider,
            fallbacks: FallbackCatalog::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Handle one request end to end.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        info!(
            topic = request.topic.as_deref().unwrap_or(""),
            mode = request.mode.as_deref().unwrap_or(""),
            has_perspective = request
                .perspective
                .as_deref()
                .is_some_and(|p| !p.trim().is_empty()),
            "Received analysis request"
        );

        let validated = request.validate().map_err(|err| {
            warn!(error = %err, "Rejected analysis request");
            err
        })?;

        Ok(self.answer(&validated).await.into())
    }

    /// Produce an answer for an already validated request.
    pub async fn answer(&self, request: &ValidatedRequest) -> Answer {
        let prompt = build_prompt(request);
        debug!(mode = %request.mode, prompt_chars = prompt.chars().count(), "Prompt built");

        let generation = GenerationRequest::new(
            self.settings.model.clone(),
            vec![
                Message::system(DEBATE_COACH_SYSTEM_PROMPT),
                Message::user(prompt),
            ],
        )
        .with_temperature(self.settings.temperature)
        .with_max_tokens(self.settings.max_tokens);

        let outcome = remote::attempt(
            self.provider.as_ref(),
            generation,
            self.settings.request_timeout,
            &self.settings.truncation,
        )
        .await;

        match outcome {
            RemoteOutcome::Accepted(text) => {
                info!(chars = text.chars().count(), "Remote answer accepted");
                Answer {
                    text,
                    source: AnswerSource::Remote,
                }
            }
            RemoteOutcome::Rejected(reason) => {
                warn!(reason = %reason, "Remote answer rejected, using fallback");
                self.fallback(request).await
            }
        }
    }

    async fn fallback(&self, request: &ValidatedRequest) -> Answer {
        let kind = self
            .fallbacks
            .kind_for(request.mode, &request.topic, request.has_perspective());
        debug!(?kind, "Fallback selected");

        let text = self.fallbacks.select(request);

        if !self.settings.fallback_delay.is_zero() {
            tokio::time::sleep(self.settings.fallback_delay).await;
        }

        Answer {
            text,
            source: AnswerSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::AnalysisMode;
    use crate::error::LlmError;
    use crate::llm::GenerationResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a fixed result and records every request it sees.
    struct ScriptedProvider {
        reply: Result<String, u16>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedProvider {
        fn ok(content: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(content.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn status(code: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(code),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(content) => Ok(GenerationResponse::from_content("scripted", content.clone())),
                Err(code) => Err(LlmError::ApiError {
                    code: *code,
                    message: "scripted failure".to_string(),
                }),
            }
        }
    }

    fn settings() -> AnalyzerSettings {
        AnalyzerSettings {
            fallback_delay: Duration::ZERO,
            ..AnalyzerSettings::default()
        }
    }

    fn analyzer(provider: Arc<ScriptedProvider>) -> Analyzer {
        Analyzer::new(provider, settings())
    }

    #[tokio::test]
    async fn test_accepts_remote_answer_trimmed() {
        let provider = ScriptedProvider::ok("  1. Costs rise.\n2. Jobs move.  \n");
        let analyzer = analyzer(provider.clone());

        let response = analyzer
            .analyze(AnalysisRequest::new("Tariffs", None, "counterarguments"))
            .await
            .unwrap();

        assert_eq!(response.result, "1. Costs rise.\n2. Jobs move.");
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_fixed_parameters() {
        let provider = ScriptedProvider::ok("fine");
        let analyzer = analyzer(provider.clone());

        analyzer
            .analyze(AnalysisRequest::new("Tariffs", Some("They protect jobs"), "fallacies"))
            .await
            .unwrap();

        let seen = provider.seen.lock().unwrap();
        let request = &seen[0];
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(1500));
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[0].content.contains("debate coach"));
        assert!(request.messages[1].content.contains("Argument: They protect jobs"));
    }

    #[tokio::test]
    async fn test_user_text_reaches_model_unchanged() {
        let provider = ScriptedProvider::ok("fine");
        let analyzer = analyzer(provider.clone());

        analyzer
            .analyze(AnalysisRequest::new(
                "Tariffs",
                Some("Critics of {topic} are wrong"),
                "counterarguments",
            ))
            .await
            .unwrap();

        let seen = provider.seen.lock().unwrap();
        let prompt = &seen[0].messages[1].content;
        assert!(prompt.contains("Topic: Tariffs\n"));
        assert!(prompt.contains("Position: Critics of {topic} are wrong"));
    }

    #[tokio::test]
    async fn test_rejects_before_remote_call() {
        let provider = ScriptedProvider::ok("unused");
        let analyzer = analyzer(provider.clone());

        let err = analyzer
            .analyze(AnalysisRequest::new("", None, "fallacies"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyTopic));

        let err = analyzer
            .analyze(AnalysisRequest::new("Tariffs", None, "summary"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidMode(_)));

        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_long_answer_and_failure_give_same_fallback() {
        let request = ValidatedRequest {
            topic: "Tariffs".to_string(),
            perspective: None,
            mode: AnalysisMode::Fallacies,
        };

        let too_long = analyzer(ScriptedProvider::ok(&"x".repeat(1400)))
            .answer(&request)
            .await;
        let failed = analyzer(ScriptedProvider::status(500)).answer(&request).await;

        assert_eq!(too_long.source, AnswerSource::Fallback);
        assert_eq!(failed.source, AnswerSource::Fallback);
        assert_eq!(too_long.text, failed.text);
        assert_eq!(failed.text, FallbackCatalog::new().select(&request));
    }

    #[tokio::test]
    async fn test_fallback_delay_applied() {
        let analyzer = Analyzer::new(
            ScriptedProvider::status(503),
            AnalyzerSettings {
                fallback_delay: Duration::from_millis(50),
                ..AnalyzerSettings::default()
            },
        );

        let started = std::time::Instant::now();
        let answer = analyzer
            .answer(&ValidatedRequest {
                topic: "Tariffs".to_string(),
                perspective: None,
                mode: AnalysisMode::Counterarguments,
            })
            .await;

        assert_eq!(answer.source, AnswerSource::Fallback);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_custom_truncation_threshold() {
        let analyzer = Analyzer::new(
            ScriptedProvider::ok(&"y".repeat(200)),
            AnalyzerSettings {
                truncation: TruncationHeuristic::new(100, "..."),
                ..settings()
            },
        );

        let answer = analyzer
            .answer(&ValidatedRequest {
                topic: "Tariffs".to_string(),
                perspective: None,
                mode: AnalysisMode::Counterarguments,
            })
            .await;
        assert_eq!(answer.source, AnswerSource::Fallback);
    }
}
