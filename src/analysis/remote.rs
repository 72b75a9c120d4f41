//! The single remote generation attempt and its acceptance rules.
//!
//! Every way the attempt can go wrong is folded into [`RemoteFailure`];
//! nothing here returns an error to the caller.

use std::fmt;
use std::time::Duration;

use crate::error::LlmError;
use crate::llm::{GenerationRequest, GenerationResponse, LlmProvider};

/// Why a remote answer was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// Network or client error before a response arrived.
    Transport(String),
    /// No answer within the configured bound.
    Timeout(Duration),
    /// The API answered with something other than 200.
    Status { code: u16, message: String },
    /// The body did not carry `choices[0].message.content`.
    Malformed(String),
    /// The content looks cut off.
    Truncated { chars: usize, ellipsis: bool },
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::Timeout(d) => write!(f, "no response within {}s", d.as_secs_f64()),
            Self::Status { code, message } => write!(f, "status {}: {}", code, message),
            Self::Malformed(msg) => write!(f, "malformed response: {}", msg),
            Self::Truncated { chars, ellipsis } => write!(
                f,
                "possibly truncated ({} chars, trailing marker: {})",
                chars, ellipsis
            ),
        }
    }
}

impl From<LlmError> for RemoteFailure {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::RequestFailed(msg) => Self::Transport(msg),
            LlmError::ParseError(msg) => Self::Malformed(msg),
            LlmError::RateLimited(message) => Self::Status { code: 429, message },
            LlmError::ApiError { code, message } => Self::Status { code, message },
        }
    }
}

/// Result of the remote step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// Usable content, already trimmed.
    Accepted(String),
    /// The fallback must be used.
    Rejected(RemoteFailure),
}

impl RemoteOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Length/marker heuristic for spotting answers that hit the token cap.
///
/// A long, complete answer is indistinguishable from a cut-off one here;
/// both are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncationHeuristic {
    /// Content with at least this many characters is rejected.
    pub threshold_chars: usize,
    /// Content ending with this marker is rejected.
    pub marker: String,
}

impl Default for TruncationHeuristic {
    fn default() -> Self {
        Self {
            threshold_chars: 1400,
            marker: "...".to_string(),
        }
    }
}

impl TruncationHeuristic {
    pub fn new(threshold_chars: usize, marker: impl Into<String>) -> Self {
        Self {
            threshold_chars,
            marker: marker.into(),
        }
    }

    /// Check raw (untrimmed) content. Returns the failure if it looks truncated.
    pub fn check(&self, content: &str) -> Option<RemoteFailure> {
        let chars = content.chars().count();
        let ellipsis = !self.marker.is_empty() && content.ends_with(&self.marker);
        if ellipsis || chars >= self.threshold_chars {
            Some(RemoteFailure::Truncated { chars, ellipsis })
        } else {
            None
        }
    }
}

/// Decide whether a provider response is usable.
pub fn evaluate_response(
    response: &GenerationResponse,
    heuristic: &TruncationHeuristic,
) -> RemoteOutcome {
    let Some(content) = response.first_content() else {
        return RemoteOutcome::Rejected(RemoteFailure::Malformed(
            "response contained no choices".to_string(),
        ));
    };

    match heuristic.check(content) {
        Some(failure) => RemoteOutcome::Rejected(failure),
        None => RemoteOutcome::Accepted(content.trim().to_string()),
    }
}

/// Make exactly one bounded call to the provider and classify the result.
pub async fn attempt(
    provider: &dyn LlmProvider,
    request: GenerationRequest,
    timeout: Duration,
    heuristic: &TruncationHeuristic,
) -> RemoteOutcome {
    match tokio::time::timeout(timeout, provider.generate(request)).await {
        Err(_) => RemoteOutcome::Rejected(RemoteFailure::Timeout(timeout)),
        Ok(Err(err)) => RemoteOutcome::Rejected(err.into()),
        Ok(Ok(response)) => evaluate_response(&response, heuristic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;
    use async_trait::async_trait;

    struct SlowProvider(Duration);

    #[async_trait]
    impl LlmProvider for SlowProvider {
        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> Result<GenerationResponse, LlmError> {
            tokio::time::sleep(self.0).await;
            Ok(GenerationResponse::from_content("slow", "late answer"))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl LlmProvider for FailingProvider {
        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> Result<GenerationResponse, LlmError> {
            Err(LlmError::ApiError {
                code: 401,
                message: "No auth credentials found".to_string(),
            })
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("", vec![Message::user("x")])
    }

    #[test]
    fn test_threshold_boundary_counts_chars() {
        let heuristic = TruncationHeuristic::default();
        assert!(heuristic.check(&"a".repeat(1399)).is_none());
        assert!(heuristic.check(&"a".repeat(1400)).is_some());
        // 1399 two-byte characters is well over 1400 bytes but still accepted.
        assert!(heuristic.check(&"é".repeat(1399)).is_none());
    }

    #[test]
    fn test_trailing_ellipsis_rejected() {
        let heuristic = TruncationHeuristic::default();
        assert_eq!(
            heuristic.check("The third point is..."),
            Some(RemoteFailure::Truncated {
                chars: 21,
                ellipsis: true
            })
        );
        assert!(heuristic.check("Ellipsis... in the middle.").is_none());
    }

    #[test]
    fn test_marker_checked_before_trim() {
        // Trailing whitespace after the marker hides it, as the raw content is inspected.
        assert!(TruncationHeuristic::default().check("cut off...\n").is_none());
    }

    #[test]
    fn test_empty_marker_disables_ellipsis_check() {
        let heuristic = TruncationHeuristic::new(100, "");
        assert!(heuristic.check("ends with dots...").is_none());
    }

    #[test]
    fn test_evaluate_trims_accepted_content() {
        let response = GenerationResponse::from_content("m", "\n  1. First point.\n");
        assert_eq!(
            evaluate_response(&response, &TruncationHeuristic::default()),
            RemoteOutcome::Accepted("1. First point.".to_string())
        );
    }

    #[test]
    fn test_evaluate_empty_choices_is_malformed() {
        let response = GenerationResponse {
            id: String::new(),
            model: String::new(),
            choices: vec![],
            usage: None,
        };
        assert!(matches!(
            evaluate_response(&response, &TruncationHeuristic::default()),
            RemoteOutcome::Rejected(RemoteFailure::Malformed(_))
        ));
    }

    #[test]
    fn test_llm_error_mapping() {
        assert!(matches!(
            RemoteFailure::from(LlmError::RequestFailed("dns".into())),
            RemoteFailure::Transport(_)
        ));
        assert!(matches!(
            RemoteFailure::from(LlmError::RateLimited("slow".into())),
            RemoteFailure::Status { code: 429, .. }
        ));
        assert!(matches!(
            RemoteFailure::from(LlmError::ParseError("eof".into())),
            RemoteFailure::Malformed(_)
        ));
    }

    #[tokio::test]
    async fn test_attempt_times_out() {
        let provider = SlowProvider(Duration::from_secs(5));
        let outcome = attempt(
            &provider,
            request(),
            Duration::from_millis(20),
            &TruncationHeuristic::default(),
        )
        .await;
        assert_eq!(
            outcome,
            RemoteOutcome::Rejected(RemoteFailure::Timeout(Duration::from_millis(20)))
        );
    }

    #[tokio::test]
    async fn test_attempt_maps_provider_error() {
        let outcome = attempt(
            &FailingProvider,
            request(),
            Duration::from_secs(1),
            &TruncationHeuristic::default(),
        )
        .await;
        assert!(matches!(
            outcome,
            RemoteOutcome::Rejected(RemoteFailure::Status { code: 401, .. })
        ));
        assert!(!outcome.is_accepted());
    }
}
