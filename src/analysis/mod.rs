//! Debate analysis: prompt construction, the remote attempt, and the
//! static fallback path.
//!
//! ```ignore
//! use std::sync::Arc;
//! use debate_coach::analysis::{AnalysisRequest, Analyzer, AnalyzerSettings};
//! use debate_coach::llm::OpenRouterProvider;
//!
//! let provider = Arc::new(OpenRouterProvider::new(std::env::var("OPENROUTER_API_KEY").ok())?);
//! let analyzer = Analyzer::new(provider, AnalyzerSettings::default());
//! let response = analyzer
//!     .analyze(AnalysisRequest::new("School uniforms", None, "fallacies"))
//!     .await?;
//! println!("{}", response.result);
//! ```

pub mod fallback;
pub mod handler;
pub mod prompts;
pub mod remote;
pub mod types;

pub use fallback::{FallbackCatalog, FallbackKind, SPECIAL_CASE_TOPIC};
pub use handler::{Analyzer, AnalyzerSettings, Answer, AnswerSource};
pub use prompts::{build_prompt, DEBATE_COACH_SYSTEM_PROMPT};
pub use remote::{RemoteFailure, RemoteOutcome, TruncationHeuristic};
pub use types::{AnalysisMode, AnalysisRequest, AnalysisResponse, ErrorBody, ValidatedRequest};
