//! LLM integration for debate-coach.
//!
//! The analysis handler talks to a model through the [`LlmProvider`] trait,
//! so tests and alternative backends can stand in for the real API.
//!
//! ```ignore
//! use debate_coach::llm::{GenerationRequest, LlmProvider, Message, OpenRouterProvider};
//!
//! let provider = OpenRouterProvider::new(std::env::var("OPENROUTER_API_KEY").ok())?;
//! let request = GenerationRequest::new("", vec![Message::user("Argue for school uniforms.")])
//!     .with_temperature(0.7)
//!     .with_max_tokens(1500);
//! let response = provider.generate(request).await?;
//! println!("{}", response.first_content().unwrap_or_default());
//! ```

pub mod providers;
pub mod types;

pub use providers::OpenRouterProvider;
pub use types::{Choice, GenerationRequest, GenerationResponse, LlmProvider, Message, Usage};
