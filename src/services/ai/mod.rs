//! AI Advisory Services
//!
//! Completion providers, response caching, and the code-review façade.

pub mod advisor;
pub mod cache;
pub mod claude;
pub mod gemini;
pub mod local;
pub mod openai;
pub mod provider;
pub mod types;

pub use advisor::CodeAdvisor;
pub use cache::ResponseCache;
pub use provider::{build_provider, complete_with_retry, CompletionProvider};
pub use types::{AiError, AiResult, ProviderKind, ProviderSettings};
