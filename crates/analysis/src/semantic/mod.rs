//! Generative-text critique of a source snippet
//!
//! The provider abstraction switches between LLM backends (OpenAI in
//! production, a scripted mock in tests) while the client owns prompt
//! construction, lenient reply parsing, and the no-throw degradation
//! contract: whatever the upstream does, `critique` returns a valid
//! `SemanticAnalysisResult`.

pub mod client;
pub mod config;
pub mod mock_provider;
pub mod prompt;
pub mod provider;

pub use client::CritiqueClient;
pub use config::CritiqueConfig;
pub use mock_provider::MockTextProvider;
pub use prompt::build_prompt;
pub use provider::{CritiqueRequest, OpenAIProvider, ProviderError, TextProvider};
