//! Critiq Analysis - Composite Code Review Pipeline
//!
//! This crate combines three independent verdicts on a source snippet into one
//! normalized score: deterministic per-language lint rules, a structured critique
//! from a generative-text model, and an optional sandboxed execution.

pub mod core;
pub mod exec;
pub mod pipeline;
pub mod rules;
pub mod score;
pub mod semantic;

pub use crate::core::{
    AnalysisRequest, CompleteAnalysis, Diagnostic, ExecutionResult, Language, Priority,
    SemanticAnalysisResult, Severity, StaticAnalysisResult, Suggestion, SuggestionKind,
};

pub use exec::SandboxClient;
pub use pipeline::{AnalysisError, Analyzer};
pub use rules::analyze_static;
pub use score::aggregate;
pub use semantic::{CritiqueClient, CritiqueConfig, MockTextProvider, TextProvider};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
