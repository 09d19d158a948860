//! Core types shared by every stage of the pipeline
//!
//! The data model is deliberately plain: diagnostics and results are owned
//! value types created once per analysis and handed to the caller, never
//! cached or mutated afterwards. Counts on `StaticAnalysisResult` are always
//! derived from the diagnostic list itself so they cannot drift.

pub mod language;
pub mod report;
pub mod severity;

pub use language::Language;
pub use report::{
    AnalysisRequest, CompleteAnalysis, Diagnostic, EmptyCode, ExecutionResult, Priority,
    SemanticAnalysisResult, StaticAnalysisResult, Suggestion, SuggestionKind,
};
pub use severity::Severity;
