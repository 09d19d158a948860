//! Per-language heuristic rule sets
//!
//! Line-oriented pattern scanning, not parsing: each language owns an
//! independent `RuleSet` that walks `code.lines()` and appends diagnostics.
//! The engine is deterministic and idempotent (identical input, identical
//! ordered output) and the diagnostics keep emission order. Rules are
//! explicitly heuristic and tolerate false positives/negatives; a rule that
//! needs context beyond its line may look one line ahead or test a
//! whole-document substring.
//!
//! Adding a language means adding a rule set here, not touching the others.

pub mod clike;
pub mod java;
pub mod javascript;
pub mod python;

use crate::core::{Language, StaticAnalysisResult};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::error;

pub use clike::ClikeRules;
pub use java::JavaRules;
pub use javascript::JavaScriptRules;
pub use python::PythonRules;

pub trait RuleSet: Send + Sync {
    fn language(&self) -> Language;

    /// Scan the whole document and return diagnostics in scan order.
    fn scan(&self, code: &str) -> Vec<crate::core::Diagnostic>;
}

fn rule_set_for(language: Language) -> Box<dyn RuleSet> {
    match language {
        Language::Python => Box::new(PythonRules),
        Language::JavaScript => Box::new(JavaScriptRules),
        Language::C => Box::new(ClikeRules::new(Language::C)),
        Language::Cpp => Box::new(ClikeRules::new(Language::Cpp)),
        Language::Java => Box::new(JavaRules),
    }
}

/// Run the rule set for `language` over `code`. Never fails: an internal
/// fault degrades to the empty result instead of propagating.
pub fn analyze_static(code: &str, language: Language) -> StaticAnalysisResult {
    let rule_set = rule_set_for(language);
    debug_assert_eq!(rule_set.language(), language);

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        StaticAnalysisResult::from_diagnostics(rule_set.scan(code))
    }));

    match outcome {
        Ok(result) => result,
        Err(_) => {
            error!(language = %language, "static analysis fault, returning empty result");
            StaticAnalysisResult::empty()
        }
    }
}
