//! Shared C / C++ rule set
//!
//! Both languages use the same patterns; the set is instantiated per
//! language so the dispatch table stays one-to-one.

use super::RuleSet;
use crate::core::{Diagnostic, Language, Severity};

pub struct ClikeRules {
    language: Language,
}

impl ClikeRules {
    pub fn new(language: Language) -> Self {
        debug_assert!(matches!(language, Language::C | Language::Cpp));
        Self { language }
    }
}

impl RuleSet for ClikeRules {
    fn language(&self) -> Language {
        self.language
    }

    fn scan(&self, code: &str) -> Vec<Diagnostic> {
        let has_iostream = code.contains("#include <iostream>");
        let has_delete = code.contains("delete");
        let mut diagnostics = Vec::new();

        for (index, line) in code.lines().enumerate() {
            let line_num = index + 1;

            if line.contains("using namespace std") {
                diagnostics.push(
                    Diagnostic::new(line_num, Severity::Warning, "Avoid \"using namespace std\"")
                        .with_rule("google-build-using-namespace"),
                );
            }

            if line.contains("cout") && !has_iostream {
                diagnostics.push(Diagnostic::new(
                    line_num,
                    Severity::Error,
                    "Missing #include <iostream>",
                ));
            }

            if line.contains("new ") && !has_delete {
                diagnostics.push(
                    Diagnostic::new(
                        line_num,
                        Severity::Warning,
                        "Potential memory leak: new without delete",
                    )
                    .with_rule("cppcoreguidelines-owning-memory"),
                );
            }
        }

        diagnostics
    }
}
