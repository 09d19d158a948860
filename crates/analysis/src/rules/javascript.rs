//! JavaScript rule set, named after the eslint rules it approximates.

use super::RuleSet;
use crate::core::{Diagnostic, Language, Severity};

pub struct JavaScriptRules;

impl RuleSet for JavaScriptRules {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn scan(&self, code: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (index, line) in code.lines().enumerate() {
            let line_num = index + 1;

            if line.contains(" == ") && !line.contains(" === ") {
                diagnostics.push(
                    Diagnostic::new(line_num, Severity::Warning, "Use === instead of ==")
                        .with_rule("eqeqeq"),
                );
            }

            if declares_var(line) {
                diagnostics.push(
                    Diagnostic::new(
                        line_num,
                        Severity::Warning,
                        "Use let or const instead of var",
                    )
                    .with_rule("no-var"),
                );
            }

            if line.contains("console.log") {
                diagnostics.push(
                    Diagnostic::new(
                        line_num,
                        Severity::Info,
                        "Consider removing console.log statements",
                    )
                    .with_rule("no-console"),
                );
            }
        }

        diagnostics
    }
}

/// A word-boundary `var` followed by whitespace and an identifier character,
/// i.e. a declaration, not any bare `var` token.
fn declares_var(line: &str) -> bool {
    let mut start = 0;
    while let Some(pos) = line[start..].find("var") {
        let at = start + pos;
        let boundary_before = at == 0
            || !line[..at]
                .chars()
                .next_back()
                .is_some_and(is_word_char);
        if boundary_before {
            let rest = &line[at + 3..];
            let after_space = rest.trim_start();
            let has_space = after_space.len() < rest.len();
            if has_space && after_space.chars().next().is_some_and(is_word_char) {
                return true;
            }
        }
        start = at + 3;
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
