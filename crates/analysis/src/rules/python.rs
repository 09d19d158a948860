//! Python rule set
//!
//! Pylint-flavored heuristics plus a whole-document delimiter balance check.
//! The unused-variable rule is a naive substring count: a name that appears
//! exactly once in the document is presumed unused. It false-positives on
//! names that are substrings of other tokens; that imprecision is accepted
//! in exchange for staying parser-free.

use super::RuleSet;
use crate::core::{Diagnostic, Language, Severity};

pub struct PythonRules;

impl RuleSet for PythonRules {
    fn language(&self) -> Language {
        Language::Python
    }

    fn scan(&self, code: &str) -> Vec<Diagnostic> {
        let lines: Vec<&str> = code.lines().collect();
        let mut diagnostics = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let line_num = index + 1;
            let trimmed = line.trim();

            if (trimmed.starts_with("import ") || trimmed.starts_with("from "))
                && trimmed.contains('*')
            {
                diagnostics.push(
                    Diagnostic::new(line_num, Severity::Warning, "Avoid wildcard imports")
                        .with_rule("W0614"),
                );
            }

            if let Some(name) = assignment_target(line) {
                if occurrence_count(code, name) == 1 {
                    diagnostics.push(
                        Diagnostic::new(
                            line_num,
                            Severity::Info,
                            format!("Variable '{name}' might be unused"),
                        )
                        .with_rule("W0612"),
                    );
                }
            }

            if trimmed.starts_with("def ") {
                if let Some(next) = lines.get(index + 1) {
                    let next = next.trim();
                    if !next.starts_with("\"\"\"") && !next.starts_with("'''") {
                        diagnostics.push(
                            Diagnostic::new(line_num, Severity::Info, "Function missing docstring")
                                .with_rule("C0111"),
                        );
                    }
                }
            }

            if line.len() > 100 {
                diagnostics.push(
                    Diagnostic::new(
                        line_num,
                        Severity::Warning,
                        "Line too long (over 100 characters)",
                    )
                    .with_rule("C0301"),
                );
            }
        }

        diagnostics.extend(balance_checks(code));
        diagnostics
    }
}

/// `name` in a leading `name =` (single `=`, not a comparison or augmented
/// assignment on the identifier itself).
fn assignment_target(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let end = trimmed
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    let rest = trimmed[end..].trim_start();
    if rest.starts_with('=') && !rest.starts_with("==") {
        Some(&trimmed[..end])
    } else {
        None
    }
}

fn occurrence_count(code: &str, name: &str) -> usize {
    code.matches(name).count()
}

/// Whole-document structural check: one error diagnostic at line 1 per
/// unbalanced delimiter kind. These carry no rule identifier.
fn balance_checks(code: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let open_parens = code.matches('(').count();
    let close_parens = code.matches(')').count();
    if open_parens != close_parens {
        diagnostics.push(Diagnostic::new(1, Severity::Error, "Mismatched parentheses"));
    }

    let open_braces = code.matches('{').count();
    let close_braces = code.matches('}').count();
    if open_braces != close_braces {
        diagnostics.push(Diagnostic::new(1, Severity::Error, "Mismatched braces"));
    }

    diagnostics
}
