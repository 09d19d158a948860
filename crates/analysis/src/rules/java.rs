//! Java rule set, named after the checkstyle rules it approximates.

use super::RuleSet;
use crate::core::{Diagnostic, Language, Severity};

pub struct JavaRules;

impl RuleSet for JavaRules {
    fn language(&self) -> Language {
        Language::Java
    }

    fn scan(&self, code: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for (index, line) in code.lines().enumerate() {
            let line_num = index + 1;
            let trimmed = line.trim_start();

            let declares_type =
                trimmed.starts_with("class ") || trimmed.starts_with("interface ");
            if declares_type && !line.contains("public") && !line.contains("private") {
                diagnostics.push(
                    Diagnostic::new(
                        line_num,
                        Severity::Info,
                        "Class should have explicit access modifier",
                    )
                    .with_rule("MissingJavadocMethod"),
                );
            }

            if line.contains("System.out.println") {
                diagnostics.push(
                    Diagnostic::new(
                        line_num,
                        Severity::Info,
                        "Consider using a logger instead of System.out.println",
                    )
                    .with_rule("SystemPrintln"),
                );
            }
        }

        diagnostics
    }
}
