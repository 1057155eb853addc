//! Validation System - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Policy (the template's failure mode) maps violations to actions.
//!
//! Nothing here looks at C syntax. Rules check the template's own symbols and
//! report what the line filter is about to do.

use serde::{Deserialize, Serialize};

use crate::filter::{split_lines, ImplementationFilter};
use crate::sources::SourceSet;
use crate::templates::{FailureMode, HeaderTemplate};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub remediation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
    pub header_name: String,
}

impl ValidationResult {
    pub fn success(template: &HeaderTemplate, violations: Vec<ValidationViolation>) -> Self {
        Self {
            valid: true,
            violations,
            header_name: template.header_name.clone(),
        }
    }

    pub fn failure(template: &HeaderTemplate, violations: Vec<ValidationViolation>) -> Self {
        Self {
            valid: false,
            violations,
            header_name: template.header_name.clone(),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations.iter().filter(|v| v.severity == ViolationSeverity::Warning)
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, sources: &SourceSet, template: &HeaderTemplate) -> Vec<ValidationViolation>;
}

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// --- Concrete Rules ---

/// Activation and guard symbols must be usable in `#ifdef`.
pub struct SymbolNameRule;

impl ValidationRule for SymbolNameRule {
    fn name(&self) -> &'static str { "symbol_name" }

    fn validate(&self, _sources: &SourceSet, template: &HeaderTemplate) -> Vec<ValidationViolation> {
        [
            ("activation", &template.activation_symbol),
            ("guard", &template.guard_symbol),
        ]
        .into_iter()
        .filter(|(_, symbol)| !is_c_identifier(symbol))
        .map(|(kind, symbol)| ValidationViolation {
            rule: self.name().to_string(),
            severity: ViolationSeverity::Error,
            message: format!("Invalid {} symbol", kind),
            expected: Some("[A-Za-z_][A-Za-z0-9_]*".to_string()),
            actual: Some(symbol.clone()),
            remediation: vec!["Use a plain C preprocessor identifier".to_string()],
        })
        .collect()
    }
}

/// Reusing the activation symbol as the guard would define it inside the
/// body and defeat the guard.
pub struct DistinctSymbolsRule;

impl ValidationRule for DistinctSymbolsRule {
    fn name(&self) -> &'static str { "distinct_symbols" }

    fn validate(&self, _sources: &SourceSet, template: &HeaderTemplate) -> Vec<ValidationViolation> {
        if template.activation_symbol != template.guard_symbol {
            return vec![];
        }
        vec![ValidationViolation {
            rule: self.name().to_string(),
            severity: ViolationSeverity::Error,
            message: "Activation and guard symbols are identical".to_string(),
            expected: Some("two different symbols".to_string()),
            actual: Some(template.guard_symbol.clone()),
            remediation: vec![format!("Rename the guard, e.g. {}_GUARD", template.activation_symbol)],
        }]
    }
}

/// An empty header name matches every line and would drop the whole body.
pub struct HeaderNameRule;

impl ValidationRule for HeaderNameRule {
    fn name(&self) -> &'static str { "header_name" }

    fn validate(&self, _sources: &SourceSet, template: &HeaderTemplate) -> Vec<ValidationViolation> {
        if !template.header_name.is_empty() {
            return vec![];
        }
        vec![ValidationViolation {
            rule: self.name().to_string(),
            severity: ViolationSeverity::Error,
            message: "Header name is empty".to_string(),
            expected: Some("file name of the declarations header".to_string()),
            actual: Some(String::new()),
            remediation: vec!["Set headerName in the template".to_string()],
        }]
    }
}

/// Lines mentioning the header that are not `#include` directives are still
/// dropped. Surface them so the loss is visible.
pub struct SelfReferenceRule;

impl ValidationRule for SelfReferenceRule {
    fn name(&self) -> &'static str { "self_reference" }

    fn validate(&self, sources: &SourceSet, template: &HeaderTemplate) -> Vec<ValidationViolation> {
        if template.header_name.is_empty() {
            return vec![];
        }

        let filter = ImplementationFilter::new(&template.header_name);
        let dropped = filter.dropped(&sources.implementation);

        let mut violations: Vec<_> = dropped
            .iter()
            .filter(|d| !d.is_include())
            .map(|d| ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Warning,
                message: format!("Line {} mentions {} and will be dropped", d.line, template.header_name),
                expected: Some(format!("#include \"{}\"", template.header_name)),
                actual: Some(d.text.clone()),
                remediation: vec![format!(
                    "Reword the line so it does not contain '{}'",
                    template.header_name
                )],
            })
            .collect();

        if dropped.is_empty() && !sources.implementation.is_empty() {
            violations.push(ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Info,
                message: "Implementation never references its header".to_string(),
                expected: Some(format!("#include \"{}\"", template.header_name)),
                actual: None,
                remediation: vec![],
            });
        }

        violations
    }
}

/// License lines are pasted inside the banner's block comment. A `*/` in
/// them closes the banner early and turns the rest into code.
pub struct LicenseCommentRule;

impl ValidationRule for LicenseCommentRule {
    fn name(&self) -> &'static str { "license_comment" }

    fn validate(&self, sources: &SourceSet, _template: &HeaderTemplate) -> Vec<ValidationViolation> {
        split_lines(&sources.license)
            .enumerate()
            .filter(|(_, line)| line.contains("*/"))
            .map(|(idx, line)| ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: format!("License line {} closes the banner comment", idx + 1),
                expected: Some("no '*/' in license text".to_string()),
                actual: Some(line.to_string()),
                remediation: vec!["Remove or reword the '*/' in the license file".to_string()],
            })
            .collect()
    }
}

/// Validator orchestrates rules and applies policy
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(SymbolNameRule),
                Box::new(DistinctSymbolsRule),
                Box::new(HeaderNameRule),
                Box::new(SelfReferenceRule),
                Box::new(LicenseCommentRule),
            ],
        }
    }

    pub fn validate(&self, sources: &SourceSet, template: &HeaderTemplate) -> ValidationResult {
        let mut all_violations = vec![];

        for rule in &self.rules {
            all_violations.extend(rule.validate(sources, template));
        }

        let has_errors = all_violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error);

        match template.failure_mode {
            FailureMode::Block if has_errors => ValidationResult::failure(template, all_violations),
            FailureMode::Block => ValidationResult::success(template, all_violations),
            FailureMode::Warn => ValidationResult::success(template, all_violations),
            // Only errors are recorded
            FailureMode::Log => {
                let errors: Vec<_> = all_violations
                    .into_iter()
                    .filter(|v| v.severity == ViolationSeverity::Error)
                    .collect();
                ValidationResult::success(template, errors)
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
