use crate::validation::Violation;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<Violation>),

    /// A required setting (usually an upstream credential) is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Build a validation error carrying a single violation.
    pub fn single(field: &'static str, rule: &'static str, message: impl Into<String>) -> Self {
        CoreError::Validation(vec![Violation::new(field, rule, message)])
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
