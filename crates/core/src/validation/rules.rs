//! Rule and violation types plus the evaluator.

use serde::Serialize;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: &str, rule: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// A named predicate over a draft record. `check` returns the user-facing
/// message when the rule is violated.
pub struct Rule<T> {
    pub field: &'static str,
    pub name: &'static str,
    pub check: fn(&T) -> Option<String>,
}

impl<T> Rule<T> {
    fn apply(&self, record: &T) -> Option<Violation> {
        (self.check)(record).map(|message| Violation::new(self.field, self.name, message))
    }
}

/// Run every rule and collect all violations, in rule order.
pub fn evaluate_all<T>(rules: &[Rule<T>], record: &T) -> Vec<Violation> {
    rules.iter().filter_map(|rule| rule.apply(record)).collect()
}

/// Run rules in order and stop at the first violation.
pub fn evaluate_first<T>(rules: &[Rule<T>], record: &T) -> Vec<Violation> {
    rules
        .iter()
        .find_map(|rule| rule.apply(record))
        .into_iter()
        .collect()
}

/// Length in Unicode scalar values.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Trim an optional client string, mapping `None` to the empty string.
pub(crate) fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}
