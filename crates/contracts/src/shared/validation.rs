//! Validation primitives for form schemas.
//!
//! Forms hand over raw strings exactly as the inputs hold them. Each schema
//! checks its fields in a fixed order and keeps at most one error per field,
//! so the first failing rule of a field is the one shown under the input.

use serde::{Deserialize, Serialize};

pub const RULE_REQUIRED: &str = "required";
pub const RULE_TYPE_ERROR: &str = "typeError";
pub const RULE_POSITIVE: &str = "positive";
pub const RULE_INTEGER: &str = "integer";
pub const RULE_ONE_OF: &str = "oneOf";
pub const RULE_FILE_TYPE: &str = "fileType";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    /// Name of the failed rule (`required`, `typeError`, `fileType`, ...)
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error unless the field already has one.
    pub fn add(&mut self, field: &str, rule: &str, message: &str) {
        if self.has(field) {
            return;
        }
        self.errors.push(FieldError {
            field: field.to_string(),
            rule: rule.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.get(field).map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl std::error::Error for ValidationErrors {}

/// Trimmed value, `None` for empty or whitespace-only input.
pub fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Required string field.
pub fn required_string(
    errors: &mut ValidationErrors,
    field: &str,
    raw: &str,
    required_msg: &str,
) -> Option<String> {
    let value = non_empty(raw);
    if value.is_none() {
        errors.add(field, RULE_REQUIRED, required_msg);
    }
    value
}

/// Required number field. Empty input fails `required`, anything that does not
/// parse as a finite number fails `typeError`.
pub fn required_number(
    errors: &mut ValidationErrors,
    field: &str,
    raw: &str,
    required_msg: &str,
    type_msg: &str,
) -> Option<f64> {
    let Some(text) = non_empty(raw) else {
        errors.add(field, RULE_REQUIRED, required_msg);
        return None;
    };
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            errors.add(field, RULE_TYPE_ERROR, type_msg);
            None
        }
    }
}

pub fn check_positive(errors: &mut ValidationErrors, field: &str, value: f64, msg: &str) -> bool {
    if value > 0.0 {
        true
    } else {
        errors.add(field, RULE_POSITIVE, msg);
        false
    }
}

pub fn check_integer(errors: &mut ValidationErrors, field: &str, value: f64, msg: &str) -> bool {
    if value.fract() == 0.0 {
        true
    } else {
        errors.add(field, RULE_INTEGER, msg);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("price", RULE_REQUIRED, "Price is required");
        errors.add("price", RULE_POSITIVE, "Price must be greater than zero");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message_for("price"), Some("Price is required"));
    }

    #[test]
    fn test_required_number_distinguishes_missing_and_garbage() {
        let mut errors = ValidationErrors::new();
        assert_eq!(required_number(&mut errors, "a", "  ", "req", "type"), None);
        assert_eq!(required_number(&mut errors, "b", "12abc", "req", "type"), None);
        assert_eq!(required_number(&mut errors, "c", " 4.5 ", "req", "type"), Some(4.5));
        assert_eq!(errors.get("a").map(|e| e.rule.as_str()), Some(RULE_REQUIRED));
        assert_eq!(errors.get("b").map(|e| e.rule.as_str()), Some(RULE_TYPE_ERROR));
        assert!(!errors.has("c"));
    }

    #[test]
    fn test_nan_and_infinity_are_type_errors() {
        let mut errors = ValidationErrors::new();
        assert_eq!(required_number(&mut errors, "x", "NaN", "req", "type"), None);
        assert_eq!(required_number(&mut errors, "y", "inf", "req", "type"), None);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("a", RULE_REQUIRED, "A is required");
        errors.add("b", RULE_REQUIRED, "B is required");
        assert_eq!(errors.to_string(), "A is required; B is required");
    }
}
