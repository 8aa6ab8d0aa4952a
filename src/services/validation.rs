use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Indian registration plate, e.g. `MH12AB1234`
pub static VEHICLE_NO_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{1,2}[A-Z]{1,2}[0-9]{4}$").expect("valid regex"));

pub static CONTACT_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

/// Every field-level failure found in one record, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).is_some()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.reason.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Records that must pass field checks before they are sent to the backend
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Collects field errors so a form reports all of them at once.
#[derive(Debug, Default)]
pub struct FieldValidator {
    errors: Vec<FieldError>,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, reason: String) {
        // First failure per field wins, like a form showing one message per control
        if self.errors.iter().any(|e| e.field == field) {
            return;
        }
        self.errors.push(FieldError {
            field: field.to_string(),
            reason,
        });
    }

    pub fn required(&mut self, field: &str, label: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, format!("{} is required", label));
        }
        self
    }

    pub fn min_length(&mut self, field: &str, label: &str, value: &str, min: usize) -> &mut Self {
        if value.trim().chars().count() < min {
            self.push(field, format!("{} must be at least {} characters", label, min));
        }
        self
    }

    pub fn pattern(&mut self, field: &str, label: &str, value: &str, pattern: &Regex) -> &mut Self {
        if !pattern.is_match(value.trim()) {
            self.push(field, format!("{} has an invalid format", label));
        }
        self
    }

    pub fn min(&mut self, field: &str, label: &str, value: f64, min: f64) -> &mut Self {
        if !value.is_finite() {
            self.push(field, format!("{} must be a valid number", label));
        } else if value < min {
            self.push(field, format!("{} must be at least {}", label, min));
        }
        self
    }

    pub fn range(&mut self, field: &str, message: &str, value: u64, min: u64, max: u64) -> &mut Self {
        if value < min || value > max {
            self.push(field, message.to_string());
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}
