// Validation utilities module
// Provides custom validation functions and input normalization shared by request DTOs

use validator::ValidationError;

/// Rejects values that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

/// Request bodies are trimmed before they are validated or stored
pub trait Trim {
    fn trimmed(self) -> Self;
}

/// Trim a string in place, reusing the allocation when nothing changes
pub fn trim_owned(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}
