use crate::utils::error::{FieldError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> std::result::Result<(), FieldError> {
    if path.is_empty() {
        return Err(FieldError::new(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(FieldError::new(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(
    field_name: &str,
    value: &str,
) -> std::result::Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::new(field_name, value, "Value cannot be empty"));
    }
    Ok(())
}

pub fn validate_single_line(
    field_name: &str,
    value: &str,
) -> std::result::Result<(), FieldError> {
    if value.contains(['\n', '\r']) {
        return Err(FieldError::new(
            field_name,
            value.escape_debug(),
            "Must not contain line breaks",
        ));
    }
    Ok(())
}

pub fn validate_max_chars(
    field_name: &str,
    value: &str,
    max: usize,
) -> std::result::Result<(), FieldError> {
    let count = value.chars().count();
    if count > max {
        return Err(FieldError::new(
            field_name,
            value,
            format!("Must be at most {} characters, got {}", max, count),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> std::result::Result<(), FieldError> {
    if value < min || value > max {
        return Err(FieldError::new(
            field_name,
            value,
            format!("Must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> std::result::Result<(), FieldError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FieldError::new(
            field_name,
            value,
            "Must be a finite, non-negative number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("slip", 1, 1, 85).is_ok());
        assert!(validate_range("slip", 85, 1, 85).is_ok());
        assert!(validate_range("slip", 0, 1, 85).is_err());
        assert!(validate_range("bay", 'a', 'A', 'Z').is_err());

        let err = validate_range("slip", 99, 1, 85).unwrap_err();
        assert_eq!(err.field, "slip");
        assert_eq!(err.value, "99");
        assert_eq!(err.reason, "Must be between 1 and 85");
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_file", "boats.csv").is_ok());
        assert!(validate_path("data_file", "").is_err());
        assert!(validate_path("data_file", "bo\0ats").is_err());
    }

    #[test]
    fn test_validate_max_chars() {
        assert!(validate_max_chars("name", "Jolly", 127).is_ok());
        assert!(validate_max_chars("name", &"x".repeat(128), 127).is_err());
    }

    #[test]
    fn test_validate_single_line() {
        assert!(validate_single_line("name", "Sea Breeze").is_ok());
        assert!(validate_single_line("name", "Sea\nBreeze").is_err());
        assert!(validate_single_line("name", "Sea Breeze\r").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("rates.slip", 12.5).is_ok());
        assert!(validate_non_negative("rates.slip", 0.0).is_ok());
        assert!(validate_non_negative("rates.slip", -1.0).is_err());
        assert!(validate_non_negative("rates.slip", f64::NAN).is_err());
    }
}
