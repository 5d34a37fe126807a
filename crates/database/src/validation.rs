//! Input validation for user AI settings.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Input did not parse as a number.
    NotANumber(String),
    /// Temperature outside the accepted interval.
    OutOfRange(f64),
    /// Value too long.
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotANumber(input) => {
                write!(f, "'{}' is not a number", input)
            }
            ValidationError::OutOfRange(value) => write!(
                f,
                "{} is outside the accepted range ({} to {})",
                value, MIN_TEMPERATURE, MAX_TEMPERATURE
            ),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for model identifiers.
pub const MAX_MODEL_LENGTH: usize = 64;

/// Lowest accepted sampling temperature.
pub const MIN_TEMPERATURE: f64 = 0.0;

/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f64 = 1.0;

/// Validate a model identifier.
///
/// Model ids are opaque text; anything non-empty and reasonably sized is
/// accepted. Invalid remote ids surface later from the completion endpoint.
pub fn validate_model(model: &str) -> Result<(), ValidationError> {
    let model = model.trim();

    if model.is_empty() {
        return Err(ValidationError::Empty("model".to_string()));
    }

    if model.len() > MAX_MODEL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "model".to_string(),
            max: MAX_MODEL_LENGTH,
            actual: model.len(),
        });
    }

    Ok(())
}

/// Parse and range-check a sampling temperature.
///
/// Both interval endpoints are accepted.
pub fn parse_temperature(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Empty("temperature".to_string()));
    }

    let value: f64 = raw
        .parse()
        .map_err(|_| ValidationError::NotANumber(raw.to_string()))?;

    if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&value) {
        return Err(ValidationError::OutOfRange(value));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_model_valid() {
        assert!(validate_model("arcee-ai/trinity-mini:free").is_ok());
        assert!(validate_model(" deepseek/deepseek-r1-0528:free ").is_ok());
    }

    #[test]
    fn test_validate_model_invalid() {
        assert!(matches!(
            validate_model(""),
            Err(ValidationError::Empty(_))
        ));
        assert!(matches!(
            validate_model("   "),
            Err(ValidationError::Empty(_))
        ));

        let long_model = "a".repeat(100);
        assert!(matches!(
            validate_model(&long_model),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_temperature_boundaries() {
        assert_eq!(parse_temperature("0.0").unwrap(), 0.0);
        assert_eq!(parse_temperature("1.0").unwrap(), 1.0);
        assert_eq!(parse_temperature("0.7").unwrap(), 0.7);
        assert_eq!(parse_temperature(" 0.3 ").unwrap(), 0.3);
    }

    #[test]
    fn test_parse_temperature_out_of_range() {
        assert!(matches!(
            parse_temperature("1.5"),
            Err(ValidationError::OutOfRange(_))
        ));
        assert!(matches!(
            parse_temperature("-0.1"),
            Err(ValidationError::OutOfRange(_))
        ));
        assert!(matches!(
            parse_temperature("NaN"),
            Err(ValidationError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_temperature_not_a_number() {
        assert!(matches!(
            parse_temperature("warm"),
            Err(ValidationError::NotANumber(_))
        ));
        assert!(matches!(
            parse_temperature(""),
            Err(ValidationError::Empty(_))
        ));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::OutOfRange(1.5);
        assert_eq!(err.to_string(), "1.5 is outside the accepted range (0 to 1)");

        let err = ValidationError::TooLong {
            field: "model".to_string(),
            max: 64,
            actual: 100,
        };
        assert_eq!(err.to_string(), "model is too long (100 chars, max 64)");
    }
}
