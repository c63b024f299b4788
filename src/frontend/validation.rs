use std::fmt;

pub const TEMPERATURE_MIN: f64 = 0.5;
pub const TEMPERATURE_MAX: f64 = 5.0;
pub const NUMBER_TO_GENERATE_MIN: f64 = 1.0;
pub const NUMBER_TO_GENERATE_MAX: f64 = 15.0;

/// Why a form value was refused. `Display` yields the text shown in the field's label.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Missing { min: f64, max: f64 },
    OutOfRange { min: f64, max: f64, value: String },
    NotInteger { min: f64, max: f64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { min, max } => write!(
                f,
                "Value must be a number between {} and {}, and no value was provided at all!",
                min, max
            ),
            Self::OutOfRange { min, max, value } => write!(
                f,
                "Value must be a number between {} and {}, and {} does not meet those conditions",
                min, max, value
            ),
            Self::NotInteger { min, max } => {
                write!(f, "Please pass an integer between {} and {}", min, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

fn check_bounds(raw: &str, min: f64, max: f64) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing { min, max });
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && (min..=max).contains(&value) => Ok(value),
        _ => Err(ValidationError::OutOfRange {
            min,
            max,
            value: raw.to_string(),
        }),
    }
}

/// Accepts any number in `[0.5, 5]`.
pub fn validate_temperature(raw: &str) -> Result<f64, ValidationError> {
    check_bounds(raw, TEMPERATURE_MIN, TEMPERATURE_MAX)
}

/// Accepts whole numbers in `[1, 15]`; `3.0` counts as whole.
pub fn validate_number_to_generate(raw: &str) -> Result<u32, ValidationError> {
    let value = check_bounds(raw, NUMBER_TO_GENERATE_MIN, NUMBER_TO_GENERATE_MAX)?;
    if value.fract() != 0.0 {
        return Err(ValidationError::NotInteger {
            min: NUMBER_TO_GENERATE_MIN,
            max: NUMBER_TO_GENERATE_MAX,
        });
    }
    Ok(value as u32)
}
