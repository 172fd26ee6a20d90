use std::fmt;

/// Company input that is missing, malformed, or cannot be coerced.
///
/// This is the only way insight generation can fail; the engine itself never
/// panics on well-formed input, so callers map this straight to a client error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Option<&'static str>,
    pub detail: String,
}

impl ValidationError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            field: None,
            detail: detail.into(),
        }
    }

    pub fn for_field(field: &'static str, detail: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(f, "invalid {field}: {}", self.detail),
            None => write!(f, "invalid input: {}", self.detail),
        }
    }
}

impl std::error::Error for ValidationError {}
