/// Convenience result type used across schemaform.
pub type FormResult<T> = Result<T, FormError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FormError {
    /// Invalid user-provided schema or initial values.
    #[error("validation error: {0}")]
    Validation(String),

    /// An event that does not fit the form (unknown field, index out of range, wrong adapter).
    #[error("event error: {0}")]
    Event(String),

    /// A serialized tag payload that could not be parsed.
    #[error("payload error: {0}")]
    Payload(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FormError {
    /// Build a [`FormError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FormError::Event`] value.
    pub fn event(msg: impl Into<String>) -> Self {
        Self::Event(msg.into())
    }

    /// Build a [`FormError::Payload`] value.
    pub fn payload(msg: impl Into<String>) -> Self {
        Self::Payload(msg.into())
    }

    /// Build a [`FormError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
