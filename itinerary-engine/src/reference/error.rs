//! Reference data error types.

use crate::domain::IataCode;

/// Errors from reference data lookups and loading.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReferenceError {
    /// No airport is known under this code
    #[error("airport {0} not found")]
    AirportNotFound(IataCode),

    /// No airline is known under this carrier code
    #[error("airline {0:?} not found")]
    AirlineNotFound(String),

    /// No aircraft model is known under this equipment code
    #[error("aircraft type {0:?} not found")]
    AircraftNotFound(String),

    /// Reference file could not be read
    #[error("failed to read reference data: {message}")]
    Io { message: String },

    /// Reference file is not valid JSON
    #[error("failed to parse reference data: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ReferenceError::AirportNotFound(IataCode::parse("XYZ").unwrap());
        assert_eq!(err.to_string(), "airport XYZ not found");

        let err = ReferenceError::AirlineNotFound("ZZ".into());
        assert_eq!(err.to_string(), "airline \"ZZ\" not found");

        let err = ReferenceError::Json {
            message: "expected value".into(),
        };
        assert!(err.to_string().contains("expected value"));
    }
}
