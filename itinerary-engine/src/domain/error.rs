//! Domain error types.
//!
//! These errors represent invariant violations when assembling resolved
//! entities. They are distinct from provider and transport errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Invalid leg construction (e.g., legs out of order)
    #[error("invalid leg: {0}")]
    InvalidLeg(&'static str),

    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,
}
