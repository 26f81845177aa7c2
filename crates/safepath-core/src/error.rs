//! Typed failures produced by the routing core.

use thiserror::Error;

/// Route computation failures. The core never substitutes a degraded
/// result for these; the caller decides the user-visible behavior.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// The vertex nearest to the start or end coordinate is absent from
    /// the pruned graph: pruning walled off the endpoint's neighborhood.
    #[error("start or end point is in a blocked area")]
    BlockedEndpoint,
    /// Both endpoints exist but no connecting path remains after pruning.
    #[error("no safe route exists between the given points")]
    NoPath,
}

/// Validation failures at the data-model boundary. These are rejected
/// before any graph work happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("hazard level {0} out of range [1, 10]")]
    LevelOutOfRange(u8),
    #[error("hazard radius {0}m out of range [1, 1000]")]
    RadiusOutOfRange(f64),
}
