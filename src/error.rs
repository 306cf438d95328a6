use thiserror::Error;

/// Errors raised at the boundary of the physics core.
///
/// Every check runs before any body is mutated, so a rejected call leaves the
/// world exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("Invalid timestep: {0} (must be positive and finite)")]
    InvalidTimestep(f32),

    #[error(
        "Invalid body parameters: mass={mass}, moment_of_inertia={moment_of_inertia}, radius={radius}"
    )]
    InvalidBodyParameters {
        mass: f32,
        moment_of_inertia: f32,
        radius: f32,
    },

    #[error("Non-finite force or torque on {body}")]
    NonFiniteLoad { body: String },

    #[error("Invalid world configuration: {0}")]
    InvalidConfig(String),
}
