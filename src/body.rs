use crate::error::PhysicsError;
use std::f32::consts::PI;
use ultraviolet::Vec2;

/// A dynamic circular rigid body: the craft or one piece of debris.
///
/// Mass, moment of inertia and radius are fixed at construction and are always
/// strictly positive. The kinematic state and the per-step loads are public and
/// mutated in place by the engine.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Position of the centre.
    pub position: Vec2,
    /// Linear velocity.
    pub velocity: Vec2,
    /// External force accumulated for the current step.
    pub force: Vec2,
    /// Orientation angle in radians.
    pub orientation: f32,
    /// Angular velocity in radians per second.
    pub angular_velocity: f32,
    /// External torque accumulated for the current step.
    pub torque: f32,
    mass: f32,
    moment_of_inertia: f32,
    radius: f32,
}

impl Body {
    /// Creates a body at rest with the given mass properties.
    /// Rejects non-positive (or non-finite) mass, moment of inertia or radius.
    pub fn new(
        position: Vec2,
        mass: f32,
        moment_of_inertia: f32,
        radius: f32,
    ) -> Result<Self, PhysicsError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !(valid(mass) && valid(moment_of_inertia) && valid(radius)) {
            return Err(PhysicsError::InvalidBodyParameters {
                mass,
                moment_of_inertia,
                radius,
            });
        }

        Ok(Self {
            position,
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            orientation: 0.0,
            angular_velocity: 0.0,
            torque: 0.0,
            mass,
            moment_of_inertia,
            radius,
        })
    }

    /// Creates a solid disc of the given radius and areal density.
    ///
    /// `mass = density * PI * r^2` and `moment_of_inertia = PI / 2 * r^4`; the
    /// density only scales the mass.
    pub fn from_density(position: Vec2, radius: f32, density: f32) -> Result<Self, PhysicsError> {
        let mass = density * PI * radius * radius;
        let moment_of_inertia = 0.5 * PI * radius.powi(4);
        Self::new(position, mass, moment_of_inertia, radius)
    }

    /// Builder-style setter for the initial linear velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder-style setter for the initial angular velocity.
    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn moment_of_inertia(&self) -> f32 {
        self.moment_of_inertia
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Adds to the force applied during the next step.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Adds to the torque applied during the next step.
    pub fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }

    /// Zeroes the accumulated force and torque.
    pub fn clear_loads(&mut self) {
        self.force = Vec2::zero();
        self.torque = 0.0;
    }

    fn is_finite(&self) -> bool {
        [
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y,
            self.orientation,
            self.angular_velocity,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Advances a copy of the body by `dt` with semi-implicit Euler: velocities
    /// are updated from the current loads first, then positions from the new
    /// velocities.
    ///
    /// Returns `None` when the loads are not finite or the result would
    /// overflow, so callers can reject the step before committing anything.
    pub(crate) fn advanced(&self, dt: f32) -> Option<Body> {
        let mut next = *self;
        next.velocity += self.force / self.mass * dt;
        next.position += next.velocity * dt;

        next.angular_velocity += self.torque / self.moment_of_inertia * dt;
        next.orientation += next.angular_velocity * dt;

        next.is_finite().then_some(next)
    }
}

/// Rejects timesteps that are zero, negative, NaN or infinite.
pub(crate) fn check_timestep(dt: f32) -> Result<(), PhysicsError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidTimestep(dt))
    }
}

/// Integrates a single body over `dt`.
///
/// Nothing is mutated when `dt` is invalid or the loads would drive the body
/// to a non-finite state.
pub fn integrate(body: &mut Body, dt: f32) -> Result<(), PhysicsError> {
    check_timestep(dt)?;
    *body = body.advanced(dt).ok_or_else(|| PhysicsError::NonFiniteLoad {
        body: "body".to_string(),
    })?;
    Ok(())
}
