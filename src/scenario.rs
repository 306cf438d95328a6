use crate::body::Body;
use crate::boundary::Arena;
use crate::error::PhysicsError;
use crate::world::SizeRange;
use ultraviolet::Vec2;

/// Source of uniform samples in `[0, 1)` used to build initial conditions.
///
/// Inject a seeded generator to get reproducible worlds.
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

impl RandomSource for fastrand::Rng {
    fn next_f32(&mut self) -> f32 {
        self.f32()
    }
}

/// Speed component in `[-0.5, -0.25] U [0.25, 0.5]`, or exactly zero when the
/// raw sample lands on the midpoint.
fn drift_component(rng: &mut impl RandomSource) -> f32 {
    let v = rng.next_f32() * 0.5 - 0.25;
    // f32::signum maps 0.0 to 1.0, so zero is handled separately.
    if v == 0.0 { 0.0 } else { v + v.signum() * 0.25 }
}

/// Generates `count` debris discs scattered uniformly over the arena.
///
/// Each body draws, in order: x, y, vx, vy, radius, angular velocity.
pub fn random_debris(
    rng: &mut impl RandomSource,
    count: usize,
    arena: &Arena,
    sizes: SizeRange,
    density: f32,
) -> Result<Vec<Body>, PhysicsError> {
    let mut debris = Vec::with_capacity(count);

    for _ in 0..count {
        let x = rng.next_f32() * arena.width() + arena.min_x;
        let y = rng.next_f32() * arena.height() + arena.min_y;
        let vx = drift_component(rng);
        let vy = drift_component(rng);
        let radius = rng.next_f32() * (sizes.max - sizes.min) + sizes.min;
        let spin = rng.next_f32() - 0.5;

        let body = Body::from_density(Vec2::new(x, y), radius, density)?
            .with_velocity(Vec2::new(vx, vy))
            .with_angular_velocity(spin);
        debris.push(body);
    }

    Ok(debris)
}
