use crate::body::Body;
use crate::error::PhysicsError;
use tracing::{trace, warn};
use ultraviolet::Vec2;

/// Coefficient of restitution used by the default world.
pub const RESTITUTION: f32 = 0.9;

/// Normal used when two centres coincide and the line of centres is undefined.
pub const DEGENERATE_NORMAL: Vec2 = Vec2 { x: 1.0, y: 0.0 };

/// Rejects restitution coefficients outside `(0, 1]`.
pub(crate) fn check_restitution(restitution: f32) -> Result<(), PhysicsError> {
    if restitution > 0.0 && restitution <= 1.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidConfig(format!(
            "restitution {restitution} must lie in (0, 1]"
        )))
    }
}

/// Outcome of a resolved contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from `b` towards `a`.
    pub normal: Vec2,
    /// Penetration depth that was removed from `a`.
    pub overlap: f32,
    /// Scalar impulse `J` applied along the normal.
    pub impulse: f32,
    /// Whether the centres coincided and [`DEGENERATE_NORMAL`] was used.
    pub degenerate: bool,
}

/// Detects and resolves one circle-circle contact.
///
/// Returns `None` and leaves both bodies untouched when the circles are
/// apart. Otherwise only `a` is pushed out along the normal until the circles
/// touch, and a purely linear impulse is exchanged between the two velocities.
/// Angular state is never changed.
pub fn resolve(a: &mut Body, b: &mut Body, restitution: f32) -> Option<Contact> {
    let d = a.position - b.position;
    let dist = d.mag();
    let reach = a.radius() + b.radius();

    if dist > reach {
        return None;
    }

    let degenerate = dist == 0.0;
    let normal = if degenerate {
        warn!(position = ?a.position, "coincident centres, using fallback normal");
        DEGENERATE_NORMAL
    } else {
        d / dist
    };

    // Positional correction is one-sided: only `a` moves.
    let overlap = reach - dist;
    a.position += normal * overlap;

    let relative_velocity = a.velocity - b.velocity;
    let inverse_masses = 1.0 / a.mass() + 1.0 / b.mass();
    let impulse =
        -(1.0 + restitution) * relative_velocity.dot(normal) / (normal.dot(normal) * inverse_masses);

    a.velocity += normal * (impulse / a.mass());
    b.velocity -= normal * (impulse / b.mass());

    trace!(overlap, impulse, "resolved contact");

    Some(Contact {
        normal,
        overlap,
        impulse,
        degenerate,
    })
}

/// Borrows two distinct elements of a slice mutably, in the order `(i, j)`.
///
/// Panics if `i == j` or either index is out of bounds.
pub(crate) fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j, "pair_mut needs two distinct indices");
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
