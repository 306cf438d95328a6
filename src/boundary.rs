use crate::body::Body;
use crate::error::PhysicsError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use ultraviolet::Vec2;

/// Axis-aligned rectangle that dynamic bodies are expected to stay inside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            min_x: -5.0,
            max_x: 5.0,
            min_y: -3.0,
            max_y: 3.0,
        }
    }
}

impl Arena {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Result<Self, PhysicsError> {
        let arena = Self {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        arena.validate()?;
        Ok(arena)
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        let finite = [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(PhysicsError::InvalidConfig(format!(
                "arena [{}, {}] x [{}, {}] is empty or not finite",
                self.min_x, self.max_x, self.min_y, self.max_y
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Whether `point` lies inside the closed rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }
}

/// Replaces the craft with a fresh copy of `spawn` when it has left the arena
/// through any side. Returns whether a reset happened.
pub fn reset_craft(craft: &mut Body, spawn: &Body, arena: &Arena) -> bool {
    if arena.contains(craft.position) {
        return false;
    }
    debug!(position = ?craft.position, "craft left the arena, respawning");
    *craft = *spawn;
    true
}

/// Teleports a debris body to the opposite edge on every axis it has crossed.
/// Velocity and angular state are kept. Returns whether anything moved.
pub fn wrap_debris(body: &mut Body, arena: &Arena) -> bool {
    let Vec2 { x, y } = body.position;
    let mut wrapped = false;

    if x < arena.min_x {
        body.position.x = arena.max_x;
        wrapped = true;
    }
    if x > arena.max_x {
        body.position.x = arena.min_x;
        wrapped = true;
    }
    if y < arena.min_y {
        body.position.y = arena.max_y;
        wrapped = true;
    }
    if y > arena.max_y {
        body.position.y = arena.min_y;
        wrapped = true;
    }

    if wrapped {
        trace!(from = ?Vec2::new(x, y), to = ?body.position, "debris wrapped");
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn() -> Body {
        Body::from_density(Vec2::new(-3.5, 0.0), 0.3, 5.0).unwrap()
    }

    fn debris(x: f32, y: f32) -> Body {
        Body::from_density(Vec2::new(x, y), 0.1, 30.0)
            .unwrap()
            .with_velocity(Vec2::new(0.3, -0.4))
            .with_angular_velocity(0.2)
    }

    #[test]
    fn rejects_empty_arena() {
        assert!(Arena::new(1.0, 1.0, 0.0, 1.0).is_err());
        assert!(Arena::new(0.0, 1.0, 2.0, -2.0).is_err());
        assert!(Arena::new(0.0, f32::NAN, 0.0, 1.0).is_err());
        assert!(Arena::new(-5.0, 5.0, -3.0, 3.0).is_ok());
    }

    #[test]
    fn craft_resets_from_every_side() {
        let arena = Arena::default();
        let spawn = spawn();
        let exits = [
            Vec2::new(-5.01, 0.0),
            Vec2::new(5.01, 0.0),
            Vec2::new(0.0, -3.01),
            Vec2::new(0.0, 3.01),
            Vec2::new(6.0, 4.0),
        ];

        for exit in exits {
            let mut craft = spawn.with_velocity(Vec2::new(2.0, 1.0)).with_angular_velocity(1.0);
            craft.position = exit;
            craft.orientation = 0.7;

            assert!(reset_craft(&mut craft, &spawn, &arena));
            assert_eq!(craft, spawn);
            assert_eq!(craft.velocity, Vec2::zero());
            assert_eq!(craft.angular_velocity, 0.0);
        }
    }

    #[test]
    fn craft_on_the_edge_stays() {
        let arena = Arena::default();
        let spawn = spawn();
        let mut craft = spawn.with_velocity(Vec2::new(1.0, 0.0));
        craft.position = Vec2::new(5.0, -3.0);
        let before = craft;

        assert!(!reset_craft(&mut craft, &spawn, &arena));
        assert_eq!(craft, before);
    }

    #[test]
    fn debris_wraps_past_max_x() {
        let arena = Arena::default();
        let mut body = debris(5.01, 1.0);
        let before = body;

        assert!(wrap_debris(&mut body, &arena));
        assert_eq!(body.position, Vec2::new(-5.0, 1.0));
        assert_eq!(body.velocity, before.velocity);
        assert_eq!(body.angular_velocity, before.angular_velocity);
    }

    #[test]
    fn debris_wraps_each_axis_independently() {
        let arena = Arena::default();

        let mut body = debris(-5.5, 2.0);
        wrap_debris(&mut body, &arena);
        assert_eq!(body.position, Vec2::new(5.0, 2.0));

        let mut body = debris(1.0, -3.2);
        wrap_debris(&mut body, &arena);
        assert_eq!(body.position, Vec2::new(1.0, 3.0));

        let mut body = debris(1.0, 3.2);
        wrap_debris(&mut body, &arena);
        assert_eq!(body.position, Vec2::new(1.0, -3.0));

        let mut body = debris(5.5, -3.5);
        wrap_debris(&mut body, &arena);
        assert_eq!(body.position, Vec2::new(-5.0, 3.0));
    }

    #[test]
    fn debris_inside_is_untouched() {
        let arena = Arena::default();
        let mut body = debris(4.99, -2.99);
        let before = body;
        assert!(!wrap_debris(&mut body, &arena));
        assert_eq!(body, before);
    }
}
