use crate::body::Body;
use crate::boundary::Arena;
use crate::collision::{self, RESTITUTION};
use crate::error::PhysicsError;
use crate::scenario::{self, RandomSource};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ultraviolet::Vec2;

/// Inclusive bounds for randomly drawn debris radii.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f32,
    pub max: f32,
}

/// Where and how the craft (re)appears.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CraftSpawn {
    pub position: Vec2,
    pub size: f32,
    pub density: f32,
}

impl CraftSpawn {
    /// A fresh craft at rest at the spawn point.
    pub fn body(&self) -> Result<Body, PhysicsError> {
        Body::from_density(self.position, self.size, self.density)
    }
}

/// Static, non-simulated marker. Never integrated and never collided with.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecorativeMarker {
    pub position: Vec2,
    pub size: f32,
}

/// Everything needed to build a [`World`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub arena: Arena,
    pub debris_count: usize,
    pub debris_sizes: SizeRange,
    /// Areal density of debris bodies.
    pub density: f32,
    pub craft_spawn: CraftSpawn,
    pub marker: DecorativeMarker,
    pub restitution: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            debris_count: 20,
            debris_sizes: SizeRange { min: 0.08, max: 0.3 },
            density: 30.0,
            craft_spawn: CraftSpawn {
                position: Vec2::new(-3.5, 0.0),
                size: 0.3,
                density: 5.0,
            },
            marker: DecorativeMarker {
                position: Vec2::new(3.5, 1.5),
                size: 0.5,
            },
            restitution: RESTITUTION,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        self.arena.validate()?;

        let SizeRange { min, max } = self.debris_sizes;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(PhysicsError::InvalidConfig(format!(
                "debris size range [{min}, {max}] must be positive and ordered"
            )));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "debris density {} must be positive",
                self.density
            )));
        }
        collision::check_restitution(self.restitution)?;
        if !(self.marker.size.is_finite() && self.marker.size > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "marker size {} must be positive",
                self.marker.size
            )));
        }
        self.craft_spawn.body()?;
        Ok(())
    }
}

/// The whole simulated scene, owned by the caller and threaded through
/// [`crate::simulation::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub arena: Arena,
    pub craft: Body,
    /// Debris in insertion order; the order drives collision resolution.
    pub debris: Vec<Body>,
    pub marker: DecorativeMarker,
    pub restitution: f32,
    craft_spawn: Body,
}

impl World {
    /// Assembles a world from explicit bodies. The craft starts at its spawn state.
    pub fn new(
        arena: Arena,
        craft_spawn: Body,
        debris: Vec<Body>,
        marker: DecorativeMarker,
        restitution: f32,
    ) -> Result<Self, PhysicsError> {
        arena.validate()?;
        collision::check_restitution(restitution)?;
        Ok(Self {
            arena,
            craft: craft_spawn,
            debris,
            marker,
            restitution,
            craft_spawn,
        })
    }

    /// The body the craft is reset to when it leaves the arena.
    pub fn craft_spawn(&self) -> &Body {
        &self.craft_spawn
    }
}

/// Builds a populated world from `config`, drawing debris from `rng`.
pub fn create_world(
    config: &WorldConfig,
    rng: &mut impl RandomSource,
) -> Result<World, PhysicsError> {
    config.validate()?;

    let craft_spawn = config.craft_spawn.body()?;
    let debris = scenario::random_debris(
        rng,
        config.debris_count,
        &config.arena,
        config.debris_sizes,
        config.density,
    )?;

    debug!(debris = debris.len(), "world created");

    World::new(
        config.arena,
        craft_spawn,
        debris,
        config.marker,
        config.restitution,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_scene() {
        let config = WorldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debris_count, 20);
        assert_eq!(config.restitution, 0.9);
        assert_eq!(config.arena, Arena::new(-5.0, 5.0, -3.0, 3.0).unwrap());
    }

    #[test]
    fn create_world_places_craft_at_spawn() {
        let config = WorldConfig::default();
        let world = create_world(&config, &mut fastrand::Rng::with_seed(1)).unwrap();

        assert_eq!(world.debris.len(), 20);
        assert_eq!(world.craft, *world.craft_spawn());
        assert_eq!(world.craft.position, Vec2::new(-3.5, 0.0));
        assert_eq!(world.craft.velocity, Vec2::zero());
        assert_eq!(world.marker.position, Vec2::new(3.5, 1.5));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut rng = fastrand::Rng::with_seed(1);

        let mut config = WorldConfig::default();
        config.debris_sizes = SizeRange { min: 0.3, max: 0.1 };
        assert!(matches!(
            create_world(&config, &mut rng),
            Err(PhysicsError::InvalidConfig(_))
        ));

        let mut config = WorldConfig::default();
        config.restitution = 1.5;
        assert!(create_world(&config, &mut rng).is_err());

        let mut config = WorldConfig::default();
        config.craft_spawn.size = 0.0;
        assert!(matches!(
            create_world(&config, &mut rng),
            Err(PhysicsError::InvalidBodyParameters { .. })
        ));

        let mut config = WorldConfig::default();
        config.arena.max_x = -10.0;
        assert!(create_world(&config, &mut rng).is_err());
    }

    #[test]
    fn explicit_world_checks_restitution_and_arena() {
        let spawn = WorldConfig::default().craft_spawn.body().unwrap();
        let marker = WorldConfig::default().marker;

        assert!(World::new(Arena::default(), spawn, vec![], marker, 0.9).is_ok());
        assert!(matches!(
            World::new(Arena::default(), spawn, vec![], marker, 1.5),
            Err(PhysicsError::InvalidConfig(_))
        ));
        let flat = Arena {
            min_y: 1.0,
            max_y: 1.0,
            ..Arena::default()
        };
        assert!(World::new(flat, spawn, vec![], marker, 0.9).is_err());
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let config: WorldConfig =
            serde_json::from_str(r#"{ "debris_count": 3, "restitution": 1.0 }"#).unwrap();
        assert_eq!(config.debris_count, 3);
        assert_eq!(config.restitution, 1.0);
        assert_eq!(config.density, 30.0);
        assert_eq!(config.craft_spawn, WorldConfig::default().craft_spawn);
    }
}
