use crate::{
    body::{self, Body},
    boundary,
    collision::{self, pair_mut},
    error::PhysicsError,
    world::{self, World, WorldConfig},
};

use tracing::trace;

/// One resolver call scheduled during a step.
///
/// In a craft/debris pair the debris body is the one that gets repositioned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollisionPair {
    CraftDebris(usize),
    DebrisDebris(usize, usize),
}

/// The exact sequence of resolver calls for `n` debris bodies.
///
/// First a pass of craft against every debris body, then a nested pass in
/// which each `i < n - 1` is resolved against the craft once more before all
/// `j > i`. The repeat of the craft pair is part of the single-pass solver's
/// behaviour and changes outcomes, so it is kept.
pub fn collision_pairs(n: usize) -> impl Iterator<Item = CollisionPair> {
    let first = (0..n).map(CollisionPair::CraftDebris);
    let nested = (0..n.saturating_sub(1)).flat_map(move |i| {
        std::iter::once(CollisionPair::CraftDebris(i))
            .chain((i + 1..n).map(move |j| CollisionPair::DebrisDebris(i, j)))
    });
    first.chain(nested)
}

/// Advances `world` by one frame of length `dt`.
///
/// Order: integrate craft then debris, resolve collisions in
/// [`collision_pairs`] order, apply boundary rules to craft then debris, and
/// finally clear every body's force and torque. Input is validated up front;
/// on error nothing has been mutated.
pub fn step(world: &mut World, dt: f32) -> Result<(), PhysicsError> {
    body::check_timestep(dt)?;
    collision::check_restitution(world.restitution)?;

    let craft = world
        .craft
        .advanced(dt)
        .ok_or_else(|| PhysicsError::NonFiniteLoad {
            body: "craft".to_string(),
        })?;
    let debris = world
        .debris
        .iter()
        .enumerate()
        .map(|(index, body)| {
            body.advanced(dt).ok_or_else(|| PhysicsError::NonFiniteLoad {
                body: format!("debris {index}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    world.craft = craft;
    world.debris = debris;

    let restitution = world.restitution;
    for pair in collision_pairs(world.debris.len()) {
        match pair {
            CollisionPair::CraftDebris(i) => {
                collision::resolve(&mut world.debris[i], &mut world.craft, restitution);
            }
            CollisionPair::DebrisDebris(i, j) => {
                let (a, b) = pair_mut(&mut world.debris, i, j);
                collision::resolve(a, b, restitution);
            }
        }
    }

    let arena = world.arena;
    let spawn = *world.craft_spawn();
    boundary::reset_craft(&mut world.craft, &spawn, &arena);
    let wrapped = world
        .debris
        .iter_mut()
        .map(|body| boundary::wrap_debris(body, &arena))
        .filter(|&wrapped| wrapped)
        .count();

    world.craft.clear_loads();
    world.debris.iter_mut().for_each(Body::clear_loads);

    trace!(dt, wrapped, "step complete");
    Ok(())
}

/// Fixed-timestep driver around a [`World`], for callers that just want to
/// tick once per rendered frame.
#[derive(Debug)]
pub struct Simulation {
    /// Time step per frame.
    pub dt: f32,
    /// Number of completed steps.
    pub frame: usize,
    /// The simulated scene.
    pub world: World,
    config: WorldConfig,
}

impl Simulation {
    /// Default constants.
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;
    pub const DEFAULT_SEED: u64 = 0;

    /// The default scene with the default seed.
    pub fn new() -> Result<Self, PhysicsError> {
        Self::with_config(WorldConfig::default(), Self::DEFAULT_DT, Self::DEFAULT_SEED)
    }

    /// Builds a scene from `config`, seeding debris with `seed`.
    pub fn with_config(config: WorldConfig, dt: f32, seed: u64) -> Result<Self, PhysicsError> {
        body::check_timestep(dt)?;
        let world = world::create_world(&config, &mut fastrand::Rng::with_seed(seed))?;
        Ok(Self {
            dt,
            frame: 0,
            world,
            config,
        })
    }

    /// Rebuilds the world from the stored config with a new seed.
    pub fn reset(&mut self, seed: u64) -> Result<(), PhysicsError> {
        self.world = world::create_world(&self.config, &mut fastrand::Rng::with_seed(seed))?;
        self.frame = 0;
        Ok(())
    }

    /// Changes the fixed timestep, keeping the old one if `dt` is invalid.
    pub fn set_dt(&mut self, dt: f32) -> Result<(), PhysicsError> {
        body::check_timestep(dt)?;
        self.dt = dt;
        Ok(())
    }

    /// Advances the simulation by one step of `self.dt`.
    pub fn step(&mut self) -> Result<(), PhysicsError> {
        step(&mut self.world, self.dt)?;
        self.frame += 1;
        Ok(())
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }
}
