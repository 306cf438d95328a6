pub mod body;
pub mod boundary;
pub mod collision;
pub mod error;
pub mod scenario;
pub mod simulation;
pub mod world;
pub mod c_api;

pub use body::{Body, integrate};
pub use boundary::Arena;
pub use collision::{Contact, RESTITUTION, resolve};
pub use error::PhysicsError;
pub use scenario::RandomSource;
pub use simulation::{Simulation, step};
pub use world::{World, WorldConfig, create_world};
pub use ultraviolet;
