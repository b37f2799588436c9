pub mod config;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod snake;

pub use config::GameConfig;
pub use engine::{GameEngine, Snapshot, TickOutcome};
pub use geometry::{GeometryError, GridGeometry, Point};
pub use snake::Direction;
