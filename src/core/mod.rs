mod model_helpers;
mod models;
mod bounded_grid;
mod consts;
mod bounds;
mod engine;
mod error;
pub mod merge;
pub mod traversal;

pub use models::{Direction, MergeRule, MoveOutcome, Tile, Vec2};
pub use consts::*;
pub use bounds::BoundsOriginRoot;
pub use bounded_grid::BoundedGrid;
pub use engine::GameEngine;
pub use error::GameError;
