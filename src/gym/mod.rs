pub mod grid_world;

pub use grid_world::{GridError, GridWorld, GridWorldConfig, Move, Pos};
