mod cell;
mod executor;
mod grid;
mod patterns;

pub use cell::Cell;
pub use executor::UpdateExecutor;
pub use grid::Grid;
pub use patterns::{Pattern, presets};
