// Domain layer - Core business logic
pub mod domain;

// Application layer - Runs, registry and coordination
pub mod application;

// Infrastructure layer - Image I/O, rendering, input, configuration
pub mod imaging;
pub mod rendering;
pub mod input;
pub mod config;
pub mod error;
pub mod cli;

// Re-exports for convenience
pub use domain::{Cell, Grid, Pattern, UpdateExecutor, presets};
pub use application::{Game, GameCycle, GameRun, RunState, RunSummary};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use rendering::Renderer;
