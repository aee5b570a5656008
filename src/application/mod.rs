mod camera;
mod game;
mod game_run;
mod playback;
mod registry;
mod summary;

pub use camera::Camera;
pub use game::Game;
pub use game_run::{GameCycle, GameRun, RunState, StopHandle};
pub use playback::Playback;
pub use registry::RunRegistry;
pub use summary::{CycleSummary, RunSummary};
