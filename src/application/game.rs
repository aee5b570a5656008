use std::sync::Arc;

use log::info;

use super::{GameRun, RunRegistry, RunSummary, StopHandle};
use crate::config::{GameConfig, validate_magnification, validate_max_frames};
use crate::domain::{Grid, UpdateExecutor};
use crate::error::Result;
use crate::imaging::ImageLoader;
use crate::rendering::Renderer;

/// Top-level coordinator: owns the configuration, the image loader and the
/// registry of finished runs. Shareable across threads; distinct runs are
/// computed concurrently and only meet at the registry.
pub struct Game {
    config: GameConfig,
    loader: Box<dyn ImageLoader>,
    registry: RunRegistry,
}

impl Game {
    pub fn new(config: GameConfig, loader: impl ImageLoader + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            loader: Box::new(loader),
            registry: RunRegistry::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn executor(&self) -> UpdateExecutor {
        UpdateExecutor::new(self.config.worker_count)
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.config.magnification, self.config.loop_count)
    }

    /// Build a run from `source`, play it to the end and register it.
    /// Nothing is registered if loading or any cycle fails.
    pub fn create_and_run(&self, name: &str, source: &str) -> Result<RunSummary> {
        let run = GameRun::create(name, source, self.loader.as_ref(), &self.config)?;
        self.play(run)
    }

    /// Like `create_and_run`, but the run checks `stop` before every cycle.
    /// A stopped run is still registered, in the `Stopped` state.
    pub fn create_and_run_with_stop(&self, name: &str, source: &str, stop: &StopHandle) -> Result<RunSummary> {
        let run = GameRun::create(name, source, self.loader.as_ref(), &self.config)?;
        self.play(run.with_stop_handle(stop.clone()))
    }

    /// Same as `create_and_run` for a grid built in code
    pub fn create_and_run_grid(&self, name: &str, source: &str, grid: Grid) -> Result<RunSummary> {
        self.play(GameRun::from_grid(name, source, grid, &self.config))
    }

    fn play(&self, mut run: GameRun) -> Result<RunSummary> {
        info!(
            "playing '{}' ({}x{}) for {} cycles",
            run.name(),
            run.dimensions().0,
            run.dimensions().1,
            run.max_cycles()
        );
        run.run(&self.executor())?;
        Ok(self.registry.insert(run).summary())
    }

    pub fn run(&self, name: &str) -> Result<Arc<GameRun>> {
        self.registry.get(name)
    }

    pub fn list_runs(&self) -> Vec<RunSummary> {
        self.registry.list().iter().map(|run| run.summary()).collect()
    }

    pub fn clear_runs(&self) -> usize {
        let cleared = self.registry.clear();
        info!("cleared {cleared} runs");
        cleared
    }

    /// PNG of frame `index` of run `name`
    pub fn get_frame(&self, name: &str, index: usize) -> Result<Vec<u8>> {
        self.get_frame_at(name, index, self.config.magnification)
    }

    pub fn get_frame_at(&self, name: &str, index: usize, magnification: u32) -> Result<Vec<u8>> {
        let run = self.registry.get(name)?;
        validate_magnification(magnification)?;
        self.renderer()
            .with_magnification(magnification)
            .render_run_frame(&run, index)
    }

    /// Looping GIF of up to `max_frames` frames of run `name`
    pub fn get_animation(&self, name: &str, max_frames: usize) -> Result<Vec<u8>> {
        self.get_animation_at(name, max_frames, self.config.magnification)
    }

    pub fn get_animation_at(&self, name: &str, max_frames: usize, magnification: u32) -> Result<Vec<u8>> {
        let run = self.registry.get(name)?;
        validate_max_frames(max_frames)?;
        validate_magnification(magnification)?;
        self.renderer()
            .with_magnification(magnification)
            .render_animation(&run, max_frames)
    }
}
