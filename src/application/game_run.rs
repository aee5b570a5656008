use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant, SystemTime};

use image::ImageFormat;
use log::{debug, info, warn};
use serde::Serialize;

use super::summary::{CycleSummary, RunSummary, duration_ms, epoch_nanos};
use crate::config::GameConfig;
use crate::domain::{Grid, UpdateExecutor};
use crate::error::{GameError, Result};
use crate::imaging::{ImageLoader, PixelSource};

/// Lifecycle of a run. `Stopped` means a stop was requested before the
/// cycle budget was used up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Created,
    Running,
    Completed,
    Stopped,
}

/// Shared flag that asks a run to stop before its next cycle.
/// An in-flight cycle always finishes.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One generation transition. Immutable once recorded.
#[derive(Debug, Clone)]
pub struct GameCycle {
    run_name: Arc<str>,
    number: usize,
    worker_count: usize,
    started_at: SystemTime,
    ended_at: SystemTime,
    elapsed: Duration,
    before: Arc<Grid>,
    after: Arc<Grid>,
}

impl GameCycle {
    /// Name of the run this cycle belongs to
    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    /// 1-based position in the run's history
    pub const fn number(&self) -> usize {
        self.number
    }

    pub const fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub const fn started_at(&self) -> SystemTime {
        self.started_at
    }

    pub const fn ended_at(&self) -> SystemTime {
        self.ended_at
    }

    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn before(&self) -> &Grid {
        &self.before
    }

    pub fn after(&self) -> &Grid {
        &self.after
    }

    fn summary(&self, max_cycles: usize) -> CycleSummary {
        let started_at_ns = epoch_nanos(self.started_at);
        let ended_at_ns = epoch_nanos(self.ended_at);
        CycleSummary {
            cycle: self.number,
            started_at_ns,
            ended_at_ns,
            duration_ms: duration_ms(started_at_ns, ended_at_ns),
            worker_count: self.worker_count,
            max_cycles,
        }
    }
}

/// One play-through seeded from a single image.
///
/// Cycles only ever append. `current` is always a private copy of the latest
/// result, so history handed out through `frame` can never change under a reader.
#[derive(Debug)]
pub struct GameRun {
    name: Arc<str>,
    source: String,
    width: usize,
    height: usize,
    initial: Arc<Grid>,
    current: Grid,
    final_grid: Option<Grid>,
    cycles: Vec<GameCycle>,
    delay_10ms: u32,
    max_cycles: usize,
    state: RunState,
    started_at: Option<SystemTime>,
    ended_at: Option<SystemTime>,
    stop: StopHandle,
}

impl GameRun {
    /// Load `source`, check it is a PNG with RGB(A) pixels and threshold it into the initial grid.
    /// Nothing is built if any of that fails.
    pub fn create(name: &str, source: &str, loader: &dyn ImageLoader, config: &GameConfig) -> Result<Self> {
        let loaded = loader.load(source)?;
        info!("run '{name}': image kind {:?}", loaded.format);
        if loaded.format != ImageFormat::Png {
            return Err(GameError::Format {
                found: format!("{:?}", loaded.format).to_lowercase(),
            });
        }
        let grid = PixelSource::from_image(&loaded.image)?.to_grid();
        Ok(Self::from_grid(name, source, grid, config))
    }

    /// Start a run from an already built grid
    pub fn from_grid(name: &str, source: &str, initial: Grid, config: &GameConfig) -> Self {
        let (width, height) = initial.dimensions();
        Self {
            name: Arc::from(name),
            source: source.to_owned(),
            width,
            height,
            current: initial.clone(),
            initial: Arc::new(initial),
            final_grid: None,
            cycles: Vec::new(),
            delay_10ms: config.delay_10ms,
            max_cycles: config.max_cycles,
            state: RunState::Created,
            started_at: None,
            ended_at: None,
            stop: StopHandle::default(),
        }
    }

    /// Compute the next generation and record it.
    /// Does nothing once the run has finished.
    pub fn advance(&mut self, executor: &UpdateExecutor) -> Result<()> {
        self.advance_with(executor.workers(), |grid| executor.step(grid))
    }

    /// On failure the cycle is dropped and `current` keeps the last good grid.
    pub(crate) fn advance_with<F>(&mut self, worker_count: usize, step: F) -> Result<()>
    where
        F: FnOnce(&Grid) -> Result<Grid>,
    {
        if self.is_finished() {
            return Ok(());
        }
        if self.cycles.len() >= self.max_cycles {
            self.finish(RunState::Completed);
            return Ok(());
        }
        if self.state == RunState::Created {
            self.state = RunState::Running;
            self.started_at.get_or_insert_with(SystemTime::now);
        }

        let before = self
            .cycles
            .last()
            .map_or_else(|| Arc::clone(&self.initial), |c| Arc::clone(&c.after));

        let started_at = SystemTime::now();
        let clock = Instant::now();
        let after = Arc::new(step(before.as_ref())?);
        let elapsed = clock.elapsed();
        let ended_at = SystemTime::now();

        let cycle = GameCycle {
            run_name: Arc::clone(&self.name),
            number: self.cycles.len() + 1,
            worker_count,
            started_at,
            ended_at,
            elapsed,
            before,
            after,
        };
        debug!(
            "run '{}': cycle {} took {:.3}ms",
            self.name,
            cycle.number,
            elapsed.as_secs_f64() * 1000.0
        );
        self.current = cycle.after().clone();
        self.cycles.push(cycle);

        if self.cycles.len() >= self.max_cycles {
            self.finish(RunState::Completed);
        }
        Ok(())
    }

    /// Advance until the cycle budget is used up or a stop is requested.
    pub fn run(&mut self, executor: &UpdateExecutor) -> Result<()> {
        self.started_at.get_or_insert_with(SystemTime::now);
        while !self.is_finished() && self.cycles.len() < self.max_cycles {
            if self.stop.is_stopped() {
                warn!("run '{}': stopped after {} cycles", self.name, self.cycles.len());
                self.finish(RunState::Stopped);
                break;
            }
            self.advance(executor)?;
        }
        if !self.is_finished() {
            self.finish(RunState::Completed);
        }
        info!(
            "run '{}': total time {}ms, worker count {}",
            self.name,
            self.duration().as_millis(),
            executor.workers()
        );
        Ok(())
    }

    fn finish(&mut self, state: RunState) {
        self.state = state;
        self.final_grid = Some(self.current.clone());
        self.ended_at = Some(SystemTime::now());
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, RunState::Completed | RunState::Stopped)
    }

    /// Frame 0 is the initial grid, frame i is the result of cycle i
    pub fn frame(&self, index: usize) -> Result<&Grid> {
        match index {
            0 => Ok(self.initial.as_ref()),
            i => self
                .cycles
                .get(i - 1)
                .map(GameCycle::after)
                .ok_or(GameError::IndexOutOfRange {
                    index,
                    available: self.cycles.len(),
                }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Snapshot taken when the run finished
    pub fn final_grid(&self) -> Option<&Grid> {
        self.final_grid.as_ref()
    }

    pub fn cycles(&self) -> &[GameCycle] {
        &self.cycles
    }

    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    pub const fn delay_10ms(&self) -> u32 {
        self.delay_10ms
    }

    pub const fn max_cycles(&self) -> usize {
        self.max_cycles
    }

    pub const fn state(&self) -> RunState {
        self.state
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Share an existing stop flag so callers can stop the run from elsewhere
    pub fn with_stop_handle(mut self, stop: StopHandle) -> Self {
        self.stop = stop;
        self
    }

    /// Wall time from the first to the last cycle (zero until started)
    pub fn duration(&self) -> Duration {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => end.duration_since(start).unwrap_or_default(),
            _ => Duration::ZERO,
        }
    }

    pub fn summary(&self) -> RunSummary {
        let started_at_ns = self.started_at.map_or(0, epoch_nanos);
        let ended_at_ns = self.ended_at.map_or(0, epoch_nanos);
        RunSummary {
            name: self.name.to_string(),
            image_url: self.source.clone(),
            started_at_ns,
            ended_at_ns,
            duration_ms: duration_ms(started_at_ns, ended_at_ns),
            width: self.width,
            height: self.height,
            cycles: self.cycles.iter().map(|c| c.summary(self.max_cycles)).collect(),
            delay_10ms: self.delay_10ms,
            state: self.state,
        }
    }
}
