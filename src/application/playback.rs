use std::sync::Arc;

use super::GameRun;
use crate::domain::Grid;

/// Playback walks through the recorded frames of a finished run.
/// Like the rest of the viewer state it is updated by value.
pub struct Playback {
    pub run: Arc<GameRun>,
    pub index: usize,
    pub is_playing: bool,
    pub timer: f32,
    /// Playback speed multiplier applied to the run's frame delay
    pub speed: f32,
}

impl Playback {
    pub fn new(run: Arc<GameRun>) -> Self {
        Self {
            run,
            index: 0,
            is_playing: true,
            timer: 0.0,
            speed: 1.0,
        }
    }

    /// Frames available: initial grid plus one per cycle
    pub fn frame_count(&self) -> usize {
        self.run.cycle_count() + 1
    }

    pub fn frame(&self) -> &Grid {
        // index is kept inside 0..frame_count
        self.run.frame(self.index).unwrap_or_else(|_| self.run.initial())
    }

    /// Seconds each frame stays on screen at the current speed
    pub fn frame_seconds(&self) -> f32 {
        (self.run.delay_10ms() as f32 / 100.0 / self.speed).max(0.01)
    }

    pub fn toggle_playing(mut self) -> Self {
        self.is_playing = !self.is_playing;
        self
    }

    pub fn step_forward(mut self) -> Self {
        self.index = (self.index + 1) % self.frame_count();
        self.timer = 0.0;
        self
    }

    pub fn step_back(mut self) -> Self {
        self.index = self.index.checked_sub(1).unwrap_or(self.frame_count() - 1);
        self.timer = 0.0;
        self
    }

    pub fn restart(mut self) -> Self {
        self.index = 0;
        self.timer = 0.0;
        self
    }

    pub fn adjust_speed(mut self, factor: f32) -> Self {
        self.speed = (self.speed * factor).clamp(0.125, 16.0);
        self
    }

    /// Advance the clock by `delta_time` seconds, looping back to frame 0 at the end
    pub fn tick(mut self, delta_time: f32) -> Self {
        if !self.is_playing {
            return self;
        }
        self.timer += delta_time;
        if self.timer >= self.frame_seconds() {
            self = self.step_forward();
        }
        self
    }
}
