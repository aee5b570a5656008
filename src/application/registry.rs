use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::GameRun;
use crate::error::{GameError, Result};

/// Finished runs by name. Every access goes through the one mutex.
#[derive(Debug, Default)]
pub struct RunRegistry {
    runs: Mutex<HashMap<String, Arc<GameRun>>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // The map stays consistent even if a holder panicked, so poisoning is ignored
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<GameRun>>> {
        self.runs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a run, replacing any run with the same name
    pub fn insert(&self, run: GameRun) -> Arc<GameRun> {
        let run = Arc::new(run);
        self.lock().insert(run.name().to_owned(), Arc::clone(&run));
        run
    }

    pub fn get(&self, name: &str) -> Result<Arc<GameRun>> {
        self.lock()
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::NotFound { name: name.to_owned() })
    }

    /// All runs, ordered by name
    pub fn list(&self) -> Vec<Arc<GameRun>> {
        let mut runs: Vec<_> = self.lock().values().cloned().collect();
        runs.sort_by(|a, b| a.name().cmp(b.name()));
        runs
    }

    /// Drop every run, returning how many there were
    pub fn clear(&self) -> usize {
        let mut runs = self.lock();
        let count = runs.len();
        runs.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
