//! One-generation update step, fanned out over scoped worker threads.
//!
//! The rows of the "before" grid are split into contiguous bands, one per
//! worker. Every worker reads the shared, immutable "before" grid and writes
//! only into its own band of the freshly allocated "after" storage, so no
//! locking is needed. Joining the scope is the barrier: the "after" grid is
//! only handed out once every band has been written.

use std::ops::Range;
use std::thread;

use log::warn;

use super::{Cell, Grid};
use crate::error::{GameError, Result};

/// Computes generation transitions with a fixed number of worker threads.
/// Threads are spawned per generation; nothing is kept alive between calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateExecutor {
    workers: usize,
}

impl Default for UpdateExecutor {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl UpdateExecutor {
    /// Non-positive worker counts fall back to a single worker
    pub fn new(worker_count: i32) -> Self {
        Self {
            workers: usize::try_from(worker_count).unwrap_or(0).max(1),
        }
    }

    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Split `height` rows into `workers` contiguous ranges that cover every
    /// row exactly once. The first `height % workers` ranges get one extra row;
    /// when there are more workers than rows the trailing ranges are empty.
    pub fn partition_rows(height: usize, workers: usize) -> Vec<Range<usize>> {
        let workers = workers.max(1);
        let base = height / workers;
        let extra = height % workers;

        let mut start = 0;
        (0..workers)
            .map(|i| {
                let len = base + usize::from(i < extra);
                let rows = start..start + len;
                start += len;
                rows
            })
            .collect()
    }

    /// Compute the next generation of `before` into a new grid.
    pub fn step(&self, before: &Grid) -> Result<Grid> {
        self.step_with(before, next_row)
    }

    /// Run `kernel` for every row of `before`, each worker filling its own band.
    /// If any worker panics the partially written grid is dropped.
    pub(crate) fn step_with<F>(&self, before: &Grid, kernel: F) -> Result<Grid>
    where
        F: Fn(&Grid, usize, &mut [Cell]) + Sync,
    {
        let (width, height) = before.dimensions();
        let mut cells = vec![Cell::Dead; width * height];
        let bands = Self::partition_rows(height, self.workers);
        let kernel = &kernel;

        let failed = thread::scope(|scope| {
            let mut rest: &mut [Cell] = &mut cells;
            let mut handles = Vec::with_capacity(bands.len());

            for (worker, rows) in bands.into_iter().enumerate() {
                if rows.is_empty() {
                    continue;
                }
                let (band, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * width);
                rest = tail;

                let handle = scope.spawn(move || {
                    for (offset, y) in rows.enumerate() {
                        kernel(before, y, &mut band[offset * width..(offset + 1) * width]);
                    }
                });
                handles.push((worker, handle));
            }

            // Join everything before reporting so no worker outlives the scope unobserved
            handles
                .into_iter()
                .filter_map(|(worker, handle)| handle.join().err().map(|_| worker))
                .min()
        });

        if let Some(worker) = failed {
            warn!("worker {worker} panicked, discarding generation");
            return Err(GameError::WorkerFailed { worker });
        }
        Ok(Grid::from_cells(width, height, cells))
    }
}

/// Apply the life rule to one row of `before`
fn next_row(before: &Grid, y: usize, out: &mut [Cell]) {
    for (x, cell) in out.iter_mut().enumerate() {
        let current = before.get(x as isize, y as isize);
        *cell = current.evolve(before.live_neighbors(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_total_coverage(height: usize, workers: usize) {
        let bands = UpdateExecutor::partition_rows(height, workers);
        assert_eq!(bands.len(), workers.max(1));
        let mut next = 0;
        for band in &bands {
            assert_eq!(band.start, next, "gap or overlap for h={height} w={workers}");
            next = band.end;
        }
        assert_eq!(next, height, "rows left over for h={height} w={workers}");
    }

    #[test]
    fn test_partition_covers_every_row_once() {
        for height in 0..40 {
            for workers in 1..12 {
                assert_total_coverage(height, workers);
            }
        }
    }

    #[test]
    fn test_partition_balances_remainder() {
        // The rounding formula (h + w/2) / w would drop the last row here
        let bands = UpdateExecutor::partition_rows(10, 4);
        assert_eq!(bands, vec![0..3, 3..6, 6..8, 8..10]);

        let bands = UpdateExecutor::partition_rows(2, 5);
        assert_eq!(bands.iter().filter(|b| !b.is_empty()).count(), 2);
    }

    #[test]
    fn test_non_positive_workers_default_to_one() {
        assert_eq!(UpdateExecutor::new(0).workers(), 1);
        assert_eq!(UpdateExecutor::new(-5).workers(), 1);
        assert_eq!(UpdateExecutor::new(6).workers(), 6);
    }

    #[test]
    fn test_dead_grid_stays_dead() {
        for (w, h) in [(1, 1), (7, 3), (16, 16)] {
            let next = UpdateExecutor::new(3).step(&Grid::new(w, h)).unwrap();
            assert_eq!(next.dimensions(), (w, h));
            assert_eq!(next.count_alive(), 0);
        }
    }

    #[test]
    fn test_lonely_center_dies() {
        let grid = Grid::from_rows(&["...", ".#.", "..."]);
        let next = UpdateExecutor::new(1).step(&grid).unwrap();
        assert_eq!(next, Grid::new(3, 3));
    }

    #[test]
    fn test_neighbor_rule_cases() {
        // Live cell with 2 neighbors survives, with 1 dies; dead cell with 3 is born
        let grid = Grid::from_rows(&[
            "#.#..",
            ".#...",
            ".....",
            "##...",
            "#....",
        ]);
        let next = UpdateExecutor::new(2).step(&grid).unwrap();
        assert_eq!(next.get(1, 1), Cell::Alive); // alive with 2 neighbors
        assert_eq!(next.get(1, 0), Cell::Alive); // dead with 3 neighbors
        assert_eq!(next.get(0, 0), Cell::Dead); // alive with 1 neighbor
        assert_eq!(next.get(0, 3), Cell::Alive); // alive with 2 neighbors
        assert_eq!(next.get(1, 4), Cell::Alive); // dead with 3 neighbors
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = presets::blinker().centered_in(5, 5);
        let executor = UpdateExecutor::new(2);

        let vertical = executor.step(&horizontal).unwrap();
        assert_eq!(vertical, Grid::from_rows(&[".....", "..#..", "..#..", "..#..", "....."]));

        let back = executor.step(&vertical).unwrap();
        assert_eq!(back, horizontal);
    }

    #[test]
    fn test_block_is_still() {
        let block = presets::block().centered_in(6, 6);
        assert_eq!(UpdateExecutor::new(4).step(&block).unwrap(), block);
    }

    #[test]
    fn test_result_independent_of_worker_count() {
        let grid = Grid::new(37, 23).randomize(&mut StdRng::seed_from_u64(42), 0.35);
        let reference = UpdateExecutor::new(1).step(&grid).unwrap().to_bytes();

        for workers in [2, 5, 7, 23, 64] {
            let next = UpdateExecutor::new(workers).step(&grid).unwrap();
            assert_eq!(next.to_bytes(), reference, "worker count {workers} diverged");
        }
    }

    #[test]
    fn test_bottom_rows_are_computed() {
        // Blinker in the last rows must oscillate whatever the split
        let mut grid = Grid::new(5, 7);
        presets::blinker().place_on(&mut grid, 1, 5);
        for workers in 1..=7 {
            let next = UpdateExecutor::new(workers).step(&grid).unwrap();
            assert_eq!(next.get(2, 6), Cell::Alive, "workers={workers}");
            assert_eq!(next.get(2, 4), Cell::Alive, "workers={workers}");
            assert_eq!(next.count_alive(), 3);
        }
    }

    #[test]
    fn test_worker_panic_fails_generation() {
        let grid = Grid::new(4, 8);
        let result = UpdateExecutor::new(4).step_with(&grid, |before, y, out| {
            if y == 3 {
                panic!("injected failure");
            }
            next_row(before, y, out);
        });
        assert!(matches!(result, Err(GameError::WorkerFailed { worker: 1 })));
    }
}
