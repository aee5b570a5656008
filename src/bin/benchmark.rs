//! Cycle timings for the same run across worker counts 1, 2, 4 ... 64

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use image_life::imaging::FileLoader;
use image_life::{Game, GameConfig, Grid};

#[derive(Debug, Parser)]
#[command(about = "Compare generation times across worker counts")]
struct Args {
    /// Seed the run from this PNG instead of a random grid
    #[arg(short = 'u', long = "url")]
    source: Option<String>,
    /// Random grid sizes (square) to time
    #[arg(long, value_delimiter = ',', default_values_t = [100, 500, 1000, 2000])]
    sizes: Vec<usize>,
    /// Generations per run
    #[arg(long, default_value_t = 20)]
    cycles: usize,
    /// Highest worker count (doubling from 1)
    #[arg(long, default_value_t = 64)]
    max_workers: i32,
    /// Print every cycle's start, end and elapsed time
    #[arg(long)]
    report: bool,
}

fn worker_counts(max: i32) -> Vec<i32> {
    std::iter::successors(Some(1_i32), |w| w.checked_mul(2))
        .take_while(|&w| w <= max.max(1))
        .collect()
}

/// Play one run per worker count and print average ms per generation.
/// Final grids are compared against the single-worker result.
fn time_workers(args: &Args, label: &str, seed: &dyn Fn(&Game) -> image_life::Result<()>) -> Result<()> {
    let mut reference: Option<Grid> = None;
    print!("{label:>12}");

    for workers in worker_counts(args.max_workers) {
        let config = GameConfig {
            worker_count: workers,
            max_cycles: args.cycles,
            ..GameConfig::default()
        };
        let game = Game::new(config, FileLoader)?;
        seed(&game)?;
        let run = game.run("bench")?;

        let total: f64 = run.cycles().iter().map(|c| c.elapsed().as_secs_f64()).sum();
        let per_gen_ms = total * 1000.0 / run.cycle_count().max(1) as f64;

        let final_grid = run.final_grid().cloned().context("run did not finish")?;
        let expected = reference.get_or_insert_with(|| final_grid.clone());
        let matches = *expected == final_grid;
        print!(" {per_gen_ms:>9.2}{}", if matches { " " } else { "!" });

        if args.report {
            println!();
            for cycle in run.cycles() {
                println!(
                    "    workers {workers:>2} cycle {:>3}: {:.3}ms",
                    cycle.number(),
                    cycle.elapsed().as_secs_f64() * 1000.0
                );
            }
        }
    }
    println!();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cpus = std::thread::available_parallelism().map_or(1, |n| n.get());
    println!("=== Generation time (ms) by worker count, {cpus} CPUs ===\n");
    print!("{:>12}", "Grid");
    for workers in worker_counts(args.max_workers) {
        print!(" {:>9} ", format!("{workers}w"));
    }
    println!();
    println!("{:-<1$}", "", 12 + 11 * worker_counts(args.max_workers).len());

    match &args.source {
        Some(source) => {
            time_workers(&args, "image", &|game| game.create_and_run("bench", source).map(drop))?;
        }
        None => {
            for &size in &args.sizes {
                let grid = Grid::new(size, size).randomize(&mut StdRng::seed_from_u64(size as u64), 0.3);
                let label = format!("{size}x{size}");
                time_workers(&args, &label, &|game| {
                    game.create_and_run_grid("bench", "random", grid.clone()).map(drop)
                })?;
            }
        }
    }
    println!("\n'!' marks a final grid that differs from the single-worker run");
    Ok(())
}
