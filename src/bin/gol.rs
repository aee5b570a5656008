//! Headless front end: play one run, export frames and print its summary.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use image_life::cli::RunArgs;

#[derive(Debug, Parser)]
#[command(author, version, about = "Play the game of Life on a grid seeded from a PNG image")]
struct Cli {
    #[command(flatten)]
    run: RunArgs,
    /// Write frame N as a PNG (repeatable)
    #[arg(long = "frame", value_name = "N")]
    frames: Vec<usize>,
    /// Write the run as an animated GIF
    #[arg(long)]
    gif: bool,
    /// Frame cap for the GIF (defaults to the configured max_frames)
    #[arg(long, value_name = "COUNT")]
    max_frames: Option<usize>,
    /// Directory generated images are saved into
    #[arg(short = 'o', long, default_value = ".")]
    out_dir: PathBuf,
    /// Print the run summary as JSON
    #[arg(long)]
    report: bool,
    /// Save the effective configuration as YAML
    #[arg(long, value_name = "FILE")]
    save_config: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (game, summary) = cli.run.play().context("failed to play run")?;
    let name = &summary.name;

    if let Some(path) = &cli.save_config {
        game.config().to_yaml(path).with_context(|| format!("failed to save {path}"))?;
    }

    if !cli.frames.is_empty() || cli.gif {
        fs::create_dir_all(&cli.out_dir)
            .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;
    }

    for &index in &cli.frames {
        let png = game.get_frame(name, index)?;
        let path = cli.out_dir.join(format!("Image_{name}_{index}.png"));
        fs::write(&path, &png).with_context(|| format!("failed to write {}", path.display()))?;
        info!("saved {} ({} bytes)", path.display(), png.len());
    }

    if cli.gif {
        let max_frames = cli.max_frames.unwrap_or(game.config().max_frames);
        let gif = game.get_animation(name, max_frames)?;
        let path = cli.out_dir.join(format!("Image_{name}.gif"));
        fs::write(&path, &gif).with_context(|| format!("failed to write {}", path.display()))?;
        info!("saved {} ({} bytes)", path.display(), gif.len());
    }

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{name}: {}x{}, {} cycles in {}ms",
            summary.width,
            summary.height,
            summary.cycles.len(),
            summary.duration_ms
        );
    }
    Ok(())
}
