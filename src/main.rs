use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::error;
use macroquad::prelude::*;

use image_life::{
    GameRun,
    application::Playback,
    cli::RunArgs,
    input,
    rendering::screen,
};

/// Play a run seeded from an image and watch it frame by frame
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct ViewerArgs {
    #[command(flatten)]
    run: RunArgs,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Game of Life - Run Viewer".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

/// Compute the whole run up front; the window only replays history
fn prepare(args: &ViewerArgs) -> anyhow::Result<Arc<GameRun>> {
    let (game, summary) = args.run.play().context("failed to play run")?;
    game.run(&summary.name).context("run vanished from registry")
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let args = ViewerArgs::parse();

    let run = match prepare(&args) {
        Ok(run) => run,
        Err(e) => {
            error!("{e:#}");
            return;
        }
    };

    let mut playback = Playback::new(run);
    let mut camera = input::fit_camera(&playback);

    loop {
        let mouse_pos = mouse_position();

        input::handle_zoom(&mut camera);
        input::handle_pan(&mut camera, mouse_pos);
        playback = input::process_keyboard_input(playback, &mut camera);
        playback = playback.tick(get_frame_time());

        clear_background(Color::from_rgba(15, 15, 15, 255));
        screen::draw_grid(playback.frame(), &camera);
        screen::draw_panel(&playback, &camera);

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        next_frame().await;
    }
}
