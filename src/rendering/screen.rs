//! On-screen drawing for the interactive viewer.

use macroquad::prelude::*;

use crate::application::{Camera, Playback};
use crate::domain::Grid;

pub const PANEL_WIDTH: f32 = 200.0;
pub const CELL_SIZE: f32 = 10.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the grid area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the grid area
pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Draw the current frame with camera support
pub fn draw_grid(grid: &Grid, camera: &Camera) {
    let cell_size = CELL_SIZE * camera.zoom;
    let (grid_width, grid_height) = grid.dimensions();
    let area_width = grid_area_width();
    let area_height = grid_area_height();

    let (min_x, min_y, max_x, max_y) = camera.visible_bounds(area_width, area_height, CELL_SIZE);

    // Clamp to grid bounds
    let start_x = min_x.max(0) as usize;
    let start_y = min_y.max(0) as usize;
    let end_x = (max_x + 1).clamp(0, grid_width as i32) as usize;
    let end_y = (max_y + 1).clamp(0, grid_height as i32) as usize;

    // Dead cells white, live cells black, same as exported images
    let (origin_x, origin_y) = camera.grid_to_screen(0, 0, CELL_SIZE);
    draw_rectangle(
        origin_x,
        origin_y,
        grid_width as f32 * cell_size,
        grid_height as f32 * cell_size,
        WHITE,
    );

    let grid_line_color = Color::from_rgba(200, 200, 200, 255);
    let draw_grid_lines = cell_size >= 6.0;

    for y in start_y..end_y {
        let row = grid.row(y);
        for x in start_x..end_x {
            let (screen_x, screen_y) = camera.grid_to_screen(x, y, CELL_SIZE);
            if row[x].is_alive() {
                draw_rectangle(screen_x, screen_y, cell_size, cell_size, BLACK);
            }
            if draw_grid_lines {
                draw_rectangle_lines(screen_x, screen_y, cell_size, cell_size, 1.0, grid_line_color);
            }
        }
    }
}

/// Draw the side panel: frame position, cycle timing and key help
pub fn draw_panel(playback: &Playback, camera: &Camera) {
    let px = panel_x() + 10.0;
    draw_rectangle(panel_x(), 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));

    let run = &playback.run;
    let (w, h) = run.dimensions();
    draw_text(run.name(), px, 30.0, 22.0, WHITE);
    draw_text(&format!("Grid: {w}x{h}"), px, 55.0, 16.0, GRAY);
    draw_text(
        &format!("Frame: {} / {}", playback.index, playback.frame_count() - 1),
        px,
        80.0,
        18.0,
        Color::from_rgba(0, 255, 150, 255),
    );

    // Timing of the cycle that produced this frame
    if let Some(cycle) = playback.index.checked_sub(1).and_then(|i| run.cycles().get(i)) {
        let ms = cycle.elapsed().as_secs_f64() * 1000.0;
        draw_text(&format!("Cycle {}: {ms:.2}ms", cycle.number()), px, 105.0, 16.0, GRAY);
        draw_text(&format!("Workers: {}", cycle.worker_count()), px, 125.0, 16.0, GRAY);
    }
    draw_text(
        &format!("Alive: {}", playback.frame().count_alive()),
        px,
        145.0,
        16.0,
        GRAY,
    );

    let status = if playback.is_playing { "Playing" } else { "Paused" };
    draw_text(status, px, 180.0, 18.0, if playback.is_playing { GREEN } else { ORANGE });
    draw_text(&format!("Speed: {:.2}x", playback.speed), px, 200.0, 16.0, GRAY);
    draw_text(&format!("Zoom: {:.1}x", camera.zoom), px, 220.0, 16.0, GRAY);
    draw_text(&format!("Run: {:?}", run.state()), px, 240.0, 16.0, GRAY);

    let help = [
        "Space: Play/Pause",
        "Left/Right: Step",
        "R: Restart",
        "Up/Down: Speed",
        "Wheel: Zoom",
        "Mid-drag: Pan",
        "H: Fit view",
    ];
    for (i, line) in help.iter().enumerate() {
        draw_text(line, px, 280.0 + i as f32 * 16.0, 14.0, Color::from_rgba(150, 150, 150, 255));
    }
}
