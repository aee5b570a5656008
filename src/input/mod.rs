use macroquad::prelude::*;

use crate::application::{Camera, Playback};
use crate::rendering::screen::{CELL_SIZE, grid_area_height, grid_area_width};

/// Handle zoom with mouse wheel
pub fn handle_zoom(camera: &mut Camera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

/// Handle pan with middle mouse button drag
pub fn handle_pan(camera: &mut Camera, mouse_pos: (f32, f32)) {
    if is_mouse_button_down(MouseButton::Middle) {
        camera.drag_to(mouse_pos);
    } else {
        camera.end_drag();
    }
}

/// Process keyboard input functionally
pub fn process_keyboard_input(playback: Playback, camera: &mut Camera) -> Playback {
    type KeyAction = (KeyCode, fn(Playback) -> Playback);

    let actions: [KeyAction; 6] = [
        (KeyCode::Space, Playback::toggle_playing),
        (KeyCode::Right, Playback::step_forward),
        (KeyCode::Left, Playback::step_back),
        (KeyCode::R, Playback::restart),
        (KeyCode::Up, |p| p.adjust_speed(2.0)),
        (KeyCode::Down, |p| p.adjust_speed(0.5)),
    ];

    let playback = actions.iter().fold(playback, |p, (key, action)| {
        if is_key_pressed(*key) { action(p) } else { p }
    });

    // Fit the grid back into view with 'H' (home)
    if is_key_pressed(KeyCode::H) {
        *camera = fit_camera(&playback);
    }

    playback
}

/// Camera showing the whole run grid in the grid area
pub fn fit_camera(playback: &Playback) -> Camera {
    let (w, h) = playback.run.dimensions();
    Camera::fit(w, h, grid_area_width(), grid_area_height(), CELL_SIZE)
}
