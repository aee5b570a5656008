/// Camera manages viewport and zoom for grid navigation
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32, // 1.0 = normal, 2.0 = 2x zoomed in
    /// Last cursor position while a drag-pan is in progress
    pub drag_origin: Option<(f32, f32)>,
}

impl Camera {
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 40.0;

    pub fn new() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            drag_origin: None,
        }
    }

    /// Zoom and offset that show a whole `grid_w`×`grid_h` grid centered in the viewport
    pub fn fit(grid_w: usize, grid_h: usize, viewport_w: f32, viewport_h: f32, cell_size: f32) -> Self {
        if grid_w == 0 || grid_h == 0 {
            return Self::new();
        }
        let zoom = (viewport_w / (grid_w as f32 * cell_size))
            .min(viewport_h / (grid_h as f32 * cell_size))
            .clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        let extent = cell_size * zoom;
        Self {
            offset_x: (viewport_w - grid_w as f32 * extent) / 2.0,
            offset_y: (viewport_h - grid_h as f32 * extent) / 2.0,
            zoom,
            drag_origin: None,
        }
    }

    pub fn zoom_in(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    pub fn zoom_out(&mut self, factor: f32) {
        self.zoom = (self.zoom / factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Pan by the cursor movement since the previous call while dragging
    pub fn drag_to(&mut self, pos: (f32, f32)) {
        if let Some((last_x, last_y)) = self.drag_origin {
            self.pan(pos.0 - last_x, pos.1 - last_y);
        }
        self.drag_origin = Some(pos);
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
    }

    /// Convert screen coordinates to grid coordinates
    pub fn screen_to_grid(&self, screen_x: f32, screen_y: f32, cell_size: f32) -> (i32, i32) {
        let grid_x = ((screen_x - self.offset_x) / (cell_size * self.zoom)).floor() as i32;
        let grid_y = ((screen_y - self.offset_y) / (cell_size * self.zoom)).floor() as i32;
        (grid_x, grid_y)
    }

    /// Convert grid coordinates to screen coordinates
    pub fn grid_to_screen(&self, grid_x: usize, grid_y: usize, cell_size: f32) -> (f32, f32) {
        let screen_x = grid_x as f32 * cell_size * self.zoom + self.offset_x;
        let screen_y = grid_y as f32 * cell_size * self.zoom + self.offset_y;
        (screen_x, screen_y)
    }

    /// Get visible grid bounds for culling
    pub fn visible_bounds(&self, viewport_width: f32, viewport_height: f32, cell_size: f32) -> (i32, i32, i32, i32) {
        let (min_x, min_y) = self.screen_to_grid(0.0, 0.0, cell_size);
        let (max_x, max_y) = self.screen_to_grid(viewport_width, viewport_height, cell_size);
        (min_x, min_y, max_x, max_y)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_centers_grid() {
        let camera = Camera::fit(10, 5, 200.0, 200.0, 10.0);
        assert!((camera.zoom - 2.0).abs() < 1e-6);
        assert!((camera.offset_x - 0.0).abs() < 1e-6);
        assert!((camera.offset_y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_screen_grid_round_trip() {
        let mut camera = Camera::new();
        camera.pan(15.0, -5.0);
        camera.zoom_in(2.0);
        let (sx, sy) = camera.grid_to_screen(3, 4, 10.0);
        assert_eq!(camera.screen_to_grid(sx + 1.0, sy + 1.0, 10.0), (3, 4));
        // Left of the grid origin maps to negative cells
        assert_eq!(camera.screen_to_grid(0.0, 0.0, 10.0).0, -1);
    }

    #[test]
    fn test_drag_pans_by_delta() {
        let mut camera = Camera::new();
        camera.drag_to((10.0, 10.0));
        camera.drag_to((14.0, 7.0));
        assert_eq!((camera.offset_x, camera.offset_y), (4.0, -3.0));
        camera.end_drag();
        camera.drag_to((100.0, 100.0));
        assert_eq!((camera.offset_x, camera.offset_y), (4.0, -3.0));
    }
}
