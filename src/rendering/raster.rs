//! Grid snapshots to lossless image bytes.

use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::png::PngEncoder;
use image::{Delay, ExtendedColorType, Frame, GrayImage, ImageEncoder, Rgba, RgbaImage};
use log::debug;
use rayon::prelude::*;

use crate::application::GameRun;
use crate::domain::Grid;
use crate::error::{GameError, Result};

const ALIVE_LUMA: u8 = 0;
const DEAD_LUMA: u8 = 255;

/// Turns grids into black & white images, one `magnification`-sized square per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    magnification: u32,
    loop_count: u16,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(1, 5)
    }
}

impl Renderer {
    /// Magnification below 1 is raised to 1
    pub fn new(magnification: u32, loop_count: u16) -> Self {
        Self {
            magnification: magnification.max(1),
            loop_count,
        }
    }

    pub const fn magnification(&self) -> u32 {
        self.magnification
    }

    pub const fn loop_count(&self) -> u16 {
        self.loop_count
    }

    /// Same renderer at a different magnification
    pub fn with_magnification(self, magnification: u32) -> Self {
        Self::new(magnification, self.loop_count)
    }

    /// Grayscale raster of the grid: alive cells black, dead cells white.
    /// Pixel (px, py) shows cell (px / mag, py / mag).
    pub fn rasterize(&self, grid: &Grid) -> GrayImage {
        let mag = self.magnification as usize;
        let (width, height) = grid.dimensions();
        let (img_w, img_h) = (width * mag, height * mag);
        let mut buffer = vec![DEAD_LUMA; img_w * img_h];

        if img_w > 0 {
            buffer.par_chunks_mut(img_w).enumerate().for_each(|(py, line)| {
                let row = grid.row(py / mag);
                for (px, pixel) in line.iter_mut().enumerate() {
                    if row[px / mag].is_alive() {
                        *pixel = ALIVE_LUMA;
                    }
                }
            });
        }

        // Buffer length matches the dimensions by construction
        GrayImage::from_raw(img_w as u32, img_h as u32, buffer).unwrap_or_default()
    }

    /// Encode one grid as a PNG
    pub fn render_frame(&self, grid: &Grid) -> Result<Vec<u8>> {
        let image = self.rasterize(grid);
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::L8)
            .map_err(GameError::Encode)?;
        debug!("rendered png frame, size={}", bytes.len());
        Ok(bytes)
    }

    /// Encode frame `index` of a run: 0 is the initial grid, i is cycle i's result
    pub fn render_run_frame(&self, run: &GameRun, index: usize) -> Result<Vec<u8>> {
        self.render_frame(run.frame(index)?)
    }

    /// Encode up to `max_frames` frames of a run as a looping GIF.
    /// Every frame is held for the run's configured delay.
    pub fn render_animation(&self, run: &GameRun, max_frames: usize) -> Result<Vec<u8>> {
        let count = max_frames.min(run.cycle_count() + 1);
        let grids = (0..count).map(|i| run.frame(i)).collect::<Result<Vec<_>>>()?;

        let frames: Vec<RgbaImage> = grids.par_iter().map(|grid| self.rasterize_rgba(grid)).collect();
        let delay = Delay::from_numer_denom_ms(run.delay_10ms().saturating_mul(10), 1);

        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut bytes);
            encoder
                .set_repeat(Repeat::Finite(self.loop_count))
                .map_err(GameError::Encode)?;
            for image in frames {
                encoder
                    .encode_frame(Frame::from_parts(image, 0, 0, delay))
                    .map_err(GameError::Encode)?;
            }
        }
        debug!("rendered gif with {count} frames, size={}", bytes.len());
        Ok(bytes)
    }

    fn rasterize_rgba(&self, grid: &Grid) -> RgbaImage {
        let gray = self.rasterize(grid);
        RgbaImage::from_fn(gray.width(), gray.height(), |x, y| {
            let luma = gray.get_pixel(x, y).0[0];
            Rgba([luma, luma, luma, 255])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::GameRun;
    use crate::domain::{Cell, UpdateExecutor, presets};
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, ImageFormat};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;
    use std::time::Duration;

    fn decode_grid(png: &[u8], mag: u32) -> Grid {
        let image = image::load_from_memory_with_format(png, ImageFormat::Png)
            .unwrap()
            .to_luma8();
        let (w, h) = (image.width() / mag, image.height() / mag);
        let mut grid = Grid::new(w as usize, h as usize);
        for y in 0..h {
            for x in 0..w {
                if image.get_pixel(x * mag, y * mag).0[0] == ALIVE_LUMA {
                    grid.set(x as isize, y as isize, Cell::Alive);
                }
            }
        }
        grid
    }

    fn played_run(cycles: usize) -> GameRun {
        let config = crate::GameConfig { max_cycles: cycles, delay_10ms: 7, ..Default::default() };
        let mut run = GameRun::from_grid("glider", "pattern:glider", presets::glider().centered_in(8, 8), &config);
        run.run(&UpdateExecutor::new(2)).unwrap();
        run
    }

    #[test]
    fn test_png_round_trip_at_magnification_one() {
        let grid = Grid::new(19, 11).randomize(&mut StdRng::seed_from_u64(3), 0.5);
        let png = Renderer::new(1, 5).render_frame(&grid).unwrap();
        assert_eq!(decode_grid(&png, 1), grid);
    }

    #[test]
    fn test_magnification_blocks_are_uniform() {
        let grid = Grid::from_rows(&["#.", ".#", ".."]);
        let image = Renderer::new(3, 5).rasterize(&grid);
        assert_eq!(image.dimensions(), (6, 9));
        for (x, y, pixel) in image.enumerate_pixels() {
            let alive = grid.get((x / 3) as isize, (y / 3) as isize).is_alive();
            assert_eq!(pixel.0[0], if alive { ALIVE_LUMA } else { DEAD_LUMA }, "pixel ({x}, {y})");
        }
    }

    #[test]
    fn test_magnified_png_decodes_to_same_grid() {
        let grid = presets::toad().centered_in(7, 6);
        let png = Renderer::new(4, 5).render_frame(&grid).unwrap();
        assert_eq!(decode_grid(&png, 4), grid);
    }

    #[test]
    fn test_zero_magnification_is_raised() {
        assert_eq!(Renderer::new(0, 5).magnification(), 1);
    }

    #[test]
    fn test_run_frame_out_of_range() {
        let run = played_run(3);
        let renderer = Renderer::default();
        assert!(renderer.render_run_frame(&run, 3).is_ok());
        assert!(matches!(
            renderer.render_run_frame(&run, 4),
            Err(GameError::IndexOutOfRange { index: 4, available: 3 })
        ));
    }

    #[test]
    fn test_animation_frame_count_is_clamped() {
        let run = played_run(4);
        let renderer = Renderer::new(2, 3);
        for (requested, expected) in [(1, 1), (3, 3), (5, 5), (50, 5)] {
            let gif = renderer.render_animation(&run, requested).unwrap();
            let frames = GifDecoder::new(Cursor::new(gif)).unwrap().into_frames().collect_frames().unwrap();
            assert_eq!(frames.len(), expected, "requested {requested}");
            for frame in &frames {
                assert_eq!(Duration::from(frame.delay()), Duration::from_millis(70));
            }
        }
    }

    #[test]
    fn test_huge_delay_does_not_overflow() {
        let config = crate::GameConfig { max_cycles: 1, delay_10ms: 500_000_000, ..Default::default() };
        let mut run = GameRun::from_grid("slow", "mem", presets::block().centered_in(4, 4), &config);
        run.run(&UpdateExecutor::new(1)).unwrap();
        let gif = Renderer::default().render_animation(&run, 2).unwrap();
        let frames = GifDecoder::new(Cursor::new(gif)).unwrap().into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_animation_frames_follow_history() {
        let run = played_run(2);
        let gif = Renderer::new(1, 5).render_animation(&run, 3).unwrap();
        let frames = GifDecoder::new(Cursor::new(gif)).unwrap().into_frames().collect_frames().unwrap();

        for (i, frame) in frames.iter().enumerate() {
            let expected = run.frame(i).unwrap();
            let buffer = frame.buffer();
            for (x, y, cell) in expected.iter_cells() {
                let pixel = buffer.get_pixel(x as u32, y as u32).0;
                let luma = if cell.is_alive() { ALIVE_LUMA } else { DEAD_LUMA };
                assert_eq!(pixel[0], luma, "frame {i} cell ({x}, {y})");
            }
        }
    }
}
