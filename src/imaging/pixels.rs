use image::DynamicImage;
use rayon::prelude::*;

use crate::domain::{Cell, Grid};
use crate::error::{GameError, Result};

/// Middle of the 8-bit channel range
pub const MID_VALUE: u32 = 256 / 2;

/// Decoded pixels normalized to row-major RGB triples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSource {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl PixelSource {
    /// Accepts 8-bit RGB and 8-bit RGBA images (alpha is dropped);
    /// every other layout is a color model error.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let pixels = match image {
            DynamicImage::ImageRgb8(buf) => buf.pixels().map(|p| p.0).collect(),
            DynamicImage::ImageRgba8(buf) => {
                buf.pixels().map(|p| [p.0[0], p.0[1], p.0[2]]).collect()
            }
            other => {
                return Err(GameError::ColorModel {
                    layout: format!("{:?}", other.color()),
                });
            }
        };
        Ok(Self { width, height, pixels })
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Dark pixels become live cells, light pixels dead ones
    pub fn threshold(rgb: [u8; 3]) -> Cell {
        let sum: u32 = rgb.iter().map(|&c| u32::from(c)).sum();
        if sum < MID_VALUE * 3 { Cell::Alive } else { Cell::Dead }
    }

    /// Threshold every pixel into a grid of the same dimensions
    pub fn to_grid(&self) -> Grid {
        let cells: Vec<Cell> = self.pixels.par_iter().map(|&rgb| Self::threshold(rgb)).collect();
        Grid::from_cells(self.width, self.height, cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(PixelSource::threshold([0, 0, 0]), Cell::Alive);
        assert_eq!(PixelSource::threshold([255, 255, 255]), Cell::Dead);
        assert_eq!(PixelSource::threshold([128, 128, 127]), Cell::Alive); // 383
        assert_eq!(PixelSource::threshold([128, 128, 128]), Cell::Dead); // 384
    }

    #[test]
    fn test_rgb_image_to_grid() {
        let mut img = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([10, 10, 10]));
        img.put_pixel(2, 1, Rgb([200, 0, 0]));
        let source = PixelSource::from_image(&DynamicImage::ImageRgb8(img)).unwrap();

        assert_eq!(source.dimensions(), (3, 2));
        assert_eq!(source.to_grid(), Grid::from_rows(&[".#.", "..#"]));
    }

    #[test]
    fn test_rgba_alpha_is_ignored() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 0]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let source = PixelSource::from_image(&DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(source.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(source.to_grid(), Grid::from_rows(&["#."]));
    }

    #[test]
    fn test_grayscale_is_rejected() {
        let img = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
        assert!(matches!(
            PixelSource::from_image(&img),
            Err(GameError::ColorModel { .. })
        ));
    }
}
