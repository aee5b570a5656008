mod raster;
pub mod screen;

pub use raster::Renderer;
