//! Boundary with the outside world of image files.
//!
//! A loader turns a source reference into a decoded image plus the container
//! format it came in. `PixelSource` is the one place where decoded pixel
//! encodings are normalized; everything downstream sees RGB triples.

mod loader;
mod pixels;

pub use loader::{FILE_PREFIX, FileLoader, ImageLoader, LoadedImage, MemoryLoader, decode_bytes};
pub use pixels::{MID_VALUE, PixelSource};
