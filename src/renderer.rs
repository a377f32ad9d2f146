/// Software rendering into an RGB565 frame buffer.
pub mod bitmap;

pub use bitmap::{BitmapCanvas, Framebuffer};
