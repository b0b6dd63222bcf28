use crate::model::Color;

/// Flat byte view of a raster surface.
///
/// The history ring compresses and restores canvases through this trait
/// alone; the pixel layout is opaque to it, only the byte length matters
/// and must stay stable across snapshot/undo/redo calls.
pub trait CanvasSurface {
    fn raw_bytes(&self) -> &[u8];
    fn raw_bytes_mut(&mut self) -> &mut [u8];
}

/// In-memory RGBA8 raster, row-major with no stride padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&fill.to_rgba_array());
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = ((y * self.width + x) * 4) as usize;
        Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Clipped write; coordinates outside the canvas are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_rgba_array());
    }

    pub fn clear(&mut self, fill: Color) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&fill.to_rgba_array());
        }
    }
}

impl CanvasSurface for PixelCanvas {
    fn raw_bytes(&self) -> &[u8] {
        &self.pixels
    }

    fn raw_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}
