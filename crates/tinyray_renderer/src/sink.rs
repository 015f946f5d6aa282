//! Raster sinks the renderer writes finished pixels into.

use crate::{rgb565, Rgb8};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when writing rendered images out.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// A pixel-addressable output surface.
///
/// The renderer calls `set_pixel` exactly once for every `(x, y)` with
/// `x < width()` and `y < height()`.
pub trait RasterSink {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb8);
}

/// Pixels in a `width` x `height` raster, computed in `usize` so large rasters
/// do not wrap.
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Row-major offset of (x, y).
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// In-memory 8-bit RGB image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb8>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb8::BLACK; pixel_count(width, height)],
        }
    }

    /// Get the pixel at (x, y). Panics if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Rgb8 {
        self.pixels[pixel_index(self.width, x, y)]
    }

    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Raw RGB bytes, three per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Write the image as plain-text PPM (P3).
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for pixel in &self.pixels {
            writeln!(writer, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
        }

        writer.flush()
    }

    /// Save to disk. `.ppm` is written as P3 text, anything else is encoded by
    /// the `image` crate based on the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let file = File::create(path)?;
            self.write_ppm(BufWriter::new(file))?;
        } else {
            image::save_buffer(
                path,
                self.as_bytes(),
                self.width,
                self.height,
                image::ColorType::Rgb8,
            )?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

impl RasterSink for ImageBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb8) {
        self.pixels[pixel_index(self.width, x, y)] = color;
    }
}

/// Framebuffer for a 16-bit RGB565 TFT panel.
///
/// Mirrors the memory of an ILI9341-class display so a render can be streamed
/// to the panel (or dumped to a file) as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelFramebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u16>,
}

impl PanelFramebuffer {
    /// ILI9341 width in portrait orientation.
    pub const ILI9341_WIDTH: u32 = 240;
    /// ILI9341 height in portrait orientation.
    pub const ILI9341_HEIGHT: u32 = 320;

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; pixel_count(width, height)],
        }
    }

    /// A framebuffer matching a portrait ILI9341 panel.
    pub fn ili9341() -> Self {
        Self::new(Self::ILI9341_WIDTH, Self::ILI9341_HEIGHT)
    }

    /// Packed RGB565 pixel at (x, y). Panics if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> u16 {
        self.pixels[pixel_index(self.width, x, y)]
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Pixels as big-endian byte pairs, the order the panel expects on the wire.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_be_bytes()).collect()
    }

    /// Write the raw big-endian RGB565 stream.
    pub fn write_raw<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(&self.to_be_bytes())?;
        writer.flush()
    }

    /// Save the raw RGB565 stream to disk.
    pub fn save_raw(&self, path: impl AsRef<Path>) -> OutputResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_raw(BufWriter::new(file))?;
        log::info!(
            "Saved {}x{} RGB565 framebuffer to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}

impl Default for PanelFramebuffer {
    fn default() -> Self {
        Self::ili9341()
    }
}

impl RasterSink for PanelFramebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb8) {
        self.pixels[pixel_index(self.width, x, y)] = rgb565(color);
    }
}
