//! 24-bit framebuffer and uncompressed TGA output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Color, ImageError, Interval};

/// Size of the TGA file header in bytes.
pub const TGA_HEADER_LEN: usize = 18;

/// Largest width or height a TGA header can store.
pub const TGA_MAX_DIMENSION: u32 = u16::MAX as u32;

/// Uncompressed true-color image.
const TGA_IMAGE_TYPE: u8 = 2;
const TGA_BITS_PER_PIXEL: u8 = 24;

/// Display range a channel is clamped to before scaling to a byte.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// An 8-bit-per-channel RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantize a display-referred color in [0, 1] by truncation.
    pub fn from_color(color: Color) -> Self {
        Self {
            r: quantize(color.x),
            g: quantize(color.y),
            b: quantize(color.z),
        }
    }
}

impl From<Color> for Pixel {
    fn from(color: Color) -> Self {
        Self::from_color(color)
    }
}

#[inline]
fn quantize(c: f32) -> u8 {
    // NaN clamps to itself and then casts to 0
    (INTENSITY.clamp(c) * 255.99) as u8
}

/// Row-major pixel storage for a finished frame.
///
/// Row 0 is the bottom of the image plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Framebuffer {
    /// Create a new framebuffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::default(); width as usize * height as usize],
        }
    }

    /// Wrap already-rendered rows. `pixels.len()` must equal `width * height`.
    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
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

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, ImageError> {
        if x >= self.width || y >= self.height {
            return Err(ImageError::OutOfBounds { x, y });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    /// Get the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Result<Pixel, ImageError> {
        Ok(self.pixels[self.index(x, y)?])
    }

    /// Set the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: impl Into<Pixel>) -> Result<(), ImageError> {
        let index = self.index(x, y)?;
        self.pixels[index] = pixel.into();
        Ok(())
    }

    /// Encode as an uncompressed 24-bit TGA.
    ///
    /// Rows are written in buffer order with a bottom-left origin, pixels
    /// as BGR triples.
    pub fn write_tga<W: Write>(&self, mut writer: W) -> Result<(), ImageError> {
        let (width, height) = match (u16::try_from(self.width), u16::try_from(self.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(ImageError::DimensionsTooLarge {
                    width: self.width,
                    height: self.height,
                })
            }
        };

        let mut header = [0u8; TGA_HEADER_LEN];
        header[2] = TGA_IMAGE_TYPE;
        header[12..14].copy_from_slice(&width.to_le_bytes());
        header[14..16].copy_from_slice(&height.to_le_bytes());
        header[16] = TGA_BITS_PER_PIXEL;
        writer.write_all(&header)?;

        let mut row = Vec::with_capacity(self.width as usize * 3);
        for line in self.pixels.chunks(self.width.max(1) as usize) {
            row.clear();
            for pixel in line {
                row.extend_from_slice(&[pixel.b, pixel.g, pixel.r]);
            }
            writer.write_all(&row)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Write a TGA file to `path`, replacing any existing file.
    pub fn save_tga(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let file = File::create(path.as_ref())?;
        self.write_tga(BufWriter::new(file))?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}
