//! Binary silhouette masks
//!
//! A mask marks which pixels of a buffer are "solid". The sphere renderer uses
//! masks twice: once inverted, to clip the slices to a disk, and once to stamp
//! a solid outline behind the finished sprite.

use super::pixel_buffer::{PixelBuffer, Rgba};

/// Pixels with alpha above this count as solid
const ALPHA_THRESHOLD: u8 = 127;

/// One bit per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    bits: Vec<bool>,
    width: u32,
    height: u32,
}

impl Mask {
    /// Build a mask with a bit set for every non-transparent pixel
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let (width, height) = (buffer.width(), buffer.height());
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let solid = buffer
                    .get_pixel_rgba(x, y)
                    .is_some_and(|(_, _, _, a)| a > ALPHA_THRESHOLD);
                bits.push(solid);
            }
        }
        Self {
            bits,
            width,
            height,
        }
    }

    #[cfg(test)]
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[cfg(test)]
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read one bit; out-of-range coordinates are unset
    #[cfg(test)]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Flip every bit
    pub fn invert(&mut self) {
        for bit in &mut self.bits {
            *bit = !*bit;
        }
    }

    /// Number of set bits
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Render the mask as a buffer: set bits become `set`, the rest `unset`
    pub fn to_buffer(&self, set: Rgba, unset: Rgba) -> PixelBuffer {
        let mut out = PixelBuffer::with_size(self.width, self.height);
        for (i, &bit) in self.bits.iter().enumerate() {
            let x = (i as u32 % self.width) as i32;
            let y = (i as u32 / self.width) as i32;
            let (r, g, b, a) = if bit { set } else { unset };
            out.set_pixel_rgba(x, y, r, g, b, a);
        }
        out
    }
}
