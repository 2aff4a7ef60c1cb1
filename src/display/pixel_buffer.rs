// ============================================================================
// Color helpers
// ============================================================================

/// Straight (non-premultiplied) RGBA color
pub type Rgba = (u8, u8, u8, u8);

/// Alpha 0 marks a pixel as "nothing here"; every blit skips or copies it as such
pub const TRANSPARENT: Rgba = (0, 0, 0, 0);

/// Alpha blend a single color channel
/// Uses fast approximation: (x + 1 + (x >> 8)) >> 8 instead of x / 255
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

/// Write ABGR pixel with explicit alpha (RGBA8888 little-endian byte order)
#[inline]
fn write_pixel_rgba(dest: &mut [u8], r: u8, g: u8, b: u8, a: u8) {
    dest[0] = a; // A
    dest[1] = b; // B
    dest[2] = g; // G
    dest[3] = r; // R
}

#[inline]
fn read_pixel_rgba(src: &[u8]) -> Rgba {
    (src[3], src[2], src[1], src[0])
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering.
///
/// Used for every surface in the pipeline: the decoded sprite, the column
/// slices, the per-frame working surface and the canvas that gets uploaded
/// to the window texture. A fresh buffer is fully transparent.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Create a transparent pixel buffer
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Create a buffer from row-major RGBA bytes (4 bytes per pixel).
    /// Returns None if the data length doesn't match the dimensions.
    pub fn from_rgba(width: u32, height: u32, data: &[u8]) -> Option<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return None;
        }
        let mut buffer = Self::with_size(width, height);
        for (dst, src) in buffer
            .pixels
            .chunks_exact_mut(4)
            .zip(data.chunks_exact(4))
        {
            write_pixel_rgba(dst, src[0], src[1], src[2], src[3]);
        }
        Some(buffer)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the buffer holds no pixels at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Clear to an opaque color
    pub fn clear(&mut self, r: u8, g: u8, b: u8) {
        self.clear_rgba(r, g, b, 255);
    }

    /// Clear to a color with custom alpha
    pub fn clear_rgba(&mut self, r: u8, g: u8, b: u8, a: u8) {
        let pixel = [a, b, g, r];
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Set a single pixel with custom alpha (bounds checked)
    #[inline]
    pub fn set_pixel_rgba(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8, a: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel_rgba(&mut self.pixels[idx..idx + 4], r, g, b, a);
        }
    }

    /// Set a single opaque pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, r: u8, g: u8, b: u8) {
        self.set_pixel_rgba(x, y, r, g, b, 255);
    }

    /// Read all 4 channels of a pixel (bounds checked)
    /// Returns (r, g, b, a) or None if out of bounds
    #[inline]
    pub fn get_pixel_rgba(&self, x: i32, y: i32) -> Option<Rgba> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some(read_pixel_rgba(&self.pixels[idx..idx + 4]))
        } else {
            None
        }
    }

    /// Draw an opaque horizontal span, clipped to the buffer
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, r: u8, g: u8, b: u8) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }

        // Compute starting index once, then increment by 4 per pixel
        let mut idx = self.pixel_index(start as u32, y as u32);
        for _ in start..=end {
            write_pixel_rgba(&mut self.pixels[idx..idx + 4], r, g, b, 255);
            idx += 4;
        }
    }

    /// Draw a filled circle using horizontal spans
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, r: u8, g: u8, b: u8) {
        if radius <= 0 {
            if radius == 0 {
                self.set_pixel(cx, cy, r, g, b);
            }
            return;
        }

        // Midpoint circle algorithm with span filling
        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while x >= y {
            // Fill horizontal spans for 4 quadrants, avoiding duplicates
            self.hline(cx - x, cx + x, cy + y, r, g, b);
            if y != 0 {
                self.hline(cx - x, cx + x, cy - y, r, g, b);
            }
            if x != y {
                self.hline(cx - y, cx + y, cy + x, r, g, b);
                if y != 0 {
                    self.hline(cx - y, cx + y, cy - x, r, g, b);
                }
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Composite a source buffer onto this one using per-pixel source alpha (source-over).
    /// Skips fully transparent pixels; fast-copies fully opaque ones.
    pub fn composite(&mut self, src: &PixelBuffer, dst_x: i32, dst_y: i32) {
        let dst_w = self.width as i32;
        let dst_h = self.height as i32;

        for sy in 0..src.height as i32 {
            let dy = dst_y + sy;
            if dy < 0 || dy >= dst_h {
                continue;
            }

            for sx in 0..src.width as i32 {
                let dx = dst_x + sx;
                if dx < 0 || dx >= dst_w {
                    continue;
                }

                let si = src.pixel_index(sx as u32, sy as u32);
                let (sr, sg, sb, sa) = read_pixel_rgba(&src.pixels[si..si + 4]);
                if sa == 0 {
                    continue;
                }

                let di = self.pixel_index(dx as u32, dy as u32);
                if sa == 255 {
                    write_pixel_rgba(&mut self.pixels[di..di + 4], sr, sg, sb, 255);
                } else {
                    let alpha = sa as u16;
                    let da = self.pixels[di];
                    self.pixels[di] = da.max(sa);
                    self.pixels[di + 1] = blend_channel(sb, self.pixels[di + 1], alpha);
                    self.pixels[di + 2] = blend_channel(sg, self.pixels[di + 2], alpha);
                    self.pixels[di + 3] = blend_channel(sr, self.pixels[di + 3], alpha);
                }
            }
        }
    }

    /// Color-keyed copy: every source pixel except those equal to `key` replaces
    /// the destination pixel outright, alpha included. Copying a transparent
    /// pixel this way punches a hole in the destination.
    pub fn blit_keyed(&mut self, src: &PixelBuffer, dst_x: i32, dst_y: i32, key: Rgba) {
        let dst_w = self.width as i32;
        let dst_h = self.height as i32;

        for sy in 0..src.height as i32 {
            let dy = dst_y + sy;
            if dy < 0 || dy >= dst_h {
                continue;
            }

            for sx in 0..src.width as i32 {
                let dx = dst_x + sx;
                if dx < 0 || dx >= dst_w {
                    continue;
                }

                let si = src.pixel_index(sx as u32, sy as u32);
                if read_pixel_rgba(&src.pixels[si..si + 4]) == key {
                    continue;
                }
                let di = self.pixel_index(dx as u32, dy as u32);
                self.pixels[di..di + 4].copy_from_slice(&src.pixels[si..si + 4]);
            }
        }
    }

    /// Create a mirrored copy (left and right swapped)
    pub fn flipped_horizontal(&self) -> Self {
        let mut out = Self::with_size(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let si = self.pixel_index(x, y);
                let di = out.pixel_index(self.width - 1 - x, y);
                out.pixels[di..di + 4].copy_from_slice(&self.pixels[si..si + 4]);
            }
        }
        out
    }

    /// Nearest-neighbour resample to an arbitrary size.
    /// Destination pixel `d` reads source pixel `d * src_len / dst_len` on each axis.
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        let mut out = Self::with_size(width, height);
        if self.is_empty() || out.is_empty() {
            return out;
        }

        let src_w = self.width as u64;
        let src_h = self.height as u64;
        for dy in 0..height {
            let sy = (dy as u64 * src_h / height as u64) as u32;
            for dx in 0..width {
                let sx = (dx as u64 * src_w / width as u64) as u32;
                let si = self.pixel_index(sx, sy);
                let di = out.pixel_index(dx, dy);
                out.pixels[di..di + 4].copy_from_slice(&self.pixels[si..si + 4]);
            }
        }
        out
    }

    /// Verbatim 1-pixel-wide copy of column `x`. None if `x` is out of range.
    pub fn column(&self, x: u32) -> Option<Self> {
        if x >= self.width {
            return None;
        }
        let mut out = Self::with_size(1, self.height);
        for y in 0..self.height {
            let si = self.pixel_index(x, y);
            let di = out.pixel_index(0, y);
            out.pixels[di..di + 4].copy_from_slice(&self.pixels[si..si + 4]);
        }
        Some(out)
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}
