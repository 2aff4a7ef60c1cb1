//! Per-frame compositing: slices onto a working surface, disk clip, outline

use super::segment::Segment;
use crate::display::{Mask, PixelBuffer, Rgba, TRANSPARENT};

/// Fill used to seed the disk mask; never reaches the screen
const MASK_SEED: (u8, u8, u8) = (25, 25, 25);
/// Key color of the clip overlay: overlay pixels of this color are skipped
const OVERLAY_KEY: Rgba = (0, 0, 0, 255);
/// Outline stamp color (near black)
pub const OUTLINE_COLOR: Rgba = (1, 1, 1, 255);

/// Build the overlay that clips a `side`x`side` surface to a disk.
/// Inside the disk it carries the key color (left untouched when blitted);
/// outside it carries the transparent marker, which erases whatever is there.
pub fn clip_overlay(side: u32, center: (i32, i32), radius: i32) -> PixelBuffer {
    let mut seed = PixelBuffer::with_size(side, side);
    seed.fill_circle(center.0, center.1, radius, MASK_SEED.0, MASK_SEED.1, MASK_SEED.2);

    let mut mask = Mask::from_buffer(&seed);
    mask.invert();
    mask.to_buffer(TRANSPARENT, OVERLAY_KEY)
}

/// Paint the visible slices back to front over the fill color, then clip
/// everything outside the disk. Returns a fresh surface every call.
pub fn compose(
    side: u32,
    background: Rgba,
    segments: &[Segment],
    order: &[usize],
    overlay: &PixelBuffer,
) -> PixelBuffer {
    let mut surface = PixelBuffer::with_size(side, side);
    let (r, g, b, a) = background;
    surface.clear_rgba(r, g, b, a);

    for &i in order {
        let segment = &segments[i];
        let (x, y) = segment.top_left();
        surface.composite(segment.image(), x, y);
    }

    surface.blit_keyed(overlay, 0, 0, OVERLAY_KEY);
    surface
}

/// Offsets of the nine outline stamps for stroke width `t`
pub fn outline_offsets(t: i32) -> [(i32, i32); 9] {
    [
        (-t, -t),
        (0, -t),
        (t, -t),
        (-t, 0),
        (0, 0),
        (t, 0),
        (-t, t),
        (0, t),
        (t, t),
    ]
}

/// Stamp a solid silhouette of `image` around `(x, y)`, then the image on top
pub fn stamp_outlined(dest: &mut PixelBuffer, image: &PixelBuffer, x: i32, y: i32, thickness: i32) {
    let silhouette = Mask::from_buffer(image).to_buffer(OUTLINE_COLOR, TRANSPARENT);
    for (dx, dy) in outline_offsets(thickness) {
        dest.composite(&silhouette, x + dx, y + dy);
    }
    dest.composite(image, x, y);
}
