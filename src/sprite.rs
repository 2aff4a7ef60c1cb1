//! Sprite sources for the sphere
//!
//! Either a decoded image file or a procedural face. A sphere wraps the full
//! sprite width around its circumference, so a good sprite is roughly
//! π times as wide as it is tall.

use std::f32::consts::PI;
use std::path::Path;

use crate::display::PixelBuffer;
use crate::error::AssetError;

const SKIN: (u8, u8, u8) = (236, 188, 140);
const CHEEK: (u8, u8, u8) = (232, 150, 130);
const FEATURE: (u8, u8, u8) = (40, 28, 30);

/// Decode an image file (PNG, BMP, GIF) into an RGBA buffer
pub fn load(path: impl AsRef<Path>) -> Result<PixelBuffer, AssetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let decoded = image::open(path)
        .map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    PixelBuffer::from_rgba(width, height, decoded.as_raw())
        .ok_or(AssetError::PixelData { width, height })
}

/// Generate a face sprite `height` pixels tall and about π·height wide.
/// The top-left pixel is plain skin, which becomes the sphere's fill color.
pub fn procedural_face(height: u32) -> PixelBuffer {
    let height = height.max(4);
    let width = (height as f32 * PI).round() as u32;
    let mut sprite = PixelBuffer::with_size(width, height);
    sprite.clear(SKIN.0, SKIN.1, SKIN.2);

    let cx = width as i32 / 2;
    let h = height as i32;
    let eye_dx = (h / 4).max(2);
    let eye_y = h * 3 / 8;
    let eye = (h / 8).max(1);

    // Eyes
    for side in [-1, 1] {
        let ex = cx + side * eye_dx;
        for dy in 0..eye + 1 {
            for dx in 0..eye {
                sprite.set_pixel(ex + dx - eye / 2, eye_y + dy, FEATURE.0, FEATURE.1, FEATURE.2);
            }
        }
        // Cheeks
        sprite.set_pixel(ex + side * 2, eye_y + eye + 2, CHEEK.0, CHEEK.1, CHEEK.2);
    }

    // Mouth: a flat line with upturned corners
    let mouth_y = h * 11 / 16;
    let half = eye_dx - 1;
    sprite.hline(cx - half, cx + half, mouth_y, FEATURE.0, FEATURE.1, FEATURE.2);
    sprite.set_pixel(cx - half - 1, mouth_y - 1, FEATURE.0, FEATURE.1, FEATURE.2);
    sprite.set_pixel(cx + half + 1, mouth_y - 1, FEATURE.0, FEATURE.1, FEATURE.2);

    sprite
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedural_face_wraps_circumference() {
        let sprite = procedural_face(16);
        assert_eq!(sprite.height(), 16);
        assert_eq!(sprite.width(), 50);
    }

    #[test]
    fn test_procedural_face_corner_is_skin() {
        let sprite = procedural_face(16);
        assert_eq!(sprite.get_pixel_rgba(0, 0), Some((SKIN.0, SKIN.1, SKIN.2, 255)));
        assert_eq!(
            sprite.get_pixel_rgba(sprite.width() as i32 - 1, 0),
            Some((SKIN.0, SKIN.1, SKIN.2, 255))
        );
    }

    #[test]
    fn test_procedural_face_has_features() {
        let sprite = procedural_face(16);
        let dark = (0..sprite.height() as i32)
            .flat_map(|y| (0..sprite.width() as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| sprite.get_pixel_rgba(x, y) == Some((FEATURE.0, FEATURE.1, FEATURE.2, 255)))
            .count();
        assert!(dark > 8, "expected eyes and mouth, got {} dark pixels", dark);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
