//! Column slices and their placement on the circular track

use crate::display::PixelBuffer;

/// Horizontal track radius, in units of sphere scale
pub const TRACK_RADIUS_X: f64 = 8.0;
/// Vertical track radius, in units of sphere scale. Tuned together with the
/// horizontal radius: the wide, shallow ellipse is what reads as a sphere.
pub const TRACK_RADIUS_Y: f64 = 2.0;

/// Depth at or above which a slice faces the viewer
pub const VISIBLE_DEPTH: f64 = 2.0;

/// One vertical slice of the sprite
#[derive(Debug, Clone)]
pub struct Segment {
    image: PixelBuffer,
    /// Fixed track offset, kept in degrees so quarter turns stay exact
    phase_degrees: f64,
    screen_position: (i32, i32),
    depth: f64,
}

/// Cut `image` into one 1-pixel-wide segment per column, left to right.
/// Segment `i` of `n` sits at `360·i/n + 90` degrees on the track.
pub fn slice_columns(image: &PixelBuffer) -> Vec<Segment> {
    let count = image.width();
    (0..count)
        .filter_map(|i| {
            let column = image.column(i)?;
            let phase_degrees = 360.0 * i as f64 / count as f64 + 90.0;
            Some(Segment {
                image: column,
                phase_degrees,
                screen_position: (0, 0),
                depth: VISIBLE_DEPTH,
            })
        })
        .collect()
}

/// Sine and cosine of an angle in degrees. Reduces to a quadrant first so
/// multiples of 90 give exact 0 / ±1 instead of rounding noise.
pub fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let wrapped = degrees.rem_euclid(360.0);
    let quadrant = ((wrapped / 90.0).floor() as i32).min(3);
    let (s, c) = (wrapped - quadrant as f64 * 90.0).to_radians().sin_cos();
    match quadrant {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    }
}

impl Segment {
    /// Fixed angular offset in radians
    pub fn phase(&self) -> f64 {
        self.phase_degrees.to_radians()
    }

    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    /// Bottom-centre anchor of the slice on the working surface
    pub fn screen_position(&self) -> (i32, i32) {
        self.screen_position
    }

    /// 1 (facing away) ..= 3 (facing the viewer)
    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn is_visible(&self) -> bool {
        self.depth >= VISIBLE_DEPTH
    }

    /// Top-left corner for blitting: the anchor is the bottom centre
    pub fn top_left(&self) -> (i32, i32) {
        let (x, y) = self.screen_position;
        (
            x - self.image.width() as i32 / 2,
            y - self.image.height() as i32,
        )
    }

    /// Place the slice for the current master angle.
    /// `anchor` is (horizontal centre, bottom edge) of the working surface.
    pub fn project(&mut self, master_degrees: f64, scale: u32, anchor: (i32, i32)) {
        let (sin, cos) = sin_cos_degrees(self.phase_degrees + master_degrees);
        let scale = scale as f64;
        self.screen_position = (
            (cos * TRACK_RADIUS_X * scale).round_ties_even() as i32 + anchor.0,
            (sin * TRACK_RADIUS_Y * scale).round_ties_even() as i32 + anchor.1,
        );
        self.depth = sin + 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn striped(width: u32, height: u32) -> PixelBuffer {
        let mut buffer = PixelBuffer::with_size(width, height);
        for x in 0..width as i32 {
            for y in 0..height as i32 {
                buffer.set_pixel(x, y, x as u8, y as u8, (x * 3 + y) as u8);
            }
        }
        buffer
    }

    #[test]
    fn test_slice_count_matches_width() {
        let segments = slice_columns(&striped(7, 5));
        assert_eq!(segments.len(), 7);
        assert!(segments
            .iter()
            .all(|s| s.image().width() == 1 && s.image().height() == 5));
    }

    #[test]
    fn test_zero_width_gives_no_segments() {
        assert!(slice_columns(&PixelBuffer::with_size(0, 12)).is_empty());
    }

    #[test]
    fn test_phases_evenly_spaced() {
        let segments = slice_columns(&striped(51, 2));
        assert!((segments[0].phase() - FRAC_PI_2).abs() < 1e-12);
        let step = TAU / segments.len() as f64;
        for pair in segments.windows(2) {
            let diff = pair[1].phase() - pair[0].phase();
            assert!((diff - step).abs() < 1e-9, "uneven step {}", diff);
        }
    }

    #[test]
    fn test_sin_cos_degrees_exact_quarters() {
        assert_eq!(sin_cos_degrees(0.0), (0.0, 1.0));
        assert_eq!(sin_cos_degrees(90.0), (1.0, 0.0));
        assert_eq!(sin_cos_degrees(270.0), (-1.0, 0.0));
        assert_eq!(sin_cos_degrees(450.0), (1.0, 0.0));
        let (s, c) = sin_cos_degrees(180.0);
        assert_eq!(s, 0.0);
        assert_eq!(c, -1.0);
    }

    #[test]
    fn test_four_segment_projection() {
        let mut segments = slice_columns(&striped(4, 3));
        for seg in &mut segments {
            seg.project(90.0, 1, (10, 20));
        }
        let depths: Vec<f64> = segments.iter().map(Segment::depth).collect();
        assert_eq!(depths, vec![2.0, 1.0, 2.0, 3.0]);
        let visible: Vec<usize> = (0..4).filter(|&i| segments[i].is_visible()).collect();
        assert_eq!(visible, vec![0, 2, 3]);

        // 180° puts segment 0 at the far left, 90° puts segment 3 at the front
        assert_eq!(segments[0].screen_position(), (2, 20));
        assert_eq!(segments[3].screen_position(), (10, 22));
        assert_eq!(segments[3].top_left(), (10, 19));
    }

    #[test]
    fn test_projection_scales_track() {
        let mut segments = slice_columns(&striped(4, 3));
        segments[3].project(90.0, 3, (0, 0));
        assert_eq!(segments[3].screen_position(), (0, 6));
        segments[1].project(0.0, 3, (0, 0));
        assert_eq!(segments[1].screen_position(), (-24, 0));
    }

    proptest! {
        #[test]
        fn prop_slices_concatenate_to_source(width in 1u32..40, height in 1u32..12) {
            let source = striped(width, height);
            let segments = slice_columns(&source);
            prop_assert_eq!(segments.len(), width as usize);
            for (x, seg) in segments.iter().enumerate() {
                for y in 0..height as i32 {
                    prop_assert_eq!(seg.image().get_pixel_rgba(0, y), source.get_pixel_rgba(x as i32, y));
                }
            }
        }

        #[test]
        fn prop_depth_in_range_and_tracks_sine(count in 1u32..120, half_angle in 0u32..180) {
            let master = (half_angle * 2) as f64;
            let mut segments = slice_columns(&striped(count, 1));
            for seg in &mut segments {
                seg.project(master, 3, (0, 0));
                let (sin, _) = sin_cos_degrees(seg.phase_degrees + master);
                prop_assert!((1.0..=3.0).contains(&seg.depth()));
                prop_assert_eq!(seg.is_visible(), sin >= 0.0);
            }
        }
    }
}
