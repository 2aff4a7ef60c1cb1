//! Pseudo-3D sphere built from a flat sprite
//!
//! The sprite is cut into 1-pixel columns that ride around a wide, shallow
//! elliptical track. Each tick every column is re-projected from its fixed
//! phase plus the sphere's heading; the columns facing the viewer are drawn
//! back to front and the result is clipped to a disk, stretched, and stamped
//! with an outline.

mod composite;
mod depth;
mod physics;
mod rotation;
mod segment;
mod squash;

pub use depth::draw_order;
pub use physics::{Body, Rect};
pub use rotation::Rotation;
pub use segment::{slice_columns, Segment};
pub use squash::SquashStretch;

use rand::Rng;

use crate::display::{PixelBuffer, Rgba, TRANSPARENT};
use segment::TRACK_RADIUS_X;

/// Extra rows around the scaled sprite on the working surface
const SURFACE_MARGIN: u32 = 2;

/// Construction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    /// Integer magnification of the sprite and every radius
    pub scale: u32,
    /// Outline stroke width in pixels
    pub thickness: i32,
    /// Squash-stretch amplitude
    pub max_stretch: f64,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            scale: 3,
            thickness: 2,
            max_stretch: 10.0,
        }
    }
}

pub struct Sphere {
    scale: u32,
    thickness: i32,
    /// Mirrored, scaled sprite; read-only after construction
    source: PixelBuffer,
    segments: Vec<Segment>,
    background: Rgba,
    /// Working surface is `side`x`side`
    side: u32,
    /// Disk clip for the working surface; depends only on `side` and `scale`
    clip: PixelBuffer,
    rotation: Rotation,
    squash: SquashStretch,
    body: Body,
}

impl Sphere {
    /// Build a sphere from a decoded sprite, centred on `anchor`
    pub fn new<R: Rng>(sprite: &PixelBuffer, anchor: (i32, i32), params: &SphereParams, rng: &mut R) -> Self {
        let scale = params.scale.max(1);

        let mirrored = sprite.flipped_horizontal();
        let background = mirrored.get_pixel_rgba(0, 0).unwrap_or(TRANSPARENT);
        let source = mirrored.scaled(mirrored.width() * scale, mirrored.height() * scale);

        let side = source.height() + SURFACE_MARGIN;
        let center = (side as i32 / 2, side as i32 / 2);
        let radius = (TRACK_RADIUS_X * scale as f64) as i32;
        let clip = composite::clip_overlay(side, center, radius);

        let segments = slice_columns(&source);
        log::debug!(
            "Sphere at {:?}: {} segments, working surface {}x{}",
            anchor,
            segments.len(),
            side,
            side
        );

        let mut sphere = Self {
            scale,
            thickness: params.thickness,
            source,
            segments,
            background,
            side,
            clip,
            rotation: Rotation::new(),
            squash: SquashStretch::new(params.max_stretch, rng),
            body: Body::new(Rect::from_center(anchor, side as i32, side as i32)),
        };
        sphere.layout();
        sphere
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Fill color between slices, sampled from the mirrored sprite's corner
    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn master_angle(&self) -> f64 {
        self.rotation.angle()
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    pub fn squash(&self) -> &SquashStretch {
        &self.squash
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Current on-screen centre
    pub fn position(&self) -> (i32, i32) {
        self.body.rect().center()
    }

    /// One tick: turn, fall, wobble. `floor` is the y the sphere rests on.
    pub fn update<R: Rng>(&mut self, floor: i32, rng: &mut R) {
        self.rotation.step();
        self.layout();

        self.body.step(floor);
        if let Some(vel_y) = self.squash.step(self.body.on_ground(), rng) {
            self.body.launch(vel_y);
        }

        let (w, h) = self.squash.output_size(self.scale);
        self.body.resize(w as i32, h as i32, floor);
    }

    /// Re-project every segment for the current heading
    fn layout(&mut self) {
        let angle = self.rotation.angle();
        let anchor = (self.side as i32 / 2, self.side as i32);
        for segment in &mut self.segments {
            segment.project(angle, self.scale, anchor);
        }
    }

    /// The clipped, stretched sphere image for the current state, without outline
    pub fn render(&self) -> PixelBuffer {
        let order = draw_order(&self.segments);
        let surface = composite::compose(self.side, self.background, &self.segments, &order, &self.clip);
        let (w, h) = self.squash.output_size(self.scale);
        surface.scaled(w, h)
    }

    /// Draw onto `dest`, centred on the sphere's position
    pub fn draw(&self, dest: &mut PixelBuffer) {
        let image = self.render();
        let rect = Rect::from_center(self.position(), image.width() as i32, image.height() as i32);
        composite::stamp_outlined(dest, &image, rect.x, rect.y, self.thickness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::procedural_face;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FLOOR: i32 = 240;

    fn sphere(seed: u64) -> (Sphere, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let sphere = Sphere::new(&procedural_face(16), (200, 120), &SphereParams::default(), &mut rng);
        (sphere, rng)
    }

    #[test]
    fn test_construction_state() {
        let (sphere, _) = sphere(1);
        assert_eq!(sphere.segments().len(), 150);
        assert_eq!(sphere.source().height(), 48);
        assert_eq!(sphere.master_angle(), 90.0);
        assert_eq!(sphere.position(), (200, 120));
        assert_eq!(sphere.background().3, 255);
    }

    #[test]
    fn test_background_sampled_after_mirroring() {
        let mut sprite = PixelBuffer::with_size(3, 1);
        sprite.set_pixel(0, 0, 10, 10, 10);
        sprite.set_pixel(2, 0, 99, 0, 0);
        let mut rng = Pcg32::seed_from_u64(5);
        let sphere = Sphere::new(&sprite, (0, 0), &SphereParams::default(), &mut rng);
        assert_eq!(sphere.background(), (99, 0, 0, 255));
    }

    #[test]
    fn test_update_lands_on_floor() {
        let (mut sphere, mut rng) = sphere(2);
        for _ in 0..300 {
            sphere.update(FLOOR, &mut rng);
            assert!(sphere.body().rect().bottom() <= FLOOR);
            assert!((0.0..360.0).contains(&sphere.master_angle()));
        }
    }

    #[test]
    fn test_stretch_peak_on_floor_bounces() {
        let (mut sphere, mut rng) = sphere(8);
        sphere.body = Body::new(Rect {
            x: 0,
            y: FLOOR - 54,
            w: 54,
            h: 54,
        });
        sphere.squash = SquashStretch::with_state(10.0, 10.5, 1.0);

        sphere.update(FLOOR, &mut rng);
        assert!((-10..=-8).contains(&sphere.body().vel_y()));

        sphere.update(FLOOR, &mut rng);
        assert!(sphere.body().rect().bottom() < FLOOR);
        assert!(sphere.body().vel_y() < 0);
        assert!(!sphere.body().on_ground());
    }

    #[test]
    fn test_stretch_peak_in_air_does_not_bounce() {
        let (mut sphere, mut rng) = sphere(9);
        sphere.body = Body::new(Rect {
            x: 0,
            y: 0,
            w: 54,
            h: 54,
        });
        sphere.squash = SquashStretch::with_state(10.0, 10.5, 1.0);

        sphere.update(FLOOR, &mut rng);
        assert_eq!(sphere.body().vel_y(), 1);
    }

    #[test]
    fn test_render_matches_output_size() {
        let (mut sphere, mut rng) = sphere(3);
        sphere.update(FLOOR, &mut rng);
        let image = sphere.render();
        assert_eq!((image.width(), image.height()), sphere.squash().output_size(3));
    }

    #[test]
    fn test_draw_is_repeatable() {
        let (mut sphere, mut rng) = sphere(4);
        for _ in 0..17 {
            sphere.update(FLOOR, &mut rng);
        }
        let mut first = PixelBuffer::with_size(400, 240);
        let mut second = PixelBuffer::with_size(400, 240);
        first.clear(50, 50, 50);
        second.clear(50, 50, 50);
        sphere.draw(&mut first);
        sphere.draw(&mut second);
        assert!(first == second);
    }

    #[test]
    fn test_draw_outlines_the_body() {
        let (mut sphere, mut rng) = sphere(6);
        sphere.update(FLOOR, &mut rng);
        let mut canvas = PixelBuffer::with_size(400, 240);
        canvas.clear(50, 50, 50);
        sphere.draw(&mut canvas);

        let (cx, cy) = sphere.position();
        assert_eq!(canvas.get_pixel_rgba(cx, cy).map(|p| p.3), Some(255));
        assert_ne!(canvas.get_pixel_rgba(cx, cy), Some((50, 50, 50, 255)));

        // Walk left from the centre; the first non-body pixel is outline
        let body = sphere.render();
        let half = body.width() as i32 / 2;
        let outline_seen = (cx - half - 3..cx).any(|x| canvas.get_pixel_rgba(x, cy) == Some((1, 1, 1, 255)));
        assert!(outline_seen);
    }

    #[test]
    fn test_zero_width_sprite_draws_nothing() {
        let mut rng = Pcg32::seed_from_u64(7);
        let sphere = Sphere::new(&PixelBuffer::with_size(0, 16), (100, 100), &SphereParams::default(), &mut rng);
        assert!(sphere.segments().is_empty());
        let mut canvas = PixelBuffer::with_size(200, 200);
        canvas.clear(50, 50, 50);
        let before = canvas.clone();
        sphere.draw(&mut canvas);
        assert!(canvas == before);
    }

    #[test]
    fn test_same_seed_same_frames() {
        let (mut a, mut rng_a) = sphere(11);
        let (mut b, mut rng_b) = sphere(11);
        for _ in 0..40 {
            a.update(FLOOR, &mut rng_a);
            b.update(FLOOR, &mut rng_b);
        }
        assert_eq!(a.position(), b.position());
        assert!(a.render() == b.render());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_tick_invariants(seed in any::<u64>(), ticks in 1usize..200) {
            let (mut sphere, mut rng) = sphere(seed);
            for _ in 0..ticks {
                sphere.update(FLOOR, &mut rng);
                let squash = sphere.squash();
                prop_assert!((0.0..360.0).contains(&sphere.master_angle()));
                prop_assert_eq!(squash.grow_y(), (squash.max_stretch() - squash.grow_x()).abs());
                prop_assert!(sphere.segments().iter().all(|s| (1.0..=3.0).contains(&s.depth())));
                prop_assert!(sphere.body().rect().bottom() <= FLOOR);
            }
        }
    }
}
