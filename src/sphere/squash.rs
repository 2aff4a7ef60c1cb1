//! Squash-stretch wobble layered on top of the finished sphere

use rand::Rng;

/// Base output size in sprite pixels, before the stretch is added
pub const BASE_SIZE: i32 = 18;
/// Growth per tick while stretching
const GROW_RATE: f64 = 0.5;
const GROW: f64 = 1.0;
const SHRINK: f64 = -2.0;
/// Below this the stretch starts growing again
const GROW_FLOOR: f64 = 0.5;
/// Upward launch speed range applied when a stretch peaks on the ground
pub const BOUNCE_IMPULSE: std::ops::RangeInclusive<i32> = -10..=-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquashStretch {
    grow_x: f64,
    grow_y: f64,
    direction: f64,
    max_stretch: f64,
}

impl SquashStretch {
    /// Start at a random whole-number stretch in [0, max_stretch]
    pub fn new<R: Rng>(max_stretch: f64, rng: &mut R) -> Self {
        let max_stretch = max_stretch.max(0.0);
        let start = rng.random_range(0..=max_stretch.floor() as i32);
        Self::with_state(max_stretch, start as f64, GROW)
    }

    /// Explicit starting state
    pub fn with_state(max_stretch: f64, grow_x: f64, direction: f64) -> Self {
        Self {
            grow_x,
            grow_y: (max_stretch - grow_x).abs(),
            direction,
            max_stretch,
        }
    }

    pub fn grow_x(&self) -> f64 {
        self.grow_x
    }

    pub fn grow_y(&self) -> f64 {
        self.grow_y
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn max_stretch(&self) -> f64 {
        self.max_stretch
    }

    /// Advance one tick. Returns an upward velocity when a stretch peaks
    /// while the sphere stands on the ground.
    pub fn step<R: Rng>(&mut self, on_ground: bool, rng: &mut R) -> Option<i32> {
        let mut impulse = None;
        if self.grow_x > self.max_stretch {
            self.direction = SHRINK;
            if on_ground {
                impulse = Some(rng.random_range(BOUNCE_IMPULSE));
            }
        }
        if self.grow_x < GROW_FLOOR {
            self.direction = GROW;
        }

        self.grow_x = (self.grow_x + GROW_RATE * self.direction).max(0.0);
        self.grow_y = (self.max_stretch - self.grow_x).abs();
        impulse
    }

    /// Output size in canvas pixels for a sphere of the given scale
    pub fn output_size(&self, scale: u32) -> (u32, u32) {
        let w = BASE_SIZE + self.grow_x.round_ties_even() as i32;
        let h = BASE_SIZE + self.grow_y.round_ties_even() as i32;
        (w.max(0) as u32 * scale, h.max(0) as u32 * scale)
    }
}
