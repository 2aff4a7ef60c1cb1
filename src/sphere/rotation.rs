//! Back-and-forth heading for the sphere's "look around" motion

/// Heading at construction, in degrees
pub const START_ANGLE: f64 = 90.0;
/// Degrees per tick
pub const ROTATION_SPEED: f64 = 2.0;
/// Soft bounds: reaching either one flips the direction on the next check.
/// They are triggers, not clamps.
pub const LOWER_BOUND: f64 = 90.0;
pub const UPPER_BOUND: f64 = 270.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    angle: f64,
    speed: f64,
}

impl Rotation {
    pub fn new() -> Self {
        Self {
            angle: START_ANGLE,
            speed: ROTATION_SPEED,
        }
    }

    /// Master angle in degrees, always in [0, 360)
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Signed degrees per tick
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Check the bounds, then advance, then wrap. The order matters: the
    /// bound check sees last tick's wrapped angle.
    pub fn step(&mut self) {
        if self.angle >= UPPER_BOUND {
            self.speed = -ROTATION_SPEED;
        } else if self.angle <= LOWER_BOUND {
            self.speed = ROTATION_SPEED;
        }

        self.angle = (self.angle + self.speed).rem_euclid(360.0);
        // rem_euclid can land on the modulus itself for tiny negative inputs
        if self.angle >= 360.0 {
            self.angle = 0.0;
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sweeps_to_upper_bound() {
        let mut rotation = Rotation::new();
        for _ in 0..90 {
            rotation.step();
        }
        assert_eq!(rotation.angle(), 270.0);
        assert_eq!(rotation.speed(), ROTATION_SPEED);

        // The next check sees 270 and reverses before advancing
        rotation.step();
        assert_eq!(rotation.speed(), -ROTATION_SPEED);
        assert_eq!(rotation.angle(), 268.0);
    }

    #[test]
    fn test_full_oscillation_period() {
        let mut rotation = Rotation::new();
        for _ in 0..180 {
            rotation.step();
        }
        assert_eq!(rotation.angle(), 90.0);
        rotation.step();
        assert_eq!(rotation.speed(), ROTATION_SPEED);
        assert_eq!(rotation.angle(), 92.0);
    }

    proptest! {
        #[test]
        fn prop_angle_stays_normalized(ticks in 0usize..2000) {
            let mut rotation = Rotation::new();
            for _ in 0..ticks {
                rotation.step();
                prop_assert!((0.0..360.0).contains(&rotation.angle()));
            }
        }
    }
}
