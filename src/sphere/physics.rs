//! Vertical fall-and-land integrator that drives the bounce

/// Downward acceleration per tick
const GRAVITY: i32 = 1;
/// Fall speed cap
const TERMINAL_VELOCITY: i32 = 8;

/// Integer screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn from_center(center: (i32, i32), w: i32, h: i32) -> Self {
        Self {
            x: center.0 - w / 2,
            y: center.1 - h / 2,
            w,
            h,
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

/// Position and vertical motion of one sphere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    rect: Rect,
    vel_y: i32,
    on_ground: bool,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            vel_y: 0,
            on_ground: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn vel_y(&self) -> i32 {
        self.vel_y
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    /// Fall one tick, landing on `floor` (a y coordinate)
    pub fn step(&mut self, floor: i32) {
        self.on_ground = false;
        self.vel_y = (self.vel_y + GRAVITY).min(TERMINAL_VELOCITY);

        let mut dy = self.vel_y;
        if self.rect.bottom() + dy >= floor {
            self.vel_y = 0;
            dy = floor - self.rect.bottom();
            self.on_ground = true;
        }
        self.rect.y += dy;
    }

    /// Replace the vertical velocity (negative is up)
    pub fn launch(&mut self, vel_y: i32) {
        self.vel_y = vel_y;
    }

    /// Resize around the current centre, then keep the bottom edge above `floor`
    pub fn resize(&mut self, w: i32, h: i32, floor: i32) {
        self.rect = Rect::from_center(self.rect.center(), w, h);
        if self.rect.bottom() > floor {
            self.rect.y = floor - h;
        }
    }
}
