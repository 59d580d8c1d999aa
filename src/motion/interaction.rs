//! Pointer and focus micro-interactions layered on top of reveal states.

use super::easing::Ease;
use super::visual::{Props, VisualState};

/// Eases between the revealed state and a "lifted" one on hover or focus.
#[derive(Clone, Debug)]
pub struct HoverLift {
    lifted: Props,
    enter_duration: f64,
    leave_duration: f64,
    ease: Ease,
    amount: f64,
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
}

impl HoverLift {
    pub fn new(lifted: Props, enter_duration: f64, leave_duration: f64) -> Self {
        Self {
            lifted,
            enter_duration,
            leave_duration,
            ease: Ease::Power2Out,
            amount: 0.0,
            from: 0.0,
            to: 0.0,
            elapsed: 0.0,
            duration: 0.0,
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn enter(&mut self) {
        self.retarget(1.0, self.enter_duration);
    }

    pub fn leave(&mut self) {
        self.retarget(0.0, self.leave_duration);
    }

    fn retarget(&mut self, to: f64, duration: f64) {
        self.from = self.amount;
        self.to = to;
        self.elapsed = 0.0;
        self.duration = duration;
    }

    pub fn is_settled(&self) -> bool {
        self.amount == self.to
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        if self.is_settled() {
            return false;
        }
        self.elapsed += dt.max(0.0);
        let p = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        self.amount = if p >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * self.ease.apply(p)
        };
        true
    }

    pub fn reset(&mut self) {
        self.amount = 0.0;
        self.retarget(0.0, 0.0);
    }

    pub fn compose(&self, state: &mut VisualState) {
        if self.amount != 0.0 {
            Props::lerp_into(state, &Props::default(), &self.lifted, self.amount);
        }
    }
}

/// Critically damped follower for one value.
#[derive(Clone, Copy, Debug, Default)]
struct Follower {
    value: f64,
    velocity: f64,
}

impl Follower {
    /// Natural frequency (rad/s); damping is `2 * OMEGA` for no overshoot.
    const OMEGA: f64 = 12.0;
    /// Cap per integration step for stability on slow frames.
    const MAX_DT: f64 = 1.0 / 30.0;

    fn step(&mut self, target: f64, dt: f64) {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(Self::MAX_DT);
            let accel = -Self::OMEGA * Self::OMEGA * (self.value - target)
                - 2.0 * Self::OMEGA * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if (self.value - target).abs() < 1e-3 && self.velocity.abs() < 1e-3 {
            self.value = target;
            self.velocity = 0.0;
        }
    }

    fn settled_at(&self, target: f64) -> bool {
        self.value == target && self.velocity == 0.0
    }
}

#[derive(Clone, Copy, Debug)]
struct Release {
    from_x: f64,
    from_y: f64,
    elapsed: f64,
}

/// Tilts an element toward the pointer.
///
/// Pointer moves only record a target; the follower advances once per frame,
/// so any number of moves between two frames costs one update. Leaving starts
/// a release that always ends on exactly zero rotation after
/// [`PointerTilt::RELEASE`] seconds.
#[derive(Clone, Debug, Default)]
pub struct PointerTilt {
    target_x: f64,
    target_y: f64,
    rot_x: Follower,
    rot_y: Follower,
    pending: bool,
    release: Option<Release>,
}

impl PointerTilt {
    pub const MAX_ROTATE_Y: f64 = 18.0;
    pub const MAX_ROTATE_X: f64 = 12.0;
    pub const RELEASE: f64 = 0.8;
    const RELEASE_EASE: Ease = Ease::ElasticOut {
        amplitude: 1.0,
        period: 0.6,
    };

    pub fn new() -> Self {
        Self::default()
    }

    /// `px`/`py` are the pointer position within the element, 0..1 on each axis.
    /// Returns true when a frame must be requested to process the move.
    pub fn pointer_move(&mut self, px: f64, py: f64) -> bool {
        let px = px.clamp(0.0, 1.0);
        let py = py.clamp(0.0, 1.0);
        self.target_y = (px - 0.5) * Self::MAX_ROTATE_Y;
        self.target_x = (0.5 - py) * Self::MAX_ROTATE_X;
        self.release = None;
        if self.pending {
            false
        } else {
            self.pending = true;
            true
        }
    }

    pub fn pointer_leave(&mut self) {
        self.pending = false;
        self.target_x = 0.0;
        self.target_y = 0.0;
        self.rot_x.velocity = 0.0;
        self.rot_y.velocity = 0.0;
        self.release = Some(Release {
            from_x: self.rot_x.value,
            from_y: self.rot_y.value,
            elapsed: 0.0,
        });
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending
    }

    pub fn rotation(&self) -> (f64, f64) {
        (self.rot_x.value, self.rot_y.value)
    }

    pub fn is_neutral(&self) -> bool {
        self.rot_x.value == 0.0 && self.rot_y.value == 0.0
    }

    pub fn is_settled(&self) -> bool {
        self.release.is_none()
            && !self.pending
            && self.rot_x.settled_at(self.target_x)
            && self.rot_y.settled_at(self.target_y)
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        if self.is_settled() {
            return false;
        }
        self.pending = false;
        if let Some(mut release) = self.release {
            release.elapsed += dt.max(0.0);
            let p = release.elapsed / Self::RELEASE;
            if p >= 1.0 {
                self.rot_x = Follower::default();
                self.rot_y = Follower::default();
                self.release = None;
            } else {
                let k = 1.0 - Self::RELEASE_EASE.apply(p);
                self.rot_x.value = release.from_x * k;
                self.rot_y.value = release.from_y * k;
                self.release = Some(release);
            }
            return true;
        }
        self.rot_x.step(self.target_x, dt);
        self.rot_y.step(self.target_y, dt);
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn compose(&self, state: &mut VisualState) {
        state.rotate_x += self.rot_x.value;
        state.rotate_y += self.rot_y.value;
    }
}
