//! Playheads over a timeline: time-driven for toggled reveals, and a smoothed
//! scroll-driven progress for scrubbed ones.

use super::trigger::ToggleAction;

/// Below this distance a scrub snaps onto its target.
const SCRUB_EPSILON: f64 = 1e-4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

#[derive(Clone, Debug, Default)]
pub struct Playhead {
    time: f64,
    duration: f64,
    direction: Direction,
    running: bool,
}

impl Playhead {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(0.0),
            ..Default::default()
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.running = self.time < self.duration;
    }

    pub fn reverse(&mut self) {
        self.direction = Direction::Reverse;
        self.running = self.time > 0.0;
    }

    pub fn restart(&mut self) {
        self.time = 0.0;
        self.play();
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        match self.direction {
            Direction::Forward => self.play(),
            Direction::Reverse => self.reverse(),
        }
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.direction = Direction::Forward;
        self.running = false;
    }

    pub fn complete(&mut self) {
        self.time = self.duration;
        self.direction = Direction::Forward;
        self.running = false;
    }

    pub fn apply(&mut self, action: ToggleAction) {
        match action {
            ToggleAction::Play => self.play(),
            ToggleAction::Pause => self.pause(),
            ToggleAction::Resume => self.resume(),
            ToggleAction::Reverse => self.reverse(),
            ToggleAction::Restart => self.restart(),
            ToggleAction::Reset => self.reset(),
            ToggleAction::Complete => self.complete(),
            ToggleAction::None => {}
        }
    }

    /// Advances by `dt` seconds. Returns whether the time moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.running {
            return false;
        }
        let before = self.time;
        match self.direction {
            Direction::Forward => {
                self.time = (self.time + dt.max(0.0)).min(self.duration);
                if self.time >= self.duration {
                    self.running = false;
                }
            }
            Direction::Reverse => {
                self.time = (self.time - dt.max(0.0)).max(0.0);
                if self.time <= 0.0 {
                    self.time = 0.0;
                    self.running = false;
                }
            }
        }
        self.time != before
    }
}

/// Progress that chases a scroll-derived target, taking roughly `lag` seconds
/// to catch up. A lag of zero binds progress directly to scroll.
#[derive(Clone, Debug, Default)]
pub struct Scrub {
    current: f64,
    target: f64,
    lag: f64,
}

impl Scrub {
    pub fn new(lag: f64) -> Self {
        Self {
            lag: lag.max(0.0),
            ..Default::default()
        }
    }

    pub fn progress(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, progress: f64) {
        self.target = progress.clamp(0.0, 1.0);
        if self.lag == 0.0 {
            self.current = self.target;
        }
    }

    /// Jumps straight to `progress` with no smoothing.
    pub fn snap(&mut self, progress: f64) {
        self.target = progress.clamp(0.0, 1.0);
        self.current = self.target;
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        if self.is_settled() {
            return false;
        }
        let k = 1.0 - (-4.0 * dt.max(0.0) / self.lag).exp();
        self.current += (self.target - self.current) * k;
        if (self.target - self.current).abs() < SCRUB_EPSILON {
            self.current = self.target;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_then_reverse_lands_on_zero() {
        let mut p = Playhead::new(1.0);
        p.play();
        for _ in 0..7 {
            p.tick(1.0 / 60.0);
        }
        p.reverse();
        while p.tick(1.0 / 60.0) {}
        assert_eq!(p.time(), 0.0);
        assert!(!p.is_running());
    }

    #[test]
    fn test_play_stops_at_end() {
        let mut p = Playhead::new(0.5);
        p.apply(ToggleAction::Play);
        assert!(p.tick(0.4));
        assert!(p.tick(0.4));
        assert_eq!(p.time(), 0.5);
        assert!(!p.tick(0.4));
    }

    #[test]
    fn test_restart_reset_complete() {
        let mut p = Playhead::new(2.0);
        p.complete();
        assert_eq!(p.time(), 2.0);
        p.apply(ToggleAction::Restart);
        assert_eq!(p.time(), 0.0);
        assert!(p.is_running());
        p.tick(0.5);
        p.apply(ToggleAction::Pause);
        assert!(!p.tick(0.5));
        p.apply(ToggleAction::Resume);
        assert!(p.tick(0.5));
        assert_eq!(p.time(), 1.0);
        p.apply(ToggleAction::Reset);
        assert_eq!(p.time(), 0.0);
        assert!(!p.is_running());
        p.apply(ToggleAction::None);
        assert!(!p.is_running());
    }

    #[test]
    fn test_reverse_at_zero_is_idle() {
        let mut p = Playhead::new(1.0);
        p.reverse();
        assert!(!p.is_running());
        assert!(!p.tick(0.1));
    }

    #[test]
    fn test_scrub_converges_exactly() {
        let mut s = Scrub::new(0.6);
        s.set_target(1.0);
        let mut frames = 0;
        while s.tick(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 600, "scrub never settled");
        }
        assert_eq!(s.progress(), 1.0);
        s.set_target(0.0);
        while s.tick(1.0 / 60.0) {}
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn test_zero_lag_binds_directly() {
        let mut s = Scrub::new(0.0);
        s.set_target(0.4);
        assert_eq!(s.progress(), 0.4);
        assert!(!s.tick(0.016));
    }
}
