//! Timelines: tweens laid out on a shared clock.
//!
//! A [`Timeline`] is pure data. Sampling it at any time yields the complete
//! visual state of every target, so a playhead (time-driven or scrubbed by
//! scroll) can move in either direction and always land on the same frame.

use std::collections::BTreeMap;

use super::easing::Ease;
use super::visual::{Props, TargetId, VisualState};

/// Where a new tween is placed on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Right after everything added so far
    Sequence,
    /// Absolute time in seconds
    At(f64),
    /// Relative to the current end, e.g. `Relative(-0.12)` overlaps by 0.12s
    Relative(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StaggerFrom {
    #[default]
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    pub each: f64,
    pub from: StaggerFrom,
}

impl Stagger {
    pub fn each(each: f64) -> Self {
        Self {
            each,
            from: StaggerFrom::Start,
        }
    }

    pub fn from(mut self, from: StaggerFrom) -> Self {
        self.from = from;
        self
    }

    fn offset(&self, index: usize, count: usize) -> f64 {
        let slot = match self.from {
            StaggerFrom::Start => index,
            StaggerFrom::End => count - 1 - index,
        };
        slot as f64 * self.each
    }
}

/// Duration, easing and stagger shared by the tweens of one call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tweening {
    pub duration: f64,
    pub ease: Ease,
    pub stagger: Option<Stagger>,
}

impl Tweening {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ease: Ease::None,
            stagger: None,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub target: TargetId,
    pub from: Props,
    pub to: Props,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    /// Renders `from` even before the playhead reaches `start`
    pub immediate: bool,
}

impl Tween {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn progress(&self, time: f64) -> f64 {
        if time >= self.end() {
            1.0
        } else if self.duration <= 0.0 {
            if time >= self.start {
                1.0
            } else {
                0.0
            }
        } else {
            ((time - self.start) / self.duration).clamp(0.0, 1.0)
        }
    }

    fn render(&self, state: &mut VisualState, time: f64) {
        if time < self.start {
            if self.immediate {
                self.from.apply_to(state);
            }
            return;
        }
        let t = self.ease.apply(self.progress(time));
        Props::lerp_into(state, &self.from, &self.to, t);
    }
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    base: BTreeMap<TargetId, VisualState>,
    resolved: BTreeMap<TargetId, VisualState>,
    tweens: Vec<Tween>,
    end: f64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the state targets hold before any tween touches them.
    pub fn set(&mut self, targets: &[TargetId], props: Props) -> &mut Self {
        for target in targets {
            props.apply_to(self.base.entry(*target).or_default());
            props.apply_to(self.resolved.entry(*target).or_default());
        }
        self
    }

    pub fn from_to(
        &mut self,
        targets: &[TargetId],
        from: Props,
        to: Props,
        tweening: Tweening,
        position: Position,
    ) -> &mut Self {
        self.insert(targets, Some(from), to, tweening, position)
    }

    pub fn to(
        &mut self,
        targets: &[TargetId],
        to: Props,
        tweening: Tweening,
        position: Position,
    ) -> &mut Self {
        self.insert(targets, None, to, tweening, position)
    }

    /// Leaves an empty stretch of `duration` seconds at the end.
    pub fn pause_for(&mut self, duration: f64) -> &mut Self {
        self.end += duration.max(0.0);
        self
    }

    fn insert(
        &mut self,
        targets: &[TargetId],
        from: Option<Props>,
        to: Props,
        tweening: Tweening,
        position: Position,
    ) -> &mut Self {
        if targets.is_empty() {
            return self;
        }
        let base = match position {
            Position::Sequence => self.end,
            Position::At(t) => t,
            Position::Relative(dt) => self.end + dt,
        }
        .max(0.0);
        let count = targets.len();
        for (i, target) in targets.iter().enumerate() {
            let offset = tweening.stagger.map(|s| s.offset(i, count)).unwrap_or(0.0);
            let state = self.resolved.entry(*target).or_default();
            let resolved_from = match from {
                Some(f) => to.read_from(state).merged(&f),
                None => to.read_from(state),
            };
            if let Some(f) = from {
                f.apply_to(state);
            }
            to.apply_to(state);
            self.base.entry(*target).or_default();
            let tween = Tween {
                target: *target,
                from: resolved_from,
                to,
                start: base + offset,
                duration: tweening.duration.max(0.0),
                ease: tweening.ease,
                immediate: from.is_some(),
            };
            self.end = self.end.max(tween.end());
            self.tweens.push(tween);
        }
        self
    }

    pub fn duration(&self) -> f64 {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    pub fn targets(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.base.keys().copied()
    }

    pub fn sample_target(&self, target: TargetId, time: f64) -> VisualState {
        let mut state = self.base.get(&target).copied().unwrap_or_default();
        for tween in self.tweens.iter().filter(|t| t.target == target) {
            tween.render(&mut state, time);
        }
        state
    }

    pub fn sample(&self, time: f64) -> Vec<(TargetId, VisualState)> {
        self.targets()
            .map(|t| (t, self.sample_target(t, time)))
            .collect()
    }

    pub fn initial_states(&self) -> Vec<(TargetId, VisualState)> {
        self.sample(0.0)
    }

    pub fn final_states(&self) -> Vec<(TargetId, VisualState)> {
        self.sample(self.end)
    }
}
