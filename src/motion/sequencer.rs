//! Scroll-driven reveal sequencing.
//!
//! A [`Sequencer`] binds one [`Timeline`] to one scroll trigger. In toggle mode
//! entering or leaving the trigger's range plays, reverses or restarts the
//! timeline on its own clock. In scrub mode the timeline's progress follows the
//! scroll progress through the range. Either way the timeline can always be
//! sampled, so scrolling back out of a range returns every target to its exact
//! initial descriptor.

use super::lifecycle::Lifecycle;
use super::playback::{Playhead, Scrub};
use super::timeline::Timeline;
use super::trigger::{Layout, ScrollObserver, ScrollRange, ToggleActions, TriggerSpec};
use super::visual::{TargetId, VisualState};

/// The element whose position defines a trigger's range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Anchor {
    /// The scope's own root element (usually the section)
    Root,
    Target(TargetId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drive {
    /// Time-based playback switched by trigger events
    Toggle(ToggleActions),
    /// Progress follows scroll with the given lag in seconds
    Scrub(f64),
}

#[derive(Clone, Debug)]
pub struct Sequencer {
    anchor: Anchor,
    trigger: TriggerSpec,
    timeline: Timeline,
    drive: Drive,
    pin: bool,
    range: Option<ScrollRange>,
    observer: ScrollObserver,
    playhead: Playhead,
    scrub: Scrub,
    last_scroll: Option<f64>,
    running: bool,
}

impl Sequencer {
    pub fn new(anchor: Anchor, trigger: TriggerSpec, timeline: Timeline, drive: Drive) -> Self {
        let duration = timeline.duration();
        let lag = match drive {
            Drive::Scrub(lag) => lag,
            Drive::Toggle(_) => 0.0,
        };
        Self {
            anchor,
            trigger,
            timeline,
            drive,
            pin: false,
            range: None,
            observer: ScrollObserver::new(),
            playhead: Playhead::new(duration),
            scrub: Scrub::new(lag),
            last_scroll: None,
            running: true,
        }
    }

    /// Holds the anchor in place while the scroll position is inside the range.
    pub fn pinned(mut self) -> Self {
        self.pin = true;
        self
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn range(&self) -> Option<ScrollRange> {
        self.range
    }

    pub fn is_measured(&self) -> bool {
        self.range.is_some()
    }

    /// (Re)computes the scroll range. Scroll input before the first
    /// measurement is remembered and replayed here.
    pub fn measure(&mut self, layout: &Layout) {
        let first = self.range.is_none();
        let range = self.trigger.range(layout);
        self.range = Some(range);
        if let Some(scroll) = self.last_scroll {
            if first {
                if let Drive::Scrub(_) = self.drive {
                    self.scrub.snap(range.progress(scroll));
                }
            }
            self.on_scroll(scroll);
        }
    }

    pub fn on_scroll(&mut self, scroll: f64) {
        self.last_scroll = Some(scroll);
        if !self.running {
            return;
        }
        let Some(range) = self.range else {
            return;
        };
        match self.drive {
            Drive::Toggle(actions) => {
                for event in self.observer.update(&range, scroll) {
                    self.playhead.apply(actions.action(event));
                }
            }
            Drive::Scrub(_) => {
                self.observer.update(&range, scroll);
                self.scrub.set_target(range.progress(scroll));
            }
        }
    }

    /// Advances playback by `dt` seconds. Returns whether the visual state moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.running || self.timeline.is_empty() {
            return false;
        }
        match self.drive {
            Drive::Toggle(_) => self.playhead.tick(dt),
            Drive::Scrub(_) => self.scrub.tick(dt),
        }
    }

    pub fn time(&self) -> f64 {
        match self.drive {
            Drive::Toggle(_) => self.playhead.time(),
            Drive::Scrub(_) => self.scrub.progress() * self.timeline.duration(),
        }
    }

    pub fn states(&self) -> Vec<(TargetId, VisualState)> {
        self.timeline.sample(self.time())
    }

    pub fn initial_states(&self) -> Vec<(TargetId, VisualState)> {
        self.timeline.initial_states()
    }

    pub fn is_settled(&self) -> bool {
        match self.drive {
            Drive::Toggle(_) => !self.playhead.is_running(),
            Drive::Scrub(_) => self.scrub.is_settled(),
        }
    }

    /// Translation that keeps a pinned anchor visually fixed at `scroll`.
    pub fn pin_offset(&self, scroll: f64) -> Option<f64> {
        if !self.pin {
            return None;
        }
        let range = self.range?;
        Some((scroll - range.start).clamp(0.0, range.length()))
    }

    /// Layout space a pinned anchor needs below it for the pinned stretch.
    pub fn pin_spacing(&self) -> f64 {
        match (self.pin, self.range) {
            (true, Some(range)) => range.length(),
            _ => 0.0,
        }
    }

    pub fn revert(&mut self) {
        self.playhead.reset();
        self.scrub.snap(0.0);
        self.observer = ScrollObserver::new();
    }
}

impl Lifecycle for Sequencer {
    fn start(&mut self) {
        self.running = true;
        if let Some(scroll) = self.last_scroll {
            self.on_scroll(scroll);
        }
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn cancel(&mut self) {
        self.running = false;
        self.revert();
        self.range = None;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
