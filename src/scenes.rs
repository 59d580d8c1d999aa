//! Per-section choreographies, built from the motion engine.
//!
//! Every builder takes the target ids of its section's elements, numbered in
//! document order by a [`Cast`], and returns a [`Scene`] ready to be handed to
//! a controller. Threshold strings are parsed here so a typo degrades a single
//! section to "no animation" rather than the whole page.

pub mod achievements;
pub mod experience;
pub mod hero;
pub mod projects;

use thiserror::Error;

use crate::motion::trigger::{ToggleActions, ToggleActionsParseError};
use crate::motion::{TargetId, ThresholdParseError, TriggerSpec};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error(transparent)]
    Threshold(#[from] ThresholdParseError),
    #[error(transparent)]
    ToggleActions(#[from] ToggleActionsParseError),
}

/// Hands out target ids in the order the DOM side collects elements.
#[derive(Debug, Default)]
pub struct Cast {
    next: usize,
}

impl Cast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn one(&mut self) -> TargetId {
        let id = TargetId(self.next);
        self.next += 1;
        id
    }

    /// `Some` id when the element exists.
    pub fn maybe(&mut self, present: bool) -> Option<TargetId> {
        present.then(|| self.one())
    }

    pub fn many(&mut self, count: usize) -> Vec<TargetId> {
        (0..count).map(|_| self.one()).collect()
    }

    pub fn len(&self) -> usize {
        self.next
    }

    pub fn is_empty(&self) -> bool {
        self.next == 0
    }
}

fn trigger(start: &str, end: Option<&str>) -> Result<TriggerSpec, SceneError> {
    Ok(TriggerSpec::new(start, end)?)
}

fn toggle(actions: &str) -> Result<ToggleActions, SceneError> {
    Ok(actions.parse()?)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::BTreeMap;

    use crate::motion::lifecycle::testing::RecordingStage;
    use crate::motion::listeners::testing::FakeHost;
    use crate::motion::{Controller, TargetId, VisualState};

    pub type TestController = Controller<RecordingStage, FakeHost>;

    pub fn settle(c: &mut TestController) {
        let mut frames = 0;
        while c.tick(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 100_000, "animation never settled");
        }
    }

    /// Scrolls to `scroll` in `steps` increments, letting animations run.
    pub fn scroll_to(c: &mut TestController, from: f64, to: f64, steps: usize) {
        for i in 1..=steps {
            let s = from + (to - from) * i as f64 / steps as f64;
            c.on_scroll(s);
            c.tick(1.0 / 60.0);
        }
        settle(c);
    }

    pub fn styles(c: &TestController) -> BTreeMap<TargetId, VisualState> {
        c.stage().styles.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_numbers_in_order() {
        let mut cast = Cast::new();
        assert_eq!(cast.maybe(false), None);
        assert_eq!(cast.one(), TargetId(0));
        assert_eq!(cast.many(2), vec![TargetId(1), TargetId(2)]);
        assert_eq!(cast.maybe(true), Some(TargetId(3)));
        assert_eq!(cast.len(), 4);
    }

    #[test]
    fn test_bad_thresholds_are_errors() {
        assert!(matches!(
            trigger("top", None),
            Err(SceneError::Threshold(_))
        ));
        assert!(matches!(
            toggle("play none"),
            Err(SceneError::ToggleActions(_))
        ));
    }
}
