//! Hero: pinned for three viewports while the "scroll down" hint floats away
//! and the headline rises into the centre.

use super::{trigger, SceneError};
use crate::motion::{
    Anchor, Choreography, Drive, Ease, Position, Props, Scene, Sequencer, TargetId, Timeline,
    Tweening,
};

const START: &str = "top top";
const END: &str = "+=300%";
const SCRUB: f64 = 0.6;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeroTargets {
    pub hint: Option<TargetId>,
    pub headline: Option<TargetId>,
}

pub fn timeline(targets: &HeroTargets) -> Timeline {
    let hint = targets.hint.as_slice();
    let headline = targets.headline.as_slice();
    let rise = Tweening::new(1.0).ease(Ease::Power2Out);

    let mut tl = Timeline::new();
    tl.from_to(
        hint,
        Props::new().y_vh(0.0).opacity(1.0),
        Props::new().y_vh(-45.0).opacity(0.0),
        rise,
        Position::At(0.0),
    )
    .from_to(
        headline,
        Props::new().y_vh(100.0).opacity(0.0),
        Props::new().y_vh(0.0).opacity(1.0),
        rise,
        Position::At(0.0),
    )
    .to(
        headline,
        Props::new().y_vh(-3.0),
        Tweening::new(0.8).ease(Ease::SineInOut),
        Position::Relative(0.1),
    );
    tl
}

pub fn scene(targets: &HeroTargets) -> Result<Scene, SceneError> {
    let pin = Sequencer::new(
        Anchor::Root,
        trigger(START, Some(END))?,
        timeline(targets),
        Drive::Scrub(SCRUB),
    )
    .pinned();
    Ok(Scene::fixed(Choreography::new().sequencer(pin)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::lifecycle::testing::RecordingStage;
    use crate::motion::Layout;
    use crate::scenes::testing::{scroll_to, settle, styles, TestController};

    const VIEWPORT: f64 = 800.0;

    fn targets() -> HeroTargets {
        HeroTargets {
            hint: Some(TargetId(0)),
            headline: Some(TargetId(1)),
        }
    }

    fn mounted() -> TestController {
        let stage = RecordingStage::default().with_layout(
            Anchor::Root,
            Layout {
                top: 0.0,
                height: VIEWPORT,
                viewport_height: VIEWPORT,
            },
        );
        let mut c = TestController::new("hero", stage, scene(&targets()).unwrap());
        c.mount(0.0);
        c
    }

    #[test]
    fn test_initial_states() {
        let c = mounted();
        let s = styles(&c);
        assert_eq!(s[&TargetId(0)].opacity, 1.0);
        assert_eq!(s[&TargetId(0)].y_vh, 0.0);
        assert_eq!(s[&TargetId(1)].opacity, 0.0);
        assert_eq!(s[&TargetId(1)].y_vh, 100.0);
    }

    #[test]
    fn test_scrub_through_pin_and_back() {
        let mut c = mounted();
        let initial = styles(&c);

        scroll_to(&mut c, 0.0, 3.0 * VIEWPORT, 40);
        let s = styles(&c);
        assert_eq!(s[&TargetId(0)].opacity, 0.0);
        assert_eq!(s[&TargetId(0)].y_vh, -45.0);
        assert_eq!(s[&TargetId(1)].opacity, 1.0);
        assert_eq!(s[&TargetId(1)].y_vh, -3.0);
        assert_eq!(
            c.stage().pins[&Anchor::Root],
            (3.0 * VIEWPORT, 3.0 * VIEWPORT)
        );

        scroll_to(&mut c, 3.0 * VIEWPORT, 0.0, 40);
        assert_eq!(styles(&c), initial);
        assert_eq!(c.stage().pins[&Anchor::Root].0, 0.0);
    }

    #[test]
    fn test_halfway_is_in_between() {
        let mut c = mounted();
        c.on_scroll(1.2 * VIEWPORT);
        settle(&mut c);
        let headline = styles(&c)[&TargetId(1)];
        assert!(headline.opacity > 0.0 && headline.opacity <= 1.0);
        assert!(headline.y_vh < 100.0);
    }

    #[test]
    fn test_missing_elements_still_pin() {
        let mut c = TestController::new(
            "hero",
            RecordingStage::default().with_layout(
                Anchor::Root,
                Layout {
                    top: 0.0,
                    height: VIEWPORT,
                    viewport_height: VIEWPORT,
                },
            ),
            scene(&HeroTargets::default()).unwrap(),
        );
        c.mount(100.0);
        assert!(styles(&c).is_empty());
        assert_eq!(c.stage().pins[&Anchor::Root], (100.0, 3.0 * VIEWPORT));
        c.unmount();
        assert!(c.stage().pins.is_empty());
    }
}
