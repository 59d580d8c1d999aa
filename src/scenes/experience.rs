//! Internship & Experience: the section pins while a progress line grows with
//! scroll, and each card slides in from alternating sides.

use super::{toggle, trigger, SceneError};
use crate::motion::{
    Anchor, Choreography, Drive, Ease, HoverLift, Position, Props, Scene, Sequencer, TargetId,
    Timeline, Tweening,
};

const PIN_START: &str = "top top+=80";
const PIN_END: &str = "bottom+=200 bottom";
const SCRUB: f64 = 0.6;

const CARD_START: &str = "top 85%";
const CARD_END: &str = "top 60%";
const CARD_ACTIONS: &str = "play none none reverse";
const CARD_SHIFT: f64 = 120.0;
const CARD_DURATION: f64 = 0.8;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExperienceTargets {
    pub line: Option<TargetId>,
    pub cards: Vec<TargetId>,
}

pub fn line_timeline(line: Option<TargetId>) -> Timeline {
    let mut tl = Timeline::new();
    tl.from_to(
        line.as_slice(),
        Props::new().scale_y(0.0),
        Props::new().scale_y(1.0),
        Tweening::new(1.0).ease(Ease::None),
        Position::At(0.0),
    );
    tl
}

/// Even cards enter from the left, odd ones from the right.
pub fn card_timeline(index: usize, card: TargetId) -> Timeline {
    let side = if index % 2 == 0 { -1.0 } else { 1.0 };
    let mut tl = Timeline::new();
    tl.from_to(
        &[card],
        Props::new()
            .x(side * CARD_SHIFT)
            .y(30.0)
            .opacity(0.0)
            .scale(0.995),
        Props::new().x(0.0).y(0.0).opacity(1.0).scale(1.0),
        Tweening::new(CARD_DURATION).ease(Ease::Power3Out),
        Position::At(0.0),
    );
    tl
}

pub fn hover() -> HoverLift {
    HoverLift::new(Props::new().scale(1.015), 0.18, 0.25)
}

pub fn scene(targets: &ExperienceTargets) -> Result<Scene, SceneError> {
    let pin = trigger(PIN_START, Some(PIN_END))?;
    let card_trigger = trigger(CARD_START, Some(CARD_END))?;
    let actions = toggle(CARD_ACTIONS)?;

    let choreography = targets.cards.iter().enumerate().fold(
        Choreography::new().sequencer(
            Sequencer::new(
                Anchor::Root,
                pin,
                line_timeline(targets.line),
                Drive::Scrub(SCRUB),
            )
            .pinned(),
        ),
        |c, (i, card)| {
            c.sequencer(Sequencer::new(
                Anchor::Target(*card),
                card_trigger,
                card_timeline(i, *card),
                Drive::Toggle(actions),
            ))
        },
    );
    Ok(Scene::fixed(choreography.hover(&targets.cards, hover())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::lifecycle::testing::RecordingStage;
    use crate::motion::Layout;
    use crate::scenes::testing::{scroll_to, settle, styles, TestController};
    use crate::scenes::Cast;

    const VIEWPORT: f64 = 800.0;

    fn mounted() -> TestController {
        let mut cast = Cast::new();
        let targets = ExperienceTargets {
            line: cast.maybe(true),
            cards: cast.many(5),
        };
        let mut stage = RecordingStage::default().with_layout(
            Anchor::Root,
            Layout {
                top: 3000.0,
                height: 1500.0,
                viewport_height: VIEWPORT,
            },
        );
        for (i, card) in targets.cards.iter().enumerate() {
            stage = stage.with_layout(
                Anchor::Target(*card),
                Layout {
                    top: 3100.0 + i as f64 * 260.0,
                    height: 240.0,
                    viewport_height: VIEWPORT,
                },
            );
        }
        let mut c = TestController::new("experience", stage, scene(&targets).unwrap());
        c.mount(0.0);
        c
    }

    #[test]
    fn test_cards_alternate_sides() {
        let c = mounted();
        let s = styles(&c);
        assert_eq!(s[&TargetId(0)].scale_y, 0.0);
        assert_eq!(s[&TargetId(1)].x, -120.0);
        assert_eq!(s[&TargetId(2)].x, 120.0);
        assert_eq!(s[&TargetId(3)].x, -120.0);
        assert!(s[&TargetId(1)].visibility_hidden());
    }

    #[test]
    fn test_line_follows_pin_progress() {
        let mut c = mounted();
        // pin runs from 2920 to 3900
        c.on_scroll(2920.0 + 490.0);
        settle(&mut c);
        let line = styles(&c)[&TargetId(0)];
        assert!((line.scale_y - 0.5).abs() < 1e-3);
        assert_eq!(c.stage().pins[&Anchor::Root], (490.0, 980.0));
    }

    #[test]
    fn test_forward_then_back_restores_everything() {
        let mut c = mounted();
        let initial = styles(&c);

        scroll_to(&mut c, 0.0, 4500.0, 30);
        let s = styles(&c);
        assert_eq!(s[&TargetId(0)].scale_y, 1.0);
        for card in 1..=5 {
            assert_eq!(s[&TargetId(card)].opacity, 1.0);
            assert_eq!(s[&TargetId(card)].x, 0.0);
        }

        scroll_to(&mut c, 4500.0, 0.0, 30);
        assert_eq!(styles(&c), initial);
    }

    #[test]
    fn test_hover_pop_and_release() {
        let mut c = mounted();
        scroll_to(&mut c, 0.0, 4500.0, 5);
        assert!(c.hover(TargetId(2), true));
        settle(&mut c);
        assert_eq!(styles(&c)[&TargetId(2)].scale, 1.015);
        assert!(c.hover(TargetId(2), false));
        settle(&mut c);
        assert_eq!(styles(&c)[&TargetId(2)].scale, 1.0);
        assert!(!c.hover(TargetId(0), true));
    }
}
