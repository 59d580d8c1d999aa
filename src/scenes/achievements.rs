//! Achievements & Certifications: two overlapping stacks of cards that roll
//! down into place, achievements first.

use super::{toggle, trigger, SceneError};
use crate::motion::{
    Anchor, Breakpoint, Choreography, Drive, Ease, HoverLift, Position, Props, Responsive, Scene,
    Sequencer, Stagger, TargetId, Timeline, Tweening, Variant,
};

const ACTIONS: &str = "play none none reverse";
const WIDE_START: &str = "top 82%";
const NARROW_START: &str = "top 90%";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AchievementTargets {
    pub heading: Option<TargetId>,
    pub achievements: Vec<TargetId>,
    pub certifications: Vec<TargetId>,
}

impl AchievementTargets {
    pub fn cards(&self) -> Vec<TargetId> {
        self.achievements
            .iter()
            .chain(&self.certifications)
            .copied()
            .collect()
    }
}

fn rolled_up() -> Props {
    Props::new().opacity(0.0).rotate_x(-80.0).y(40.0).scale(0.995)
}

fn rolled_down() -> Props {
    Props::new().opacity(1.0).rotate_x(0.0).y(0.0).scale(1.0)
}

fn initial(targets: &AchievementTargets) -> Timeline {
    let mut tl = Timeline::new();
    tl.set(targets.heading.as_slice(), Props::new().opacity(0.0).y(18.0))
        .set(&targets.cards(), rolled_up());
    tl
}

fn heading_in(tl: &mut Timeline, targets: &AchievementTargets, duration: f64) {
    tl.to(
        targets.heading.as_slice(),
        Props::new().opacity(1.0).y(0.0),
        Tweening::new(duration).ease(Ease::Power3Out),
        Position::Sequence,
    );
}

pub fn wide_timeline(targets: &AchievementTargets) -> Timeline {
    let roll = Tweening::new(0.72)
        .ease(Ease::BackOut(1.1))
        .stagger(Stagger::each(0.12));
    let mut tl = initial(targets);
    heading_in(&mut tl, targets, 0.5);
    tl.to(
        &targets.achievements,
        rolled_down(),
        roll,
        Position::Relative(-0.12),
    )
    .pause_for(0.08)
    .to(
        &targets.certifications,
        rolled_down(),
        roll,
        Position::Relative(-0.06),
    );
    tl
}

pub fn narrow_timeline(targets: &AchievementTargets) -> Timeline {
    let mut tl = initial(targets);
    heading_in(&mut tl, targets, 0.45);
    tl.to(
        &targets.cards(),
        rolled_down(),
        Tweening::new(0.58)
            .ease(Ease::BackOut(1.0))
            .stagger(Stagger::each(0.09)),
        Position::Relative(-0.06),
    );
    tl
}

pub fn hover() -> HoverLift {
    HoverLift::new(Props::new().y(-6.0).scale(1.02), 0.18, 0.25)
}

pub fn scene(targets: AchievementTargets, width: f64) -> Result<Scene, SceneError> {
    let wide = trigger(WIDE_START, None)?;
    let narrow = trigger(NARROW_START, None)?;
    let actions = toggle(ACTIONS)?;

    let responsive = Responsive::new(Breakpoint::default(), width, move |variant| {
        let (start, timeline) = match variant {
            Variant::Wide => (wide, wide_timeline(&targets)),
            Variant::Narrow => (narrow, narrow_timeline(&targets)),
        };
        let choreography = Choreography::new().sequencer(Sequencer::new(
            Anchor::Root,
            start,
            timeline,
            Drive::Toggle(actions),
        ));
        match variant {
            Variant::Wide => choreography.hover(&targets.cards(), hover()),
            Variant::Narrow => choreography,
        }
    });
    Ok(responsive.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::site_content;
    use crate::motion::lifecycle::testing::RecordingStage;
    use crate::motion::Layout;
    use crate::scenes::testing::{scroll_to, settle, styles, TestController};
    use crate::scenes::Cast;

    fn targets() -> AchievementTargets {
        let content = site_content();
        let mut cast = Cast::new();
        AchievementTargets {
            heading: cast.maybe(true),
            achievements: cast.many(content.achievements.len()),
            certifications: cast.many(content.certifications.len()),
        }
    }

    fn mounted(width: f64) -> TestController {
        let stage = RecordingStage::default().with_layout(
            Anchor::Root,
            Layout {
                top: 6000.0,
                height: 1400.0,
                viewport_height: 800.0,
            },
        );
        let mut c = TestController::new("achievements", stage, scene(targets(), width).unwrap());
        c.mount(0.0);
        c
    }

    #[test]
    fn test_all_cards_start_rolled_up() {
        let c = mounted(1280.0);
        let s = styles(&c);
        assert_eq!(s.len(), 1 + 3 + 8);
        assert_eq!(s[&TargetId(0)].y, 18.0);
        for card in 1..12 {
            let state = s[&TargetId(card)];
            assert!(state.visibility_hidden());
            assert_eq!(state.rotate_x, -80.0);
            assert_eq!(state.y, 40.0);
        }
    }

    #[test]
    fn test_wide_order_achievements_then_certifications() {
        let t = targets();
        let tl = wide_timeline(&t);
        let start_of = |id: TargetId| {
            tl.tweens()
                .iter()
                .find(|tw| tw.target == id)
                .map(|tw| tw.start)
                .unwrap()
        };
        assert!((start_of(t.achievements[0]) - 0.38).abs() < 1e-9);
        assert!((start_of(t.achievements[2]) - 0.62).abs() < 1e-9);
        let last_achievement_end = 0.62 + 0.72;
        let first_certification = last_achievement_end + 0.08 - 0.06;
        assert!((start_of(t.certifications[0]) - first_certification).abs() < 1e-9);
    }

    #[test]
    fn test_wide_roll_in_and_back() {
        let mut c = mounted(1280.0);
        let initial = styles(&c);
        scroll_to(&mut c, 0.0, 6000.0, 12);
        let s = styles(&c);
        for card in 0..12 {
            assert_eq!(s[&TargetId(card)].opacity, 1.0);
            assert_eq!(s[&TargetId(card)].y, 0.0);
        }
        scroll_to(&mut c, 6000.0, 0.0, 12);
        assert_eq!(styles(&c), initial);
    }

    #[test]
    fn test_narrow_rolls_everything_together() {
        let t = targets();
        let tl = narrow_timeline(&t);
        let starts = tl
            .tweens()
            .iter()
            .filter(|tw| tw.target != TargetId(0))
            .map(|tw| tw.start)
            .collect::<Vec<_>>();
        assert_eq!(starts.len(), 11);
        assert!((starts[0] - 0.39).abs() < 1e-9);
        assert!((starts[10] - (0.39 + 10.0 * 0.09)).abs() < 1e-9);
    }

    #[test]
    fn test_hover_lift_wide_only() {
        let mut c = mounted(1280.0);
        scroll_to(&mut c, 0.0, 6000.0, 4);
        assert!(c.hover(TargetId(3), true));
        settle(&mut c);
        let lifted = styles(&c)[&TargetId(3)];
        assert_eq!(lifted.y, -6.0);
        assert_eq!(lifted.scale, 1.02);
        assert!(c.hover(TargetId(3), false));
        settle(&mut c);
        assert_eq!(styles(&c)[&TargetId(3)].y, 0.0);

        let mut narrow = mounted(500.0);
        assert!(!narrow.hover(TargetId(3), true));
    }

    #[test]
    fn test_narrow_trigger_starts_lower() {
        let mut wide = mounted(1280.0);
        let mut narrow = mounted(500.0);
        // wide starts at 6000 - 656, narrow at 6000 - 720
        for c in [&mut wide, &mut narrow] {
            c.on_scroll(5300.0);
            settle(c);
        }
        assert_eq!(styles(&wide)[&TargetId(0)].opacity, 0.0);
        assert_eq!(styles(&narrow)[&TargetId(0)].opacity, 1.0);
    }
}
