//! Projects: on wide screens the heading and the whole grid reveal together,
//! cards sliding in from their column's side, with a hover lift and pointer
//! tilt. On narrow
//! screens every card reveals on its own as it reaches the bottom of the
//! viewport.

use super::{toggle, trigger, SceneError};
use crate::motion::{
    Anchor, Breakpoint, Choreography, Drive, Ease, HoverLift, Position, Props, Responsive, Scene,
    Sequencer, TargetId, Timeline, Tweening, Variant,
};

const WIDE_START: &str = "top 80%";
const WIDE_ACTIONS: &str = "play none none reverse";
const NARROW_START: &str = "top 92%";
const NARROW_ACTIONS: &str = "restart none none reverse";

const COLUMNS: usize = 3;
const COLUMN_SHIFT: f64 = 60.0;
const CARD_DURATION: f64 = 0.7;
const CARD_STAGGER: f64 = 0.1;
const HEADING_DURATION: f64 = 0.5;
/// Cards start this long before the heading finishes.
const OVERLAP: f64 = 0.2;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectTargets {
    pub heading: Option<TargetId>,
    pub cards: Vec<TargetId>,
}

fn hidden_card() -> Props {
    Props::new().opacity(0.0).y(32.0).scale(0.995)
}

fn shown_card() -> Props {
    Props::new().opacity(1.0).y(0.0).scale(1.0)
}

/// Horizontal offset a card enters from: left column from the left, right
/// column from the right, middle column straight up.
pub fn column_offset(index: usize) -> f64 {
    ((index % COLUMNS) as f64 - 1.0) * COLUMN_SHIFT
}

pub fn wide_timeline(targets: &ProjectTargets) -> Timeline {
    let mut tl = Timeline::new();
    tl.from_to(
        targets.heading.as_slice(),
        Props::new().opacity(0.0).y(18.0),
        Props::new().opacity(1.0).y(0.0),
        Tweening::new(HEADING_DURATION).ease(Ease::Power3Out),
        Position::At(0.0),
    );
    let first = tl.duration() - OVERLAP.min(tl.duration());
    for (i, card) in targets.cards.iter().enumerate() {
        tl.from_to(
            &[*card],
            hidden_card().x(column_offset(i)),
            shown_card().x(0.0),
            Tweening::new(CARD_DURATION).ease(Ease::Power3Out),
            Position::At(first + i as f64 * CARD_STAGGER),
        );
    }
    tl
}

pub fn card_timeline(card: TargetId) -> Timeline {
    let mut tl = Timeline::new();
    tl.from_to(
        &[card],
        hidden_card(),
        shown_card(),
        Tweening::new(CARD_DURATION).ease(Ease::Power3Out),
        Position::At(0.0),
    );
    tl
}

pub fn hover() -> HoverLift {
    HoverLift::new(Props::new().scale(1.01), 0.18, 0.25)
}

pub fn scene(targets: ProjectTargets, width: f64) -> Result<Scene, SceneError> {
    let wide = (trigger(WIDE_START, None)?, toggle(WIDE_ACTIONS)?);
    let narrow = (trigger(NARROW_START, None)?, toggle(NARROW_ACTIONS)?);

    let responsive = Responsive::new(Breakpoint::default(), width, move |variant| match variant {
        Variant::Wide => Choreography::new()
            .sequencer(Sequencer::new(
                Anchor::Root,
                wide.0,
                wide_timeline(&targets),
                Drive::Toggle(wide.1),
            ))
            .hover(&targets.cards, hover())
            .tilt(&targets.cards),
        Variant::Narrow => targets.cards.iter().fold(Choreography::new(), |c, card| {
            c.sequencer(Sequencer::new(
                Anchor::Target(*card),
                narrow.0,
                card_timeline(*card),
                Drive::Toggle(narrow.1),
            ))
        }),
    });
    Ok(responsive.into())
}
