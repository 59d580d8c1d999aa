//! A small scroll and pointer animation engine.
//!
//! Nothing in here touches the DOM: targets are [`TargetId`]s, geometry comes
//! in as [`Layout`]s and visual states go out through a [`Stage`]. The browser
//! side lives in `app::motion`.

pub mod easing;
pub mod interaction;
pub mod lifecycle;
pub mod listeners;
pub mod particles;
pub mod playback;
pub mod responsive;
pub mod sequencer;
pub mod timeline;
pub mod trigger;
pub mod visual;

pub use easing::Ease;
pub use interaction::{HoverLift, PointerTilt};
pub use lifecycle::{Choreography, Controller, Lifecycle, Scene, Stage};
pub use listeners::{ListenerHost, ListenerRegistry};
pub use particles::ParticleField;
pub use responsive::{Breakpoint, Responsive, Variant};
pub use sequencer::{Anchor, Drive, Sequencer};
pub use timeline::{Position, Stagger, StaggerFrom, Timeline, Tweening};
pub use trigger::{Layout, ThresholdParseError, ToggleActions, TriggerSpec};
pub use visual::{Props, TargetId, VisualState};
