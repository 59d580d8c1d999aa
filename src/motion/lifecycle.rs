//! One lifecycle for everything that animates, and the controller that owns a
//! section's animation from mount to unmount.

use std::collections::{BTreeMap, BTreeSet};

use super::interaction::{HoverLift, PointerTilt};
use super::listeners::{ListenerHost, ListenerRegistry};
use super::responsive::{Responsive, Variant};
use super::sequencer::{Anchor, Sequencer};
use super::trigger::Layout;
use super::visual::{TargetId, VisualState};

/// Start, pause and cancel, shared by timelines, breakpoint sets, frame loops
/// and particle fields so teardown looks the same everywhere.
pub trait Lifecycle {
    fn start(&mut self);
    fn pause(&mut self);
    /// Stops for good and releases whatever the animation holds.
    fn cancel(&mut self);
    fn is_running(&self) -> bool;
}

/// Where visual states end up: real elements in the browser, a map in tests.
pub trait Stage {
    fn apply(&mut self, target: TargetId, state: &VisualState);
    /// Removes every style this stage ever wrote to `target`.
    fn clear(&mut self, target: TargetId);
    /// Document geometry of an anchor, or `None` while it isn't attached.
    fn layout(&self, anchor: Anchor) -> Option<Layout>;
    fn pin(&mut self, anchor: Anchor, offset: f64, spacing: f64);
    fn unpin(&mut self, anchor: Anchor);
}

/// Every sequencer and interaction of one configuration of a section.
#[derive(Default)]
pub struct Choreography {
    sequencers: Vec<Sequencer>,
    hovers: BTreeMap<TargetId, HoverLift>,
    tilts: BTreeMap<TargetId, PointerTilt>,
    running: bool,
}

impl Choreography {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sequencer(mut self, sequencer: Sequencer) -> Self {
        self.sequencers.push(sequencer);
        self
    }

    pub fn hover(mut self, targets: &[TargetId], lift: HoverLift) -> Self {
        for target in targets {
            self.hovers.insert(*target, lift.clone());
        }
        self
    }

    pub fn tilt(mut self, targets: &[TargetId]) -> Self {
        for target in targets {
            self.tilts.insert(*target, PointerTilt::new());
        }
        self
    }

    pub fn sequencers(&self) -> &[Sequencer] {
        &self.sequencers
    }

    pub fn sequencers_mut(&mut self) -> &mut [Sequencer] {
        &mut self.sequencers
    }

    pub fn on_scroll(&mut self, scroll: f64) {
        for seq in &mut self.sequencers {
            seq.on_scroll(scroll);
        }
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.running {
            return false;
        }
        let mut changed = false;
        for seq in &mut self.sequencers {
            changed |= seq.tick(dt);
        }
        for hover in self.hovers.values_mut() {
            changed |= hover.tick(dt);
        }
        for tilt in self.tilts.values_mut() {
            changed |= tilt.tick(dt);
        }
        changed
    }

    pub fn is_settled(&self) -> bool {
        self.sequencers.iter().all(Sequencer::is_settled)
            && self.hovers.values().all(HoverLift::is_settled)
            && self.tilts.values().all(PointerTilt::is_settled)
    }

    fn compose(&self, reveal: Vec<(TargetId, VisualState)>) -> BTreeMap<TargetId, VisualState> {
        let mut states = reveal.into_iter().collect::<BTreeMap<_, _>>();
        for (target, hover) in &self.hovers {
            hover.compose(states.entry(*target).or_default());
        }
        for (target, tilt) in &self.tilts {
            tilt.compose(states.entry(*target).or_default());
        }
        states
    }

    pub fn states(&self) -> BTreeMap<TargetId, VisualState> {
        self.compose(self.sequencers.iter().flat_map(Sequencer::states).collect())
    }

    pub fn initial_states(&self) -> BTreeMap<TargetId, VisualState> {
        self.sequencers
            .iter()
            .flat_map(Sequencer::initial_states)
            .collect()
    }

    pub fn set_hover(&mut self, target: TargetId, active: bool) -> bool {
        let Some(hover) = self.hovers.get_mut(&target) else {
            return false;
        };
        if active {
            hover.enter();
        } else {
            hover.leave();
        }
        true
    }

    pub fn pointer_move(&mut self, target: TargetId, px: f64, py: f64) -> bool {
        self.tilts
            .get_mut(&target)
            .map(|t| t.pointer_move(px, py))
            .unwrap_or(false)
    }

    pub fn pointer_leave(&mut self, target: TargetId) -> bool {
        let Some(tilt) = self.tilts.get_mut(&target) else {
            return false;
        };
        tilt.pointer_leave();
        true
    }
}

impl Lifecycle for Choreography {
    fn start(&mut self) {
        self.running = true;
        for seq in &mut self.sequencers {
            seq.start();
        }
    }

    fn pause(&mut self) {
        self.running = false;
        for seq in &mut self.sequencers {
            seq.pause();
        }
    }

    fn cancel(&mut self) {
        self.running = false;
        for seq in &mut self.sequencers {
            seq.cancel();
        }
        for hover in self.hovers.values_mut() {
            hover.reset();
        }
        for tilt in self.tilts.values_mut() {
            tilt.reset();
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// A section's choreography, either fixed or chosen by breakpoint.
pub enum Scene {
    Fixed(Choreography),
    Responsive(Responsive<Choreography>),
}

impl Scene {
    pub fn fixed(mut choreography: Choreography) -> Self {
        choreography.start();
        Self::Fixed(choreography)
    }

    pub fn active(&self) -> &Choreography {
        match self {
            Scene::Fixed(c) => c,
            Scene::Responsive(r) => r.active(),
        }
    }

    pub fn active_mut(&mut self) -> &mut Choreography {
        match self {
            Scene::Fixed(c) => c,
            Scene::Responsive(r) => r.active_mut(),
        }
    }

    /// Initial states that hold whichever breakpoint ends up active, so they
    /// can be rendered before the viewport width is known.
    pub fn shared_initial_states(&self) -> BTreeMap<TargetId, VisualState> {
        match self {
            Scene::Fixed(c) => c.initial_states(),
            Scene::Responsive(r) => {
                let narrow = r.build(Variant::Narrow).initial_states();
                r.build(Variant::Wide)
                    .initial_states()
                    .into_iter()
                    .filter(|(target, state)| narrow.get(target) == Some(state))
                    .collect()
            }
        }
    }
}

impl From<Responsive<Choreography>> for Scene {
    fn from(r: Responsive<Choreography>) -> Self {
        Scene::Responsive(r)
    }
}

/// Owns one section's animation: stage, scene and manually attached listeners.
pub struct Controller<S: Stage, H: ListenerHost> {
    name: &'static str,
    stage: S,
    scene: Scene,
    listeners: ListenerRegistry<H>,
    applied: BTreeMap<TargetId, VisualState>,
    pins: BTreeSet<Anchor>,
    scroll: f64,
    mounted: bool,
}

impl<S: Stage, H: ListenerHost> Controller<S, H> {
    pub fn new(name: &'static str, stage: S, scene: Scene) -> Self {
        Self {
            name,
            stage,
            scene,
            listeners: ListenerRegistry::new(),
            applied: BTreeMap::new(),
            pins: BTreeSet::new(),
            scroll: 0.0,
            mounted: false,
        }
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Writes every initial state before anything else happens, then
    /// measures triggers and catches up with the current scroll position.
    pub fn mount(&mut self, scroll: f64) {
        self.apply_initial();
        self.mounted = true;
        self.refresh();
        self.on_scroll(scroll);
        log::info!("{}: mounted", self.name);
    }

    fn apply_initial(&mut self) {
        let initial = self.scene.active().initial_states();
        let stale = self
            .applied
            .keys()
            .filter(|t| !initial.contains_key(t))
            .copied()
            .collect::<Vec<_>>();
        for target in stale {
            self.stage.clear(target);
            self.applied.remove(&target);
        }
        for (target, state) in initial {
            self.stage.apply(target, &state);
            self.applied.insert(target, state);
        }
    }

    /// Re-measures every trigger of the active configuration. Measuring can
    /// move a sequencer straight to a new time, so this renders too.
    pub fn refresh(&mut self) {
        if !self.mounted {
            return;
        }
        for seq in self.scene.active_mut().sequencers_mut() {
            match self.stage.layout(seq.anchor()) {
                Some(layout) => seq.measure(&layout),
                None => log::debug!("{}: {:?} not attached, deferring", self.name, seq.anchor()),
            }
        }
        self.update_pins();
        self.render();
    }

    /// Feeds a scroll position to every sequencer and writes whatever moved.
    /// Hard scrubs and the `reset`/`complete` actions jump without playback.
    pub fn on_scroll(&mut self, scroll: f64) {
        self.scroll = scroll;
        if !self.mounted {
            return;
        }
        self.scene.active_mut().on_scroll(scroll);
        self.update_pins();
        self.render();
    }

    pub fn on_resize(&mut self, width: f64) {
        if !self.mounted {
            return;
        }
        let switched = match &mut self.scene {
            Scene::Responsive(r) => r.on_resize(width),
            Scene::Fixed(_) => false,
        };
        if switched {
            for anchor in std::mem::take(&mut self.pins) {
                self.stage.unpin(anchor);
            }
            self.apply_initial();
        }
        self.refresh();
        let scroll = self.scroll;
        self.on_scroll(scroll);
    }

    fn update_pins(&mut self) {
        for seq in self.scene.active().sequencers() {
            if let Some(offset) = seq.pin_offset(self.scroll) {
                self.stage.pin(seq.anchor(), offset, seq.pin_spacing());
                self.pins.insert(seq.anchor());
            }
        }
    }

    /// Advances every animation by `dt` seconds and writes what changed.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.mounted {
            return false;
        }
        let changed = self.scene.active_mut().tick(dt);
        if changed {
            self.render();
        }
        changed
    }

    fn render(&mut self) {
        for (target, state) in self.scene.active().states() {
            if self.applied.get(&target) != Some(&state) {
                self.stage.apply(target, &state);
                self.applied.insert(target, state);
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        self.scene.active().is_settled()
    }

    /// Pointer enter or focus in (`true`), pointer leave or focus out (`false`).
    pub fn hover(&mut self, target: TargetId, active: bool) -> bool {
        self.mounted && self.scene.active_mut().set_hover(target, active)
    }

    pub fn pointer_move(&mut self, target: TargetId, px: f64, py: f64) -> bool {
        self.mounted && self.scene.active_mut().pointer_move(target, px, py)
    }

    pub fn pointer_leave(&mut self, target: TargetId) -> bool {
        self.mounted && self.scene.active_mut().pointer_leave(target)
    }

    pub fn listen(&mut self, element: H::Element, event: &'static str, handler: H::Handler) {
        self.listeners.listen(element, event, handler);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Detaches every listener, cancels every animation and removes every
    /// style the controller wrote.
    pub fn unmount(&mut self) {
        self.listeners.detach_all();
        match &mut self.scene {
            Scene::Fixed(c) => c.cancel(),
            Scene::Responsive(r) => r.cancel(),
        }
        for anchor in std::mem::take(&mut self.pins) {
            self.stage.unpin(anchor);
        }
        for target in std::mem::take(&mut self.applied).into_keys() {
            self.stage.clear(target);
        }
        if self.mounted {
            log::info!("{}: unmounted", self.name);
        }
        self.mounted = false;
    }
}

impl<S: Stage, H: ListenerHost> Lifecycle for Controller<S, H> {
    fn start(&mut self) {
        self.scene.active_mut().start();
    }

    fn pause(&mut self) {
        self.scene.active_mut().pause();
    }

    fn cancel(&mut self) {
        self.unmount();
    }

    fn is_running(&self) -> bool {
        self.mounted && self.scene.active().is_running()
    }
}

/// An in-memory stage for exercising controllers without a browser.
#[cfg(test)]
pub mod testing {
    use std::collections::BTreeMap;

    use super::Stage;
    use crate::motion::sequencer::Anchor;
    use crate::motion::trigger::Layout;
    use crate::motion::visual::{TargetId, VisualState};

    #[derive(Default)]
    pub struct RecordingStage {
        pub styles: BTreeMap<TargetId, VisualState>,
        pub layouts: BTreeMap<Anchor, Layout>,
        pub pins: BTreeMap<Anchor, (f64, f64)>,
        pub writes: usize,
    }

    impl RecordingStage {
        pub fn with_layout(mut self, anchor: Anchor, layout: Layout) -> Self {
            self.layouts.insert(anchor, layout);
            self
        }
    }

    impl Stage for RecordingStage {
        fn apply(&mut self, target: TargetId, state: &VisualState) {
            self.writes += 1;
            self.styles.insert(target, *state);
        }

        fn clear(&mut self, target: TargetId) {
            self.styles.remove(&target);
        }

        fn layout(&self, anchor: Anchor) -> Option<Layout> {
            self.layouts.get(&anchor).copied()
        }

        fn pin(&mut self, anchor: Anchor, offset: f64, spacing: f64) {
            self.pins.insert(anchor, (offset, spacing));
        }

        fn unpin(&mut self, anchor: Anchor) {
            self.pins.remove(&anchor);
        }
    }
}
