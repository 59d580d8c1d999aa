//! Binds a section's choreography to its rendered elements.
//!
//! Elements are collected with CSS selectors once the section is mounted, in
//! selector order, and numbered the same way the scene builders expect. Scroll
//! and viewport size come from leptos-use signals; everything else (frames,
//! hover, focus, pointer) is wired by hand and torn down on cleanup.

#[cfg(feature = "hydrate")]
mod dom;
#[cfg(feature = "hydrate")]
mod frame;

#[cfg(feature = "hydrate")]
pub use dom::{DomListenerHost, DomStage};
#[cfg(feature = "hydrate")]
pub use frame::{FrameLoop, FrameWaker};

use leptos::{html, prelude::*};

use crate::motion::{Scene, TargetId, VisualState};
use crate::scenes::{Cast, SceneError};

/// Used when the window width can't be read.
pub const DEFAULT_WIDTH: f64 = 1280.0;

/// What to animate inside one section.
#[derive(Clone, Copy, Debug)]
pub struct MotionSpec {
    pub name: &'static str,
    /// One selector per group of targets, in target-id order
    pub groups: &'static [&'static str],
    /// Groups whose elements react to hover, focus and pointer movement
    pub interactive: &'static [usize],
}

/// First target of a group, if the group matched anything.
pub fn first(groups: &[Vec<TargetId>], group: usize) -> Option<TargetId> {
    groups.get(group).and_then(|ids| ids.first().copied())
}

pub fn all(groups: &[Vec<TargetId>], group: usize) -> Vec<TargetId> {
    groups.get(group).cloned().unwrap_or_default()
}

/// Inline styles for the first paint, per group and element, so hidden
/// elements don't flash before the runtime takes over.
#[derive(Clone, Debug, Default)]
pub struct FirstPaint {
    groups: Vec<Vec<Option<String>>>,
}

impl FirstPaint {
    /// Only states every breakpoint agrees on are kept; the rest wait for
    /// the runtime.
    fn new(
        counts: &[usize],
        build: impl FnOnce(&[Vec<TargetId>], f64) -> Result<Scene, SceneError>,
    ) -> Self {
        let mut cast = Cast::new();
        let groups = counts.iter().map(|n| cast.many(*n)).collect::<Vec<_>>();
        let states = match build(&groups, DEFAULT_WIDTH) {
            Ok(scene) => scene.shared_initial_states(),
            Err(_) => return Self::default(),
        };
        let groups = groups
            .iter()
            .map(|ids| {
                ids.iter()
                    .map(|id| {
                        states
                            .get(id)
                            .filter(|state| !state.is_neutral())
                            .map(VisualState::inline_style)
                    })
                    .collect()
            })
            .collect();
        Self { groups }
    }

    pub fn style(&self, group: usize, index: usize) -> Option<String> {
        self.groups.get(group)?.get(index)?.clone()
    }
}

/// Animates the section behind `root` for as long as the calling component
/// lives. `build` gets the target ids of every group and the viewport width;
/// `counts` is how many elements each group renders.
pub fn use_motion(
    spec: MotionSpec,
    counts: &[usize],
    root: NodeRef<html::Section>,
    spacer: Option<NodeRef<html::Div>>,
    build: impl Fn(&[Vec<TargetId>], f64) -> Result<Scene, SceneError> + 'static,
) -> FirstPaint {
    let paint = FirstPaint::new(counts, &build);
    #[cfg(feature = "hydrate")]
    runtime::install(spec, root, spacer, build);
    #[cfg(not(feature = "hydrate"))]
    let _ = (spec, root, spacer, build);
    paint
}

#[cfg(feature = "hydrate")]
mod runtime {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use leptos::{html, prelude::*};
    use leptos_use::{use_window_scroll, use_window_size, UseWindowSizeReturn};
    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::{Event, EventTarget, HtmlElement, MouseEvent};

    use super::{DomListenerHost, DomStage, FrameLoop, FrameWaker, MotionSpec, DEFAULT_WIDTH};
    use crate::motion::{Controller, Lifecycle, Scene, TargetId};
    use crate::scenes::{Cast, SceneError};

    type DomController = Controller<DomStage, DomListenerHost>;

    struct MotionRuntime {
        controller: Rc<RefCell<DomController>>,
        frames: FrameLoop,
    }

    impl MotionRuntime {
        fn with_controller(&self, f: impl FnOnce(&mut DomController)) {
            match self.controller.try_borrow_mut() {
                Ok(mut c) => f(&mut c),
                Err(_) => log::debug!("controller busy, input dropped"),
            }
            self.frames.wake();
        }
    }

    impl Lifecycle for MotionRuntime {
        fn start(&mut self) {
            self.frames.start();
        }

        fn pause(&mut self) {
            self.frames.pause();
        }

        fn cancel(&mut self) {
            self.frames.cancel();
            if let Ok(mut c) = self.controller.try_borrow_mut() {
                c.unmount();
            }
        }

        fn is_running(&self) -> bool {
            self.frames.is_running()
        }
    }

    pub(super) fn install(
        spec: MotionSpec,
        root: NodeRef<html::Section>,
        spacer: Option<NodeRef<html::Div>>,
        build: impl FnOnce(&[Vec<TargetId>], f64) -> Result<Scene, SceneError> + 'static,
    ) {
        let runtime = StoredValue::new_local(None::<MotionRuntime>);
        let mut build = Some(build);

        Effect::new(move |_| {
            let Some(root) = root.get() else {
                log::debug!("{}: root not attached yet", spec.name);
                return;
            };
            let Some(build) = build.take() else {
                return;
            };
            let spacer = spacer
                .and_then(|s| s.get_untracked())
                .map(HtmlElement::from);
            if let Some(started) = start(spec, root, spacer, build) {
                runtime.set_value(Some(started));
            }
        });

        let (_, scroll_y) = use_window_scroll();
        Effect::new(move |_| {
            let y = scroll_y.get();
            runtime.with_value(|rt| {
                if let Some(rt) = rt {
                    rt.with_controller(|c| c.on_scroll(y));
                }
            });
        });

        let UseWindowSizeReturn { width, height, .. } = use_window_size();
        Effect::new(move |_| {
            let w = width.get();
            // a height change moves percentage thresholds too
            height.track();
            runtime.with_value(|rt| {
                if let Some(rt) = rt {
                    rt.with_controller(|c| c.on_resize(w));
                }
            });
        });

        on_cleanup(move || {
            runtime.try_update_value(|rt| {
                if let Some(mut rt) = rt.take() {
                    rt.cancel();
                }
            });
        });
    }

    fn start(
        spec: MotionSpec,
        root: HtmlElement,
        spacer: Option<HtmlElement>,
        build: impl FnOnce(&[Vec<TargetId>], f64) -> Result<Scene, SceneError>,
    ) -> Option<MotionRuntime> {
        let window = web_sys::window()?;
        let mut cast = Cast::new();
        let mut elements = Vec::new();
        let groups = spec
            .groups
            .iter()
            .map(|selector| {
                let found = query_all(&root, selector);
                if found.is_empty() {
                    log::debug!("{}: nothing matches {selector}", spec.name);
                }
                let ids = cast.many(found.len());
                elements.extend(found);
                ids
            })
            .collect::<Vec<_>>();

        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(DEFAULT_WIDTH);
        let scene = match build(&groups, width) {
            Ok(scene) => scene,
            Err(e) => {
                log::warn!("{}: animation disabled: {e}", spec.name);
                return None;
            }
        };

        let scroll = window.scroll_y().unwrap_or(0.0);
        let stage = DomStage::new(window.clone(), root, spacer, elements.clone());
        let mut controller = Controller::new(spec.name, stage, scene);
        controller.mount(scroll);
        let controller = Rc::new(RefCell::new(controller));

        let weak = Rc::downgrade(&controller);
        let mut frames = FrameLoop::new(window.clone(), move |dt| {
            let Some(c) = weak.upgrade() else {
                return false;
            };
            let Ok(mut c) = c.try_borrow_mut() else {
                return true;
            };
            c.tick(dt);
            !c.is_settled()
        });
        frames.start();

        let waker = frames.waker();
        let weak = Rc::downgrade(&controller);
        {
            let mut c = controller.borrow_mut();
            for id in spec
                .interactive
                .iter()
                .filter_map(|g| groups.get(*g))
                .flatten()
            {
                if let Some(el) = elements.get(id.0) {
                    bind_interaction(&mut c, &weak, &waker, *id, el);
                }
            }
            // fonts and images can move everything once they arrive
            c.listen(
                window.into(),
                "load",
                handler(weak.clone(), waker.clone(), |c, _| c.refresh()),
            );
        }

        Some(MotionRuntime { controller, frames })
    }

    fn handler(
        controller: Weak<RefCell<DomController>>,
        waker: FrameWaker,
        mut f: impl FnMut(&mut DomController, &Event) + 'static,
    ) -> Closure<dyn FnMut(Event)> {
        Closure::new(move |event: Event| {
            let Some(c) = controller.upgrade() else {
                return;
            };
            if let Ok(mut c) = c.try_borrow_mut() {
                f(&mut c, &event);
            }
            waker.wake();
        })
    }

    fn bind_interaction(
        c: &mut DomController,
        weak: &Weak<RefCell<DomController>>,
        waker: &FrameWaker,
        id: TargetId,
        el: &HtmlElement,
    ) {
        let target = EventTarget::from(el.clone());
        for (event, active) in [
            ("mouseenter", true),
            ("mouseleave", false),
            ("focusin", true),
            ("focusout", false),
        ] {
            c.listen(
                target.clone(),
                event,
                handler(weak.clone(), waker.clone(), move |c, _| {
                    c.hover(id, active);
                }),
            );
        }

        let el = el.clone();
        c.listen(
            target.clone(),
            "pointermove",
            handler(weak.clone(), waker.clone(), move |c, event| {
                if let Some((px, py)) = pointer_fraction(&el, event) {
                    c.pointer_move(id, px, py);
                }
            }),
        );
        c.listen(
            target,
            "pointerleave",
            handler(weak.clone(), waker.clone(), move |c, _| {
                c.pointer_leave(id);
            }),
        );
    }

    /// Pointer position inside `el`, 0..1 on both axes.
    fn pointer_fraction(el: &HtmlElement, event: &Event) -> Option<(f64, f64)> {
        let event = event.dyn_ref::<MouseEvent>()?;
        let rect = el.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        Some((
            (event.client_x() as f64 - rect.left()) / rect.width(),
            (event.client_y() as f64 - rect.top()) / rect.height(),
        ))
    }

    fn query_all(root: &HtmlElement, selector: &str) -> Vec<HtmlElement> {
        let Ok(list) = root.query_selector_all(selector) else {
            log::debug!("bad selector {selector}");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }
}
