use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, EventTarget, HtmlElement, Window};

use crate::motion::{Anchor, Layout, ListenerHost, Stage, TargetId, VisualState};

const STYLE_PROPS: [&str; 3] = ["opacity", "visibility", "transform"];

fn set_style(el: &HtmlElement, prop: &str, value: &str) {
    if let Err(e) = el.style().set_property(prop, value) {
        log::debug!("couldn't set {prop}: {e:?}");
    }
}

fn remove_style(el: &HtmlElement, prop: &str) {
    if let Err(e) = el.style().remove_property(prop) {
        log::debug!("couldn't remove {prop}: {e:?}");
    }
}

/// Writes visual states as inline styles on a section's elements.
pub struct DomStage {
    window: Window,
    root: HtmlElement,
    /// Wrapper that reserves scroll distance for a pinned root
    spacer: Option<HtmlElement>,
    targets: Vec<HtmlElement>,
    /// Vertical translation each target currently carries, in px
    shifts: Vec<f64>,
    root_shift: f64,
}

impl DomStage {
    pub fn new(
        window: Window,
        root: HtmlElement,
        spacer: Option<HtmlElement>,
        targets: Vec<HtmlElement>,
    ) -> Self {
        let shifts = vec![0.0; targets.len()];
        Self {
            window,
            root,
            spacer,
            targets,
            shifts,
            root_shift: 0.0,
        }
    }

    fn viewport_height(&self) -> Option<f64> {
        self.window.inner_height().ok()?.as_f64()
    }
}

impl Stage for DomStage {
    fn apply(&mut self, target: TargetId, state: &VisualState) {
        let Some(el) = self.targets.get(target.0) else {
            return;
        };
        set_style(el, "opacity", &state.opacity.to_string());
        set_style(
            el,
            "visibility",
            if state.visibility_hidden() {
                "hidden"
            } else {
                "inherit"
            },
        );
        set_style(el, "transform", &state.transform());
        let vh = self.viewport_height().unwrap_or(0.0);
        self.shifts[target.0] = state.y + state.y_vh * vh / 100.0;
    }

    fn clear(&mut self, target: TargetId) {
        let Some(el) = self.targets.get(target.0) else {
            return;
        };
        for prop in STYLE_PROPS {
            remove_style(el, prop);
        }
        self.shifts[target.0] = 0.0;
    }

    /// Untransformed document geometry of the anchor.
    fn layout(&self, anchor: Anchor) -> Option<Layout> {
        if !self.root.is_connected() {
            return None;
        }
        let viewport_height = self.viewport_height()?;
        let scroll = self.window.scroll_y().ok()?;
        match anchor {
            Anchor::Root => {
                let outer = self.spacer.as_ref().unwrap_or(&self.root);
                let rect = outer.get_bounding_client_rect();
                Some(Layout {
                    top: rect.top() + scroll,
                    height: self.root.offset_height() as f64,
                    viewport_height,
                })
            }
            Anchor::Target(id) => {
                let el = self.targets.get(id.0)?;
                if !el.is_connected() {
                    return None;
                }
                let rect = el.get_bounding_client_rect();
                Some(Layout {
                    top: rect.top() + scroll - self.root_shift - self.shifts[id.0],
                    height: rect.height(),
                    viewport_height,
                })
            }
        }
    }

    fn pin(&mut self, anchor: Anchor, offset: f64, spacing: f64) {
        if anchor != Anchor::Root {
            log::debug!("only a section root can be pinned");
            return;
        }
        set_style(
            &self.root,
            "transform",
            &format!("translate3d(0px, {offset}px, 0px)"),
        );
        self.root_shift = offset;
        if let Some(spacer) = &self.spacer {
            set_style(spacer, "padding-bottom", &format!("{spacing}px"));
        }
    }

    fn unpin(&mut self, anchor: Anchor) {
        if anchor != Anchor::Root {
            return;
        }
        remove_style(&self.root, "transform");
        self.root_shift = 0.0;
        if let Some(spacer) = &self.spacer {
            remove_style(spacer, "padding-bottom");
        }
    }
}

/// Listeners as `addEventListener` / `removeEventListener` pairs.
pub struct DomListenerHost;

impl ListenerHost for DomListenerHost {
    type Element = EventTarget;
    type Handler = Closure<dyn FnMut(Event)>;

    fn attach(element: &EventTarget, event: &'static str, handler: &Self::Handler) {
        if let Err(e) =
            element.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
        {
            log::warn!("couldn't attach {event} listener: {e:?}");
        }
    }

    fn detach(element: &EventTarget, event: &'static str, handler: &Self::Handler) {
        if let Err(e) =
            element.remove_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
        {
            log::debug!("couldn't detach {event} listener: {e:?}");
        }
    }
}
