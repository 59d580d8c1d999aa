use leptos::{html, prelude::*};

/// Full-viewport canvas behind every section, with the ambient particle field.
#[component]
pub fn ParticleCanvas() -> impl IntoView {
    let canvas = NodeRef::<html::Canvas>::new();

    #[cfg(feature = "hydrate")]
    field::install(canvas);

    view! {
        <canvas
            node_ref=canvas
            class="fixed inset-0 w-full h-full pointer-events-none z-0"
            aria-hidden="true"
        />
    }
}

#[cfg(feature = "hydrate")]
mod field {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use leptos::{html, prelude::*};
    use leptos_use::{use_window_size, UseWindowSizeReturn};
    use wasm_bindgen::{closure::Closure, JsCast};
    use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent};

    use crate::app::motion::{DomListenerHost, FrameLoop};
    use crate::motion::{Lifecycle, ListenerRegistry, ParticleField};

    const MAX_PIXEL_RATIO: f64 = 2.0;
    const COLOR: &str = "168, 85, 247";

    struct Surface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Surface {
        fn new(canvas: HtmlCanvasElement) -> Option<Self> {
            let ctx = canvas
                .get_context("2d")
                .ok()
                .flatten()?
                .dyn_into::<CanvasRenderingContext2d>()
                .ok()?;
            let surface = Self { canvas, ctx };
            surface.fit();
            Some(surface)
        }

        fn size(&self) -> (f64, f64) {
            (
                self.canvas.client_width() as f64,
                self.canvas.client_height() as f64,
            )
        }

        /// Matches the backing store to the CSS size at the device pixel ratio.
        fn fit(&self) {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0)
                .clamp(1.0, MAX_PIXEL_RATIO);
            let (w, h) = self.size();
            self.canvas.set_width((w * dpr) as u32);
            self.canvas.set_height((h * dpr) as u32);
            if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
                log::debug!("couldn't scale canvas: {e:?}");
            }
        }

        fn draw(&self, field: &ParticleField) {
            let (w, h) = self.size();
            self.ctx.clear_rect(0.0, 0.0, w, h);
            for dot in field.draw_list() {
                self.ctx.begin_path();
                self.ctx
                    .set_fill_style_str(&format!("rgba({COLOR}, {})", dot.alpha));
                if self.ctx.arc(dot.x, dot.y, dot.radius, 0.0, TAU).is_ok() {
                    self.ctx.fill();
                }
            }
        }
    }

    struct ParticleRuntime {
        surface: Rc<Surface>,
        field: Rc<RefCell<ParticleField>>,
        frames: FrameLoop,
        listeners: ListenerRegistry<DomListenerHost>,
    }

    impl Lifecycle for ParticleRuntime {
        fn start(&mut self) {
            self.field.borrow_mut().start();
            self.frames.start();
        }

        fn pause(&mut self) {
            self.frames.pause();
            self.field.borrow_mut().pause();
        }

        fn cancel(&mut self) {
            self.listeners.detach_all();
            self.frames.cancel();
            self.field.borrow_mut().cancel();
            self.surface.draw(&self.field.borrow());
            log::info!("particles: stopped");
        }

        fn is_running(&self) -> bool {
            self.frames.is_running()
        }
    }

    fn pointer(event: &Event) -> Option<(f64, f64)> {
        let event = event.dyn_ref::<MouseEvent>()?;
        Some((event.client_x() as f64, event.client_y() as f64))
    }

    fn start(canvas: HtmlCanvasElement) -> Option<ParticleRuntime> {
        let window = web_sys::window()?;
        let Some(surface) = Surface::new(canvas) else {
            log::warn!("particles: no 2d context, background disabled");
            return None;
        };
        let surface = Rc::new(surface);
        let field = Rc::new(RefCell::new(ParticleField::new(js_sys::Date::now() as u64)));

        let frames = {
            let surface = surface.clone();
            let field = field.clone();
            FrameLoop::new(window.clone(), move |_| {
                let Ok(mut field) = field.try_borrow_mut() else {
                    return true;
                };
                let (w, h) = surface.size();
                field.step(w, h);
                surface.draw(&field);
                true
            })
        };

        // the canvas ignores pointer events so the page stays clickable
        let mut listeners = ListenerRegistry::<DomListenerHost>::new();
        let target = EventTarget::from(window);
        let on = |f: fn(&mut ParticleField, &Event)| {
            let field = field.clone();
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Ok(mut field) = field.try_borrow_mut() {
                    f(&mut field, &event);
                }
            })
        };
        listeners.listen(
            target.clone(),
            "pointermove",
            on(|field, event| {
                if let Some((x, y)) = pointer(event) {
                    field.pointer_move(x, y);
                }
            }),
        );
        listeners.listen(
            target.clone(),
            "click",
            on(|field, event| {
                if let Some((x, y)) = pointer(event) {
                    field.click(x, y);
                }
            }),
        );
        listeners.listen(target.clone(), "blur", on(|field, _| field.pointer_leave()));
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            listeners.listen(
                root.into(),
                "pointerleave",
                on(|field, _| field.pointer_leave()),
            );
        }

        let mut runtime = ParticleRuntime {
            surface,
            field,
            frames,
            listeners,
        };
        runtime.start();
        log::info!("particles: started");
        Some(runtime)
    }

    pub(super) fn install(canvas: NodeRef<html::Canvas>) {
        let runtime = StoredValue::new_local(None::<ParticleRuntime>);

        Effect::new(move |_| {
            let Some(canvas) = canvas.get() else {
                return;
            };
            if runtime.with_value(Option::is_some) {
                return;
            }
            if let Some(started) = start(canvas) {
                runtime.set_value(Some(started));
            }
        });

        let UseWindowSizeReturn { width, height, .. } = use_window_size();
        Effect::new(move |_| {
            width.track();
            height.track();
            runtime.with_value(|rt| {
                if let Some(rt) = rt {
                    rt.surface.fit();
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
}
