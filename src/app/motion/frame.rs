use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use crate::motion::Lifecycle;

/// Longest step handed to a frame callback, so a backgrounded tab doesn't
/// resume with one enormous jump.
const MAX_STEP: f64 = 0.1;
const FIRST_STEP: f64 = 1.0 / 60.0;

type OnFrame = Box<dyn FnMut(f64) -> bool>;

#[derive(Default)]
struct State {
    pending: Option<i32>,
    last: Option<f64>,
    running: bool,
}

struct Inner {
    window: Window,
    on_frame: RefCell<OnFrame>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    state: RefCell<State>,
}

impl Inner {
    fn request(&self) {
        let mut state = self.state.borrow_mut();
        if !state.running || state.pending.is_some() {
            return;
        }
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => state.pending = Some(handle),
            Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
        }
    }

    fn frame(&self, timestamp: f64) {
        let dt = {
            let mut state = self.state.borrow_mut();
            state.pending = None;
            if !state.running {
                return;
            }
            let dt = state
                .last
                .map(|last| (timestamp - last) / 1000.0)
                .unwrap_or(FIRST_STEP)
                .clamp(0.0, MAX_STEP);
            state.last = Some(timestamp);
            dt
        };
        let keep_going = match self.on_frame.try_borrow_mut() {
            Ok(mut on_frame) => on_frame(dt),
            Err(_) => false,
        };
        if keep_going {
            self.request();
        } else {
            // parked; the next wake starts timing afresh
            self.state.borrow_mut().last = None;
        }
    }

    fn cancel_pending(&self) {
        let pending = self.state.borrow_mut().pending.take();
        if let Some(handle) = pending {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::debug!("cancelAnimationFrame failed: {e:?}");
            }
        }
    }
}

/// A `requestAnimationFrame` loop that parks itself when the callback returns
/// `false` and is woken again by input.
pub struct FrameLoop {
    inner: Rc<Inner>,
}

/// Wakes a parked [`FrameLoop`] without keeping it alive.
#[derive(Clone)]
pub struct FrameWaker {
    inner: Weak<Inner>,
}

impl FrameWaker {
    pub fn wake(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.request();
        }
    }
}

impl FrameLoop {
    /// `on_frame` gets the seconds since the previous frame and returns
    /// whether another frame is needed.
    pub fn new(window: Window, on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let inner = Rc::new(Inner {
            window,
            on_frame: RefCell::new(Box::new(on_frame)),
            callback: RefCell::new(None),
            state: RefCell::default(),
        });
        let weak = Rc::downgrade(&inner);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            if let Some(inner) = weak.upgrade() {
                inner.frame(timestamp);
            }
        });
        *inner.callback.borrow_mut() = Some(callback);
        Self { inner }
    }

    pub fn waker(&self) -> FrameWaker {
        FrameWaker {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn wake(&self) {
        self.inner.request();
    }
}

impl Lifecycle for FrameLoop {
    fn start(&mut self) {
        {
            let mut state = self.inner.state.borrow_mut();
            state.running = true;
            state.last = None;
        }
        self.inner.request();
    }

    fn pause(&mut self) {
        self.inner.state.borrow_mut().running = false;
        self.inner.cancel_pending();
    }

    fn cancel(&mut self) {
        self.pause();
        self.inner.callback.borrow_mut().take();
    }

    fn is_running(&self) -> bool {
        self.inner.state.borrow().running
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.inner.cancel_pending();
    }
}
