//! Breakpoint-keyed configurations with exactly one active at a time.

use super::lifecycle::Lifecycle;

pub const DEFAULT_BREAKPOINT: f64 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Viewport at least as wide as the breakpoint
    Wide,
    Narrow,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Breakpoint {
    pub min_width: f64,
}

impl Breakpoint {
    pub fn new(min_width: f64) -> Self {
        Self { min_width }
    }

    pub fn variant(&self, width: f64) -> Variant {
        if width >= self.min_width {
            Variant::Wide
        } else {
            Variant::Narrow
        }
    }
}

impl Default for Breakpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BREAKPOINT)
    }
}

/// Owns the configuration for the current breakpoint and rebuilds it from
/// scratch when the viewport crosses over.
pub struct Responsive<T> {
    breakpoint: Breakpoint,
    build: Box<dyn Fn(Variant) -> T>,
    variant: Variant,
    active: T,
}

impl<T: Lifecycle> Responsive<T> {
    pub fn new(
        breakpoint: Breakpoint,
        width: f64,
        build: impl Fn(Variant) -> T + 'static,
    ) -> Self {
        let variant = breakpoint.variant(width);
        let mut active = build(variant);
        active.start();
        Self {
            breakpoint,
            build: Box::new(build),
            variant,
            active,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn active(&self) -> &T {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut T {
        &mut self.active
    }

    /// A fresh, unstarted configuration for `variant`. The active one is
    /// left alone.
    pub fn build(&self, variant: Variant) -> T {
        (self.build)(variant)
    }

    /// Returns true when the breakpoint was crossed and the active
    /// configuration replaced. The old one is cancelled before the new one
    /// is built.
    pub fn on_resize(&mut self, width: f64) -> bool {
        let next = self.breakpoint.variant(width);
        if next == self.variant {
            return false;
        }
        self.active.cancel();
        let mut fresh = (self.build)(next);
        fresh.start();
        self.active = fresh;
        self.variant = next;
        log::info!("breakpoint switched to {next:?} at {width}px");
        true
    }
}

impl<T: Lifecycle> Lifecycle for Responsive<T> {
    fn start(&mut self) {
        self.active.start();
    }

    fn pause(&mut self) {
        self.active.pause();
    }

    fn cancel(&mut self) {
        self.active.cancel();
    }

    fn is_running(&self) -> bool {
        self.active.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counted {
        live: Rc<Cell<i32>>,
        variant: Variant,
        running: bool,
    }

    impl Lifecycle for Counted {
        fn start(&mut self) {
            if !self.running {
                self.live.set(self.live.get() + 1);
            }
            self.running = true;
        }
        fn pause(&mut self) {}
        fn cancel(&mut self) {
            if self.running {
                self.live.set(self.live.get() - 1);
            }
            self.running = false;
        }
        fn is_running(&self) -> bool {
            self.running
        }
    }

    fn counted(width: f64) -> (Responsive<Counted>, Rc<Cell<i32>>) {
        let live = Rc::new(Cell::new(0));
        let shared = live.clone();
        let responsive = Responsive::new(Breakpoint::default(), width, move |variant| {
            // the previous configuration is gone before a new one is built
            assert_eq!(shared.get(), 0);
            Counted {
                live: shared.clone(),
                variant,
                running: false,
            }
        });
        (responsive, live)
    }

    #[test]
    fn test_breakpoint_edges() {
        let bp = Breakpoint::default();
        assert_eq!(bp.variant(767.0), Variant::Narrow);
        assert_eq!(bp.variant(768.0), Variant::Wide);
    }

    #[test]
    fn test_exactly_one_active_across_switches() {
        let (mut r, live) = counted(767.0);
        assert_eq!(live.get(), 1);
        assert_eq!(r.active().variant, Variant::Narrow);
        for width in [768.0, 767.0, 1440.0, 320.0, 768.0, 768.0, 1024.0] {
            r.on_resize(width);
            assert_eq!(live.get(), 1, "width {width}");
            assert_eq!(r.active().variant, Breakpoint::default().variant(width));
            assert!(r.active().is_running());
        }
    }

    #[test]
    fn test_same_side_resize_keeps_instance() {
        let (mut r, _) = counted(1024.0);
        assert!(!r.on_resize(900.0));
        assert!(r.on_resize(700.0));
        assert!(!r.on_resize(500.0));
        assert_eq!(r.variant(), Variant::Narrow);
    }
}
