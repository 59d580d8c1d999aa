//! Explicit ownership of manually attached event listeners.
//!
//! Every listener a scope attaches is recorded as an (element, event, handler)
//! entry, and detached from the same element with the same handler when the
//! scope is torn down or the registry dropped.

pub trait ListenerHost {
    type Element;
    type Handler;

    fn attach(element: &Self::Element, event: &'static str, handler: &Self::Handler);
    fn detach(element: &Self::Element, event: &'static str, handler: &Self::Handler);
}

pub struct Binding<H: ListenerHost> {
    pub element: H::Element,
    pub event: &'static str,
    pub handler: H::Handler,
}

pub struct ListenerRegistry<H: ListenerHost> {
    bindings: Vec<Binding<H>>,
}

impl<H: ListenerHost> Default for ListenerRegistry<H> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<H: ListenerHost> ListenerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, element: H::Element, event: &'static str, handler: H::Handler) {
        H::attach(&element, event, &handler);
        self.bindings.push(Binding {
            element,
            event,
            handler,
        });
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn detach_all(&mut self) {
        for binding in self.bindings.drain(..).rev() {
            H::detach(&binding.element, binding.event, &binding.handler);
        }
    }
}

impl<H: ListenerHost> Drop for ListenerRegistry<H> {
    fn drop(&mut self) {
        self.detach_all();
    }
}

/// A host that keeps listeners in memory, for driving scopes without a DOM.
#[cfg(test)]
pub mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::ListenerHost;

    #[derive(Default)]
    pub struct FakeNode {
        pub listeners: RefCell<Vec<(&'static str, usize)>>,
    }

    pub type FakeElement = Rc<FakeNode>;

    pub struct FakeHost;

    impl ListenerHost for FakeHost {
        type Element = FakeElement;
        type Handler = usize;

        fn attach(element: &FakeElement, event: &'static str, handler: &usize) {
            element.listeners.borrow_mut().push((event, *handler));
        }

        fn detach(element: &FakeElement, event: &'static str, handler: &usize) {
            let mut listeners = element.listeners.borrow_mut();
            if let Some(i) = listeners.iter().position(|l| *l == (event, *handler)) {
                listeners.remove(i);
            }
        }
    }
}
