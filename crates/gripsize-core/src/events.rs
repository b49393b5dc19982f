//! Callback dispatch for session start, move and end.

use crate::direction::ControlName;
use crate::geometry::ElementBox;
use serde::{Deserialize, Serialize};

/// Lifecycle events a consumer can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEvent {
    /// A drag session started on an enabled handle.
    Start,
    /// A throttled sample was processed.
    Move,
    /// The drag session ended.
    End,
}

/// Callback signature: the pressed control and the element's box.
pub type Handler = Box<dyn FnMut(&ControlName, &ElementBox)>;

/// One handler slot per event. Registering again replaces the old handler.
#[derive(Default)]
pub struct Callbacks {
    start: Option<Handler>,
    moved: Option<Handler>,
    end: Option<Handler>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, event: ResizeEvent) -> &mut Option<Handler> {
        match event {
            ResizeEvent::Start => &mut self.start,
            ResizeEvent::Move => &mut self.moved,
            ResizeEvent::End => &mut self.end,
        }
    }

    /// Register the handler for `event`, replacing any previous one.
    pub fn on(&mut self, event: ResizeEvent, handler: Handler) {
        *self.slot(event) = Some(handler);
    }

    /// Clear the handler for `event`.
    pub fn off(&mut self, event: ResizeEvent) {
        *self.slot(event) = None;
    }

    /// Check if a handler is registered for `event`.
    pub fn has(&self, event: ResizeEvent) -> bool {
        match event {
            ResizeEvent::Start => self.start.is_some(),
            ResizeEvent::Move => self.moved.is_some(),
            ResizeEvent::End => self.end.is_some(),
        }
    }

    /// Call the handler for `event`, if any.
    pub fn dispatch(&mut self, event: ResizeEvent, name: &ControlName, element: &ElementBox) {
        if let Some(handler) = self.slot(event) {
            handler(name, element);
        }
    }

    /// Drop every handler.
    pub fn clear(&mut self) {
        self.start = None;
        self.moved = None;
        self.end = None;
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("start", &self.start.is_some())
            .field("move", &self.moved.is_some())
            .field("end", &self.end.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use kurbo::{Affine, Size};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn element() -> ElementBox {
        ElementBox::new(Size::new(10.0, 10.0), Affine::IDENTITY)
    }

    #[test]
    fn test_dispatch_without_handler_is_noop() {
        let mut callbacks = Callbacks::new();
        callbacks.dispatch(ResizeEvent::Move, &Direction::Left.into(), &element());
        assert!(!callbacks.has(ResizeEvent::Move));
    }

    #[test]
    fn test_second_registration_replaces_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = Callbacks::new();

        let first = log.clone();
        callbacks.on(ResizeEvent::Start, Box::new(move |_, _| first.borrow_mut().push("first")));
        let second = log.clone();
        callbacks.on(ResizeEvent::Start, Box::new(move |_, _| second.borrow_mut().push("second")));

        callbacks.dispatch(ResizeEvent::Start, &Direction::Left.into(), &element());
        assert_eq!(*log.borrow(), ["second"]);
    }

    #[test]
    fn test_off_clears_only_that_event() {
        let count = Rc::new(RefCell::new(0));
        let mut callbacks = Callbacks::new();
        for event in [ResizeEvent::Start, ResizeEvent::End] {
            let count = count.clone();
            callbacks.on(event, Box::new(move |_, _| *count.borrow_mut() += 1));
        }
        callbacks.off(ResizeEvent::Start);

        callbacks.dispatch(ResizeEvent::Start, &Direction::Left.into(), &element());
        callbacks.dispatch(ResizeEvent::End, &Direction::Left.into(), &element());
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_handler_receives_name_and_box() {
        let seen = Rc::new(RefCell::new(None));
        let mut callbacks = Callbacks::new();
        let sink = seen.clone();
        callbacks.on(
            ResizeEvent::Move,
            Box::new(move |name, element| *sink.borrow_mut() = Some((name.clone(), element.size))),
        );
        callbacks.dispatch(ResizeEvent::Move, &Direction::Top.into(), &element());
        assert_eq!(
            *seen.borrow(),
            Some((ControlName::Direction(Direction::Top), Size::new(10.0, 10.0)))
        );
    }
}
