//! Interaction state machine.
//!
//! A [`Resizer`] owns one element (through its [`ElementHost`]) and turns
//! pointer events on that element's handles into resize steps:
//!
//! ```text
//! Idle --down on enabled handle--> Dragging --up--> Idle
//!                                   |  ^
//!                                   +--+ move (throttled)
//! ```
//!
//! `destroy` moves any state to `Destroyed`, after which every event is
//! ignored.

use crate::config::ResizeConfig;
use crate::controls::ControlRegistry;
use crate::direction::ControlName;
use crate::error::{ResizeError, ResizeResult};
use crate::events::{Callbacks, ResizeEvent};
use crate::geometry::{self, ElementBox, SessionBase};
use crate::host::{Document, ElementHost, ElementRef};
use crate::input::{Instant, PointerEvent, Throttle};
use crate::selection::SelectionLock;
use crate::style::{HandleSpec, StyleMap};
use crate::transform::parse_transform;
use kurbo::{Affine, Point};

/// An active drag on one handle.
#[derive(Debug)]
struct DragSession {
    /// The pressed control, fixed for the session.
    name: ControlName,
    /// Pointer position at the last processed sample.
    last_position: Point,
    /// Start size and transform, the reference for anchor compensation.
    base: SessionBase,
    /// Transform last written to the element.
    transform: Affine,
    selection: SelectionLock,
}

#[derive(Debug)]
enum InteractionState {
    Idle,
    Dragging(DragSession),
    Destroyed,
}

/// Attaches resize handles to one element and drives its size from drags.
#[derive(Debug)]
pub struct Resizer<H: ElementHost> {
    host: H,
    config: ResizeConfig,
    controls: ControlRegistry,
    callbacks: Callbacks,
    throttle: Throttle,
    state: InteractionState,
}

impl<H: ElementHost> Resizer<H> {
    /// Resolve `target` through `document` and attach to it.
    pub fn create<D>(document: &D, target: ElementRef<H>, config: ResizeConfig) -> ResizeResult<Self>
    where
        D: Document<Element = H>,
    {
        let host = match target {
            ElementRef::Element(host) => host,
            ElementRef::Selector(selector) => document
                .query_selector(&selector)
                .ok_or(ResizeError::ElementNotFound(selector))?,
        };
        Self::new(host, config)
    }

    /// Attach to an already-resolved element.
    ///
    /// Makes the element `border-box` (and `relative` if it was `static`)
    /// and installs the configured handles.
    pub fn new(mut host: H, config: ResizeConfig) -> ResizeResult<Self> {
        config.validate()?;

        let mut init = StyleMap::new().with("box-sizing", "border-box");
        if host.computed_style("position").as_deref() == Some("static") {
            init.set("position", "relative");
        }
        host.set_styles(&init);

        let controls = ControlRegistry::from_entries(&mut host, &config.controls);
        log::debug!("Resizer attached with {} controls", config.controls.len());

        Ok(Self {
            host,
            config,
            controls,
            callbacks: Callbacks::new(),
            throttle: Throttle::default(),
            state: InteractionState::Idle,
        })
    }

    /// The element being resized.
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The active configuration.
    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    /// Check if a drag session is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    /// Check if [`Resizer::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool {
        matches!(self.state, InteractionState::Destroyed)
    }

    /// The control being dragged, if any.
    pub fn active_control(&self) -> Option<&ControlName> {
        match &self.state {
            InteractionState::Dragging(session) => Some(&session.name),
            _ => None,
        }
    }

    /// Check if a control is currently enabled.
    pub fn is_control_enabled(&self, name: &ControlName) -> bool {
        self.controls.is_enabled(name)
    }

    /// Override the move sampling throttle.
    pub fn set_throttle(&mut self, throttle: Throttle) {
        self.throttle = throttle;
    }

    /// Replace the configuration wholesale, reinstalling handles.
    ///
    /// An active session keeps running against the new ranges.
    pub fn replace_config(&mut self, config: ResizeConfig) -> ResizeResult<()> {
        if self.is_destroyed() {
            return Ok(());
        }
        config.validate()?;
        self.controls.clear(&mut self.host);
        self.controls = ControlRegistry::from_entries(&mut self.host, &config.controls);
        self.config = config;
        Ok(())
    }

    /// Enable or disable one control. See [`ControlRegistry::set_state`].
    pub fn set_control_state(&mut self, name: impl Into<ControlName>, enabled: bool, spec: impl Into<HandleSpec>) {
        if self.is_destroyed() {
            return;
        }
        self.controls.set_state(&mut self.host, name.into(), enabled, spec.into());
    }

    /// Enable or disable every configured control.
    pub fn set_all_control_state(&mut self, enabled: bool, spec: impl Into<HandleSpec>) {
        if self.is_destroyed() {
            return;
        }
        self.controls.set_all(&mut self.host, &self.config.controls, enabled, &spec.into());
    }

    /// Register the callback for `event`, replacing any previous one.
    pub fn on<F>(&mut self, event: ResizeEvent, handler: F)
    where
        F: FnMut(&ControlName, &ElementBox) + 'static,
    {
        self.callbacks.on(event, Box::new(handler));
    }

    /// Clear the callback for `event`.
    pub fn off(&mut self, event: ResizeEvent) {
        self.callbacks.off(event);
    }

    /// Feed one pointer event.
    ///
    /// Returns the lifecycle event that was dispatched, if any. The only
    /// error is a malformed transform on the element at pointer-down, in
    /// which case no session starts.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, now: Instant) -> ResizeResult<Option<ResizeEvent>> {
        match event {
            PointerEvent::Down { target, position } => self.pointer_down(target.as_deref(), position),
            PointerEvent::Move { position } => Ok(self.pointer_move(position, now)),
            PointerEvent::Up { .. } => Ok(self.pointer_up()),
        }
    }

    fn pointer_down(&mut self, target: Option<&str>, position: Point) -> ResizeResult<Option<ResizeEvent>> {
        match self.state {
            InteractionState::Idle => {}
            InteractionState::Dragging(_) => {
                log::debug!("Pointer down ignored: a session is already active");
                return Ok(None);
            }
            InteractionState::Destroyed => return Ok(None),
        }

        let Some(target) = target else {
            return Ok(None);
        };
        let name = ControlName::from(target);
        if !self.controls.is_enabled(&name) {
            return Ok(None);
        }

        let transform = match self.host.computed_style("transform") {
            Some(value) => parse_transform(&value)?,
            None => Affine::IDENTITY,
        };
        let base = SessionBase {
            start_size: self.host.bounding_box(),
            transform,
        };

        if name.direction().is_none() {
            log::warn!("Handle {:?} is not a resize direction; its drags will not resize", name.as_str());
        }

        self.host.capture_pointer();
        let (selection, first) = SelectionLock::acquire();
        if first {
            self.host.set_text_selection(false);
        }
        self.throttle.reset();

        log::debug!("Drag session started on {} at {:?}", name, position);
        self.state = InteractionState::Dragging(DragSession {
            name,
            last_position: position,
            base,
            transform,
            selection,
        });

        self.notify(ResizeEvent::Start);
        Ok(Some(ResizeEvent::Start))
    }

    fn pointer_move(&mut self, position: Point, now: Instant) -> Option<ResizeEvent> {
        let InteractionState::Dragging(session) = &mut self.state else {
            return None;
        };
        if !self.throttle.admit(now) {
            return None;
        }

        let delta = position - session.last_position;
        session.last_position = position;

        let direction = session.name.direction()?;
        let current = ElementBox::new(self.host.offset_size(), session.transform);
        let step = geometry::resize(direction, current, delta, &session.base, &self.config);
        log::trace!("{} moved by {:?}: {:?}", direction, delta, step);

        if !step.is_empty() {
            self.host.set_styles(&step.to_styles());
        }
        if let Some(transform) = step.transform {
            session.transform = transform;
        }

        self.notify(ResizeEvent::Move);
        Some(ResizeEvent::Move)
    }

    fn pointer_up(&mut self) -> Option<ResizeEvent> {
        if !self.is_dragging() {
            return None;
        }
        let element = self.element_box();
        let InteractionState::Dragging(session) = std::mem::replace(&mut self.state, InteractionState::Idle) else {
            return None;
        };

        self.end_session_effects(session.selection);
        log::debug!("Drag session ended on {}", session.name);

        self.callbacks.dispatch(ResizeEvent::End, &session.name, &element);
        Some(ResizeEvent::End)
    }

    fn end_session_effects(&mut self, selection: SelectionLock) {
        self.host.release_pointer();
        if selection.release() {
            self.host.set_text_selection(true);
        }
    }

    /// Current box, using the session's transform when dragging.
    fn element_box(&self) -> ElementBox {
        let transform = match &self.state {
            InteractionState::Dragging(session) => session.transform,
            _ => self
                .host
                .computed_style("transform")
                .and_then(|value| parse_transform(&value).ok())
                .unwrap_or(Affine::IDENTITY),
        };
        ElementBox::new(self.host.offset_size(), transform)
    }

    fn notify(&mut self, event: ResizeEvent) {
        let element = self.element_box();
        if let InteractionState::Dragging(session) = &self.state {
            self.callbacks.dispatch(event, &session.name, &element);
        }
    }

    /// Detach from the element.
    ///
    /// Removes every handle and pointer listener and drops any session and
    /// callbacks without notifying. Calling it again does nothing.
    pub fn destroy(&mut self) {
        match std::mem::replace(&mut self.state, InteractionState::Destroyed) {
            InteractionState::Destroyed => return,
            InteractionState::Dragging(session) => self.end_session_effects(session.selection),
            InteractionState::Idle => {}
        }

        for entry in &self.config.controls {
            self.host.remove_handle(entry.name());
        }
        self.controls.clear(&mut self.host);
        self.callbacks.clear();
        log::debug!("Resizer destroyed");
    }
}

impl<H: ElementHost> Drop for Resizer<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::host::{MemoryDocument, MemoryHost};
    use kurbo::Size;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn down(target: &str, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            target: Some(target.to_string()),
            position: Point::new(x, y),
        }
    }

    fn mv(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move { position: Point::new(x, y) }
    }

    fn up() -> PointerEvent {
        PointerEvent::Up { position: Point::ZERO }
    }

    #[test]
    fn test_new_initializes_element() {
        let resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let styles = resizer.host().styles();
        assert_eq!(styles.get("box-sizing"), Some("border-box"));
        assert_eq!(styles.get("position"), Some("relative"));
        assert_eq!(resizer.host().handle_names().len(), 4);
    }

    #[test]
    fn test_new_keeps_non_static_position() {
        let host = MemoryHost::new(200.0, 100.0).with_computed("position", "absolute");
        let resizer = Resizer::new(host, ResizeConfig::default()).unwrap();
        assert_eq!(resizer.host().styles().get("position"), None);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Resizer::new(MemoryHost::new(1.0, 1.0), ResizeConfig::new().with_width(5.0, 1.0));
        assert!(matches!(result, Err(ResizeError::Config(_))));
    }

    #[test]
    fn test_create_by_selector() {
        let mut doc = MemoryDocument::new();
        doc.insert("#panel", MemoryHost::new(300.0, 200.0));

        let resizer: Resizer<MemoryHost> = Resizer::create(&doc, "#panel".into(), ResizeConfig::default()).unwrap();
        assert_eq!(resizer.host().size(), Size::new(300.0, 200.0));

        let missing: ResizeResult<Resizer<MemoryHost>> = Resizer::create(&doc, "#nope".into(), ResizeConfig::default());
        assert!(matches!(missing, Err(ResizeError::ElementNotFound(s)) if s == "#nope"));
    }

    #[test]
    fn test_session_lifecycle() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let t0 = Instant::now();

        assert_eq!(resizer.handle_pointer_event(down("right", 0.0, 0.0), t0).unwrap(), Some(ResizeEvent::Start));
        assert!(resizer.is_dragging());
        assert!(resizer.host().is_pointer_captured());
        assert!(!resizer.host().is_text_selection_enabled());

        assert_eq!(resizer.handle_pointer_event(mv(50.0, 0.0), t0).unwrap(), Some(ResizeEvent::Move));
        assert_eq!(resizer.host().size(), Size::new(250.0, 100.0));

        assert_eq!(resizer.handle_pointer_event(up(), t0).unwrap(), Some(ResizeEvent::End));
        assert!(!resizer.is_dragging());
        assert!(!resizer.host().is_pointer_captured());
        assert!(resizer.host().is_text_selection_enabled());

        // The end listener is one-shot.
        assert_eq!(resizer.handle_pointer_event(up(), t0).unwrap(), None);
    }

    #[test]
    fn test_down_on_disabled_or_non_handle_is_noop() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let t0 = Instant::now();

        assert_eq!(resizer.handle_pointer_event(down("top", 0.0, 0.0), t0).unwrap(), None);
        let plain = PointerEvent::Down { target: None, position: Point::ZERO };
        assert_eq!(resizer.handle_pointer_event(plain, t0).unwrap(), None);

        resizer.set_control_state(Direction::Right, false, false);
        assert_eq!(resizer.handle_pointer_event(down("right", 0.0, 0.0), t0).unwrap(), None);
        assert!(!resizer.is_dragging());
        assert!(resizer.host().is_text_selection_enabled());
    }

    #[test]
    fn test_move_without_session_is_noop() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let before = resizer.host().clone();
        assert_eq!(resizer.handle_pointer_event(mv(10.0, 10.0), Instant::now()).unwrap(), None);
        assert_eq!(*resizer.host(), before);
    }

    #[test]
    fn test_moves_are_throttled() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let t0 = Instant::now();
        resizer.handle_pointer_event(down("right", 0.0, 0.0), t0).unwrap();

        assert!(resizer.handle_pointer_event(mv(10.0, 0.0), t0).unwrap().is_some());
        // Dropped: inside the 16 ms window.
        assert!(resizer.handle_pointer_event(mv(20.0, 0.0), t0 + Duration::from_millis(8)).unwrap().is_none());
        assert_eq!(resizer.host().size().width, 210.0);

        // The delta is measured from the last processed sample.
        assert!(resizer.handle_pointer_event(mv(30.0, 0.0), t0 + Duration::from_millis(16)).unwrap().is_some());
        assert_eq!(resizer.host().size().width, 230.0);
    }

    #[test]
    fn test_second_down_during_session_is_ignored() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let t0 = Instant::now();
        resizer.handle_pointer_event(down("right", 0.0, 0.0), t0).unwrap();
        assert_eq!(resizer.handle_pointer_event(down("left", 0.0, 0.0), t0).unwrap(), None);
        assert_eq!(resizer.active_control(), Some(&ControlName::Direction(Direction::Right)));
    }

    #[test]
    fn test_malformed_transform_fails_down() {
        let host = MemoryHost::new(200.0, 100.0).with_computed("transform", "rotate(45deg)");
        let mut resizer = Resizer::new(host, ResizeConfig::default()).unwrap();
        let result = resizer.handle_pointer_event(down("left", 0.0, 0.0), Instant::now());
        assert!(matches!(result, Err(ResizeError::MalformedTransform(_))));
        assert!(!resizer.is_dragging());
        assert!(!resizer.host().is_pointer_captured());
    }

    #[test]
    fn test_callbacks_fire_in_order() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        for event in [ResizeEvent::Start, ResizeEvent::Move, ResizeEvent::End] {
            let log = log.clone();
            resizer.on(event, move |name, element| {
                log.borrow_mut().push((event, name.to_string(), element.size.width));
            });
        }

        let t0 = Instant::now();
        resizer.handle_pointer_event(down("right", 0.0, 0.0), t0).unwrap();
        resizer.handle_pointer_event(mv(15.0, 0.0), t0).unwrap();
        resizer.handle_pointer_event(up(), t0).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                (ResizeEvent::Start, "right".to_string(), 200.0),
                (ResizeEvent::Move, "right".to_string(), 215.0),
                (ResizeEvent::End, "right".to_string(), 215.0),
            ]
        );
    }

    #[test]
    fn test_destroy_mid_drag() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let ended = Rc::new(RefCell::new(false));
        let flag = ended.clone();
        resizer.on(ResizeEvent::End, move |_, _| *flag.borrow_mut() = true);

        let t0 = Instant::now();
        resizer.handle_pointer_event(down("right", 0.0, 0.0), t0).unwrap();
        resizer.destroy();

        assert!(resizer.is_destroyed());
        assert!(resizer.host().handle_names().is_empty());
        assert!(!resizer.host().is_pointer_captured());
        assert!(resizer.host().is_text_selection_enabled());

        let before = resizer.host().clone();
        assert_eq!(resizer.handle_pointer_event(mv(100.0, 0.0), t0 + Duration::from_secs(1)).unwrap(), None);
        assert_eq!(resizer.handle_pointer_event(up(), t0).unwrap(), None);
        assert_eq!(*resizer.host(), before);
        assert!(!*ended.borrow());

        // Idempotent.
        resizer.destroy();
        assert!(resizer.is_destroyed());
    }

    /// Host whose state outlives the resizer that owns it.
    struct SharedHost(Rc<RefCell<MemoryHost>>);

    impl ElementHost for SharedHost {
        fn computed_style(&self, property: &str) -> Option<String> {
            self.0.borrow().computed_style(property)
        }
        fn set_styles(&mut self, styles: &StyleMap) {
            self.0.borrow_mut().set_styles(styles);
        }
        fn bounding_box(&self) -> Size {
            self.0.borrow().bounding_box()
        }
        fn offset_size(&self) -> Size {
            self.0.borrow().offset_size()
        }
        fn has_handle(&self, name: &ControlName) -> bool {
            self.0.borrow().has_handle(name)
        }
        fn create_handle(&mut self, name: &ControlName, styles: &StyleMap) {
            self.0.borrow_mut().create_handle(name, styles);
        }
        fn style_handle(&mut self, name: &ControlName, styles: &StyleMap) {
            self.0.borrow_mut().style_handle(name, styles);
        }
        fn remove_handle(&mut self, name: &ControlName) {
            self.0.borrow_mut().remove_handle(name);
        }
        fn capture_pointer(&mut self) {
            self.0.borrow_mut().capture_pointer();
        }
        fn release_pointer(&mut self) {
            self.0.borrow_mut().release_pointer();
        }
        fn set_text_selection(&mut self, enabled: bool) {
            self.0.borrow_mut().set_text_selection(enabled);
        }
    }

    #[test]
    fn test_drop_mid_drag_restores_element() {
        let shared = Rc::new(RefCell::new(MemoryHost::new(200.0, 100.0)));
        let mut resizer = Resizer::new(SharedHost(shared.clone()), ResizeConfig::default()).unwrap();
        resizer.handle_pointer_event(down("right", 0.0, 0.0), Instant::now()).unwrap();
        assert!(!shared.borrow().is_text_selection_enabled());
        assert!(shared.borrow().is_pointer_captured());

        drop(resizer);

        let host = shared.borrow();
        assert!(host.is_text_selection_enabled());
        assert!(!host.is_pointer_captured());
        assert!(host.handle_names().is_empty());
        assert_eq!(crate::selection::active_sessions(), 0);
    }

    #[test]
    fn test_skipped_sample_writes_no_styles() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let t0 = Instant::now();
        resizer.handle_pointer_event(down("left", 0.0, 0.0), t0).unwrap();
        let writes = resizer.host().style_writes();

        // 200 - 200 = 0 leaves the element alone but still reports a move.
        let moved = resizer.handle_pointer_event(mv(200.0, 0.0), t0 + Duration::from_millis(20)).unwrap();
        assert_eq!(moved, Some(ResizeEvent::Move));
        assert_eq!(resizer.host().style_writes(), writes);
        assert_eq!(resizer.host().size(), Size::new(200.0, 100.0));
    }

    #[test]
    fn test_host_mut_writes_reach_element() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        resizer.host_mut().set_styles(&StyleMap::new().with("width", "120px"));
        assert_eq!(resizer.host().offset_size(), Size::new(120.0, 100.0));
    }

    #[test]
    fn test_replace_config() {
        let mut resizer = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        resizer
            .replace_config(ResizeConfig::new().with_controls([Direction::Top, Direction::TopLeft]))
            .unwrap();

        let names = resizer.host().handle_names();
        let expected: Vec<ControlName> = vec![Direction::Top.into(), Direction::TopLeft.into()];
        assert_eq!(names, expected);
        assert!(!resizer.is_control_enabled(&Direction::Right.into()));
        assert!(resizer.is_control_enabled(&Direction::TopLeft.into()));
    }

    #[test]
    fn test_text_selection_shared_between_instances() {
        let mut a = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let mut b = Resizer::new(MemoryHost::new(200.0, 100.0), ResizeConfig::default()).unwrap();
        let t0 = Instant::now();

        // Each MemoryHost records its own toggles; on a page both would
        // write to the same stylesheet.
        a.handle_pointer_event(down("right", 0.0, 0.0), t0).unwrap();
        b.handle_pointer_event(down("right", 0.0, 0.0), t0).unwrap();
        assert_eq!(crate::selection::active_sessions(), 2);
        assert!(!a.host().is_text_selection_enabled());
        // Already suppressed by the first session, so b never toggled it.
        assert!(b.host().is_text_selection_enabled());

        // a ends while b is still dragging: selection stays suppressed.
        a.handle_pointer_event(up(), t0).unwrap();
        assert_eq!(crate::selection::active_sessions(), 1);
        assert!(!a.host().is_text_selection_enabled());

        b.handle_pointer_event(up(), t0).unwrap();
        assert_eq!(crate::selection::active_sessions(), 0);
        assert!(b.host().is_text_selection_enabled());
    }
}
