//! Wiring DOM mouse events to a resizer.

use crate::dom::{DocumentListeners, ListenerSlot, WebDocument, WebElement, listener};
use gripsize_core::{
    CONTROL_ATTRIBUTE, ControlName, ElementBox, ElementRef, HandleSpec, Instant, PointerEvent, ResizeConfig,
    ResizeError, ResizeEvent, ResizeResult, Resizer,
};
use kurbo::Point;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, MouseEvent};

/// Initialize console logging and the panic hook.
pub fn init_logging(level: log::Level) -> Result<(), log::SetLoggerError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level)
}

fn screen_position(event: &MouseEvent) -> Point {
    Point::new(event.screen_x() as f64, event.screen_y() as f64)
}

fn control_tag(event: &MouseEvent) -> Option<String> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.get_attribute(CONTROL_ATTRIBUTE))
}

/// Build a listener that forwards mouse events to the resizer while it is
/// alive.
fn forward(
    resizer: Weak<RefCell<Resizer<WebElement>>>,
    to_pointer: fn(&MouseEvent) -> Option<PointerEvent>,
) -> Closure<dyn FnMut(MouseEvent)> {
    Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let Some(resizer) = resizer.upgrade() else {
            return;
        };
        let Some(pointer) = to_pointer(&event) else {
            return;
        };
        let Ok(mut resizer) = resizer.try_borrow_mut() else {
            log::warn!("Pointer event dropped: resizer is busy");
            return;
        };
        if let Err(e) = resizer.handle_pointer_event(pointer, Instant::now()) {
            log::error!("Resize failed: {}", e);
        }
    })
}

/// A resizer attached to a live DOM element.
///
/// Handlers registered with [`WebResizer::on`] run while the resizer is
/// borrowed and must not call back into it.
pub struct WebResizer {
    resizer: Rc<RefCell<Resizer<WebElement>>>,
    element: HtmlElement,
    listeners: ListenerSlot,
    on_down: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl WebResizer {
    /// Attach to the element matched by a selector.
    pub fn attach(selector: &str, config: ResizeConfig) -> ResizeResult<Self> {
        Self::create(ElementRef::Selector(selector.to_string()), config)
    }

    /// Attach to a selector or an already-resolved element.
    pub fn create(target: ElementRef<WebElement>, config: ResizeConfig) -> ResizeResult<Self> {
        let document = WebDocument::current().ok_or_else(|| ResizeError::ElementNotFound("document".to_string()))?;
        let resizer = Resizer::create(&document, target, config)?;
        let element = resizer.host().element().clone();
        let listeners = resizer.host().listener_slot();
        let resizer = Rc::new(RefCell::new(resizer));

        let on_down = forward(Rc::downgrade(&resizer), |event| {
            // Primary button only.
            (event.button() == 0).then(|| PointerEvent::Down {
                target: control_tag(event),
                position: screen_position(event),
            })
        });
        if let Err(e) = element.add_event_listener_with_callback("mousedown", listener(&on_down)) {
            log::warn!("Failed to add mousedown listener: {:?}", e);
        }

        let on_move = forward(Rc::downgrade(&resizer), |event| {
            Some(PointerEvent::Move { position: screen_position(event) })
        });
        let on_up = forward(Rc::downgrade(&resizer), |event| {
            Some(PointerEvent::Up { position: screen_position(event) })
        });
        *listeners.borrow_mut() = Some(DocumentListeners {
            document: document.inner().clone(),
            on_move,
            on_up,
        });

        log::info!("Resize handles attached");
        Ok(Self {
            resizer,
            element,
            listeners,
            on_down: Some(on_down),
        })
    }

    /// The element being resized.
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn set_control_state(&self, name: impl Into<ControlName>, enabled: bool, spec: impl Into<HandleSpec>) {
        self.resizer.borrow_mut().set_control_state(name, enabled, spec);
    }

    pub fn set_all_control_state(&self, enabled: bool, spec: impl Into<HandleSpec>) {
        self.resizer.borrow_mut().set_all_control_state(enabled, spec);
    }

    pub fn on<F>(&self, event: ResizeEvent, handler: F)
    where
        F: FnMut(&ControlName, &ElementBox) + 'static,
    {
        self.resizer.borrow_mut().on(event, handler);
    }

    pub fn off(&self, event: ResizeEvent) {
        self.resizer.borrow_mut().off(event);
    }

    /// Remove handles and every listener. Safe to call more than once.
    pub fn destroy(&mut self) {
        match self.resizer.try_borrow_mut() {
            Ok(mut resizer) => resizer.destroy(),
            Err(_) => log::warn!("Resizer busy during destroy; handles are left in place"),
        }
        if let Some(on_down) = self.on_down.take() {
            let _ = self
                .element
                .remove_event_listener_with_callback("mousedown", listener(&on_down));
        }
        if let Some(listeners) = self.listeners.borrow_mut().take() {
            listeners.detach();
        }
    }
}

impl Drop for WebResizer {
    fn drop(&mut self) {
        self.destroy();
    }
}
