//! `web_sys` implementations of the host traits.

use crate::{SELECT_STYLE_ID, UNSELECT_CSS, handle_selector};
use gripsize_core::host::Document as HostDocument;
use gripsize_core::{CONTROL_ATTRIBUTE, ControlName, ElementHost, StyleMap};
use kurbo::Size;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, HtmlElement, MouseEvent};

/// Document-level move and up listeners for one resizer.
///
/// Created by [`crate::WebResizer`]; attached on pointer-down and detached
/// on pointer-up by the element host.
pub(crate) struct DocumentListeners {
    pub(crate) document: web_sys::Document,
    pub(crate) on_move: Closure<dyn FnMut(MouseEvent)>,
    pub(crate) on_up: Closure<dyn FnMut(MouseEvent)>,
}

impl DocumentListeners {
    fn attach(&self) {
        if let Err(e) = self
            .document
            .add_event_listener_with_callback("mousemove", listener(&self.on_move))
        {
            log::warn!("Failed to add mousemove listener: {:?}", e);
        }

        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(e) = self.document.add_event_listener_with_callback_and_add_event_listener_options(
            "mouseup",
            listener(&self.on_up),
            &options,
        ) {
            log::warn!("Failed to add mouseup listener: {:?}", e);
        }
    }

    pub(crate) fn detach(&self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("mousemove", listener(&self.on_move));
        // Already gone if it fired; removing again is harmless.
        let _ = self
            .document
            .remove_event_listener_with_callback("mouseup", listener(&self.on_up));
    }
}

/// The JS function behind a mouse listener closure.
pub(crate) fn listener(closure: &Closure<dyn FnMut(MouseEvent)>) -> &js_sys::Function {
    closure.as_ref().unchecked_ref::<js_sys::Function>()
}

/// Shared slot for the document listeners of one resizer.
pub(crate) type ListenerSlot = Rc<RefCell<Option<DocumentListeners>>>;

/// A DOM element driven by a resizer.
pub struct WebElement {
    element: HtmlElement,
    listeners: ListenerSlot,
}

impl WebElement {
    /// Wrap an element.
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            listeners: Rc::new(RefCell::new(None)),
        }
    }

    /// The wrapped element.
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub(crate) fn listener_slot(&self) -> ListenerSlot {
        self.listeners.clone()
    }

    fn handle(&self, name: &ControlName) -> Option<HtmlElement> {
        self.element
            .query_selector(&handle_selector(name))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

fn apply_styles(element: &HtmlElement, styles: &StyleMap) {
    let declaration = element.style();
    for (property, value) in styles.iter() {
        if let Err(e) = declaration.set_property(property, value) {
            log::warn!("Failed to set {}: {:?}", property, e);
        }
    }
}

impl ElementHost for WebElement {
    fn computed_style(&self, property: &str) -> Option<String> {
        let window = web_sys::window()?;
        let declaration = window.get_computed_style(&self.element).ok()??;
        declaration.get_property_value(property).ok()
    }

    fn set_styles(&mut self, styles: &StyleMap) {
        apply_styles(&self.element, styles);
    }

    fn bounding_box(&self) -> Size {
        let rect = self.element.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }

    fn offset_size(&self) -> Size {
        Size::new(self.element.offset_width() as f64, self.element.offset_height() as f64)
    }

    fn has_handle(&self, name: &ControlName) -> bool {
        self.handle(name).is_some()
    }

    fn create_handle(&mut self, name: &ControlName, styles: &StyleMap) {
        let Some(document) = self.element.owner_document() else {
            return;
        };
        let node = match document.create_element("div") {
            Ok(node) => node,
            Err(e) => {
                log::warn!("Failed to create handle {}: {:?}", name, e);
                return;
            }
        };
        if let Err(e) = node.set_attribute(CONTROL_ATTRIBUTE, name.as_str()) {
            log::warn!("Failed to tag handle {}: {:?}", name, e);
        }
        let Ok(handle) = node.dyn_into::<HtmlElement>() else {
            return;
        };
        apply_styles(&handle, styles);
        if let Err(e) = self.element.append_child(&handle) {
            log::warn!("Failed to append handle {}: {:?}", name, e);
        }
    }

    fn style_handle(&mut self, name: &ControlName, styles: &StyleMap) {
        if let Some(handle) = self.handle(name) {
            apply_styles(&handle, styles);
        }
    }

    fn remove_handle(&mut self, name: &ControlName) {
        if let Some(handle) = self.handle(name) {
            let _ = self.element.remove_child(&handle);
        }
    }

    fn capture_pointer(&mut self) {
        if let Some(listeners) = self.listeners.borrow().as_ref() {
            listeners.attach();
        }
    }

    fn release_pointer(&mut self) {
        if let Some(listeners) = self.listeners.borrow().as_ref() {
            listeners.detach();
        }
    }

    fn set_text_selection(&mut self, enabled: bool) {
        let Some(document) = self.element.owner_document() else {
            return;
        };
        let style = match document.get_element_by_id(SELECT_STYLE_ID) {
            Some(style) => style,
            None => {
                let Ok(style) = document.create_element("style") else {
                    return;
                };
                style.set_id(SELECT_STYLE_ID);
                let Some(head) = document.head() else {
                    return;
                };
                if head.append_child(&style).is_err() {
                    return;
                }
                style
            }
        };
        style.set_inner_html(if enabled { "" } else { UNSELECT_CSS });
    }
}

/// The page's document, for selector lookup.
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    /// The current window's document.
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }

    pub(crate) fn inner(&self) -> &web_sys::Document {
        &self.document
    }
}

impl HostDocument for WebDocument {
    type Element = WebElement;

    fn query_selector(&self, selector: &str) -> Option<WebElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(WebElement::new)
    }
}
