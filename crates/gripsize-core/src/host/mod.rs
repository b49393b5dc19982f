//! Host abstraction.
//!
//! The resizer never touches a visual tree directly. Everything it needs
//! from the element being resized (style access, handle nodes, geometry
//! queries, pointer capture, text selection) goes through [`ElementHost`];
//! resolving a selector to an element goes through [`Document`].

mod memory;

pub use memory::{MemoryDocument, MemoryHost};

use crate::direction::ControlName;
use crate::style::StyleMap;
use kurbo::Size;

/// Attribute used to tag handle elements with their control name.
pub const CONTROL_ATTRIBUTE: &str = "data-control";

/// The resizable element, as seen by the resizer.
pub trait ElementHost {
    /// Resolved value of a style property, e.g. `position` or `transform`.
    fn computed_style(&self, property: &str) -> Option<String>;

    /// Write a batch of inline style properties.
    fn set_styles(&mut self, styles: &StyleMap);

    /// Size of the element's bounding box on screen.
    fn bounding_box(&self) -> Size;

    /// Current layout size of the element.
    fn offset_size(&self) -> Size;

    /// Check if a handle element tagged with `name` exists.
    fn has_handle(&self, name: &ControlName) -> bool;

    /// Create a handle element tagged with `name` and append it.
    fn create_handle(&mut self, name: &ControlName, styles: &StyleMap);

    /// Write styles onto an existing handle element.
    fn style_handle(&mut self, name: &ControlName, styles: &StyleMap);

    /// Remove the handle element tagged with `name`, if any.
    fn remove_handle(&mut self, name: &ControlName);

    /// Start routing document-level move and (one-shot) up events to the
    /// resizer.
    fn capture_pointer(&mut self);

    /// Stop routing document-level pointer events.
    fn release_pointer(&mut self);

    /// Enable or disable text selection across the page.
    fn set_text_selection(&mut self, enabled: bool);
}

/// Element lookup by selector.
pub trait Document {
    type Element: ElementHost;

    /// Resolve a selector to an element.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;
}

/// Either a selector to resolve or an already-resolved element.
#[derive(Debug, Clone)]
pub enum ElementRef<E> {
    Selector(String),
    Element(E),
}

impl<E> From<&str> for ElementRef<E> {
    fn from(selector: &str) -> Self {
        ElementRef::Selector(selector.to_string())
    }
}
