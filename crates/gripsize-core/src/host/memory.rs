//! In-memory host implementation.

use super::{Document, ElementHost};
use crate::direction::ControlName;
use crate::style::StyleMap;
use kurbo::Size;
use std::collections::HashMap;

/// In-memory element for testing and headless use.
///
/// Keeps inline styles, handle nodes and a layout size. Writing `width` or
/// `height` as pixel values updates the layout size, the way a browser would
/// for a `border-box` element.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryHost {
    size: Size,
    styles: StyleMap,
    handles: Vec<(ControlName, StyleMap)>,
    computed: StyleMap,
    pointer_captured: bool,
    text_selection: bool,
    style_writes: usize,
}

impl MemoryHost {
    /// Create an element with the given layout size, `position: static`
    /// and no transform.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            styles: StyleMap::new(),
            handles: Vec::new(),
            computed: StyleMap::new().with("position", "static").with("transform", "none"),
            pointer_captured: false,
            text_selection: true,
            style_writes: 0,
        }
    }

    /// Set a computed style value that inline styles do not override.
    pub fn with_computed(mut self, property: &str, value: &str) -> Self {
        self.computed.set(property, value);
        self
    }

    /// Current inline styles.
    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    /// Current layout size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Styles of the handle tagged with `name`.
    pub fn handle_styles(&self, name: &ControlName) -> Option<&StyleMap> {
        self.handles.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Names of all handles, in insertion order.
    pub fn handle_names(&self) -> Vec<ControlName> {
        self.handles.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn is_pointer_captured(&self) -> bool {
        self.pointer_captured
    }

    pub fn is_text_selection_enabled(&self) -> bool {
        self.text_selection
    }

    /// Number of `set_styles` calls on the element itself.
    pub fn style_writes(&self) -> usize {
        self.style_writes
    }
}

fn parse_px(value: &str) -> Option<f64> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

impl ElementHost for MemoryHost {
    fn computed_style(&self, property: &str) -> Option<String> {
        self.styles
            .get(property)
            .or_else(|| self.computed.get(property))
            .map(str::to_string)
    }

    fn set_styles(&mut self, styles: &StyleMap) {
        self.style_writes += 1;
        for (property, value) in styles.iter() {
            match property {
                "width" => {
                    if let Some(w) = parse_px(value) {
                        self.size.width = w;
                    }
                }
                "height" => {
                    if let Some(h) = parse_px(value) {
                        self.size.height = h;
                    }
                }
                _ => {}
            }
        }
        self.styles.merge(styles);
    }

    fn bounding_box(&self) -> Size {
        self.size
    }

    fn offset_size(&self) -> Size {
        self.size
    }

    fn has_handle(&self, name: &ControlName) -> bool {
        self.handles.iter().any(|(n, _)| n == name)
    }

    fn create_handle(&mut self, name: &ControlName, styles: &StyleMap) {
        self.handles.push((name.clone(), styles.clone()));
    }

    fn style_handle(&mut self, name: &ControlName, styles: &StyleMap) {
        if let Some((_, existing)) = self.handles.iter_mut().find(|(n, _)| n == name) {
            existing.merge(styles);
        }
    }

    fn remove_handle(&mut self, name: &ControlName) {
        self.handles.retain(|(n, _)| n != name);
    }

    fn capture_pointer(&mut self) {
        self.pointer_captured = true;
    }

    fn release_pointer(&mut self) {
        self.pointer_captured = false;
    }

    fn set_text_selection(&mut self, enabled: bool) {
        self.text_selection = enabled;
    }
}

/// In-memory selector lookup over [`MemoryHost`] elements.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: HashMap<String, MemoryHost>,
}

impl MemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element under a selector.
    pub fn insert(&mut self, selector: &str, element: MemoryHost) {
        self.elements.insert(selector.to_string(), element);
    }
}

impl Document for MemoryDocument {
    type Element = MemoryHost;

    fn query_selector(&self, selector: &str) -> Option<MemoryHost> {
        self.elements.get(selector).cloned()
    }
}
