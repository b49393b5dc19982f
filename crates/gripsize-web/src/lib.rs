//! gripsize browser binding
//!
//! Implements the core host traits over `web_sys` elements and wires DOM
//! mouse listeners to a [`gripsize_core::Resizer`]. Everything that touches
//! the DOM is only compiled for `wasm32`.

use gripsize_core::{CONTROL_ATTRIBUTE, ControlName};

#[cfg(target_arch = "wasm32")]
mod binding;
#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
pub use binding::{WebResizer, init_logging};
#[cfg(target_arch = "wasm32")]
pub use dom::{WebDocument, WebElement};

/// Id of the `<style>` node that disables text selection during a drag.
pub const SELECT_STYLE_ID: &str = "dom-resize-select-style";

/// Stylesheet body written into [`SELECT_STYLE_ID`] while dragging.
pub const UNSELECT_CSS: &str = "* {
  -webkit-touch-callout: none;
  -webkit-user-select: none;
  -moz-user-select: none;
  -ms-user-select: none;
  user-select: none;
}";

/// CSS selector matching the handle element for `name`.
pub fn handle_selector(name: &ControlName) -> String {
    let mut escaped = String::with_capacity(name.as_str().len());
    for c in name.as_str().chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("div[{CONTROL_ATTRIBUTE}=\"{escaped}\"]")
}
