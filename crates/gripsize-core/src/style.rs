//! Style maps and the default look of resize handles.

use crate::direction::{ControlName, Direction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered map of CSS property names to values.
///
/// Property names are stored in kebab-case (`z-index`); camelCase names
/// (`zIndex`) are converted on insertion. Numeric values are accepted when
/// deserializing and stored as their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, StyleValue>", into = "BTreeMap<String, String>")]
pub struct StyleMap {
    properties: BTreeMap<String, String>,
}

impl StyleMap {
    /// Create an empty style map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, returning the map for chaining.
    pub fn with(mut self, property: &str, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Set a property.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        self.properties.insert(kebab_case(property), value.into());
    }

    /// Get a property value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(&kebab_case(property)).map(String::as_str)
    }

    /// Overlay `other` on top of this map.
    pub fn merge(&mut self, other: &StyleMap) {
        for (k, v) in &other.properties {
            self.properties.insert(k.clone(), v.clone());
        }
    }

    /// Iterate over `(property, value)` pairs in property order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A property value as written in configuration: `"100px"` or `100`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum StyleValue {
    Text(String),
    Number(f64),
}

impl From<StyleValue> for String {
    fn from(value: StyleValue) -> Self {
        match value {
            StyleValue::Text(text) => text,
            StyleValue::Number(number) => number.to_string(),
        }
    }
}

impl From<BTreeMap<String, StyleValue>> for StyleMap {
    fn from(map: BTreeMap<String, StyleValue>) -> Self {
        map.into_iter().map(|(k, v)| (k, String::from(v))).collect::<BTreeMap<_, _>>().into()
    }
}

impl From<BTreeMap<String, String>> for StyleMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        let mut styles = StyleMap::new();
        for (k, v) in map {
            styles.set(&k, v);
        }
        styles
    }
}

impl From<StyleMap> for BTreeMap<String, String> {
    fn from(styles: StyleMap) -> Self {
        styles.properties
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut styles = StyleMap::new();
        for (k, v) in iter {
            styles.set(k, v);
        }
        styles
    }
}

fn kebab_case(property: &str) -> String {
    // Custom properties are case-sensitive and pass through untouched.
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// What to do with a handle's element when its control state changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HandleSpec {
    /// Leave the visual tree alone, only flip the enabled flag.
    Untouched,
    /// Create (or restyle) the handle with the default style for its
    /// direction when enabling; remove it when disabling.
    #[default]
    Default,
    /// Like [`HandleSpec::Default`], with these styles laid over the
    /// defaults.
    Styles(StyleMap),
}

impl HandleSpec {
    /// Whether this spec asks for the visual tree to be touched.
    pub fn touches_tree(&self) -> bool {
        !matches!(self, HandleSpec::Untouched)
    }

    /// Resolve the final style for a handle of the given name.
    pub fn resolve(&self, name: &ControlName) -> StyleMap {
        let mut styles = name
            .direction()
            .map(default_handle_style)
            .unwrap_or_default();
        if let HandleSpec::Styles(overrides) = self {
            styles.merge(overrides);
        }
        styles
    }
}

impl From<bool> for HandleSpec {
    fn from(touch: bool) -> Self {
        if touch { HandleSpec::Default } else { HandleSpec::Untouched }
    }
}

impl From<StyleMap> for HandleSpec {
    fn from(styles: StyleMap) -> Self {
        HandleSpec::Styles(styles)
    }
}

/// Edge strip thickness in pixels.
pub const EDGE_HANDLE_THICKNESS: f64 = 10.0;
/// Corner square side in pixels.
pub const CORNER_HANDLE_SIZE: f64 = 20.0;
/// Stacking order of handles relative to the element's content.
pub const HANDLE_Z_INDEX: i32 = 99;

/// The default style for a handle on the given direction.
///
/// Edge handles are strips straddling the edge; corner handles are squares
/// centred on the corner.
pub fn default_handle_style(direction: Direction) -> StyleMap {
    let edge_offset = format!("-{}px", EDGE_HANDLE_THICKNESS / 2.0);
    let edge = format!("{EDGE_HANDLE_THICKNESS}px");
    let corner_offset = format!("-{}px", CORNER_HANDLE_SIZE / 2.0);
    let corner = format!("{CORNER_HANDLE_SIZE}px");

    let base = StyleMap::new()
        .with("position", "absolute")
        .with("z-index", HANDLE_Z_INDEX.to_string());

    match direction {
        Direction::Left => base
            .with("top", "0")
            .with("left", edge_offset)
            .with("width", edge)
            .with("height", "100%")
            .with("cursor", "ew-resize"),
        Direction::Right => base
            .with("top", "0")
            .with("right", edge_offset)
            .with("width", edge)
            .with("height", "100%")
            .with("cursor", "ew-resize"),
        Direction::Top => base
            .with("top", edge_offset)
            .with("left", "0")
            .with("width", "100%")
            .with("height", edge)
            .with("cursor", "n-resize"),
        Direction::Bottom => base
            .with("bottom", edge_offset)
            .with("left", "0")
            .with("width", "100%")
            .with("height", edge)
            .with("cursor", "n-resize"),
        Direction::TopLeft => base
            .with("top", corner_offset.clone())
            .with("left", corner_offset)
            .with("width", corner.clone())
            .with("height", corner)
            .with("cursor", "nwse-resize"),
        Direction::TopRight => base
            .with("top", corner_offset.clone())
            .with("right", corner_offset)
            .with("width", corner.clone())
            .with("height", corner)
            .with("cursor", "nesw-resize"),
        Direction::BottomLeft => base
            .with("bottom", corner_offset.clone())
            .with("left", corner_offset)
            .with("width", corner.clone())
            .with("height", corner)
            .with("cursor", "nesw-resize"),
        Direction::BottomRight => base
            .with("bottom", corner_offset.clone())
            .with("right", corner_offset)
            .with("width", corner.clone())
            .with("height", corner)
            .with("cursor", "nwse-resize"),
    }
}
