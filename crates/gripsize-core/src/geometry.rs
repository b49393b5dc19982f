//! Geometry transform engine.
//!
//! Maps a pointer delta on a given [`Direction`] to a new box size and, for
//! handles on the left or top edge, a translation that keeps the opposite
//! edge where it was when the drag started.

use crate::config::{ResizeConfig, SizeRange};
use crate::direction::{AxisDrive, Direction};
use crate::style::StyleMap;
use crate::transform::{format_transform, offset_translation};
use kurbo::{Affine, Size, Vec2};
use serde::Serialize;

/// Snapshot of an element's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementBox {
    /// Layout size in pixels.
    pub size: Size,
    /// Current 2-D transform.
    pub transform: Affine,
}

impl ElementBox {
    pub fn new(size: Size, transform: Affine) -> Self {
        Self { size, transform }
    }

    /// Left edge position, assuming no rotation or scale.
    pub fn left(&self) -> f64 {
        self.transform.translation().x
    }

    /// Right edge position, assuming no rotation or scale.
    pub fn right(&self) -> f64 {
        self.left() + self.size.width
    }

    /// Top edge position, assuming no rotation or scale.
    pub fn top(&self) -> f64 {
        self.transform.translation().y
    }

    /// Bottom edge position, assuming no rotation or scale.
    pub fn bottom(&self) -> f64 {
        self.top() + self.size.height
    }
}

/// Values captured once when a drag session starts.
///
/// All anchor compensation within a session is relative to this base, so
/// rounding never compounds across samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionBase {
    /// Bounding box size at session start.
    pub start_size: Size,
    /// Element transform at session start.
    pub transform: Affine,
}

/// Result of one resize step. `None` means "leave this property alone".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resize {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub transform: Option<Affine>,
}

impl Resize {
    /// Check if the step changes nothing.
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.transform.is_none()
    }

    /// The style writes this step amounts to.
    pub fn to_styles(&self) -> StyleMap {
        let mut styles = StyleMap::new();
        if let Some(width) = self.width {
            styles.set("width", format!("{width}px"));
        }
        if let Some(height) = self.height {
            styles.set("height", format!("{height}px"));
        }
        if let Some(transform) = self.transform {
            styles.set("transform", format_transform(transform));
        }
        styles
    }

    /// Apply this step on top of an existing box.
    pub fn apply_to(&self, element: ElementBox) -> ElementBox {
        ElementBox {
            size: Size::new(
                self.width.unwrap_or(element.size.width),
                self.height.unwrap_or(element.size.height),
            ),
            transform: self.transform.unwrap_or(element.transform),
        }
    }
}

/// Clamp a requested size for one axis.
///
/// Returns the clamped size and, when `compensate` is set, the displacement
/// that keeps the far edge fixed relative to `start_size`. A requested size of
/// exactly zero means "no value for this axis" and yields `None`.
pub fn clamp_axis(requested: f64, range: &SizeRange, start_size: f64, compensate: bool) -> Option<(f64, f64)> {
    if requested == 0.0 || requested.is_nan() {
        return None;
    }
    let clamped = range.clamp(requested);
    let shift = if compensate { start_size - clamped } else { 0.0 };
    Some((clamped, shift))
}

/// Raw candidate size for one axis before clamping.
fn candidate(drive: AxisDrive, current: f64, delta: f64) -> Option<f64> {
    match drive {
        AxisDrive::Fixed => None,
        AxisDrive::Leading => Some(current - delta),
        AxisDrive::Trailing => Some(current + delta),
    }
}

/// Compute one resize step.
///
/// - `current` is the element's live size and transform.
/// - `delta` is the pointer movement since the previous sample.
/// - `base` holds the session's start size and transform.
///
/// An axis skipped for this sample keeps its live translation, so its far
/// edge stays put while the other axis is compensated.
///
/// Proportional mode runs after clamping and overrides one axis, so the
/// derived axis can end up outside its own configured range.
pub fn resize(
    direction: Direction,
    current: ElementBox,
    delta: Vec2,
    base: &SessionBase,
    config: &ResizeConfig,
) -> Resize {
    let h_drive = direction.horizontal();
    let v_drive = direction.vertical();

    let width = candidate(h_drive, current.size.width, delta.x).and_then(|w| {
        clamp_axis(w, &config.width, base.start_size.width, h_drive == AxisDrive::Leading)
    });
    let height = candidate(v_drive, current.size.height, delta.y).and_then(|h| {
        clamp_axis(h, &config.height, base.start_size.height, v_drive == AxisDrive::Leading)
    });

    let compensates = (h_drive == AxisDrive::Leading && width.is_some())
        || (v_drive == AxisDrive::Leading && height.is_some());
    let transform = compensates.then(|| {
        let shifted = offset_translation(
            base.transform,
            width.map_or(0.0, |(_, shift)| shift),
            height.map_or(0.0, |(_, shift)| shift),
        );
        let mut coeffs = shifted.as_coeffs();
        let live = current.transform.as_coeffs();
        if h_drive == AxisDrive::Leading && width.is_none() {
            coeffs[4] = live[4];
        }
        if v_drive == AxisDrive::Leading && height.is_none() {
            coeffs[5] = live[5];
        }
        Affine::new(coeffs)
    });

    let mut width = width.map(|(w, _)| w);
    let mut height = height.map(|(h, _)| h);

    if let Some(ratio) = config.proportional {
        if direction.is_corner() {
            // The larger side gets re-derived from the smaller one.
            if let (Some(w), Some(h)) = (width, height) {
                if w >= h {
                    width = Some(h * ratio);
                } else {
                    height = Some(w / ratio);
                }
            }
        } else if h_drive != AxisDrive::Fixed {
            height = width.map(|w| w / ratio);
        } else {
            width = height.map(|h| h * ratio);
        }
    }

    Resize { width, height, transform }
}
