//! Resizer configuration.
//!
//! A configuration is fixed for the lifetime of a resizer and replaced
//! wholesale, never patched. It can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "width": [100, 600],
//!   "height": [50, null],
//!   "proportional": false,
//!   "control": ["right", { "name": "bottomRight", "styles": { "background": "red" } }]
//! }
//! ```

use crate::direction::{ControlName, Direction};
use crate::error::ConfigError;
use crate::style::{HandleSpec, StyleMap};
use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range for one axis. `max` may be infinite.
///
/// Serialized as a two-element array; `null` in the second slot means no
/// upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, Option<f64>)", into = "(f64, Option<f64>)")]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    /// Range `[0, inf)`.
    pub const UNBOUNDED: SizeRange = SizeRange { min: 0.0, max: f64::INFINITY };

    /// Create a range.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a value into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Check if a value lies in the range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, axis: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || self.min < 0.0 {
            return Err(ConfigError::InvalidMinimum { axis, min: self.min });
        }
        // NaN max fails this comparison too.
        if !(self.min <= self.max) {
            return Err(ConfigError::InvertedRange { axis, min: self.min, max: self.max });
        }
        Ok(())
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl From<(f64, Option<f64>)> for SizeRange {
    fn from((min, max): (f64, Option<f64>)) -> Self {
        Self { min, max: max.unwrap_or(f64::INFINITY) }
    }
}

impl From<SizeRange> for (f64, Option<f64>) {
    fn from(range: SizeRange) -> Self {
        let max = if range.max.is_infinite() { None } else { Some(range.max) };
        (range.min, max)
    }
}

/// One entry of the `control` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlEntry {
    /// Bare name: enabled, default style.
    Name(ControlName),
    /// Structured entry with an explicit disabled flag and style override.
    Detailed {
        name: ControlName,
        #[serde(default)]
        disabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        styles: Option<StyleMap>,
    },
}

impl ControlEntry {
    /// The control's name.
    pub fn name(&self) -> &ControlName {
        match self {
            ControlEntry::Name(name) => name,
            ControlEntry::Detailed { name, .. } => name,
        }
    }

    /// Whether the control starts out enabled.
    pub fn initially_enabled(&self) -> bool {
        match self {
            ControlEntry::Name(_) => true,
            ControlEntry::Detailed { disabled, .. } => !disabled,
        }
    }

    /// The handle spec this entry asks for.
    pub fn handle_spec(&self) -> HandleSpec {
        match self {
            ControlEntry::Detailed { styles: Some(styles), .. } => HandleSpec::Styles(styles.clone()),
            _ => HandleSpec::Default,
        }
    }
}

impl From<Direction> for ControlEntry {
    fn from(direction: Direction) -> Self {
        ControlEntry::Name(direction.into())
    }
}

impl From<&str> for ControlEntry {
    fn from(name: &str) -> Self {
        ControlEntry::Name(name.into())
    }
}

/// Resizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Allowed width range.
    pub width: SizeRange,
    /// Allowed height range.
    pub height: SizeRange,
    /// Locked `width / height` ratio, or `None` for free resizing.
    #[serde(with = "proportional")]
    pub proportional: Option<f64>,
    /// Controls to install, in order.
    #[serde(rename = "control")]
    pub controls: Vec<ControlEntry>,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: SizeRange::UNBOUNDED,
            height: SizeRange::UNBOUNDED,
            proportional: None,
            controls: vec![
                Direction::Left.into(),
                Direction::Right.into(),
                Direction::Bottom.into(),
                Direction::BottomRight.into(),
            ],
        }
    }
}

impl ResizeConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ResizeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_width(mut self, min: f64, max: f64) -> Self {
        self.width = SizeRange::new(min, max);
        self
    }

    pub fn with_height(mut self, min: f64, max: f64) -> Self {
        self.height = SizeRange::new(min, max);
        self
    }

    pub fn with_proportional(mut self, ratio: Option<f64>) -> Self {
        self.proportional = ratio;
        self
    }

    pub fn with_controls<I, C>(mut self, controls: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ControlEntry>,
    {
        self.controls = controls.into_iter().map(Into::into).collect();
        self
    }

    /// Check ranges and ratio.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.width.validate("width")?;
        self.height.validate("height")?;
        if let Some(ratio) = self.proportional {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(ConfigError::InvalidRatio(ratio));
            }
        }
        Ok(())
    }
}

/// `proportional` is either a ratio or `false`.
mod proportional {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Ratio(f64),
        Flag(bool),
    }

    pub(super) fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ratio) => Repr::Ratio(*ratio),
            None => Repr::Flag(false),
        }
        .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Ratio(ratio) if ratio == 0.0 => Ok(None),
            Repr::Ratio(ratio) => Ok(Some(ratio)),
            Repr::Flag(false) => Ok(None),
            Repr::Flag(true) => Err(D::Error::custom("proportional must be a ratio or false")),
        }
    }
}
