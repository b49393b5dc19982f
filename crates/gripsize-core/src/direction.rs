//! Handle directions and control names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the eight canonical edges or corners a handle can sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    // Edge handles
    Left,
    Right,
    Top,
    Bottom,
    // Corner handles
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// How a direction drives one axis of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDrive {
    /// The axis is not touched by this direction.
    Fixed,
    /// The handle sits on the start edge (left or top). Dragging outward
    /// grows the box and the position has to follow.
    Leading,
    /// The handle sits on the end edge (right or bottom).
    Trailing,
}

/// Error returned when a string is not one of the canonical direction names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction: {0}")]
pub struct UnknownDirection(pub String);

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 8] = [
        Direction::Left,
        Direction::Right,
        Direction::Top,
        Direction::Bottom,
        Direction::TopLeft,
        Direction::TopRight,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    /// The name used in configuration and in the `data-control` tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::TopLeft => "topLeft",
            Direction::TopRight => "topRight",
            Direction::BottomLeft => "bottomLeft",
            Direction::BottomRight => "bottomRight",
        }
    }

    /// How this direction drives the horizontal axis.
    pub fn horizontal(self) -> AxisDrive {
        match self {
            Direction::Left | Direction::TopLeft | Direction::BottomLeft => AxisDrive::Leading,
            Direction::Right | Direction::TopRight | Direction::BottomRight => AxisDrive::Trailing,
            Direction::Top | Direction::Bottom => AxisDrive::Fixed,
        }
    }

    /// How this direction drives the vertical axis.
    pub fn vertical(self) -> AxisDrive {
        match self {
            Direction::Top | Direction::TopLeft | Direction::TopRight => AxisDrive::Leading,
            Direction::Bottom | Direction::BottomLeft | Direction::BottomRight => AxisDrive::Trailing,
            Direction::Left | Direction::Right => AxisDrive::Fixed,
        }
    }

    /// Check if this is a corner handle (drives both axes).
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Direction::TopLeft | Direction::TopRight | Direction::BottomLeft | Direction::BottomRight
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDirection(s.to_string()))
    }
}

/// Name of a configured control.
///
/// Configuration and handle tags are plain strings, so a handle can carry a
/// name that is not a canonical direction. Such a control can still be
/// enabled and pressed, but it never resizes anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ControlName {
    /// One of the eight canonical directions.
    Direction(Direction),
    /// Anything else.
    Other(String),
}

impl ControlName {
    /// The direction this control resizes, if it is canonical.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            ControlName::Direction(d) => Some(*d),
            ControlName::Other(_) => None,
        }
    }

    /// The string form of the name.
    pub fn as_str(&self) -> &str {
        match self {
            ControlName::Direction(d) => d.as_str(),
            ControlName::Other(name) => name,
        }
    }
}

impl fmt::Display for ControlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Direction> for ControlName {
    fn from(direction: Direction) -> Self {
        ControlName::Direction(direction)
    }
}

impl From<&str> for ControlName {
    fn from(name: &str) -> Self {
        match name.parse::<Direction>() {
            Ok(d) => ControlName::Direction(d),
            Err(_) => ControlName::Other(name.to_string()),
        }
    }
}

impl From<String> for ControlName {
    fn from(name: String) -> Self {
        match name.parse::<Direction>() {
            Ok(d) => ControlName::Direction(d),
            Err(_) => ControlName::Other(name),
        }
    }
}

impl From<ControlName> for String {
    fn from(name: ControlName) -> Self {
        match name {
            ControlName::Direction(d) => d.as_str().to_string(),
            ControlName::Other(name) => name,
        }
    }
}
