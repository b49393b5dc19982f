//! gripsize core library
//!
//! Platform-agnostic resize handles: a control registry, the geometry engine
//! that turns drags into new sizes, and the interaction state machine that
//! ties them to pointer input. The visual tree is reached through the
//! [`host::ElementHost`] trait.

pub mod config;
pub mod controls;
pub mod direction;
pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod input;
pub mod resizer;
pub mod selection;
pub mod style;
pub mod transform;

pub use config::{ControlEntry, ResizeConfig, SizeRange};
pub use controls::ControlRegistry;
pub use direction::{AxisDrive, ControlName, Direction};
pub use error::{ConfigError, ResizeError, ResizeResult};
pub use events::ResizeEvent;
pub use geometry::{ElementBox, Resize, SessionBase};
pub use host::{Document, ElementHost, ElementRef, MemoryDocument, MemoryHost, CONTROL_ATTRIBUTE};
pub use input::{Instant, PointerEvent, Throttle, MOVE_SAMPLE_INTERVAL};
pub use resizer::Resizer;
pub use style::{HandleSpec, StyleMap};
