//! Pointer input and move-event throttling.

use kurbo::Point;
use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;

/// Minimum interval between two processed move samples (about 60 Hz).
pub const MOVE_SAMPLE_INTERVAL: Duration = Duration::from_millis(16);

/// Pointer event fed to the resizer by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed. `target` is the control tag of the node under
    /// the pointer, or `None` if it is not a handle.
    Down {
        target: Option<String>,
        position: Point,
    },
    /// Pointer moved anywhere in the document.
    Move {
        position: Point,
    },
    /// Primary button released anywhere in the document.
    Up {
        position: Point,
    },
}

/// Leading-edge throttle.
///
/// The first event in a window is admitted immediately; anything else
/// arriving before the window closes is dropped, not queued.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Create a throttle with the given minimum interval.
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Decide whether an event at `now` is processed.
    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    /// Forget the last admitted event so the next one passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(MOVE_SAMPLE_INTERVAL)
    }
}
