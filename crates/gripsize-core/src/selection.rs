//! Text selection suppression shared by every resizer on the UI thread.
//!
//! Selection is disabled while any drag session is active and restored once
//! the last one ends. The count lives in a thread local: resizers are driven
//! from the single UI thread that owns the page.

use std::cell::Cell;

thread_local! {
    static ACTIVE_SESSIONS: Cell<usize> = const { Cell::new(0) };
}

/// Number of sessions currently holding selection disabled.
pub fn active_sessions() -> usize {
    ACTIVE_SESSIONS.with(Cell::get)
}

/// A hold on text selection suppression.
///
/// Dropping the lock without calling [`SelectionLock::release`] still
/// decrements the count, but the caller then cannot learn whether it was the
/// last holder.
#[derive(Debug)]
pub struct SelectionLock {
    released: bool,
}

impl SelectionLock {
    /// Take a hold. The flag is true when this is the first active hold, in
    /// which case the caller disables selection.
    pub fn acquire() -> (Self, bool) {
        let previous = ACTIVE_SESSIONS.with(|n| {
            let previous = n.get();
            n.set(previous + 1);
            previous
        });
        (Self { released: false }, previous == 0)
    }

    /// Give the hold back. Returns true when no holds remain, in which case
    /// the caller restores selection.
    pub fn release(mut self) -> bool {
        self.released = true;
        decrement() == 0
    }
}

impl Drop for SelectionLock {
    fn drop(&mut self) {
        if !self.released {
            decrement();
        }
    }
}

fn decrement() -> usize {
    ACTIVE_SESSIONS.with(|n| {
        let next = n.get().saturating_sub(1);
        n.set(next);
        next
    })
}
