//! Reference counters for the shared representation.
//!
//! The counter is the only state ever touched from two threads at once, so
//! it is the only thing that varies between the thread-safe and the local
//! flavor of [`Octets`](crate::bytes::Octets).

use core::cell::Cell;

#[cfg(not(loom))]
use core::sync::atomic::{fence, AtomicUsize, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{fence, AtomicUsize, Ordering};

#[cfg(test)]
mod tests;

mod sealed {
    pub trait Sealed {}
}

/// Sealed trait for a basic reference counter.
///
/// A counter starts at one and is destroyed by whoever decrements it to
/// zero. Both operations go through shared references: the counter lives in
/// a cell that may be reachable from several handles at once.
pub trait Count: sealed::Sealed + 'static {
    /// Creates a new counter that starts at one.
    fn one() -> Self;

    /// Increments the counter and returns `true` iff the counter saturates
    /// (reaches `usize::MAX`).
    fn incr(&self) -> bool;

    /// Decrements the counter and returns `true` iff the counter reaches
    /// zero, that is, the last owner is gone.
    fn decr(&self) -> bool;

    /// Returns the current value of the counter.
    fn get(&self) -> usize;
}

/// Local (not thread-safe) reference counter.
pub struct Local(Cell<usize>);

/// Thread-safe reference counter.
pub struct ThreadSafe(AtomicUsize);

impl sealed::Sealed for Local {}

impl sealed::Sealed for ThreadSafe {}

impl Count for Local {
    #[inline]
    fn one() -> Self {
        Self(Cell::new(1))
    }

    #[inline]
    fn incr(&self) -> bool {
        let new_value = self.0.get() + 1;
        self.0.set(new_value);
        new_value == usize::MAX
    }

    #[inline]
    fn decr(&self) -> bool {
        let new_value = self.0.get().saturating_sub(1);
        self.0.set(new_value);
        new_value == 0
    }

    #[inline]
    fn get(&self) -> usize {
        self.0.get()
    }
}

impl Count for ThreadSafe {
    #[inline]
    fn one() -> Self {
        Self(AtomicUsize::new(1))
    }

    #[inline]
    fn incr(&self) -> bool {
        let old = self.0.fetch_add(1, Ordering::Relaxed);
        old == usize::MAX
    }

    #[inline]
    fn decr(&self) -> bool {
        let old_value = self.0.fetch_sub(1, Ordering::Release);
        if old_value == 1 {
            // all previous unsharing must be visible before the free
            fence(Ordering::Acquire);
            true
        } else {
            false
        }
    }

    #[inline]
    fn get(&self) -> usize {
        self.0.load(Ordering::Acquire)
    }
}
