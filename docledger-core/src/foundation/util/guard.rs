//! Compare-and-set slot guard.
//!
//! A slot is a single `AtomicBool`: acquiring flips it `false -> true`, dropping the guard
//! flips it back. A second acquire while the guard is alive fails instead of waiting.

use std::sync::atomic::{AtomicBool, Ordering};

pub struct SlotGuard<'a> {
    slot: &'a AtomicBool,
}

impl<'a> SlotGuard<'a> {
    pub fn try_acquire(slot: &'a AtomicBool) -> Option<Self> {
        slot.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok().map(|_| Self { slot })
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.slot.store(false, Ordering::Release);
    }
}
