//! Deterministic one-shot timers on a virtual clock.

use std::collections::BTreeMap;

use crate::foundation::core::Millis;

/// Handle of a scheduled timer; also its tie-break order among timers due at the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// Fire-and-forget timers keyed by due time, then scheduling order.
///
/// Nothing is ever cancelled; a payload whose effect is no longer wanted checks its own
/// preconditions when it fires.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    now: Millis,
    next_seq: u64,
    pending: BTreeMap<(Millis, u64), T>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Empty queue with the clock at zero.
    pub fn new() -> Self {
        Self {
            now: Millis::ZERO,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedule `payload` to fire `delay` after the current time.
    pub fn schedule_in(&mut self, delay: Millis, payload: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((self.now + delay, seq), payload);
        TimerId(seq)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timer is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.keys().next().map(|&(due, _)| due)
    }

    /// Remove the earliest timer due at or before `deadline`, moving the clock to its due time.
    ///
    /// The clock never runs backwards, so a timer scheduled while handling another one fires no
    /// earlier than the handler.
    pub fn pop_until(&mut self, deadline: Millis) -> Option<(Millis, T)> {
        let (&(due, seq), _) = self.pending.iter().next()?;
        if due > deadline {
            return None;
        }
        let payload = self.pending.remove(&(due, seq))?;
        self.now = self.now.max(due);
        Some((due, payload))
    }

    /// Move the clock forward to `t` without firing anything.
    pub fn advance_to(&mut self, t: Millis) {
        self.now = self.now.max(t);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/timers.rs"]
mod tests;
