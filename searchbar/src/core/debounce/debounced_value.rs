// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use tokio::time::Instant;

use super::DebouncedDeadline;

/// Trailing edge debounce of a value.
///
/// [`get()`](Self::get) returns the last *emitted* value. A new input becomes the
/// emitted value only after the delay has elapsed with no further input change, which
/// is observed by calling [`fire_if_due()`](Self::fire_if_due). There is no leading
/// edge emission.
///
/// The timer depends only on `(value, delay)`:
/// - [`set()`](Self::set) with the value that is already the latest input is a no-op,
///   so unrelated re-evaluations never re-arm the timer.
/// - Setting the input back to the currently emitted value cancels the pending
///   emission, since there would be nothing new to emit.
/// - [`set_delay()`](Self::set_delay) re-arms a pending emission with the new delay.
///
/// This type knows nothing about searching, it is a pure value delay transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebouncedValue<V> {
    emitted: V,
    latest_input: V,
    timer: DebouncedDeadline,
}

impl<V: Clone + PartialEq> DebouncedValue<V> {
    #[must_use]
    pub fn new(initial: V, delay: Duration) -> Self {
        Self {
            emitted: initial.clone(),
            latest_input: initial,
            timer: DebouncedDeadline::new(delay),
        }
    }

    /// The last emitted value.
    #[must_use]
    pub fn get(&self) -> &V { &self.emitted }

    /// The most recent input, which may not have been emitted yet.
    #[must_use]
    pub fn latest_input(&self) -> &V { &self.latest_input }

    #[must_use]
    pub fn delay(&self) -> Duration { self.timer.duration() }

    /// Feed a new input. Returns `true` if the timer was (re)armed.
    pub fn set(&mut self, value: V, now: Instant) -> bool {
        if value == self.latest_input {
            return false;
        }

        self.latest_input = value;

        if self.latest_input == self.emitted {
            self.timer.clear();
            return false;
        }

        self.timer.reset(now);
        true
    }

    /// Arms the timer for the latest input even if it equals the emitted value, so the
    /// same value is emitted again once the delay elapses. Use when the consumer needs
    /// a fresh emission that the value alone would not trigger.
    pub fn rearm(&mut self, now: Instant) { self.timer.reset(now); }

    pub fn set_delay(&mut self, delay: Duration, now: Instant) {
        self.timer.set_duration(delay, now);
    }

    #[must_use]
    pub fn is_pending(&self) -> bool { self.timer.is_pending() }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> { self.timer.get() }

    /// Emits the latest input if the delay has elapsed. Single shot: a second call with
    /// no new input in between returns `None`.
    pub fn fire_if_due(&mut self, now: Instant) -> Option<V> {
        if self.timer.take_if_due(now) {
            self.emitted = self.latest_input.clone();
            Some(self.emitted.clone())
        } else {
            None
        }
    }

    /// Sleeps until the pending emission is due. Never completes if nothing is pending.
    pub async fn sleep_until(&self) { self.timer.sleep_until().await; }

    /// Drops the pending emission (if any). Used on teardown.
    pub fn cancel(&mut self) {
        self.timer.clear();
        self.latest_input = self.emitted.clone();
    }
}
