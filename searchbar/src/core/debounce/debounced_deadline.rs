// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! An owned, cancellable "do X after Y ms of no activity" timer.

use std::time::Duration;

use tokio::time::Instant;

/// An owned, cancellable deadline for the "do X after Y ms of no activity" pattern.
///
/// The search bar uses two of these per widget instance: one inside
/// [`crate::DebouncedValue`] for the query, and one for the blur grace period. Both
/// are plain fields of the owner, so dropping or [`clear()`](Self::clear)ing the owner
/// cancels them. There are no ambient timers that could fire after teardown.
///
/// Every method that needs the current time takes it as an argument. This keeps the
/// state machine deterministic in tests, and the async driver simply passes in
/// [`Instant::now()`].
///
/// # Integration with `tokio::select!`
///
/// ```rust
/// use std::time::Duration;
/// use r3bl_searchbar::DebouncedDeadline;
/// use tokio::time::Instant;
///
/// # async fn example(mut events: tokio::sync::mpsc::Receiver<String>) {
/// let mut deadline = DebouncedDeadline::new(Duration::from_millis(100));
/// loop {
///     tokio::select! {
///         maybe_event = events.recv() => {
///             if maybe_event.is_none() { break; }
///             deadline.reset(Instant::now());
///         }
///         () = deadline.sleep_until(), if deadline.is_pending() => {
///             if deadline.take_if_due(Instant::now()) {
///                 println!("quiet for 100ms");
///             }
///         }
///     }
/// }
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebouncedDeadline {
    /// `None` means nothing is scheduled.
    deadline: Option<Instant>,
    duration: Duration,
}

impl DebouncedDeadline {
    /// The deadline starts out not pending. Call [`reset()`](Self::reset) to arm it.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            deadline: None,
            duration,
        }
    }

    #[must_use]
    pub fn duration(&self) -> Duration { self.duration }

    /// Changes the window. A pending deadline is re-armed from `now` with the new
    /// duration, an idle one stays idle.
    pub fn set_duration(&mut self, duration: Duration, now: Instant) {
        if duration == self.duration {
            return;
        }
        self.duration = duration;
        if self.deadline.is_some() {
            self.reset(now);
        }
    }

    /// Arms (or re-arms) the deadline to `now + duration`.
    pub fn reset(&mut self, now: Instant) { self.deadline = Some(now + self.duration); }

    /// Cancels the deadline.
    pub fn clear(&mut self) { self.deadline = None; }

    #[must_use]
    pub fn is_pending(&self) -> bool { self.deadline.is_some() }

    #[must_use]
    pub fn get(&self) -> Option<Instant> { self.deadline }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    /// Single shot: returns `true` exactly once when the deadline has passed, and clears
    /// it in the same step.
    pub fn take_if_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Sleeps until the deadline. If nothing is scheduled, this future never completes,
    /// which makes it safe to use as an unconditional `tokio::select!` branch.
    pub async fn sleep_until(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}
