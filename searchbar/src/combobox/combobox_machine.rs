// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use smallvec::smallvec;
use tokio::time::Instant;

use crate::{CommonResult, DEBUG_SEARCHBAR_MOD, DebouncedDeadline, DebouncedValue,
            Execution, LookupResult, NavigationKey, QueryMode, SearchBarEffect,
            SearchBarEffects, SearchBarEvent, SearchBarOptions, SearchBarSnapshot,
            SearchExecutor, SearchOutcome, SearchToken};

/// The combobox interaction state machine.
///
/// It reconciles typed text, debounced queries, lookup outcomes, and keyboard, pointer,
/// focus, and blur events into one consistent state. It does no IO and never reads the
/// clock: every operation that depends on time takes `now`, and timers are plain
/// deadlines that the owner sleeps on (see [`next_deadline()`](Self::next_deadline))
/// and then reports back with [`fire_due_timers()`](Self::fire_due_timers).
///
/// Side effects the owner must carry out (callbacks, spawning a lookup) are returned as
/// [`SearchBarEffects`] instead of being performed here.
///
/// Invariants:
/// - `active_index` is `None` or a valid index into [`results()`](Self::results).
/// - Only the outcome of the most recently started lookup can change the results.
/// - After [`dispose()`](Self::dispose) nothing changes state any more.
#[derive(Debug)]
pub struct SearchBarMachine<T> {
    mode: QueryMode,
    query: String,
    debounced_query: DebouncedValue<String>,
    executor: SearchExecutor<T>,
    fetched_results: Vec<T>,
    maybe_injected_results: Option<Vec<T>>,
    /// Bumped whenever either result list is replaced.
    results_epoch: u64,
    active_index: Option<usize>,
    is_open: bool,
    is_loading: bool,
    maybe_error: Option<String>,
    /// Set by a failed search, cleared by the next one.
    last_search_failed: bool,
    has_focus: bool,
    disabled: bool,
    blur_timer: DebouncedDeadline,
    is_disposed: bool,
    revision: u64,
}

/// The parts of the state that a [`SearchBarSnapshot`] exposes, minus the items
/// themselves which are tracked by `results_epoch`.
#[derive(Debug, PartialEq, Eq)]
struct Observed {
    query: String,
    results_epoch: u64,
    active_index: Option<usize>,
    is_open: bool,
    is_loading: bool,
    maybe_error: Option<String>,
    has_focus: bool,
    disabled: bool,
}

impl<T: Clone> SearchBarMachine<T> {
    /// # Errors
    ///
    /// Returns [`crate::SearchBarError::InvalidConfig`] if the config does not validate.
    pub fn new(options: &SearchBarOptions<T>) -> CommonResult<Self> {
        options.config.validate()?;

        let query = options.starting_query().to_string();

        Ok(Self {
            mode: options.query_mode(),
            debounced_query: DebouncedValue::new(
                query.clone(),
                options.config.debounce_delay(),
            ),
            query,
            executor: SearchExecutor::new(
                options.maybe_lookup.clone(),
                options.config.min_chars,
            ),
            fetched_results: vec![],
            maybe_injected_results: options.maybe_results.clone(),
            results_epoch: 0,
            active_index: None,
            is_open: false,
            is_loading: false,
            maybe_error: None,
            last_search_failed: false,
            has_focus: false,
            disabled: options.config.disabled,
            blur_timer: DebouncedDeadline::new(options.config.blur_grace_delay()),
            is_disposed: false,
            revision: 0,
        })
    }

    /// Runs the search for the starting query right away, without waiting for the
    /// debounce. Call once after construction.
    pub fn mount(&mut self) -> SearchBarEffects<T> {
        if self.is_disposed {
            return smallvec![];
        }
        let before = self.observed();
        let query = self.debounced_query.get().clone();
        let effects = self.run_search(&query);
        self.bump_revision_if_changed(&before);
        effects
    }

    /// Applies one event. This is the only entry point for user interaction.
    pub fn apply(&mut self, event: SearchBarEvent<T>, now: Instant) -> SearchBarEffects<T> {
        if self.is_disposed {
            DEBUG_SEARCHBAR_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "event ignored, machine disposed");
            });
            return smallvec![];
        }

        if self.disabled && event.is_interaction() {
            DEBUG_SEARCHBAR_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "event ignored, search bar disabled");
            });
            return smallvec![];
        }

        let before = self.observed();
        let mut effects: SearchBarEffects<T> = smallvec![];

        match event {
            SearchBarEvent::TextChanged(text) => {
                effects.push(SearchBarEffect::QueryChanged(text.clone()));
                if self.mode == QueryMode::Uncontrolled {
                    self.query = text;
                }
                self.is_open = true;
                self.maybe_error = None;
                self.debounced_query.set(self.query.clone(), now);
                // After a failure the emitted query has no usable results, so typing
                // back to it must search again.
                if self.last_search_failed && !self.debounced_query.is_pending() {
                    self.debounced_query.rearm(now);
                }
            }

            SearchBarEvent::SetValue(text) => {
                self.query = text;
                self.debounced_query.set(self.query.clone(), now);
            }

            SearchBarEvent::KeyDown(key) => {
                if let Some(effect) = self.handle_key_down(key) {
                    effects.push(effect);
                }
            }

            SearchBarEvent::Focus => {
                self.has_focus = true;
                self.blur_timer.clear();
                if !self.results().is_empty() {
                    self.is_open = true;
                }
            }

            SearchBarEvent::Blur => {
                // The list stays open for the grace period, but the keyboard cursor
                // goes away with focus. Pointer selection carries its own index.
                self.has_focus = false;
                self.active_index = None;
                self.blur_timer.reset(now);
            }

            SearchBarEvent::OptionPointerDown(index) => {
                if let Some(effect) = self.select_at(index) {
                    effects.push(effect);
                } else {
                    DEBUG_SEARCHBAR_MOD.then(|| {
                        // % is Display, ? is Debug.
                        tracing::debug!(
                            message = "pointer down ignored",
                            index = %index,
                            is_open = %self.is_open,
                            results_len = %self.results().len()
                        );
                    });
                }
            }

            SearchBarEvent::SetResults(maybe_results) => {
                self.maybe_injected_results = maybe_results;
                self.results_epoch += 1;
                self.active_index = None;
            }

            SearchBarEvent::SetDisabled(disabled) => {
                self.disabled = disabled;
                if disabled {
                    self.close();
                    self.blur_timer.clear();
                }
            }
        }

        self.bump_revision_if_changed(&before);
        effects
    }

    /// Fires whichever timers are due at `now`: the blur grace close and the debounced
    /// query (which starts a search).
    pub fn fire_due_timers(&mut self, now: Instant) -> SearchBarEffects<T> {
        if self.is_disposed {
            return smallvec![];
        }

        let before = self.observed();
        let mut effects: SearchBarEffects<T> = smallvec![];

        if self.blur_timer.take_if_due(now) {
            DEBUG_SEARCHBAR_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "blur grace elapsed, closing");
            });
            self.close();
        }

        if let Some(query) = self.debounced_query.fire_if_due(now) {
            effects.extend(self.run_search(&query));
        }

        self.bump_revision_if_changed(&before);
        effects
    }

    /// Feeds the output of a [`crate::PendingLookup`] back in. Returns `false` if it was
    /// discarded because a newer search superseded it (or the machine is disposed).
    pub fn ingest_lookup(&mut self, token: SearchToken, result: LookupResult<T>) -> bool {
        if self.is_disposed {
            return false;
        }

        let Some(outcome) = self.executor.resolve(token, result) else {
            return false;
        };

        let before = self.observed();
        self.apply_outcome(outcome);
        self.bump_revision_if_changed(&before);
        true
    }

    /// The earliest pending timer, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.debounced_query.deadline(), self.blur_timer.get()) {
            (Some(lhs), Some(rhs)) => Some(lhs.min(rhs)),
            (lhs, rhs) => lhs.or(rhs),
        }
    }

    /// Cancels both timers and obsoletes any in flight lookup. Terminal.
    pub fn dispose(&mut self) {
        self.debounced_query.cancel();
        self.blur_timer.clear();
        self.executor.invalidate();
        self.is_disposed = true;
        DEBUG_SEARCHBAR_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "machine disposed", revision = %self.revision);
        });
    }

    /// Changes the debounce window. A pending query is re-armed with the new delay.
    pub fn set_debounce_delay(&mut self, delay: Duration, now: Instant) {
        self.debounced_query.set_delay(delay, now);
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchBarSnapshot<T> {
        SearchBarSnapshot {
            query: self.query.clone(),
            results: self.results().to_vec(),
            active_index: self.active_index,
            is_open: self.is_open,
            is_loading: self.is_loading,
            error: self.maybe_error.clone(),
            has_focus: self.has_focus,
            disabled: self.disabled,
            revision: self.revision,
        }
    }

    /// Injected results win over fetched ones.
    #[must_use]
    pub fn results(&self) -> &[T] {
        self.maybe_injected_results
            .as_deref()
            .unwrap_or(&self.fetched_results)
    }

    #[must_use]
    pub fn query(&self) -> &str { &self.query }

    #[must_use]
    pub fn mode(&self) -> QueryMode { self.mode }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> { self.active_index }

    #[must_use]
    pub fn is_open(&self) -> bool { self.is_open }

    #[must_use]
    pub fn is_disposed(&self) -> bool { self.is_disposed }

    #[must_use]
    pub fn revision(&self) -> u64 { self.revision }
}

mod helpers {
    use super::*;

    impl<T: Clone> SearchBarMachine<T> {
        pub(super) fn observed(&self) -> Observed {
            Observed {
                query: self.query.clone(),
                results_epoch: self.results_epoch,
                active_index: self.active_index,
                is_open: self.is_open,
                is_loading: self.is_loading,
                maybe_error: self.maybe_error.clone(),
                has_focus: self.has_focus,
                disabled: self.disabled,
            }
        }

        pub(super) fn bump_revision_if_changed(&mut self, before: &Observed) {
            if self.observed() != *before {
                self.revision += 1;
            }
        }

        pub(super) fn close(&mut self) {
            self.is_open = false;
            self.active_index = None;
        }

        /// Navigation only works on an open, non empty list. Escape always works.
        pub(super) fn handle_key_down(
            &mut self,
            key: NavigationKey,
        ) -> Option<SearchBarEffect<T>> {
            let len = self.results().len();

            if !self.is_open || len == 0 {
                if key == NavigationKey::Escape {
                    self.close();
                }
                return None;
            }

            match key {
                NavigationKey::ArrowDown => {
                    self.active_index = Some(match self.active_index {
                        None => 0,
                        Some(index) => (index + 1).min(len - 1),
                    });
                    None
                }
                NavigationKey::ArrowUp => {
                    self.active_index = Some(match self.active_index {
                        None => len - 1,
                        Some(index) => index.saturating_sub(1).min(len - 1),
                    });
                    None
                }
                NavigationKey::Enter => {
                    let index = self.active_index?;
                    self.select_at(index)
                }
                NavigationKey::Escape => {
                    self.close();
                    None
                }
            }
        }

        /// Clones the item out of the current results and closes. Ignored (returns
        /// `None`) if the list is closed or the index is out of range.
        pub(super) fn select_at(&mut self, index: usize) -> Option<SearchBarEffect<T>> {
            if !self.is_open {
                return None;
            }
            let item = self.results().get(index)?.clone();

            DEBUG_SEARCHBAR_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(message = "option selected", index = %index);
            });

            self.close();
            Some(SearchBarEffect::Select(item))
        }

        pub(super) fn run_search(&mut self, query: &str) -> SearchBarEffects<T> {
            let Execution {
                outcome,
                maybe_pending,
            } = self.executor.execute(query);
            self.last_search_failed = false;

            self.apply_outcome(outcome);

            match maybe_pending {
                Some(pending) => smallvec![SearchBarEffect::SpawnLookup(pending)],
                None => smallvec![],
            }
        }

        pub(super) fn apply_outcome(&mut self, outcome: SearchOutcome<T>) {
            match outcome {
                SearchOutcome::Idle => {}

                SearchOutcome::Loading => {
                    self.is_loading = true;
                    self.maybe_error = None;
                }

                SearchOutcome::Success(items) => {
                    self.is_loading = false;
                    self.maybe_error = None;
                    self.active_index = None;
                    if items.is_empty() {
                        if !self.fetched_results.is_empty() {
                            self.fetched_results.clear();
                            self.results_epoch += 1;
                        }
                    } else {
                        self.fetched_results = items;
                        self.results_epoch += 1;
                        if !self.disabled {
                            self.is_open = true;
                        }
                    }
                }

                SearchOutcome::Failure(message) => {
                    self.last_search_failed = true;
                    self.is_loading = false;
                    self.maybe_error = Some(message);
                    self.active_index = None;
                    if !self.fetched_results.is_empty() {
                        self.fetched_results.clear();
                        self.results_epoch += 1;
                    }
                }
            }
        }
    }
}
