// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          panic::AssertUnwindSafe};

use futures_util::FutureExt;
use unicode_segmentation::UnicodeSegmentation;

use crate::{DEBUG_SEARCHBAR_MOD, GENERIC_LOOKUP_FAILURE_MSG, Invocation, Lookup,
            LookupFuture, LookupResult, SearchOutcome, SearchToken};

/// Runs the caller supplied [`Lookup`] for a query and decides which outcomes are still
/// allowed to touch state.
///
/// Every call to [`execute()`](Self::execute) that actually invokes the lookup mints a
/// new [`SearchToken`]. [`resolve()`](Self::resolve) accepts an outcome only if it
/// carries the current token, so at most one in flight lookup can ever be applied.
/// Outcomes for obsolete tokens are dropped without an error.
#[derive(Debug)]
pub struct SearchExecutor<T> {
    maybe_lookup: Option<Lookup<T>>,
    min_chars: usize,
    current_token: SearchToken,
}

/// An async lookup that the driver has to run. Feed its output back through
/// [`crate::SearchBarMachine::ingest_lookup`].
pub struct PendingLookup<T> {
    pub token: SearchToken,
    pub future: LookupFuture<T>,
}

impl<T> Debug for PendingLookup<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLookup")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl<T> PendingLookup<T> {
    /// Awaits the lookup. A panic while polling is turned into an `Err`, so the result
    /// always comes back tagged with its token.
    pub async fn run(self) -> (SearchToken, LookupResult<T>) {
        let Self { token, future } = self;
        let result = AssertUnwindSafe(future)
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(miette::miette!("async lookup panicked")));
        (token, result)
    }
}

/// What [`SearchExecutor::execute`] decided.
#[derive(Debug)]
pub struct Execution<T> {
    pub outcome: SearchOutcome<T>,
    pub maybe_pending: Option<PendingLookup<T>>,
}

impl<T> SearchExecutor<T> {
    #[must_use]
    pub fn new(maybe_lookup: Option<Lookup<T>>, min_chars: usize) -> Self {
        Self {
            maybe_lookup,
            min_chars,
            current_token: SearchToken::default(),
        }
    }

    /// Without a lookup the executor never does anything, results are injected.
    #[must_use]
    pub fn is_inert(&self) -> bool { self.maybe_lookup.is_none() }

    #[must_use]
    pub fn min_chars(&self) -> usize { self.min_chars }

    pub fn set_min_chars(&mut self, min_chars: usize) { self.min_chars = min_chars; }

    #[must_use]
    pub fn current_token(&self) -> SearchToken { self.current_token }

    /// Obsoletes whatever is in flight without invoking anything.
    pub fn invalidate(&mut self) { self.current_token = self.current_token.next(); }

    /// Length used for the minimum characters gate, in grapheme clusters.
    #[must_use]
    pub fn query_len(query: &str) -> usize { query.graphemes(true).count() }

    pub fn execute(&mut self, query: &str) -> Execution<T> {
        let Some(lookup) = self.maybe_lookup.clone() else {
            return Execution {
                outcome: SearchOutcome::Idle,
                maybe_pending: None,
            };
        };

        if query.is_empty() || Self::query_len(query) < self.min_chars {
            self.invalidate();
            DEBUG_SEARCHBAR_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "query below minimum, skipping lookup",
                    query = ?query,
                    min_chars = %self.min_chars,
                    token = %self.current_token
                );
            });
            return Execution {
                outcome: SearchOutcome::Success(vec![]),
                maybe_pending: None,
            };
        }

        self.current_token = self.current_token.next();
        let token = self.current_token;

        DEBUG_SEARCHBAR_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "invoking lookup", query = ?query, token = %token);
        });

        match lookup.invoke(query) {
            Invocation::Ready(result) => Execution {
                // The token was just minted, so this always resolves.
                outcome: self
                    .resolve(token, result)
                    .unwrap_or(SearchOutcome::Idle),
                maybe_pending: None,
            },
            Invocation::Pending(future) => Execution {
                outcome: SearchOutcome::Loading,
                maybe_pending: Some(PendingLookup { token, future }),
            },
        }
    }

    /// Returns `None` if `token` is stale, in which case nothing must change.
    pub fn resolve(
        &self,
        token: SearchToken,
        result: LookupResult<T>,
    ) -> Option<SearchOutcome<T>> {
        if token != self.current_token {
            DEBUG_SEARCHBAR_MOD.then(|| {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "discarding stale lookup result",
                    token = %token,
                    current_token = %self.current_token
                );
            });
            return None;
        }

        match result {
            Ok(response) => Some(SearchOutcome::Success(response.into_items())),
            Err(report) => {
                tracing::warn!(
                    message = "lookup failed",
                    token = %token,
                    error = %report
                );
                Some(SearchOutcome::Failure(GENERIC_LOOKUP_FAILURE_MSG.to_string()))
            }
        }
    }
}
