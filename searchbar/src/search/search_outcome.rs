// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// The message shown for any lookup failure. The underlying cause is only logged.
pub const GENERIC_LOOKUP_FAILURE_MSG: &str = "Something went wrong while searching";

/// The state of the most recent search. Exactly one of these is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<T> {
    /// No search has run, or there is no lookup.
    Idle,
    /// An async lookup is in flight.
    Loading,
    Success(Vec<T>),
    /// Carries a user facing message, never the underlying error.
    Failure(String),
}

impl<T> Default for SearchOutcome<T> {
    fn default() -> Self { Self::Idle }
}

impl<T> SearchOutcome<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool { matches!(self, Self::Loading) }

    #[must_use]
    pub fn maybe_error(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
