// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use crate::{Lookup, QueryMode, SearchBarConfig};

pub type OnSelectFn<T> = dyn Fn(&T) + Send + Sync;

pub type OnChangeFn = dyn Fn(&str) + Send + Sync;

/// Builder for everything needed to create a [`crate::SearchBarMachine`] or spawn a
/// [`crate::SearchBar`].
///
/// - Passing [`value()`](Self::value) makes the query *controlled*. Otherwise the
///   query is owned internally and starts at [`initial_value()`](Self::initial_value).
/// - Without a [`lookup()`](Self::lookup) the result list is whatever is injected via
///   [`results()`](Self::results) or [`crate::SearchBarEvent::SetResults`].
pub struct SearchBarOptions<T> {
    pub config: SearchBarConfig,
    pub maybe_value: Option<String>,
    pub initial_value: String,
    pub maybe_lookup: Option<Lookup<T>>,
    pub maybe_results: Option<Vec<T>>,
    pub maybe_on_select: Option<Arc<OnSelectFn<T>>>,
    pub maybe_on_change: Option<Arc<OnChangeFn>>,
}

impl<T> Debug for SearchBarOptions<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchBarOptions")
            .field("config", &self.config)
            .field("maybe_value", &self.maybe_value)
            .field("initial_value", &self.initial_value)
            .field("maybe_lookup", &self.maybe_lookup)
            .field(
                "maybe_results",
                &self.maybe_results.as_ref().map(std::vec::Vec::len),
            )
            .field("maybe_on_select", &self.maybe_on_select.is_some())
            .field("maybe_on_change", &self.maybe_on_change.is_some())
            .finish()
    }
}

impl<T> Default for SearchBarOptions<T> {
    fn default() -> Self {
        Self {
            config: SearchBarConfig::default(),
            maybe_value: None,
            initial_value: String::new(),
            maybe_lookup: None,
            maybe_results: None,
            maybe_on_select: None,
            maybe_on_change: None,
        }
    }
}

impl<T> SearchBarOptions<T> {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn query_mode(&self) -> QueryMode {
        if self.maybe_value.is_some() {
            QueryMode::Controlled
        } else {
            QueryMode::Uncontrolled
        }
    }

    /// The query the search bar starts out with, in either mode.
    #[must_use]
    pub fn starting_query(&self) -> &str {
        self.maybe_value.as_deref().unwrap_or(&self.initial_value)
    }

    #[must_use]
    pub fn config(mut self, config: SearchBarConfig) -> Self {
        self.config = config;
        self
    }

    /// Makes the query controlled, starting at `value`.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.maybe_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn initial_value(mut self, initial_value: impl Into<String>) -> Self {
        self.initial_value = initial_value.into();
        self
    }

    #[must_use]
    pub fn lookup(mut self, lookup: Lookup<T>) -> Self {
        self.maybe_lookup = Some(lookup);
        self
    }

    #[must_use]
    pub fn results(mut self, results: Vec<T>) -> Self {
        self.maybe_results = Some(results);
        self
    }

    #[must_use]
    pub fn on_select(mut self, on_select: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.maybe_on_select = Some(Arc::new(on_select));
        self
    }

    #[must_use]
    pub fn on_change(mut self, on_change: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.maybe_on_change = Some(Arc::new(on_change));
        self
    }

    #[must_use]
    pub fn debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.config.debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub fn min_chars(mut self, min_chars: usize) -> Self {
        self.config.min_chars = min_chars;
        self
    }

    #[must_use]
    pub fn blur_grace_ms(mut self, blur_grace_ms: u64) -> Self {
        self.config.blur_grace_ms = blur_grace_ms;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn aria_label(mut self, aria_label: impl Into<String>) -> Self {
        self.config.maybe_aria_label = Some(aria_label.into());
        self
    }

    #[must_use]
    pub fn listbox_id(mut self, listbox_id: impl Into<String>) -> Self {
        self.config.listbox_id = listbox_id.into();
        self
    }
}
