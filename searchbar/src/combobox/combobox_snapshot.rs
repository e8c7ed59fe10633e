// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// A read only copy of everything a presentation layer needs to paint the search bar.
/// `revision` changes whenever any other field changes, so consumers can skip
/// redundant renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarSnapshot<T> {
    pub query: String,
    /// The injected results if present, otherwise the last accepted lookup results.
    pub results: Vec<T>,
    pub active_index: Option<usize>,
    pub is_open: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub has_focus: bool,
    pub disabled: bool,
    pub revision: u64,
}

impl<T> Default for SearchBarSnapshot<T> {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: vec![],
            active_index: None,
            is_open: false,
            is_loading: false,
            error: None,
            has_focus: false,
            disabled: false,
            revision: 0,
        }
    }
}

impl<T> SearchBarSnapshot<T> {
    #[must_use]
    pub fn has_results(&self) -> bool { !self.results.is_empty() }

    /// The item under the keyboard cursor, if any.
    #[must_use]
    pub fn active_item(&self) -> Option<&T> {
        self.active_index.and_then(|index| self.results.get(index))
    }
}
