// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{OptionAccessors, OptionRenderState, SearchBarRenderer, SearchBarSnapshot,
            option_id};

/// One row of the open list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBarRow<O> {
    Loading(O),
    Error(O),
    Empty(O),
    Item {
        /// Stable identity from [`OptionAccessors::value`].
        key: String,
        /// Element id, the target of `aria-activedescendant`.
        id: String,
        index: usize,
        is_active: bool,
        output: O,
    },
}

/// What to paint below the input. `maybe_rows` is `None` when the list is closed.
///
/// Exactly one kind of content is shown while open, in this priority order: loading,
/// error, options, empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarView<O> {
    pub maybe_rows: Option<Vec<SearchBarRow<O>>>,
}

impl<O> SearchBarView<O> {
    #[must_use]
    pub fn from_snapshot<T, R>(
        snapshot: &SearchBarSnapshot<T>,
        renderer: &R,
        accessors: &OptionAccessors<T>,
        listbox_id: &str,
    ) -> Self
    where
        R: SearchBarRenderer<T, Output = O>,
    {
        if !snapshot.is_open {
            return Self { maybe_rows: None };
        }

        let rows = if snapshot.is_loading {
            vec![SearchBarRow::Loading(renderer.render_loading())]
        } else if let Some(message) = &snapshot.error {
            vec![SearchBarRow::Error(renderer.render_error(message))]
        } else if snapshot.has_results() {
            snapshot
                .results
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let is_active = snapshot.active_index == Some(index);
                    SearchBarRow::Item {
                        key: accessors.value(item),
                        id: option_id(listbox_id, index),
                        index,
                        is_active,
                        output: renderer
                            .render_option(item, OptionRenderState { is_active, index }),
                    }
                })
                .collect()
        } else {
            vec![SearchBarRow::Empty(renderer.render_empty(&snapshot.query))]
        };

        Self {
            maybe_rows: Some(rows),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool { self.maybe_rows.is_some() }
}
