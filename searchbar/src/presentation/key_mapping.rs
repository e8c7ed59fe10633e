// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Maps raw input onto [`SearchBarEvent`]s.
//!
//! | Input                         | Event                                   |
//! |-------------------------------|-----------------------------------------|
//! | DOM key `ArrowDown`           | `KeyDown(ArrowDown)`                    |
//! | DOM key `ArrowUp`             | `KeyDown(ArrowUp)`                      |
//! | DOM key `Enter`               | `KeyDown(Enter)`                        |
//! | DOM key `Escape` or `Esc`     | `KeyDown(Escape)`                       |
//! | crossterm `Down` / `Up`       | `KeyDown(ArrowDown)` / `KeyDown(ArrowUp)` |
//! | crossterm `Enter` / `Esc`     | `KeyDown(Enter)` / `KeyDown(Escape)`    |
//! | crossterm `Char(c)`           | `TextChanged(query + c)`                |
//! | crossterm `Backspace`         | `TextChanged(query minus last grapheme)`|
//! | crossterm `Ctrl+U`            | `TextChanged("")`                       |
//! | crossterm paste               | `TextChanged(query + pasted)`           |
//! | crossterm focus gained / lost | `Focus` / `Blur`                        |
//!
//! Anything else maps to `None`. Key releases are ignored, only presses and repeats
//! count.

use std::str::FromStr;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::{NavigationKey, SearchBarEvent};

/// Parses a DOM `KeyboardEvent.key` value. Returns `None` for keys that are not
/// navigation keys, which the caller should let through as normal typing.
#[must_use]
pub fn parse_dom_key(key: &str) -> Option<NavigationKey> { NavigationKey::from_str(key).ok() }

/// `current_query` is needed because text events carry the full new text.
#[must_use]
pub fn map_crossterm_event<T>(event: &Event, current_query: &str) -> Option<SearchBarEvent<T>> {
    match event {
        Event::Key(key_event) => map_crossterm_key(key_event, current_query),
        Event::Paste(text) => Some(SearchBarEvent::TextChanged(format!(
            "{current_query}{text}"
        ))),
        Event::FocusGained => Some(SearchBarEvent::Focus),
        Event::FocusLost => Some(SearchBarEvent::Blur),
        _ => None,
    }
}

#[must_use]
pub fn map_crossterm_key<T>(
    key_event: &KeyEvent,
    current_query: &str,
) -> Option<SearchBarEvent<T>> {
    if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    let modifiers = key_event.modifiers;
    let is_plain = modifiers.difference(KeyModifiers::SHIFT).is_empty();

    match key_event.code {
        KeyCode::Down if is_plain => Some(SearchBarEvent::KeyDown(NavigationKey::ArrowDown)),
        KeyCode::Up if is_plain => Some(SearchBarEvent::KeyDown(NavigationKey::ArrowUp)),
        KeyCode::Enter if is_plain => Some(SearchBarEvent::KeyDown(NavigationKey::Enter)),
        KeyCode::Esc => Some(SearchBarEvent::KeyDown(NavigationKey::Escape)),
        KeyCode::Char('u') if modifiers == KeyModifiers::CONTROL => {
            Some(SearchBarEvent::TextChanged(String::new()))
        }
        KeyCode::Char(character) if is_plain => Some(SearchBarEvent::TextChanged(format!(
            "{current_query}{character}"
        ))),
        KeyCode::Backspace if is_plain => {
            let mut graphemes = current_query.graphemes(true);
            graphemes.next_back();
            Some(SearchBarEvent::TextChanged(graphemes.as_str().to_string()))
        }
        _ => None,
    }
}
