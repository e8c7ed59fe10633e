// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{AsRefStr, Display, EnumString};

/// Keys that drive list navigation. They bypass the debounce and go straight into the
/// state machine.
///
/// Parses DOM `KeyboardEvent.key` names, including the legacy `"Esc"`:
///
/// ```
/// use std::str::FromStr;
/// use r3bl_searchbar::NavigationKey;
///
/// assert_eq!(NavigationKey::from_str("ArrowDown").unwrap(), NavigationKey::ArrowDown);
/// assert_eq!(NavigationKey::from_str("Esc").unwrap(), NavigationKey::Escape);
/// assert_eq!(NavigationKey::Escape.to_string(), "Escape");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum NavigationKey {
    ArrowDown,
    ArrowUp,
    Enter,
    #[strum(to_string = "Escape", serialize = "Esc")]
    Escape,
}

/// Who owns the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// The caller owns the value. Typing only emits
    /// [`crate::SearchBarEffect::QueryChanged`], and the caller pushes the new value
    /// back with [`SearchBarEvent::SetValue`].
    Controlled,
    /// The state machine owns the value.
    Uncontrolled,
}

/// Everything that can happen to a search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBarEvent<T> {
    /// The user edited the input. Carries the full new text.
    TextChanged(String),
    /// The caller pushed a new query value (controlled mode).
    SetValue(String),
    KeyDown(NavigationKey),
    Focus,
    Blur,
    /// A pointer press on the option at this index, in the order last rendered.
    OptionPointerDown(usize),
    /// Replace (or with `None`, remove) the injected result list.
    SetResults(Option<Vec<T>>),
    SetDisabled(bool),
}

impl<T> SearchBarEvent<T> {
    /// Events that a disabled search bar ignores.
    #[must_use]
    pub fn is_interaction(&self) -> bool {
        matches!(
            self,
            SearchBarEvent::TextChanged(_)
                | SearchBarEvent::KeyDown(_)
                | SearchBarEvent::Focus
                | SearchBarEvent::Blur
                | SearchBarEvent::OptionPointerDown(_)
        )
    }
}
