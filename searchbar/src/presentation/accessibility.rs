// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! WAI-ARIA combobox with a listbox popup. The input carries `role="combobox"` and
//! points at the listbox and the active option. Keyboard focus never leaves the input.

use crate::{SearchBarConfig, SearchBarSnapshot};

pub const ROLE_COMBOBOX: &str = "combobox";
pub const ROLE_LISTBOX: &str = "listbox";
pub const ROLE_OPTION: &str = "option";
pub const ARIA_AUTOCOMPLETE_LIST: &str = "list";

/// Element id of the option at `index`. Unique per listbox.
#[must_use]
pub fn option_id(listbox_id: &str, index: usize) -> String {
    format!("{listbox_id}-option-{index}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionAttributes {
    pub id: String,
    pub role: &'static str,
    pub aria_selected: bool,
}

/// Everything an accessible presentation needs to put on the input, the listbox, and
/// each option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessibilityAttributes {
    // Input.
    pub role: &'static str,
    pub aria_expanded: bool,
    pub maybe_aria_controls: Option<String>,
    pub aria_autocomplete: &'static str,
    pub maybe_aria_activedescendant: Option<String>,
    pub maybe_aria_label: Option<String>,
    pub placeholder: String,
    pub disabled: bool,
    // Listbox.
    pub listbox_role: &'static str,
    pub listbox_id: String,
    /// Empty unless options are actually shown.
    pub options: Vec<OptionAttributes>,
}

impl AccessibilityAttributes {
    #[must_use]
    pub fn from_snapshot<T>(snapshot: &SearchBarSnapshot<T>, config: &SearchBarConfig) -> Self {
        let listbox_id = config.listbox_id.clone();

        // Status rows (loading, error) replace the options, so nothing to point at.
        let options_visible = snapshot.is_open
            && !snapshot.is_loading
            && snapshot.error.is_none()
            && snapshot.has_results();

        let maybe_aria_controls =
            (snapshot.is_open && snapshot.has_results()).then(|| listbox_id.clone());

        let maybe_aria_activedescendant = snapshot
            .active_index
            .filter(|index| options_visible && *index < snapshot.results.len())
            .map(|index| option_id(&listbox_id, index));

        let options = if options_visible {
            (0..snapshot.results.len())
                .map(|index| OptionAttributes {
                    id: option_id(&listbox_id, index),
                    role: ROLE_OPTION,
                    aria_selected: snapshot.active_index == Some(index),
                })
                .collect()
        } else {
            vec![]
        };

        Self {
            role: ROLE_COMBOBOX,
            aria_expanded: snapshot.is_open,
            maybe_aria_controls,
            aria_autocomplete: ARIA_AUTOCOMPLETE_LIST,
            maybe_aria_activedescendant,
            maybe_aria_label: config.maybe_aria_label.clone(),
            placeholder: config.placeholder.clone(),
            disabled: snapshot.disabled,
            listbox_role: ROLE_LISTBOX,
            listbox_id,
            options,
        }
    }
}
