// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};

use crate::{CommonResult, SearchBarError};

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_MIN_CHARS: usize = 2;
pub const DEFAULT_BLUR_GRACE_MS: u64 = 100;
pub const DEFAULT_LISTBOX_ID: &str = "searchbar-listbox";
pub const DEFAULT_PLACEHOLDER: &str = "Search...";

/// The plain data part of the search bar options. Every field has a default, so a
/// partial JSON document (or `{}`) is a valid config.
///
/// ```
/// use r3bl_searchbar::SearchBarConfig;
///
/// let config = SearchBarConfig::try_from_json_str(r#"{ "min_chars": 3 }"#).unwrap();
/// assert_eq!(config.min_chars, 3);
/// assert_eq!(config.debounce_ms, 300);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBarConfig {
    /// Quiet period before a typed query is searched.
    pub debounce_ms: u64,
    /// Queries shorter than this (in grapheme clusters) never reach the lookup.
    pub min_chars: usize,
    /// How long the list stays open after the input loses focus, so that a pointer
    /// press on an option still lands.
    pub blur_grace_ms: u64,
    pub disabled: bool,
    /// DOM id of the listbox. Option ids are derived from it.
    pub listbox_id: String,
    pub placeholder: String,
    #[serde(rename = "aria_label")]
    pub maybe_aria_label: Option<String>,
}

mod search_bar_config_impl {
    use super::*;

    impl Default for SearchBarConfig {
        fn default() -> Self {
            Self {
                debounce_ms: DEFAULT_DEBOUNCE_MS,
                min_chars: DEFAULT_MIN_CHARS,
                blur_grace_ms: DEFAULT_BLUR_GRACE_MS,
                disabled: false,
                listbox_id: DEFAULT_LISTBOX_ID.to_string(),
                placeholder: DEFAULT_PLACEHOLDER.to_string(),
                maybe_aria_label: None,
            }
        }
    }

    impl SearchBarConfig {
        #[must_use]
        pub fn debounce_delay(&self) -> Duration { Duration::from_millis(self.debounce_ms) }

        #[must_use]
        pub fn blur_grace_delay(&self) -> Duration {
            Duration::from_millis(self.blur_grace_ms)
        }

        /// # Errors
        ///
        /// Returns [`SearchBarError::InvalidConfig`] if the listbox id is empty or
        /// contains whitespace, since it has to work as an element id.
        pub fn validate(&self) -> CommonResult<()> {
            if self.listbox_id.is_empty() {
                return SearchBarError::new_invalid_config_result("listbox_id is empty");
            }
            if self.listbox_id.chars().any(char::is_whitespace) {
                return SearchBarError::new_invalid_config_result(format!(
                    "listbox_id {:?} contains whitespace",
                    self.listbox_id
                ));
            }
            Ok(())
        }

        /// Parses and validates a JSON config.
        ///
        /// # Errors
        ///
        /// Returns an error if the JSON is malformed or [`Self::validate`] fails.
        pub fn try_from_json_str(json: &str) -> CommonResult<Self> {
            let config: Self = serde_json::from_str(json).into_diagnostic()?;
            config.validate()?;
            Ok(config)
        }
    }
}
