// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

pub type OptionTextFn<T> = dyn Fn(&T) -> String + Send + Sync;

/// The only place where an item is turned into text. `label` is what the user reads,
/// `value` is a stable identity used for row keys.
///
/// Items are opaque, so there is no default for arbitrary `T`. For anything that is
/// `AsRef<str>` both accessors default to the string itself.
pub struct OptionAccessors<T> {
    get_option_label: Arc<OptionTextFn<T>>,
    get_option_value: Arc<OptionTextFn<T>>,
}

impl<T> OptionAccessors<T> {
    #[must_use]
    pub fn new(
        get_option_label: impl Fn(&T) -> String + Send + Sync + 'static,
        get_option_value: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            get_option_label: Arc::new(get_option_label),
            get_option_value: Arc::new(get_option_value),
        }
    }

    #[must_use]
    pub fn label(&self, item: &T) -> String { (self.get_option_label)(item) }

    #[must_use]
    pub fn value(&self, item: &T) -> String { (self.get_option_value)(item) }
}

impl<T: AsRef<str>> Default for OptionAccessors<T> {
    fn default() -> Self {
        Self::new(|it: &T| it.as_ref().to_string(), |it: &T| it.as_ref().to_string())
    }
}

impl<T> Clone for OptionAccessors<T> {
    fn clone(&self) -> Self {
        Self {
            get_option_label: self.get_option_label.clone(),
            get_option_value: self.get_option_value.clone(),
        }
    }
}

impl<T> Debug for OptionAccessors<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionAccessors").finish_non_exhaustive()
    }
}
