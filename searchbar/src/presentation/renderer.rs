// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use crate::OptionAccessors;

pub const DEFAULT_LOADING_TEXT: &str = "Loading...";
pub const ACTIVE_OPTION_MARKER: &str = "> ";
pub const INACTIVE_OPTION_MARKER: &str = "  ";

/// Per option render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionRenderState {
    pub is_active: bool,
    pub index: usize,
}

/// The render capability a presentation layer plugs in. `Output` is whatever that layer
/// paints with: a `String`, styled text, a widget tree, etc.
pub trait SearchBarRenderer<T> {
    type Output;

    fn render_option(&self, item: &T, state: OptionRenderState) -> Self::Output;

    fn render_empty(&self, query: &str) -> Self::Output;

    fn render_loading(&self) -> Self::Output;

    fn render_error(&self, message: &str) -> Self::Output;
}

pub type RenderOptionFn<T> = dyn Fn(&T, OptionRenderState) -> String + Send + Sync;
pub type RenderEmptyFn = dyn Fn(&str) -> String + Send + Sync;
pub type RenderLoadingFn = dyn Fn() -> String + Send + Sync;

/// Plain text renderer with sensible defaults, each of which can be overridden.
///
/// | Row     | Default                                   |
/// |---------|-------------------------------------------|
/// | option  | label, prefixed with `"> "` when active   |
/// | empty   | `No results for "<query>"`                |
/// | loading | `"Loading..."`                            |
/// | error   | the message as is                         |
pub struct TextRenderer<T> {
    accessors: OptionAccessors<T>,
    maybe_render_option: Option<Arc<RenderOptionFn<T>>>,
    maybe_render_empty: Option<Arc<RenderEmptyFn>>,
    maybe_render_loading: Option<Arc<RenderLoadingFn>>,
}

impl<T> Debug for TextRenderer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("maybe_render_option", &self.maybe_render_option.is_some())
            .field("maybe_render_empty", &self.maybe_render_empty.is_some())
            .field("maybe_render_loading", &self.maybe_render_loading.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: AsRef<str>> Default for TextRenderer<T> {
    fn default() -> Self { Self::new(OptionAccessors::default()) }
}

impl<T> TextRenderer<T> {
    #[must_use]
    pub fn new(accessors: OptionAccessors<T>) -> Self {
        Self {
            accessors,
            maybe_render_option: None,
            maybe_render_empty: None,
            maybe_render_loading: None,
        }
    }

    #[must_use]
    pub fn accessors(&self) -> &OptionAccessors<T> { &self.accessors }

    #[must_use]
    pub fn render_option_with(
        mut self,
        render_option: impl Fn(&T, OptionRenderState) -> String + Send + Sync + 'static,
    ) -> Self {
        self.maybe_render_option = Some(Arc::new(render_option));
        self
    }

    #[must_use]
    pub fn render_empty_with(
        mut self,
        render_empty: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.maybe_render_empty = Some(Arc::new(render_empty));
        self
    }

    #[must_use]
    pub fn render_loading_with(
        mut self,
        render_loading: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.maybe_render_loading = Some(Arc::new(render_loading));
        self
    }
}

impl<T> SearchBarRenderer<T> for TextRenderer<T> {
    type Output = String;

    fn render_option(&self, item: &T, state: OptionRenderState) -> String {
        if let Some(render_option) = &self.maybe_render_option {
            return render_option(item, state);
        }
        let marker = if state.is_active {
            ACTIVE_OPTION_MARKER
        } else {
            INACTIVE_OPTION_MARKER
        };
        format!("{marker}{}", self.accessors.label(item))
    }

    fn render_empty(&self, query: &str) -> String {
        match &self.maybe_render_empty {
            Some(render_empty) => render_empty(query),
            None => format!("No results for \"{query}\""),
        }
    }

    fn render_loading(&self) -> String {
        match &self.maybe_render_loading {
            Some(render_loading) => render_loading(),
            None => DEFAULT_LOADING_TEXT.to_string(),
        }
    }

    fn render_error(&self, message: &str) -> String { message.to_string() }
}
