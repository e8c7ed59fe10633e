// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

/// Type alias to make it easy to work with [`miette::Result`] and [`miette::Report`].
///
/// - It is basically `miette::Result<T, miette::Report>`.
/// - Works hand in hand w/ [`SearchBarError`] and any other type of error, including the
///   errors returned by a caller supplied [`crate::Lookup`].
pub type CommonResult<T> = miette::Result<T>;

/// Errors that the search bar itself can produce.
///
/// Note that a failing [`crate::Lookup`] is *not* one of these. Lookup failures are
/// caught at the [`crate::SearchExecutor`] boundary and turned into
/// [`crate::SearchOutcome::Failure`], which is state, not an error.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SearchBarError {
    /// An event was sent to a [`crate::SearchBar`] whose event loop has already exited.
    #[error("the search bar event loop is not running")]
    #[diagnostic(
        code(r3bl_searchbar::disposed),
        help("create a new search bar with `SearchBar::spawn()`")
    )]
    Disposed,

    /// The [`crate::SearchBarConfig`] can't be used as is.
    #[error("invalid search bar configuration: {reason}")]
    #[diagnostic(code(r3bl_searchbar::invalid_config))]
    InvalidConfig { reason: String },

    /// The tracing subscriber could not be installed.
    #[error("unable to set up logging: {reason}")]
    #[diagnostic(code(r3bl_searchbar::logging))]
    Logging { reason: String },
}

impl SearchBarError {
    /// Convenience to build [`SearchBarError::InvalidConfig`] wrapped in a
    /// [`CommonResult`].
    ///
    /// # Errors
    ///
    /// Always returns an error, this is the point.
    pub fn new_invalid_config_result<T>(reason: impl Into<String>) -> CommonResult<T> {
        Err(SearchBarError::InvalidConfig {
            reason: reason.into(),
        }
        .into())
    }
}
