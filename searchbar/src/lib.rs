// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # R3BL search bar
//!
//! A headless search input (combobox) with an async candidate list. The crate owns the
//! interaction logic only: debounced querying, stale response guards, keyboard and
//! pointer navigation, open / close rules, and the accessibility attributes that go
//! with them. Painting the input and the option list is left to whatever presentation
//! layer you plug in (a TUI, a web view, a GUI toolkit).
//!
//! # Architecture
//!
//! From the leaves up:
//!
//! 1. [`DebouncedValue`] delays a rapidly changing value until it stabilizes for a
//!    fixed window (trailing edge only). The timer is an owned, cancellable
//!    [`DebouncedDeadline`], not an ambient global.
//! 2. [`SearchExecutor`] runs a caller supplied [`Lookup`] (sync or async) for a query.
//!    Every invocation mints a [`SearchToken`], and only the outcome carrying the
//!    current token is allowed to touch state. Everything else is discarded silently.
//! 3. [`SearchBarMachine`] is the combobox state machine. It reconciles keystrokes,
//!    debounced queries, lookup outcomes, and focus / blur / pointer events into one
//!    [`SearchBarSnapshot`]. It is pure and takes the current [`Instant`] as an
//!    argument, so it is testable without a runtime.
//! 4. [`SearchBar`] is the async driver. It spawns one tokio task per widget, which
//!    owns the machine, sleeps on its timers, runs lookups, and publishes snapshots on
//!    a [`tokio::sync::watch`] channel.
//! 5. The presentation contract: [`SearchBarRenderer`] (render capability trait),
//!    [`TextRenderer`] (defaults with overrides), [`SearchBarView`] (rows to paint),
//!    [`AccessibilityAttributes`] (ARIA combobox / listbox), and the key mapping table
//!    in [`key_mapping`] (DOM key names and [`crossterm`] events).
//!
//! # Life of a keystroke
//!
//! ```text
//! TextChanged ─► machine: query = text, is_open = true
//!                  │
//!                  └─► DebouncedValue::set() ─(delay, no new input)─► fire
//!                                                                      │
//!              SearchExecutor::execute() ◄─────────────────────────────┘
//!                  │ mint token, Loading
//!                  └─► lookup task ─► ingest_lookup(token, result)
//!                                        │ token current? apply : discard
//!                                        └─► new SearchBarSnapshot ─► presentation
//! ```
//!
//! Navigation keys skip the debounce and go straight into the machine.
//!
//! # Example
//!
//! ```no_run
//! use r3bl_searchbar::{Lookup, NavigationKey, SearchBar, SearchBarOptions};
//!
//! # async fn example() -> miette::Result<()> {
//! let names = vec!["Ann".to_string(), "Bob".to_string(), "Cy".to_string()];
//! let options = SearchBarOptions::new()
//!     .min_chars(1)
//!     .lookup(Lookup::from_sync(move |query: &str| {
//!         Ok(names
//!             .iter()
//!             .filter(|it| it.to_lowercase().contains(&query.to_lowercase()))
//!             .cloned()
//!             .collect::<Vec<_>>())
//!     }))
//!     .on_select(|name: &String| println!("picked {name}"));
//!
//! let mut search_bar = SearchBar::spawn(options)?;
//! search_bar.focus()?;
//! search_bar.text_changed("b")?;
//! search_bar.key_down(NavigationKey::ArrowDown)?;
//! search_bar.key_down(NavigationKey::Enter)?;
//! search_bar.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Instant`]: tokio::time::Instant

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

/// Module scoped `DEBUG` const. If set to `true`, the state machine and the async
/// driver emit `tracing::debug!` events at every decision point. Nothing is printed
/// unless a subscriber is installed, see [`try_initialize_logging_global`].
pub const DEBUG_SEARCHBAR_MOD: bool = true;

// Attach modules (re-exported below to provide clean public API).
pub mod combobox;
pub mod core;
pub mod presentation;
pub mod search;
pub mod searchbar_async;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use combobox::*;
pub use crate::core::*;
pub use presentation::*;
pub use search::*;
pub use searchbar_async::*;
