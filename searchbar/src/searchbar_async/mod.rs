// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod event_loop;
pub mod searchbar_api;

// Re-export.
pub use event_loop::*;
pub use searchbar_api::*;
