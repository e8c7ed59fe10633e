// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod debounced_deadline;
pub mod debounced_value;

// Re-export.
pub use debounced_deadline::*;
pub use debounced_value::*;
