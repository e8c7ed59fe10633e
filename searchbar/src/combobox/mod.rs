// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod combobox_config;
pub mod combobox_effect;
pub mod combobox_event;
pub mod combobox_machine;
pub mod combobox_options;
pub mod combobox_snapshot;

// Re-export.
pub use combobox_config::*;
pub use combobox_effect::*;
pub use combobox_event::*;
pub use combobox_machine::*;
pub use combobox_options::*;
pub use combobox_snapshot::*;

// Tests.
#[cfg(test)]
mod test_combobox;
