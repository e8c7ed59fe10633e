// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod accessibility;
pub mod key_mapping;
pub mod option_accessors;
pub mod renderer;
pub mod view_model;

// Re-export.
pub use accessibility::*;
pub use option_accessors::*;
pub use renderer::*;
pub use view_model::*;
