// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod lookup;
pub mod search_executor;
pub mod search_outcome;
pub mod search_token;

// Re-export.
pub use lookup::*;
pub use search_executor::*;
pub use search_outcome::*;
pub use search_token::*;
