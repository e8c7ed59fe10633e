// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

/// Identifies one lookup invocation. Tokens are minted by
/// [`crate::SearchExecutor`] in strictly increasing order, and a lookup outcome is only
/// applied if its token is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SearchToken(u64);

impl SearchToken {
    #[must_use]
    pub fn as_u64(self) -> u64 { self.0 }

    /// The token that follows this one.
    #[must_use]
    pub fn next(self) -> Self { Self(self.0.wrapping_add(1)) }
}

impl Display for SearchToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "#{}", self.0) }
}
