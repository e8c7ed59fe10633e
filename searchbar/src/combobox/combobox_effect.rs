// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::SmallVec;

use crate::PendingLookup;

/// Something the owner of a [`crate::SearchBarMachine`] has to do after a transition.
#[derive(Debug)]
pub enum SearchBarEffect<T> {
    /// Call `on_select` with this item. The item was cloned out of the result set when
    /// the triggering event was processed.
    Select(T),
    /// Call `on_change` with the new text.
    QueryChanged(String),
    /// Run this lookup and feed the output to
    /// [`crate::SearchBarMachine::ingest_lookup`].
    SpawnLookup(PendingLookup<T>),
}

/// Most transitions produce zero or one effect, rarely two.
pub type SearchBarEffects<T> = SmallVec<[SearchBarEffect<T>; 2]>;
