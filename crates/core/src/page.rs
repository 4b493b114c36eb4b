//! Paging window for result materialization.

use serde::{Deserialize, Serialize};

/// An offset + limit window controlling which result rows are materialized.
///
/// The default window is [`PageBounds::UNBOUNDED`]: offset zero, no row
/// limit. The window is applied by the session, not by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBounds {
    offset: u64,
    limit: u64,
}

impl PageBounds {
    /// Every row, from the first.
    pub const UNBOUNDED: PageBounds = PageBounds {
        offset: 0,
        limit: u64::MAX,
    };

    /// A window skipping `offset` rows and yielding at most `limit`.
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Rows skipped before the window starts.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum rows in the window.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Whether this window admits every row.
    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    /// Apply the window to an already-materialized row list.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
            .collect()
    }
}

impl Default for PageBounds {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
