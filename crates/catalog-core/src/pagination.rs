//! Offset/limit pagination over materialized result sets.

use crate::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use serde::{Deserialize, Serialize};

/// A requested slice of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Maximum number of items to return.
    pub limit: usize,
    /// Index of the first item to return.
    pub offset: usize,
}

impl PageWindow {
    /// Creates a new page window.
    #[must_use]
    pub const fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Slices `data` to this window.
    #[must_use]
    pub fn apply<T: Clone>(&self, data: &[T]) -> Vec<T> {
        paginate(data, self.limit, self.offset)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_OFFSET)
    }
}

/// One page of a result set together with the window that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub window: PageWindow,
}

impl<T> Page<T> {
    /// A page with no items.
    #[must_use]
    pub const fn empty(window: PageWindow) -> Self {
        Self {
            items: Vec::new(),
            window,
        }
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> Page<T> {
    /// Slices `data` to `window`.
    #[must_use]
    pub fn slice(data: &[T], window: PageWindow) -> Self {
        Self {
            items: window.apply(data),
            window,
        }
    }
}

/// Returns `data[offset..min(offset + limit, len)]`, or an empty vector when
/// `offset` is past the end.
#[must_use]
pub fn paginate<T: Clone>(data: &[T], limit: usize, offset: usize) -> Vec<T> {
    if offset >= data.len() {
        return Vec::new();
    }
    let end = offset.saturating_add(limit).min(data.len());
    data[offset..end].to_vec()
}
