//! Edit status of rows and cells.

/// Where a row stands relative to the persisted baseline.
///
/// A row cannot be new and removed at once: removing a new row deletes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowLifecycle {
    /// The row is part of the baseline.
    #[default]
    Pristine,
    /// The row was inserted and is not part of the baseline yet.
    New,
    /// The row is part of the baseline and marked for removal.
    Removed,
}

/// Per-row edit metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditStatus<R> {
    /// The last committed value of the row.
    pub(crate) pristine: R,
    /// Whether any registered column differs from the pristine value.
    pub(crate) is_dirty: bool,
    /// The lifecycle of the row.
    pub(crate) lifecycle: RowLifecycle,
}

impl<R> EditStatus<R> {
    /// A clean status with the given pristine value and lifecycle.
    pub(crate) fn clean(pristine: R, lifecycle: RowLifecycle) -> Self {
        Self {
            pristine,
            is_dirty: false,
            lifecycle,
        }
    }

    /// Returns the pristine value of the row.
    #[inline]
    #[must_use]
    pub fn pristine(&self) -> &R {
        &self.pristine
    }

    /// Returns true if the current value differs from the pristine one.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Returns true if the row was inserted since the last commit.
    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.lifecycle == RowLifecycle::New
    }

    /// Returns true if the row is marked for removal.
    #[inline]
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.lifecycle == RowLifecycle::Removed
    }

    /// Returns the lifecycle of the row.
    #[inline]
    #[must_use]
    pub fn lifecycle(&self) -> RowLifecycle {
        self.lifecycle
    }

    /// Returns true if a save has to account for this row.
    #[inline]
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.is_dirty || self.lifecycle != RowLifecycle::Pristine
    }
}

/// Edit status of a single cell, handed to cell renderers.
///
/// Cells cannot be added or removed, so only dirtiness is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellEditStatus<'row, T> {
    /// The pristine value of the cell.
    pub pristine: &'row T,
    /// Whether the cell differs from its pristine value under the column's rule.
    pub is_dirty: bool,
}
