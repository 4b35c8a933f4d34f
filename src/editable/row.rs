//! A row value paired with its edit status.

use crate::editable::{CellEditStatus, EditStatus, RowLifecycle};
use crate::schema::{EditableColumn, TableRow};

/// A row's current value together with its [`EditStatus`].
///
/// Editable rows are snapshots: every operation builds a new row instead of
/// mutating an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditableRow<R> {
    /// The live, possibly edited value.
    pub(crate) current: R,
    /// Pristine value and flags.
    pub(crate) status: EditStatus<R>,
}

impl<R: Clone> EditableRow<R> {
    /// Wrap `row` as both current and pristine value, with every flag cleared.
    #[must_use]
    pub fn new(row: R) -> Self {
        Self::with_lifecycle(row, RowLifecycle::Pristine)
    }

    /// Wrap `row` as a clean row with the given lifecycle.
    pub(crate) fn with_lifecycle(row: R, lifecycle: RowLifecycle) -> Self {
        Self {
            status: EditStatus::clean(row.clone(), lifecycle),
            current: row,
        }
    }

    /// The row marked for removal, or `None` if it was new and has to be deleted.
    pub(crate) fn removed(&self) -> Option<Self> {
        if self.is_new() {
            return None;
        }
        let mut removed = self.clone();
        removed.status.lifecycle = RowLifecycle::Removed;
        Some(removed)
    }

    /// A fresh pristine wrap of the pristine value, or `None` if the row was new.
    ///
    /// Reverting a removed row both restores it and discards its edits.
    pub(crate) fn reverted(&self) -> Option<Self> {
        if self.is_new() {
            return None;
        }
        Some(Self::new(self.status.pristine.clone()))
    }

    /// A fresh pristine wrap of the current value, or `None` if the row was removed.
    pub(crate) fn committed(&self) -> Option<Self> {
        if self.is_removed() {
            return None;
        }
        Some(Self::new(self.current.clone()))
    }
}

impl<R: Clone> From<R> for EditableRow<R> {
    fn from(row: R) -> Self {
        Self::new(row)
    }
}

impl<R> EditableRow<R> {
    /// Returns the current value of the row.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &R {
        &self.current
    }

    /// Consumes the row and returns its current value.
    #[inline]
    #[must_use]
    pub fn into_current(self) -> R {
        self.current
    }

    /// Returns the pristine value of the row.
    #[inline]
    #[must_use]
    pub fn pristine(&self) -> &R {
        &self.status.pristine
    }

    /// Returns the edit status of the row.
    #[inline]
    #[must_use]
    pub fn status(&self) -> &EditStatus<R> {
        &self.status
    }

    /// Returns true if the current value differs from the pristine one.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.status.is_dirty()
    }

    /// Returns true if the row was inserted since the last commit.
    #[inline]
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.status.is_new()
    }

    /// Returns true if the row is marked for removal.
    #[inline]
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.status.is_removed()
    }

    /// Returns the edit status of one cell of the row.
    #[must_use]
    pub fn cell_status<T: PartialEq>(&self, column: &EditableColumn<R, T>) -> CellEditStatus<'_, T> {
        CellEditStatus {
            pristine: column.get(&self.status.pristine),
            is_dirty: column.is_cell_dirty(&self.status.pristine, &self.current),
        }
    }
}

impl<R: TableRow> EditableRow<R> {
    /// Returns the identity of the row's current value.
    #[inline]
    #[must_use]
    pub fn row_id(&self) -> R::Id {
        self.current.row_id()
    }
}
