//! Derived projections of an editable table.

use alloc::vec::Vec;

use crate::editable::{EditableRow, EditableTable};

/// Snapshot of the projections of an [`EditableTable`], for renderers and save logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowViews<'table, R> {
    /// Current values of the rows that are not marked for removal.
    pub current: Vec<&'table R>,
    /// Pristine values of the rows that are not new: the baseline known to the source of truth.
    pub pristine: Vec<&'table R>,
    /// Rows a save has to account for: dirty, new or removed.
    pub dirty: Vec<&'table EditableRow<R>>,
    /// Rows marked for removal.
    pub removed: Vec<&'table EditableRow<R>>,
    /// Rows inserted since the last commit.
    pub new: Vec<&'table EditableRow<R>>,
}

impl<R> EditableTable<R> {
    /// Current values of the rows that are not marked for removal.
    pub fn current(&self) -> impl Iterator<Item = &R> + '_ {
        self.iter()
            .filter(|row| !row.is_removed())
            .map(EditableRow::current)
    }

    /// Pristine values of the rows that are not new.
    pub fn pristine(&self) -> impl Iterator<Item = &R> + '_ {
        self.iter()
            .filter(|row| !row.is_new())
            .map(EditableRow::pristine)
    }

    /// Rows that are dirty, new or removed.
    pub fn dirty(&self) -> impl Iterator<Item = &EditableRow<R>> + '_ {
        self.iter().filter(|row| row.status().has_changes())
    }

    /// Rows marked for removal.
    pub fn removed(&self) -> impl Iterator<Item = &EditableRow<R>> + '_ {
        self.iter().filter(|row| row.is_removed())
    }

    /// Rows inserted since the last commit.
    pub fn new_rows(&self) -> impl Iterator<Item = &EditableRow<R>> + '_ {
        self.iter().filter(|row| row.is_new())
    }

    /// Collect every projection at once.
    #[must_use]
    pub fn views(&self) -> RowViews<'_, R> {
        RowViews {
            current: self.current().collect(),
            pristine: self.pristine().collect(),
            dirty: self.dirty().collect(),
            removed: self.removed().collect(),
            new: self.new_rows().collect(),
        }
    }
}
