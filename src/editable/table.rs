//! The editable collection and its operations.
//!
//! Bulk operations (remove, revert, commit) collect their targets into a hash
//! set first and then walk the table once, so they run in `O(n + m)` for a
//! table of `n` rows and `m` targets.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::editable::{CellUpdate, EditableRow, RowLifecycle};
use crate::errors::{Error, describe_id};
use crate::schema::{Columns, EditableColumn, TableRow};

/// An ordered collection of [`EditableRow`]s.
///
/// Row order only matters for display; operations address rows by their
/// [`TableRow::row_id`]. Identities are unique across the whole table,
/// including rows marked for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EditableTable<R> {
    rows: Vec<EditableRow<R>>,
}

impl<R> Default for EditableTable<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R> EditableTable<R> {
    /// Returns the rows of the table, removed ones included.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[EditableRow<R>] {
        &self.rows
    }

    /// Consumes the table and returns its rows.
    #[inline]
    #[must_use]
    pub fn into_rows(self) -> Vec<EditableRow<R>> {
        self.rows
    }

    /// Returns the number of rows, removed ones included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over the rows of the table.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, EditableRow<R>> {
        self.rows.iter()
    }
}

impl<'table, R> IntoIterator for &'table EditableTable<R> {
    type Item = &'table EditableRow<R>;
    type IntoIter = core::slice::Iter<'table, EditableRow<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<R: TableRow> EditableTable<R> {
    /// Create a table of pristine rows.
    ///
    /// # Errors
    ///
    /// * `DuplicateRowId` - If two of the rows share an identity.
    pub fn new(rows: impl IntoIterator<Item = R>) -> Result<Self, Error> {
        let rows: Vec<R> = rows.into_iter().collect();
        ensure_unique_ids(core::iter::empty(), &rows)?;
        tracing::debug!(rows = rows.len(), "initialized table");
        Ok(Self {
            rows: rows.into_iter().map(EditableRow::new).collect(),
        })
    }

    /// Returns the row with the given identity.
    #[must_use]
    pub fn get(&self, row_id: &R::Id) -> Option<&EditableRow<R>> {
        self.rows.iter().find(|row| row.row_id() == *row_id)
    }

    /// Returns true if a row with the given identity exists, removed or not.
    #[inline]
    #[must_use]
    pub fn contains(&self, row_id: &R::Id) -> bool {
        self.get(row_id).is_some()
    }

    /// Append `rows` as new rows.
    ///
    /// # Errors
    ///
    /// * `DuplicateRowId` - If one of the identities is already in the table
    ///   (removed rows included) or appears twice in `rows`.
    pub fn insert_rows(&self, rows: impl IntoIterator<Item = R>) -> Result<Self, Error> {
        let rows: Vec<R> = rows.into_iter().collect();
        ensure_unique_ids(self.rows.iter().map(EditableRow::row_id), &rows)?;
        tracing::debug!(inserted = rows.len(), "inserted rows");

        let mut table = self.clone();
        table.rows.extend(
            rows.into_iter()
                .map(|row| EditableRow::with_lifecycle(row, RowLifecycle::New)),
        );
        Ok(table)
    }

    /// Mark the targeted rows for removal.
    ///
    /// New rows are deleted outright instead, so removing a row never produces
    /// a tombstone for something the baseline does not know. Identities that
    /// match no row are ignored.
    #[must_use]
    pub fn remove_rows(&self, row_ids: impl IntoIterator<Item = R::Id>) -> Self {
        let (table, targets) = self.map_targets(row_ids, EditableRow::removed);
        tracing::debug!(targets, deleted = self.len() - table.len(), "removed rows");
        table
    }

    /// Restore the targeted rows to their pristine value.
    ///
    /// Reverting a removed row un-removes it and discards its edits at once;
    /// reverting a new row deletes it.
    #[must_use]
    pub fn revert_rows(&self, row_ids: impl IntoIterator<Item = R::Id>) -> Self {
        let (table, targets) = self.map_targets(row_ids, EditableRow::reverted);
        tracing::debug!(targets, deleted = self.len() - table.len(), "reverted rows");
        table
    }

    /// Promote the current value of the targeted rows to their pristine value.
    ///
    /// Committing a removed row deletes it.
    #[must_use]
    pub fn commit_rows(&self, row_ids: impl IntoIterator<Item = R::Id>) -> Self {
        let (table, targets) = self.map_targets(row_ids, EditableRow::committed);
        tracing::debug!(targets, deleted = self.len() - table.len(), "committed rows");
        table
    }

    /// Apply `update` to the current value of the row with the given identity.
    ///
    /// # Errors
    ///
    /// * `RowNotFound` - If no row has the given identity.
    /// * `IdentityChanged` - If `update` changed the identity of the row.
    pub fn update_row(
        &self,
        columns: &Columns<R>,
        row_id: &R::Id,
        update: impl FnOnce(R) -> R,
    ) -> Result<Self, Error> {
        let Some(index) = self.rows.iter().position(|row| row.row_id() == *row_id) else {
            tracing::warn!(row_id = ?row_id, "rejected update of missing row");
            return Err(Error::RowNotFound(describe_id(row_id)));
        };

        let updated = self.rows[index].apply_update(columns, update);
        let updated_id = updated.row_id();
        if updated_id != *row_id {
            tracing::warn!(from = ?row_id, to = ?updated_id, "rejected identity change");
            return Err(Error::IdentityChanged {
                from: describe_id(row_id),
                to: describe_id(&updated_id),
            });
        }

        let mut table = self.clone();
        table.rows[index] = updated;
        Ok(table)
    }

    /// Update one cell of the row with the given identity.
    ///
    /// # Errors
    ///
    /// * `UnknownColumn` - If `column` is not registered in `columns`.
    /// * `RowNotFound` - If no row has the given identity.
    /// * `IdentityChanged` - If the column holds the identity and the update changed it.
    pub fn update_cell<T: Clone>(
        &self,
        columns: &Columns<R>,
        row_id: &R::Id,
        column: &EditableColumn<R, T>,
        update: impl Into<CellUpdate<T>>,
    ) -> Result<Self, Error> {
        columns.ensure_registered(column.key())?;
        let update = update.into();
        self.update_row(columns, row_id, |mut row| {
            let previous = column.get(&row).clone();
            *column.get_mut(&mut row) = update.resolve(previous);
            row
        })
    }

    /// Rebuild the table, replacing every targeted row by `f(row)` and dropping it on `None`.
    ///
    /// Returns the new table and the number of distinct targets.
    fn map_targets(
        &self,
        row_ids: impl IntoIterator<Item = R::Id>,
        f: impl Fn(&EditableRow<R>) -> Option<EditableRow<R>>,
    ) -> (Self, usize) {
        let targets: HashSet<R::Id> = row_ids.into_iter().collect();
        let rows = self
            .rows
            .iter()
            .filter_map(|row| {
                if targets.contains(&row.row_id()) {
                    f(row)
                } else {
                    Some(row.clone())
                }
            })
            .collect();
        (Self { rows }, targets.len())
    }
}

/// Fails if an identity of `incoming` is in `existing` or repeated within `incoming`.
fn ensure_unique_ids<R: TableRow>(
    existing: impl Iterator<Item = R::Id>,
    incoming: &[R],
) -> Result<(), Error> {
    let mut seen: HashSet<R::Id> = existing.collect();
    for row in incoming {
        let row_id = row.row_id();
        if !seen.insert(row_id.clone()) {
            tracing::warn!(row_id = ?row_id, "rejected duplicate row id");
            return Err(Error::DuplicateRowId(describe_id(&row_id)));
        }
    }
    Ok(())
}
