//! Registry of the editable columns of a table.
//!
//! The registry is the set of equality rules used to compute row dirtiness:
//! a row is dirty as soon as one registered column differs from its pristine
//! value. Fields of the row that are not registered never make it dirty.

use alloc::string::ToString;
use alloc::sync::Arc;
use core::fmt::{self, Debug};

use indexmap::IndexMap as IndexMapRaw;

use crate::errors::Error;
use crate::schema::EditableColumn;

/// `IndexMap` alias using hashbrown's default hasher for `no_std` compatibility.
type IndexMap<K, V> = IndexMapRaw<K, V, hashbrown::DefaultHashBuilder>;

/// Type-erased view of an [`EditableColumn`], used for dirtiness computation.
pub(crate) trait DynColumn<R>: Send + Sync {
    /// The title of the column, if any.
    fn title(&self) -> Option<&str>;

    /// Whether the cell of `current` differs from the cell of `pristine`.
    fn is_cell_dirty(&self, pristine: &R, current: &R) -> bool;
}

impl<R, T: PartialEq> DynColumn<R> for EditableColumn<R, T> {
    fn title(&self) -> Option<&str> {
        EditableColumn::title(self)
    }

    fn is_cell_dirty(&self, pristine: &R, current: &R) -> bool {
        EditableColumn::is_cell_dirty(self, pristine, current)
    }
}

/// The editable columns of a table, in registration order and indexed by key.
pub struct Columns<R> {
    columns: IndexMap<&'static str, Arc<dyn DynColumn<R>>>,
}

impl<R> Clone for Columns<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> Debug for Columns<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.keys()).finish()
    }
}

impl<R> Default for Columns<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Columns<R> {
    /// Create an empty registry.
    ///
    /// With no registered columns no row ever becomes dirty.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: IndexMap::default(),
        }
    }

    /// Register an editable column.
    ///
    /// # Errors
    ///
    /// * `DuplicateColumn` - If a column with the same key is already registered.
    pub fn with<T>(mut self, column: EditableColumn<R, T>) -> Result<Self, Error>
    where
        R: 'static,
        T: PartialEq + 'static,
    {
        let key = column.key();
        if self.columns.contains_key(key) {
            return Err(Error::DuplicateColumn(key.to_string()));
        }
        self.columns.insert(key, Arc::new(column));
        Ok(self)
    }

    /// Returns the number of registered columns.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no column is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the keys of the registered columns, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.keys().copied()
    }

    /// Returns true if a column with the given key is registered.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.columns.contains_key(key)
    }

    /// Returns the title of the column with the given key.
    #[must_use]
    pub fn title(&self, key: &str) -> Option<&str> {
        self.columns.get(key).and_then(|column| column.title())
    }

    /// Returns whether `current` differs from `pristine` in any registered column.
    ///
    /// Every column is compared, so a row whose edits were all set back to their
    /// pristine values is clean again.
    #[must_use]
    pub fn is_row_dirty(&self, pristine: &R, current: &R) -> bool {
        self.columns
            .values()
            .any(|column| column.is_cell_dirty(pristine, current))
    }

    /// Fails unless a column with the given key is registered.
    pub(crate) fn ensure_registered(&self, key: &str) -> Result<(), Error> {
        if self.contains(key) {
            Ok(())
        } else {
            tracing::warn!(column = key, "rejected update through unregistered column");
            Err(Error::UnknownColumn(key.to_string()))
        }
    }
}
