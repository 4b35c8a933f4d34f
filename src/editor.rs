//! Observable store binding an [`EditableTable`] to a UI.
//!
//! [`TableEditor`] owns the current table value and the column registry. Each
//! operation computes a new table from the current one and replaces it
//! wholesale, then notifies subscribers in registration order. Subscribers are
//! held as `Weak` callbacks: dropping the [`Subscription`] returned by
//! [`TableEditor::subscribe`] unsubscribes, and dead entries are pruned during
//! the next notification.
//!
//! The store is single-threaded (`Rc`/`RefCell`): operations are expected to
//! run to completion inside a UI event handler. Persistence is up to the
//! caller, which reads the dirty rows, saves them, and then calls
//! [`commit_rows`](TableEditor::commit_rows) or
//! [`revert_rows`](TableEditor::revert_rows).

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt::{self, Debug};

use crate::editable::{CellUpdate, EditableTable};
use crate::errors::Error;
use crate::schema::{Columns, EditableColumn, TableRow};

/// Callback notified with the new table after every state replacement.
type Listener<R> = dyn Fn(&EditableTable<R>);

struct Shared<R> {
    columns: Columns<R>,
    state: RefCell<Rc<EditableTable<R>>>,
    version: Cell<u64>,
    listeners: RefCell<Vec<Weak<Listener<R>>>>,
}

/// Shared handle to the state of an editable table.
///
/// Cloning the editor clones the handle, not the state.
pub struct TableEditor<R> {
    shared: Rc<Shared<R>>,
}

impl<R> Clone for TableEditor<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<R: Debug> Debug for TableEditor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableEditor")
            .field("columns", &self.shared.columns)
            .field("version", &self.shared.version.get())
            .field("state", &self.shared.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Keeps a subscriber registered; dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription<R> {
    _listener: Rc<Listener<R>>,
}

impl<R> Debug for Subscription<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

impl<R: TableRow> TableEditor<R> {
    /// Create an editor over pristine `rows`.
    ///
    /// # Errors
    ///
    /// * `DuplicateRowId` - If two of the rows share an identity.
    pub fn new(columns: Columns<R>, rows: impl IntoIterator<Item = R>) -> Result<Self, Error> {
        let table = EditableTable::new(rows)?;
        Ok(Self {
            shared: Rc::new(Shared {
                columns,
                state: RefCell::new(Rc::new(table)),
                version: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        })
    }

    /// Returns the column registry used for dirtiness.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &Columns<R> {
        &self.shared.columns
    }

    /// Returns the current table.
    ///
    /// The returned snapshot never changes; later operations replace the
    /// editor's table instead of mutating it.
    #[must_use]
    pub fn state(&self) -> Rc<EditableTable<R>> {
        Rc::clone(&self.shared.state.borrow())
    }

    /// Returns the number of state replacements since the editor was created.
    ///
    /// Suitable as a memoization key for derived views.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.version.get()
    }

    /// Replace the current table and notify subscribers.
    pub fn set_state(&self, table: EditableTable<R>) {
        let table = Rc::new(table);
        *self.shared.state.borrow_mut() = Rc::clone(&table);
        self.shared.version.set(self.shared.version.get() + 1);
        self.notify(&table);
    }

    /// Register `listener`, called with the new table after every state replacement.
    pub fn subscribe(&self, listener: impl Fn(&EditableTable<R>) + 'static) -> Subscription<R>
    where
        R: 'static,
    {
        let listener: Rc<Listener<R>> = Rc::new(listener);
        self.shared
            .listeners
            .borrow_mut()
            .push(Rc::downgrade(&listener));
        Subscription {
            _listener: listener,
        }
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.strong_count() > 0)
            .count()
    }

    fn notify(&self, table: &EditableTable<R>) {
        // Upgrade outside of the callbacks so that they may subscribe or edit.
        let listeners: Vec<Rc<Listener<R>>> = {
            let mut registered = self.shared.listeners.borrow_mut();
            registered.retain(|listener| listener.strong_count() > 0);
            registered.iter().filter_map(Weak::upgrade).collect()
        };
        let version = self.version();
        tracing::trace!(subscribers = listeners.len(), version, "notifying subscribers");
        for listener in listeners {
            // A nested edit already notified everyone with a newer table.
            if self.version() != version {
                tracing::trace!(version, "superseded notification");
                break;
            }
            listener(table);
        }
    }

    /// Compute a new table from the current one and store it.
    ///
    /// On error the state is untouched and nobody is notified.
    fn replace_with(
        &self,
        operation: impl FnOnce(&EditableTable<R>, &Columns<R>) -> Result<EditableTable<R>, Error>,
    ) -> Result<(), Error> {
        let current = self.state();
        let table = operation(&current, &self.shared.columns)?;
        self.set_state(table);
        Ok(())
    }

    /// Discard every row and in-flight edit, and start over from pristine `rows`.
    ///
    /// # Errors
    ///
    /// * `DuplicateRowId` - If two of the rows share an identity.
    pub fn initialize_table(&self, rows: impl IntoIterator<Item = R>) -> Result<(), Error> {
        self.replace_with(|_, _| EditableTable::new(rows))
    }

    /// Append `rows` as new rows.
    ///
    /// # Errors
    ///
    /// * `DuplicateRowId` - If one of the identities is already present.
    pub fn insert_rows(&self, rows: impl IntoIterator<Item = R>) -> Result<(), Error> {
        self.replace_with(|table, _| table.insert_rows(rows))
    }

    /// Mark the targeted rows for removal, deleting new ones.
    pub fn remove_rows(&self, row_ids: impl IntoIterator<Item = R::Id>) {
        let table = self.state().remove_rows(row_ids);
        self.set_state(table);
    }

    /// Restore the targeted rows to their pristine value, deleting new ones.
    pub fn revert_rows(&self, row_ids: impl IntoIterator<Item = R::Id>) {
        let table = self.state().revert_rows(row_ids);
        self.set_state(table);
    }

    /// Promote the current value of the targeted rows to pristine, deleting removed ones.
    pub fn commit_rows(&self, row_ids: impl IntoIterator<Item = R::Id>) {
        let table = self.state().commit_rows(row_ids);
        self.set_state(table);
    }

    /// Apply `update` to the current value of the row with the given identity.
    ///
    /// # Errors
    ///
    /// * `RowNotFound` - If no row has the given identity.
    /// * `IdentityChanged` - If `update` changed the identity of the row.
    pub fn update_row(&self, update: impl FnOnce(R) -> R, row_id: &R::Id) -> Result<(), Error> {
        self.replace_with(|table, columns| table.update_row(columns, row_id, update))
    }

    /// Returns a setter for one cell, to be bound to an input control.
    #[must_use]
    pub fn cell_updater<T>(&self, row_id: R::Id, column: &EditableColumn<R, T>) -> CellUpdater<R, T> {
        CellUpdater {
            editor: self.clone(),
            row_id,
            column: column.clone(),
        }
    }
}

/// Setter bound to one cell of a [`TableEditor`].
pub struct CellUpdater<R: TableRow, T> {
    editor: TableEditor<R>,
    row_id: R::Id,
    column: EditableColumn<R, T>,
}

impl<R: TableRow, T> Clone for CellUpdater<R, T> {
    fn clone(&self) -> Self {
        Self {
            editor: self.editor.clone(),
            row_id: self.row_id.clone(),
            column: self.column.clone(),
        }
    }
}

impl<R: TableRow, T> Debug for CellUpdater<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellUpdater")
            .field("row_id", &self.row_id)
            .field("column", &self.column.key())
            .finish_non_exhaustive()
    }
}

impl<R: TableRow, T: Clone> CellUpdater<R, T> {
    /// Returns the identity of the row this setter writes to.
    #[inline]
    #[must_use]
    pub fn row_id(&self) -> &R::Id {
        &self.row_id
    }

    /// Returns the key of the column this setter writes to.
    #[inline]
    #[must_use]
    pub fn column_key(&self) -> &'static str {
        self.column.key()
    }

    /// Update the cell with a literal or relative value.
    ///
    /// # Errors
    ///
    /// * `UnknownColumn` - If the column is not registered in the editor.
    /// * `RowNotFound` - If the row no longer exists.
    pub fn set(&self, update: impl Into<CellUpdate<T>>) -> Result<(), Error> {
        self.editor.replace_with(|table, columns| {
            table.update_cell(columns, &self.row_id, &self.column, update)
        })
    }
}
