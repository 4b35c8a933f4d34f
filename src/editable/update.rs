//! Row and cell updates, with dirtiness recomputed against the pristine value.

use alloc::boxed::Box;
use core::fmt::{self, Debug};

use crate::editable::{EditStatus, EditableRow};
use crate::errors::Error;
use crate::schema::{Columns, EditableColumn};

/// New value for a cell: either a literal or a function of the previous value.
pub enum CellUpdate<T> {
    /// Replace the cell with this value.
    Set(T),
    /// Compute the new value from the previous one.
    Apply(Box<dyn FnOnce(T) -> T>),
}

impl<T> CellUpdate<T> {
    /// A relative update, computing the new value from the previous one.
    ///
    /// # Example
    ///
    /// ```
    /// use table_editor_rs::CellUpdate;
    ///
    /// let increment = CellUpdate::apply(|credits: i64| credits + 10);
    /// assert_eq!(increment.resolve(5), 15);
    /// ```
    #[must_use]
    pub fn apply(update: impl FnOnce(T) -> T + 'static) -> Self {
        Self::Apply(Box::new(update))
    }

    /// Returns the new cell value given the previous one.
    #[must_use]
    pub fn resolve(self, previous: T) -> T {
        match self {
            Self::Set(value) => value,
            Self::Apply(update) => update(previous),
        }
    }
}

impl<T> From<T> for CellUpdate<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

impl<T: Debug> Debug for CellUpdate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(value) => f.debug_tuple("Set").field(value).finish(),
            Self::Apply(_) => f.write_str("Apply(..)"),
        }
    }
}

impl<R: Clone> EditableRow<R> {
    /// Apply `update` to the current value and recompute dirtiness.
    ///
    /// Dirtiness is recomputed over every registered column, so an update that
    /// sets the last diverging cell back to its pristine value leaves a clean
    /// row. The pristine value and the lifecycle are kept as they are.
    #[must_use]
    pub fn apply_update(&self, columns: &Columns<R>, update: impl FnOnce(R) -> R) -> Self {
        let current = update(self.current.clone());
        let is_dirty = columns.is_row_dirty(&self.status.pristine, &current);
        Self {
            current,
            status: EditStatus {
                pristine: self.status.pristine.clone(),
                is_dirty,
                lifecycle: self.status.lifecycle,
            },
        }
    }

    /// Update a single cell and recompute dirtiness.
    ///
    /// # Errors
    ///
    /// * `UnknownColumn` - If `column` is not registered in `columns`.
    pub fn update_cell<T: Clone>(
        &self,
        columns: &Columns<R>,
        column: &EditableColumn<R, T>,
        update: impl Into<CellUpdate<T>>,
    ) -> Result<Self, Error> {
        columns.ensure_registered(column.key())?;
        let update = update.into();
        Ok(self.apply_update(columns, |mut row| {
            let previous = column.get(&row).clone();
            *column.get_mut(&mut row) = update.resolve(previous);
            row
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::RowLifecycle;
    use crate::editable_column;
    use crate::fixtures::User;
    use alloc::string::String;

    fn dan() -> EditableRow<User> {
        EditableRow::new(User::new("dan", ("Toucan", "Dan"), 10))
    }

    #[test]
    fn test_literal_and_relative_updates() {
        let columns = User::columns();
        let credits = editable_column!(User, credits);

        let set = dan().update_cell(&columns, &credits, 42i64).unwrap();
        assert_eq!(set.current().credits, 42);

        let incremented = dan()
            .update_cell(&columns, &credits, CellUpdate::apply(|prev: i64| prev + 10))
            .unwrap();
        assert_eq!(incremented.current().credits, 20);
        assert!(incremented.is_dirty());
        assert_eq!(incremented.pristine().credits, 10);
    }

    #[test]
    fn test_update_back_to_pristine_clears_dirty() {
        let columns = User::columns();
        let credits = editable_column!(User, credits);

        let edited = dan().update_cell(&columns, &credits, 11i64).unwrap();
        assert!(edited.is_dirty());
        let restored = edited.update_cell(&columns, &credits, 10i64).unwrap();
        assert!(!restored.is_dirty());
    }

    #[test]
    fn test_dirty_is_recomputed_over_all_columns() {
        let columns = User::columns();
        let credits = editable_column!(User, credits);
        let full_name = editable_column!(User, full_name);

        let row = dan()
            .update_cell(&columns, &credits, 11i64)
            .unwrap()
            .update_cell(&columns, &full_name, (String::from("Big"), String::from("Dan")))
            .unwrap()
            .update_cell(&columns, &credits, 10i64)
            .unwrap();
        assert!(row.is_dirty(), "full name still differs");

        let row = row
            .update_cell(&columns, &full_name, (String::from("Toucan"), String::from("Dan")))
            .unwrap();
        assert!(!row.is_dirty());
    }

    #[test]
    fn test_custom_equality_is_respected() {
        let columns = User::columns();
        let full_name = editable_column!(User, full_name);

        let row = dan()
            .update_cell(&columns, &full_name, (String::from("TOUCAN"), String::from("dan")))
            .unwrap();
        assert_eq!(row.current().full_name.0, "TOUCAN");
        assert!(!row.is_dirty());
    }

    #[test]
    fn test_unregistered_column_is_rejected() {
        let columns = User::columns();
        let username = editable_column!(User, username);
        let result = dan().update_cell(&columns, &username, String::from("danny"));
        assert_eq!(result, Err(Error::UnknownColumn("username".into())));
    }

    #[test]
    fn test_update_keeps_lifecycle_and_pristine() {
        let columns = User::columns();
        let credits = editable_column!(User, credits);
        let removed = dan().removed().unwrap();

        let edited = removed.update_cell(&columns, &credits, 0i64).unwrap();
        assert_eq!(edited.status().lifecycle(), RowLifecycle::Removed);
        assert_eq!(edited.pristine().credits, 10);
        assert!(edited.is_dirty());
    }

    #[test]
    fn test_debug_hides_closures() {
        assert_eq!(alloc::format!("{:?}", CellUpdate::Set(1)), "Set(1)");
        assert_eq!(
            alloc::format!("{:?}", CellUpdate::apply(|x: i32| x + 1)),
            "Apply(..)"
        );
    }
}
