//! Typed descriptor of a single editable field.

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt::{self, Debug};

/// Custom equality rule of a column, called as `eq(pristine, current)`.
pub type Equality<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// An editable field of the row type `R`, holding a cell of type `T`.
///
/// The column reaches its cell through a pair of accessor functions, so that a
/// column descriptor is statically tied to its field's type. Dirtiness of the
/// cell is decided by [`PartialEq`] unless a custom equality rule is set with
/// [`with_eq`](Self::with_eq).
///
/// The [`editable_column!`](crate::editable_column) macro builds a column from a
/// field name.
pub struct EditableColumn<R, T> {
    /// Key identifying the column within a [`Columns`](crate::Columns) registry.
    key: &'static str,
    /// Optional human-readable title, used for header cells.
    title: Option<String>,
    /// Shared accessor to the cell.
    get: fn(&R) -> &T,
    /// Mutable accessor to the cell.
    get_mut: fn(&mut R) -> &mut T,
    /// Custom equality, overriding `PartialEq`.
    eq: Option<Equality<T>>,
}

impl<R, T> Clone for EditableColumn<R, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            title: self.title.clone(),
            get: self.get,
            get_mut: self.get_mut,
            eq: self.eq.clone(),
        }
    }
}

impl<R, T> Debug for EditableColumn<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableColumn")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("custom_eq", &self.eq.is_some())
            .finish_non_exhaustive()
    }
}

impl<R, T> EditableColumn<R, T> {
    /// Create a column from its key and the accessors of its cell.
    ///
    /// # Arguments
    ///
    /// * `key` - The key of the column, unique within a table.
    /// * `get` - Returns a shared reference to the cell.
    /// * `get_mut` - Returns a mutable reference to the cell.
    #[inline]
    #[must_use]
    pub fn new(key: &'static str, get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self {
        Self {
            key,
            title: None,
            get,
            get_mut,
            eq: None,
        }
    }

    /// Set the title of the column.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a custom equality rule, called as `eq(pristine, current)`.
    ///
    /// Useful when two values should count as unchanged although `PartialEq`
    /// tells them apart, e.g. case-insensitive text or unordered pairs.
    #[must_use]
    pub fn with_eq(mut self, eq: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self {
        self.eq = Some(Arc::new(eq));
        self
    }

    /// Returns the key of the column.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the title of the column, if any.
    #[inline]
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the cell of this column in `row`.
    #[inline]
    pub fn get<'row>(&self, row: &'row R) -> &'row T {
        (self.get)(row)
    }

    /// Returns the cell of this column in `row`, mutably.
    #[inline]
    pub(crate) fn get_mut<'row>(&self, row: &'row mut R) -> &'row mut T {
        (self.get_mut)(row)
    }
}

impl<R, T: PartialEq> EditableColumn<R, T> {
    /// Returns whether two cell values are equal under this column's rule.
    #[must_use]
    pub fn cells_equal(&self, pristine: &T, current: &T) -> bool {
        match &self.eq {
            Some(eq) => eq(pristine, current),
            None => pristine == current,
        }
    }

    /// Returns whether the cell of `current` differs from the cell of `pristine`.
    #[must_use]
    pub fn is_cell_dirty(&self, pristine: &R, current: &R) -> bool {
        !self.cells_equal(self.get(pristine), self.get(current))
    }
}

/// Build an [`EditableColumn`] for a named field of a row struct.
///
/// The key of the column is the field name.
///
/// # Example
///
/// ```
/// use table_editor_rs::{EditableColumn, editable_column};
///
/// #[derive(Clone)]
/// struct User {
///     username: String,
///     credits: i64,
/// }
///
/// let credits: EditableColumn<User, i64> = editable_column!(User, credits);
/// assert_eq!(credits.key(), "credits");
/// ```
#[macro_export]
macro_rules! editable_column {
    ($row:ty, $field:ident) => {
        $crate::EditableColumn::new(
            ::core::stringify!($field),
            |row: &$row| &row.$field,
            |row: &mut $row| &mut row.$field,
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::User;

    #[test]
    fn test_default_equality_is_partial_eq() {
        let credits = editable_column!(User, credits);
        assert!(credits.cells_equal(&10, &10));
        assert!(!credits.cells_equal(&10, &11));
    }

    #[test]
    fn test_custom_equality_overrides_partial_eq() {
        let username = editable_column!(User, username)
            .with_eq(|pristine: &String, current: &String| pristine.eq_ignore_ascii_case(current));
        assert!(username.cells_equal(&"Dan".into(), &"dan".into()));
        assert!(!username.cells_equal(&"Dan".into(), &"dave".into()));
    }

    #[test]
    fn test_is_cell_dirty_reads_through_accessor() {
        let credits = editable_column!(User, credits);
        let pristine = User::new("dan", ("Toucan", "Dan"), 10);
        let mut current = pristine.clone();
        assert!(!credits.is_cell_dirty(&pristine, &current));
        *credits.get_mut(&mut current) += 5;
        assert!(credits.is_cell_dirty(&pristine, &current));
        assert_eq!(*credits.get(&current), 15);
    }

    #[test]
    fn test_title_and_debug() {
        let credits = editable_column!(User, credits).with_title("Credits");
        assert_eq!(credits.key(), "credits");
        assert_eq!(credits.title(), Some("Credits"));
        let rendered = alloc::format!("{credits:?}");
        assert!(rendered.contains("credits"));
        assert!(rendered.contains("custom_eq: false"));
    }
}
