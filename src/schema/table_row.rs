//! Row identity.
use core::{fmt::Debug, hash::Hash};

/// A record that can be tracked by an [`EditableTable`](crate::EditableTable).
///
/// The table has no knowledge of the fields of a row beyond its identity and the
/// [`EditableColumn`](crate::EditableColumn)s registered for it.
///
/// # Example
///
/// ```
/// use table_editor_rs::TableRow;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct User {
///     username: String,
///     credits: i64,
/// }
///
/// impl TableRow for User {
///     type Id = String;
///
///     fn row_id(&self) -> String {
///         self.username.clone()
///     }
/// }
/// ```
pub trait TableRow: Clone {
    /// The identity value type, unique among the rows of a table.
    type Id: Clone + Eq + Hash + Debug;

    /// Returns the identity of this row.
    ///
    /// Bulk operations match rows by this value, never by position.
    fn row_id(&self) -> Self::Id;
}
