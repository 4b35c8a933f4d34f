//! Editable rows and the state machine over a table of them.
//!
//! Each row carries its current value next to an [`EditStatus`] holding the
//! pristine (last committed) value. Rows move between three lifecycles:
//!
//! | Lifecycle | Remove | Revert | Commit |
//! |-----------|--------|--------|--------|
//! | Pristine | Removed | Pristine wrap of pristine | Pristine wrap of current |
//! | New | Deleted | Deleted | Pristine wrap of current |
//! | Removed | Removed | Pristine wrap of pristine | Deleted |
//!
//! Dirtiness is orthogonal to the lifecycle: it is recomputed from every
//! registered column on each row update, and cleared by revert and commit.
//!
//! All operations return a new [`EditableTable`]; the table they are called on
//! is never modified.

mod row;
mod status;
mod table;
mod update;
mod views;

pub use row::EditableRow;
pub use status::{CellEditStatus, EditStatus, RowLifecycle};
pub use table::EditableTable;
pub use update::CellUpdate;
pub use views::RowViews;
