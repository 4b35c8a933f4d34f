//! Table definitions: how rows are identified and which of their fields are editable.
mod column;
mod columns;
mod table_row;

pub use column::{EditableColumn, Equality};
pub use columns::Columns;
pub use table_row::TableRow;
