//! Submodule defining the errors used across the crate.

use alloc::string::String;

/// Errors raised when a table operation is called with a violated precondition.
///
/// Operations that return this error leave the table they were called on untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A cell update went through a column that is not registered in the table's columns.
    #[error("Column `{0}` is not a registered editable column")]
    UnknownColumn(String),
    /// Two editable columns were registered under the same key.
    #[error("Column `{0}` is registered more than once")]
    DuplicateColumn(String),
    /// No row with the given identity exists in the table.
    #[error("No row with id {0} in table")]
    RowNotFound(String),
    /// A row with the given identity already exists in the table or the inserted batch.
    #[error("Row id {0} is already present")]
    DuplicateRowId(String),
    /// A row update tried to change the identity of the row it was applied to.
    #[error("Row update changed row id from {from} to {to}")]
    IdentityChanged {
        /// The identity of the row before the update.
        from: String,
        /// The identity the update produced.
        to: String,
    },
}

/// Renders a row identity for an error message.
pub(crate) fn describe_id<Id: core::fmt::Debug>(id: &Id) -> String {
    alloc::format!("{id:?}")
}
