#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]
#![allow(private_bounds, private_interfaces)]

extern crate alloc;
#[cfg(feature = "testing")]
extern crate std;

pub mod editable;
pub mod editor;
pub mod errors;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod render;
pub mod schema;
#[cfg(feature = "testing")]
pub mod testing;

// Re-export main types
pub use editable::{
    CellEditStatus, CellUpdate, EditStatus, EditableRow, EditableTable, RowLifecycle, RowViews,
};
pub use editor::{CellUpdater, Subscription, TableEditor};
pub use render::{CellColumn, CellState, Layout, LayoutColumn, MetaColumn, edit_status_class_name};
pub use schema::{Columns, EditableColumn, Equality, TableRow};

// Re-export errors
pub use errors::Error;
