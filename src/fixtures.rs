//! Rows shared by the unit tests.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{Columns, TableRow, editable_column};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct User {
    pub(crate) username: String,
    pub(crate) full_name: (String, String),
    pub(crate) credits: i64,
}

impl User {
    pub(crate) fn new(username: &str, full_name: (&str, &str), credits: i64) -> Self {
        Self {
            username: username.to_string(),
            full_name: (full_name.0.to_string(), full_name.1.to_string()),
            credits,
        }
    }

    /// Credits compare with `PartialEq`; full names ignore ASCII case.
    pub(crate) fn columns() -> Columns<User> {
        Columns::new()
            .with(editable_column!(User, credits))
            .and_then(|columns| {
                columns.with(editable_column!(User, full_name).with_eq(
                    |pristine: &(String, String), current: &(String, String)| {
                        pristine.0.eq_ignore_ascii_case(&current.0)
                            && pristine.1.eq_ignore_ascii_case(&current.1)
                    },
                ))
            })
            .unwrap()
    }

    pub(crate) fn all() -> Vec<User> {
        alloc::vec![
            User::new("dan", ("Toucan", "Dan"), 10),
            User::new("dave", ("Chiquita", "Dave"), 80),
            User::new("truck", ("Truck", "Shepard"), 30),
            User::new("vader", ("Dark", "Vader"), 75),
        ]
    }
}

impl TableRow for User {
    type Id = String;

    fn row_id(&self) -> String {
        self.username.clone()
    }
}
