//! Testing utilities shared by the integration tests and the fuzz target.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`Account`]: an `arbitrary` row type with a custom-equality column
//! - [`Step`]: one editor operation, generated by `arbitrary`
//! - [`assert_invariants`]: check identity uniqueness and dirty flags of a table
//! - [`run_script`]: replay steps against a [`TableEditor`], checking the
//!   post-condition of every operation

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use arbitrary::Arbitrary;
use hashbrown::HashSet;

use crate::{
    CellUpdate, Columns, EditableColumn, EditableTable, Error, RowLifecycle, TableEditor, TableRow,
    editable_column,
};

/// A row keyed by a small identity, so that generated steps hit existing rows often.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    /// Identity of the account.
    pub id: u8,
    /// Owner name.
    pub owner: String,
    /// Balance, compared with `PartialEq`.
    pub balance: i32,
    /// Unordered pair of tags: `(a, b)` and `(b, a)` are the same cell value.
    pub tags: (u8, u8),
}

impl Account {
    /// Create an account without tags.
    #[must_use]
    pub fn new(id: u8, owner: &str, balance: i32) -> Self {
        Self {
            id,
            owner: owner.into(),
            balance,
            tags: (0, 0),
        }
    }

    /// The balance column.
    #[must_use]
    pub fn balance() -> EditableColumn<Self, i32> {
        editable_column!(Account, balance).with_title("Balance")
    }

    /// The owner column.
    #[must_use]
    pub fn owner() -> EditableColumn<Self, String> {
        editable_column!(Account, owner).with_title("Owner")
    }

    /// The tags column, ignoring the order of the pair.
    #[must_use]
    pub fn tags() -> EditableColumn<Self, (u8, u8)> {
        editable_column!(Account, tags).with_eq(|pristine: &(u8, u8), current: &(u8, u8)| {
            pristine == current || (pristine.0 == current.1 && pristine.1 == current.0)
        })
    }

    /// The registry of every editable column of an account.
    #[must_use]
    pub fn columns() -> Columns<Self> {
        Columns::new()
            .with(Self::owner())
            .and_then(|columns| columns.with(Self::balance()))
            .and_then(|columns| columns.with(Self::tags()))
            .expect("account column keys are distinct")
    }
}

impl TableRow for Account {
    type Id = u8;

    fn row_id(&self) -> u8 {
        self.id
    }
}

/// One operation on a [`TableEditor<Account>`].
#[derive(Debug, Clone, Arbitrary)]
pub enum Step {
    /// Start over from pristine rows.
    Initialize(Vec<Account>),
    /// Append new rows.
    Insert(Vec<Account>),
    /// Remove the rows with the given identities.
    Remove(Vec<u8>),
    /// Revert the rows with the given identities.
    Revert(Vec<u8>),
    /// Commit the rows with the given identities.
    Commit(Vec<u8>),
    /// Set the balance of a row.
    SetBalance {
        /// Targeted row.
        id: u8,
        /// New balance.
        balance: i32,
    },
    /// Add to the balance of a row, relative to its current balance.
    AddBalance {
        /// Targeted row.
        id: u8,
        /// Added amount.
        delta: i16,
    },
    /// Set the owner of a row.
    SetOwner {
        /// Targeted row.
        id: u8,
        /// New owner.
        owner: String,
    },
    /// Swap the two tags of a row, which never changes its dirtiness.
    SwapTags {
        /// Targeted row.
        id: u8,
    },
    /// Try to change the identity of a row.
    Rename {
        /// Targeted row.
        id: u8,
        /// New identity.
        new_id: u8,
    },
}

/// Assert that identities are unique and that every dirty flag matches a
/// recomputation over all of `columns`.
///
/// # Panics
///
/// Panics if an invariant is violated.
pub fn assert_invariants<R: TableRow>(table: &EditableTable<R>, columns: &Columns<R>) {
    let mut seen = HashSet::new();
    for row in table {
        let row_id = row.row_id();
        assert!(seen.insert(row_id.clone()), "duplicate row id {row_id:?}");
        assert_eq!(
            row.is_dirty(),
            columns.is_row_dirty(row.pristine(), row.current()),
            "stale dirty flag on row {row_id:?}"
        );
        assert!(
            !(row.is_new() && row.is_removed()),
            "row {row_id:?} is both new and removed"
        );
    }
}

/// Replay `steps` against a fresh editor and check every post-condition.
///
/// Returns the editor in its final state.
///
/// # Panics
///
/// Panics if an operation breaks its contract.
#[must_use]
pub fn run_script(steps: &[Step]) -> TableEditor<Account> {
    let editor =
        TableEditor::new(Account::columns(), Vec::new()).expect("an empty table has no duplicates");
    let notifications = Rc::new(Cell::new(0u64));
    let counter = Rc::clone(&notifications);
    let _subscription = editor.subscribe(move |_| counter.set(counter.get() + 1));

    for step in steps {
        let before = editor.state();
        let version = editor.version();
        let result = apply_step(&editor, step);

        let after = editor.state();
        if result.is_ok() {
            assert_eq!(editor.version(), version + 1, "{step:?} did not publish");
        } else {
            assert_eq!(editor.version(), version, "{step:?} failed but published");
            assert_eq!(before, after, "{step:?} failed but changed the table");
        }
        assert_eq!(notifications.get(), editor.version());
        assert_invariants(&after, editor.columns());
        check_step(step, &before, &after, result.as_ref().err());
    }
    editor
}

fn apply_step(editor: &TableEditor<Account>, step: &Step) -> Result<(), Error> {
    match step {
        Step::Initialize(rows) => editor.initialize_table(rows.iter().cloned()),
        Step::Insert(rows) => editor.insert_rows(rows.iter().cloned()),
        Step::Remove(ids) => {
            editor.remove_rows(ids.iter().copied());
            Ok(())
        }
        Step::Revert(ids) => {
            editor.revert_rows(ids.iter().copied());
            Ok(())
        }
        Step::Commit(ids) => {
            editor.commit_rows(ids.iter().copied());
            Ok(())
        }
        Step::SetBalance { id, balance } => editor.cell_updater(*id, &Account::balance()).set(*balance),
        Step::AddBalance { id, delta } => {
            let delta = i32::from(*delta);
            editor
                .cell_updater(*id, &Account::balance())
                .set(CellUpdate::apply(move |balance: i32| balance.saturating_add(delta)))
        }
        Step::SetOwner { id, owner } => editor.cell_updater(*id, &Account::owner()).set(owner.clone()),
        Step::SwapTags { id } => editor
            .cell_updater(*id, &Account::tags())
            .set(CellUpdate::apply(|(a, b): (u8, u8)| (b, a))),
        Step::Rename { id, new_id } => {
            let new_id = *new_id;
            editor.update_row(
                |mut account| {
                    account.id = new_id;
                    account
                },
                id,
            )
        }
    }
}

fn has_duplicates(ids: impl IntoIterator<Item = u8>) -> bool {
    let mut seen = HashSet::new();
    ids.into_iter().any(|id| !seen.insert(id))
}

fn check_step(
    step: &Step,
    before: &EditableTable<Account>,
    after: &EditableTable<Account>,
    error: Option<&Error>,
) {
    match step {
        Step::Initialize(rows) => {
            if has_duplicates(rows.iter().map(|row| row.id)) {
                assert!(matches!(error, Some(Error::DuplicateRowId(_))));
                return;
            }
            assert!(error.is_none());
            assert_eq!(after.len(), rows.len());
            assert!(after.iter().all(|row| !row.status().has_changes()));
        }
        Step::Insert(rows) => {
            let ids = before.iter().map(|row| row.row_id()).chain(rows.iter().map(|row| row.id));
            if has_duplicates(ids) {
                assert!(matches!(error, Some(Error::DuplicateRowId(_))));
                return;
            }
            assert!(error.is_none());
            assert_eq!(after.len(), before.len() + rows.len());
            assert_eq!(&after.rows()[..before.len()], before.rows());
            for (row, inserted) in after.rows()[before.len()..].iter().zip(rows) {
                assert_eq!(row.current(), inserted);
                assert!(row.is_new() && !row.is_dirty());
            }
        }
        Step::Remove(ids) | Step::Revert(ids) | Step::Commit(ids) => {
            check_bulk(step, ids, before, after);
        }
        Step::SetBalance { id, .. }
        | Step::AddBalance { id, .. }
        | Step::SetOwner { id, .. }
        | Step::SwapTags { id } => {
            let Some(previous) = before.get(id) else {
                assert!(matches!(error, Some(Error::RowNotFound(_))));
                return;
            };
            assert!(error.is_none());
            let Some(updated) = after.get(id) else {
                panic!("{step:?} deleted its row");
            };
            assert_eq!(updated.pristine(), previous.pristine());
            assert_eq!(updated.status().lifecycle(), previous.status().lifecycle());
            match step {
                Step::SetBalance { balance, .. } => assert_eq!(updated.current().balance, *balance),
                Step::AddBalance { delta, .. } => assert_eq!(
                    updated.current().balance,
                    previous.current().balance.saturating_add(i32::from(*delta))
                ),
                Step::SetOwner { owner, .. } => assert_eq!(&updated.current().owner, owner),
                _ => assert_eq!(updated.is_dirty(), previous.is_dirty()),
            }
        }
        Step::Rename { id, new_id } => match (before.contains(id), id == new_id) {
            (false, _) => assert!(matches!(error, Some(Error::RowNotFound(_)))),
            (true, false) => assert!(matches!(error, Some(Error::IdentityChanged { .. }))),
            (true, true) => assert_eq!(before.get(id), after.get(id)),
        },
    }
}

fn check_bulk(
    step: &Step,
    ids: &[u8],
    before: &EditableTable<Account>,
    after: &EditableTable<Account>,
) {
    let targets: HashSet<u8> = ids.iter().copied().collect();
    let mut remaining = after.iter();
    for row in before {
        let deleted = targets.contains(&row.row_id())
            && match step {
                Step::Remove(_) | Step::Revert(_) => row.is_new(),
                _ => row.is_removed(),
            };
        if deleted {
            assert!(!after.contains(&row.row_id()), "{step:?} kept {row:?}");
            continue;
        }
        // Order is preserved, so surviving rows come out in the same sequence.
        let Some(kept) = remaining.next() else {
            panic!("{step:?} dropped {row:?}");
        };
        assert_eq!(kept.row_id(), row.row_id());
        if !targets.contains(&row.row_id()) {
            assert_eq!(kept, row);
            continue;
        }
        match step {
            Step::Remove(_) => {
                assert_eq!(kept.current(), row.current());
                assert_eq!(kept.status().lifecycle(), RowLifecycle::Removed);
            }
            Step::Revert(_) => {
                assert_eq!(kept.current(), row.pristine());
                assert!(!kept.status().has_changes());
            }
            _ => {
                assert_eq!(kept.pristine(), row.current());
                assert!(!kept.status().has_changes());
            }
        }
    }
    assert!(remaining.next().is_none());
}
