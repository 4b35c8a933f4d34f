//! Row lifecycle transitions through the public API.
//!
//! Covers insert, remove, revert, commit and update sequences, checking the
//! flags and values of the affected rows as well as the table length.

use table_editor_rs::{
    CellUpdate, Columns, EditableColumn, EditableTable, Error, TableEditor, TableRow,
    editable_column,
};

#[derive(Debug, Clone, PartialEq)]
struct User {
    username: String,
    full_name: (String, String),
    credits: i64,
}

impl User {
    fn new(username: &str, full_name: (&str, &str), credits: i64) -> Self {
        Self {
            username: username.into(),
            full_name: (full_name.0.into(), full_name.1.into()),
            credits,
        }
    }
}

impl TableRow for User {
    type Id = String;

    fn row_id(&self) -> String {
        self.username.clone()
    }
}

fn credits() -> EditableColumn<User, i64> {
    editable_column!(User, credits)
}

/// Full names compare element-wise, ignoring ASCII case.
fn full_name() -> EditableColumn<User, (String, String)> {
    editable_column!(User, full_name).with_eq(|pristine: &(String, String), current: &(String, String)| {
        pristine.0.eq_ignore_ascii_case(&current.0) && pristine.1.eq_ignore_ascii_case(&current.1)
    })
}

fn editor() -> TableEditor<User> {
    let columns = Columns::new()
        .with(credits())
        .and_then(|columns| columns.with(full_name()))
        .unwrap();
    TableEditor::new(
        columns,
        [
            User::new("dan", ("Toucan", "Dan"), 10),
            User::new("dave", ("Chiquita", "Dave"), 80),
            User::new("truck", ("Truck", "Shepard"), 30),
            User::new("vader", ("Dark", "Vader"), 75),
        ],
    )
    .unwrap()
}

fn id(username: &str) -> String {
    username.to_string()
}

fn names<'a>(users: &[&'a User]) -> Vec<&'a str> {
    users.iter().map(|user| user.username.as_str()).collect()
}

#[test]
fn test_commit_pristine_row_keeps_value() {
    let editor = editor();
    let before = editor.state().get(&id("dan")).unwrap().clone();
    editor.commit_rows([id("dan")]);
    let state = editor.state();
    let after = state.get(&id("dan")).unwrap();
    assert_eq!(after, &before);
    assert_eq!(after.current(), after.pristine());
}

#[test]
fn test_insert_then_commit() {
    let editor = editor();
    let testuser = User::new("testuser", ("Test", "User"), 42);
    editor.insert_rows([testuser.clone()]).unwrap();
    assert!(editor.state().get(&id("testuser")).unwrap().is_new());

    editor.commit_rows([id("testuser")]);
    let state = editor.state();
    assert_eq!(state.len(), 5);
    let row = state.get(&id("testuser")).unwrap();
    assert_eq!(row.current(), &testuser);
    assert!(!row.is_new() && !row.is_dirty() && !row.is_removed());
}

#[test]
fn test_insert_then_revert() {
    let editor = editor();
    editor
        .insert_rows([User::new("testuser", ("Test", "User"), 42)])
        .unwrap();
    editor.revert_rows([id("testuser")]);
    let state = editor.state();
    assert_eq!(state.len(), 4);
    assert!(!state.contains(&id("testuser")));
}

#[test]
fn test_insert_then_remove_leaves_no_tombstone() {
    let editor = editor();
    editor
        .insert_rows([User::new("testuser", ("Test", "User"), 42)])
        .unwrap();
    editor.remove_rows([id("testuser")]);
    let state = editor.state();
    assert_eq!(state.len(), 4);
    assert_eq!(state.removed().count(), 0);
}

#[test]
fn test_remove_then_commit() {
    let editor = editor();
    editor.remove_rows([id("dan")]);
    let state = editor.state();
    assert_eq!(state.len(), 4);
    assert!(state.get(&id("dan")).unwrap().is_removed());
    assert_eq!(state.current().count(), 3);

    editor.commit_rows([id("dan")]);
    assert_eq!(editor.state().len(), 3);
    assert!(!editor.state().contains(&id("dan")));
}

#[test]
fn test_remove_then_revert() {
    let editor = editor();
    editor.remove_rows([id("dan")]);
    editor.revert_rows([id("dan")]);
    let state = editor.state();
    assert_eq!(state.len(), 4);
    let row = state.get(&id("dan")).unwrap();
    assert!(!row.is_removed());
    assert_eq!(row.current(), &User::new("dan", ("Toucan", "Dan"), 10));
}

#[test]
fn test_revert_removed_row_discards_edits() {
    let editor = editor();
    editor.cell_updater(id("dave"), &credits()).set(0i64).unwrap();
    editor.remove_rows([id("dave")]);
    editor.revert_rows([id("dave")]);
    let state = editor.state();
    let row = state.get(&id("dave")).unwrap();
    assert!(!row.status().has_changes());
    assert_eq!(row.current().credits, 80);
}

#[test]
fn test_commit_edited_removed_row_deletes_it() {
    let editor = editor();
    editor.cell_updater(id("vader"), &credits()).set(1i64).unwrap();
    editor.remove_rows([id("vader")]);
    editor.commit_rows([id("vader")]);
    assert!(!editor.state().contains(&id("vader")));
}

#[test]
fn test_update_then_commit() {
    let editor = editor();
    editor.cell_updater(id("truck"), &credits()).set(99i64).unwrap();
    assert!(editor.state().get(&id("truck")).unwrap().is_dirty());

    editor.commit_rows([id("truck")]);
    let state = editor.state();
    let row = state.get(&id("truck")).unwrap();
    assert!(!row.is_dirty());
    assert_eq!(row.pristine().credits, 99);
}

#[test]
fn test_update_then_revert() {
    let editor = editor();
    let setter = editor.cell_updater(id("truck"), &credits());
    setter.set(CellUpdate::apply(|credits: i64| credits * 2)).unwrap();
    assert_eq!(editor.state().get(&id("truck")).unwrap().current().credits, 60);

    editor.revert_rows([id("truck")]);
    let state = editor.state();
    let row = state.get(&id("truck")).unwrap();
    assert_eq!(row.current(), row.pristine());
    assert!(!row.is_dirty());
}

#[test]
fn test_update_back_to_pristine_clears_dirty() {
    let editor = editor();
    let set_credits = editor.cell_updater(id("dan"), &credits());
    let set_full_name = editor.cell_updater(id("dan"), &full_name());

    set_credits.set(11i64).unwrap();
    set_full_name.set(("Big".to_string(), "Dan".to_string())).unwrap();
    set_credits.set(10i64).unwrap();
    // Still dirty through the full name.
    assert!(editor.state().get(&id("dan")).unwrap().is_dirty());

    set_full_name
        .set(("Toucan".to_string(), "Dan".to_string()))
        .unwrap();
    assert!(!editor.state().get(&id("dan")).unwrap().is_dirty());
}

#[test]
fn test_custom_equality_respected() {
    let editor = editor();
    editor
        .cell_updater(id("vader"), &full_name())
        .set(("DARK".to_string(), "vader".to_string()))
        .unwrap();
    let state = editor.state();
    let row = state.get(&id("vader")).unwrap();
    assert!(!row.is_dirty());
    assert_eq!(row.current().full_name.0, "DARK");
    assert_eq!(state.dirty().count(), 0);
}

#[test]
fn test_update_row_on_missing_identity_fails() {
    let editor = editor();
    let before = editor.state();
    let error = editor
        .update_row(
            |mut user| {
                user.credits = 0;
                user
            },
            &id("palpatine"),
        )
        .unwrap_err();
    assert!(matches!(error, Error::RowNotFound(_)));
    assert_eq!(editor.state(), before);
    assert_eq!(editor.version(), 0);
}

#[test]
fn test_update_row_recomputes_dirty_over_all_columns() {
    let editor = editor();
    editor
        .update_row(
            |mut user| {
                user.credits += 5;
                user.full_name.1 = "DAVE".into();
                user
            },
            &id("dave"),
        )
        .unwrap();
    assert!(editor.state().get(&id("dave")).unwrap().is_dirty());

    editor
        .update_row(
            |mut user| {
                user.credits -= 5;
                user
            },
            &id("dave"),
        )
        .unwrap();
    assert!(!editor.state().get(&id("dave")).unwrap().is_dirty());
}

#[test]
fn test_bulk_operations_ignore_unknown_ids() {
    let editor = editor();
    editor.remove_rows([id("dan"), id("nobody"), id("dan")]);
    let state = editor.state();
    assert_eq!(state.removed().count(), 1);
    assert_eq!(state.len(), 4);
}

#[test]
fn test_initialize_discards_edits() {
    let editor = editor();
    editor.remove_rows([id("dan")]);
    editor
        .insert_rows([User::new("testuser", ("Test", "User"), 42)])
        .unwrap();
    editor
        .initialize_table([User::new("solo", ("Han", "Solo"), 1)])
        .unwrap();
    let state = editor.state();
    assert_eq!(state.len(), 1);
    assert_eq!(state.dirty().count(), 0);
}

#[test]
fn test_views_partition_rows() {
    let editor = editor();
    editor.remove_rows([id("dan")]);
    editor.cell_updater(id("dave"), &credits()).set(0i64).unwrap();
    editor
        .insert_rows([User::new("testuser", ("Test", "User"), 42)])
        .unwrap();

    let state = editor.state();
    let views = state.views();
    assert_eq!(names(&views.current), ["dave", "truck", "vader", "testuser"]);
    assert_eq!(names(&views.pristine), ["dan", "dave", "truck", "vader"]);
    assert_eq!(views.dirty.len(), 3);
    assert_eq!(views.removed.len(), 1);
    assert_eq!(views.new.len(), 1);
    // The pristine baseline keeps the server-known value of edited rows.
    assert_eq!(views.pristine[1].credits, 80);
}

#[test]
fn test_pure_operations_leave_input_untouched() {
    let columns = Columns::new().with(credits()).unwrap();
    let table = EditableTable::new([User::new("dan", ("Toucan", "Dan"), 10)]).unwrap();
    let edited = table
        .update_cell(&columns, &id("dan"), &credits(), 20i64)
        .unwrap();
    assert!(!table.get(&id("dan")).unwrap().is_dirty());
    assert!(edited.get(&id("dan")).unwrap().is_dirty());
}
