//! Renderer collaborator interface.
//!
//! A [`Layout`] lists the columns of a table view, each either an editable
//! [`CellColumn`] bound to an [`EditableColumn`] or a [`MetaColumn`] acting on
//! the whole row (remove and undo buttons, status badges). Rendering walks the
//! current state of a [`TableEditor`] and calls the caller's renderers, which
//! produce values of any type `V`: markup strings, widget trees, terminal
//! lines. Renderers only feed back into the editor through the
//! [`CellUpdater`] they are handed.
//!
//! [`Layout::markup`] and [`CellColumn::text`] provide the plain HTML
//! renderers used when nothing else is configured.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Display;

use crate::editable::{CellEditStatus, EditStatus, EditableRow};
use crate::editor::{CellUpdater, TableEditor};
use crate::schema::{EditableColumn, TableRow};

/// The value of a cell together with the setter that edits it.
#[derive(Debug)]
pub struct CellState<'row, R: TableRow, T> {
    /// Current value of the cell.
    pub value: &'row T,
    /// Setter writing back into the editor.
    pub setter: CellUpdater<R, T>,
}

/// Renders a header cell from the column title.
pub type HeaderCellRenderer<V> = Box<dyn Fn(Option<&str>) -> V>;
/// Renders an editable cell.
pub type CellRenderer<R, T, V> =
    Box<dyn Fn(CellState<'_, R, T>, CellEditStatus<'_, T>, &EditStatus<R>) -> V>;
/// Renders the cell of a meta column.
pub type MetaCellRenderer<R, V> = Box<dyn Fn(&EditableRow<R>, &EditStatus<R>) -> V>;
/// Assembles the rendered cells of a row.
pub type RowRenderer<R, V> = Box<dyn Fn(Vec<V>, &EditStatus<R>) -> V>;
/// Assembles the rendered header cells and rows into a table.
pub type TableRenderer<V> = Box<dyn Fn(Vec<V>, Vec<V>) -> V>;

/// Type-erased editable column of a layout.
trait RenderCell<R: TableRow, V> {
    fn title(&self) -> Option<&str>;
    fn header(&self) -> Option<&HeaderCellRenderer<V>>;
    fn render(&self, editor: &TableEditor<R>, row: &EditableRow<R>) -> V;
}

/// An editable column with its cell renderer.
pub struct CellColumn<R: TableRow, T, V> {
    column: EditableColumn<R, T>,
    header: Option<HeaderCellRenderer<V>>,
    render: CellRenderer<R, T, V>,
}

impl<R: TableRow, T, V> CellColumn<R, T, V> {
    /// Bind `render` to the cells of `column`.
    pub fn new(
        column: EditableColumn<R, T>,
        render: impl Fn(CellState<'_, R, T>, CellEditStatus<'_, T>, &EditStatus<R>) -> V + 'static,
    ) -> Self {
        Self {
            column,
            header: None,
            render: Box::new(render),
        }
    }

    /// Render this column's header with `header` instead of the layout's default.
    #[must_use]
    pub fn with_header(mut self, header: impl Fn(Option<&str>) -> V + 'static) -> Self {
        self.header = Some(Box::new(header));
        self
    }
}

impl<R: TableRow + 'static, T: Display + 'static> CellColumn<R, T, String> {
    /// A read-only column rendering its value as a `<td>` cell.
    #[must_use]
    pub fn text(column: EditableColumn<R, T>) -> Self {
        Self::new(column, |cell, _, _| format!("<td>{}</td>", cell.value))
    }
}

impl<R: TableRow, T: PartialEq, V> RenderCell<R, V> for CellColumn<R, T, V> {
    fn title(&self) -> Option<&str> {
        self.column.title()
    }

    fn header(&self) -> Option<&HeaderCellRenderer<V>> {
        self.header.as_ref()
    }

    fn render(&self, editor: &TableEditor<R>, row: &EditableRow<R>) -> V {
        let state = CellState {
            value: self.column.get(row.current()),
            setter: editor.cell_updater(row.row_id(), &self.column),
        };
        (self.render)(state, row.cell_status(&self.column), row.status())
    }
}

/// A column acting on the whole row rather than on a field.
pub struct MetaColumn<R, V> {
    title: Option<String>,
    header: Option<HeaderCellRenderer<V>>,
    render: MetaCellRenderer<R, V>,
}

impl<R, V> MetaColumn<R, V> {
    /// Create a meta column rendering its cells with `render`.
    pub fn new(render: impl Fn(&EditableRow<R>, &EditStatus<R>) -> V + 'static) -> Self {
        Self {
            title: None,
            header: None,
            render: Box::new(render),
        }
    }

    /// Set the title of the column.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render this column's header with `header` instead of the layout's default.
    #[must_use]
    pub fn with_header(mut self, header: impl Fn(Option<&str>) -> V + 'static) -> Self {
        self.header = Some(Box::new(header));
        self
    }
}

/// A column of a [`Layout`].
pub enum LayoutColumn<R: TableRow, V> {
    /// A column editing one field.
    Editable(Box<dyn RenderCell<R, V>>),
    /// A column acting on the whole row.
    Meta(MetaColumn<R, V>),
}

impl<R: TableRow + 'static, T: PartialEq + 'static, V: 'static> From<CellColumn<R, T, V>>
    for LayoutColumn<R, V>
{
    fn from(column: CellColumn<R, T, V>) -> Self {
        Self::Editable(Box::new(column))
    }
}

impl<R: TableRow, V> From<MetaColumn<R, V>> for LayoutColumn<R, V> {
    fn from(column: MetaColumn<R, V>) -> Self {
        Self::Meta(column)
    }
}

impl<R: TableRow, V> LayoutColumn<R, V> {
    fn title(&self) -> Option<&str> {
        match self {
            Self::Editable(column) => column.title(),
            Self::Meta(column) => column.title.as_deref(),
        }
    }

    fn header(&self) -> Option<&HeaderCellRenderer<V>> {
        match self {
            Self::Editable(column) => column.header(),
            Self::Meta(column) => column.header.as_ref(),
        }
    }

    fn render_cell(&self, editor: &TableEditor<R>, row: &EditableRow<R>) -> V {
        match self {
            Self::Editable(column) => column.render(editor, row),
            Self::Meta(column) => (column.render)(row, row.status()),
        }
    }
}

/// The columns and renderers of a table view.
pub struct Layout<R: TableRow, V> {
    columns: Vec<LayoutColumn<R, V>>,
    header: HeaderCellRenderer<V>,
    row: RowRenderer<R, V>,
    table: TableRenderer<V>,
}

impl<R: TableRow, V> Layout<R, V> {
    /// Create an empty layout from its default header, row and table renderers.
    pub fn new(
        header: impl Fn(Option<&str>) -> V + 'static,
        row: impl Fn(Vec<V>, &EditStatus<R>) -> V + 'static,
        table: impl Fn(Vec<V>, Vec<V>) -> V + 'static,
    ) -> Self {
        Self {
            columns: Vec::new(),
            header: Box::new(header),
            row: Box::new(row),
            table: Box::new(table),
        }
    }

    /// Append a column.
    #[must_use]
    pub fn column(mut self, column: impl Into<LayoutColumn<R, V>>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Returns the number of columns.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the layout has no columns.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Render the current state of `editor`.
    ///
    /// Every row is rendered, removed ones included, so that renderers can
    /// style them from their [`EditStatus`].
    pub fn render(&self, editor: &TableEditor<R>) -> V {
        let state = editor.state();
        let header_cells: Vec<V> = self
            .columns
            .iter()
            .map(|column| {
                let header = column.header().unwrap_or(&self.header);
                header(column.title())
            })
            .collect();
        let rows: Vec<V> = state
            .iter()
            .map(|row| {
                let cells: Vec<V> = self
                    .columns
                    .iter()
                    .map(|column| column.render_cell(editor, row))
                    .collect();
                (self.row)(cells, row.status())
            })
            .collect();
        (self.table)(header_cells, rows)
    }
}

impl<R: TableRow> Layout<R, String> {
    /// An empty layout rendering plain HTML table markup.
    #[must_use]
    pub fn markup() -> Self {
        Self::new(
            |title| format!("<th>{}</th>", title.unwrap_or_default()),
            |cells, _| format!("<tr>{}</tr>", cells.concat()),
            |header_cells, rows| {
                format!(
                    "<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
                    header_cells.concat(),
                    rows.concat()
                )
            },
        )
    }
}

/// Space-separated CSS classes describing a row's edit status.
///
/// Empty for a clean row, otherwise a combination of `is-dirty`, `is-new`
/// and `is-removed`.
#[must_use]
pub fn edit_status_class_name<R>(status: &EditStatus<R>) -> String {
    [
        (status.is_dirty(), "is-dirty"),
        (status.is_new(), "is-new"),
        (status.is_removed(), "is-removed"),
    ]
    .into_iter()
    .filter_map(|(set, class)| set.then_some(class))
    .collect::<Vec<_>>()
    .join(" ")
}
