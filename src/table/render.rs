//! The table as a render tree.
//!
//! [`TableView`] is what the widget draws: header rows, body rows and the
//! empty-state row, each cell carrying the width override that applies to it.
//! It is a pure function of the table model and the widget's state, so tests can
//! inspect it the way one inspects a DOM.

use std::collections::HashMap;

use super::model::TableModel;
use super::style::NO_RESULTS;

/// A checkbox cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckboxView {
    /// Whether the box is ticked.
    pub checked: bool,
    /// Whether clicking the box does anything.
    pub interactive: bool,
}

/// A header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCellView {
    /// Header id; width overrides for header cells are keyed by it.
    pub id: String,
    /// Column the header belongs to.
    pub column_id: String,
    /// Leaf columns spanned.
    pub col_span: usize,
    /// Stored width for this header, if any.
    pub width: Option<u16>,
    /// Header text; `None` renders an empty cell.
    pub content: Option<String>,
    /// Filler header above a shallower leaf.
    pub is_placeholder: bool,
}

/// A header row. Only the first one carries the select-all checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRowView {
    /// The select-all checkbox cell.
    pub select_all: Option<CheckboxView>,
    /// Header cells left to right.
    pub cells: Vec<HeaderCellView>,
}

impl HeaderRowView {
    /// Number of cells in the row, counting the checkbox cell.
    pub fn cell_count(&self) -> usize {
        self.cells.len() + usize::from(self.select_all.is_some())
    }
}

/// A body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyCellView {
    /// `"{row_id}_{column_id}"`.
    pub id: String,
    /// Column the cell belongs to; width overrides are keyed by it.
    pub column_id: String,
    /// Stored width for the column, if any.
    pub width: Option<u16>,
    /// Rendered content.
    pub content: String,
}

/// A body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Row id.
    pub id: String,
    /// The "selected" marker.
    pub selected: bool,
    /// The row-select checkbox.
    pub checkbox: CheckboxView,
    /// Cells left to right.
    pub cells: Vec<BodyCellView>,
}

/// The table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// Rows of the current page.
    Rows(Vec<RowView>),
    /// Placeholder row shown when the current page has no rows.
    Empty {
        /// Columns spanned: the number of top-level columns plus the checkbox column.
        col_span: usize,
        /// The message shown.
        message: String,
    },
}

/// Everything the table draws, before layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Header rows, top to bottom. Never empty.
    pub header_rows: Vec<HeaderRowView>,
    /// The body.
    pub body: BodyView,
}

impl TableView {
    /// Rows of the body; empty for the empty state.
    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            BodyView::Rows(rows) => rows,
            BodyView::Empty { .. } => &[],
        }
    }

    /// Ids of the rows carrying the "selected" marker.
    pub fn selected_row_ids(&self) -> Vec<&str> {
        self.rows()
            .iter()
            .filter(|row| row.selected)
            .map(|row| row.id.as_str())
            .collect()
    }

    /// Number of lines the body occupies.
    pub fn body_lines(&self) -> usize {
        match &self.body {
            BodyView::Rows(rows) => rows.len(),
            BodyView::Empty { .. } => 1,
        }
    }
}

pub(crate) fn render<T>(
    table: &TableModel<T>,
    selected_row: Option<&str>,
    column_widths: &HashMap<String, u16>,
) -> TableView {
    let groups = table.header_groups();
    let header_rows = groups
        .into_iter()
        .enumerate()
        .map(|(level, group)| HeaderRowView {
            select_all: (level == 0).then_some(CheckboxView {
                checked: false,
                interactive: false,
            }),
            cells: group
                .headers
                .into_iter()
                .map(|header| HeaderCellView {
                    width: column_widths.get(&header.id).copied(),
                    id: header.id,
                    column_id: header.column_id,
                    col_span: header.col_span,
                    content: header.content,
                    is_placeholder: header.is_placeholder,
                })
                .collect(),
        })
        .collect();

    let rows = table.rows();
    let body = if rows.is_empty() {
        BodyView::Empty {
            col_span: table.columns().len() + 1,
            message: NO_RESULTS.to_string(),
        }
    } else {
        BodyView::Rows(
            rows.into_iter()
                .map(|row| {
                    let selected = selected_row == Some(row.id.as_str());
                    RowView {
                        selected,
                        checkbox: CheckboxView {
                            checked: selected,
                            interactive: true,
                        },
                        cells: row
                            .cells
                            .into_iter()
                            .map(|cell| BodyCellView {
                                width: column_widths.get(&cell.column_id).copied(),
                                id: cell.id,
                                column_id: cell.column_id,
                                content: cell.content,
                            })
                            .collect(),
                        id: row.id,
                    }
                })
                .collect(),
        )
    };

    TableView { header_rows, body }
}
