//! Row, header and pagination derivation for the data table.
//!
//! [`TableModel`] turns source data and column definitions into what the table
//! widget draws: header groups with colspans and placeholders, the rows of the
//! current page with their visible cells, and the pagination state the
//! paginator reads and advances.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::column::ColumnDef;
use super::error::TableError;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Computes a row id from the source row and its index in the data.
pub type RowIdFn<T> = Arc<dyn Fn(&T, usize) -> String + Send + Sync>;

/// Which row derivations the model performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowModels {
    /// Derive rows from the source data. Without it the model has no rows.
    pub core: bool,
    /// Slice the core rows to the current page.
    pub pagination: bool,
}

impl Default for RowModels {
    fn default() -> Self {
        Self {
            core: true,
            pagination: true,
        }
    }
}

/// Pagination state: 0-based page index and rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// The current page, starting at 0.
    pub page_index: usize,
    /// Rows shown per page, at least 1.
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header id: the column id, or a generated id for placeholders.
    pub id: String,
    /// Id of the column this header belongs to.
    pub column_id: String,
    /// Number of leaf columns the header spans.
    pub col_span: usize,
    /// True for filler headers above a leaf that sits shallower than the tree.
    pub is_placeholder: bool,
    /// Header text; `None` for placeholders and columns without a header.
    pub content: Option<String>,
}

/// One row of header cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderGroup {
    /// Group id, the depth level as a string.
    pub id: String,
    /// Depth level, 0 at the top.
    pub depth: usize,
    /// Headers left to right.
    pub headers: Vec<Header>,
}

/// A rendered cell of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// `"{row_id}_{column_id}"`.
    pub id: String,
    /// The leaf column this cell belongs to.
    pub column_id: String,
    /// Rendered content.
    pub content: String,
}

/// A row of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Stable row id.
    pub id: String,
    /// Index of the source row in the data.
    pub index: usize,
    /// One cell per leaf column, left to right.
    pub cells: Vec<Cell>,
}

/// Derives rows, header groups and pagination from data and column definitions.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::table::{ColumnDef, RowModels, TableModel};
///
/// let columns = vec![ColumnDef::accessor("n", "N", |n: &u32| n.to_string())];
/// let data: Vec<u32> = (1..=25).collect();
/// let mut model = TableModel::new(data, columns, RowModels::default()).unwrap();
///
/// assert_eq!(model.page_count(), 3);
/// assert_eq!(model.rows().len(), 10);
///
/// model.last_page();
/// assert_eq!(model.rows().len(), 5);
/// assert_eq!(model.rows()[0].id, "20");
/// ```
pub struct TableModel<T> {
    data: Vec<T>,
    columns: Vec<ColumnDef<T>>,
    row_models: RowModels,
    pagination: PaginationState,
    row_id: Option<RowIdFn<T>>,
}

impl<T> TableModel<T> {
    /// Builds a model, validating the column tree.
    ///
    /// Column ids must be non-empty and unique across the whole tree, and
    /// every group needs at least one child.
    pub fn new(data: Vec<T>, columns: Vec<ColumnDef<T>>, row_models: RowModels) -> Result<Self, TableError> {
        validate_columns(&columns)?;
        debug!(
            rows = data.len(),
            columns = columns.len(),
            core = row_models.core,
            pagination = row_models.pagination,
            "built table model"
        );
        Ok(Self {
            data,
            columns,
            row_models,
            pagination: PaginationState::default(),
            row_id: None,
        })
    }

    /// Uses a custom row id instead of the row's index.
    pub fn with_row_id<F>(mut self, row_id: F) -> Self
    where
        F: Fn(&T, usize) -> String + Send + Sync + 'static,
    {
        self.row_id = Some(Arc::new(row_id));
        self
    }

    /// Sets the page size (builder pattern).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// The source data.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Replaces the source data, keeping the page index in range.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.clamp_page_index();
    }

    /// The top-level column definitions as supplied.
    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    /// The leaf columns, left to right.
    pub fn leaf_columns(&self) -> Vec<&ColumnDef<T>> {
        let mut leaves = Vec::new();
        for column in &self.columns {
            column.collect_leaves(&mut leaves);
        }
        leaves
    }

    /// The enabled row derivations.
    pub fn row_models(&self) -> RowModels {
        self.row_models
    }

    /// Header rows, top to bottom. There is always at least one.
    ///
    /// Group headers sit on the level of their depth and span their leaves.
    /// Leaves always sit on the last level; a leaf shallower than the tree gets
    /// placeholder headers on the levels above it.
    pub fn header_groups(&self) -> Vec<HeaderGroup> {
        let levels = self
            .columns
            .iter()
            .map(ColumnDef::depth)
            .max()
            .unwrap_or(1);

        (0..levels)
            .map(|level| {
                let mut headers = Vec::new();
                for column in &self.columns {
                    headers_at(column, 0, level, levels, &mut headers);
                }
                HeaderGroup {
                    id: level.to_string(),
                    depth: level,
                    headers,
                }
            })
            .collect()
    }

    /// Rows produced by the core derivation, ignoring pagination.
    pub fn core_row_count(&self) -> usize {
        if self.row_models.core {
            self.data.len()
        } else {
            0
        }
    }

    /// Rows of the current page with their visible cells.
    pub fn rows(&self) -> Vec<Row> {
        let total = self.core_row_count();
        let (start, end) = if self.row_models.pagination {
            let start = (self.pagination.page_index * self.pagination.page_size).min(total);
            (start, (start + self.pagination.page_size).min(total))
        } else {
            (0, total)
        };

        let leaves = self.leaf_columns();
        self.data[start..end]
            .iter()
            .enumerate()
            .map(|(offset, source)| {
                let index = start + offset;
                let id = match &self.row_id {
                    Some(row_id) => row_id(source, index),
                    None => index.to_string(),
                };
                let cells = leaves
                    .iter()
                    .map(|column| Cell {
                        id: format!("{}_{}", id, column.id()),
                        column_id: column.id().to_string(),
                        content: column.render_cell(source),
                    })
                    .collect();
                Row { id, index, cells }
            })
            .collect()
    }

    /// The current pagination state.
    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    /// The current page, starting at 0.
    pub fn page_index(&self) -> usize {
        self.pagination.page_index
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.pagination.page_size
    }

    /// Number of pages; 1 when there are no rows or pagination is disabled.
    pub fn page_count(&self) -> usize {
        let total = self.core_row_count();
        if !self.row_models.pagination || total == 0 {
            1
        } else {
            total.div_ceil(self.pagination.page_size)
        }
    }

    /// Whether a previous page exists.
    pub fn can_previous_page(&self) -> bool {
        self.pagination.page_index > 0
    }

    /// Whether a next page exists.
    pub fn can_next_page(&self) -> bool {
        self.pagination.page_index + 1 < self.page_count()
    }

    /// Moves to the previous page, if any.
    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.set_page_index(self.pagination.page_index - 1);
        }
    }

    /// Moves to the next page, if any.
    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.set_page_index(self.pagination.page_index + 1);
        }
    }

    /// Moves to the first page.
    pub fn first_page(&mut self) {
        self.set_page_index(0);
    }

    /// Moves to the last page.
    pub fn last_page(&mut self) {
        self.set_page_index(self.page_count() - 1);
    }

    /// Sets the page index, clamped to the existing pages.
    pub fn set_page_index(&mut self, page_index: usize) {
        let clamped = page_index.min(self.page_count() - 1);
        if clamped != self.pagination.page_index {
            debug!(from = self.pagination.page_index, to = clamped, "page changed");
        }
        self.pagination.page_index = clamped;
    }

    /// Sets the page size (minimum 1) and moves to the page that holds the
    /// first row previously on screen.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        let first_row = self.pagination.page_index * self.pagination.page_size;
        self.pagination.page_size = page_size;
        self.pagination.page_index = first_row / page_size;
        self.clamp_page_index();
        debug!(page_size, page_index = self.pagination.page_index, "page size changed");
    }

    fn clamp_page_index(&mut self) {
        let last = self.page_count() - 1;
        if self.pagination.page_index > last {
            self.pagination.page_index = last;
        }
    }
}

impl<T> Clone for TableModel<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            columns: self.columns.clone(),
            row_models: self.row_models,
            pagination: self.pagination,
            row_id: self.row_id.clone(),
        }
    }
}

impl<T> fmt::Debug for TableModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableModel")
            .field("rows", &self.data.len())
            .field("columns", &self.columns)
            .field("row_models", &self.row_models)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}

/// Pushes the headers `column` contributes to header level `level`.
///
/// Levels are assigned top-down: a group sits on the level of its own depth,
/// so in a tree deeper than the group the levels below it up to its leaves are
/// placeholders. Table libraries that build header groups bottom-up place such
/// a group directly above its leaves with the placeholder above it instead.
fn headers_at<T>(column: &ColumnDef<T>, depth: usize, level: usize, levels: usize, out: &mut Vec<Header>) {
    if !column.is_group() {
        if level + 1 == levels {
            out.push(Header {
                id: column.id().to_string(),
                column_id: column.id().to_string(),
                col_span: 1,
                is_placeholder: false,
                content: column.header().map(str::to_string),
            });
        } else {
            out.push(Header {
                id: format!("{}_{}_placeholder", level, column.id()),
                column_id: column.id().to_string(),
                col_span: 1,
                is_placeholder: true,
                content: None,
            });
        }
        return;
    }

    if level == depth {
        out.push(Header {
            id: column.id().to_string(),
            column_id: column.id().to_string(),
            col_span: column.leaf_count(),
            is_placeholder: false,
            content: column.header().map(str::to_string),
        });
    } else {
        for child in column.columns() {
            headers_at(child, depth + 1, level, levels, out);
        }
    }
}

fn validate_columns<T>(columns: &[ColumnDef<T>]) -> Result<(), TableError> {
    fn walk<'a, T>(column: &'a ColumnDef<T>, seen: &mut HashSet<&'a str>) -> Result<(), TableError> {
        if column.id().is_empty() {
            return Err(TableError::EmptyColumnId);
        }
        if !seen.insert(column.id()) {
            return Err(TableError::DuplicateColumnId {
                id: column.id().to_string(),
            });
        }
        if column.is_group() && column.columns().is_empty() {
            return Err(TableError::EmptyGroup {
                id: column.id().to_string(),
            });
        }
        column.columns().iter().try_for_each(|child| walk(child, seen))
    }

    let mut seen = HashSet::new();
    columns.iter().try_for_each(|column| walk(column, &mut seen))
}
