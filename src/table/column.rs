//! Column definitions for the data table.
//!
//! A [`ColumnDef`] names a column and describes how its header and cells are
//! rendered. Columns may be nested: a group column has child columns and its
//! header spans all of its leaves.

use std::fmt;
use std::sync::Arc;

/// Renders the cell content of a column for one source row.
pub type CellFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Definition of one table column, or of a group of columns.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::table::ColumnDef;
///
/// struct User { name: String, age: u32 }
///
/// let columns = vec![
///     ColumnDef::accessor("name", "Name", |u: &User| u.name.clone()),
///     ColumnDef::accessor("age", "Age", |u: &User| u.age.to_string()),
/// ];
/// assert_eq!(columns[0].id(), "name");
/// assert_eq!(columns[1].header(), Some("Age"));
/// ```
pub struct ColumnDef<T> {
    id: String,
    header: Option<String>,
    cell: Option<CellFn<T>>,
    columns: Vec<ColumnDef<T>>,
    group: bool,
}

impl<T> ColumnDef<T> {
    /// A leaf column with a header and a cell renderer.
    pub fn accessor<F>(id: impl Into<String>, header: impl Into<String>, cell: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: Some(header.into()),
            cell: Some(Arc::new(cell)),
            columns: Vec::new(),
            group: false,
        }
    }

    /// A leaf column without header content.
    pub fn display<F>(id: impl Into<String>, cell: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: None,
            cell: Some(Arc::new(cell)),
            columns: Vec::new(),
            group: false,
        }
    }

    /// A group column whose header spans its children.
    ///
    /// ```rust
    /// use bubbletea_datatable::table::ColumnDef;
    ///
    /// let group: ColumnDef<(String, String)> = ColumnDef::group("person", "Person", vec![
    ///     ColumnDef::accessor("first", "First", |r: &(String, String)| r.0.clone()),
    ///     ColumnDef::accessor("last", "Last", |r: &(String, String)| r.1.clone()),
    /// ]);
    /// assert!(group.is_group());
    /// assert_eq!(group.leaf_count(), 2);
    /// ```
    pub fn group(id: impl Into<String>, header: impl Into<String>, columns: Vec<ColumnDef<T>>) -> Self {
        Self {
            id: id.into(),
            header: Some(header.into()),
            cell: None,
            columns,
            group: true,
        }
    }

    /// Sets or replaces the header text.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// The column id. Widths and cells are keyed by it.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The header text, if any.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Child columns of a group; empty for leaf columns.
    pub fn columns(&self) -> &[ColumnDef<T>] {
        &self.columns
    }

    /// Whether this column was defined as a group.
    pub fn is_group(&self) -> bool {
        self.group
    }

    /// Number of leaf columns under this column (1 for a leaf).
    pub fn leaf_count(&self) -> usize {
        if !self.group {
            1
        } else {
            self.columns.iter().map(ColumnDef::leaf_count).sum()
        }
    }

    /// Depth of the column tree rooted here (1 for a leaf).
    pub fn depth(&self) -> usize {
        1 + self.columns.iter().map(ColumnDef::depth).max().unwrap_or(0)
    }

    /// Renders this column's cell for a source row. Groups render nothing.
    pub fn render_cell(&self, row: &T) -> String {
        self.cell.as_ref().map(|cell| cell(row)).unwrap_or_default()
    }

    pub(crate) fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ColumnDef<T>>) {
        if !self.group {
            out.push(self);
        } else {
            for child in &self.columns {
                child.collect_leaves(out);
            }
        }
    }

    /// Ids of the leaf columns under this column, left to right.
    pub fn leaf_ids(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves.into_iter().map(ColumnDef::id).collect()
    }
}

impl<T> Clone for ColumnDef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            cell: self.cell.clone(),
            columns: self.columns.clone(),
            group: self.group,
        }
    }
}

impl<T> fmt::Debug for ColumnDef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("columns", &self.columns)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> ColumnDef<u32> {
        ColumnDef::accessor(id, id.to_uppercase(), |n: &u32| n.to_string())
    }

    #[test]
    fn test_leaf_column() {
        let col = leaf("a");
        assert!(!col.is_group());
        assert_eq!(col.leaf_count(), 1);
        assert_eq!(col.depth(), 1);
        assert_eq!(col.render_cell(&7), "7");
    }

    #[test]
    fn test_display_column_has_no_header() {
        let col: ColumnDef<u32> = ColumnDef::display("actions", |_| "...".to_string());
        assert_eq!(col.header(), None);
        assert_eq!(col.with_header("Actions").header(), Some("Actions"));
    }

    #[test]
    fn test_nested_group_counts_leaves() {
        let col = ColumnDef::group(
            "outer",
            "Outer",
            vec![leaf("a"), ColumnDef::group("inner", "Inner", vec![leaf("b"), leaf("c")])],
        );
        assert_eq!(col.leaf_count(), 3);
        assert_eq!(col.depth(), 3);
        assert_eq!(col.leaf_ids(), vec!["a", "b", "c"]);
        assert_eq!(col.render_cell(&1), "");
    }
}
