//! Column geometry and hit testing.
//!
//! Every line of the table is a sequence of cells, each padded by one space on
//! both sides and separated by `│`. The first cell is the checkbox column. All
//! x positions here are relative to the table's left edge, which sits one cell
//! inside the container border.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::render::{BodyView, TableView};
use super::style::{CHECKED, ELLIPSIS};

/// Horizontal padding on each side of a cell's content.
pub(crate) const CELL_PADDING: usize = 1;
/// Width of the `│` between cells.
pub(crate) const SEPARATOR: usize = 1;

/// Where a leaf column's content sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnSpan {
    pub column_id: String,
    /// Content start, table-relative.
    pub start: usize,
    /// Content width.
    pub width: usize,
}

impl ColumnSpan {
    fn cell_start(&self) -> usize {
        self.start - CELL_PADDING
    }

    fn cell_end(&self) -> usize {
        self.start + self.width + CELL_PADDING
    }
}

/// A line of the table, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line {
    Header(usize),
    Rule,
    Row(usize),
    Empty,
}

/// What sits under a table position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Hit {
    /// A header cell, by header id.
    Header(String),
    SelectAll,
    /// A row's checkbox cell, by row id.
    RowCheckbox(String),
    /// Anything else inside the table.
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub checkbox_width: usize,
    pub columns: Vec<ColumnSpan>,
    pub width: usize,
    pub lines: Vec<Line>,
}

impl Layout {
    pub(crate) fn new(view: &TableView) -> Self {
        let mut checkbox_width = CHECKED.width();
        let leaves = view
            .header_rows
            .last()
            .map(|row| row.cells.as_slice())
            .unwrap_or_default();

        let rows = view.rows();
        let mut widths: Vec<usize> = leaves
            .iter()
            .enumerate()
            .map(|(i, header)| {
                header.width.map(usize::from).unwrap_or_else(|| {
                    let header_width = header.content.as_deref().map(display_width).unwrap_or(0);
                    rows.iter()
                        .filter_map(|row| row.cells.get(i))
                        .map(|cell| display_width(&cell.content))
                        .fold(header_width, usize::max)
                        .max(1)
                })
            })
            .collect();

        // An upper header with a stored width wider than its leaves widens its last leaf.
        let upper = view.header_rows.len().saturating_sub(1);
        for row in &view.header_rows[..upper] {
            let mut first = 0;
            for header in &row.cells {
                let last = first + header.col_span - 1;
                if let Some(stored) = header.width.map(usize::from) {
                    let extent = span_width(&widths[first..=last]);
                    if stored > extent {
                        widths[last] += stored - extent;
                    }
                }
                first += header.col_span;
            }
        }

        if let BodyView::Empty { message, .. } = &view.body {
            let inner = checkbox_width + widths.iter().map(|w| w + 2 * CELL_PADDING + SEPARATOR).sum::<usize>();
            let needed = display_width(message);
            if needed > inner {
                match widths.last_mut() {
                    Some(last) => *last += needed - inner,
                    None => checkbox_width += needed - inner,
                }
            }
        }

        let mut columns = Vec::with_capacity(leaves.len());
        let mut x = checkbox_width + 2 * CELL_PADDING;
        for (header, width) in leaves.iter().zip(widths) {
            x += SEPARATOR;
            columns.push(ColumnSpan {
                column_id: header.column_id.clone(),
                start: x + CELL_PADDING,
                width,
            });
            x += width + 2 * CELL_PADDING;
        }

        let mut lines: Vec<Line> = (0..view.header_rows.len()).map(Line::Header).collect();
        lines.push(Line::Rule);
        match &view.body {
            BodyView::Rows(rows) => lines.extend((0..rows.len()).map(Line::Row)),
            BodyView::Empty { .. } => lines.push(Line::Empty),
        }

        Self {
            checkbox_width,
            columns,
            width: x,
            lines,
        }
    }

    /// Content start and width of the cell spanning `col_span` leaves from `first`.
    pub(crate) fn span(&self, first: usize, col_span: usize) -> (usize, usize) {
        match (self.columns.get(first), self.columns.get(first + col_span - 1)) {
            (Some(a), Some(b)) => (a.start, b.start + b.width - a.start),
            _ => (CELL_PADDING, self.checkbox_width),
        }
    }

    /// The end of the checkbox cell, table-relative.
    fn checkbox_end(&self) -> usize {
        self.checkbox_width + 2 * CELL_PADDING
    }

    pub(crate) fn hit(&self, view: &TableView, x: usize, line: usize) -> Hit {
        match self.lines.get(line) {
            Some(Line::Header(level)) => {
                if x < self.checkbox_end() {
                    return if view.header_rows[*level].select_all.is_some() {
                        Hit::SelectAll
                    } else {
                        Hit::Table
                    };
                }
                let mut first = 0;
                for header in &view.header_rows[*level].cells {
                    let last = first + header.col_span - 1;
                    if let (Some(a), Some(b)) = (self.columns.get(first), self.columns.get(last)) {
                        if x >= a.cell_start() && x < b.cell_end() {
                            if header.is_placeholder {
                                return Hit::Table;
                            }
                            return Hit::Header(header.id.clone());
                        }
                    }
                    first += header.col_span;
                }
                Hit::Table
            }
            Some(Line::Row(i)) if x < self.checkbox_end() => match view.rows().get(*i) {
                Some(row) => Hit::RowCheckbox(row.id.clone()),
                None => Hit::Table,
            },
            _ => Hit::Table,
        }
    }
}

fn span_width(widths: &[usize]) -> usize {
    let gaps = widths.len().saturating_sub(1);
    widths.iter().sum::<usize>() + gaps * (2 * CELL_PADDING + SEPARATOR)
}

/// Display width of text as it will be drawn on one line.
pub(crate) fn display_width(s: &str) -> usize {
    one_line(s).width()
}

fn one_line(s: &str) -> String {
    s.replace(['\n', '\r', '\t'], " ")
}

/// Cuts text to `width` columns, ending in `…` when it does not fit.
/// Returns the text and the padding needed to fill the width.
pub(crate) fn fit(s: &str, width: usize) -> (String, usize) {
    let s = one_line(s);
    let full = s.width();
    if full <= width {
        return (s, width - full);
    }
    if width == 0 {
        return (String::new(), 0);
    }

    let budget = width - ELLIPSIS.width();
    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w > budget {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push_str(ELLIPSIS);
    (out, width - used - ELLIPSIS.width())
}
