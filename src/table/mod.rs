//! An interactive data table with row selection, pagination and column resizing.
//!
//! The table draws a bordered grid: a header row with an (inert) select-all
//! checkbox, one body row per row of the current page with a row-select
//! checkbox, and a pagination bar underneath. The user can:
//!
//! - tick a row's checkbox to select it; ticking it again clears the selection,
//!   and at most one row is selected at a time;
//! - press on a header cell and drag to set that column's width;
//! - page through the data with the paginator's keys.
//!
//! # Resizing
//!
//! While a resize gesture is active, every pointer move sets the column's width
//! to the distance from the table's left edge to the pointer. This is an
//! absolute offset, not a delta from where the drag started, so it tracks the
//! pointer naturally only for the leftmost column.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_datatable::table::{ColumnDef, Model};
//!
//! struct Payment { id: &'static str, amount: u32 }
//!
//! let columns = vec![
//!     ColumnDef::accessor("id", "Id", |p: &Payment| p.id.to_string()),
//!     ColumnDef::accessor("amount", "Amount", |p: &Payment| p.amount.to_string()),
//! ];
//! let data = vec![Payment { id: "a1", amount: 316 }, Payment { id: "b2", amount: 242 }];
//! let mut table = Model::new(columns, data).unwrap();
//!
//! table.handle_row_selection("1");
//! assert_eq!(table.selected_row(), Some("1"));
//!
//! table.handle_mouse_down("amount");
//! table.handle_mouse_move(25);
//! table.handle_mouse_up();
//! assert_eq!(table.column_width("amount"), Some(24));
//! ```

mod column;
mod error;
mod layout;
mod model;
mod render;
mod style;

#[cfg(test)]
mod tests;

pub use column::{CellFn, ColumnDef};
pub use error::TableError;
pub use model::{
    Cell, Header, HeaderGroup, PaginationState, Row, RowIdFn, RowModels, TableModel,
    DEFAULT_PAGE_SIZE,
};
pub use render::{
    BodyCellView, BodyView, CheckboxView, HeaderCellView, HeaderRowView, RowView, TableView,
};
pub use style::{Styles, CHECKED, ELLIPSIS, NO_RESULTS, UNCHECKED};

use std::collections::HashMap;
use std::fmt;

use bubbletea_rs::{Cmd, KeyMsg, MouseMsg, Msg};
use crossterm::event::{MouseButton, MouseEventKind};
use lipgloss_extras::lipgloss::Style;
use tracing::{debug, trace};

use self::layout::{fit, Hit, Layout, Line, CELL_PADDING};
use crate::paginator::Model as Paginator;
use crate::Component;

/// The kind of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Primary button pressed.
    Down,
    /// Primary button released.
    Up,
    /// Pointer moved with the primary button held.
    Drag,
    /// Pointer moved with no button held.
    Moved,
    /// Wheel scrolled up.
    ScrollUp,
    /// Wheel scrolled down.
    ScrollDown,
}

/// A pointer event at a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Screen column.
    pub x: u16,
    /// Screen row.
    pub y: u16,
}

impl PointerEvent {
    /// Creates a pointer event.
    pub fn new(kind: PointerKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }

    /// Translates a crossterm mouse event kind. Buttons other than the left
    /// one are ignored.
    pub fn from_mouse(kind: MouseEventKind, x: u16, y: u16) -> Option<Self> {
        let kind = match kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
            MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
            MouseEventKind::Drag(MouseButton::Left) => PointerKind::Drag,
            MouseEventKind::Moved => PointerKind::Moved,
            MouseEventKind::ScrollUp => PointerKind::ScrollUp,
            MouseEventKind::ScrollDown => PointerKind::ScrollDown,
            _ => return None,
        };
        Some(Self { kind, x, y })
    }
}

/// The interactive data table widget.
pub struct Model<T> {
    table: TableModel<T>,
    paginator: Paginator,
    styles: Styles,
    selected_row: Option<String>,
    column_widths: HashMap<String, u16>,
    resizing_column_id: Option<String>,
    origin: (u16, u16),
    width: Option<u16>,
    max_height: Option<usize>,
    scroll_offset: usize,
    focus: bool,
}

impl<T> Model<T> {
    /// Creates a table over `data` with core and paginated row derivation.
    ///
    /// Fails when the column definitions are malformed (empty or duplicate
    /// ids, or groups without children).
    pub fn new(columns: Vec<ColumnDef<T>>, data: Vec<T>) -> Result<Self, TableError> {
        let table = TableModel::new(data, columns, RowModels::default())?;
        Ok(Self::from_table(table))
    }

    /// Wraps an existing table model.
    pub fn from_table(table: TableModel<T>) -> Self {
        Self {
            table,
            paginator: Paginator::new(),
            styles: Styles::default(),
            selected_row: None,
            column_widths: HashMap::new(),
            resizing_column_id: None,
            origin: (0, 0),
            width: None,
            max_height: None,
            scroll_offset: 0,
            focus: false,
        }
    }

    /// Sets the page size (builder pattern).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.table.set_page_size(page_size);
        self
    }

    /// Limits the table to `lines` visible lines; the rest scrolls (builder pattern).
    pub fn with_max_height(mut self, lines: usize) -> Self {
        self.max_height = Some(lines.max(1));
        self
    }

    /// Sets the styles (builder pattern).
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the pagination control (builder pattern).
    pub fn with_paginator(mut self, paginator: Paginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Uses a custom row id instead of the row's index (builder pattern).
    pub fn with_row_id<F>(mut self, row_id: F) -> Self
    where
        F: Fn(&T, usize) -> String + Send + Sync + 'static,
    {
        self.table = self.table.with_row_id(row_id);
        self
    }

    /// Sets the screen position of the container's top-left corner (builder pattern).
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin = (x, y);
        self
    }

    /// Sets the screen position of the container's top-left corner.
    ///
    /// Hosts call this when they lay the table out, so pointer positions can be
    /// mapped onto the table.
    pub fn set_origin(&mut self, x: u16, y: u16) {
        self.origin = (x, y);
    }

    /// The screen position of the container's top-left corner.
    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    /// Sets the width of the container the table is drawn in (builder pattern).
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the width of the container the table is drawn in.
    ///
    /// Pointer moves anywhere across this width reach a resize gesture, so a
    /// column can be dragged wider than the table currently is. The container
    /// is never narrower than the bordered table.
    pub fn set_width(&mut self, width: u16) {
        self.width = Some(width);
    }

    /// The table model.
    pub fn table_model(&self) -> &TableModel<T> {
        &self.table
    }

    /// The table model, for changing data or pagination.
    pub fn table_model_mut(&mut self) -> &mut TableModel<T> {
        &mut self.table
    }

    /// The pagination control.
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// The styles.
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Id of the selected row, if any. It may be on another page.
    pub fn selected_row(&self) -> Option<&str> {
        self.selected_row.as_deref()
    }

    /// Stored column widths, by column or header id.
    pub fn column_widths(&self) -> &HashMap<String, u16> {
        &self.column_widths
    }

    /// Stored width of one column.
    pub fn column_width(&self, id: &str) -> Option<u16> {
        self.column_widths.get(id).copied()
    }

    /// Id of the column being resized, if a gesture is active.
    pub fn resizing_column_id(&self) -> Option<&str> {
        self.resizing_column_id.as_deref()
    }

    /// Whether a resize gesture is active.
    pub fn is_resizing(&self) -> bool {
        self.resizing_column_id.is_some()
    }

    /// Lines scrolled off the top when a maximum height is set.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Toggles selection of a row: selects it, or clears the selection if it
    /// is the selected row.
    pub fn handle_row_selection(&mut self, row_id: &str) {
        if self.selected_row.as_deref() == Some(row_id) {
            debug!(row_id, "row deselected");
            self.selected_row = None;
        } else {
            debug!(row_id, previous = ?self.selected_row, "row selected");
            self.selected_row = Some(row_id.to_string());
        }
    }

    /// Starts a resize gesture on a column.
    pub fn handle_mouse_down(&mut self, column_id: &str) {
        debug!(column_id, "resize started");
        self.resizing_column_id = Some(column_id.to_string());
    }

    /// Sets the resized column's width to the pointer's distance from the
    /// table's left edge. Does nothing when no gesture is active.
    pub fn handle_mouse_move(&mut self, x: u16) {
        let Some(column_id) = &self.resizing_column_id else {
            return;
        };
        let offset_x = x.saturating_sub(self.table_left());
        trace!(column_id = %column_id, width = offset_x, "resizing column");
        self.column_widths.insert(column_id.clone(), offset_x);
    }

    /// Ends the resize gesture. The last width stays.
    pub fn handle_mouse_up(&mut self) {
        if let Some(column_id) = self.resizing_column_id.take() {
            debug!(
                column_id = %column_id,
                width = ?self.column_widths.get(&column_id),
                "resize finished"
            );
        }
    }

    /// The table as a render tree.
    pub fn render(&self) -> TableView {
        render::render(&self.table, self.selected_row.as_deref(), &self.column_widths)
    }

    /// Applies a pointer event.
    ///
    /// Only events inside the container are seen: a release outside it leaves
    /// a resize gesture active.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let view = self.render();
        let layout = Layout::new(&view);
        let visible = self.visible_lines(&layout);

        let (ox, oy) = (usize::from(self.origin.0), usize::from(self.origin.1));
        let (x, y) = (usize::from(event.x), usize::from(event.y));
        let width = self.container_width(&layout);
        let inside = x >= ox && x < ox + width && y >= oy && y < oy + visible + 2;
        if !inside {
            trace!(?event, "pointer event outside table");
            return;
        }

        match event.kind {
            PointerKind::Down => {
                // Border cells are part of the container but not of the table.
                let in_table = x > ox && x <= ox + layout.width && y > oy && y <= oy + visible;
                if !in_table {
                    return;
                }
                let line = y - oy - 1 + self.first_visible_line(&layout);
                match layout.hit(&view, x - ox - 1, line) {
                    Hit::Header(id) => self.handle_mouse_down(&id),
                    Hit::RowCheckbox(row_id) => self.handle_row_selection(&row_id),
                    Hit::SelectAll | Hit::Table => {}
                }
            }
            PointerKind::Drag | PointerKind::Moved => self.handle_mouse_move(event.x),
            PointerKind::Up => self.handle_mouse_up(),
            PointerKind::ScrollUp => self.scroll_by(&layout, -1),
            PointerKind::ScrollDown => self.scroll_by(&layout, 1),
        }
    }

    /// Handles bubbletea messages: mouse events always, paging keys while focused.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(mouse) = msg.downcast_ref::<MouseMsg>() {
            if let Some(event) = PointerEvent::from_mouse(mouse.button, mouse.x, mouse.y) {
                self.handle_pointer(event);
            }
        } else if self.focus && msg.downcast_ref::<KeyMsg>().is_some() {
            self.paginator.update(msg, &mut self.table);
        }
        None
    }

    /// Renders the bordered table followed by the pagination bar.
    pub fn view(&self) -> String {
        let view = self.render();
        let layout = Layout::new(&view);
        let visible = self.visible_lines(&layout);
        let border = |s: &str| self.styles.border.render(s);

        let mut lines = Vec::with_capacity(visible + 3);
        lines.push(border(&format!("╭{}╮", "─".repeat(layout.width))));
        let first = self.first_visible_line(&layout);
        for line in layout.lines.iter().skip(first).take(visible) {
            let inner = match line {
                Line::Header(level) => self.draw_header(&view, &layout, *level),
                Line::Rule => {
                    lines.push(self.draw_rule(&layout));
                    continue;
                }
                Line::Row(i) => self.draw_row(&view.rows()[*i], &layout),
                Line::Empty => self.draw_empty(&view, &layout),
            };
            lines.push(format!("{}{}{}", border("│"), inner, border("│")));
        }
        lines.push(border(&format!("╰{}╯", "─".repeat(layout.width))));
        lines.push(self.paginator.view(&self.table, &self.styles));
        lines.join("\n")
    }

    fn container_width(&self, layout: &Layout) -> usize {
        let table = layout.width + 2;
        self.width.map_or(table, |w| usize::from(w).max(table))
    }

    fn table_left(&self) -> u16 {
        self.origin.0.saturating_add(1)
    }

    fn visible_lines(&self, layout: &Layout) -> usize {
        let total = layout.lines.len();
        match self.max_height {
            Some(max) => total.min(max),
            None => total,
        }
    }

    // The stored offset can outlive a page that had more lines.
    fn first_visible_line(&self, layout: &Layout) -> usize {
        self.scroll_offset
            .min(layout.lines.len().saturating_sub(self.visible_lines(layout)))
    }

    fn scroll_by(&mut self, layout: &Layout, delta: isize) {
        let max_offset = layout.lines.len().saturating_sub(self.visible_lines(layout));
        let next = self
            .first_visible_line(layout)
            .saturating_add_signed(delta)
            .min(max_offset);
        if next != self.scroll_offset {
            debug!(from = self.scroll_offset, to = next, "table scrolled");
            self.scroll_offset = next;
        }
    }

    fn cell(&self, text: &str, width: usize, style: &Style) -> String {
        let (text, pad) = fit(text, width);
        let body = if text.is_empty() { text } else { style.render(&text) };
        format!(" {}{} ", body, " ".repeat(pad))
    }

    fn checkbox(&self, checkbox: CheckboxView, width: usize) -> String {
        let mark = if checkbox.checked { CHECKED } else { UNCHECKED };
        self.cell(mark, width, &self.styles.checkbox)
    }

    fn draw_header(&self, view: &TableView, layout: &Layout, level: usize) -> String {
        let row = &view.header_rows[level];
        let mut out = match row.select_all {
            Some(checkbox) => self.checkbox(checkbox, layout.checkbox_width),
            None => " ".repeat(layout.checkbox_width + 2 * CELL_PADDING),
        };
        let separator = self.styles.border.render("│");
        let mut first = 0;
        for header in &row.cells {
            let (_, width) = layout.span(first, header.col_span);
            out.push_str(&separator);
            out.push_str(&self.cell(
                header.content.as_deref().unwrap_or_default(),
                width,
                &self.styles.header,
            ));
            first += header.col_span;
        }
        out
    }

    fn draw_rule(&self, layout: &Layout) -> String {
        let mut out = String::from("├");
        out.push_str(&"─".repeat(layout.checkbox_width + 2 * CELL_PADDING));
        for column in &layout.columns {
            out.push('┼');
            out.push_str(&"─".repeat(column.width + 2 * CELL_PADDING));
        }
        out.push('┤');
        self.styles.border.render(&out)
    }

    fn draw_row(&self, row: &RowView, layout: &Layout) -> String {
        let style = if row.selected {
            &self.styles.selected
        } else {
            &self.styles.cell
        };
        let mut out = self.checkbox(row.checkbox, layout.checkbox_width);
        let separator = self.styles.border.render("│");
        for (cell, column) in row.cells.iter().zip(&layout.columns) {
            out.push_str(&separator);
            out.push_str(&self.cell(&cell.content, column.width, style));
        }
        out
    }

    fn draw_empty(&self, view: &TableView, layout: &Layout) -> String {
        let BodyView::Empty { message, .. } = &view.body else {
            return String::new();
        };
        let width = layout.width - 2 * CELL_PADDING;
        let (text, pad) = fit(message, width);
        let left = pad / 2;
        format!(
            " {}{}{} ",
            " ".repeat(left),
            self.styles.empty.render(&text),
            " ".repeat(pad - left)
        )
    }
}

impl<T> Component for Model<T> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

impl<T> Clone for Model<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            paginator: self.paginator.clone(),
            styles: self.styles.clone(),
            selected_row: self.selected_row.clone(),
            column_widths: self.column_widths.clone(),
            resizing_column_id: self.resizing_column_id.clone(),
            origin: self.origin,
            width: self.width,
            max_height: self.max_height,
            scroll_offset: self.scroll_offset,
            focus: self.focus,
        }
    }
}

impl<T> fmt::Debug for Model<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("table", &self.table)
            .field("selected_row", &self.selected_row)
            .field("column_widths", &self.column_widths)
            .field("resizing_column_id", &self.resizing_column_id)
            .field("origin", &self.origin)
            .field("width", &self.width)
            .field("max_height", &self.max_height)
            .field("scroll_offset", &self.scroll_offset)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}
