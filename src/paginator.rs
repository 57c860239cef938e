//! The pagination bar drawn below the data table.
//!
//! The paginator owns no page state of its own: it reads the current page and
//! page count from a [`TableModel`] and advances them in response to key
//! presses. It renders the rows-per-page setting, the page position and a set
//! of first/previous/next/last buttons.

use crate::key::{self, KeyMap as KeyMapTrait};
use crate::table::{Styles, TableModel};
use bubbletea_rs::{KeyMsg, Msg};
use tracing::debug;

/// How the page position is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// Page numbers, e.g. "Page 1 of 5".
    #[default]
    Arabic,
    /// One dot per page, e.g. "• ○ ○ ○ ○".
    Dots,
}

/// Rows-per-page choices offered by default.
pub const DEFAULT_PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

/// Key bindings for paginator actions.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::paginator::PaginatorKeyMap;
/// use bubbletea_datatable::key::{self, KeyMap};
///
/// let mut keymap = PaginatorKeyMap::default();
/// keymap.next_page = key::new_binding(vec![
///     key::with_keys_str(&["d", "right"]),
///     key::with_help("d/→", "next page"),
/// ]);
/// assert_eq!(keymap.short_help().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Go to the previous page. Default keys: PageUp, Left Arrow, 'h'
    pub prev_page: key::Binding,
    /// Go to the next page. Default keys: PageDown, Right Arrow, 'l'
    pub next_page: key::Binding,
    /// Go to the first page. Default keys: Home, 'g'
    pub first_page: key::Binding,
    /// Go to the last page. Default keys: End, 'G'
    pub last_page: key::Binding,
    /// Switch to the next rows-per-page choice. Default key: 's'
    pub cycle_page_size: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["pgup", "left", "h"]),
                key::with_help("←/h", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["pgdown", "right", "l"]),
                key::with_help("→/l", "next page"),
            ]),
            first_page: key::new_binding(vec![
                key::with_keys_str(&["home", "g"]),
                key::with_help("g/home", "first page"),
            ]),
            last_page: key::new_binding(vec![
                key::with_keys_str(&["end", "G"]),
                key::with_help("G/end", "last page"),
            ]),
            cycle_page_size: key::new_binding(vec![
                key::with_keys_str(&["s"]),
                key::with_help("s", "rows per page"),
            ]),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.prev_page, &self.next_page],
            vec![&self.first_page, &self.last_page, &self.cycle_page_size],
        ]
    }
}

/// The pagination control.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::paginator::{Model, Type};
/// use bubbletea_datatable::table::{ColumnDef, RowModels, TableModel};
///
/// let columns = vec![ColumnDef::accessor("n", "N", |n: &u32| n.to_string())];
/// let mut table = TableModel::new((0..45).collect(), columns, RowModels::default()).unwrap();
/// let paginator = Model::new();
///
/// table.next_page();
/// assert!(paginator.page_label(&table).contains("Page 2 of 5"));
///
/// let dots = Model::new().with_type(Type::Dots);
/// assert_eq!(dots.page_label(&table), "○ • ○ ○ ○");
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    /// How the page position is displayed.
    pub paginator_type: Type,
    /// Rows-per-page choices, cycled by the keymap.
    pub page_sizes: Vec<usize>,
    /// Dot for the current page in Dots mode.
    pub active_dot: String,
    /// Dot for other pages in Dots mode.
    pub inactive_dot: String,
    /// Format of the page position in Arabic mode; the first `%d` is the
    /// current page and the second the page count.
    pub arabic_format: String,
    /// Key bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "Page %d of %d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// Creates a paginator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display type (builder pattern).
    pub fn with_type(mut self, paginator_type: Type) -> Self {
        self.paginator_type = paginator_type;
        self
    }

    /// Sets the rows-per-page choices (builder pattern). Zero entries are dropped.
    pub fn with_page_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.page_sizes = sizes.into_iter().filter(|&s| s > 0).collect();
        self
    }

    /// Sets the dots used in Dots mode (builder pattern).
    pub fn with_dots(mut self, active: &str, inactive: &str) -> Self {
        self.active_dot = active.to_string();
        self.inactive_dot = inactive.to_string();
        self
    }

    /// Switches the table to the rows-per-page choice after its current one.
    ///
    /// A page size that is not one of the choices moves to the first choice.
    pub fn cycle_page_size<T>(&self, table: &mut TableModel<T>) {
        if self.page_sizes.is_empty() {
            return;
        }
        let next = match self.page_sizes.iter().position(|&s| s == table.page_size()) {
            Some(i) => self.page_sizes[(i + 1) % self.page_sizes.len()],
            None => self.page_sizes[0],
        };
        table.set_page_size(next);
    }

    /// Applies key presses to the table's pagination state.
    pub fn update<T>(&self, msg: &Msg, table: &mut TableModel<T>) {
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return;
        };
        if self.keymap.next_page.matches(key_msg) {
            table.next_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            table.previous_page();
        } else if self.keymap.first_page.matches(key_msg) {
            table.first_page();
        } else if self.keymap.last_page.matches(key_msg) {
            table.last_page();
        } else if self.keymap.cycle_page_size.matches(key_msg) {
            self.cycle_page_size(table);
        } else {
            return;
        }
        debug!(
            page_index = table.page_index(),
            page_size = table.page_size(),
            "pagination key handled"
        );
    }

    /// The page position: "Page X of Y" or a row of dots.
    pub fn page_label<T>(&self, table: &TableModel<T>) -> String {
        let page = table.page_index();
        let total = table.page_count();
        match self.paginator_type {
            Type::Arabic => self
                .arabic_format
                .replacen("%d", &(page + 1).to_string(), 1)
                .replacen("%d", &total.to_string(), 1),
            Type::Dots => (0..total)
                .map(|i| {
                    if i == page {
                        self.active_dot.as_str()
                    } else {
                        self.inactive_dot.as_str()
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Renders the pagination bar for the table.
    pub fn view<T>(&self, table: &TableModel<T>, styles: &Styles) -> String {
        let button = |label: &str, enabled: bool| {
            if enabled {
                styles.pagination.render(label)
            } else {
                styles.pagination_disabled.render(label)
            }
        };

        let mut out = String::new();
        out.push_str(
            &styles
                .pagination
                .render(&format!("Rows per page: {}", table.page_size())),
        );
        out.push_str("   ");
        out.push_str(&styles.pagination.render(&self.page_label(table)));
        out.push_str("   ");
        let buttons = [
            button("«", table.can_previous_page()),
            button("‹", table.can_previous_page()),
            button("›", table.can_next_page()),
            button("»", table.can_next_page()),
        ];
        out.push_str(&buttons.join(" "));
        out
    }
}
