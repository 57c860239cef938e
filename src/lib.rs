#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/bubbletea-datatable/")]

//! # bubbletea-datatable
//!
//! An interactive data table for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications, with single-row selection, pagination and mouse-driven column
//! resizing.
//!
//! ## Overview
//!
//! The crate is made of three pieces that follow the Elm Architecture pattern
//! used across bubbletea components:
//!
//! - [`table::TableModel`] derives header groups, the rows of the current page
//!   and the pagination state from your data and column definitions.
//! - [`paginator::Model`] renders the pagination bar and moves between pages.
//! - [`table::Model`] is the widget: it owns the selected row, the stored
//!   column widths and the active resize gesture, and turns mouse and key
//!   messages into changes of that state.
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_datatable::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     table: DataTable<(String, u32)>,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let columns = vec![
//!             ColumnDef::accessor("name", "Name", |r: &(String, u32)| r.0.clone()),
//!             ColumnDef::accessor("qty", "Qty", |r: &(String, u32)| r.1.to_string()),
//!         ];
//!         let data = vec![("apples".to_string(), 3), ("pears".to_string(), 5)];
//!         let mut table = DataTable::new(columns, data).expect("valid columns");
//!         let cmd = table.focus();
//!         (Self { table }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.table.update(&msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.table.view()
//!     }
//! }
//! ```
//!
//! Mouse events only reach the table when the program enables mouse
//! reporting, and the table needs to know where it was drawn: call
//! [`table::Model::set_origin`] with the screen position of its top-left
//! corner whenever your layout moves it, and [`table::Model::set_width`] with
//! the width of the area it sits in so drags past its right edge still resize.
//!
//! ## Logging
//!
//! State changes are reported through [`tracing`] at `debug` level and pointer
//! moves at `trace` level. The crate never installs a subscriber.

pub mod key;
pub mod paginator;
pub mod table;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused component receives keyboard input; a blurred one ignores it.
///
/// ```rust
/// use bubbletea_datatable::prelude::*;
///
/// let columns = vec![ColumnDef::accessor("n", "N", |n: &u32| n.to_string())];
/// let mut table = DataTable::new(columns, vec![1, 2, 3]).unwrap();
/// assert!(!table.focused());
///
/// table.focus();
/// assert!(table.focused());
///
/// table.blur();
/// assert!(!table.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state, optionally returning a command
    /// to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use key::{new_binding, with_disabled, with_help, with_keys, with_keys_str, Binding, KeyMap, KeyPress};
pub use paginator::Model as Paginator;
pub use table::Model as DataTable;
pub use table::{ColumnDef, TableError, TableModel};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_datatable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::paginator::{Model as Paginator, PaginatorKeyMap, Type as PaginatorType};
    pub use crate::table::{
        ColumnDef, Model as DataTable, PointerEvent, PointerKind, RowModels, Styles as TableStyles,
        TableError, TableModel, TableView,
    };
    pub use crate::Component;
}
