//! Styles for the data table.
//!
//! Every visual element of the table has its own lipgloss style. The defaults
//! use adaptive colours so the table reads well on light and dark terminals.
//!
//! ```rust
//! use bubbletea_datatable::table::Styles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = Styles::default();
//! styles.header = Style::new().bold(true).underline(true);
//! ```

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Marker drawn in a checked checkbox cell.
pub const CHECKED: &str = "[x]";
/// Marker drawn in an unchecked checkbox cell.
pub const UNCHECKED: &str = "[ ]";
/// Appended to content cut to fit a column.
pub const ELLIPSIS: &str = "…";
/// Text of the placeholder row shown when the page has no rows.
pub const NO_RESULTS: &str = "No results.";

/// Styles for each part of the table.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Container border.
    pub border: Style,
    /// Header cell text.
    pub header: Style,
    /// Body cell text.
    pub cell: Style,
    /// Body cell text of the selected row.
    pub selected: Style,
    /// Checkbox markers.
    pub checkbox: Style,
    /// The empty-state message.
    pub empty: Style,
    /// Pagination text.
    pub pagination: Style,
    /// Pagination buttons that cannot be used right now.
    pub pagination_disabled: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let border = Style::new().foreground(AdaptiveColor {
            Light: "#D9DCCF",
            Dark: "#383838",
        });
        let muted = Style::new().foreground(AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        });

        Self {
            border,
            header: Style::new().bold(true),
            cell: Style::new(),
            selected: Style::new().foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#EE6FF8",
            }),
            checkbox: Style::new(),
            empty: muted.clone(),
            pagination: Style::new(),
            pagination_disabled: muted.faint(true),
        }
    }
}
