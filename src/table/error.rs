//! Errors raised while building a table model.

/// Malformed column definitions rejected by [`TableModel::new`](super::TableModel::new).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A column was defined with an empty id.
    #[error("column id must not be empty")]
    EmptyColumnId,

    /// Two columns in the column tree share an id.
    #[error("duplicate column id '{id}'")]
    DuplicateColumnId {
        /// The repeated id.
        id: String,
    },

    /// A group column was defined without children.
    #[error("group column '{id}' has no child columns")]
    EmptyGroup {
        /// The group's id.
        id: String,
    },
}
