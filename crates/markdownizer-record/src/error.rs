//! Registration errors.

/// Error raised when registering a Markdown field.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    /// The record type lacks the raw or the rendered column.
    #[error(
        "{type_name} is missing required columns `{attribute}` and `{rendered}`; \
         add both as text columns"
    )]
    MissingAttributes {
        /// Record type name.
        type_name: String,
        /// Raw text column.
        attribute: String,
        /// Rendered HTML column.
        rendered: String,
    },

    /// The attribute was registered before.
    #[error("{type_name} already renders `{attribute}` as Markdown")]
    AlreadyRegistered {
        /// Record type name.
        type_name: String,
        /// Raw text column.
        attribute: String,
    },
}
