use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShoppingError {
    /// A value that is not a well-formed item for the target list.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    #[error("Invalid index: {index} (list has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0} not found")]
    NotFound(String),

    /// Session data that cannot be turned back into live lists.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl ShoppingError {
    pub fn invalid_item(message: impl Into<String>) -> Self {
        Self::InvalidItem(message.into())
    }

    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

pub type Result<T> = std::result::Result<T, ShoppingError>;
