use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("failed to parse table: {0}")]
    Parse(String),
    #[error("failed to encode table: {0}")]
    Encode(String),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("no table loaded")]
    NoTableLoaded,
    #[error("select at least one subcategory to keep")]
    EmptySelection,
}
