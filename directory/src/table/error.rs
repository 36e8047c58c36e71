#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("hash table is full ({size} slots)")]
    TableFull { size: usize },
    #[error("record with key '{0}' already exists")]
    DuplicateKey(String),
    #[error("no record found for '{0}'")]
    NotFound(String),
    #[error("could not find an available slot for '{key}'")]
    SlotInsertionFailure { key: String },
    #[error("key cannot be empty")]
    EmptyKey,
    #[error("invalid table size {0}")]
    InvalidSize(usize),
}
