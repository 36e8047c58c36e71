use crate::record::{KeyKind, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(Record),
    Search { kind: KeyKind, key: String },
    Delete { kind: KeyKind, key: String },
    List,
    Stats,
    Table(KeyKind),
    Clear,
    Save,
    Load,
    Import(String),
    Export(String),
    Sample,
}

impl Command {
    /// Whether running the command changes the directory contents.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::Insert(_)
                | Command::Delete { .. }
                | Command::Clear
                | Command::Import(_)
                | Command::Sample
        )
    }
}
