use crate::command::ast::Command;
use crate::directory::{DeleteReport, Directory, DirectoryStats, ImportReport, InsertReport};
use crate::persist::file_store::{export_records, import_records};
use crate::persist::record_store::RecordStore;
use crate::persist::save_directory;
use crate::record::{KeyKind, Record, sample_records};
use crate::stats::{SlotView, slot_views};
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Inserted {
        record: Record,
        report: InsertReport,
    },
    Found {
        kind: KeyKind,
        record: Record,
        index: usize,
        hash: usize,
        probes: usize,
    },
    Deleted(DeleteReport),
    Records(Vec<Record>),
    Stats(DirectoryStats),
    Table {
        kind: KeyKind,
        slots: Vec<SlotView>,
    },
    Cleared,
    Saved {
        count: usize,
    },
    Loaded(ImportReport),
    Imported(ImportReport),
    Exported {
        path: String,
        count: usize,
    },
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn new() -> Self {
        Self
    }

    pub fn execute<S: RecordStore>(
        &self,
        command: Command,
        directory: &mut Directory,
        store: &mut S,
    ) -> anyhow::Result<CommandOutput> {
        match command {
            Command::Insert(record) => {
                let report = directory.insert(record.clone())?;
                Ok(CommandOutput::Inserted { record, report })
            }
            Command::Search { kind, key } => {
                let hit = directory.search(kind, &key)?;
                Ok(CommandOutput::Found {
                    kind,
                    record: hit.record.clone(),
                    index: hit.index,
                    hash: hit.hash,
                    probes: hit.probes,
                })
            }
            Command::Delete { kind, key } => {
                Ok(CommandOutput::Deleted(directory.delete(kind, &key)?))
            }
            Command::List => Ok(CommandOutput::Records(directory.records())),
            Command::Stats => Ok(CommandOutput::Stats(directory.stats())),
            Command::Table(kind) => Ok(CommandOutput::Table {
                kind,
                slots: slot_views(directory.table(kind)),
            }),
            Command::Clear => {
                directory.clear();
                Ok(CommandOutput::Cleared)
            }
            Command::Save => {
                save_directory(store, directory)?;
                store.sync()?;
                Ok(CommandOutput::Saved {
                    count: directory.len(),
                })
            }
            Command::Load => Ok(CommandOutput::Loaded(directory.import(store.load()?))),
            Command::Import(path) => {
                let records = import_records(Path::new(&path))?;
                Ok(CommandOutput::Imported(directory.import(records)))
            }
            Command::Export(path) => {
                let records = directory.records();
                export_records(Path::new(&path), &records)?;
                Ok(CommandOutput::Exported {
                    path,
                    count: records.len(),
                })
            }
            Command::Sample => Ok(CommandOutput::Imported(directory.import(sample_records()))),
        }
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}
