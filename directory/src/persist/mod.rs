pub mod codec;
pub mod file_store;
pub mod record_store;

use crate::directory::{Directory, ImportReport};
use record_store::RecordStore;

/// Rebuilds a directory by replaying the stored records in order.
pub fn load_directory<S: RecordStore>(
    store: &S,
    table_size: usize,
) -> anyhow::Result<(Directory, ImportReport)> {
    let mut directory = Directory::new(table_size)?;
    let report = directory.extend(store.load()?);
    Ok((directory, report))
}

pub fn save_directory<S: RecordStore>(store: &mut S, directory: &Directory) -> anyhow::Result<()> {
    store.save(&directory.records(), directory.table_size())
}
