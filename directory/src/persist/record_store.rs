use crate::record::Record;

/// Durable home for the logical record list between sessions.
pub trait RecordStore {
    fn load(&self) -> anyhow::Result<Vec<Record>>;
    fn save(&mut self, records: &[Record], table_size: usize) -> anyhow::Result<()>;
    fn sync(&mut self) -> anyhow::Result<()>;
}

/// Keeps the last saved list in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Vec<Record>,
    saves: usize,
}

impl MemoryRecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records, saves: 0 }
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> anyhow::Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[Record], _table_size: usize) -> anyhow::Result<()> {
        self.records = records.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn sync(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
