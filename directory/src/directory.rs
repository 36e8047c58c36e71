use crate::record::{KeyKind, Record};
use crate::stats::TableStats;
use crate::table::error::TableError;
use crate::table::hash_table::{HashTable, Placement, SearchHit};
use log::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("username and phone tables disagree about '{key}'")]
    OutOfSync { key: String },
}

impl DirectoryError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DirectoryError::Table(TableError::DuplicateKey(_)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertReport {
    pub username: Placement,
    pub phone: Placement,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub record: Record,
    pub tombstoned: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub inserted: usize,
    pub failed: Vec<(Record, DirectoryError)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryStats {
    pub username: TableStats,
    pub phone: TableStats,
}

/// Two hash tables over the same records, one placed by username and one
/// by phone number. Every mutation is applied to both.
#[derive(Debug, Clone)]
pub struct Directory {
    by_username: HashTable,
    by_phone: HashTable,
    /// Live records in the order they were inserted.
    order: Vec<Record>,
}

impl Directory {
    pub fn new(table_size: usize) -> Result<Self, DirectoryError> {
        Ok(Self {
            by_username: HashTable::new(table_size, KeyKind::Username)?,
            by_phone: HashTable::new(table_size, KeyKind::Phone)?,
            order: Vec::new(),
        })
    }

    pub fn table(&self, kind: KeyKind) -> &HashTable {
        match kind {
            KeyKind::Username => &self.by_username,
            KeyKind::Phone => &self.by_phone,
        }
    }

    pub fn table_size(&self) -> usize {
        self.by_username.size()
    }

    pub fn len(&self) -> usize {
        self.by_username.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_username.is_empty()
    }

    /// Inserts into both tables. If the phone table refuses the record the
    /// username-table insert is undone.
    pub fn insert(&mut self, record: Record) -> Result<InsertReport, DirectoryError> {
        if record.username.is_empty() || record.phone_number.is_empty() {
            return Err(TableError::EmptyKey.into());
        }
        // A key may collide with either field of a stored record.
        for key in [&record.username, &record.phone_number] {
            if self.by_username.search(key).is_ok() || self.by_phone.search(key).is_ok() {
                return Err(TableError::DuplicateKey(key.clone()).into());
            }
        }

        let username = self.by_username.insert(record.clone())?;
        let phone = match self.by_phone.insert(record.clone()) {
            Ok(placement) => placement,
            Err(err) => {
                self.by_username.delete(&record.username)?;
                return Err(err.into());
            }
        };
        self.order.push(record);
        Ok(InsertReport { username, phone })
    }

    pub fn search(&self, kind: KeyKind, key: &str) -> Result<SearchHit<'_>, DirectoryError> {
        Ok(self.table(kind).search(key)?)
    }

    pub fn search_by_username(&self, username: &str) -> Result<SearchHit<'_>, DirectoryError> {
        self.search(KeyKind::Username, username)
    }

    pub fn search_by_phone(&self, phone: &str) -> Result<SearchHit<'_>, DirectoryError> {
        self.search(KeyKind::Phone, phone)
    }

    /// Finds the record through the table indexed by `kind` and removes it
    /// from both tables.
    pub fn delete(&mut self, kind: KeyKind, key: &str) -> Result<DeleteReport, DirectoryError> {
        let record = self.table(kind).search(key)?.record.clone();

        let from_username = self.by_username.delete(&record.username);
        let from_phone = self.by_phone.delete(&record.phone_number);
        if from_username.is_ok() || from_phone.is_ok() {
            self.order.retain(|r| r.username != record.username);
        }
        match (from_username, from_phone) {
            (Ok(a), Ok(b)) => Ok(DeleteReport {
                record,
                tombstoned: a + b,
            }),
            (Ok(_), Err(_)) | (Err(_), Ok(_)) => {
                warn!("record '{}' was only present in one table", record.username);
                Err(DirectoryError::OutOfSync {
                    key: key.to_string(),
                })
            }
            (Err(err), Err(_)) => Err(err.into()),
        }
    }

    pub fn delete_by_username(&mut self, username: &str) -> Result<DeleteReport, DirectoryError> {
        self.delete(KeyKind::Username, username)
    }

    pub fn delete_by_phone(&mut self, phone: &str) -> Result<DeleteReport, DirectoryError> {
        self.delete(KeyKind::Phone, phone)
    }

    /// Logical records in insertion order. Replaying them through `insert`
    /// reproduces both tables slot for slot.
    pub fn records(&self) -> Vec<Record> {
        self.order.clone()
    }

    pub fn clear(&mut self) {
        self.by_username.clear();
        self.by_phone.clear();
        self.order.clear();
    }

    /// Replays `records` through `insert` in order. Rejected records are
    /// reported, never dropped.
    pub fn extend<I>(&mut self, records: I) -> ImportReport
    where
        I: IntoIterator<Item = Record>,
    {
        let mut report = ImportReport::default();
        for record in records {
            match self.insert(record.clone()) {
                Ok(_) => report.inserted += 1,
                Err(err) => {
                    warn!("skipping record '{}': {}", record.username, err);
                    report.failed.push((record, err));
                }
            }
        }
        report
    }

    /// Clears the directory and rebuilds it from `records`.
    pub fn import<I>(&mut self, records: I) -> ImportReport
    where
        I: IntoIterator<Item = Record>,
    {
        self.clear();
        let report = self.extend(records);
        info!(
            "imported {} record(s), {} failed",
            report.inserted,
            report.failed.len()
        );
        report
    }

    pub fn stats(&self) -> DirectoryStats {
        DirectoryStats {
            username: TableStats::collect(&self.by_username),
            phone: TableStats::collect(&self.by_phone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::sample_records;

    #[test]
    fn insert_places_in_both_tables() {
        let mut dir = Directory::new(45).unwrap();
        let report = dir
            .insert(Record::new("alice_smith", "555-0101", "123 Maple Street"))
            .unwrap();
        assert_eq!(report.username.index, 29);
        assert_eq!(report.phone.index, 38);
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.table(KeyKind::Phone).len(), 1);

        let by_user = dir.search_by_username("alice_smith").unwrap();
        let by_phone = dir.search_by_phone("555-0101").unwrap();
        assert_eq!(by_user.record, by_phone.record);
    }

    #[test]
    fn duplicates_rejected_across_tables() {
        let mut dir = Directory::new(45).unwrap();
        dir.insert(Record::new("alice_smith", "555-0101", "")).unwrap();

        let err = dir.insert(Record::new("other", "555-0101", "")).unwrap_err();
        assert!(err.is_duplicate());
        let err = dir.insert(Record::new("alice_smith", "555-7777", "")).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.table(KeyKind::Phone).len(), 1);
    }

    #[test]
    fn failed_phone_insert_rolls_back_username_table() {
        let mut dir = Directory::new(2).unwrap();
        dir.insert(Record::new("a", "1", "")).unwrap();
        // Force the phone table full so only the second insert fails.
        dir.by_phone.insert(Record::new("ghost", "2", "")).unwrap();

        let err = dir.insert(Record::new("b", "3", "")).unwrap_err();
        assert_eq!(err, DirectoryError::Table(TableError::TableFull { size: 2 }));
        assert_eq!(dir.by_username.len(), 1);
        assert!(dir.search_by_username("b").is_err());
    }

    #[test]
    fn delete_by_either_key_removes_from_both() {
        let mut dir = Directory::new(45).unwrap();
        dir.insert(Record::new("alice_smith", "555-0101", "")).unwrap();
        dir.insert(Record::new("bob_jones", "555-0102", "")).unwrap();

        let report = dir.delete_by_phone("555-0101").unwrap();
        assert_eq!(report.record.username, "alice_smith");
        assert_eq!(report.tombstoned, 2);
        assert!(dir.search_by_username("alice_smith").is_err());
        assert!(dir.search_by_phone("555-0101").is_err());

        dir.delete_by_username("bob_jones").unwrap();
        assert!(dir.is_empty());
        assert!(dir.table(KeyKind::Phone).is_empty());
    }

    #[test]
    fn delete_reports_divergence() {
        let mut dir = Directory::new(45).unwrap();
        dir.insert(Record::new("alice_smith", "555-0101", "")).unwrap();
        dir.by_phone.delete("555-0101").unwrap();

        let err = dir.delete_by_username("alice_smith").unwrap_err();
        assert_eq!(
            err,
            DirectoryError::OutOfSync {
                key: "alice_smith".to_string()
            }
        );
    }

    #[test]
    fn delete_missing_is_not_found() {
        let mut dir = Directory::new(45).unwrap();
        let err = dir.delete_by_username("ghost").unwrap_err();
        assert_eq!(err, DirectoryError::Table(TableError::NotFound("ghost".into())));
    }

    #[test]
    fn import_reports_duplicates_as_failures() {
        let mut dir = Directory::new(45).unwrap();
        dir.insert(Record::new("stale", "000", "")).unwrap();

        let mut records = sample_records();
        records.push(Record::new("alice_smith", "555-9999", "dup username"));
        let report = dir.import(records);

        assert_eq!(report.inserted, 30);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].1.is_duplicate());
        assert!(dir.search_by_username("stale").is_err());
        assert_eq!(dir.len(), 30);
    }

    #[test]
    fn records_follow_insertion_order() {
        let mut dir = Directory::new(45).unwrap();
        dir.insert(Record::new("alice_smith", "555-0101", "")).unwrap();
        dir.insert(Record::new("bob_jones", "555-0102", "")).unwrap();
        dir.insert(Record::new("carol_white", "555-0103", "")).unwrap();
        // bob_jones sits in a lower username slot than alice_smith.
        assert!(
            dir.search_by_username("bob_jones").unwrap().index
                < dir.search_by_username("alice_smith").unwrap().index
        );

        dir.delete_by_phone("555-0103").unwrap();
        let names: Vec<String> = dir.records().into_iter().map(|r| r.username).collect();
        assert_eq!(names, vec!["alice_smith", "bob_jones"]);

        dir.clear();
        assert!(dir.records().is_empty());
    }

    #[test]
    fn username_matching_stored_phone_leaves_tables_untouched() {
        let mut dir = Directory::new(45).unwrap();
        dir.insert(Record::new("x", "y", "")).unwrap();
        let before = dir.stats();

        let err = dir.insert(Record::new("y", "z", "")).unwrap_err();
        assert_eq!(err, DirectoryError::Table(TableError::DuplicateKey("y".into())));
        let err = dir.insert(Record::new("w", "x", "")).unwrap_err();
        assert_eq!(err, DirectoryError::Table(TableError::DuplicateKey("x".into())));

        assert_eq!(dir.stats(), before);
        assert_eq!(dir.stats().username.tombstoned, 0);
        assert_eq!(dir.stats().phone.tombstoned, 0);
        assert_eq!(dir.records(), vec![Record::new("x", "y", "")]);
    }

    #[test]
    fn stats_cover_both_tables() {
        let mut dir = Directory::new(45).unwrap();
        dir.extend(sample_records());
        let stats = dir.stats();
        assert_eq!(stats.username.occupied, 30);
        assert_eq!(stats.phone.occupied, 30);
        assert_eq!(stats.username.key_kind, KeyKind::Username);
        assert!(stats.phone.average_probes >= 1.0);
    }
}
