use crate::record::{KeyKind, Record};
use crate::table::error::TableError;
use crate::table::hash::{hash, probe};
use crate::table::slot::Slot;
use log::debug;
use std::collections::HashSet;

/// Where an insert landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub hash: usize,
    /// 1-based number of slots inspected.
    pub probes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub record: &'a Record,
    pub index: usize,
    pub hash: usize,
    pub probes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub index: usize,
    pub hash: usize,
    pub record: &'a Record,
}

/// Fixed-capacity open-addressed table with linear probing and tombstones.
///
/// Records are placed by the field named by `key_kind`, but lookups accept
/// either the username or the phone number of a stored record.
#[derive(Debug, Clone)]
pub struct HashTable {
    slots: Vec<Slot>,
    count: usize,
    key_kind: KeyKind,
}

impl HashTable {
    pub fn new(size: usize, key_kind: KeyKind) -> Result<Self, TableError> {
        if size == 0 {
            return Err(TableError::InvalidSize(size));
        }
        Ok(Self {
            slots: vec![Slot::Empty; size],
            count: 0,
            key_kind,
        })
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.size()
    }

    pub fn key_kind(&self) -> KeyKind {
        self.key_kind
    }

    pub fn hash(&self, key: &str) -> usize {
        hash(key, self.size())
    }

    pub fn probe(&self, base: usize, attempt: usize) -> usize {
        probe(base, attempt, self.size())
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn insert(&mut self, record: Record) -> Result<Placement, TableError> {
        if record.username.is_empty() || record.phone_number.is_empty() {
            return Err(TableError::EmptyKey);
        }
        if self.is_full() {
            return Err(TableError::TableFull { size: self.size() });
        }
        for key in [&record.username, &record.phone_number] {
            if self.search(key).is_ok() {
                return Err(TableError::DuplicateKey(key.clone()));
            }
        }

        let key = record.key(self.key_kind);
        let base = self.hash(key);
        let Some((attempt, index)) = (0..self.size())
            .map(|attempt| (attempt, self.probe(base, attempt)))
            .find(|&(_, index)| self.slots[index].is_available())
        else {
            return Err(TableError::SlotInsertionFailure {
                key: key.to_string(),
            });
        };

        debug!(
            "{} table: '{}' hash={} -> slot {} after {} probe(s)",
            self.key_kind,
            key,
            base,
            index,
            attempt + 1
        );
        self.slots[index] = Slot::Occupied(record);
        self.count += 1;
        Ok(Placement {
            index,
            hash: base,
            probes: attempt + 1,
        })
    }

    pub fn search(&self, key: &str) -> Result<SearchHit<'_>, TableError> {
        let not_found = || TableError::NotFound(key.to_string());
        if key.is_empty() {
            return Err(not_found());
        }

        let base = self.hash(key);
        for attempt in 0..self.size() {
            let index = self.probe(base, attempt);
            match &self.slots[index] {
                Slot::Empty => break,
                Slot::Tombstoned => continue,
                Slot::Occupied(rec) if rec.matches(key) => {
                    return Ok(SearchHit {
                        record: rec,
                        index,
                        hash: base,
                        probes: attempt + 1,
                    });
                }
                Slot::Occupied(_) => {}
            }
        }
        Err(not_found())
    }

    /// Tombstones every slot holding the found record's username or phone
    /// number and returns how many slots were tombstoned. `count` drops by
    /// one per call.
    pub fn delete(&mut self, key: &str) -> Result<usize, TableError> {
        let target = self.search(key)?.record.clone();

        let mut tombstoned = 0;
        for slot in self.slots.iter_mut() {
            if slot.record().is_some_and(|rec| rec.shares_identity(&target)) {
                *slot = Slot::Tombstoned;
                tombstoned += 1;
            }
        }
        if tombstoned == 0 {
            return Err(TableError::NotFound(key.to_string()));
        }

        self.count = self.count.saturating_sub(1);
        debug!(
            "{} table: deleted '{}' ({} slot(s) tombstoned)",
            self.key_kind, key, tombstoned
        );
        Ok(tombstoned)
    }

    /// Live records in slot order, one entry per (username, phone) pair.
    pub fn enumerate(&self) -> Vec<Entry<'_>> {
        let mut seen = HashSet::new();
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.record().map(|rec| (index, rec)))
            .filter(|(_, rec)| seen.insert((rec.username.as_str(), rec.phone_number.as_str())))
            .map(|(index, record)| Entry {
                index,
                hash: self.hash(record.key(self.key_kind)),
                record,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.count = 0;
    }

    /// Occupancy as a percentage of capacity.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.size() as f64 * 100.0
    }

    /// Probes needed to find a live key, if present.
    pub fn search_length(&self, key: &str) -> Option<usize> {
        self.search(key).ok().map(|hit| hit.probes)
    }

    /// Mean probes to look up every live record by this table's key.
    pub fn average_search_length(&self) -> f64 {
        let lengths: Vec<usize> = self
            .slots
            .iter()
            .filter_map(Slot::record)
            .filter_map(|rec| self.search_length(rec.key(self.key_kind)))
            .collect();
        if lengths.is_empty() {
            return 0.0;
        }
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    }
}
