use crate::record::KeyKind;
use crate::table::hash_table::HashTable;
use crate::table::slot::{Slot, SlotStatus};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStats {
    pub key_kind: KeyKind,
    pub size: usize,
    pub occupied: usize,
    pub empty: usize,
    pub tombstoned: usize,
    pub load_factor: f64,
    pub average_probes: f64,
    /// Fraction of live-record lookups that needed more than one probe.
    pub collision_rate: f64,
}

impl TableStats {
    pub fn collect(table: &HashTable) -> Self {
        let mut occupied = 0;
        let mut empty = 0;
        let mut tombstoned = 0;
        let mut probes = Vec::new();

        for slot in table.slots() {
            match slot {
                Slot::Empty => empty += 1,
                Slot::Tombstoned => tombstoned += 1,
                Slot::Occupied(rec) => {
                    occupied += 1;
                    if let Some(n) = table.search_length(rec.key(table.key_kind())) {
                        probes.push(n);
                    }
                }
            }
        }

        let (average_probes, collision_rate) = if probes.is_empty() {
            (0.0, 0.0)
        } else {
            let total = probes.len() as f64;
            let collided = probes.iter().filter(|&&n| n > 1).count() as f64;
            (probes.iter().sum::<usize>() as f64 / total, collided / total)
        };

        Self {
            key_kind: table.key_kind(),
            size: table.size(),
            occupied,
            empty,
            tombstoned,
            load_factor: table.load_factor(),
            average_probes,
            collision_rate,
        }
    }
}

/// One row of a slot-by-slot table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub index: usize,
    pub status: SlotStatus,
    pub key: Option<String>,
    pub hash: Option<usize>,
}

pub fn slot_views(table: &HashTable) -> Vec<SlotView> {
    table
        .slots()
        .iter()
        .enumerate()
        .map(|(index, slot)| {
            let key = slot.record().map(|rec| rec.key(table.key_kind()).to_string());
            SlotView {
                index,
                status: slot.status(),
                hash: key.as_deref().map(|k| table.hash(k)),
                key,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn table_with_collision() -> HashTable {
        let mut table = HashTable::new(45, KeyKind::Username).unwrap();
        table.insert(Record::new("ab", "p1", "")).unwrap();
        table.insert(Record::new("ba", "p2", "")).unwrap();
        table.insert(Record::new("alice_smith", "555-0101", "")).unwrap();
        table.insert(Record::new("dave", "555-0104", "")).unwrap();
        table
    }

    #[test]
    fn stats_on_empty_table() {
        let table = HashTable::new(45, KeyKind::Phone).unwrap();
        let stats = TableStats::collect(&table);
        assert_eq!(stats.key_kind, KeyKind::Phone);
        assert_eq!(stats.empty, 45);
        assert_eq!(stats.occupied, 0);
        assert_eq!(stats.average_probes, 0.0);
        assert_eq!(stats.collision_rate, 0.0);
    }

    #[test]
    fn stats_count_collisions() {
        let mut table = table_with_collision();
        table.delete("dave").unwrap();

        let stats = TableStats::collect(&table);
        assert_eq!(stats.size, 45);
        assert_eq!(stats.occupied, 3);
        assert_eq!(stats.tombstoned, 1);
        assert_eq!(stats.empty, 41);
        assert!((stats.average_probes - 4.0 / 3.0).abs() < 1e-9);
        assert!((stats.collision_rate - 1.0 / 3.0).abs() < 1e-9);
        assert!((stats.load_factor - 3.0 / 45.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn slot_views_show_key_and_hash_for_live_slots() {
        let mut table = table_with_collision();
        table.delete("dave").unwrap();
        let views = slot_views(&table);

        assert_eq!(views.len(), 45);
        assert_eq!(views[16].status, SlotStatus::Occupied);
        assert_eq!(views[16].key.as_deref(), Some("ba"));
        assert_eq!(views[16].hash, Some(15));
        assert_eq!(views[11].status, SlotStatus::Tombstoned);
        assert_eq!(views[11].key, None);
        assert_eq!(views[0].status, SlotStatus::Empty);
        assert_eq!(views[0].hash, None);
    }
}
