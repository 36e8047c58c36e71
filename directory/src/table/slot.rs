use crate::record::Record;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotStatus {
    Empty,
    Occupied,
    Tombstoned,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Empty => write!(f, "empty"),
            SlotStatus::Occupied => write!(f, "occupied"),
            SlotStatus::Tombstoned => write!(f, "deleted"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Empty,
    Occupied(Record),
    Tombstoned,
}

impl Slot {
    pub fn status(&self) -> SlotStatus {
        match self {
            Slot::Empty => SlotStatus::Empty,
            Slot::Occupied(_) => SlotStatus::Occupied,
            Slot::Tombstoned => SlotStatus::Tombstoned,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstoned)
    }

    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied(_))
    }

    /// Empty and tombstoned slots both accept a new record.
    pub fn is_available(&self) -> bool {
        !self.is_occupied()
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Slot::Occupied(rec) => Some(rec),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_default_is_empty() {
        let slot = Slot::default();
        assert!(slot.is_empty());
        assert!(slot.is_available());
        assert!(!slot.is_tombstone());
        assert_eq!(slot.status(), SlotStatus::Empty);
        assert!(slot.record().is_none());
    }

    #[test]
    fn slot_tombstones() {
        let tombstone = Slot::Tombstoned;
        assert!(tombstone.is_tombstone());
        assert!(tombstone.is_available());
        assert!(!tombstone.is_empty());
        assert!(tombstone.record().is_none());
        assert_eq!(tombstone.status().to_string(), "deleted");
    }

    #[test]
    fn slot_occupied_exposes_record() {
        let rec = Record::new("alice_smith", "555-0101", "123 Maple Street");
        let slot = Slot::Occupied(rec.clone());
        assert!(slot.is_occupied());
        assert!(!slot.is_available());
        assert_eq!(slot.record(), Some(&rec));
        assert_eq!(slot.status(), SlotStatus::Occupied);
    }
}
