pub mod error;
pub mod hash;
pub mod hash_table;
pub mod slot;

pub const DEFAULT_TABLE_SIZE: usize = 45;
