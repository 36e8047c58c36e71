//! Phone directory keyed by username and phone number, stored in two
//! fixed-size open-addressed hash tables.

pub mod command;
pub mod config;
pub mod directory;
pub mod persist;
pub mod record;
pub mod stats;
pub mod table;
