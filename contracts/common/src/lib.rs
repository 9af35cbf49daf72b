#![no_std]

//! Storage plumbing shared by the hospital contracts: TTL upkeep for
//! persistent entries and monotonic id sequences kept in instance storage.

pub mod sequence;
pub mod ttl;

pub use sequence::{current_id, next_id};
pub use ttl::{extend_instance, extend_persistent};
