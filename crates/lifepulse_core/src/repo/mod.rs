//! Persistence layer: named slots over SQLite plus the typed data store.
//!
//! # Responsibility
//! - Define the slot-storage contract used by every service.
//! - Own the encode/decode and seed-fallback policy for each slot.
//!
//! # Invariants
//! - Saves overwrite a whole slot; there are no partial merges.
//! - Loads never fail: missing or undecodable slots fall back to seed
//!   data, with the fallback reported through [`data_store::LoadSource`].

pub mod data_store;
pub mod slot_repo;
