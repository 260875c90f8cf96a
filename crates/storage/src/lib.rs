//! Storage layer for the paper trading simulator.
//!
//! **Philosophy:** Declarative, Modular, SoC
//! - Declarative: three logical records (`portfolio`, `transactions`,
//!   `instruments`), each a JSON document that round-trips the data model
//!   exactly
//! - Modular: storage is swappable behind the [`Store`] trait
//! - SoC: this crate ONLY handles persistence, no simulation logic
//!
//! The instrument snapshot lets a restarted session resume mid-session
//! prices instead of re-seeding from the catalog.

mod json_store;
mod store;

pub use json_store::JsonFileStore;
pub use store::{MemoryStore, Result, StorageError, Store};
