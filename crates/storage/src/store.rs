//! The persistence contract and the in-memory reference implementation.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use types::{Instrument, Portfolio, Transaction};

/// Logical record keys. The physical layout is up to the implementation;
/// the contract is only that each record round-trips the data model.
pub(crate) const RECORD_PORTFOLIO: &str = "portfolio";
pub(crate) const RECORD_TRANSACTIONS: &str = "transactions";
pub(crate) const RECORD_INSTRUMENTS: &str = "instruments";

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur while persisting or loading session state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded or decoded.
    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

// =============================================================================
// Store Trait
// =============================================================================

/// Key/value persistence for session state, keyed by logical record type.
///
/// Loads return `Ok(None)` (or an empty list) when a record has never been
/// saved; that is a fresh session, not an error.
pub trait Store: Send + Sync {
    /// Load the persisted portfolio, if any.
    fn load_portfolio(&self) -> Result<Option<Portfolio>>;

    /// Save the portfolio (holdings included).
    fn save_portfolio(&self, portfolio: &Portfolio) -> Result<()>;

    /// Load the transaction log, oldest first.
    fn load_transactions(&self) -> Result<Vec<Transaction>>;

    /// Append one transaction to the log.
    fn append_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Load the cached instrument snapshot, if any.
    fn load_instruments(&self) -> Result<Option<Vec<Instrument>>>;

    /// Save the instrument snapshot.
    fn save_instruments(&self, instruments: &[Instrument]) -> Result<()>;

    /// Remove every record (full session reset).
    fn clear(&self) -> Result<()>;
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store backed by JSON strings, for tests and ephemeral sessions.
///
/// Clones share the same underlying records, so a test can hand a clone to
/// a session and inspect (or reuse) the store afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.records
            .lock()
            .get(key)
            .map(|raw| serde_json::from_str(raw).map_err(StorageError::from))
            .transpose()
    }

    fn write<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.records.lock().insert(key.to_string(), raw);
        Ok(())
    }
}

impl Store for MemoryStore {
    fn load_portfolio(&self) -> Result<Option<Portfolio>> {
        self.read(RECORD_PORTFOLIO)
    }

    fn save_portfolio(&self, portfolio: &Portfolio) -> Result<()> {
        self.write(RECORD_PORTFOLIO, portfolio)
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.read(RECORD_TRANSACTIONS)?.unwrap_or_default())
    }

    fn append_transaction(&self, transaction: &Transaction) -> Result<()> {
        let mut transactions = self.load_transactions()?;
        transactions.push(transaction.clone());
        self.write(RECORD_TRANSACTIONS, &transactions)
    }

    fn load_instruments(&self) -> Result<Option<Vec<Instrument>>> {
        self.read(RECORD_INSTRUMENTS)
    }

    fn save_instruments(&self, instruments: &[Instrument]) -> Result<()> {
        self.write(RECORD_INSTRUMENTS, &instruments.to_vec())
    }

    fn clear(&self) -> Result<()> {
        self.records.lock().clear();
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Cash, Price, Quantity, TradeSide, TransactionId};

    fn transaction(id: u64) -> Transaction {
        Transaction {
            id: TransactionId(id),
            side: TradeSide::Buy,
            symbol: "AAA".to_string(),
            stock_name: "AAA Corp".to_string(),
            quantity: Quantity(5),
            price: Price::from_float(100.0),
            timestamp: id * 1_000,
            gross_value: Cash::from_float(500.0),
            fee: Cash::from_float(0.5),
        }
    }

    #[test]
    fn test_fresh_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.load_portfolio().unwrap().is_none());
        assert!(store.load_instruments().unwrap().is_none());
        assert!(store.load_transactions().unwrap().is_empty());
    }

    #[test]
    fn test_portfolio_round_trip() {
        let store = MemoryStore::new();
        let portfolio = Portfolio::with_initial_cash(Cash::from_float(100_000.0));

        store.save_portfolio(&portfolio).unwrap();
        assert_eq!(store.load_portfolio().unwrap(), Some(portfolio));
    }

    #[test]
    fn test_transactions_append_in_order() {
        let store = MemoryStore::new();
        store.append_transaction(&transaction(1)).unwrap();
        store.append_transaction(&transaction(2)).unwrap();

        let loaded = store.load_transactions().unwrap();
        let ids: Vec<u64> = loaded.iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_clones_share_records() {
        let store = MemoryStore::new();
        let handle = store.clone();

        handle
            .save_portfolio(&Portfolio::with_initial_cash(Cash::from_float(1.0)))
            .unwrap();
        assert!(store.load_portfolio().unwrap().is_some());
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = MemoryStore::new();
        store
            .save_portfolio(&Portfolio::with_initial_cash(Cash::from_float(1.0)))
            .unwrap();
        store.append_transaction(&transaction(1)).unwrap();

        store.clear().unwrap();
        assert!(store.load_portfolio().unwrap().is_none());
        assert!(store.load_transactions().unwrap().is_empty());
    }
}
