//! File-backed JSON store: one document per logical record.

use std::fs;
use std::path::{Path, PathBuf};

use types::{Instrument, Portfolio, Transaction};

use crate::store::{
    RECORD_INSTRUMENTS, RECORD_PORTFOLIO, RECORD_TRANSACTIONS, Result, Store,
};

/// Persists each logical record as `<dir>/<record>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.record_path(key), raw)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.record_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

impl Store for JsonFileStore {
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
        self.remove(RECORD_PORTFOLIO)?;
        self.remove(RECORD_TRANSACTIONS)?;
        self.remove(RECORD_INSTRUMENTS)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
