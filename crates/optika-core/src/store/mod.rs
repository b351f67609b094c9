//! Flat-file table layer.
//!
//! Each entity lives in its own delimited-text file with a fixed header
//! row. Reads parse the whole table; writes rewrite the whole table
//! through a temp-file-then-rename step so an interrupted write cannot
//! truncate it.

mod backup;
mod customers;
mod inventory;
mod notes;
mod prescriptions;
mod table;

#[allow(unused_imports)]
pub use customers::*;
#[allow(unused_imports)]
pub use inventory::*;
#[allow(unused_imports)]
pub use notes::*;
#[allow(unused_imports)]
pub use prescriptions::*;
pub use table::*;

use std::fs;
use std::io;

use thiserror::Error;

use crate::config::ShopConfig;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed row in {file}, record {record}: {reason}")]
    Malformed {
        file: String,
        /// 1-based data record index; 0 means the header itself
        record: usize,
        reason: String,
    },

    #[error("Record not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle over the four table files.
pub struct Store {
    config: ShopConfig,
}

impl Store {
    /// Open the store, creating the data and documents directories and any
    /// missing table file (with its header row).
    pub fn open(config: ShopConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.data_dir)?;
        fs::create_dir_all(&config.documents_dir)?;
        table::ensure_table(&config.customers_file(), &CUSTOMER_HEADERS)?;
        table::ensure_table(&config.inventory_file(), &INVENTORY_HEADERS)?;
        table::ensure_table(&config.prescriptions_file(), &PRESCRIPTION_HEADERS)?;
        table::ensure_table(&config.notes_file(), &NOTE_HEADERS)?;
        Ok(Self { config })
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }
}
