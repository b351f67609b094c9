//! Shop configuration.
//!
//! Every path is explicit rather than a module-level constant, so a store
//! can be pointed at any directory (tests point one at a temp dir).

use std::path::{Path, PathBuf};

/// Largest accepted document attachment, in bytes (10 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Filesystem layout and limits for one shop.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Directory holding the four table files.
    pub data_dir: PathBuf,
    /// Directory of uploaded customer documents.
    pub documents_dir: PathBuf,
    /// Directory of pre-delete table backups.
    pub backup_dir: PathBuf,
    /// Plain-text operation log.
    pub log_file: PathBuf,
    /// Cap on attached document size, in bytes.
    pub max_document_bytes: u64,
}

impl ShopConfig {
    /// Standard layout under a single root directory.
    pub fn rooted_at<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            data_dir: root.to_path_buf(),
            documents_dir: root.join("customer documents"),
            backup_dir: root.join("backup"),
            log_file: root.join("optika.log"),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }

    /// Path of the customer table.
    pub fn customers_file(&self) -> PathBuf {
        self.data_dir.join("customers.csv")
    }

    /// Path of the inventory table.
    pub fn inventory_file(&self) -> PathBuf {
        self.data_dir.join("inventory.csv")
    }

    /// Path of the prescription table.
    pub fn prescriptions_file(&self) -> PathBuf {
        self.data_dir.join("prescriptions.csv")
    }

    /// Path of the notes table.
    pub fn notes_file(&self) -> PathBuf {
        self.data_dir.join("notes.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_layout() {
        let config = ShopConfig::rooted_at("/tmp/shop");
        assert_eq!(config.customers_file(), PathBuf::from("/tmp/shop/customers.csv"));
        assert_eq!(config.backup_dir, PathBuf::from("/tmp/shop/backup"));
        assert_eq!(config.max_document_bytes, DEFAULT_MAX_DOCUMENT_BYTES);
    }
}
