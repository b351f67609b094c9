//! Pre-delete table backups.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Store, StoreResult};

impl Store {
    /// Copy a table file into the backup directory under a timestamped
    /// name, creating the directory on first use. Returns the backup path.
    pub fn backup_table(&self, path: &Path) -> StoreResult<PathBuf> {
        fs::create_dir_all(&self.config().backup_dir)?;
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("table");
        let backup_path = self
            .config()
            .backup_dir
            .join(format!("{file_name}_{stamp}"));
        fs::copy(path, &backup_path)?;
        tracing::info!(backup = %backup_path.display(), "table backed up");
        Ok(backup_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;

    #[test]
    fn test_backup_copies_table() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShopConfig::rooted_at(dir.path());
        let store = Store::open(config.clone()).unwrap();

        let backup = store.backup_table(&config.customers_file()).unwrap();
        assert!(backup.exists());
        assert!(backup.starts_with(&config.backup_dir));

        let original = fs::read_to_string(config.customers_file()).unwrap();
        let copied = fs::read_to_string(&backup).unwrap();
        assert_eq!(original, copied);
    }

    #[test]
    fn test_backup_missing_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShopConfig::rooted_at(dir.path());
        let store = Store::open(config.clone()).unwrap();

        let missing = config.data_dir.join("nope.csv");
        assert!(store.backup_table(&missing).is_err());
    }
}
