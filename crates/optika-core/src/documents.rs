//! Customer document attachments.
//!
//! Documents are opaque files (scans, referrals, receipts) copied into the
//! documents directory and referenced from the customer row by filename
//! only. Deletion is best-effort: a missing file is a warning for the
//! operator, never a failed operation.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::ShopConfig;

/// Document attachment errors.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document not found: {0}")]
    Missing(String),

    #[error("Document too large: {name} is {size} bytes (limit {limit})")]
    TooLarge { name: String, size: u64, limit: u64 },
}

/// Copy a file into the documents directory under a generated
/// `{Name_Surname}_{timestamp}_{basename}` filename. Returns the stored
/// filename to embed in the customer row.
pub fn attach_document(
    config: &ShopConfig,
    full_name: &str,
    source: &Path,
) -> Result<String, DocumentError> {
    let meta =
        fs::metadata(source).map_err(|_| DocumentError::Missing(source.display().to_string()))?;
    if meta.len() > config.max_document_bytes {
        return Err(DocumentError::TooLarge {
            name: source.display().to_string(),
            size: meta.len(),
            limit: config.max_document_bytes,
        });
    }

    fs::create_dir_all(&config.documents_dir)?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let base = source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");
    let stored = format!("{}_{stamp}_{base}", owner_prefix(full_name));
    fs::copy(source, config.documents_dir.join(&stored))?;
    info!(document = %stored, "document attached");
    Ok(stored)
}

/// Resolve a stored filename against the documents directory, erroring
/// when the file is gone.
pub fn document_path(config: &ShopConfig, stored_name: &str) -> Result<PathBuf, DocumentError> {
    let path = config.documents_dir.join(stored_name);
    if !path.exists() {
        return Err(DocumentError::Missing(stored_name.to_string()));
    }
    Ok(path)
}

/// Whether a stored filename still resolves to a file on disk.
pub fn document_exists(config: &ShopConfig, stored_name: &str) -> bool {
    config.documents_dir.join(stored_name).exists()
}

/// Delete each referenced document, best-effort. Returns the names that
/// were missing or could not be removed.
pub fn remove_documents(config: &ShopConfig, names: &[String]) -> Vec<String> {
    let mut failed = Vec::new();
    for name in names {
        let path = config.documents_dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => info!(document = %name, "document deleted"),
            Err(err) => {
                warn!(document = %name, error = %err, "document could not be deleted");
                failed.push(name.clone());
            }
        }
    }
    failed
}

fn owner_prefix(full_name: &str) -> String {
    let cleaned = full_name.trim().replace(' ', "_");
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}
