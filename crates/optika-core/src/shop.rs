//! Shop operations.
//!
//! [`Shop`] is the single coordinating surface: one method per
//! create/edit/delete operation. Cross-table consistency (rename
//! propagation, the prescription cascade on delete, derived flags) lives
//! at this level; the store modules stay per-table.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::ShopConfig;
use crate::documents::{self, DocumentError};
use crate::models::{name_key, Customer, Flags, InventoryItem, LensReading, Note, Prescription, Segment};
use crate::store::{SearchField, Store, StoreError};
use crate::validate::{validate_email, validate_phone};

/// Shop operation errors.
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Duplicate customer: an existing row matches this name, phone, or email")]
    DuplicateCustomer,

    #[error("Duplicate product: {0} is already stocked; use a restock instead")]
    DuplicateProduct(String),

    #[error("Customer not found: {0}")]
    UnknownCustomer(String),

    #[error("Product not found: {0}")]
    UnknownProduct(String),

    #[error("Not enough stock: requested {requested}, available {available}")]
    OutOfStock { requested: u32, available: u32 },

    #[error("Backup failed before delete: {0}")]
    BackupFailed(String),
}

pub type ShopResult<T> = Result<T, ShopError>;

/// Input for registering or updating a customer.
#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Stored document filenames; entries missing on disk are dropped
    /// with a warning at save time.
    pub documents: Vec<String>,
}

/// What a customer deletion left behind.
#[derive(Debug, Clone, Default)]
pub struct DeletionReport {
    /// Backup file written before the rewrite, when one succeeded.
    pub backup: Option<PathBuf>,
    /// Referenced documents that were missing or undeletable.
    pub missing_documents: Vec<String>,
    /// Prescription rows removed along with the customer.
    pub prescriptions_removed: usize,
}

/// Result of a completed sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReceipt {
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
    /// Stock reached zero with this sale; time to reorder.
    pub depleted: bool,
}

/// The coordinating API over the four tables, the documents directory,
/// and the backup directory.
pub struct Shop {
    store: Store,
}

impl Shop {
    /// Open the shop, creating missing directories and table files.
    pub fn open(config: ShopConfig) -> ShopResult<Self> {
        let store = Store::open(config)?;
        info!("shop opened");
        Ok(Self { store })
    }

    /// The underlying table store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The configuration this shop was opened with.
    pub fn config(&self) -> &ShopConfig {
        self.store.config()
    }

    // =========================================================================
    // Customer Operations
    // =========================================================================

    /// Register a new customer, enforcing the duplicate rule: an existing
    /// row with the same name+surname, the same phone, or the same email
    /// blocks the insert.
    pub fn register_customer(&self, form: CustomerForm) -> ShopResult<Customer> {
        let form = trimmed(form);
        validate_form(&form)?;

        if self
            .store
            .has_duplicate_customer(&form.name, &form.surname, &form.phone, &form.email)?
        {
            warn!(name = %form.name, surname = %form.surname, "duplicate customer rejected");
            return Err(ShopError::DuplicateCustomer);
        }

        let customer = Customer {
            documents: self.existing_documents(form.documents),
            name: form.name,
            surname: form.surname,
            phone: form.phone,
            email: form.email,
            address: form.address,
        };
        self.store.append_customer(&customer)?;
        info!(customer = %customer.full_name(), "customer registered");
        Ok(customer)
    }

    /// Update the customer previously identified by `old_name`/`old_surname`.
    ///
    /// When the full name changes, matching prescription and note rows are
    /// rewritten first so they stay discoverable under the new name. There
    /// is deliberately no duplicate check on this path (see DESIGN.md), and
    /// an edit of a row that has vanished from the file re-appends it.
    pub fn update_customer(
        &self,
        old_name: &str,
        old_surname: &str,
        form: CustomerForm,
    ) -> ShopResult<Customer> {
        let form = trimmed(form);
        validate_form(&form)?;

        let old_full = full_name_of(old_name, old_surname);
        let updated = Customer {
            documents: self.existing_documents(form.documents),
            name: form.name,
            surname: form.surname,
            phone: form.phone,
            email: form.email,
            address: form.address,
        };
        let new_full = updated.full_name();

        if name_key(&old_full) != name_key(&new_full) {
            let prescriptions = self
                .store
                .rename_prescription_customer(&old_full, &new_full)?;
            let notes = self.store.rename_note_customer(&old_full, &new_full)?;
            info!(
                from = %old_full,
                to = %new_full,
                prescriptions,
                notes,
                "customer rename propagated"
            );
        }

        let mut customers = self.store.load_customers()?;
        match customers
            .iter_mut()
            .find(|c| c.matches_identity(old_name, old_surname))
        {
            Some(slot) => *slot = updated.clone(),
            None => customers.push(updated.clone()),
        }
        self.store.save_customers(&customers)?;
        info!(customer = %updated.full_name(), "customer updated");
        Ok(updated)
    }

    /// Delete a customer, their prescriptions, and (best-effort) their
    /// document files. Note rows are left in place.
    ///
    /// The customer table is backed up first; a failed backup aborts the
    /// delete unless `proceed_without_backup` is set, in which case it is
    /// only logged.
    pub fn delete_customer(
        &self,
        name: &str,
        surname: &str,
        proceed_without_backup: bool,
    ) -> ShopResult<DeletionReport> {
        let customer = self
            .store
            .find_customer(name, surname)?
            .ok_or_else(|| ShopError::UnknownCustomer(full_name_of(name, surname)))?;

        let backup = match self.store.backup_table(&self.config().customers_file()) {
            Ok(path) => Some(path),
            Err(err) if proceed_without_backup => {
                warn!(error = %err, "deleting without a backup");
                None
            }
            Err(err) => return Err(ShopError::BackupFailed(err.to_string())),
        };

        let missing_documents = documents::remove_documents(self.config(), &customer.documents);

        let mut customers = self.store.load_customers()?;
        customers.retain(|c| !c.matches_identity(name, surname));
        self.store.save_customers(&customers)?;

        let prescriptions_removed = self.store.delete_prescriptions_for(&customer.full_name())?;

        info!(
            customer = %customer.full_name(),
            prescriptions = prescriptions_removed,
            "customer deleted"
        );
        Ok(DeletionReport {
            backup,
            missing_documents,
            prescriptions_removed,
        })
    }

    /// All customers, in file order.
    pub fn list_customers(&self) -> ShopResult<Vec<Customer>> {
        Ok(self.store.load_customers()?)
    }

    /// All customers with their derived flags, the shape the main
    /// customer listing displays.
    pub fn list_customers_with_flags(&self) -> ShopResult<Vec<(Customer, Flags)>> {
        let customers = self.store.load_customers()?;
        customers
            .into_iter()
            .map(|c| {
                let flags = self.flags_for(&c)?;
                Ok((c, flags))
            })
            .collect()
    }

    /// Find one customer by identity.
    pub fn find_customer(&self, name: &str, surname: &str) -> ShopResult<Option<Customer>> {
        Ok(self.store.find_customer(name, surname)?)
    }

    /// Case-insensitive substring search over one field.
    pub fn search_customers(&self, by: SearchField, query: &str) -> ShopResult<Vec<Customer>> {
        Ok(self.store.search_customers(by, query)?)
    }

    /// Derive the per-customer indicator flags from the tables. Never
    /// stored: a persisted flags column goes stale the moment a note or
    /// prescription lands, so they are recomputed on demand.
    pub fn flags_for(&self, customer: &Customer) -> ShopResult<Flags> {
        let full = customer.full_name();
        Ok(Flags {
            documents: customer
                .documents
                .iter()
                .any(|d| documents::document_exists(self.config(), d)),
            prescriptions: !self.store.prescriptions_for(&full)?.is_empty(),
            notes: !self.store.notes_for(&full)?.is_empty(),
        })
    }

    // =========================================================================
    // Inventory Operations
    // =========================================================================

    /// Stock a new product. The name is a case-insensitive unique key;
    /// restock an existing product instead of re-adding it.
    pub fn add_product(
        &self,
        name: &str,
        category: &str,
        quantity: u32,
        price: f64,
    ) -> ShopResult<InventoryItem> {
        let name = name.trim();
        let category = category.trim();
        if name.is_empty() || category.is_empty() {
            return Err(ShopError::Validation(
                "product name and category are required".into(),
            ));
        }
        if price <= 0.0 || !price.is_finite() {
            return Err(ShopError::Validation("price must be positive".into()));
        }
        if self.store.find_product(name)?.is_some() {
            return Err(ShopError::DuplicateProduct(name.to_string()));
        }

        let item = InventoryItem::new(name, category, quantity, price);
        let mut items = self.store.load_inventory()?;
        items.push(item.clone());
        self.store.save_inventory(&items)?;
        info!(product = %item.name, quantity, price, "product stocked");
        Ok(item)
    }

    /// Add stock to an existing product (the reorder flow).
    pub fn restock_product(&self, name: &str, quantity: u32) -> ShopResult<InventoryItem> {
        if quantity == 0 {
            return Err(ShopError::Validation(
                "restock quantity must be positive".into(),
            ));
        }
        let mut items = self.store.load_inventory()?;
        let item = items
            .iter_mut()
            .find(|i| i.name_matches(name))
            .ok_or_else(|| ShopError::UnknownProduct(name.trim().to_string()))?;
        item.quantity += quantity;
        let updated = item.clone();
        self.store.save_inventory(&items)?;
        info!(product = %updated.name, added = quantity, on_hand = updated.quantity, "product restocked");
        Ok(updated)
    }

    /// Sell `quantity` units of a product. Stock never goes below zero:
    /// overselling is rejected, and selling the exact remainder marks the
    /// receipt as depleted.
    pub fn sell_product(&self, name: &str, quantity: u32) -> ShopResult<SaleReceipt> {
        if quantity == 0 {
            return Err(ShopError::Validation("sale quantity must be positive".into()));
        }
        let mut items = self.store.load_inventory()?;
        let item = items
            .iter_mut()
            .find(|i| i.name_matches(name))
            .ok_or_else(|| ShopError::UnknownProduct(name.trim().to_string()))?;
        if item.price <= 0.0 {
            return Err(ShopError::Validation(
                "product price must be positive".into(),
            ));
        }
        if quantity > item.quantity {
            return Err(ShopError::OutOfStock {
                requested: quantity,
                available: item.quantity,
            });
        }

        item.quantity -= quantity;
        let receipt = SaleReceipt {
            product: item.name.clone(),
            quantity,
            unit_price: item.price,
            total: item.price * f64::from(quantity),
            depleted: item.is_depleted(),
        };
        self.store.save_inventory(&items)?;

        if receipt.depleted {
            warn!(product = %receipt.product, "stock depleted, reorder needed");
        }
        info!(product = %receipt.product, quantity, total = receipt.total, "sale completed");
        Ok(receipt)
    }

    /// Remove a product row entirely (case-insensitive name match).
    pub fn delete_product(&self, name: &str) -> ShopResult<()> {
        let mut items = self.store.load_inventory()?;
        let before = items.len();
        items.retain(|i| !i.name_matches(name));
        if items.len() == before {
            return Err(ShopError::UnknownProduct(name.trim().to_string()));
        }
        self.store.save_inventory(&items)?;
        info!(product = %name.trim(), "product deleted");
        Ok(())
    }

    /// All inventory rows, in file order.
    pub fn list_inventory(&self) -> ShopResult<Vec<InventoryItem>> {
        Ok(self.store.load_inventory()?)
    }

    /// Find one product by name.
    pub fn find_product(&self, name: &str) -> ShopResult<Option<InventoryItem>> {
        Ok(self.store.find_product(name)?)
    }

    // =========================================================================
    // Prescription Operations
    // =========================================================================

    /// Record a prescription for a customer full name, stamped now.
    pub fn add_prescription(
        &self,
        customer: &str,
        far: LensReading,
        near: LensReading,
        right_sketch: Vec<Segment>,
        left_sketch: Vec<Segment>,
    ) -> ShopResult<Prescription> {
        let customer = customer.trim();
        if customer.is_empty() {
            return Err(ShopError::Validation("customer name is required".into()));
        }
        let prescription = Prescription::new(customer, far, near, right_sketch, left_sketch);
        self.store.append_prescription(&prescription)?;
        info!(customer = %prescription.customer, "prescription recorded");
        Ok(prescription)
    }

    /// All prescriptions for a customer full name.
    pub fn prescriptions_for(&self, full_name: &str) -> ShopResult<Vec<Prescription>> {
        Ok(self.store.prescriptions_for(full_name)?)
    }

    // =========================================================================
    // Note Operations
    // =========================================================================

    /// Record a note for a customer full name, stamped now. Empty bodies
    /// are rejected.
    pub fn add_note(&self, customer: &str, text: &str) -> ShopResult<Note> {
        let customer = customer.trim();
        if customer.is_empty() {
            return Err(ShopError::Validation("customer name is required".into()));
        }
        if text.trim().is_empty() {
            return Err(ShopError::Validation("note text is empty".into()));
        }
        let note = Note::new(customer, text.trim_end());
        self.store.append_note(&note)?;
        info!(customer = %note.customer, "note recorded");
        Ok(note)
    }

    /// All notes for a customer full name.
    pub fn notes_for(&self, full_name: &str) -> ShopResult<Vec<Note>> {
        Ok(self.store.notes_for(full_name)?)
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Copy an external file into the documents directory for a customer.
    /// Returns the stored filename to put on the customer form.
    pub fn attach_document(&self, full_name: &str, source: &Path) -> ShopResult<String> {
        Ok(documents::attach_document(self.config(), full_name, source)?)
    }

    /// Resolve a stored document filename, erroring when the file is gone.
    pub fn document_path(&self, stored_name: &str) -> ShopResult<PathBuf> {
        Ok(documents::document_path(self.config(), stored_name)?)
    }

    /// Keep only the document names that still resolve on disk, warning
    /// about the rest.
    fn existing_documents(&self, names: Vec<String>) -> Vec<String> {
        names
            .into_iter()
            .filter(|name| {
                let present = documents::document_exists(self.config(), name);
                if !present {
                    warn!(document = %name, "referenced document missing, dropped from row");
                }
                present
            })
            .collect()
    }
}

/// Field-level validation shared by register and update: first name is
/// mandatory, phone and email only checked when present.
fn validate_form(form: &CustomerForm) -> ShopResult<()> {
    if form.name.is_empty() {
        return Err(ShopError::Validation("first name is required".into()));
    }
    if !form.phone.is_empty() && !validate_phone(&form.phone) {
        return Err(ShopError::Validation(
            "phone must be 10 digits starting with 2 (landline) or 6 (mobile)".into(),
        ));
    }
    if !form.email.is_empty() && !validate_email(&form.email) {
        return Err(ShopError::Validation(
            "email must look like name@domain.tld".into(),
        ));
    }
    Ok(())
}

fn full_name_of(name: &str, surname: &str) -> String {
    format!("{} {}", name.trim(), surname.trim())
        .trim()
        .to_string()
}

fn trimmed(form: CustomerForm) -> CustomerForm {
    CustomerForm {
        name: form.name.trim().to_string(),
        surname: form.surname.trim().to_string(),
        phone: form.phone.trim().to_string(),
        email: form.email.trim().to_string(),
        address: form.address.trim().to_string(),
        documents: form.documents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_form_requires_first_name() {
        let form = CustomerForm {
            surname: "Papadopoulou".into(),
            ..Default::default()
        };
        assert!(matches!(
            validate_form(&form),
            Err(ShopError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_form_accepts_blank_contact_fields() {
        let form = CustomerForm {
            name: "Maria".into(),
            ..Default::default()
        };
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn test_full_name_of_handles_missing_surname() {
        assert_eq!(full_name_of("Maria", ""), "Maria");
        assert_eq!(full_name_of(" Maria ", " Papadopoulou "), "Maria Papadopoulou");
    }
}
