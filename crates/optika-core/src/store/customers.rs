//! Customer table operations.

use super::{table, Store, StoreResult};
use crate::models::Customer;

/// Header row of `customers.csv`.
pub const CUSTOMER_HEADERS: [&str; 6] = [
    "First Name",
    "Last Name",
    "Phone",
    "Email",
    "Address",
    "Documents",
];

/// Separator inside the quoted Documents field.
const DOC_SEPARATOR: &str = ", ";

/// Which column a customer search scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// First or last name
    Name,
    Phone,
    Email,
    Address,
}

impl Store {
    /// Load every customer row.
    pub fn load_customers(&self) -> StoreResult<Vec<Customer>> {
        let (_, rows) = table::read_table(&self.config().customers_file())?;
        Ok(rows.iter().map(|row| customer_from_row(row)).collect())
    }

    /// Rewrite the whole customer table.
    pub fn save_customers(&self, customers: &[Customer]) -> StoreResult<()> {
        let rows: Vec<Vec<String>> = customers.iter().map(customer_to_row).collect();
        table::write_table(&self.config().customers_file(), &CUSTOMER_HEADERS, &rows)
    }

    /// Add one customer row.
    pub fn append_customer(&self, customer: &Customer) -> StoreResult<()> {
        let mut customers = self.load_customers()?;
        customers.push(customer.clone());
        self.save_customers(&customers)
    }

    /// Find a customer by first/last name, case-insensitively.
    pub fn find_customer(&self, name: &str, surname: &str) -> StoreResult<Option<Customer>> {
        Ok(self
            .load_customers()?
            .into_iter()
            .find(|c| c.matches_identity(name, surname)))
    }

    /// True when an existing row already claims this identity, phone, or
    /// email: same first+last name (case-insensitive), or same phone
    /// (exact), or same email (case-insensitive). Empty phone/email never
    /// match.
    pub fn has_duplicate_customer(
        &self,
        name: &str,
        surname: &str,
        phone: &str,
        email: &str,
    ) -> StoreResult<bool> {
        let customers = self.load_customers()?;
        Ok(customers.iter().any(|c| {
            c.matches_identity(name, surname)
                || (!phone.is_empty() && c.phone == phone)
                || (!email.is_empty()
                    && !c.email.is_empty()
                    && c.email.to_lowercase() == email.to_lowercase())
        }))
    }

    /// Case-insensitive substring search over one field.
    pub fn search_customers(&self, by: SearchField, query: &str) -> StoreResult<Vec<Customer>> {
        let needle = query.trim().to_lowercase();
        let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);
        let customers = self.load_customers()?;
        Ok(customers
            .into_iter()
            .filter(|c| match by {
                SearchField::Name => hit(&c.name) || hit(&c.surname),
                SearchField::Phone => hit(&c.phone),
                SearchField::Email => hit(&c.email),
                SearchField::Address => hit(&c.address),
            })
            .collect())
    }
}

fn customer_from_row(row: &[String]) -> Customer {
    // Rows written by older versions may lack trailing columns, and may
    // carry a seventh stored-flags column that is ignored here.
    let documents = table::field(row, 5)
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();
    Customer {
        name: table::field(row, 0).to_string(),
        surname: table::field(row, 1).to_string(),
        phone: table::field(row, 2).to_string(),
        email: table::field(row, 3).to_string(),
        address: table::field(row, 4).to_string(),
        documents,
    }
}

fn customer_to_row(customer: &Customer) -> Vec<String> {
    vec![
        customer.name.clone(),
        customer.surname.clone(),
        customer.phone.clone(),
        customer.email.clone(),
        customer.address.clone(),
        customer.documents.join(DOC_SEPARATOR),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;

    fn setup_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(ShopConfig::rooted_at(dir.path())).unwrap();
        (dir, store)
    }

    fn customer(name: &str, surname: &str) -> Customer {
        Customer {
            name: name.into(),
            surname: surname.into(),
            phone: "6971234567".into(),
            email: format!("{}@example.gr", name.to_lowercase()),
            address: "Ermou 1, Athens".into(),
            documents: vec!["Maria_20240101_120000_id.pdf".into()],
        }
    }

    #[test]
    fn test_append_and_load_round_trip() {
        let (_dir, store) = setup_store();
        let maria = customer("Maria", "Papadopoulou");
        store.append_customer(&maria).unwrap();

        let loaded = store.load_customers().unwrap();
        assert_eq!(loaded, vec![maria]);
    }

    #[test]
    fn test_find_customer_is_case_insensitive() {
        let (_dir, store) = setup_store();
        store.append_customer(&customer("Maria", "Papadopoulou")).unwrap();

        assert!(store.find_customer("MARIA", "papadopoulou").unwrap().is_some());
        assert!(store.find_customer("Maria", "Papadaki").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_rules() {
        let (_dir, store) = setup_store();
        let maria = customer("Maria", "Papadopoulou");
        store.append_customer(&maria).unwrap();

        // Same name
        assert!(store
            .has_duplicate_customer("maria", "PAPADOPOULOU", "", "")
            .unwrap());
        // Same phone, different name
        assert!(store
            .has_duplicate_customer("Eleni", "Georgiou", &maria.phone, "")
            .unwrap());
        // Same email, different case
        assert!(store
            .has_duplicate_customer("Eleni", "Georgiou", "", "MARIA@EXAMPLE.GR")
            .unwrap());
        // Empty phone/email never match empty columns
        assert!(!store
            .has_duplicate_customer("Eleni", "Georgiou", "", "")
            .unwrap());
    }

    #[test]
    fn test_search_by_field() {
        let (_dir, store) = setup_store();
        store.append_customer(&customer("Maria", "Papadopoulou")).unwrap();
        store.append_customer(&customer("Nikos", "Papadakis")).unwrap();

        let hits = store.search_customers(SearchField::Name, "papad").unwrap();
        assert_eq!(hits.len(), 2);

        let hits = store.search_customers(SearchField::Email, "nikos@").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Nikos");

        let hits = store.search_customers(SearchField::Address, "patras").unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_legacy_flags_column_is_dropped() {
        let (_dir, store) = setup_store();
        // A row written by an older release, with a stored flags column.
        let path = store.config().customers_file();
        let mut text = std::fs::read_to_string(&path).unwrap();
        text.push_str("Maria,Papadopoulou,6971234567,m@e.gr,Ermou 1,\"a.pdf, b.pdf\",\"Documents, Notes\"\n");
        std::fs::write(&path, text).unwrap();

        let loaded = store.load_customers().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].documents, vec!["a.pdf", "b.pdf"]);

        // A save rewrites the table without the stale column.
        store.save_customers(&loaded).unwrap();
        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(!rewritten.contains("Notes"));
    }
}
