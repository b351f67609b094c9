//! Customer records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A customer row: identity, contact details, and attached document names.
///
/// There is no record ID; a customer is identified by first+last name, and
/// the other tables refer back to it only through the full-name string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    /// First name - the only mandatory field
    pub name: String,
    pub surname: String,
    /// As entered (validation strips punctuation, storage does not)
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Filenames inside the documents directory
    pub documents: Vec<String>,
}

impl Customer {
    /// The denormalized join key used by the prescription and note tables.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }

    /// Case-insensitive match on first+last name.
    pub fn matches_identity(&self, name: &str, surname: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
            && self.surname.trim().to_lowercase() == surname.trim().to_lowercase()
    }
}

/// Canonical form of a full name for cross-table matching: lowercased,
/// with runs of whitespace collapsed. Names arrive from free-text fields
/// with stray spaces and mixed case; this is the one matching rule used
/// everywhere.
pub fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Per-customer indicators, recomputed from the tables on demand rather
/// than stored (a stored flags column goes stale as soon as a note or
/// prescription lands).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    /// At least one referenced document file exists on disk
    pub documents: bool,
    /// At least one prescription row matches the full name
    pub prescriptions: bool,
    /// At least one note row matches the full name
    pub notes: bool,
}

impl Flags {
    /// True when no indicator is set.
    pub fn is_empty(&self) -> bool {
        !(self.documents || self.prescriptions || self.notes)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.documents {
            parts.push("Documents");
        }
        if self.prescriptions {
            parts.push("Prescriptions");
        }
        if self.notes {
            parts.push("Notes");
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_trims() {
        let customer = Customer {
            name: "Maria".into(),
            ..Default::default()
        };
        assert_eq!(customer.full_name(), "Maria");

        let customer = Customer {
            name: "Maria".into(),
            surname: "Papadopoulou".into(),
            ..Default::default()
        };
        assert_eq!(customer.full_name(), "Maria Papadopoulou");
    }

    #[test]
    fn test_matches_identity_ignores_case() {
        let customer = Customer {
            name: "Maria".into(),
            surname: "Papadopoulou".into(),
            ..Default::default()
        };
        assert!(customer.matches_identity("maria", "PAPADOPOULOU"));
        assert!(customer.matches_identity(" Maria ", "Papadopoulou"));
        assert!(!customer.matches_identity("Maria", "Papadaki"));
    }

    #[test]
    fn test_name_key_collapses_whitespace() {
        assert_eq!(name_key("  Maria   Papadopoulou "), "maria papadopoulou");
        assert_eq!(name_key("Maria Papadopoulou"), name_key("MARIA  PAPADOPOULOU"));
    }

    #[test]
    fn test_flags_display() {
        let flags = Flags {
            documents: true,
            prescriptions: false,
            notes: true,
        };
        assert_eq!(flags.to_string(), "Documents, Notes");
        assert_eq!(Flags::default().to_string(), "");
        assert!(Flags::default().is_empty());
    }
}
