//! Customer notes.

use serde::{Deserialize, Serialize};

use super::timestamp;

/// A timestamped freeform note, attached to a customer by full name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub recorded_at: String,
    /// Customer full name
    pub customer: String,
    /// Freeform body; may span multiple lines
    pub text: String,
}

impl Note {
    /// Create a note stamped with the current time.
    pub fn new(customer: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recorded_at: timestamp(),
            customer: customer.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_is_stamped() {
        let note = Note::new("Maria Papadopoulou", "Prefers titanium frames");
        assert_eq!(note.customer, "Maria Papadopoulou");
        assert_eq!(note.text, "Prefers titanium frames");
        assert_eq!(note.recorded_at.len(), 19);
    }
}
