//! Note table operations.

use super::{table, Store, StoreResult};
use crate::models::{name_key, Note};

/// Header row of `notes.csv`.
pub const NOTE_HEADERS: [&str; 3] = ["Date", "Customer", "Note"];

impl Store {
    /// Load every note row.
    pub fn load_notes(&self) -> StoreResult<Vec<Note>> {
        let (_, rows) = table::read_table(&self.config().notes_file())?;
        Ok(rows
            .iter()
            .map(|row| Note {
                recorded_at: table::field(row, 0).to_string(),
                customer: table::field(row, 1).to_string(),
                text: table::field(row, 2).to_string(),
            })
            .collect())
    }

    /// Rewrite the whole note table.
    pub fn save_notes(&self, notes: &[Note]) -> StoreResult<()> {
        let rows: Vec<Vec<String>> = notes
            .iter()
            .map(|note| {
                vec![
                    note.recorded_at.clone(),
                    note.customer.clone(),
                    note.text.clone(),
                ]
            })
            .collect();
        table::write_table(&self.config().notes_file(), &NOTE_HEADERS, &rows)
    }

    /// Add one note row.
    pub fn append_note(&self, note: &Note) -> StoreResult<()> {
        let mut notes = self.load_notes()?;
        notes.push(note.clone());
        self.save_notes(&notes)
    }

    /// All notes for a customer full name.
    pub fn notes_for(&self, full_name: &str) -> StoreResult<Vec<Note>> {
        let key = name_key(full_name);
        Ok(self
            .load_notes()?
            .into_iter()
            .filter(|note| name_key(&note.customer) == key)
            .collect())
    }

    /// Rewrite the stored customer name on every matching note. Returns
    /// how many rows changed; the file is only rewritten when at least one
    /// did.
    pub fn rename_note_customer(&self, old_name: &str, new_name: &str) -> StoreResult<usize> {
        let key = name_key(old_name);
        let mut notes = self.load_notes()?;
        let mut renamed = 0;
        for note in &mut notes {
            if name_key(&note.customer) == key {
                note.customer = new_name.to_string();
                renamed += 1;
            }
        }
        if renamed > 0 {
            self.save_notes(&notes)?;
        }
        Ok(renamed)
    }
}
