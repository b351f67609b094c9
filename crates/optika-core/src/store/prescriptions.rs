//! Prescription table operations.

use super::{table, Store, StoreError, StoreResult};
use crate::models::{name_key, EyeRx, LensReading, Prescription, Segment};

/// Header row of `prescriptions.csv`: timestamp, customer, the fourteen
/// pad fields (distance row then near row, right eye before left), and the
/// two sketch columns.
pub const PRESCRIPTION_HEADERS: [&str; 18] = [
    "Date",
    "Customer",
    "Far Sph R",
    "Far Cyl R",
    "Far Axis R",
    "Far Sph L",
    "Far Cyl L",
    "Far Axis L",
    "Far PD",
    "Near Sph R",
    "Near Cyl R",
    "Near Axis R",
    "Near Sph L",
    "Near Cyl L",
    "Near Axis L",
    "Near PD",
    "Right Sketch",
    "Left Sketch",
];

impl Store {
    /// Load every prescription row.
    pub fn load_prescriptions(&self) -> StoreResult<Vec<Prescription>> {
        let path = self.config().prescriptions_file();
        let (_, rows) = table::read_table(&path)?;
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                prescription_from_row(row).map_err(|e| StoreError::Malformed {
                    file: path.display().to_string(),
                    record: i + 1,
                    reason: format!("bad sketch data: {e}"),
                })
            })
            .collect()
    }

    /// Rewrite the whole prescription table.
    pub fn save_prescriptions(&self, prescriptions: &[Prescription]) -> StoreResult<()> {
        let rows = prescriptions
            .iter()
            .map(prescription_to_row)
            .collect::<Result<Vec<_>, _>>()?;
        table::write_table(
            &self.config().prescriptions_file(),
            &PRESCRIPTION_HEADERS,
            &rows,
        )
    }

    /// Add one prescription row.
    pub fn append_prescription(&self, prescription: &Prescription) -> StoreResult<()> {
        let mut prescriptions = self.load_prescriptions()?;
        prescriptions.push(prescription.clone());
        self.save_prescriptions(&prescriptions)
    }

    /// All prescriptions for a customer full name.
    pub fn prescriptions_for(&self, full_name: &str) -> StoreResult<Vec<Prescription>> {
        let key = name_key(full_name);
        Ok(self
            .load_prescriptions()?
            .into_iter()
            .filter(|rx| name_key(&rx.customer) == key)
            .collect())
    }

    /// Rewrite the stored customer name on every matching prescription.
    /// Returns how many rows changed; the file is only rewritten when at
    /// least one did.
    pub fn rename_prescription_customer(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> StoreResult<usize> {
        let key = name_key(old_name);
        let mut prescriptions = self.load_prescriptions()?;
        let mut renamed = 0;
        for rx in &mut prescriptions {
            if name_key(&rx.customer) == key {
                rx.customer = new_name.to_string();
                renamed += 1;
            }
        }
        if renamed > 0 {
            self.save_prescriptions(&prescriptions)?;
        }
        Ok(renamed)
    }

    /// Remove every prescription for a customer full name. Returns how
    /// many rows were dropped.
    pub fn delete_prescriptions_for(&self, full_name: &str) -> StoreResult<usize> {
        let key = name_key(full_name);
        let mut prescriptions = self.load_prescriptions()?;
        let before = prescriptions.len();
        prescriptions.retain(|rx| name_key(&rx.customer) != key);
        let removed = before - prescriptions.len();
        if removed > 0 {
            self.save_prescriptions(&prescriptions)?;
        }
        Ok(removed)
    }
}

fn sketch_from_field(raw: &str) -> Result<Vec<Segment>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

fn prescription_from_row(row: &[String]) -> Result<Prescription, serde_json::Error> {
    let text = |i: usize| table::field(row, i).to_string();
    let reading = |base: usize| LensReading {
        right: EyeRx {
            sph: text(base),
            cyl: text(base + 1),
            axis: text(base + 2),
        },
        left: EyeRx {
            sph: text(base + 3),
            cyl: text(base + 4),
            axis: text(base + 5),
        },
        pupillary_distance: text(base + 6),
    };
    Ok(Prescription {
        recorded_at: text(0),
        customer: text(1),
        far: reading(2),
        near: reading(9),
        right_sketch: sketch_from_field(table::field(row, 16))?,
        left_sketch: sketch_from_field(table::field(row, 17))?,
    })
}

fn prescription_to_row(rx: &Prescription) -> Result<Vec<String>, StoreError> {
    let mut row = vec![rx.recorded_at.clone(), rx.customer.clone()];
    for reading in [&rx.far, &rx.near] {
        row.push(reading.right.sph.clone());
        row.push(reading.right.cyl.clone());
        row.push(reading.right.axis.clone());
        row.push(reading.left.sph.clone());
        row.push(reading.left.cyl.clone());
        row.push(reading.left.axis.clone());
        row.push(reading.pupillary_distance.clone());
    }
    row.push(serde_json::to_string(&rx.right_sketch)?);
    row.push(serde_json::to_string(&rx.left_sketch)?);
    Ok(row)
}
