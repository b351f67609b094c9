//! Domain models.

mod customer;
mod inventory;
mod note;
mod prescription;

pub use customer::*;
pub use inventory::*;
pub use note::*;
pub use prescription::*;

/// Timestamp format used in every table row.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in table-row format.
pub fn timestamp() -> String {
    chrono::Local::now().format(STAMP_FORMAT).to_string()
}
