//! Optical prescriptions.

use serde::{Deserialize, Serialize};

use super::timestamp;

/// One straight stroke of a protractor sketch, in canvas coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Sphere/cylinder/axis for one eye, kept as free text the way the
/// prescription pad records them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EyeRx {
    pub sph: String,
    pub cyl: String,
    pub axis: String,
}

/// One row of the prescription pad: both eyes plus pupillary distance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LensReading {
    pub right: EyeRx,
    pub left: EyeRx,
    pub pupillary_distance: String,
}

/// A stored prescription: distance and near pad rows plus the two
/// freehand protractor sketches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub recorded_at: String,
    /// Customer full name - the only link back to the customer table
    pub customer: String,
    pub far: LensReading,
    pub near: LensReading,
    pub right_sketch: Vec<Segment>,
    pub left_sketch: Vec<Segment>,
}

impl Prescription {
    /// Create a prescription stamped with the current time.
    pub fn new(
        customer: impl Into<String>,
        far: LensReading,
        near: LensReading,
        right_sketch: Vec<Segment>,
        left_sketch: Vec<Segment>,
    ) -> Self {
        Self {
            recorded_at: timestamp(),
            customer: customer.into(),
            far,
            near,
            right_sketch,
            left_sketch,
        }
    }
}
