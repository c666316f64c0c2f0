use serde::{Deserialize, Serialize};

/// Whether a provider has any free slot on one day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAvailabilityEntry {
    pub day: i8,
    pub available: bool,
}
