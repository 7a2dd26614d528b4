//! Availability aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spot::SpotType;

use super::store::SpotStore;

/// Point-in-time count of free spots.
///
/// Every declared [`SpotType`] has an entry, zero included, and `total` is
/// the sum of the per-type counts.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use parkade::{Availability, SpotType};
///
/// let counts = BTreeMap::from([(SpotType::Large, 2)]);
/// let availability = Availability::from_counts(&counts);
/// assert_eq!(availability.count(SpotType::Large), 2);
/// assert_eq!(availability.count(SpotType::Compact), 0);
/// assert_eq!(availability.total, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Free spots per type.
    #[serde(rename = "availableSpots")]
    pub per_type: BTreeMap<SpotType, u64>,
    /// Free spots across all types.
    #[serde(rename = "totalAvailable")]
    pub total: u64,
}

impl Availability {
    /// Builds a snapshot from raw counts, filling in zero for missing types.
    #[must_use]
    pub fn from_counts(counts: &BTreeMap<SpotType, u64>) -> Self {
        let per_type: BTreeMap<SpotType, u64> = SpotType::ALL
            .into_iter()
            .map(|t| (t, counts.get(&t).copied().unwrap_or(0)))
            .collect();
        let total = per_type.values().sum();
        Self { per_type, total }
    }

    /// Free spots of one type.
    #[must_use]
    pub fn count(&self, spot_type: SpotType) -> u64 {
        self.per_type.get(&spot_type).copied().unwrap_or(0)
    }
}

/// Reads the current availability from a spot store.
///
/// # Errors
///
/// Returns an error if the underlying read fails.
pub fn availability<S: SpotStore + ?Sized>(spots: &S) -> Result<Availability> {
    Ok(Availability::from_counts(&spots.free_counts()?))
}
