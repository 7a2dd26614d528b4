//! Output formatting for registry records, sessions and availability.
//!
//! The CLI renders every result through an [`OutputFormatter`] chosen from
//! the configured [`OutputFormat`]: a column-aligned human form or pretty
//! JSON using the same camelCase views the HTTP API returns.

mod formatters;

use crate::allocation::Availability;
use crate::config::OutputFormat;
use crate::layout::{ParkingFloor, ParkingLot};
use crate::operations::ExecutionResult;
use crate::spot::ParkingSpot;
use crate::vehicle::SessionView;
use crate::Result;

pub use formatters::{HumanFormatter, JsonFormatter};

/// Renders results for display.
pub trait OutputFormatter {
    /// Format a list of lots.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn lots(&self, lots: &[ParkingLot]) -> Result<String>;

    /// Format a list of floors.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn floors(&self, floors: &[ParkingFloor]) -> Result<String>;

    /// Format a list of spots.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn spots(&self, spots: &[ParkingSpot]) -> Result<String>;

    /// Format a single vehicle session.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn session(&self, session: &SessionView) -> Result<String>;

    /// Format an availability snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn availability(&self, availability: &Availability) -> Result<String>;

    /// Format the outcome of a seeding run.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn seed(&self, result: &ExecutionResult) -> Result<String>;
}

impl OutputFormat {
    /// Create a formatter for this output format.
    #[must_use]
    pub fn create_formatter(self) -> Box<dyn OutputFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}
