//! Layout seeding plans.
//!
//! Turns the `layout` section of the configuration into registrations.
//! Lots whose name is already registered are skipped with a warning, so
//! running `parkade seed` twice is harmless.

use std::collections::HashSet;

use crate::config::LotLayout;
use crate::database::Database;
use crate::error::Result;

use super::plan::{OperationPlan, PlanAction};

/// Plan builder for seeding lots, floors and spots from a layout.
///
/// # Examples
///
/// ```no_run
/// use parkade::config::ConfigBuilder;
/// use parkade::operations::{PlanExecutor, SeedPlan};
/// use parkade::{Database, DatabaseConfig};
///
/// let config = ConfigBuilder::new().build().unwrap();
/// let db = Database::open(DatabaseConfig::new("/tmp/parkade.db")).unwrap();
///
/// let plan = SeedPlan::new(config.layout()).build_plan(&db).unwrap();
/// let result = PlanExecutor::new(&db).execute(&plan).unwrap();
/// println!("{} spots registered", result.spots_created);
/// ```
pub struct SeedPlan<'a> {
    layout: &'a [LotLayout],
}

impl<'a> SeedPlan<'a> {
    /// Creates a seeding plan builder for the given layout.
    #[must_use]
    pub const fn new(layout: &'a [LotLayout]) -> Self {
        Self { layout }
    }

    /// Builds the plan against the current registry contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be queried.
    pub fn build_plan(&self, db: &Database) -> Result<OperationPlan> {
        let mut plan = OperationPlan::new("Seed parking layout");
        if self.layout.is_empty() {
            return Ok(plan.add_warning("No layout configured; nothing to seed"));
        }

        let mut planned = HashSet::new();
        for lot in self.layout {
            let name = lot.name.trim();
            if !planned.insert(name.to_string()) {
                plan = plan.add_warning(format!("Lot '{name}' appears twice in layout, skipping"));
                continue;
            }
            if db.find_lot_by_name(name)?.is_some() {
                log::debug!("seed: lot '{name}' already registered");
                plan = plan.add_warning(format!("Lot '{name}' already exists, skipping"));
                continue;
            }

            plan = plan.add_action(PlanAction::CreateLot {
                name: name.to_string(),
                address: lot.address.trim().to_string(),
            });
            for floor in &lot.floors {
                plan = plan.add_action(PlanAction::AddFloor {
                    lot: name.to_string(),
                    number: floor.number,
                });
                for spot in &floor.spots {
                    for (number, spot_type) in spot.expand() {
                        plan = plan.add_action(PlanAction::AddSpot {
                            lot: name.to_string(),
                            floor: floor.number,
                            number,
                            spot_type,
                        });
                    }
                }
            }
        }

        Ok(plan)
    }
}
