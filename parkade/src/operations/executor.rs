//! Plan execution engine.
//!
//! Every action of a plan runs inside one IMMEDIATE transaction: either the
//! whole layout is registered or none of it is.

use std::collections::HashMap;

use serde::Serialize;

use crate::database::registry::{insert_floor, insert_lot, insert_spot};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::ids::{FloorId, LotId};

use super::plan::{OperationPlan, PlanAction};

/// Result of executing a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Whether the execution was successful.
    pub success: bool,

    /// Whether this was a dry-run (no actual changes made).
    pub dry_run: bool,

    /// Descriptions of actions that were taken (or would be taken in dry-run).
    pub actions_taken: Vec<String>,

    /// Warnings from the plan.
    pub warnings: Vec<String>,

    /// Lots registered (or planned).
    pub lots_created: usize,

    /// Floors registered (or planned).
    pub floors_created: usize,

    /// Spots registered (or planned).
    pub spots_created: usize,
}

impl ExecutionResult {
    fn from_plan(plan: &OperationPlan, dry_run: bool) -> Self {
        let (lots_created, floors_created, spots_created) = plan.counts();
        Self {
            success: true,
            dry_run,
            actions_taken: plan.actions.iter().map(PlanAction::description).collect(),
            warnings: plan.warnings.clone(),
            lots_created,
            floors_created,
            spots_created,
        }
    }
}

/// Executes operation plans against the database.
///
/// # Examples
///
/// ```
/// use parkade::operations::{OperationPlan, PlanAction, PlanExecutor};
/// use parkade::{Database, DatabaseConfig, SpotType};
///
/// let dir = tempfile::tempdir().unwrap();
/// let db = Database::open(DatabaseConfig::new(dir.path().join("parkade.db"))).unwrap();
///
/// let plan = OperationPlan::new("Seed")
///     .add_action(PlanAction::CreateLot { name: "Central".into(), address: "1 Main St".into() })
///     .add_action(PlanAction::AddFloor { lot: "Central".into(), number: 0 })
///     .add_action(PlanAction::AddSpot {
///         lot: "Central".into(),
///         floor: 0,
///         number: "C-1".into(),
///         spot_type: SpotType::Compact,
///     });
///
/// let preview = PlanExecutor::new(&db).dry_run().execute(&plan).unwrap();
/// assert!(preview.dry_run);
/// assert!(db.list_lots().unwrap().is_empty());
///
/// let result = PlanExecutor::new(&db).execute(&plan).unwrap();
/// assert_eq!(result.spots_created, 1);
/// assert_eq!(db.list_lots().unwrap().len(), 1);
/// ```
pub struct PlanExecutor<'a> {
    db: &'a Database,
    dry_run: bool,
}

impl<'a> PlanExecutor<'a> {
    /// Creates a new plan executor.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db, dry_run: false }
    }

    /// Sets the executor to dry-run mode.
    ///
    /// In dry-run mode the plan is reported but the database is not touched.
    #[must_use]
    pub const fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Executes the given plan.
    ///
    /// # Errors
    ///
    /// Returns an error if any action fails; nothing from the plan is kept.
    pub fn execute(&self, plan: &OperationPlan) -> Result<ExecutionResult> {
        if self.dry_run || plan.is_empty() {
            return Ok(ExecutionResult::from_plan(plan, self.dry_run));
        }

        let tx = self.db.immediate()?;
        let mut lots: HashMap<&str, LotId> = HashMap::new();
        let mut floors: HashMap<(&str, i32), FloorId> = HashMap::new();

        for action in &plan.actions {
            match action {
                PlanAction::CreateLot { name, address } => {
                    let id = insert_lot(&tx, name, address)?;
                    lots.insert(name.as_str(), id);
                }
                PlanAction::AddFloor { lot, number } => {
                    let lot_id = lots.get(lot.as_str()).copied().ok_or_else(|| {
                        Error::NotFound {
                            resource: format!("parking lot '{lot}'"),
                        }
                    })?;
                    let id = insert_floor(&tx, lot_id, *number)?;
                    floors.insert((lot.as_str(), *number), id);
                }
                PlanAction::AddSpot {
                    lot,
                    floor,
                    number,
                    spot_type,
                } => {
                    let floor_id =
                        floors
                            .get(&(lot.as_str(), *floor))
                            .copied()
                            .ok_or_else(|| Error::NotFound {
                                resource: format!("floor {floor} of lot '{lot}'"),
                            })?;
                    insert_spot(&tx, floor_id, number, *spot_type)?;
                }
            }
        }

        tx.commit()?;
        let result = ExecutionResult::from_plan(plan, false);
        log::info!(
            "seeded {} lots, {} floors, {} spots",
            result.lots_created,
            result.floors_created,
            result.spots_created
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::availability;
    use crate::database::test_util::create_test_database;
    use crate::spot::SpotType;

    fn lot(name: &str) -> PlanAction {
        PlanAction::CreateLot {
            name: name.into(),
            address: "1 Main St".into(),
        }
    }

    fn floor(lot: &str, number: i32) -> PlanAction {
        PlanAction::AddFloor {
            lot: lot.into(),
            number,
        }
    }

    fn spot(lot: &str, floor: i32, number: &str, spot_type: SpotType) -> PlanAction {
        PlanAction::AddSpot {
            lot: lot.into(),
            floor,
            number: number.into(),
            spot_type,
        }
    }

    #[test]
    fn test_execute_registers_everything() {
        let db = create_test_database();
        let plan = OperationPlan::new("Seed")
            .add_action(lot("A"))
            .add_action(floor("A", 0))
            .add_action(spot("A", 0, "C-1", SpotType::Compact))
            .add_action(spot("A", 0, "C-2", SpotType::Compact))
            .add_action(floor("A", 1))
            .add_action(spot("A", 1, "L-1", SpotType::Large));

        let result = PlanExecutor::new(&db).execute(&plan).unwrap();
        assert!(result.success);
        assert!(!result.dry_run);
        assert_eq!(result.actions_taken.len(), 6);
        assert_eq!(
            (result.lots_created, result.floors_created, result.spots_created),
            (1, 2, 3)
        );

        let lots = db.list_lots().unwrap();
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].total_floors, 2);

        let counts = availability(&db).unwrap();
        assert_eq!(counts.count(SpotType::Compact), 2);
        assert_eq!(counts.count(SpotType::Large), 1);
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let db = create_test_database();
        let plan = OperationPlan::new("Seed")
            .add_action(lot("A"))
            .add_action(floor("A", 0));

        let result = PlanExecutor::new(&db).dry_run().execute(&plan).unwrap();
        assert!(result.dry_run);
        assert_eq!(result.floors_created, 1);
        assert!(db.list_lots().unwrap().is_empty());
    }

    #[test]
    fn test_failure_rolls_back_whole_plan() {
        let db = create_test_database();
        let plan = OperationPlan::new("Seed")
            .add_action(lot("A"))
            .add_action(floor("A", 0))
            .add_action(spot("A", 0, "C-1", SpotType::Compact))
            .add_action(spot("A", 0, "C-1", SpotType::Large));

        let err = PlanExecutor::new(&db).execute(&plan).unwrap_err();
        assert!(err.is_validation());
        assert!(db.list_lots().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_parent_is_not_found() {
        let db = create_test_database();
        let plan = OperationPlan::new("Seed").add_action(floor("missing", 0));

        let err = PlanExecutor::new(&db).execute(&plan).unwrap_err();
        assert!(err.is_not_found());
    }
}
