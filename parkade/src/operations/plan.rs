//! Plan types for registry operations.
//!
//! A plan describes the registrations an operation will perform without
//! touching the database, so it can be printed for a dry run or executed.

use crate::spot::SpotType;

/// A single registration performed during plan execution.
///
/// Floors and spots refer to their parents by lot name and floor number,
/// since the parents usually do not have identifiers until the plan runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Register a new lot.
    CreateLot {
        /// Lot name.
        name: String,
        /// Street address.
        address: String,
    },

    /// Add a floor to a lot created earlier in the plan.
    AddFloor {
        /// Name of the owning lot.
        lot: String,
        /// Floor number.
        number: i32,
    },

    /// Register a spot on a floor added earlier in the plan.
    AddSpot {
        /// Name of the owning lot.
        lot: String,
        /// Number of the owning floor.
        floor: i32,
        /// Spot number, unique within the floor.
        number: String,
        /// Spot type.
        spot_type: SpotType,
    },
}

impl PlanAction {
    /// Returns a human-readable description of this action.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::CreateLot { name, address } => format!("Create lot '{name}' at {address}"),
            Self::AddFloor { lot, number } => format!("Add floor {number} to lot '{lot}'"),
            Self::AddSpot {
                lot,
                floor,
                number,
                spot_type,
            } => format!("Add {spot_type} spot {number} to floor {floor} of lot '{lot}'"),
        }
    }
}

/// A complete operation plan describing all actions to be taken.
#[derive(Debug, Clone, Default)]
pub struct OperationPlan {
    /// A human-readable description of the operation.
    pub description: String,

    /// The sequence of actions to perform.
    pub actions: Vec<PlanAction>,

    /// Warnings to communicate to the user.
    pub warnings: Vec<String>,
}

impl OperationPlan {
    /// Creates a new, empty plan.
    ///
    /// # Examples
    ///
    /// ```
    /// use parkade::operations::OperationPlan;
    ///
    /// let plan = OperationPlan::new("Seed layout");
    /// assert_eq!(plan.description, "Seed layout");
    /// assert!(plan.is_empty());
    /// ```
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            actions: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an action to the plan.
    #[must_use]
    pub fn add_action(mut self, action: PlanAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Adds a warning to the plan.
    #[must_use]
    pub fn add_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Checks if the plan has no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Returns the number of actions in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Counts the actions of each kind as `(lots, floors, spots)`.
    #[must_use]
    pub fn counts(&self) -> (usize, usize, usize) {
        self.actions
            .iter()
            .fold((0, 0, 0), |(lots, floors, spots), action| match action {
                PlanAction::CreateLot { .. } => (lots + 1, floors, spots),
                PlanAction::AddFloor { .. } => (lots, floors + 1, spots),
                PlanAction::AddSpot { .. } => (lots, floors, spots + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        let lot = PlanAction::CreateLot {
            name: "Central".into(),
            address: "1 Main St".into(),
        };
        assert_eq!(lot.description(), "Create lot 'Central' at 1 Main St");

        let spot = PlanAction::AddSpot {
            lot: "Central".into(),
            floor: 2,
            number: "E-1".into(),
            spot_type: SpotType::Electric,
        };
        assert_eq!(
            spot.description(),
            "Add ELECTRIC spot E-1 to floor 2 of lot 'Central'"
        );
    }

    #[test]
    fn test_plan_builders_and_counts() {
        let plan = OperationPlan::new("Seed")
            .add_action(PlanAction::CreateLot {
                name: "A".into(),
                address: "x".into(),
            })
            .add_action(PlanAction::AddFloor {
                lot: "A".into(),
                number: 0,
            })
            .add_action(PlanAction::AddSpot {
                lot: "A".into(),
                floor: 0,
                number: "1".into(),
                spot_type: SpotType::Compact,
            })
            .add_action(PlanAction::AddSpot {
                lot: "A".into(),
                floor: 0,
                number: "2".into(),
                spot_type: SpotType::Compact,
            })
            .add_warning("careful");

        assert_eq!(plan.len(), 4);
        assert!(!plan.is_empty());
        assert_eq!(plan.counts(), (1, 1, 2));
        assert_eq!(plan.warnings, vec!["careful".to_string()]);
    }
}
