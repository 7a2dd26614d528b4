//! Registry operations using the plan-execute pattern.
//!
//! Operations are split into two phases:
//! 1. **Planning**: reads the registry and the requested layout, builds a plan
//! 2. **Execution**: applies the plan in a single transaction, or reports it
//!    unchanged in dry-run mode
//!
//! # Examples
//!
//! ```no_run
//! use parkade::config::ConfigBuilder;
//! use parkade::operations::{PlanExecutor, SeedPlan};
//! use parkade::{Database, DatabaseConfig};
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let db = Database::open(DatabaseConfig::new("/tmp/parkade.db")).unwrap();
//!
//! let plan = SeedPlan::new(config.layout()).build_plan(&db).unwrap();
//! for warning in &plan.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! let result = PlanExecutor::new(&db).execute(&plan).unwrap();
//! assert!(result.success);
//! ```

pub mod executor;
pub mod init;
pub mod plan;
pub mod seed;

pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction};
pub use seed::SeedPlan;
