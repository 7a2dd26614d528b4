//! Spot allocation: the park/exit engine, its storage seams and the
//! availability aggregator.
//!
//! The race-prevention protocol lives at the store boundary. A claim is one
//! conditional update under `SQLite`'s write lock, and a plate's open session
//! is guarded by a partial unique index. The engine adds the compensating
//! release that undoes a claim when the session cannot be opened.

mod availability;
mod engine;
mod store;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use availability::{availability, Availability};
pub use engine::{AllocationEngine, ParkOptions};
pub use store::{SessionStore, SpotStore};
