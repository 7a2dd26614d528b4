//! JSON-over-HTTP surface.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | POST | `/api/vehicles/park` | 201 session |
//! | POST | `/api/vehicles/exit/{licensePlate}` | 200 session |
//! | GET | `/api/vehicles/availability` | 200 availability |
//! | POST, GET | `/api/parking-lots`, `/api/parking-lots/{id}` | 201 / 200 lot |
//! | POST, GET | `/api/floors`, `/api/floors/{id}`, `/api/floors/parking-lot/{lotId}` | 201 / 200 floor |
//! | POST, GET | `/api/spots`, `/api/spots/{id}`, `/api/spots/available?type=T`, `/api/spots/floor/{floorId}` | 201 / 200 spot |
//!
//! Failures carry an [`ErrorBody`]: 400 for validation, 404 for unknown
//! entities or plates, 409 for an already parked vehicle or a full spot
//! type, 500 otherwise.

pub mod dto;
pub mod routes;
pub mod server;

pub use dto::{ErrorBody, FloorRequest, LotRequest, ParkRequest, SpotRequest};
pub use routes::{route, ApiResponse};
pub use server::{ApiServer, ShutdownHandle, MAX_BODY_BYTES};
