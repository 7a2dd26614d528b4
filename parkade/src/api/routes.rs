//! Request routing.
//!
//! [`route`] maps a method, path and body to a status and JSON body. It
//! does no socket I/O, so every endpoint can be exercised directly against
//! a database.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tiny_http::Method;

use crate::allocation::AllocationEngine;
use crate::database::Database;
use crate::error::{Error, ValidationError};
use crate::ids::{FloorId, LotId, SpotId};
use crate::spot::SpotType;
use crate::vehicle::LicensePlate;

use super::dto::{ErrorBody, FloorRequest, LotRequest, ParkRequest, SpotRequest};

/// A routed response: status code and serialized JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON body.
    pub body: String,
}

impl ApiResponse {
    fn json<T: Serialize + ?Sized>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => Self::from_error(&Error::from(e)),
        }
    }

    fn error(body: &ErrorBody) -> Self {
        // ErrorBody holds only strings, numbers and a timestamp.
        let text = serde_json::to_string(body).unwrap_or_else(|_| {
            format!(r#"{{"status":{},"message":"error"}}"#, body.status)
        });
        Self {
            status: body.status,
            body: text,
        }
    }

    fn validation(errors: &[ValidationError]) -> Self {
        Self::error(&ErrorBody::validation(errors))
    }

    /// Maps a library error onto its HTTP status.
    ///
    /// Anything outside the allocation taxonomy becomes a generic 500; the
    /// detail goes to the log only.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Validation { field, message } => {
                Self::validation(&[ValidationError::new(field.as_str(), message.as_str())])
            }
            e if e.is_not_found() => Self::error(&ErrorBody::new(404, e.to_string())),
            e if e.is_conflict() => Self::error(&ErrorBody::new(409, e.to_string())),
            e => {
                log::error!("request failed: {e}");
                Self::error(&ErrorBody::new(500, "An unexpected error occurred"))
            }
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl<T: Serialize> From<crate::Result<T>> for ApiResponse {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(value) => Self::json(200, &value),
            Err(e) => Self::from_error(&e),
        }
    }
}

fn created<T: Serialize>(result: crate::Result<T>) -> ApiResponse {
    match result {
        Ok(value) => ApiResponse::json(201, &value),
        Err(e) => ApiResponse::from_error(&e),
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiResponse> {
    serde_json::from_str(body).map_err(|e| {
        log::debug!("malformed request body: {e}");
        ApiResponse::error(&ErrorBody::new(400, "Malformed JSON request body"))
    })
}

fn parse_id(field: &str, raw: &str) -> Result<i64, ApiResponse> {
    raw.parse().map_err(|_| {
        ApiResponse::validation(&[ValidationError::new(
            field,
            format!("'{raw}' is not a valid identifier"),
        )])
    })
}

fn decode(raw: &str) -> Result<String, ApiResponse> {
    urlencoding::decode(raw)
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| ApiResponse::error(&ErrorBody::new(400, "Path is not valid UTF-8")))
}

fn query_param(query: &str, name: &str) -> Result<Option<String>, ApiResponse> {
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == name {
            return decode(&value.replace('+', " ")).map(Some);
        }
    }
    Ok(None)
}

/// Routes one request.
///
/// `path` may include a query string. The `/vehicles/...` endpoints are also
/// served without the `/api` prefix.
///
/// # Examples
///
/// ```
/// use parkade::api::route;
/// use parkade::{Database, DatabaseConfig};
/// use tiny_http::Method;
///
/// let dir = tempfile::tempdir().unwrap();
/// let db = Database::open(DatabaseConfig::new(dir.path().join("parkade.db"))).unwrap();
///
/// let response = route(&db, &Method::Get, "/api/vehicles/availability", "");
/// assert_eq!(response.status, 200);
/// assert!(response.body.contains("\"totalAvailable\":0"));
/// ```
#[must_use]
pub fn route(db: &Database, method: &Method, path: &str, body: &str) -> ApiResponse {
    let (path, query) = path.split_once('?').unwrap_or((path, ""));
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    let segments = match segments.as_slice() {
        ["vehicles", ..] => &segments[..],
        ["api", rest @ ..] => rest,
        _ => &[][..],
    };

    let result: Result<ApiResponse, ApiResponse> = match (method, segments) {
        (Method::Post, ["vehicles", "park"]) => park(db, body),
        (Method::Post, ["vehicles", "exit", plate]) => exit(db, plate),
        (Method::Get, ["vehicles", "availability"]) => {
            Ok(AllocationEngine::new(db, db).availability().into())
        }

        (Method::Post, ["parking-lots"]) => create_lot(db, body),
        (Method::Get, ["parking-lots"]) => Ok(db.list_lots().into()),
        (Method::Get, ["parking-lots", id]) => {
            parse_id("id", id).map(|id| db.get_lot(LotId::new(id)).into())
        }

        (Method::Post, ["floors"]) => add_floor(db, body),
        (Method::Get, ["floors", "parking-lot", lot]) => {
            parse_id("parkingLotId", lot).map(|id| db.list_floors(LotId::new(id)).into())
        }
        (Method::Get, ["floors", id]) => {
            parse_id("id", id).map(|id| db.get_floor(FloorId::new(id)).into())
        }

        (Method::Post, ["spots"]) => add_spot(db, body),
        (Method::Get, ["spots", "available"]) => free_spots(db, query),
        (Method::Get, ["spots", "floor", floor]) => {
            parse_id("floorId", floor).map(|id| db.list_spots(FloorId::new(id)).into())
        }
        (Method::Get, ["spots", id]) => {
            parse_id("id", id).map(|id| db.get_spot(SpotId::new(id)).into())
        }

        _ => Err(ApiResponse::error(&ErrorBody::new(
            404,
            format!("No handler for {method} {path}"),
        ))),
    };

    result.unwrap_or_else(|response| response)
}

fn park(db: &Database, body: &str) -> Result<ApiResponse, ApiResponse> {
    let request: ParkRequest = parse_body(body)?;
    let options = request.validate().map_err(|e| ApiResponse::validation(&e))?;
    Ok(created(AllocationEngine::new(db, db).park(&options)))
}

fn exit(db: &Database, raw_plate: &str) -> Result<ApiResponse, ApiResponse> {
    let plate = LicensePlate::new(decode(raw_plate)?)
        .map_err(|e| ApiResponse::validation(&[e]))?;
    Ok(AllocationEngine::new(db, db).exit(&plate).into())
}

fn create_lot(db: &Database, body: &str) -> Result<ApiResponse, ApiResponse> {
    let request: LotRequest = parse_body(body)?;
    let (name, address) = request.validate().map_err(|e| ApiResponse::validation(&e))?;
    Ok(created(db.create_lot(&name, &address)))
}

fn add_floor(db: &Database, body: &str) -> Result<ApiResponse, ApiResponse> {
    let request: FloorRequest = parse_body(body)?;
    let (lot, number) = request.validate().map_err(|e| ApiResponse::validation(&e))?;
    Ok(created(db.add_floor(lot, number)))
}

fn add_spot(db: &Database, body: &str) -> Result<ApiResponse, ApiResponse> {
    let request: SpotRequest = parse_body(body)?;
    let (floor, number, spot_type) =
        request.validate().map_err(|e| ApiResponse::validation(&e))?;
    Ok(created(db.add_spot(floor, &number, spot_type)))
}

fn free_spots(db: &Database, query: &str) -> Result<ApiResponse, ApiResponse> {
    let raw = query_param(query, "type")?.ok_or_else(|| {
        ApiResponse::validation(&[ValidationError::new("type", "Spot type is required")])
    })?;
    let spot_type =
        SpotType::parse_field("type", &raw).map_err(|e| ApiResponse::validation(&[e]))?;
    Ok(db.list_free_spots(spot_type).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, register_spots};
    use serde_json::Value;

    fn json(response: &ApiResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[test]
    fn test_unknown_route_is_404() {
        let db = create_test_database();
        let response = route(&db, &Method::Get, "/api/nowhere", "");
        assert_eq!(response.status, 404);
        assert_eq!(json(&response)["status"], 404);

        let response = route(&db, &Method::Delete, "/api/parking-lots", "");
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_vehicle_alias_paths() {
        let db = create_test_database();
        for path in ["/vehicles/availability", "/api/vehicles/availability/"] {
            let response = route(&db, &Method::Get, path, "");
            assert_eq!(response.status, 200, "{path}");
        }
    }

    #[test]
    fn test_malformed_body_is_400() {
        let db = create_test_database();
        let response = route(&db, &Method::Post, "/api/vehicles/park", "{not json");
        assert_eq!(response.status, 400);
        assert_eq!(json(&response)["message"], "Malformed JSON request body");
    }

    #[test]
    fn test_park_validation_lists_fields() {
        let db = create_test_database();
        let response = route(&db, &Method::Post, "/api/vehicles/park", "{}");
        assert_eq!(response.status, 400);
        let body = json(&response);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_park_and_exit_with_encoded_plate() {
        let db = create_test_database();
        register_spots(&db, &[(SpotType::Compact, 1)]);

        let response = route(
            &db,
            &Method::Post,
            "/api/vehicles/park",
            r#"{"licensePlate":"KA 01","vehicleType":"CAR","spotType":"COMPACT"}"#,
        );
        assert_eq!(response.status, 201);
        assert_eq!(json(&response)["spotNumber"], "COMPACT-1");

        let response = route(&db, &Method::Post, "/api/vehicles/exit/KA%2001", "");
        assert_eq!(response.status, 200);
        assert!(json(&response)["exitTime"].is_string());
    }

    #[test]
    fn test_bad_id_is_400() {
        let db = create_test_database();
        let response = route(&db, &Method::Get, "/api/spots/abc", "");
        assert_eq!(response.status, 400);
        assert_eq!(json(&response)["errors"][0], "id: 'abc' is not a valid identifier");
    }

    #[test]
    fn test_available_requires_type() {
        let db = create_test_database();
        register_spots(&db, &[(SpotType::Large, 2)]);

        let response = route(&db, &Method::Get, "/api/spots/available", "");
        assert_eq!(response.status, 400);

        let response = route(&db, &Method::Get, "/api/spots/available?type=large", "");
        assert_eq!(response.status, 200);
        assert_eq!(json(&response).as_array().unwrap().len(), 2);

        let response = route(&db, &Method::Get, "/api/spots/available?type=BUS", "");
        assert_eq!(response.status, 400);
    }

    #[test]
    fn test_internal_errors_are_generic() {
        let response = ApiResponse::from_error(&Error::LockTimeout {
            details: "database is locked".into(),
        });
        assert_eq!(response.status, 500);
        assert!(!response.body.contains("locked"));
    }

    #[test]
    fn test_query_param_decoding() {
        assert_eq!(
            query_param("a=1&type=ELECTRIC", "type").unwrap(),
            Some("ELECTRIC".to_string())
        );
        assert_eq!(query_param("x=%41+b", "x").unwrap(), Some("A b".to_string()));
        assert_eq!(query_param("", "type").unwrap(), None);
    }
}
