//! JSON request/response types for the optimize-route endpoint.
//!
//! Request:
//!
//! ```json
//! { "userLocation": [52.52, 13.40],
//!   "markers": [ { "_id": "a1", "position": { "lat": 52.5, "lng": 13.4 }, "available": "unknown" } ] }
//! ```
//!
//! Response:
//!
//! ```json
//! { "success": true, "data": { "optimizedOrder": ["a1"], "totalDistance": "2.23", "totalStops": 1 } }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{Error, Result};
use crate::optimizer::{OptimizeOptions, RouteResult, optimize_route};
use crate::traits::{Availability, DeliveryStop, Point};

const MISSING_PARAMETERS: &str = "Missing required parameters: userLocation and markers";

/// Coordinates as either `[lat, lng]` or `{ "lat": .., "lng": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Position {
    Pair([f64; 2]),
    LatLng { lat: f64, lng: f64 },
}

impl Position {
    pub fn point(self) -> Point {
        match self {
            Position::Pair([lat, lng]) => (lat, lng),
            Position::LatLng { lat, lng } => (lat, lng),
        }
    }
}

impl From<Point> for Position {
    fn from((lat, lng): Point) -> Self {
        Position::Pair([lat, lng])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "location")]
    pub position: Option<Position>,
    /// Raw availability label; `None` means unknown.
    #[serde(default)]
    pub available: Option<String>,
}

impl DeliveryStop for Marker {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn position(&self) -> Option<Point> {
        self.position.map(Position::point)
    }

    fn availability(&self) -> Option<Availability> {
        self.available.as_deref().and_then(Availability::parse)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default)]
    pub user_location: Option<Position>,
    #[serde(default)]
    pub markers: Option<Vec<Marker>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    pub optimized_order: Vec<String>,
    /// Kilometers with two decimals.
    pub total_distance: String,
    pub total_stops: usize,
}

impl From<RouteResult<String>> for RouteData {
    fn from(route: RouteResult<String>) -> Self {
        Self {
            total_distance: route.display_distance(),
            total_stops: route.stop_count,
            optimized_order: route.ordered_stop_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RouteData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OptimizeResponse {
    pub fn success(data: RouteData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    BadRequest,
    InternalError,
}

impl ResponseStatus {
    /// HTTP status code equivalent.
    pub fn code(self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::BadRequest => 400,
            ResponseStatus::InternalError => 500,
        }
    }
}

/// Run one optimization request.
pub fn handle_optimize(request: &OptimizeRequest, options: &OptimizeOptions) -> (ResponseStatus, OptimizeResponse) {
    let (Some(location), Some(markers)) = (request.user_location, request.markers.as_ref()) else {
        warn!("rejecting optimization request without userLocation or markers");
        return (ResponseStatus::BadRequest, OptimizeResponse::failure(MISSING_PARAMETERS));
    };

    let result = check_labels(markers).and_then(|_| optimize_route(location.point(), markers, options));
    match result {
        Ok(route) => (ResponseStatus::Ok, OptimizeResponse::success(route.into())),
        Err(err) if err.is_validation() => {
            warn!(error = %err, "rejecting optimization request");
            (ResponseStatus::BadRequest, OptimizeResponse::failure(err.to_string()))
        }
        Err(err) => {
            error!(error = %err, "route optimization failed");
            (
                ResponseStatus::InternalError,
                OptimizeResponse::failure(format!("Failed to optimize route: {err}")),
            )
        }
    }
}

/// Same as [`handle_optimize`], from and to raw JSON. Returns the status code
/// and the response body.
pub fn handle_optimize_json(body: &str, options: &OptimizeOptions) -> (u16, String) {
    let (status, response) = match serde_json::from_str::<OptimizeRequest>(body) {
        Ok(request) => handle_optimize(&request, options),
        Err(err) => {
            warn!(error = %err, "malformed optimization request body");
            (
                ResponseStatus::BadRequest,
                OptimizeResponse::failure(format!("Invalid request body: {err}")),
            )
        }
    };

    match serde_json::to_string(&response) {
        Ok(body) => (status.code(), body),
        Err(err) => {
            error!(error = %err, "failed to encode optimization response");
            let body = serde_json::json!({
                "success": false,
                "error": format!("Failed to optimize route: {err}"),
            });
            (ResponseStatus::InternalError.code(), body.to_string())
        }
    }
}

/// Unrecognized availability labels are rejected rather than guessed.
fn check_labels(markers: &[Marker]) -> Result<()> {
    for marker in markers {
        if let Some(label) = marker.available.as_deref() {
            if Availability::parse(label).is_none() {
                return Err(Error::invalid_stop(
                    &marker.id,
                    format!("unrecognized availability {label:?}"),
                ));
            }
        }
    }
    Ok(())
}
