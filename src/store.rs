//! Stop store adapters.
//!
//! [`HttpStopStore`] reads a driver's stops from the delivery backend's REST
//! API; [`InMemoryStopStore`] keeps them in a map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::traits::{Availability, DeliveryStop, Point, StopStore};

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Sent as a bearer token when set.
    pub auth_token: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
            auth_token: None,
        }
    }
}

/// A stop record as the delivery backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredStop {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub available: Availability,
    #[serde(default, rename = "assignedTo", skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<AssignedTo>,
}

/// The backend sends either the driver's id or the populated driver record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssignedTo {
    Id(String),
    Driver {
        #[serde(rename = "_id", alias = "id")]
        id: String,
    },
}

impl AssignedTo {
    pub fn driver_id(&self) -> &str {
        match self {
            AssignedTo::Id(id) | AssignedTo::Driver { id } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl StoredStop {
    pub fn new(id: impl Into<String>, position: Point, available: Availability) -> Self {
        Self {
            id: id.into(),
            name: None,
            address: None,
            location: Some(LatLng {
                lat: Some(position.0),
                lng: Some(position.1),
            }),
            available,
            assigned_to: None,
        }
    }

    pub fn assigned(mut self, driver_id: impl Into<String>) -> Self {
        self.assigned_to = Some(AssignedTo::Id(driver_id.into()));
        self
    }

    pub fn is_assigned_to(&self, driver_id: &str) -> bool {
        self.assigned_to
            .as_ref()
            .is_some_and(|assigned| assigned.driver_id() == driver_id)
    }
}

impl DeliveryStop for StoredStop {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn position(&self) -> Option<Point> {
        let location = self.location?;
        Some((location.lat?, location.lng?))
    }

    fn availability(&self) -> Option<Availability> {
        Some(self.available)
    }
}

#[derive(Debug, Clone)]
pub struct HttpStopStore {
    config: StoreConfig,
    client: reqwest::blocking::Client,
}

impl HttpStopStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl StopStore for HttpStopStore {
    type Stop = StoredStop;

    fn stops_for_driver(&self, driver_id: &str) -> Result<Vec<StoredStop>> {
        let url = format!("{}/api/delivery-stops", self.config.base_url.trim_end_matches('/'));

        let mut request = self.client.get(url).query(&[("assignedTo", driver_id)]);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::store(format!(
                "listing stops for driver {driver_id} returned {status}"
            )));
        }

        let body: StopsEnvelope = response.json()?;
        if !body.success {
            return Err(Error::store(
                body.message
                    .unwrap_or_else(|| format!("listing stops for driver {driver_id} failed")),
            ));
        }

        // The backend scopes the listing by the token's user, so an admin token
        // returns every driver's stops.
        let fetched = body.data.len();
        let stops: Vec<StoredStop> = body
            .data
            .into_iter()
            .filter(|stop| stop.is_assigned_to(driver_id))
            .collect();

        debug!(driver_id, fetched, kept = stops.len(), "fetched delivery stops");
        Ok(stops)
    }
}

#[derive(Debug, Deserialize)]
struct StopsEnvelope {
    success: bool,
    #[serde(default)]
    data: Vec<StoredStop>,
    #[serde(default)]
    message: Option<String>,
}

/// Stops keyed by driver id.
#[derive(Debug, Clone)]
pub struct InMemoryStopStore<S> {
    stops: HashMap<String, Vec<S>>,
}

impl<S> Default for InMemoryStopStore<S> {
    fn default() -> Self {
        Self {
            stops: HashMap::new(),
        }
    }
}

impl<S> InMemoryStopStore<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, driver_id: impl Into<String>, stop: S) {
        self.stops.entry(driver_id.into()).or_default().push(stop);
    }

    pub fn with_stops(mut self, driver_id: impl Into<String>, stops: impl IntoIterator<Item = S>) -> Self {
        self.stops.entry(driver_id.into()).or_default().extend(stops);
        self
    }
}

impl<S: DeliveryStop + Clone> StopStore for InMemoryStopStore<S> {
    type Stop = S;

    fn stops_for_driver(&self, driver_id: &str) -> Result<Vec<S>> {
        Ok(self.stops.get(driver_id).cloned().unwrap_or_default())
    }
}
