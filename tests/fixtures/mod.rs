//! Test fixtures for route-optimizer.
//!
//! Provides:
//! - Real Las Vegas / Henderson locations (from OpenStreetMap)
//! - A builder for delivery stops

pub mod las_vegas_locations;

pub use las_vegas_locations::*;

use route_optimizer::traits::{Availability, DeliveryStop, Point};

/// Builder for test stops with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestStop {
    pub id: String,
    pub position: Option<Point>,
    pub availability: Option<Availability>,
}

impl TestStop {
    pub fn new(id: &str, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_string(),
            position: Some((lat, lng)),
            availability: Some(Availability::Available),
        }
    }

    pub fn at(id: &str, location: &Location) -> Self {
        Self::new(id, location.lat, location.lng)
    }

    pub fn unavailable(mut self) -> Self {
        self.availability = Some(Availability::Unavailable);
        self
    }

    pub fn unknown(mut self) -> Self {
        self.availability = Some(Availability::Unknown);
        self
    }

    pub fn unmarked(mut self) -> Self {
        self.availability = None;
        self
    }

    pub fn without_position(mut self) -> Self {
        self.position = None;
        self
    }
}

impl DeliveryStop for TestStop {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn position(&self) -> Option<Point> {
        self.position
    }

    fn availability(&self) -> Option<Availability> {
        self.availability
    }
}

/// Stops along the equator, one per longitude, named `s0`, `s1`, ...
pub fn equator_stops(lngs: &[f64]) -> Vec<TestStop> {
    lngs.iter()
        .enumerate()
        .map(|(i, &lng)| TestStop::new(&format!("s{i}"), 0.0, lng))
        .collect()
}
