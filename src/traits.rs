//! Core domain traits for the route optimizer.
//!
//! These are intentionally minimal. The stop store owns the canonical stop
//! records; the optimizer only reads them through [`DeliveryStop`].

use std::fmt::Display;
use std::hash::Hash;

use crate::error::Result;

/// A (latitude, longitude) pair in decimal degrees.
pub type Point = (f64, f64);

/// Unique identifier for stops.
pub trait Id: Clone + Eq + Hash + Display {}

impl<T> Id for T where T: Clone + Eq + Hash + Display {}

/// Whether the customer has marked the package as ready for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable,
    #[default]
    Unknown,
}

impl Availability {
    /// Only `Unavailable` stops are left out of a route.
    pub fn is_eligible(self) -> bool {
        !matches!(self, Availability::Unavailable)
    }

    /// Parse a wire label. An empty label counts as `Unknown`.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return Some(Availability::Unknown);
        }
        match label.to_ascii_lowercase().as_str() {
            "available" => Some(Availability::Available),
            "unavailable" => Some(Availability::Unavailable),
            "unknown" => Some(Availability::Unknown),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Unavailable => "unavailable",
            Availability::Unknown => "unknown",
        }
    }
}

/// A delivery destination to be visited.
pub trait DeliveryStop {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Location coordinates (lat, lng). `None` when the record has no position.
    fn position(&self) -> Option<Point>;

    /// Availability status. `None` is treated as [`Availability::Unknown`].
    fn availability(&self) -> Option<Availability>;

    fn is_eligible(&self) -> bool {
        self.availability().unwrap_or_default().is_eligible()
    }
}

/// Source of the stops assigned to a driver.
pub trait StopStore {
    type Stop: DeliveryStop;

    fn stops_for_driver(&self, driver_id: &str) -> Result<Vec<Self::Stop>>;
}

/// Distance between two points, in meters.
///
/// Implementations must be symmetric and return zero for identical points.
pub trait DistanceMetric {
    fn distance_m(&self, from: Point, to: Point) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(Availability::parse("available"), Some(Availability::Available));
        assert_eq!(Availability::parse(" Unavailable "), Some(Availability::Unavailable));
        assert_eq!(Availability::parse("UNKNOWN"), Some(Availability::Unknown));
        assert_eq!(Availability::parse(""), Some(Availability::Unknown));
        assert_eq!(Availability::parse("maybe"), None);
    }

    #[test]
    fn test_eligibility() {
        assert!(Availability::Available.is_eligible());
        assert!(Availability::Unknown.is_eligible());
        assert!(!Availability::Unavailable.is_eligible());
    }

    #[test]
    fn test_missing_availability_is_eligible() {
        struct Bare;

        impl DeliveryStop for Bare {
            type Id = String;

            fn id(&self) -> &Self::Id {
                unreachable!()
            }

            fn position(&self) -> Option<Point> {
                None
            }

            fn availability(&self) -> Option<Availability> {
                None
            }
        }

        assert!(Bare.is_eligible());
    }
}
