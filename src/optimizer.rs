//! Route optimizer: orders a driver's pending stops.
//!
//! Filters out unavailable stops, builds a nearest-neighbor tour from the
//! driver's position and refines it with 2-opt. Each call owns all of its
//! working state, so calls may run concurrently without coordination.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::haversine::Haversine;
use crate::tour::{nearest_neighbor_tour, tour_cost, two_opt_improve};
use crate::traits::{DeliveryStop, DistanceMetric, Point};

#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Maximum 2-opt passes. Zero keeps the nearest-neighbor tour.
    pub max_iterations: usize,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self { max_iterations: 100 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult<StopId> {
    pub ordered_stop_ids: Vec<StopId>,
    /// Unrounded; use [`RouteResult::display_distance`] for presentation.
    pub total_distance_km: f64,
    pub stop_count: usize,
    /// 2-opt passes run.
    pub iterations: usize,
    pub converged: bool,
}

impl<StopId> RouteResult<StopId> {
    fn empty() -> Self {
        Self {
            ordered_stop_ids: Vec::new(),
            total_distance_km: 0.0,
            stop_count: 0,
            iterations: 0,
            converged: true,
        }
    }

    /// Total distance in km with two decimals, e.g. `"111.19"`.
    pub fn display_distance(&self) -> String {
        format!("{:.2}", self.total_distance_km)
    }
}

/// One driver's optimization input, for [`optimize_routes`].
#[derive(Debug, Clone)]
pub struct RouteRequest<S> {
    pub origin: Point,
    pub stops: Vec<S>,
}

/// Optimize the visiting order using great-circle distances.
pub fn optimize_route<S: DeliveryStop>(
    origin: Point,
    stops: &[S],
    options: &OptimizeOptions,
) -> Result<RouteResult<S::Id>> {
    optimize_route_with(&Haversine, origin, stops, options)
}

pub fn optimize_route_with<S, M>(
    metric: &M,
    origin: Point,
    stops: &[S],
    options: &OptimizeOptions,
) -> Result<RouteResult<S::Id>>
where
    S: DeliveryStop,
    M: DistanceMetric,
{
    check_origin(origin)?;
    let (eligible, positions) = eligible_stops(stops)?;

    match eligible.as_slice() {
        [] => return Ok(RouteResult::empty()),
        [only] => {
            return Ok(RouteResult {
                ordered_stop_ids: vec![only.id().clone()],
                total_distance_km: metric.distance_m(origin, positions[0]) / 1000.0,
                stop_count: 1,
                iterations: 0,
                converged: true,
            });
        }
        _ => {}
    }

    debug!(
        eligible = eligible.len(),
        excluded = stops.len() - eligible.len(),
        "optimizing route"
    );

    let initial = nearest_neighbor_tour(metric, origin, &positions);
    let refined = two_opt_improve(metric, origin, &positions, &initial, options.max_iterations);

    if refined.converged {
        debug!(passes = refined.passes, distance_m = refined.cost_m, "optimization converged");
    } else {
        warn!(
            passes = refined.passes,
            distance_m = refined.cost_m,
            "2-opt hit the iteration cap before converging, returning best tour so far"
        );
    }

    // Indices refer to the filtered list, not the caller's slice.
    let ordered_stop_ids: Vec<S::Id> = refined
        .tour
        .iter()
        .map(|&index| eligible[index].id().clone())
        .collect();

    Ok(RouteResult {
        stop_count: ordered_stop_ids.len(),
        ordered_stop_ids,
        total_distance_km: refined.cost_m / 1000.0,
        iterations: refined.passes,
        converged: refined.converged,
    })
}

/// Nearest-neighbor order only, without 2-opt refinement.
///
/// Cheaper fallback with the same filtering and validation as
/// [`optimize_route`].
pub fn nearest_neighbor_route<S: DeliveryStop>(origin: Point, stops: &[S]) -> Result<RouteResult<S::Id>> {
    nearest_neighbor_route_with(&Haversine, origin, stops)
}

pub fn nearest_neighbor_route_with<S, M>(metric: &M, origin: Point, stops: &[S]) -> Result<RouteResult<S::Id>>
where
    S: DeliveryStop,
    M: DistanceMetric,
{
    check_origin(origin)?;
    let (eligible, positions) = eligible_stops(stops)?;

    let tour = nearest_neighbor_tour(metric, origin, &positions);
    let cost_m = tour_cost(metric, origin, &positions, &tour);
    let ordered_stop_ids: Vec<S::Id> = tour.iter().map(|&index| eligible[index].id().clone()).collect();

    Ok(RouteResult {
        stop_count: ordered_stop_ids.len(),
        ordered_stop_ids,
        total_distance_km: cost_m / 1000.0,
        iterations: 0,
        converged: true,
    })
}

/// Optimize independent requests in parallel. Results keep the input order.
pub fn optimize_routes<S>(requests: &[RouteRequest<S>], options: &OptimizeOptions) -> Vec<Result<RouteResult<S::Id>>>
where
    S: DeliveryStop + Sync,
    S::Id: Send,
{
    requests
        .par_iter()
        .map(|request| optimize_route(request.origin, &request.stops, options))
        .collect()
}

fn check_origin(origin: Point) -> Result<()> {
    match coordinate_problem(origin) {
        Some(reason) => Err(Error::InvalidOrigin {
            lat: origin.0,
            lng: origin.1,
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Eligible stops and their positions, index-aligned.
fn eligible_stops<S: DeliveryStop>(stops: &[S]) -> Result<(Vec<&S>, Vec<Point>)> {
    let mut eligible = Vec::with_capacity(stops.len());
    let mut positions = Vec::with_capacity(stops.len());

    for stop in stops.iter().filter(|stop| stop.is_eligible()) {
        let position = stop
            .position()
            .ok_or_else(|| Error::invalid_stop(stop.id(), "missing position"))?;
        if let Some(reason) = coordinate_problem(position) {
            return Err(Error::invalid_stop(stop.id(), reason));
        }
        eligible.push(stop);
        positions.push(position);
    }

    Ok((eligible, positions))
}

fn coordinate_problem((lat, lng): Point) -> Option<&'static str> {
    if !lat.is_finite() || !lng.is_finite() {
        Some("coordinates must be finite numbers")
    } else if !(-90.0..=90.0).contains(&lat) {
        Some("latitude must be within -90..=90")
    } else if !(-180.0..=180.0).contains(&lng) {
        Some("longitude must be within -180..=180")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_problem() {
        assert_eq!(coordinate_problem((0.0, 0.0)), None);
        assert_eq!(coordinate_problem((90.0, -180.0)), None);
        assert!(coordinate_problem((f64::NAN, 0.0)).is_some());
        assert!(coordinate_problem((0.0, f64::INFINITY)).is_some());
        assert!(coordinate_problem((91.0, 0.0)).is_some());
        assert!(coordinate_problem((0.0, -180.5)).is_some());
    }

    #[test]
    fn test_display_distance_rounds() {
        let result: RouteResult<String> = RouteResult {
            ordered_stop_ids: Vec::new(),
            total_distance_km: 111.194_926,
            stop_count: 0,
            iterations: 0,
            converged: true,
        };
        assert_eq!(result.display_distance(), "111.19");
        assert_eq!(RouteResult::<String>::empty().display_distance(), "0.00");
    }

    #[test]
    fn test_default_cap() {
        assert_eq!(OptimizeOptions::default().max_iterations, 100);
    }
}
