//! Tour construction and improvement.
//!
//! A tour is an ordering of indices into a slice of stop positions. The
//! driver starts at `origin` and does not return, so a tour is an open path.

use crate::traits::{DistanceMetric, Point};

/// Result of a 2-opt run.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    pub tour: Vec<usize>,
    /// Cost of `tour` in meters.
    pub cost_m: f64,
    /// Passes started, at most the iteration cap.
    pub passes: usize,
    /// False when the cap ran out before a pass found no improving move.
    pub converged: bool,
}

/// Length of the path origin -> stops[tour[0]] -> ... -> stops[tour[n-1]].
pub fn tour_cost<M: DistanceMetric>(metric: &M, origin: Point, stops: &[Point], tour: &[usize]) -> f64 {
    let Some(&first) = tour.first() else {
        return 0.0;
    };

    let mut cost = metric.distance_m(origin, stops[first]);
    for leg in tour.windows(2) {
        cost += metric.distance_m(stops[leg[0]], stops[leg[1]]);
    }
    cost
}

/// Greedy construction: always step to the closest unvisited stop.
///
/// Ties go to the lowest index so the result is deterministic.
pub fn nearest_neighbor_tour<M: DistanceMetric>(metric: &M, origin: Point, stops: &[Point]) -> Vec<usize> {
    let mut visited = vec![false; stops.len()];
    let mut tour = Vec::with_capacity(stops.len());
    let mut current = origin;

    while tour.len() < stops.len() {
        let mut nearest: Option<(usize, f64)> = None;
        for (index, &position) in stops.iter().enumerate() {
            if visited[index] {
                continue;
            }
            let distance = metric.distance_m(current, position);
            match nearest {
                Some((_, best)) if distance >= best => {}
                _ => nearest = Some((index, distance)),
            }
        }

        let Some((index, _)) = nearest else {
            break;
        };
        visited[index] = true;
        tour.push(index);
        current = stops[index];
    }

    tour
}

/// First-improvement 2-opt.
///
/// Each pass scans segment reversals `tour[i..=j]` with `1 <= i < j` and
/// applies the first one that strictly lowers the cost, then starts a new
/// pass from the top. Position 0 is never reversed, so the first stop picked
/// by the constructor stays first. Stops after a pass with no improvement or
/// after `max_iterations` passes, whichever comes first.
pub fn two_opt_improve<M: DistanceMetric>(
    metric: &M,
    origin: Point,
    stops: &[Point],
    initial_tour: &[usize],
    max_iterations: usize,
) -> Refinement {
    let mut best_tour = initial_tour.to_vec();
    let mut best_cost = tour_cost(metric, origin, stops, &best_tour);
    let mut passes = 0;
    // Fewer than three stops leave no segment to reverse.
    let mut converged = best_tour.len() < 3;

    while !converged && passes < max_iterations {
        passes += 1;
        match first_improvement(metric, origin, stops, &best_tour, best_cost) {
            Some((tour, cost)) => {
                best_tour = tour;
                best_cost = cost;
            }
            None => {
                converged = true;
                break;
            }
        }
    }

    Refinement {
        tour: best_tour,
        cost_m: best_cost,
        passes,
        converged,
    }
}

fn first_improvement<M: DistanceMetric>(
    metric: &M,
    origin: Point,
    stops: &[Point],
    tour: &[usize],
    current_cost: f64,
) -> Option<(Vec<usize>, f64)> {
    let n = tour.len();
    let mut candidate = tour.to_vec();

    for i in 1..n.saturating_sub(1) {
        for j in i + 1..n {
            candidate[i..=j].reverse();
            let cost = tour_cost(metric, origin, stops, &candidate);
            if cost < current_cost {
                return Some((candidate, cost));
            }
            // Undo before trying the next segment.
            candidate[i..=j].reverse();
        }
    }

    None
}
