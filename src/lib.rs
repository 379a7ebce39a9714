//! route-optimizer
//!
//! Orders a delivery driver's pending stops to keep total travel short.
//! Unavailable stops are left out; the rest are visited in a nearest-neighbor
//! order refined with 2-opt over great-circle distances.

pub mod api;
pub mod error;
pub mod haversine;
pub mod optimizer;
pub mod store;
pub mod tour;
pub mod traits;

pub use error::{Error, Result};
