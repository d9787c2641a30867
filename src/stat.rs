//! Route statistics and stop-membership queries over a [`Catalogue`].

use thiserror::Error;

use crate::catalogue::{BusId, Catalogue, StopId};

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("not found")]
    NotFound,
}

/// Statistics for a single bus route, computed over its stored stop
/// sequence `s0..sn` (already unfolded for non-roundtrip buses).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStats {
    pub stops_count: usize,
    pub unique_stops_count: usize,
    pub route_length: f64,
    pub geo_length: f64,
    pub curvature: f64,
}

/// Computes [`RouteStats`] for `bus`, or [`Error::NotFound`] if `bus` is
/// unknown.
///
/// `route_length` sums `catalogue.get_distance`, falling back to the
/// great-circle distance for a leg only when `get_distance` reports `0`
/// (the "unknown" sentinel) — matching
/// `transport_catalogue.cpp::GetBusInfo`'s `route_distance != 0 ?
/// route_distance : geo_distance`.
pub fn route_stats(catalogue: &Catalogue, bus: BusId) -> RouteStats {
    let stops = &catalogue.bus(bus).stops;

    let mut unique = std::collections::HashSet::new();
    let mut route_length = 0.0;
    let mut geo_length = 0.0;
    for window in stops.windows(2) {
        let (from, to) = (window[0], window[1]);
        let geo_distance = catalogue.stop(from).coordinate.distance_to(&catalogue.stop(to).coordinate);
        let road_distance = catalogue.get_distance(from, to);
        route_length += if road_distance != 0 {
            road_distance as f64
        } else {
            geo_distance
        };
        geo_length += geo_distance;
        unique.insert(from);
    }
    if let Some(&last) = stops.last() {
        unique.insert(last);
    }

    RouteStats {
        stops_count: stops.len(),
        unique_stops_count: unique.len(),
        route_length,
        geo_length,
        curvature: route_length / geo_length,
    }
}

/// Looks up [`RouteStats`] for the bus named `bus_id`.
pub fn route_stats_by_name(catalogue: &Catalogue, bus_id: &str) -> Result<RouteStats, Error> {
    let bus = catalogue.find_route(bus_id).ok_or(Error::NotFound)?;
    Ok(route_stats(catalogue, bus))
}

/// The sorted bus route ids serving `stop_name`, or [`Error::NotFound`] if
/// the stop is unknown.
pub fn buses_for_stop(catalogue: &Catalogue, stop_name: &str) -> Result<Vec<String>, Error> {
    let stop: StopId = catalogue.find_stop(stop_name).ok_or(Error::NotFound)?;
    let mut ids: Vec<String> = catalogue
        .buses_through(stop)
        .iter()
        .map(|&bus| catalogue.bus(bus).id.clone())
        .collect();
    ids.sort();
    Ok(ids)
}
