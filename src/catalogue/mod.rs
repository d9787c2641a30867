//! Primary store of stops, buses and road distances.
//!
//! Ingestion happens once through a [`CatalogueBuilder`]; [`CatalogueBuilder::build`]
//! consumes the builder and returns a sealed [`Catalogue`] that [`crate::stat`],
//! [`crate::render`] and [`crate::router`] then borrow from immutably for the
//! rest of the process. This mirrors the "sealed read-only value" shape spec
//! §9 recommends in place of ad-hoc shared mutability.

mod entities;

pub use entities::{Bus, BusId, Stop, StopId};

use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

use crate::geo::Coordinate;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// A bus referenced a stop name that was never added to the catalogue.
    ///
    /// The original C++ source (`input_reader.cpp`) silently drops such
    /// names, leaving a gap in the stored sequence. This implementation
    /// takes the spec's recommended alternative (§9 "Silent skip of unknown
    /// stops", option b): reject the whole route instead, leaving the
    /// catalogue unchanged.
    #[error("bus {bus:?} references unknown stop {stop:?}")]
    UnknownStop { bus: String, stop: String },

    #[error("bus {bus:?} has an empty stop sequence")]
    EmptyRoute { bus: String },

    #[error("roundtrip bus {bus:?} does not start and end at the same stop")]
    RoundtripNotClosed { bus: String },
}

/// Accumulates `add_stop`/`add_route`/`set_distance` calls during ingestion.
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    stops: Vec<Stop>,
    stop_lookup: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_lookup: HashMap<String, BusId>,
    distances: HashMap<(StopId, StopId), u32>,
}

impl CatalogueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stop. Idempotent: a repeated name is ignored.
    pub fn add_stop(&mut self, name: &str, coordinate: Coordinate) -> &mut Self {
        if self.stop_lookup.contains_key(name) {
            return self;
        }
        let id = StopId(self.stops.len() as u32);
        self.stops.push(Stop {
            name: name.to_string(),
            coordinate,
        });
        self.stop_lookup.insert(name.to_string(), id);
        self
    }

    /// Sets the directed road distance `from -> to`, overwriting any prior
    /// value for the same ordered pair. Unresolved names are silently
    /// ignored, matching `transport_catalogue.cpp::SetDistance`.
    pub fn set_distance(&mut self, from: &str, to: &str, metres: u32) -> &mut Self {
        let (Some(&from_id), Some(&to_id)) =
            (self.stop_lookup.get(from), self.stop_lookup.get(to))
        else {
            debug!(from, to, "set_distance: unresolved stop name, ignored");
            return self;
        };
        self.distances.insert((from_id, to_id), metres);
        self
    }

    /// Adds a route. Idempotent by `id`: a repeated id is ignored.
    ///
    /// `stops` is a sequence of stop names in the *original* (forward-only
    /// for non-roundtrip) order; for `is_roundtrip = false` the stored
    /// sequence is unfolded to `A,B,C,...,Z,Y,...,A` here.
    ///
    /// Every name must resolve to a known stop, or the whole call fails with
    /// [`Error::UnknownStop`] and the catalogue is left unchanged (see the
    /// doc comment on that variant for why this diverges from the original).
    pub fn add_route(
        &mut self,
        id: &str,
        stops: &[String],
        is_roundtrip: bool,
    ) -> Result<&mut Self, Error> {
        if self.bus_lookup.contains_key(id) {
            return Ok(self);
        }
        if stops.is_empty() {
            return Err(Error::EmptyRoute { bus: id.to_string() });
        }
        if is_roundtrip && stops.first() != stops.last() {
            return Err(Error::RoundtripNotClosed { bus: id.to_string() });
        }

        let resolved: Result<Vec<StopId>, Error> = stops
            .iter()
            .map(|name| {
                self.stop_lookup
                    .get(name)
                    .copied()
                    .ok_or_else(|| Error::UnknownStop {
                        bus: id.to_string(),
                        stop: name.clone(),
                    })
            })
            .collect();
        let mut sequence = resolved?;

        if !is_roundtrip {
            let mut tail: Vec<StopId> = sequence[..sequence.len().saturating_sub(1)]
                .iter()
                .rev()
                .copied()
                .collect();
            sequence.append(&mut tail);
        }

        let bus_id = BusId(self.buses.len() as u32);
        self.buses.push(Bus {
            id: id.to_string(),
            stops: sequence,
            is_roundtrip,
        });
        self.bus_lookup.insert(id.to_string(), bus_id);
        Ok(self)
    }

    /// Seals ingestion into an immutable [`Catalogue`], computing the
    /// derived stop-to-buses usage index.
    pub fn build(self) -> Catalogue {
        let mut stop_usage: Vec<HashSet<BusId>> = vec![HashSet::new(); self.stops.len()];
        for (bus_index, bus) in self.buses.iter().enumerate() {
            let bus_id = BusId(bus_index as u32);
            for stop_id in &bus.stops {
                stop_usage[stop_id.index()].insert(bus_id);
            }
        }

        Catalogue {
            stops: self.stops,
            stop_lookup: self.stop_lookup,
            buses: self.buses,
            bus_lookup: self.bus_lookup,
            distances: self.distances,
            stop_usage,
        }
    }
}

/// Read-only network data, shared immutably by [`crate::stat`],
/// [`crate::render`] and [`crate::router`] once ingestion is complete.
#[derive(Debug)]
pub struct Catalogue {
    stops: Vec<Stop>,
    stop_lookup: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_lookup: HashMap<String, BusId>,
    distances: HashMap<(StopId, StopId), u32>,
    stop_usage: Vec<HashSet<BusId>>,
}

impl Catalogue {
    pub fn find_stop(&self, name: &str) -> Option<StopId> {
        self.stop_lookup.get(name).copied()
    }

    pub fn find_route(&self, id: &str) -> Option<BusId> {
        self.bus_lookup.get(id).copied()
    }

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.index()]
    }

    /// The directed road distance `from -> to`, falling back to the
    /// explicit distance `to -> from`, falling back to `0` (the sentinel
    /// for "unknown").
    pub fn get_distance(&self, from: StopId, to: StopId) -> u32 {
        if let Some(&metres) = self.distances.get(&(from, to)) {
            return metres;
        }
        if let Some(&metres) = self.distances.get(&(to, from)) {
            return metres;
        }
        0
    }

    /// The set of buses serving `stop`, possibly empty.
    pub fn buses_through(&self, stop: StopId) -> &HashSet<BusId> {
        &self.stop_usage[stop.index()]
    }

    /// Buses with at least one stop, sorted by route id.
    pub fn sorted_buses(&self) -> Vec<BusId> {
        let mut ids: Vec<BusId> = (0..self.buses.len() as u32)
            .map(BusId)
            .filter(|id| !self.bus(*id).stops.is_empty())
            .collect();
        ids.sort_by(|a, b| self.bus(*a).id.cmp(&self.bus(*b).id));
        ids
    }

    /// Stops served by at least one bus, sorted by name.
    pub fn sorted_stops(&self) -> Vec<StopId> {
        let mut ids: Vec<StopId> = (0..self.stops.len() as u32)
            .map(StopId)
            .filter(|id| !self.stop_usage[id.index()].is_empty())
            .collect();
        ids.sort_by(|a, b| self.stop(*a).name.cmp(&self.stop(*b).name));
        ids
    }

    /// Every stop in the catalogue, sorted by name, regardless of bus
    /// service. Used by [`crate::router`] to assign graph vertices: a stop
    /// with no service still gets a vertex (and therefore a `NoRoute`
    /// rather than an `UnknownStop` answer when queried).
    pub fn all_stops_sorted(&self) -> Vec<StopId> {
        let mut ids: Vec<StopId> = (0..self.stops.len() as u32).map(StopId).collect();
        ids.sort_by(|a, b| self.stop(*a).name.cmp(&self.stop(*b).name));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng)
    }

    #[test]
    fn add_stop_is_idempotent() {
        let mut builder = CatalogueBuilder::new();
        builder.add_stop("X", coord(1.0, 1.0));
        builder.add_stop("X", coord(99.0, 99.0));
        let catalogue = builder.build();
        let id = catalogue.find_stop("X").unwrap();
        assert_eq!(catalogue.stop(id).coordinate, coord(1.0, 1.0));
    }

    #[test]
    fn unfolds_non_roundtrip_route() {
        let mut builder = CatalogueBuilder::new();
        builder.add_stop("A", coord(0.0, 0.0));
        builder.add_stop("B", coord(0.0, 1.0));
        builder.add_stop("C", coord(0.0, 2.0));
        builder
            .add_route(
                "1",
                &["A".into(), "B".into(), "C".into()],
                false,
            )
            .unwrap();
        let catalogue = builder.build();
        let bus = catalogue.bus(catalogue.find_route("1").unwrap());
        let names: Vec<&str> = bus
            .stops
            .iter()
            .map(|id| catalogue.stop(*id).name.as_str())
            .collect();
        assert_eq!(names, ["A", "B", "C", "B", "A"]);
        assert_eq!(names.len(), 2 * 3 - 1);
        for i in 0..names.len() {
            assert_eq!(names[i], names[names.len() - 1 - i]);
        }
    }

    #[test]
    fn roundtrip_route_kept_as_given() {
        let mut builder = CatalogueBuilder::new();
        builder.add_stop("A", coord(0.0, 0.0));
        builder.add_stop("B", coord(0.0, 1.0));
        builder
            .add_route("1", &["A".into(), "B".into(), "A".into()], true)
            .unwrap();
        let catalogue = builder.build();
        let bus = catalogue.bus(catalogue.find_route("1").unwrap());
        assert_eq!(bus.stops.len(), 3);
    }

    #[test]
    fn add_route_rejects_unknown_stop() {
        let mut builder = CatalogueBuilder::new();
        builder.add_stop("A", coord(0.0, 0.0));
        let err = builder
            .add_route("1", &["A".into(), "B".into()], true)
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownStop {
                bus: "1".into(),
                stop: "B".into(),
            }
        );
    }

    #[test]
    fn distance_falls_back_to_reverse_then_zero() {
        let mut builder = CatalogueBuilder::new();
        builder.add_stop("A", coord(0.0, 0.0));
        builder.add_stop("B", coord(0.0, 1.0));
        builder.add_stop("C", coord(0.0, 2.0));
        builder.set_distance("A", "B", 100);
        let catalogue = builder.build();
        let (a, b, c) = (
            catalogue.find_stop("A").unwrap(),
            catalogue.find_stop("B").unwrap(),
            catalogue.find_stop("C").unwrap(),
        );
        assert_eq!(catalogue.get_distance(a, b), 100);
        assert_eq!(catalogue.get_distance(b, a), 100);
        assert_eq!(catalogue.get_distance(a, c), 0);
    }

    #[test]
    fn sorted_stops_excludes_unserved_stops() {
        let mut builder = CatalogueBuilder::new();
        builder.add_stop("Served", coord(0.0, 0.0));
        builder.add_stop("Lonely", coord(1.0, 1.0));
        builder
            .add_route("1", &["Served".into(), "Served".into()], true)
            .unwrap();
        let catalogue = builder.build();
        let names: Vec<&str> = catalogue
            .sorted_stops()
            .into_iter()
            .map(|id| catalogue.stop(id).name.as_str())
            .collect();
        assert_eq!(names, ["Served"]);
        assert_eq!(catalogue.all_stops_sorted().len(), 2);
    }
}
