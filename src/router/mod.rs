//! Fastest-itinerary routing: wait-then-ride queries over a [`Catalogue`].

pub mod graph;

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

use crate::catalogue::{Catalogue, StopId};
use graph::{DirectedWeightedGraph, Edge, ShortestPaths, VertexId};

/// Converts km/h and metres into minutes: `(metres / km_per_hour) * 0.06`.
const MINUTES_PER_METRE_PER_KMH: f64 = 0.06;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid routing settings: {0}")]
    InvalidSettings(&'static str),
    #[error("unknown stop {0:?}")]
    UnknownStop(String),
    #[error("no route")]
    NoRoute,
}

/// Wait time and bus speed, validated by [`RoutingSettings::new`].
#[derive(Debug, Clone, Copy)]
pub struct RoutingSettings {
    bus_wait_time_minutes: u32,
    bus_velocity_kmh: f64,
}

impl RoutingSettings {
    pub fn new(bus_wait_time_minutes: u32, bus_velocity_kmh: f64) -> Result<Self, Error> {
        if !(1..=1000).contains(&bus_wait_time_minutes) {
            return Err(Error::InvalidSettings("bus_wait_time must be between 1 and 1000 minutes"));
        }
        if !(1.0..=1000.0).contains(&bus_velocity_kmh) {
            return Err(Error::InvalidSettings("bus_velocity must be between 1 and 1000 km/h"));
        }
        Ok(Self {
            bus_wait_time_minutes,
            bus_velocity_kmh,
        })
    }
}

/// One leg of a solved itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteItem {
    /// Waiting at `stop` for a bus to arrive.
    Wait { stop: String, time: f64 },
    /// Riding `bus` for `span_count` stops without changing buses.
    Ride { bus: String, span_count: u32, time: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteAnswer {
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}

/// Payload carried by a graph edge, used to reconstruct [`RouteItem`]s from
/// a solved path.
#[derive(Debug, Clone)]
enum EdgePayload {
    Wait { stop: String },
    Ride { bus: String, span_count: u32 },
}

/// A graph of two vertices per stop (arrival, departure) plus wait and ride
/// edges, solved lazily and cached per source vertex.
///
/// Built once via [`TransitRouter::build`] from a sealed [`Catalogue`],
/// mirroring `transport_router.cpp::Router::Build`'s `FillStops` (wait
/// edges) followed by `FillBuses` (ride edges) construction order.
#[derive(Debug)]
pub struct TransitRouter {
    graph: DirectedWeightedGraph<EdgePayload>,
    stop_arrival_vertex: HashMap<StopId, VertexId>,
    cache: RefCell<HashMap<VertexId, ShortestPaths>>,
}

impl TransitRouter {
    pub fn build(catalogue: &Catalogue, settings: RoutingSettings) -> Self {
        let stops = catalogue.all_stops_sorted();
        let mut graph = DirectedWeightedGraph::new(stops.len() * 2);
        let mut stop_arrival_vertex = HashMap::with_capacity(stops.len());

        for (index, &stop_id) in stops.iter().enumerate() {
            let arrival = VertexId(2 * index as u32);
            let departure = VertexId(2 * index as u32 + 1);
            stop_arrival_vertex.insert(stop_id, arrival);
            graph.add_edge(Edge {
                from: arrival,
                to: departure,
                weight: settings.bus_wait_time_minutes as f64,
                payload: EdgePayload::Wait {
                    stop: catalogue.stop(stop_id).name.clone(),
                },
            });
        }

        for bus_id in catalogue.sorted_buses() {
            let bus = catalogue.bus(bus_id);
            for (from_index, &from_stop) in bus.stops.iter().enumerate() {
                let departure = stop_arrival_vertex[&from_stop].0 + 1;
                let mut cumulative_distance = 0u32;
                let mut previous = from_stop;
                for (span, &to_stop) in bus.stops[from_index + 1..].iter().enumerate() {
                    cumulative_distance += catalogue.get_distance(previous, to_stop);
                    previous = to_stop;
                    let arrival = stop_arrival_vertex[&to_stop];
                    let time = (cumulative_distance as f64 / settings.bus_velocity_kmh) * MINUTES_PER_METRE_PER_KMH;
                    graph.add_edge(Edge {
                        from: VertexId(departure),
                        to: arrival,
                        weight: time,
                        payload: EdgePayload::Ride {
                            bus: bus.id.clone(),
                            span_count: (span + 1) as u32,
                        },
                    });
                }
            }
        }

        Self {
            graph,
            stop_arrival_vertex,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Finds the fastest itinerary from `from` to `to` by stop name.
    ///
    /// `from == to` answers with an empty, zero-time itinerary rather than
    /// running the solver, matching the original's behaviour of a
    /// zero-weight trivial path.
    pub fn find_route(&self, catalogue: &Catalogue, from: &str, to: &str) -> Result<RouteAnswer, Error> {
        let from_id = catalogue.find_stop(from).ok_or_else(|| Error::UnknownStop(from.to_string()))?;
        let to_id = catalogue.find_stop(to).ok_or_else(|| Error::UnknownStop(to.to_string()))?;
        let from_vertex = self.stop_arrival_vertex[&from_id];
        let to_vertex = self.stop_arrival_vertex[&to_id];

        if from_vertex == to_vertex {
            return Ok(RouteAnswer {
                total_time: 0.0,
                items: Vec::new(),
            });
        }

        let paths = self.paths_from(from_vertex);
        let edge_ids = paths.edges_to(&self.graph, to_vertex).ok_or(Error::NoRoute)?;

        let mut items = Vec::with_capacity(edge_ids.len());
        let mut total_time = 0.0;
        for edge_id in edge_ids {
            let edge = self.graph.edge(edge_id);
            total_time += edge.weight;
            items.push(match &edge.payload {
                EdgePayload::Wait { stop } => RouteItem::Wait {
                    stop: stop.clone(),
                    time: edge.weight,
                },
                EdgePayload::Ride { bus, span_count } => RouteItem::Ride {
                    bus: bus.clone(),
                    span_count: *span_count,
                    time: edge.weight,
                },
            });
        }

        Ok(RouteAnswer { total_time, items })
    }

    fn paths_from(&self, source: VertexId) -> ShortestPaths {
        if let Some(cached) = self.cache.borrow().get(&source) {
            return cached.clone();
        }
        let paths = graph::shortest_paths_from(&self.graph, source);
        self.cache.borrow_mut().insert(source, paths.clone());
        paths
    }
}
