//! A minimal directed weighted graph plus a single-source Dijkstra solver.
//!
//! Mirrors the original C++ `graph::DirectedWeightedGraph`/`graph::Router`
//! pair: edges are appended once at build time and never removed, and
//! shortest paths are solved lazily per source vertex rather than all at
//! once.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A vertex index into a [`DirectedWeightedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// An edge index into a [`DirectedWeightedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u32);

#[derive(Debug, Clone)]
pub struct Edge<T> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
    /// Caller-defined payload carried along the edge (bus id and span count,
    /// or the stop being waited at).
    pub payload: T,
}

/// An append-only directed graph with `f64` edge weights.
#[derive(Debug, Clone)]
pub struct DirectedWeightedGraph<T> {
    vertex_count: usize,
    edges: Vec<Edge<T>>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl<T> DirectedWeightedGraph<T> {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
            outgoing: vec![Vec::new(); vertex_count],
        }
    }

    pub fn add_edge(&mut self, edge: Edge<T>) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.outgoing[edge.from.0 as usize].push(id);
        self.edges.push(edge);
        id
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<T> {
        &self.edges[id.0 as usize]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

/// A step on a solved path: the edge taken and the cumulative weight at its
/// destination vertex.
#[derive(Debug, Clone, Copy)]
struct Reached {
    distance: f64,
    via: Option<EdgeId>,
}

/// Distances and predecessor edges from a single source vertex, computed by
/// [`shortest_paths_from`].
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    reached: Vec<Option<Reached>>,
}

impl ShortestPaths {
    pub fn distance_to(&self, vertex: VertexId) -> Option<f64> {
        self.reached[vertex.0 as usize].map(|r| r.distance)
    }

    /// The edges of the shortest path from the source to `target`, in
    /// traversal order, or `None` if unreachable.
    pub fn edges_to<T>(&self, graph: &DirectedWeightedGraph<T>, target: VertexId) -> Option<Vec<EdgeId>> {
        self.reached[target.0 as usize]?;
        let mut edges = Vec::new();
        let mut current = target;
        while let Some(reached) = self.reached[current.0 as usize] {
            match reached.via {
                Some(edge_id) => {
                    edges.push(edge_id);
                    current = graph.edge(edge_id).from;
                }
                None => break,
            }
        }
        edges.reverse();
        Some(edges)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapEntry {
    distance: f64,
    vertex: VertexId,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap` (a max-heap) pops the smallest distance
        // first. NaN never occurs: weights are derived from non-negative
        // distances and speeds validated at `RoutingSettings` construction.
        other.distance.partial_cmp(&self.distance).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest paths via Dijkstra. Edge weights must be
/// non-negative, which holds here: every edge is a wait time or a ride time,
/// both derived from validated positive settings.
pub fn shortest_paths_from<T>(graph: &DirectedWeightedGraph<T>, source: VertexId) -> ShortestPaths {
    let mut reached: Vec<Option<Reached>> = vec![None; graph.vertex_count()];
    reached[source.0 as usize] = Some(Reached {
        distance: 0.0,
        via: None,
    });

    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry {
        distance: 0.0,
        vertex: source,
    });

    while let Some(HeapEntry { distance, vertex }) = heap.pop() {
        let current_best = reached[vertex.0 as usize].map(|r| r.distance).unwrap_or(f64::INFINITY);
        if distance > current_best {
            continue;
        }
        for &edge_id in &graph.outgoing[vertex.0 as usize] {
            let edge = graph.edge(edge_id);
            let candidate = distance + edge.weight;
            let better = match reached[edge.to.0 as usize] {
                Some(existing) => candidate < existing.distance,
                None => true,
            };
            if better {
                reached[edge.to.0 as usize] = Some(Reached {
                    distance: candidate,
                    via: Some(edge_id),
                });
                heap.push(HeapEntry {
                    distance: candidate,
                    vertex: edge.to,
                });
            }
        }
    }

    ShortestPaths { reached }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_shorter_path_through_intermediate_vertex() {
        let mut graph: DirectedWeightedGraph<()> = DirectedWeightedGraph::new(3);
        graph.add_edge(Edge { from: VertexId(0), to: VertexId(2), weight: 10.0, payload: () });
        graph.add_edge(Edge { from: VertexId(0), to: VertexId(1), weight: 1.0, payload: () });
        graph.add_edge(Edge { from: VertexId(1), to: VertexId(2), weight: 1.0, payload: () });

        let paths = shortest_paths_from(&graph, VertexId(0));
        assert_eq!(paths.distance_to(VertexId(2)), Some(2.0));
        let edges = paths.edges_to(&graph, VertexId(2)).unwrap();
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn unreachable_vertex_has_no_path() {
        let mut graph: DirectedWeightedGraph<()> = DirectedWeightedGraph::new(2);
        graph.add_edge(Edge { from: VertexId(1), to: VertexId(0), weight: 1.0, payload: () });
        let paths = shortest_paths_from(&graph, VertexId(0));
        assert_eq!(paths.distance_to(VertexId(1)), None);
    }
}
