//! Plain data held by the [`super::Catalogue`].

use crate::geo::Coordinate;

/// Index of a [`Stop`] within [`super::Catalogue::stops`].
///
/// Entities are addressed by index rather than by name or pointer: the
/// backing `Vec`s are append-only during ingestion and never reordered or
/// relocated once a [`super::Catalogue`] is sealed, so a `StopId` stays
/// valid for the catalogue's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub(crate) u32);

impl StopId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a [`Bus`] within [`super::Catalogue::buses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BusId(pub(crate) u32);

impl BusId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A named geographic point in the network.
#[derive(Debug, Clone)]
pub struct Stop {
    pub name: String,
    pub coordinate: Coordinate,
}

/// A named ordered traversal of stops.
///
/// For a non-roundtrip bus the stored `stops` sequence is already the
/// unfolded forward-then-reverse form (`A,B,C,...,Z,Y,...,A`); callers never
/// see the original forward-only input.
#[derive(Debug, Clone)]
pub struct Bus {
    pub id: String,
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
}
