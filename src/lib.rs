//! Offline transport-catalogue query engine.
//!
//! Three subsystems share one immutable [`catalogue::Catalogue`]:
//!
//! - [`stat`] answers route-statistics and stop-membership queries.
//! - [`render`] projects the network onto a canvas and emits an SVG document.
//! - [`router`] builds a wait/ride graph and solves fastest-itinerary queries.
//!
//! [`geo`] underlies all three: great-circle distance and the canvas
//! projector used by the renderer.
//!
//! Ingestion is one-shot: a [`catalogue::CatalogueBuilder`] consumes
//! `add_stop`/`add_route`/`set_distance` calls and seals into a read-only
//! [`catalogue::Catalogue`] that the other subsystems borrow from for the
//! remainder of the process.

pub mod catalogue;
pub mod geo;
pub mod render;
pub mod router;
pub mod stat;
