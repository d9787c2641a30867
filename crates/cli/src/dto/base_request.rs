use std::collections::HashMap;

use serde::Deserialize;

/// One entry of `base_requests`: either a stop or a bus definition.
///
/// Processing order is fixed regardless of array order — see
/// `main::ingest`: all stops first, then all `road_distances`, then all
/// buses.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequestDto {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: HashMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}
