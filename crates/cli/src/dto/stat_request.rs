use serde::{Deserialize, Serialize};

/// One entry of `stat_requests`. `id` is carried alongside the tagged
/// payload so responses can echo it back as `request_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatRequest {
    pub id: u64,
    #[serde(flatten)]
    pub kind: StatRequestKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequestKind {
    Stop { name: String },
    Bus { name: String },
    Map,
    Route { from: String, to: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum RouteItemDto {
    Wait { stop_name: String, time: f64 },
    Bus { bus: String, span_count: u32, time: f64 },
}

impl From<transit_catalogue::router::RouteItem> for RouteItemDto {
    fn from(value: transit_catalogue::router::RouteItem) -> Self {
        match value {
            transit_catalogue::router::RouteItem::Wait { stop, time } => {
                RouteItemDto::Wait { stop_name: stop, time }
            }
            transit_catalogue::router::RouteItem::Ride { bus, span_count, time } => {
                RouteItemDto::Bus { bus, span_count, time }
            }
        }
    }
}

/// A single `stat_requests` response. Untagged so a successful payload and
/// `{request_id, error_message}` both serialise to a flat object, matching
/// §6.1's response shapes.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StatResponseDto {
    Stop {
        request_id: u64,
        buses: Vec<String>,
    },
    Bus {
        request_id: u64,
        curvature: f64,
        route_length: f64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Map {
        request_id: u64,
        map: String,
    },
    Route {
        request_id: u64,
        total_time: f64,
        items: Vec<RouteItemDto>,
    },
    Error {
        request_id: u64,
        error_message: String,
    },
}
