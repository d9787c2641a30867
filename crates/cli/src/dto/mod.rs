mod base_request;
mod color;
mod settings;
mod stat_request;

pub use base_request::BaseRequestDto;
pub use settings::{RenderSettingsDto, RoutingSettingsDto};
pub use stat_request::{RouteItemDto, StatRequest, StatRequestKind, StatResponseDto};

use serde::Deserialize;

/// The top-level JSON object read from standard input.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub base_requests: Vec<BaseRequestDto>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
    pub render_settings: Option<RenderSettingsDto>,
    pub routing_settings: Option<RoutingSettingsDto>,
}
