use serde::Deserialize;
use transit_catalogue::render::{self, RenderSettings};
use transit_catalogue::router::{self, RoutingSettings};

use super::color::ColorDto;

#[derive(Debug, Clone, Deserialize)]
pub struct RenderSettingsDto {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub stop_radius: f64,
    pub line_width: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: (f64, f64),
    pub stop_label_font_size: u32,
    pub stop_label_offset: (f64, f64),
    pub underlayer_color: ColorDto,
    pub underlayer_width: f64,
    pub color_palette: Vec<ColorDto>,
}

impl RenderSettingsDto {
    pub fn into_settings(self) -> Result<RenderSettings, render::Error> {
        RenderSettings::new(
            self.width,
            self.height,
            self.padding,
            self.stop_radius,
            self.line_width,
            self.bus_label_font_size,
            self.bus_label_offset,
            self.stop_label_font_size,
            self.stop_label_offset,
            self.underlayer_color.into(),
            self.underlayer_width,
            self.color_palette.into_iter().map(Into::into).collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RoutingSettingsDto {
    pub bus_wait_time: u32,
    pub bus_velocity: f64,
}

impl RoutingSettingsDto {
    pub fn into_settings(self) -> Result<RoutingSettings, router::Error> {
        RoutingSettings::new(self.bus_wait_time, self.bus_velocity)
    }
}
