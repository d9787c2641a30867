use serde::Deserialize;
use transit_catalogue::render::RenderColor;

/// A color as it appears on the wire: a literal string (`"green"`,
/// `"#ff0000"`), a 3-element `[r,g,b]` integer array, or a 4-element
/// `[r,g,b,a]` array with integer `r,g,b` and a real `a`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorDto {
    Named(String),
    Rgb((u8, u8, u8)),
    Rgba((u8, u8, u8, f64)),
}

impl From<ColorDto> for RenderColor {
    fn from(value: ColorDto) -> Self {
        match value {
            ColorDto::Named(name) => RenderColor::Named(name),
            ColorDto::Rgb((r, g, b)) => RenderColor::Rgb { r, g, b },
            ColorDto::Rgba((r, g, b, a)) => RenderColor::Rgba { r, g, b, a },
        }
    }
}
