//! Projects the catalogue onto a canvas and emits a layered SVG document.

pub mod svg;

use thiserror::Error;

use crate::catalogue::{BusId, Catalogue, StopId};
use crate::geo::{self, Coordinate, SphereProjector};
use svg::{Color, Document, Element};

pub use svg::Color as RenderColor;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid render settings: {0}")]
    InvalidSettings(&'static str),
    #[error(transparent)]
    Geo(#[from] geo::Error),
}

/// Render configuration. Constructed through [`RenderSettings::new`], which
/// enforces spec §3's invariants (`padding < min(width,height)/2`, a
/// non-empty palette) as [`Error::InvalidSettings`].
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub stop_radius: f64,
    pub line_width: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: (f64, f64),
    pub stop_label_font_size: u32,
    pub stop_label_offset: (f64, f64),
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

impl RenderSettings {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: f64,
        height: f64,
        padding: f64,
        stop_radius: f64,
        line_width: f64,
        bus_label_font_size: u32,
        bus_label_offset: (f64, f64),
        stop_label_font_size: u32,
        stop_label_offset: (f64, f64),
        underlayer_color: Color,
        underlayer_width: f64,
        color_palette: Vec<Color>,
    ) -> Result<Self, Error> {
        if color_palette.is_empty() {
            return Err(Error::InvalidSettings("color_palette must not be empty"));
        }
        if padding < 0.0 || padding >= width.min(height) / 2.0 {
            return Err(Error::InvalidSettings(
                "padding must be less than min(width, height) / 2",
            ));
        }
        Ok(Self {
            width,
            height,
            padding,
            stop_radius,
            line_width,
            bus_label_font_size,
            bus_label_offset,
            stop_label_font_size,
            stop_label_offset,
            underlayer_color,
            underlayer_width,
            color_palette,
        })
    }
}

/// Renders the network reachable by at least one bus as an SVG document.
///
/// Layer order is strict: route polylines, then route labels (underlayer
/// then text), then stop circles, then stop labels (underlayer then text) —
/// so labels always draw over geometry, matching
/// `map_renderer.cpp::MapRenderer::GetSVG`.
pub fn render(catalogue: &Catalogue, settings: &RenderSettings) -> Result<String, Error> {
    let buses = catalogue.sorted_buses();
    let stops = catalogue.sorted_stops();

    let coordinates: Vec<Coordinate> = stops.iter().map(|&id| catalogue.stop(id).coordinate).collect();
    let projector = SphereProjector::new(coordinates.iter(), settings.width, settings.height, settings.padding)?;

    let mut document = Document::new();

    for element in route_lines(catalogue, &buses, &projector, settings) {
        document.add(element);
    }
    for element in route_labels(catalogue, &buses, &projector, settings) {
        document.add(element);
    }
    for element in stop_circles(catalogue, &stops, &projector, settings) {
        document.add(element);
    }
    for element in stop_labels(catalogue, &stops, &projector, settings) {
        document.add(element);
    }

    Ok(document.render())
}

fn palette_color(settings: &RenderSettings, bus_index: usize) -> Color {
    settings.color_palette[bus_index % settings.color_palette.len()].clone()
}

fn route_lines(
    catalogue: &Catalogue,
    buses: &[BusId],
    projector: &SphereProjector,
    settings: &RenderSettings,
) -> Vec<Element> {
    buses
        .iter()
        .enumerate()
        .map(|(i, &bus_id)| {
            let bus = catalogue.bus(bus_id);
            let points = bus
                .stops
                .iter()
                .map(|&stop_id| projector.project(&catalogue.stop(stop_id).coordinate).into())
                .collect();
            Element::Polyline(svg::Polyline {
                points,
                props: svg::PathProps {
                    fill: Some(Color::None),
                    stroke: Some(palette_color(settings, i)),
                    stroke_width: Some(settings.line_width),
                    stroke_linecap: Some("round"),
                    stroke_linejoin: Some("round"),
                },
            })
        })
        .collect()
}

fn bus_label_pair(
    position: svg::Point,
    bus_name: &str,
    color: Color,
    settings: &RenderSettings,
) -> [Element; 2] {
    let base = svg::Text {
        position,
        offset: svg::Point {
            x: settings.bus_label_offset.0,
            y: settings.bus_label_offset.1,
        },
        font_size: settings.bus_label_font_size,
        font_family: "Verdana",
        font_weight: Some("bold"),
        data: bus_name.to_string(),
        props: svg::PathProps::default(),
    };
    let underlayer = svg::Text {
        props: svg::PathProps {
            fill: Some(settings.underlayer_color.clone()),
            stroke: Some(settings.underlayer_color.clone()),
            stroke_width: Some(settings.underlayer_width),
            stroke_linecap: Some("round"),
            stroke_linejoin: Some("round"),
        },
        ..base.clone()
    };
    let text = svg::Text {
        props: svg::PathProps {
            fill: Some(color),
            ..svg::PathProps::default()
        },
        ..base
    };
    [Element::Text(underlayer), Element::Text(text)]
}

fn route_labels(
    catalogue: &Catalogue,
    buses: &[BusId],
    projector: &SphereProjector,
    settings: &RenderSettings,
) -> Vec<Element> {
    let mut elements = Vec::new();
    for (i, &bus_id) in buses.iter().enumerate() {
        let bus = catalogue.bus(bus_id);
        let color = palette_color(settings, i);
        let first = bus.stops[0];
        let first_point = projector.project(&catalogue.stop(first).coordinate).into();
        elements.extend(bus_label_pair(first_point, &bus.id, color.clone(), settings));

        if !bus.is_roundtrip {
            let midpoint = bus.stops[bus.stops.len() / 2];
            if midpoint != first {
                let mid_point = projector.project(&catalogue.stop(midpoint).coordinate).into();
                elements.extend(bus_label_pair(mid_point, &bus.id, color, settings));
            }
        }
    }
    elements
}

fn stop_circles(
    catalogue: &Catalogue,
    stops: &[StopId],
    projector: &SphereProjector,
    settings: &RenderSettings,
) -> Vec<Element> {
    stops
        .iter()
        .map(|&stop_id| {
            Element::Circle(svg::Circle {
                center: projector.project(&catalogue.stop(stop_id).coordinate).into(),
                radius: settings.stop_radius,
                props: svg::PathProps {
                    fill: Some(Color::Named("white".into())),
                    ..svg::PathProps::default()
                },
            })
        })
        .collect()
}

fn stop_labels(
    catalogue: &Catalogue,
    stops: &[StopId],
    projector: &SphereProjector,
    settings: &RenderSettings,
) -> Vec<Element> {
    let mut elements = Vec::new();
    for &stop_id in stops {
        let stop = catalogue.stop(stop_id);
        let position: svg::Point = projector.project(&stop.coordinate).into();
        let offset = svg::Point {
            x: settings.stop_label_offset.0,
            y: settings.stop_label_offset.1,
        };
        let underlayer = svg::Text {
            position,
            offset,
            font_size: settings.stop_label_font_size,
            font_family: "Verdana",
            font_weight: None,
            data: stop.name.clone(),
            props: svg::PathProps {
                fill: Some(settings.underlayer_color.clone()),
                stroke: Some(settings.underlayer_color.clone()),
                stroke_width: Some(settings.underlayer_width),
                stroke_linecap: Some("round"),
                stroke_linejoin: Some("round"),
            },
        };
        let text = svg::Text {
            props: svg::PathProps {
                fill: Some(Color::Named("black".into())),
                ..svg::PathProps::default()
            },
            ..underlayer.clone()
        };
        elements.push(Element::Text(underlayer));
        elements.push(Element::Text(text));
    }
    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::CatalogueBuilder;

    fn settings() -> RenderSettings {
        RenderSettings::new(
            600.0,
            400.0,
            50.0,
            5.0,
            14.0,
            20,
            (7.0, 15.0),
            20,
            (7.0, -3.0),
            Color::Named("white".into()),
            3.0,
            vec![Color::Named("green".into()), Color::Rgb { r: 255, g: 160, b: 0 }],
        )
        .unwrap()
    }

    #[test]
    fn empty_palette_is_invalid() {
        let result = RenderSettings::new(
            600.0, 400.0, 50.0, 5.0, 14.0, 20, (7.0, 15.0), 20, (7.0, -3.0),
            Color::Named("white".into()), 3.0, vec![],
        );
        assert!(result.is_err());
    }

    #[test]
    fn padding_must_be_less_than_half_min_dimension() {
        let result = RenderSettings::new(
            100.0, 100.0, 60.0, 5.0, 14.0, 20, (7.0, 15.0), 20, (7.0, -3.0),
            Color::Named("white".into()), 3.0, vec![Color::Named("green".into())],
        );
        assert!(result.is_err());
    }

    #[test]
    fn isolated_stop_is_excluded_from_the_map() {
        let mut builder = CatalogueBuilder::new();
        builder.add_stop("Served", Coordinate::new(0.0, 0.0));
        builder.add_stop("Lonely", Coordinate::new(10.0, 10.0));
        builder
            .add_route("1", &["Served".into(), "Served".into()], true)
            .unwrap();
        let catalogue = builder.build();
        let svg = render(&catalogue, &settings()).unwrap();
        assert!(!svg.contains("Lonely"));
    }

    #[test]
    fn non_roundtrip_midpoint_equal_to_first_emits_one_label_pair() {
        let mut builder = CatalogueBuilder::new();
        builder.add_stop("A", Coordinate::new(0.0, 0.0));
        builder.add_stop("B", Coordinate::new(0.0, 1.0));
        // unfolded to [A, B, A]; midpoint (index 1) is B, not A, so this
        // case alone wouldn't dedup -- use a single-stop bus to force it.
        builder.add_route("1", &["A".into(), "B".into()], false).unwrap();
        let catalogue = builder.build();
        let bus = catalogue.bus(catalogue.find_route("1").unwrap());
        assert_eq!(bus.stops.len(), 3);
        assert_ne!(bus.stops[0], bus.stops[bus.stops.len() / 2]);

        let mut builder2 = CatalogueBuilder::new();
        builder2.add_stop("Solo", Coordinate::new(0.0, 0.0));
        builder2.add_route("2", &["Solo".into()], false).unwrap();
        let catalogue2 = builder2.build();
        let bus2 = catalogue2.bus(catalogue2.find_route("2").unwrap());
        assert_eq!(bus2.stops.len(), 1);
        assert_eq!(bus2.stops[0], bus2.stops[bus2.stops.len() / 2]);
        let svg = render(&catalogue2, &settings()).unwrap();
        assert_eq!(svg.matches("Solo").count(), 2); // one underlayer + one text
    }

    #[test]
    fn svg_rendering_is_deterministic() {
        let mut builder = CatalogueBuilder::new();
        builder.add_stop("X", Coordinate::new(55.611_087, 37.208_290));
        builder.add_stop("Y", Coordinate::new(55.595_884, 37.209_755));
        builder.add_route("14", &["X".into(), "Y".into(), "X".into()], true).unwrap();
        let catalogue = builder.build();
        let first = render(&catalogue, &settings()).unwrap();
        let second = render(&catalogue, &settings()).unwrap();
        assert_eq!(first, second);
    }
}
