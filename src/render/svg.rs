//! A minimal SVG document object model.
//!
//! Deliberately small and purpose-built rather than a pulled-in SVG crate:
//! the map renderer only ever needs circles, polylines and text, with a
//! fixed attribute set, so a hand-rolled `Document`/`Element` pair (mirroring
//! the original C++ `svg::Object`/`svg::PathProps<Owner>` hierarchy) is
//! simpler than adapting a general-purpose graphics crate to this one shape.

use std::fmt::{self, Write as _};

const INDENT_STEP: usize = 2;

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<crate::geo::Point> for Point {
    fn from(value: crate::geo::Point) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

/// An SVG color value.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// No attribute is emitted at all.
    None,
    /// Passed through verbatim (e.g. `"green"`, `"#ff0000"`).
    Named(String),
    Rgb { r: u8, g: u8, b: u8 },
    Rgba { r: u8, g: u8, b: u8, a: f64 },
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => f.write_str("none"),
            Color::Named(name) => f.write_str(name),
            Color::Rgb { r, g, b } => write!(f, "rgb({r},{g},{b})"),
            Color::Rgba { r, g, b, a } => write!(f, "rgba({r},{g},{b},{a})"),
        }
    }
}

fn html_escape(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            other => out.push(other),
        }
    }
}

/// Common stroke/fill attributes shared by every element, mirroring
/// `svg::PathProps<Owner>`.
#[derive(Debug, Clone, Default)]
pub struct PathProps {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub stroke_linecap: Option<&'static str>,
    pub stroke_linejoin: Option<&'static str>,
}

impl PathProps {
    fn render(&self, out: &mut String) {
        if let Some(fill) = &self.fill {
            let _ = write!(out, " fill=\"{fill}\"");
        }
        if let Some(stroke) = &self.stroke {
            let _ = write!(out, " stroke=\"{stroke}\"");
        }
        if let Some(width) = self.stroke_width {
            let _ = write!(out, " stroke-width=\"{width}\"");
        }
        if let Some(cap) = self.stroke_linecap {
            let _ = write!(out, " stroke-linecap=\"{cap}\"");
        }
        if let Some(join) = self.stroke_linejoin {
            let _ = write!(out, " stroke-linejoin=\"{join}\"");
        }
    }
}

#[derive(Debug, Clone)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub props: PathProps,
}

#[derive(Debug, Clone)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub props: PathProps,
}

#[derive(Debug, Clone)]
pub struct Text {
    pub position: Point,
    pub offset: Point,
    pub font_size: u32,
    pub font_family: &'static str,
    pub font_weight: Option<&'static str>,
    pub data: String,
    pub props: PathProps,
}

#[derive(Debug, Clone)]
pub enum Element {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

impl Element {
    fn render(&self, out: &mut String, indent: usize) {
        out.push_str(&" ".repeat(indent));
        match self {
            Element::Circle(circle) => {
                let _ = write!(
                    out,
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                    circle.center.x, circle.center.y, circle.radius
                );
                circle.props.render(out);
                out.push_str("/>\n");
            }
            Element::Polyline(polyline) => {
                out.push_str("<polyline points=\"");
                for (i, point) in polyline.points.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    let _ = write!(out, "{},{}", point.x, point.y);
                }
                out.push('"');
                polyline.props.render(out);
                out.push_str("/>\n");
            }
            Element::Text(text) => {
                let _ = write!(
                    out,
                    "<text x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
                    text.position.x,
                    text.position.y,
                    text.offset.x,
                    text.offset.y,
                    text.font_size
                );
                let _ = write!(out, " font-family=\"{}\"", text.font_family);
                if let Some(weight) = text.font_weight {
                    let _ = write!(out, " font-weight=\"{weight}\"");
                }
                text.props.render(out);
                out.push('>');
                html_escape(out, &text.data);
                out.push_str("</text>\n");
            }
        }
    }
}

/// An ordered list of SVG elements, rendered back-to-front.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Renders the full document, including the XML/SVG preamble.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
        out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n");
        for element in &self.elements {
            element.render(&mut out, INDENT_STEP);
        }
        out.push_str("</svg>");
        out
    }
}
