//! Spherical distance and the map canvas projection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used by [`Coordinate::distance_to`], in metres.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
/// Degrees-to-radians factor, matching the original `geo::DR` constant.
const DEGREES_TO_RADIANS: f64 = std::f64::consts::PI / 180.0;
/// Below this span (in degrees) an axis is treated as having zero extent.
const DEGENERATE_SPAN_TOLERANCE: f64 = 1e-6;

/// A geographic point: latitude in `[-90, 90]`, longitude in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other`, via the spherical law of cosines.
    ///
    /// Identical coordinates return exactly `0.0`; `acos` is numerically
    /// unstable right at its domain boundary, so equality is checked first
    /// rather than relied on to fall out of the formula.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        if self == other {
            return 0.0;
        }
        let lat1 = self.latitude * DEGREES_TO_RADIANS;
        let lat2 = other.latitude * DEGREES_TO_RADIANS;
        let dlng = (self.longitude - other.longitude).abs() * DEGREES_TO_RADIANS;
        let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlng.cos();
        // Guard against floating point drift pushing the argument outside [-1, 1].
        cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS_METERS
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("cannot project an empty set of coordinates")]
    EmptyReferenceSet,
}

/// A point on the render canvas, produced by [`SphereProjector::project`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Maps geographic coordinates onto a padded canvas, preserving aspect ratio
/// and flipping latitude (higher latitude renders with a smaller y).
#[derive(Debug, Clone, Copy)]
pub struct SphereProjector {
    min_lng: f64,
    max_lat: f64,
    zoom: f64,
    padding: f64,
}

impl SphereProjector {
    /// Builds a projector from the bounding box of `coordinates`.
    ///
    /// Fails with [`Error::EmptyReferenceSet`] if `coordinates` is empty.
    pub fn new<'a, I>(coordinates: I, width: f64, height: f64, padding: f64) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut iter = coordinates.into_iter().peekable();
        if iter.peek().is_none() {
            return Err(Error::EmptyReferenceSet);
        }

        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
        for coord in iter {
            min_lat = min_lat.min(coord.latitude);
            max_lat = max_lat.max(coord.latitude);
            min_lng = min_lng.min(coord.longitude);
            max_lng = max_lng.max(coord.longitude);
        }

        let lng_span = max_lng - min_lng;
        let lat_span = max_lat - min_lat;
        let width_zoom = if lng_span.abs() > DEGENERATE_SPAN_TOLERANCE {
            Some((width - 2.0 * padding) / lng_span)
        } else {
            None
        };
        let height_zoom = if lat_span.abs() > DEGENERATE_SPAN_TOLERANCE {
            Some((height - 2.0 * padding) / lat_span)
        } else {
            None
        };

        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(w), None) => w,
            (None, Some(h)) => h,
            (None, None) => 0.0,
        };

        Ok(Self {
            min_lng,
            max_lat,
            zoom,
            padding,
        })
    }

    pub fn project(&self, coordinate: &Coordinate) -> Point {
        Point {
            x: (coordinate.longitude - self.min_lng) * self.zoom + self.padding,
            y: (self.max_lat - coordinate.latitude) * self.zoom + self.padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_coordinates_have_zero_distance() {
        let a = Coordinate::new(55.611_087, 37.208_290);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn known_distance_matches_reference() {
        let x = Coordinate::new(55.611_087, 37.208_290);
        let y = Coordinate::new(55.595_884, 37.209_755);
        let distance = x.distance_to(&y);
        assert!((distance - 3_900.0).abs() < 50.0);
    }

    #[test]
    fn empty_reference_set_is_invalid_input() {
        let coords: Vec<Coordinate> = vec![];
        assert_eq!(
            SphereProjector::new(coords.iter(), 600.0, 400.0, 50.0).unwrap_err(),
            Error::EmptyReferenceSet
        );
    }

    #[test]
    fn both_axes_degenerate_yields_zero_zoom() {
        let coords = vec![Coordinate::new(10.0, 20.0), Coordinate::new(10.0, 20.0)];
        let projector = SphereProjector::new(coords.iter(), 600.0, 400.0, 50.0).unwrap();
        let point = projector.project(&coords[0]);
        assert_eq!(point, Point { x: 50.0, y: 50.0 });
    }

    #[test]
    fn latitude_inverts_while_longitude_does_not() {
        let coords = vec![Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 10.0)];
        let projector = SphereProjector::new(coords.iter(), 600.0, 400.0, 50.0).unwrap();
        let top = projector.project(&coords[1]); // higher latitude
        let bottom = projector.project(&coords[0]);
        assert!(top.y < bottom.y);
        assert!(top.x > bottom.x);
    }
}
