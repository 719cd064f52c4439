//! Great-circle primitives on a spherical earth.

use geo::{Bearing, Haversine};

use crate::problem::point::Point;

pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Points closer than this are treated as coincident when a direction is needed.
const COINCIDENT_KM: f64 = 1e-9;

/// Haversine distance in km. Exactly symmetric, zero for identical points.
pub fn distance_km(a: Point, b: Point) -> f64 {
    let lat1_rad = a.lat().to_radians();
    let lat2_rad = b.lat().to_radians();

    // abs() keeps the result bit-identical when the arguments are swapped
    let delta_lat = (b.lat() - a.lat()).abs().to_radians();
    let delta_lng = (b.lng() - a.lng()).abs().to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial compass bearing from `a` to `b`, in `[0, 360)`.
///
/// The value for coincident points is whatever the formula yields; use
/// [`try_bearing_deg`] when the caller needs to know.
pub fn bearing_deg(a: Point, b: Point) -> f64 {
    normalize_bearing(Haversine.bearing(a.into(), b.into()))
}

/// Like [`bearing_deg`] but `None` for coincident points.
pub fn try_bearing_deg(a: Point, b: Point) -> Option<f64> {
    if distance_km(a, b) < COINCIDENT_KM {
        None
    } else {
        Some(bearing_deg(a, b))
    }
}

/// Smallest absolute angle between two bearings, in `[0, 180]`.
pub fn angular_difference_deg(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 { 360.0 - diff } else { diff }
}

/// Arithmetic mean of the coordinates.
pub fn centroid<I>(points: I) -> Option<Point>
where
    I: IntoIterator<Item = Point>,
{
    let (count, lat_sum, lng_sum) = points
        .into_iter()
        .fold((0usize, 0.0, 0.0), |(count, lat, lng), point| {
            (count + 1, lat + point.lat(), lng + point.lng())
        });

    if count == 0 {
        None
    } else {
        Some(Point::new(lat_sum / count as f64, lng_sum / count as f64))
    }
}

fn normalize_bearing(bearing: f64) -> f64 {
    let normalized = bearing.rem_euclid(360.0);
    if normalized >= 360.0 { 0.0 } else { normalized }
}
