use rand::Rng;

use crate::problem::point::Point;

/// Axis-aligned lat/lng rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    min: geo::Coord<f64>,
    max: geo::Coord<f64>,
}

impl BBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        BBox {
            min: geo::Coord {
                x: min_lng.min(max_lng),
                y: min_lat.min(max_lat),
            },
            max: geo::Coord {
                x: min_lng.max(max_lng),
                y: min_lat.max(max_lat),
            },
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.lng() >= self.min.x
            && point.lng() <= self.max.x
            && point.lat() >= self.min.y
            && point.lat() <= self.max.y
    }

    /// Uniformly samples a point inside the box.
    pub fn sample<R>(&self, rng: &mut R) -> Point
    where
        R: Rng + ?Sized,
    {
        let lat = if self.min.y < self.max.y {
            rng.random_range(self.min.y..self.max.y)
        } else {
            self.min.y
        };
        let lng = if self.min.x < self.max.x {
            rng.random_range(self.min.x..self.max.x)
        } else {
            self.min.x
        };

        Point::new(lat, lng)
    }
}
