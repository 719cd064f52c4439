use jiff::Zoned;
use rand::RngCore;

use crate::problem::{
    point::Point,
    shipment::{Shipment, ShipmentBuilder},
};

pub struct MockRng {
    data: Vec<u64>,
    index: usize,
}

impl MockRng {
    pub fn new(data: Vec<u64>) -> Self {
        MockRng { data, index: 0 }
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.data[self.index % self.data.len()];
        self.index = (self.index + 1) % self.data.len();
        value
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst.iter_mut() {
            *byte = 0;
        }
    }
}

pub fn create_shipment(id: &str, pickup: (f64, f64), drop: (f64, f64)) -> Shipment {
    let mut builder = ShipmentBuilder::default();
    builder
        .set_id(id)
        .set_pickup(Point::new(pickup.0, pickup.1))
        .set_drop(Point::new(drop.0, drop.1));
    builder.build().unwrap()
}

pub fn create_weighted_shipment(
    id: &str,
    pickup: (f64, f64),
    drop: (f64, f64),
    weight: f64,
) -> Shipment {
    let mut builder = ShipmentBuilder::default();
    builder
        .set_id(id)
        .set_pickup(Point::new(pickup.0, pickup.1))
        .set_drop(Point::new(drop.0, drop.1))
        .set_weight(weight);
    builder.build().unwrap()
}

/// Shipments named `s0`, `s1`, ... from `(pickup, drop)` pairs.
pub fn create_shipments(pairs: Vec<((f64, f64), (f64, f64))>) -> Vec<Shipment> {
    pairs
        .into_iter()
        .enumerate()
        .map(|(index, (pickup, drop))| create_shipment(&format!("s{index}"), pickup, drop))
        .collect()
}

/// Three shipments around Connaught Place and three around Rohini.
pub fn create_two_district_shipments() -> Vec<Shipment> {
    create_shipments(vec![
        ((28.600, 77.200), (28.540, 77.390)),
        ((28.850, 77.090), (28.700, 77.100)),
        ((28.602, 77.203), (28.550, 77.380)),
        ((28.853, 77.088), (28.710, 77.120)),
        ((28.598, 77.198), (28.530, 77.370)),
        ((28.848, 77.093), (28.690, 77.110)),
    ])
}

/// A civil time at a fixed +05:30 offset, e.g. `"2024-01-03T09:00"`.
///
/// 2024-01-01 is a Monday, 2024-01-06 a Saturday.
pub fn local_time(civil: &str) -> Zoned {
    let datetime: jiff::civil::DateTime = civil.parse().unwrap();
    let offset = jiff::tz::Offset::from_seconds(5 * 3600 + 30 * 60).unwrap();
    datetime.to_zoned(jiff::tz::TimeZone::fixed(offset)).unwrap()
}
