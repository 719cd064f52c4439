use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    problem::shipment::{Priority, Shipment, ShipmentBuilder},
    utils::bbox::BBox,
};

const PRIORITIES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

/// Area and weight range of synthetic shipments. Defaults cover Delhi.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorParams {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            min_lat: 28.4041,
            max_lat: 28.8836,
            min_lng: 76.8388,
            max_lng: 77.3462,
            min_weight_kg: 10.0,
            max_weight_kg: 500.0,
        }
    }
}

/// Random shipments with pickup and drop anywhere inside the area.
pub struct ShipmentGenerator {
    area: BBox,
    min_weight_kg: f64,
    max_weight_kg: f64,
}

impl Default for ShipmentGenerator {
    fn default() -> Self {
        ShipmentGenerator::new(&GeneratorParams::default())
    }
}

impl ShipmentGenerator {
    pub fn new(params: &GeneratorParams) -> Self {
        ShipmentGenerator {
            area: BBox::new(params.min_lat, params.max_lat, params.min_lng, params.max_lng),
            min_weight_kg: params.min_weight_kg.min(params.max_weight_kg),
            max_weight_kg: params.min_weight_kg.max(params.max_weight_kg),
        }
    }

    /// `count` shipments with ids `SHIP_001`, `SHIP_002`, ...
    pub fn generate<R>(&self, count: usize, rng: &mut R) -> Vec<Shipment>
    where
        R: Rng + ?Sized,
    {
        let shipments: Vec<Shipment> = (1..=count)
            .filter_map(|number| self.generate_one(number, rng))
            .collect();

        debug!(count = shipments.len(), "Generated shipments");

        shipments
    }

    fn generate_one<R>(&self, number: usize, rng: &mut R) -> Option<Shipment>
    where
        R: Rng + ?Sized,
    {
        let weight = if self.min_weight_kg < self.max_weight_kg {
            rng.random_range(self.min_weight_kg..=self.max_weight_kg)
        } else {
            self.min_weight_kg
        };

        let mut builder = ShipmentBuilder::default();
        builder
            .set_id(format!("SHIP_{number:03}"))
            .set_pickup(self.area.sample(rng))
            .set_drop(self.area.sample(rng))
            .set_weight((weight * 10.0).round() / 10.0)
            .set_priority(PRIORITIES[rng.random_range(0..PRIORITIES.len())]);

        builder.build().ok()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;

    #[test]
    fn test_generated_shipments_stay_in_bounds() {
        let params = GeneratorParams::default();
        let area = BBox::new(params.min_lat, params.max_lat, params.min_lng, params.max_lng);
        let mut rng = SmallRng::seed_from_u64(21);

        let shipments = ShipmentGenerator::default().generate(50, &mut rng);

        assert_eq!(shipments.len(), 50);
        assert_eq!(shipments[0].id(), "SHIP_001");
        assert_eq!(shipments[49].id(), "SHIP_050");

        for shipment in &shipments {
            assert!(area.contains(shipment.pickup()));
            assert!(area.contains(shipment.drop()));

            let weight = shipment.weight().unwrap();
            assert!((10.0..=500.0).contains(&weight));
            assert!(shipment.priority().is_some());
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let generator = ShipmentGenerator::default();

        let first = generator.generate(10, &mut SmallRng::seed_from_u64(4));
        let second = generator.generate(10, &mut SmallRng::seed_from_u64(4));

        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_weight() {
        let generator = ShipmentGenerator::new(&GeneratorParams {
            min_weight_kg: 25.0,
            max_weight_kg: 25.0,
            ..GeneratorParams::default()
        });

        let shipments = generator.generate(3, &mut SmallRng::seed_from_u64(1));

        assert!(shipments.iter().all(|s| s.weight() == Some(25.0)));
    }
}
