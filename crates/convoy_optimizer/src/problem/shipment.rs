use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{error::InvalidShipment, problem::point::Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[skip_serializing_none]
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    id: String,
    pickup: Point,
    drop: Point,
    weight: Option<f64>,
    volume: Option<f64>,
    priority: Option<Priority>,
}

impl Shipment {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pickup(&self) -> Point {
        self.pickup
    }

    pub fn drop(&self) -> Point {
        self.drop
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn volume(&self) -> Option<f64> {
        self.volume
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Weight in kg, zero when unknown.
    pub fn weight_or_zero(&self) -> f64 {
        self.weight.unwrap_or(0.0)
    }

    /// Volume in m³, zero when unknown.
    pub fn volume_or_zero(&self) -> f64 {
        self.volume.unwrap_or(0.0)
    }
}

#[derive(Default, Debug, Clone)]
pub struct ShipmentBuilder {
    id: Option<String>,
    pickup: Option<Point>,
    drop: Option<Point>,
    weight: Option<f64>,
    volume: Option<f64>,
    priority: Option<Priority>,
}

impl ShipmentBuilder {
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut ShipmentBuilder {
        self.id = Some(id.into());
        self
    }

    pub fn set_pickup(&mut self, pickup: Point) -> &mut ShipmentBuilder {
        self.pickup = Some(pickup);
        self
    }

    pub fn set_drop(&mut self, drop: Point) -> &mut ShipmentBuilder {
        self.drop = Some(drop);
        self
    }

    pub fn set_weight(&mut self, weight: f64) -> &mut ShipmentBuilder {
        self.weight = Some(weight);
        self
    }

    pub fn set_volume(&mut self, volume: f64) -> &mut ShipmentBuilder {
        self.volume = Some(volume);
        self
    }

    pub fn set_priority(&mut self, priority: Priority) -> &mut ShipmentBuilder {
        self.priority = Some(priority);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Validates the collected fields. A shipment needs an id and finite
    /// pickup and drop coordinates; non-finite weight or volume is dropped.
    pub fn build(self) -> Result<Shipment, InvalidShipment> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(InvalidShipment::MissingId),
        };

        let Some(pickup) = self.pickup else {
            return Err(InvalidShipment::MissingPickup(id));
        };
        let Some(drop) = self.drop else {
            return Err(InvalidShipment::MissingDrop(id));
        };

        if !pickup.is_finite() || !drop.is_finite() {
            return Err(InvalidShipment::NonFiniteCoordinates(id));
        }

        Ok(Shipment {
            id,
            pickup,
            drop,
            weight: self.weight.filter(|weight| weight.is_finite()),
            volume: self.volume.filter(|volume| volume.is_finite()),
            priority: self.priority,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let mut builder = ShipmentBuilder::default();
        builder
            .set_id("SHIP_001")
            .set_pickup(Point::new(28.61, 77.21))
            .set_drop(Point::new(28.53, 77.39))
            .set_weight(120.0)
            .set_priority(Priority::High);

        let shipment = builder.build().unwrap();

        assert_eq!(shipment.id(), "SHIP_001");
        assert_eq!(shipment.pickup(), Point::new(28.61, 77.21));
        assert_eq!(shipment.drop(), Point::new(28.53, 77.39));
        assert_eq!(shipment.weight(), Some(120.0));
        assert_eq!(shipment.volume(), None);
        assert_eq!(shipment.volume_or_zero(), 0.0);
        assert_eq!(shipment.priority(), Some(Priority::High));
    }

    #[test]
    fn test_builder_rejects_missing_drop() {
        let mut builder = ShipmentBuilder::default();
        builder.set_id("a").set_pickup(Point::new(1.0, 1.0));

        assert_eq!(
            builder.build(),
            Err(InvalidShipment::MissingDrop("a".to_owned()))
        );
    }

    #[test]
    fn test_builder_rejects_blank_id() {
        let mut builder = ShipmentBuilder::default();
        builder
            .set_id("  ")
            .set_pickup(Point::new(1.0, 1.0))
            .set_drop(Point::new(2.0, 2.0));

        assert_eq!(builder.build(), Err(InvalidShipment::MissingId));
    }

    #[test]
    fn test_builder_rejects_nan_coordinates() {
        let mut builder = ShipmentBuilder::default();
        builder
            .set_id("a")
            .set_pickup(Point::new(f64::NAN, 1.0))
            .set_drop(Point::new(2.0, 2.0));

        assert_eq!(
            builder.build(),
            Err(InvalidShipment::NonFiniteCoordinates("a".to_owned()))
        );
    }

    #[test]
    fn test_builder_drops_non_finite_weight() {
        let mut builder = ShipmentBuilder::default();
        builder
            .set_id("a")
            .set_pickup(Point::new(1.0, 1.0))
            .set_drop(Point::new(2.0, 2.0))
            .set_weight(f64::INFINITY);

        assert_eq!(builder.build().unwrap().weight(), None);
    }
}
