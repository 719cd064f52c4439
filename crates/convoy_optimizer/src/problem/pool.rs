use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    geometry,
    problem::{point::Point, shipment::Shipment},
};

/// Shipments sharing one vehicle. Also used for K-means cluster groups.
///
/// Members keep their assignment order. Centroids, totals and the aggregate
/// bearing are recomputed from scratch on every membership change.
#[skip_serializing_none]
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    id: String,
    shipments: Vec<Shipment>,
    pickup_centroid: Point,
    drop_centroid: Point,
    total_weight: f64,
    total_volume: f64,
    bearing_deg: Option<f64>,
}

impl Pool {
    pub fn new(id: impl Into<String>, first: Shipment) -> Self {
        let mut pool = Pool {
            id: id.into(),
            pickup_centroid: first.pickup(),
            drop_centroid: first.drop(),
            shipments: vec![first],
            total_weight: 0.0,
            total_volume: 0.0,
            bearing_deg: None,
        };
        pool.recompute();
        pool
    }

    /// `None` when `shipments` is empty.
    pub fn from_shipments(id: impl Into<String>, shipments: Vec<Shipment>) -> Option<Self> {
        let mut iter = shipments.into_iter();
        let mut pool = Pool::new(id, iter.next()?);
        pool.shipments.extend(iter);
        pool.recompute();
        Some(pool)
    }

    pub fn push(&mut self, shipment: Shipment) {
        self.shipments.push(shipment);
        self.recompute();
    }

    fn recompute(&mut self) {
        if let Some(centroid) = geometry::centroid(self.shipments.iter().map(|s| s.pickup())) {
            self.pickup_centroid = centroid;
        }
        if let Some(centroid) = geometry::centroid(self.shipments.iter().map(|s| s.drop())) {
            self.drop_centroid = centroid;
        }

        self.total_weight = self.shipments.iter().map(|s| s.weight_or_zero()).sum();
        self.total_volume = self.shipments.iter().map(|s| s.volume_or_zero()).sum();
        self.bearing_deg = geometry::try_bearing_deg(self.pickup_centroid, self.drop_centroid);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    pub fn shipment_ids(&self) -> impl Iterator<Item = &str> {
        self.shipments.iter().map(|shipment| shipment.id())
    }

    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }

    pub fn pickup_centroid(&self) -> Point {
        self.pickup_centroid
    }

    pub fn drop_centroid(&self) -> Point {
        self.drop_centroid
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    /// Bearing from the pickup centroid to the drop centroid, `None` when
    /// both coincide.
    pub fn bearing_deg(&self) -> Option<f64> {
        self.bearing_deg
    }
}

/// Formats the id of the `index`-th pool of a run.
pub fn pool_id(index: usize) -> String {
    format!("POOL_{index:03}")
}
