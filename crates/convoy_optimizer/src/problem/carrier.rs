use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A vehicle operator that may take a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    pub id: String,
    #[serde(default)]
    pub capacity_kg: Option<f64>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Carrier {
    pub fn new(id: impl Into<String>, capacity_kg: Option<f64>) -> Self {
        Carrier {
            id: id.into(),
            capacity_kg,
            available: true,
        }
    }
}

/// Largest capacity among available carriers that declare one.
pub fn max_available_capacity(carriers: &[Carrier]) -> Option<f64> {
    carriers
        .iter()
        .filter(|carrier| carrier.available)
        .filter_map(|carrier| carrier.capacity_kg)
        .filter(|capacity| capacity.is_finite() && *capacity > 0.0)
        .max_by(|a, b| a.total_cmp(b))
}
