use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    error::PoolingError,
    geometry,
    pooling::pooling_params::{DEFAULT_MAX_KMEANS_ITERATIONS, KMeansParams},
    problem::{
        point::Point,
        pool::{Pool, pool_id},
        shipment::Shipment,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    /// One pool per non-empty cluster, in centroid slot order.
    pub pools: Vec<Pool>,
    pub iterations: usize,
    /// `false` when the iteration cap stopped the search.
    pub converged: bool,
}

/// Lloyd's K-means over pickup locations.
///
/// A heuristic: the partition depends on the seeds drawn from the supplied
/// random source. It only guarantees termination and that every shipment
/// lands in exactly one emitted cluster; empty slots produce no cluster.
pub struct KMeansClusterer {
    max_iterations: usize,
}

impl Default for KMeansClusterer {
    fn default() -> Self {
        KMeansClusterer {
            max_iterations: DEFAULT_MAX_KMEANS_ITERATIONS,
        }
    }
}

impl KMeansClusterer {
    pub fn new(params: &KMeansParams) -> Self {
        KMeansClusterer {
            max_iterations: params.max_iterations.max(1),
        }
    }

    #[instrument(skip_all, level = "debug", fields(k = k, shipments = shipments.len()))]
    pub fn cluster<R>(
        &self,
        shipments: &[Shipment],
        k: usize,
        rng: &mut R,
    ) -> Result<KMeansResult, PoolingError>
    where
        R: Rng + ?Sized,
    {
        if k == 0 {
            return Err(PoolingError::InvalidClusterCount(0));
        }

        if shipments.len() <= k {
            let pools = shipments
                .iter()
                .enumerate()
                .map(|(index, shipment)| Pool::new(pool_id(index), shipment.clone()))
                .collect();

            return Ok(KMeansResult {
                pools,
                iterations: 0,
                converged: true,
            });
        }

        let mut centroids: Vec<Point> = rand::seq::index::sample(rng, shipments.len(), k)
            .iter()
            .map(|index| shipments[index].pickup())
            .collect();

        let mut assignments: Vec<Option<usize>> = vec![None; shipments.len()];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            iterations += 1;

            let mut changed = false;
            for (assignment, shipment) in assignments.iter_mut().zip(shipments) {
                let nearest = nearest_centroid(&centroids, shipment.pickup());
                if *assignment != Some(nearest) {
                    *assignment = Some(nearest);
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }

            for (slot, centroid) in centroids.iter_mut().enumerate() {
                let members = assignments
                    .iter()
                    .zip(shipments)
                    .filter(|(assignment, _)| **assignment == Some(slot))
                    .map(|(_, shipment)| shipment.pickup());

                // empty slots keep their previous centroid
                if let Some(mean) = geometry::centroid(members) {
                    *centroid = mean;
                }
            }
        }

        if converged {
            debug!(iterations, "k-means converged");
        } else {
            debug!(iterations, "k-means stopped at the iteration cap");
        }

        let mut groups: Vec<Vec<Shipment>> = vec![Vec::new(); k];
        for (assignment, shipment) in assignments.iter().zip(shipments) {
            if let Some(slot) = assignment {
                groups[*slot].push(shipment.clone());
            }
        }

        let pools = groups
            .into_iter()
            .filter(|group| !group.is_empty())
            .enumerate()
            .filter_map(|(index, group)| Pool::from_shipments(pool_id(index), group))
            .collect();

        Ok(KMeansResult {
            pools,
            iterations,
            converged,
        })
    }
}

/// Index of the closest centroid; ties go to the lowest index.
fn nearest_centroid(centroids: &[Point], point: Point) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;

    for (index, centroid) in centroids.iter().enumerate() {
        let distance = geometry::distance_km(*centroid, point);
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }

    best
}
