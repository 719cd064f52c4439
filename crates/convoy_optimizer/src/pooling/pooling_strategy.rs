use rand::Rng;
use tracing::debug;

use crate::{
    error::PoolingError,
    pooling::{
        kmeans::KMeansClusterer,
        pairwise_matcher::PairwiseMatcher,
        pooling_params::{KMeansParams, PairwiseParams},
    },
    problem::{carrier::Carrier, pool::Pool, shipment::Shipment},
    timer_debug,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PoolingStrategy {
    Greedy(PairwiseParams),
    KMeans(KMeansParams),
}

impl PoolingStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            PoolingStrategy::Greedy(_) => "greedy",
            PoolingStrategy::KMeans(_) => "kmeans",
        }
    }

    pub fn algorithm_name(&self) -> &'static str {
        match self {
            PoolingStrategy::Greedy(_) => "Greedy Pairwise Matching",
            PoolingStrategy::KMeans(_) => "K-Means Clustering",
        }
    }

    /// Rejects unusable parameters before any shipment is looked at.
    pub fn validate(&self) -> Result<(), PoolingError> {
        match self {
            PoolingStrategy::Greedy(params) => params.validate(),
            PoolingStrategy::KMeans(params) => match params.max_clusters {
                Some(0) => Err(PoolingError::InvalidClusterCount(0)),
                _ => Ok(()),
            },
        }
    }
}

/// How the K-means search went, absent for the greedy strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteringReport {
    pub requested_clusters: usize,
    pub iterations: usize,
    pub converged: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolAssembly {
    pub pools: Vec<Pool>,
    pub clustering: Option<ClusteringReport>,
}

/// Partitions already validated shipments into pools with the chosen
/// strategy. `carriers` only matter to the greedy strategy and `rng` only to
/// K-means.
pub fn assemble_pools<R>(
    shipments: &[Shipment],
    strategy: &PoolingStrategy,
    carriers: &[Carrier],
    rng: &mut R,
) -> Result<PoolAssembly, PoolingError>
where
    R: Rng + ?Sized,
{
    if shipments.is_empty() {
        return Err(PoolingError::NoValidShipments { rejected: 0 });
    }

    let assembly = match strategy {
        PoolingStrategy::Greedy(params) => {
            let matcher = PairwiseMatcher::new(params.clone())?;
            let pools = timer_debug!(
                "Greedy pooling",
                matcher.match_pools(shipments, carriers)
            );

            PoolAssembly {
                pools,
                clustering: None,
            }
        }
        PoolingStrategy::KMeans(params) => {
            let k = params.cluster_count(shipments.len())?;
            let clusterer = KMeansClusterer::new(params);
            let result = timer_debug!("K-means pooling", clusterer.cluster(shipments, k, rng)?);

            PoolAssembly {
                pools: result.pools,
                clustering: Some(ClusteringReport {
                    requested_clusters: k,
                    iterations: result.iterations,
                    converged: result.converged,
                }),
            }
        }
    };

    debug!(
        strategy = strategy.name(),
        pools = assembly.pools.len(),
        shipments = shipments.len(),
        "Assembled pools"
    );

    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use fxhash::FxHashSet;
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;
    use crate::test_utils;

    fn covered_ids(assembly: &PoolAssembly) -> Vec<String> {
        let mut ids: Vec<String> = assembly
            .pools
            .iter()
            .flat_map(|pool| pool.shipment_ids().map(str::to_owned))
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_both_strategies_cover_every_shipment() {
        let shipments = test_utils::create_two_district_shipments();
        let mut expected: Vec<String> = shipments.iter().map(|s| s.id().to_owned()).collect();
        expected.sort();

        for strategy in [
            PoolingStrategy::Greedy(PairwiseParams::default()),
            PoolingStrategy::KMeans(KMeansParams::default()),
        ] {
            let mut rng = SmallRng::seed_from_u64(7);
            let assembly = assemble_pools(&shipments, &strategy, &[], &mut rng).unwrap();

            assert_eq!(covered_ids(&assembly), expected, "{}", strategy.name());

            let unique: FxHashSet<_> = assembly.pools.iter().map(|pool| pool.id()).collect();
            assert_eq!(unique.len(), assembly.pools.len());
        }
    }

    #[test]
    fn test_kmeans_reports_clustering() {
        let shipments = test_utils::create_two_district_shipments();
        let mut rng = SmallRng::seed_from_u64(3);
        let assembly = assemble_pools(
            &shipments,
            &PoolingStrategy::KMeans(KMeansParams::with_clusters(2)),
            &[],
            &mut rng,
        )
        .unwrap();

        let report = assembly.clustering.unwrap();
        assert_eq!(report.requested_clusters, 2);
        assert!(report.converged);
        assert!(report.iterations >= 1);
    }

    #[test]
    fn test_greedy_has_no_clustering_report() {
        let shipments = test_utils::create_two_district_shipments();
        let mut rng = SmallRng::seed_from_u64(0);
        let assembly = assemble_pools(
            &shipments,
            &PoolingStrategy::Greedy(PairwiseParams::default()),
            &[],
            &mut rng,
        )
        .unwrap();

        assert!(assembly.clustering.is_none());
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let shipments = test_utils::create_two_district_shipments();
        let mut rng = SmallRng::seed_from_u64(0);

        let greedy = PoolingStrategy::Greedy(PairwiseParams {
            max_pool_size: 0,
            ..PairwiseParams::default()
        });
        assert_eq!(
            assemble_pools(&shipments, &greedy, &[], &mut rng),
            Err(PoolingError::InvalidMaxPoolSize(0))
        );

        let kmeans = PoolingStrategy::KMeans(KMeansParams::with_clusters(0));
        assert_eq!(
            assemble_pools(&shipments, &kmeans, &[], &mut rng),
            Err(PoolingError::InvalidClusterCount(0))
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(0);
        let strategy = PoolingStrategy::Greedy(PairwiseParams::default());

        assert_eq!(
            assemble_pools(&[], &strategy, &[], &mut rng),
            Err(PoolingError::NoValidShipments { rejected: 0 })
        );
    }
}
