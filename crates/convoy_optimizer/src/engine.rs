use fxhash::FxHashSet;
use jiff::Zoned;
use rand::Rng;
use tracing::{info, instrument, warn};

use crate::{
    error::{InvalidShipment, PoolingError},
    pooling::pooling_strategy::{ClusteringReport, PoolingStrategy, assemble_pools},
    problem::{
        carrier::Carrier,
        pool::Pool,
        shipment::{Shipment, ShipmentBuilder},
    },
    routing::{optimized_route::OptimizedRoute, route_sequencer::RouteSequencer},
    summary::{OptimizationSummary, summarize},
    traffic::traffic_model::{TimeOfDayTraffic, TrafficModel},
};

/// One pooling run: raw shipments, optional carriers and the strategy.
#[derive(Debug, Clone)]
pub struct OptimizationRequest {
    pub shipments: Vec<ShipmentBuilder>,
    pub carriers: Vec<Carrier>,
    pub strategy: PoolingStrategy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedShipments {
    pub shipments: Vec<Shipment>,
    pub rejected: Vec<InvalidShipment>,
}

/// Pools with their routes and fleet summary.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOptimization {
    pub algorithm_name: &'static str,
    pub pools: Vec<Pool>,
    pub routes: Vec<OptimizedRoute>,
    pub summary: OptimizationSummary,
    pub clustering: Option<ClusteringReport>,
    pub total_shipments: usize,
    pub rejected_shipments: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GreedyPooling {
    pub pools: Vec<Pool>,
    pub rejected_shipments: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationOutcome {
    /// Clustered batch, routed and summarized.
    Batch(BatchOptimization),
    /// Greedy pools only.
    Greedy(GreedyPooling),
}

/// Validates shipments, drops the unusable ones and rejects ids seen
/// earlier in the batch. Fails when nothing usable is left.
pub fn prepare_shipments(
    builders: Vec<ShipmentBuilder>,
) -> Result<PreparedShipments, PoolingError> {
    let mut shipments = Vec::with_capacity(builders.len());
    let mut rejected = Vec::new();
    let mut seen_ids = FxHashSet::default();

    for builder in builders {
        let shipment = builder.build().and_then(|shipment| {
            if seen_ids.insert(shipment.id().to_owned()) {
                Ok(shipment)
            } else {
                Err(InvalidShipment::DuplicateId(shipment.id().to_owned()))
            }
        });

        match shipment {
            Ok(shipment) => shipments.push(shipment),
            Err(reason) => {
                warn!("Skipping shipment: {reason}");
                rejected.push(reason);
            }
        }
    }

    if shipments.is_empty() {
        return Err(PoolingError::NoValidShipments {
            rejected: rejected.len(),
        });
    }

    Ok(PreparedShipments {
        shipments,
        rejected,
    })
}

/// Validation, pooling, routing and summary behind one call.
pub struct PoolingEngine<T = TimeOfDayTraffic>
where
    T: TrafficModel,
{
    traffic: T,
}

impl Default for PoolingEngine<TimeOfDayTraffic> {
    fn default() -> Self {
        PoolingEngine::new(TimeOfDayTraffic::default())
    }
}

impl<T> PoolingEngine<T>
where
    T: TrafficModel,
{
    pub fn new(traffic: T) -> Self {
        PoolingEngine { traffic }
    }

    pub fn traffic(&self) -> &T {
        &self.traffic
    }

    /// Runs `request` with traffic evaluated at `at`. K-means seeds are drawn
    /// from `rng`.
    #[instrument(skip_all, level = "debug", fields(strategy = request.strategy.name()))]
    pub fn optimize<R>(
        &self,
        request: OptimizationRequest,
        at: &Zoned,
        rng: &mut R,
    ) -> Result<OptimizationOutcome, PoolingError>
    where
        R: Rng + ?Sized,
    {
        request.strategy.validate()?;

        let prepared = prepare_shipments(request.shipments)?;
        let rejected_shipments = prepared.rejected.len();

        let assembly = assemble_pools(
            &prepared.shipments,
            &request.strategy,
            &request.carriers,
            rng,
        )?;

        info!(
            shipments = prepared.shipments.len(),
            rejected = rejected_shipments,
            pools = assembly.pools.len(),
            "Pooled shipments with {}",
            request.strategy.algorithm_name()
        );

        match request.strategy {
            PoolingStrategy::Greedy(_) => Ok(OptimizationOutcome::Greedy(GreedyPooling {
                pools: assembly.pools,
                rejected_shipments,
            })),
            PoolingStrategy::KMeans(_) => {
                let routes = self.route_pools(&assembly.pools, at);
                let summary = summarize(&routes);

                Ok(OptimizationOutcome::Batch(BatchOptimization {
                    algorithm_name: request.strategy.algorithm_name(),
                    pools: assembly.pools,
                    routes,
                    summary,
                    clustering: assembly.clustering,
                    total_shipments: prepared.shipments.len(),
                    rejected_shipments,
                }))
            }
        }
    }

    #[instrument(skip_all, level = "debug", fields(pools = pools.len()))]
    pub fn route_pools(&self, pools: &[Pool], at: &Zoned) -> Vec<OptimizedRoute> {
        let sequencer = RouteSequencer::new(&self.traffic);
        pools.iter().map(|pool| sequencer.sequence(pool, at)).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;
    use crate::{
        pooling::pooling_params::{KMeansParams, PairwiseParams},
        problem::point::Point,
        test_utils,
        traffic::traffic_model::FreeFlowTraffic,
    };

    fn builder(id: &str, pickup: (f64, f64), drop: (f64, f64)) -> ShipmentBuilder {
        let mut builder = ShipmentBuilder::default();
        builder
            .set_id(id)
            .set_pickup(Point::new(pickup.0, pickup.1))
            .set_drop(Point::new(drop.0, drop.1));
        builder
    }

    fn two_district_builders() -> Vec<ShipmentBuilder> {
        test_utils::create_two_district_shipments()
            .iter()
            .map(|shipment| {
                let mut builder = ShipmentBuilder::default();
                builder
                    .set_id(shipment.id())
                    .set_pickup(shipment.pickup())
                    .set_drop(shipment.drop());
                builder
            })
            .collect()
    }

    #[test]
    fn test_prepare_filters_invalid_and_duplicates() {
        let mut missing_drop = ShipmentBuilder::default();
        missing_drop.set_id("b").set_pickup(Point::new(1.0, 1.0));

        let builders = vec![
            builder("a", (0.0, 0.0), (0.0, 1.0)),
            missing_drop,
            builder("c", (f64::NAN, 0.0), (0.0, 1.0)),
            builder("a", (2.0, 2.0), (2.0, 3.0)),
            builder("d", (3.0, 3.0), (3.0, 4.0)),
        ];

        let prepared = prepare_shipments(builders).unwrap();

        let ids: Vec<_> = prepared.shipments.iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(
            prepared.rejected,
            vec![
                InvalidShipment::MissingDrop("b".to_owned()),
                InvalidShipment::NonFiniteCoordinates("c".to_owned()),
                InvalidShipment::DuplicateId("a".to_owned()),
            ]
        );
    }

    #[test]
    fn test_no_valid_shipments() {
        let builders = vec![
            builder("x", (f64::INFINITY, 0.0), (0.0, 0.0)),
            ShipmentBuilder::default(),
        ];

        assert_eq!(
            prepare_shipments(builders),
            Err(PoolingError::NoValidShipments { rejected: 2 })
        );
        assert_eq!(
            prepare_shipments(vec![]),
            Err(PoolingError::NoValidShipments { rejected: 0 })
        );
    }

    #[test]
    fn test_kmeans_batch_is_routed_and_summarized() {
        let engine = PoolingEngine::new(TimeOfDayTraffic::default());
        let at = test_utils::local_time("2024-01-03T13:00");
        let mut rng = SmallRng::seed_from_u64(42);

        let mut builders = two_district_builders();
        builders.push(builder("broken", (f64::NAN, 0.0), (0.0, 0.0)));

        let outcome = engine
            .optimize(
                OptimizationRequest {
                    shipments: builders,
                    carriers: vec![],
                    strategy: PoolingStrategy::KMeans(KMeansParams::with_clusters(2)),
                },
                &at,
                &mut rng,
            )
            .unwrap();

        let OptimizationOutcome::Batch(batch) = outcome else {
            panic!("expected a batch outcome");
        };

        assert_eq!(batch.algorithm_name, "K-Means Clustering");
        assert_eq!(batch.pools.len(), 2);
        assert_eq!(batch.routes.len(), 2);
        assert_eq!(batch.total_shipments, 6);
        assert_eq!(batch.rejected_shipments, 1);
        assert_eq!(batch.summary.total_shipments, 6);
        assert_eq!(batch.summary.total_pools, 2);
        assert_eq!(batch.summary.estimated_savings, 67);

        for (pool, route) in batch.pools.iter().zip(&batch.routes) {
            assert_eq!(pool.id(), route.pool_id());
            assert_eq!(route.segments().len(), 2 * pool.len() - 1);
        }
    }

    #[test]
    fn test_greedy_returns_pools_only() {
        let engine = PoolingEngine::new(FreeFlowTraffic);
        let at = test_utils::local_time("2024-01-06T09:00");
        let mut rng = SmallRng::seed_from_u64(0);

        let outcome = engine
            .optimize(
                OptimizationRequest {
                    shipments: two_district_builders(),
                    carriers: vec![],
                    strategy: PoolingStrategy::Greedy(PairwiseParams::default()),
                },
                &at,
                &mut rng,
            )
            .unwrap();

        let OptimizationOutcome::Greedy(greedy) = outcome else {
            panic!("expected a greedy outcome");
        };

        let pooled: usize = greedy.pools.iter().map(Pool::len).sum();
        assert_eq!(pooled, 6);
        assert_eq!(greedy.rejected_shipments, 0);
        assert!(greedy.pools.iter().all(|pool| pool.len() <= 5));
    }

    #[test]
    fn test_configuration_checked_before_shipments() {
        let engine = PoolingEngine::new(TimeOfDayTraffic::default());
        let at = test_utils::local_time("2024-01-03T13:00");
        let mut rng = SmallRng::seed_from_u64(0);

        let result = engine.optimize(
            OptimizationRequest {
                shipments: vec![],
                carriers: vec![],
                strategy: PoolingStrategy::Greedy(PairwiseParams {
                    max_pool_size: 0,
                    ..PairwiseParams::default()
                }),
            },
            &at,
            &mut rng,
        );

        assert_eq!(result, Err(PoolingError::InvalidMaxPoolSize(0)));
    }
}
