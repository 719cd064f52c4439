use serde::Serialize;

use crate::routing::optimized_route::OptimizedRoute;

/// Fleet-level statistics over the routes of one run.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationSummary {
    pub total_shipments: usize,
    pub total_pools: usize,
    pub total_distance_km: f64,
    pub total_time_min: f64,
    pub average_efficiency: f64,
    pub average_shipments_per_pool: f64,
    /// Percentage of trips saved compared to one vehicle per shipment.
    pub estimated_savings: i64,
}

pub fn summarize(routes: &[OptimizedRoute]) -> OptimizationSummary {
    let total_pools = routes.len();
    let total_shipments: usize = routes.iter().map(|route| route.shipments().len()).sum();

    if total_pools == 0 || total_shipments == 0 {
        return OptimizationSummary::default();
    }

    let total_distance_km = routes.iter().map(OptimizedRoute::total_distance_km).sum();
    let total_time_min = routes.iter().map(OptimizedRoute::total_time_min).sum();
    let efficiency_sum: f64 = routes.iter().map(OptimizedRoute::efficiency).sum();

    OptimizationSummary {
        total_shipments,
        total_pools,
        total_distance_km,
        total_time_min,
        average_efficiency: efficiency_sum / total_pools as f64,
        average_shipments_per_pool: total_shipments as f64 / total_pools as f64,
        estimated_savings: estimated_savings(total_pools, total_shipments),
    }
}

/// `round((1 - pools / shipments) * 100)`, zero without shipments.
pub fn estimated_savings(total_pools: usize, total_shipments: usize) -> i64 {
    if total_shipments == 0 {
        return 0;
    }

    ((1.0 - total_pools as f64 / total_shipments as f64) * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::pool::{Pool, pool_id},
        routing::route_sequencer::RouteSequencer,
        test_utils,
        traffic::traffic_model::FreeFlowTraffic,
    };

    fn routes_for(sizes: &[usize]) -> Vec<OptimizedRoute> {
        let at = test_utils::local_time("2024-01-03T13:00");
        let sequencer = RouteSequencer::new(&FreeFlowTraffic);
        let mut next = 0;

        sizes
            .iter()
            .enumerate()
            .map(|(index, &size)| {
                let shipments = (0..size)
                    .map(|_| {
                        next += 1;
                        let offset = next as f64 * 0.001;
                        test_utils::create_shipment(
                            &format!("s{next}"),
                            (28.60 + offset, 77.20),
                            (28.62 + offset, 77.22),
                        )
                    })
                    .collect();
                let pool = Pool::from_shipments(pool_id(index), shipments).unwrap();
                sequencer.sequence(&pool, &at)
            })
            .collect()
    }

    #[test]
    fn test_empty_summary_is_zeroed() {
        let summary = summarize(&[]);

        assert_eq!(summary, OptimizationSummary::default());
        assert_eq!(summary.estimated_savings, 0);
        assert!(!summary.average_efficiency.is_nan());
    }

    #[test]
    fn test_ten_shipments_in_four_pools() {
        let routes = routes_for(&[3, 3, 2, 2]);
        let summary = summarize(&routes);

        assert_eq!(summary.total_shipments, 10);
        assert_eq!(summary.total_pools, 4);
        assert_eq!(summary.estimated_savings, 60);
        assert_eq!(summary.average_shipments_per_pool, 2.5);
    }

    #[test]
    fn test_totals_and_mean_efficiency() {
        let routes = routes_for(&[2, 1]);
        let summary = summarize(&routes);

        let distance: f64 = routes.iter().map(|r| r.total_distance_km()).sum();
        let time: f64 = routes.iter().map(|r| r.total_time_min()).sum();
        let efficiency = (routes[0].efficiency() + routes[1].efficiency()) / 2.0;

        assert_eq!(summary.total_distance_km, distance);
        assert_eq!(summary.total_time_min, time);
        assert!((summary.average_efficiency - efficiency).abs() < 1e-12);
        assert_eq!(summary.estimated_savings, 33);
    }

    #[test]
    fn test_estimated_savings_rounding() {
        assert_eq!(estimated_savings(0, 0), 0);
        assert_eq!(estimated_savings(5, 5), 0);
        assert_eq!(estimated_savings(1, 8), 88);
        assert_eq!(estimated_savings(2, 3), 33);
    }
}
