use tracing::{debug, instrument};

use crate::{
    define_index_newtype,
    error::PoolingError,
    pooling::{compatibility::CompatibilityScorer, pooling_params::PairwiseParams},
    problem::{
        carrier::{Carrier, max_available_capacity},
        pool::{Pool, pool_id},
        shipment::Shipment,
    },
};

define_index_newtype!(ShipmentIdx, Shipment);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Join {
    Pair(ShipmentIdx, ShipmentIdx),
    Admit { pool: usize, shipment: ShipmentIdx },
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    join: Join,
}

/// Greedy pool assembly driven by pairwise compatibility scores.
///
/// Every step performs the single best eligible join: either two unassigned
/// shipments open a new pool, or an unassigned shipment is admitted into an
/// existing pool that still has room. Ties go to the earliest candidate in
/// input order, pairs before admissions, so the output only depends on the
/// input order. Whatever cannot be joined ends up in a singleton pool.
pub struct PairwiseMatcher {
    params: PairwiseParams,
    scorer: CompatibilityScorer,
}

impl PairwiseMatcher {
    pub fn new(params: PairwiseParams) -> Result<Self, PoolingError> {
        params.validate()?;

        Ok(PairwiseMatcher {
            scorer: CompatibilityScorer::new(&params),
            params,
        })
    }

    pub fn params(&self) -> &PairwiseParams {
        &self.params
    }

    /// Pools every shipment exactly once. When an available carrier declares a
    /// capacity, the largest one caps the weight of joined pools.
    #[instrument(skip_all, level = "debug")]
    pub fn match_pools(&self, shipments: &[Shipment], carriers: &[Carrier]) -> Vec<Pool> {
        let weight_cap = max_available_capacity(carriers);
        let mut assigned = vec![false; shipments.len()];
        let mut pools: Vec<Pool> = Vec::new();

        let pairs = self.ranked_pairs(shipments, weight_cap);
        let mut pair_cursor = 0;
        let mut joins = 0;

        loop {
            while pair_cursor < pairs.len() {
                let Candidate { join, .. } = pairs[pair_cursor];
                match join {
                    Join::Pair(a, b) if !assigned[a.get()] && !assigned[b.get()] => break,
                    _ => pair_cursor += 1,
                }
            }

            let best_pair = pairs.get(pair_cursor).copied();
            let best_admission = self.best_admission(&pools, shipments, &assigned, weight_cap);

            let best = match (best_pair, best_admission) {
                (Some(pair), Some(admission)) if admission.score > pair.score => admission,
                (Some(pair), _) => pair,
                (None, Some(admission)) => admission,
                (None, None) => break,
            };

            match best.join {
                Join::Pair(a, b) => {
                    assigned[a.get()] = true;
                    assigned[b.get()] = true;

                    let mut pool = Pool::new(pool_id(pools.len()), shipments[a].clone());
                    pool.push(shipments[b].clone());
                    pools.push(pool);
                }
                Join::Admit { pool, shipment } => {
                    assigned[shipment.get()] = true;
                    pools[pool].push(shipments[shipment].clone());
                }
            }

            joins += 1;
        }

        let pooled = pools.len();
        for (index, shipment) in shipments.iter().enumerate() {
            if !assigned[index] {
                pools.push(Pool::new(pool_id(pools.len()), shipment.clone()));
            }
        }

        debug!(
            joins,
            pooled,
            singletons = pools.len() - pooled,
            "pairwise matching finished"
        );

        pools
    }

    /// Eligible pairs, best score first; equal scores keep input order.
    fn ranked_pairs(&self, shipments: &[Shipment], weight_cap: Option<f64>) -> Vec<Candidate> {
        if self.params.max_pool_size < 2 {
            return Vec::new();
        }

        let mut pairs = Vec::new();
        for (i, a) in shipments.iter().enumerate() {
            for (j, b) in shipments.iter().enumerate().skip(i + 1) {
                if !fits(a.weight_or_zero() + b.weight_or_zero(), weight_cap) {
                    continue;
                }

                if let Some(score) = self.scorer.pair_score(a, b) {
                    pairs.push(Candidate {
                        score,
                        join: Join::Pair(ShipmentIdx::new(i), ShipmentIdx::new(j)),
                    });
                }
            }
        }

        pairs.sort_by(|a, b| b.score.total_cmp(&a.score));
        pairs
    }

    fn best_admission(
        &self,
        pools: &[Pool],
        shipments: &[Shipment],
        assigned: &[bool],
        weight_cap: Option<f64>,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (pool_index, pool) in pools.iter().enumerate() {
            if pool.len() >= self.params.max_pool_size {
                continue;
            }

            for (index, shipment) in shipments.iter().enumerate() {
                if assigned[index] || !fits(pool.total_weight() + shipment.weight_or_zero(), weight_cap)
                {
                    continue;
                }

                let Some(score) = self.scorer.admission_score(pool, shipment) else {
                    continue;
                };

                if best.is_none_or(|current| score > current.score) {
                    best = Some(Candidate {
                        score,
                        join: Join::Admit {
                            pool: pool_index,
                            shipment: ShipmentIdx::new(index),
                        },
                    });
                }
            }
        }

        best
    }
}

fn fits(weight: f64, cap: Option<f64>) -> bool {
    cap.is_none_or(|cap| weight <= cap)
}
