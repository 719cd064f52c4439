use comfy_table::Table;
use convoy_optimizer::{engine::BatchOptimization, problem::pool::Pool};

pub fn print_batch(batch: &BatchOptimization) {
    let mut table = Table::new();
    table.set_header(vec!["Pool", "Shipments", "Distance (km)", "Time (min)", "Efficiency"]);

    for route in &batch.routes {
        table.add_row(vec![
            route.pool_id().to_owned(),
            route.shipments().len().to_string(),
            format!("{:.2}", route.total_distance_km()),
            format!("{:.1}", route.total_time_min()),
            format!("{:.2}", route.efficiency()),
        ]);
    }

    let summary = &batch.summary;
    eprintln!("{table}");
    eprintln!(
        "{} shipments in {} pools, {:.2} km, {:.1} min, savings {}%",
        summary.total_shipments,
        summary.total_pools,
        summary.total_distance_km,
        summary.total_time_min,
        summary.estimated_savings
    );
}

pub fn print_pools(pools: &[Pool]) {
    let mut table = Table::new();
    table.set_header(vec!["Pool", "Shipments", "Weight (kg)", "Bearing"]);

    for pool in pools {
        table.add_row(vec![
            pool.id().to_owned(),
            pool.shipment_ids().collect::<Vec<_>>().join(", "),
            format!("{:.1}", pool.total_weight()),
            pool.bearing_deg()
                .map(|bearing| format!("{bearing:.0}°"))
                .unwrap_or_else(|| String::from("-")),
        ]);
    }

    eprintln!("{table}");
}
