use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use convoy_optimizer::{
    engine::{OptimizationOutcome, PoolingEngine},
    json::{
        request::{JsonOptimizationRequest, build_request},
        response::build_response,
    },
    traffic::{traffic_model::TimeOfDayTraffic, traffic_params::TrafficParams},
};
use jiff::Timestamp;
use rand::{SeedableRng, rngs::SmallRng};
use tracing::{error, info};

use crate::{
    parsers::{self, EvaluationTime},
    report,
};

#[derive(Args)]
pub struct OptimizeArgs {
    /// The request file to optimize
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Where to write the JSON result (default: stdout)
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Traffic parameters as JSON
    #[arg(long)]
    params: Option<PathBuf>,

    /// Time at which traffic is evaluated (e.g. "2024-01-03T09:00")
    #[arg(long, value_parser = parsers::parse_evaluation_time)]
    at: Option<EvaluationTime>,

    /// IANA time zone of the evaluation time
    #[arg(long, env = "CONVOY_TZ")]
    tz: Option<String>,

    /// Seed for K-means centroid sampling, overrides the request seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print a table of the routes
    #[arg(long)]
    report: bool,
}

pub fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    info!("Optimizing {:?}", args.input);

    let f = File::open(&args.input)?;
    let request: JsonOptimizationRequest = serde_json::from_reader(BufReader::new(f))?;

    let traffic_params = match &args.params {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => TrafficParams::default(),
    };

    let at = parsers::resolve_evaluation_time(args.at, args.tz.as_deref())?;
    info!("Evaluating traffic at {at}");

    let mut rng = match args.seed.or(request.seed) {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let engine = PoolingEngine::new(TimeOfDayTraffic::new(traffic_params));
    let result = build_request(request).and_then(|request| engine.optimize(request, &at, &mut rng));

    if args.report {
        match &result {
            Ok(OptimizationOutcome::Batch(batch)) => report::print_batch(batch),
            Ok(OptimizationOutcome::Greedy(greedy)) => report::print_pools(&greedy.pools),
            Err(_) => {}
        }
    }

    let failure = result.as_ref().err().cloned();
    let response = build_response(result, Timestamp::now());
    let body = serde_json::to_string_pretty(&response)?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, body)?;
        }
        None => println!("{body}"),
    }

    if let Some(failure) = failure {
        error!("Optimization failed: {failure}");
        return Err(failure.into());
    }

    Ok(())
}
