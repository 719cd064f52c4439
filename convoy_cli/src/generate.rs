use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use clap::{Subcommand, ValueEnum};
use convoy_optimizer::generator::{GeneratorParams, ShipmentGenerator};
use rand::{SeedableRng, rngs::SmallRng};
use serde_json::json;
use tracing::info;

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    Greedy,
    Kmeans,
}

impl StrategyArg {
    fn as_str(&self) -> &'static str {
        match self {
            StrategyArg::Greedy => "greedy",
            StrategyArg::Kmeans => "kmeans",
        }
    }
}

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// JSON schema of the optimization request
    JsonSchema {
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    /// JSON schema of the traffic parameters file
    TrafficSchema {
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    /// A request file with random shipments
    Shipments {
        #[arg(long, short = 'n', default_value_t = 20)]
        count: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long, value_enum, default_value_t = StrategyArg::Kmeans)]
        strategy: StrategyArg,

        /// Area and weight range as JSON (default: Delhi, 10 to 500 kg)
        #[arg(long)]
        params: Option<PathBuf>,

        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out } => {
            let schema = convoy_optimizer::json::schema::generate_json_schema()?;
            write(&out, schema)?;
        }
        GenerateSubcommands::TrafficSchema { out } => {
            let schema = convoy_optimizer::json::schema::generate_traffic_params_schema()?;
            write(&out, schema)?;
        }
        GenerateSubcommands::Shipments {
            count,
            seed,
            strategy,
            params,
            out,
        } => {
            let params: GeneratorParams = match params {
                Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
                None => GeneratorParams::default(),
            };

            let mut rng = SmallRng::seed_from_u64(seed);
            let shipments = ShipmentGenerator::new(&params).generate(count, &mut rng);

            let generated = shipments.len();
            let request = json!({
                "strategy": strategy.as_str(),
                "shipments": shipments,
                "seed": seed,
            });

            write(&out, serde_json::to_string_pretty(&request)?)?;
            info!("Wrote {generated} shipments to {out:?}");
        }
    }

    Ok(())
}

fn write(out: &Path, content: String) -> Result<(), std::io::Error> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(out, content)
}
