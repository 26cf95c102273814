use std::error::Error;

use bacteria::simulation::ecosystem::Ecosystem;
use bacteria::simulation::params::Params;
use bacteria::simulation::rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 10_000;
const REPORT_INTERVAL: u64 = 500;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // usage: bacteria [PARAMS_JSON] [TICKS]
    let mut args = std::env::args().skip(1);
    let params = match args.next() {
        Some(path) => Params::from_json_file(&path)?,
        None => Params::default(),
    };
    let ticks = match args.next() {
        Some(ticks) => ticks.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };

    let mut rng = rng::rng_from_seed(params.seed);
    let mut ecosystem = Ecosystem::new(&params, &mut rng)?;

    info!(
        bacteria = params.n_bacteria,
        food = params.n_food,
        ticks,
        "starting bacteria simulation"
    );

    while ecosystem.tick < ticks {
        ecosystem.step(&params, &mut rng)?;

        if ecosystem.tick % REPORT_INTERVAL == 0 || ecosystem.is_extinct() {
            let stats = ecosystem.stats();
            info!(
                tick = stats.tick,
                population = stats.population,
                food = stats.food,
                min_generation = stats.min_generation,
                max_generation = stats.max_generation,
                mean_energy = stats.mean_energy,
                "population report"
            );
        }

        if ecosystem.is_extinct() {
            info!(tick = ecosystem.tick, "population extinct");
            break;
        }
    }

    Ok(())
}
