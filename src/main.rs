//! Snake Evo CLI - evolve snake brains headlessly.

use std::error::Error;

use log::{info, warn};

use snake_evo::simulation::params::Params;
use snake_evo::simulation::population::Population;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let parallel = match args.iter().position(|a| a == "--parallel") {
        Some(idx) => {
            args.remove(idx);
            true
        }
        None => false,
    };

    if args.first().is_some_and(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: snake-evo [params.json] [generations] [--parallel]");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  params.json  Simulation parameters (defaults when omitted)");
        eprintln!("  generations  Number of generations to run (default: 10)");
        eprintln!("  --parallel   Play each generation's lives on all cores");
        return Ok(());
    }

    let mut params = match args.first() {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };
    let generations: u32 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);

    if params.starvation_limit.is_none() {
        // A looping brain never dies on its own; without a cap the run could hang.
        let limit = params.cell_count() as u32 * 2;
        warn!("no starvation limit configured, using {} ticks", limit);
        params.starvation_limit = Some(limit);
    }

    let mut population = Population::new(params)?;

    for _ in 0..generations {
        let summary = if parallel {
            population.evaluate_generation_parallel()?
        } else {
            population.run_generation()?
        };
        info!(
            "gen {:>4} | best food {:>3} | mean food {:>6.2} | max fitness {:>9.0}{}",
            summary.generation,
            summary.best_food,
            summary.mean_food,
            summary.max_raw_fitness,
            if summary.degenerate { " | degenerate" } else { "" }
        );
    }

    let history = population.history();
    info!(
        "average best food over the last {} generations: {:.2}",
        history.len(),
        history.avg_best_food()
    );

    let best = population.best_ever();
    println!(
        "best score {} in generation {} after {} generations",
        best.score,
        best.generation,
        population.generation() - 1
    );
    println!("{}", serde_json::to_string_pretty(&population.snapshot())?);

    Ok(())
}
