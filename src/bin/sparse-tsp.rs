use sparse_tsp::metrics::{self, TraceRecord};
use sparse_tsp::problem::Graph;
use sparse_tsp::search::SolveOutcome;
use sparse_tsp::utils::{Args, Parser};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::error::Error;
use std::fs;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();
    let args = Args::parse();

    let setup_time = Instant::now();
    let graph = Graph::load(&args.file)?;

    println!(
        "\nSolving TSP with {} cities starting at {}",
        graph.n_cities(),
        graph.city_name(graph.start()).unwrap_or_default()
    );
    println!("Cities: {}", graph.cities().join(", "));
    if args.show_graph {
        println!("\n{}", graph.describe());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, setup = ?setup_time.elapsed(), "graph ready");

    // Every solver run draws from its own jump-separated stream.
    let mut stream = Xoshiro256PlusPlus::seed_from_u64(seed);

    if let Some(dir) = &args.trace_dir {
        fs::create_dir_all(dir)?;
    }

    let mut summary: Vec<(&'static str, SolveOutcome)> = Vec::new();

    for config in args.configs() {
        let name = config.name();
        println!("\nRunning {}...", name);

        let mut best: Option<SolveOutcome> = None;
        let mut records = Vec::new();

        for run in 0..args.runs as usize {
            let rng = stream.clone();
            stream.jump();

            let outcome = match config.run(&graph, rng) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(solver = name, run, "{}", e);
                    println!("Error running {}: {}", name, e);
                    continue;
                }
            };

            println!("Solution: {}", outcome.route.display(&graph));
            println!("Distance: {:.2}", outcome.distance);
            println!("Time: {:.2}s", outcome.elapsed.as_secs_f64());

            records.extend(TraceRecord::from_outcome(name, run, &outcome));

            if best.as_ref().is_none_or(|b| outcome.distance < b.distance) {
                best = Some(outcome);
            }
        }

        if let (Some(dir), false) = (&args.trace_dir, records.is_empty()) {
            let file = dir.join(format!("{}.parquet", name.to_lowercase().replace(' ', "_")));
            metrics::serialize_to_parquet(&records, &file)?;
            info!(path = %file.display(), "convergence trace written");
        }

        if let Some(best) = best {
            summary.push((name, best));
        }
    }

    println!("\nAlgorithm Comparison:");
    println!("{:<20} {:<15} {:<15}", "Algorithm", "Distance", "Time (s)");
    for (name, outcome) in &summary {
        println!(
            "{:<20} {:<15.2} {:<15.2}",
            name,
            outcome.distance,
            outcome.elapsed.as_secs_f64()
        );
    }

    Ok(())
}
