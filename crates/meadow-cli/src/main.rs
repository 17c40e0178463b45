use std::fmt::Display;
use std::path::PathBuf;
use std::process;

use meadow_cli::plan::MovePlan;
use meadow_cli::report::{self, RunReport};
use meadow_cli::runner::PlanRunner;
use meadow_core::math::parse_chunk_coord;
use meadow_core::rng::parse_seed;
use meadow_core::ChunkCoord;
use meadow_world::config::load_config_file;
use meadow_world::{World, WorldConfig};

const DEFAULT_TICKS: u32 = 120;

fn fail(message: impl Display) -> ! {
    log::error!("{}", message);
    process::exit(1);
}

fn value_for<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => fail(format!("{} requires a value", flag)),
    }
}

fn print_usage() {
    eprintln!("Usage: meadow [OPTIONS]");
    eprintln!("  --seed <n>              World seed (default: config seed or random)");
    eprintln!(
        "  --ticks <n>             Ticks to run (default: plan length, or {})",
        DEFAULT_TICKS
    );
    eprintln!("  --config <path>         World config (RON)");
    eprintln!("  --path <plan>           Movement plan, e.g. R120,D60,UL30");
    eprintln!("  --sample-every <n>      Log a readout every n ticks (default: 60, 0 = off)");
    eprintln!("  --regenerate-at <tick>  Regenerate with a fresh seed before this tick");
    eprintln!("                          (repeatable)");
    eprintln!("  --dump-chunk <cx,cy>    Print a resident chunk as JSON after the run");
    eprintln!("  --output <path>         Save the run report as JSON");
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut seed: Option<u32> = None;
    let mut tick_count: Option<u32> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut plan = MovePlan::idle();
    let mut sample_every = 60u32;
    let mut regenerate_at: Vec<u32> = Vec::new();
    let mut dump_chunk: Option<ChunkCoord> = None;
    let mut output_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--seed" => {
                i += 1;
                seed = Some(parse_seed(value_for(&args, i, flag)).unwrap_or_else(|e| fail(e)));
            }
            "--ticks" => {
                i += 1;
                let value = value_for(&args, i, flag);
                tick_count = Some(
                    value
                        .parse()
                        .unwrap_or_else(|_| fail(format!("invalid --ticks value '{}'", value))),
                );
            }
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(value_for(&args, i, flag)));
            }
            "--path" => {
                i += 1;
                plan = value_for(&args, i, flag)
                    .parse()
                    .unwrap_or_else(|e| fail(e));
            }
            "--sample-every" => {
                i += 1;
                let value = value_for(&args, i, flag);
                sample_every = value
                    .parse()
                    .unwrap_or_else(|_| fail(format!("invalid --sample-every value '{}'", value)));
            }
            "--regenerate-at" => {
                i += 1;
                let value = value_for(&args, i, flag);
                let tick = value
                    .parse()
                    .unwrap_or_else(|_| fail(format!("invalid --regenerate-at value '{}'", value)));
                regenerate_at.push(tick);
            }
            "--dump-chunk" => {
                i += 1;
                let value = value_for(&args, i, flag);
                dump_chunk = Some(parse_chunk_coord(value).unwrap_or_else(|e| fail(e)));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(value_for(&args, i, flag)));
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match &config_path {
        Some(path) => load_config_file(path).unwrap_or_else(|e| fail(e)),
        None => WorldConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }

    let mut world = World::new(config).unwrap_or_else(|e| fail(e));
    let initial_seed = world.seed();

    let ticks = tick_count.unwrap_or(match plan.total_ticks() {
        0 => DEFAULT_TICKS,
        n => n,
    });
    let result = PlanRunner::new(ticks)
        .with_sample_every(sample_every)
        .with_regenerations(regenerate_at)
        .run(&mut world, &plan);
    let run_report = RunReport::new(&world, initial_seed, result);

    println!("\n## Meadow Run\n");
    println!("{}", report::format_markdown(&run_report));

    if let Some(ref path) = output_path {
        if let Err(e) = report::save_report(path, &run_report) {
            fail(format!("failed to save report to {}: {}", path.display(), e));
        }
        log::info!("Saved report to {}", path.display());
    }

    if let Some(coord) = dump_chunk {
        let Some(chunk) = world.chunk(coord) else {
            fail(format!(
                "chunk ({}, {}) is not resident at the end of the run",
                coord.x, coord.y
            ));
        };
        match report::dump_chunk_json(chunk) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(format!("failed to serialize chunk: {}", e)),
        }
    }

    log::info!("Run complete.");
}
