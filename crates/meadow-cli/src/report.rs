use std::path::Path;

use meadow_core::ChunkCoord;
use meadow_world::{Chunk, ChunkStats, StreamMode, World, WorldObject};
use serde::Serialize;

use crate::runner::RunResult;

/// JSON run report written by `--output`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub initial_seed: u32,
    pub stream_mode: StreamMode,
    pub render_distance: u32,
    pub small_grass: bool,
    pub result: RunResult,
}

impl RunReport {
    pub fn new(world: &World, initial_seed: u32, result: RunResult) -> Self {
        let config = world.config();
        Self {
            initial_seed,
            stream_mode: config.stream_mode,
            render_distance: config.render_distance,
            small_grass: config.features.small_grass,
            result,
        }
    }
}

/// One chunk's contents, for `--dump-chunk`.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkDump<'a> {
    pub coord: [i32; 2],
    pub stats: ChunkStats,
    pub objects: &'a [WorldObject],
}

impl<'a> ChunkDump<'a> {
    pub fn new(chunk: &'a Chunk) -> Self {
        let coord: ChunkCoord = chunk.coord();
        Self {
            coord: [coord.x, coord.y],
            stats: chunk.stats(),
            objects: chunk.objects(),
        }
    }
}

/// Save a report to a JSON file, creating parent directories.
pub fn save_report(path: &Path, report: &RunReport) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

pub fn dump_chunk_json(chunk: &Chunk) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ChunkDump::new(chunk))
}

/// Format a run as a markdown summary.
pub fn format_markdown(report: &RunReport) -> String {
    let r = &report.result;
    let last = &r.final_sample;
    let mut out = String::new();

    out.push_str(concat!(
        "| Seed | Mode | Ticks | Final chunk | Position ",
        "| On water | Loaded | Generated | Evicted |\n",
        "|------|------|-------|-------------|----------",
        "|----------|--------|-----------|---------|\n",
    ));
    out.push_str(&format!(
        "| {} | {:?} | {} | ({}, {}) | ({:.0}, {:.0}) | {} | {} | {} | {} |\n",
        last.seed,
        report.stream_mode,
        r.ticks,
        last.chunk[0],
        last.chunk[1],
        last.x,
        last.y,
        if last.on_water { "yes" } else { "no" },
        last.loaded_chunks,
        r.chunks_generated,
        r.chunks_evicted,
    ));

    let s = &r.resident_stats;
    out.push_str("\n| Grass | Water | Trees | Small grass | Rocks | Buildings |\n");
    out.push_str("|-------|-------|-------|-------------|-------|-----------|\n");
    out.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} |\n",
        s.grass, s.water, s.trees, s.small_grass, s.rocks, s.buildings
    ));

    out.push_str(&format!(
        "\nClock: {:?}, {:.1}h, daylight {:.2}. ",
        last.phase, last.hour, last.daylight
    ));
    out.push_str(&format!(
        "Peak resident chunks: {}. Ticks on water: {}.\n",
        r.peak_loaded, r.water_ticks
    ));

    if !r.regenerations.is_empty() {
        out.push_str("\nRegenerations:\n");
        for regen in &r.regenerations {
            out.push_str(&format!(
                "  - tick {}: seed {} -> {}\n",
                regen.tick, regen.old_seed, regen.new_seed
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::MovePlan;
    use crate::runner::PlanRunner;
    use meadow_world::WorldConfig;

    fn run(seed: u32, regenerate_at: Vec<u32>) -> RunReport {
        let mut world = World::with_seed(WorldConfig::default(), seed).unwrap();
        let result = PlanRunner::new(30)
            .with_regenerations(regenerate_at)
            .run(&mut world, &MovePlan::idle());
        RunReport::new(&world, seed, result)
    }

    #[test]
    fn test_markdown_summary() {
        let md = format_markdown(&run(12345, Vec::new()));
        assert!(md.contains("| 12345 | Shared | 30 | (0, 0) | (0, 0) |"));
        assert!(md.contains("| Grass | Water |"));
        assert!(!md.contains("Regenerations"));

        let md = format_markdown(&run(12345, vec![10]));
        assert!(md.contains("Regenerations:"));
        assert!(md.contains("tick 10: seed 12345 ->"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = run(8, Vec::new());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["initial_seed"], 8);
        assert_eq!(value["stream_mode"], "Shared");
        assert_eq!(value["result"]["final_sample"]["loaded_chunks"], 25);
        assert_eq!(value["result"]["resident_stats"]["grass"], 25 * 1024);
        let resident = value["result"]["resident_chunks"].as_array().unwrap();
        assert_eq!(resident.len(), 25);
        assert_eq!(resident[0], serde_json::json!([-2, -2]));
        assert_eq!(resident[24], serde_json::json!([2, 2]));
    }

    #[test]
    fn test_chunk_dump() {
        let world = World::with_seed(WorldConfig::default(), 12345).unwrap();
        let chunk = world.chunk(ChunkCoord::ZERO).unwrap();
        let json = dump_chunk_json(chunk).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["coord"], serde_json::json!([0, 0]));
        assert_eq!(value["stats"]["grass"], 1024);
        let objects = value["objects"].as_array().unwrap();
        assert_eq!(objects.len() as u32, chunk.stats().total());
        assert_eq!(objects[0]["type"], "grass");
    }

    #[test]
    fn test_save_report_creates_dirs() {
        let dir = std::env::temp_dir().join(format!("meadow-report-{}", std::process::id()));
        let path = dir.join("nested").join("run.json");
        save_report(&path, &run(1, Vec::new())).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"initial_seed\": 1"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
