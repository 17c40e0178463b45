use meadow_world::{ChunkStats, DayPhase, World};
use serde::Serialize;

use crate::plan::MovePlan;

/// A readout of the world at one tick, as the on-screen overlay would show it.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub tick: u64,
    pub seed: u32,
    pub x: f64,
    pub y: f64,
    pub chunk: [i32; 2],
    pub on_water: bool,
    pub loaded_chunks: u32,
    pub hour: f32,
    pub phase: DayPhase,
    pub daylight: f32,
}

impl Sample {
    pub fn capture(world: &World) -> Self {
        let viewer = world.viewer();
        let chunk = world.current_chunk();
        let clock = world.clock();
        Self {
            tick: world.tick_count(),
            seed: world.seed(),
            x: viewer.pos.x,
            y: viewer.pos.y,
            chunk: [chunk.x, chunk.y],
            on_water: viewer.on_water,
            loaded_chunks: world.loaded_chunk_count(),
            hour: clock.hour(),
            phase: clock.phase(),
            daylight: clock.daylight(),
        }
    }
}

/// A regeneration requested during the run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Regeneration {
    pub tick: u64,
    pub old_seed: u32,
    pub new_seed: u32,
}

/// Everything collected while driving a world through a plan.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub ticks: u32,
    pub chunks_generated: u32,
    pub chunks_evicted: u32,
    pub peak_loaded: u32,
    pub water_ticks: u32,
    pub regenerations: Vec<Regeneration>,
    pub samples: Vec<Sample>,
    pub final_sample: Sample,
    pub resident_stats: ChunkStats,
    /// Chunks resident at the end of the run, row-major.
    pub resident_chunks: Vec<[i32; 2]>,
}

/// Drives a [`World`] through a [`MovePlan`] without a display.
pub struct PlanRunner {
    ticks: u32,
    sample_every: u32,
    regenerate_at: Vec<u32>,
}

impl PlanRunner {
    pub fn new(ticks: u32) -> Self {
        Self {
            ticks,
            sample_every: 60,
            regenerate_at: Vec::new(),
        }
    }

    /// Record a sample every `n` ticks. Zero disables periodic samples.
    pub fn with_sample_every(mut self, n: u32) -> Self {
        self.sample_every = n;
        self
    }

    /// Regenerate the world (fresh entropy seed) before these ticks run.
    pub fn with_regenerations(mut self, mut ticks: Vec<u32>) -> Self {
        ticks.sort_unstable();
        ticks.dedup();
        self.regenerate_at = ticks;
        self
    }

    pub fn run(&self, world: &mut World, plan: &MovePlan) -> RunResult {
        log::info!(
            "Running {} ticks ({} scripted) from seed {}",
            self.ticks,
            plan.total_ticks(),
            world.seed()
        );

        let mut chunks_generated = world.loaded_chunk_count();
        let mut chunks_evicted = 0;
        let mut peak_loaded = world.loaded_chunk_count();
        let mut water_ticks = 0;
        let mut regenerations = Vec::new();
        let mut samples = vec![Sample::capture(world)];

        for tick in 0..self.ticks {
            if self.regenerate_at.binary_search(&tick).is_ok() {
                let old_seed = world.seed();
                let new_seed = world.regenerate();
                chunks_generated += world.loaded_chunk_count();
                regenerations.push(Regeneration {
                    tick: world.tick_count(),
                    old_seed,
                    new_seed,
                });
            }

            let report = world.tick(plan.intent_at(tick));
            chunks_generated += report.loaded;
            chunks_evicted += report.evicted;
            peak_loaded = peak_loaded.max(world.loaded_chunk_count());
            if world.viewer().on_water {
                water_ticks += 1;
            }

            if self.sample_every > 0 && (tick + 1) % self.sample_every == 0 {
                let sample = Sample::capture(world);
                log::info!(
                    "tick {:>5}  seed {}  chunk ({}, {})  pos ({:.0}, {:.0})  {}  {:?} {:.1}h",
                    sample.tick,
                    sample.seed,
                    sample.chunk[0],
                    sample.chunk[1],
                    sample.x,
                    sample.y,
                    if sample.on_water { "water" } else { "land" },
                    sample.phase,
                    sample.hour
                );
                samples.push(sample);
            }
        }

        RunResult {
            ticks: self.ticks,
            chunks_generated,
            chunks_evicted,
            peak_loaded,
            water_ticks,
            regenerations,
            samples,
            final_sample: Sample::capture(world),
            resident_stats: world.chunk_store().total_stats(),
            resident_chunks: world
                .chunk_store()
                .sorted_coords()
                .into_iter()
                .map(|c| [c.x, c.y])
                .collect(),
        }
    }
}
