pub mod chunk;
pub mod chunk_store;
pub mod clock;
pub mod config;
pub mod generator;
pub mod object;
pub mod palette;
pub mod player;
pub mod streaming;

use meadow_core::constants::SEED_RANGE;
use meadow_core::{ChunkCoord, Lcg};
use rand::Rng;

pub use chunk::{Chunk, ChunkStats, Occupancy};
pub use chunk_store::ChunkStore;
pub use clock::{DayClock, DayPhase};
pub use config::{ConfigError, GeneratorFeatures, StreamMode, WorldConfig};
pub use generator::ChunkGenerator;
pub use object::{depth_sorted, ObjectKind, WorldObject};
pub use player::{MovementIntent, Viewer};
pub use streaming::{StreamReport, StreamingPolicy};

/// Draw a fresh world seed from OS entropy, uniform in [0, SEED_RANGE).
pub fn fresh_seed() -> u32 {
    rand::thread_rng().gen_range(0..SEED_RANGE)
}

/// One world session: the seed and its PRNG stream, the resident chunks,
/// the viewer and the day clock.
///
/// The host drives it with one [`World::tick`] per frame and reads back
/// [`World::visible_objects`] to draw.
pub struct World {
    config: WorldConfig,
    seed: u32,
    rng: Lcg,
    generator: ChunkGenerator,
    streaming: StreamingPolicy,
    store: ChunkStore,
    viewer: Viewer,
    clock: DayClock,
}

impl World {
    /// Create a world from a validated config. Uses `config.seed` when set,
    /// otherwise a fresh entropy seed. The initial window is loaded before
    /// this returns.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(fresh_seed);
        Self::with_seed(config, seed)
    }

    /// Create a world with an explicit seed, ignoring `config.seed`.
    pub fn with_seed(config: WorldConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self {
            seed,
            rng: Lcg::new(seed as i64),
            generator: ChunkGenerator::new(config.features, config.stream_mode),
            streaming: StreamingPolicy::new(config.render_distance),
            store: ChunkStore::new(),
            viewer: Viewer::default(),
            clock: DayClock::new(config.day_length_ticks, config.start_hour),
            config,
        };
        let report = world.sync();
        world.viewer.refresh_on_water(&world.store);
        log::info!(
            "World created: seed {}, {:?} stream, render distance {}, {} chunks loaded",
            seed,
            world.config.stream_mode,
            world.config.render_distance,
            report.loaded
        );
        Ok(world)
    }

    /// Advance one frame: move, recompute the water flag, stream, then
    /// advance the clock.
    ///
    /// The water flag is read before streaming, so a viewer stepping into a
    /// chunk that is not resident yet (only possible with render distance 0)
    /// reads as dry for that tick.
    pub fn tick(&mut self, intent: MovementIntent) -> StreamReport {
        let previous_chunk = self.viewer.chunk();
        self.viewer.step(intent, self.config.move_speed);
        self.viewer.refresh_on_water(&self.store);

        let current_chunk = self.viewer.chunk();
        if current_chunk != previous_chunk {
            log::debug!(
                "Viewer crossed into chunk ({}, {})",
                current_chunk.x,
                current_chunk.y
            );
        }

        let report = self.sync();
        self.clock.advance();
        report
    }

    /// Discard every chunk and restart from a fresh entropy seed. Returns the
    /// new seed.
    pub fn regenerate(&mut self) -> u32 {
        let seed = fresh_seed();
        self.regenerate_with_seed(seed);
        seed
    }

    /// Discard every chunk and restart the stream from `seed`. The viewer
    /// keeps its position and the clock keeps running.
    pub fn regenerate_with_seed(&mut self, seed: u32) {
        self.seed = seed;
        self.rng = Lcg::new(seed as i64);
        self.store.clear();
        let loaded = self.streaming.ensure_loaded(
            &mut self.store,
            &self.generator,
            self.seed,
            &mut self.rng,
            self.viewer.chunk(),
        );
        self.viewer.refresh_on_water(&self.store);
        log::info!("Regenerated world with seed {} ({} chunks)", seed, loaded);
    }

    fn sync(&mut self) -> StreamReport {
        self.streaming.sync(
            &mut self.store,
            &self.generator,
            self.seed,
            &mut self.rng,
            self.viewer.chunk(),
        )
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn current_chunk(&self) -> ChunkCoord {
        self.viewer.chunk()
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn clock(&self) -> &DayClock {
        &self.clock
    }

    pub fn chunk_store(&self) -> &ChunkStore {
        &self.store
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.store.get(&coord)
    }

    pub fn loaded_chunk_count(&self) -> u32 {
        self.store.loaded_count()
    }

    /// Frames ticked so far. Survives regeneration.
    pub fn tick_count(&self) -> u64 {
        self.clock.ticks()
    }

    /// Every resident object plus the viewer sprite, unordered. Pass through
    /// [`depth_sorted`] before painting.
    pub fn visible_objects(&self) -> Vec<WorldObject> {
        let total = self.store.total_stats().total() as usize;
        let mut objects = Vec::with_capacity(total + 1);
        for (_, chunk) in self.store.iter() {
            objects.extend(chunk.objects().iter().cloned());
        }
        objects.push(WorldObject::Player(self.viewer.sprite()));
        objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_core::math::chebyshev;
    use meadow_core::WorldPos;

    fn world(seed: u32) -> World {
        World::with_seed(WorldConfig::default(), seed).unwrap()
    }

    fn walk(world: &mut World, letters: &str, ticks: u32) {
        let intent = MovementIntent::from_letters(letters).unwrap();
        for _ in 0..ticks {
            world.tick(intent);
        }
    }

    #[test]
    fn test_startup_loads_window() {
        let world = world(12345);
        assert_eq!(world.seed(), 12345);
        assert_eq!(world.loaded_chunk_count(), 25);
        assert_eq!(world.current_chunk(), ChunkCoord::ZERO);
        assert_eq!(world.viewer().pos, WorldPos::ZERO);
        for y in -2..=2 {
            for x in -2..=2 {
                assert!(world.chunk(ChunkCoord::new(x, y)).is_some());
            }
        }
    }

    #[test]
    fn test_rocks_only_startup_window_totals() {
        let config = WorldConfig {
            features: GeneratorFeatures { small_grass: false },
            ..WorldConfig::default()
        };
        let world = World::with_seed(config, 12345).unwrap();
        assert_eq!(
            world.chunk_store().total_stats(),
            ChunkStats {
                grass: 25 * 1024,
                water: 989,
                trees: 292,
                small_grass: 0,
                rocks: 480,
                buildings: 12,
            }
        );
        assert_eq!(world.rng.state(), 109_517);
    }

    #[test]
    fn test_startup_matches_manual_generation_order() {
        let world = world(4242);
        let generator = ChunkGenerator::default();
        let mut rng = Lcg::new(4242);
        for y in -2..=2 {
            for x in -2..=2 {
                let coord = ChunkCoord::new(x, y);
                let chunk = generator.generate_from(coord, &mut rng);
                assert_eq!(
                    world.chunk(coord).map(|c| c.objects()),
                    Some(chunk.objects()),
                    "chunk {coord} differs"
                );
            }
        }
    }

    #[test]
    fn test_movement_and_depth() {
        let mut world = world(1);
        walk(&mut world, "R", 10);
        walk(&mut world, "U", 5);
        assert_eq!(world.viewer().pos, WorldPos::new(60.0, -30.0));
        assert_eq!(world.viewer().z(), 18.0);
        assert_eq!(world.tick_count(), 15);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = WorldConfig {
            render_distance: 99,
            ..WorldConfig::default()
        };
        assert!(matches!(
            World::with_seed(config, 1),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_seed_used() {
        let config = WorldConfig {
            seed: Some(777),
            ..WorldConfig::default()
        };
        assert_eq!(World::new(config).unwrap().seed(), 777);
        let entropy = World::new(WorldConfig::default()).unwrap();
        assert!(entropy.seed() < SEED_RANGE);
    }

    #[test]
    fn test_streaming_follows_viewer() {
        let mut world = world(99);
        let config = WorldConfig {
            move_speed: 64.0,
            ..WorldConfig::default()
        };
        world.config = config;
        for letters in ["R", "D", "L", "U", "UR"] {
            walk(&mut world, letters, 40);
            let center = world.current_chunk();
            let rd = world.config().render_distance;
            for (coord, _) in world.chunk_store().iter() {
                assert!(chebyshev(*coord, center) <= rd + 1);
            }
            for dy in -2..=2 {
                for dx in -2..=2 {
                    assert!(world.chunk(center + ChunkCoord::new(dx, dy)).is_some());
                }
            }
        }
    }

    #[test]
    fn test_on_water_tracks_viewer_tile() {
        let mut world = world(57);
        for letters in ["D", "R", "U", "L"] {
            for _ in 0..200 {
                world.tick(MovementIntent::from_letters(letters).unwrap());
                let viewer = *world.viewer();
                let expected = world
                    .chunk(viewer.chunk())
                    .is_some_and(|c| c.is_water_at(viewer.pos));
                assert_eq!(viewer.on_water, expected);
            }
        }
    }

    #[test]
    fn test_regenerate_leaves_exact_window() {
        let mut world = world(5);
        walk(&mut world, "R", 400);
        assert!(world.loaded_chunk_count() > 25);

        let new_seed = world.regenerate();
        assert_eq!(world.seed(), new_seed);
        assert!(new_seed < SEED_RANGE);
        assert_eq!(world.loaded_chunk_count(), 25);
        let center = world.current_chunk();
        for (coord, _) in world.chunk_store().iter() {
            assert!(chebyshev(*coord, center) <= 2);
        }
        // The clock is not part of the world content.
        assert_eq!(world.tick_count(), 400);
    }

    #[test]
    fn test_regenerate_with_same_seed_reproduces_world() {
        let mut world = world(31337);
        let before = world.chunk(ChunkCoord::ZERO).map(|c| c.objects().to_vec());
        walk(&mut world, "D", 10);
        walk(&mut world, "U", 10);
        world.regenerate_with_seed(31337);
        assert_eq!(world.chunk(ChunkCoord::ZERO).map(|c| c.objects().to_vec()), before);
    }

    #[test]
    fn test_per_chunk_mode_ignores_travel_history() {
        let config = WorldConfig {
            stream_mode: StreamMode::PerChunk,
            move_speed: 64.0,
            ..WorldConfig::default()
        };
        let target = ChunkCoord::new(3, 0);

        let mut direct = World::with_seed(config.clone(), 2024).unwrap();
        walk(&mut direct, "R", 48);
        let mut roundabout = World::with_seed(config, 2024).unwrap();
        walk(&mut roundabout, "D", 48);
        walk(&mut roundabout, "R", 48);
        walk(&mut roundabout, "U", 48);

        assert_eq!(direct.current_chunk(), target);
        assert_eq!(roundabout.current_chunk(), target);
        assert_eq!(
            direct.chunk(target).map(|c| c.objects()),
            roundabout.chunk(target).map(|c| c.objects())
        );
    }

    #[test]
    fn test_visible_objects_include_viewer() {
        let world = world(12345);
        let objects = world.visible_objects();
        let players: Vec<_> = objects
            .iter()
            .filter(|o| o.kind() == ObjectKind::Player)
            .collect();
        assert_eq!(players.len(), 1);
        assert_eq!(
            objects.len() as u32,
            world.chunk_store().total_stats().total() + 1
        );

        let sorted = depth_sorted(objects);
        assert!(sorted.windows(2).all(|w| w[0].z() <= w[1].z()));
    }
}
