use meadow_core::{ChunkCoord, Lcg};
use serde::Serialize;

use crate::chunk_store::ChunkStore;
use crate::generator::ChunkGenerator;

/// Outcome of one streaming pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamReport {
    pub loaded: u32,
    pub evicted: u32,
}

impl StreamReport {
    pub fn is_quiet(&self) -> bool {
        self.loaded == 0 && self.evicted == 0
    }
}

/// Keeps a square window of chunks resident around the viewer.
///
/// Chunks within `render_distance` (Chebyshev) are generated when missing.
/// Chunks are only dropped once they are farther than `render_distance + 1`,
/// so walking back and forth across a chunk border does not regenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingPolicy {
    render_distance: u32,
}

impl StreamingPolicy {
    pub fn new(render_distance: u32) -> Self {
        Self { render_distance }
    }

    pub fn render_distance(&self) -> u32 {
        self.render_distance
    }

    /// Number of chunks in a settled window.
    pub fn window_size(&self) -> u32 {
        let side = 2 * self.render_distance + 1;
        side * side
    }

    /// Coordinates that must be resident around `center`, in generation
    /// order: rows top to bottom, each row left to right.
    pub fn desired_window(&self, center: ChunkCoord) -> impl Iterator<Item = ChunkCoord> {
        let rd = self.render_distance as i32;
        (center.y - rd..=center.y + rd)
            .flat_map(move |y| (center.x - rd..=center.x + rd).map(move |x| ChunkCoord::new(x, y)))
    }

    /// Generate every missing chunk of the window. Returns how many were
    /// generated.
    pub fn ensure_loaded(
        &self,
        store: &mut ChunkStore,
        generator: &ChunkGenerator,
        world_seed: u32,
        rng: &mut Lcg,
        center: ChunkCoord,
    ) -> u32 {
        let mut loaded = 0;
        for coord in self.desired_window(center) {
            if store.contains(&coord) {
                continue;
            }
            store.insert(generator.generate(coord, world_seed, rng));
            loaded += 1;
        }
        loaded
    }

    /// Drop chunks beyond the retention radius. Returns how many were dropped.
    pub fn evict_far(&self, store: &mut ChunkStore, center: ChunkCoord) -> u32 {
        store.retain_within(center, self.render_distance + 1)
    }

    /// Load then evict around `center`.
    pub fn sync(
        &self,
        store: &mut ChunkStore,
        generator: &ChunkGenerator,
        world_seed: u32,
        rng: &mut Lcg,
        center: ChunkCoord,
    ) -> StreamReport {
        let loaded = self.ensure_loaded(store, generator, world_seed, rng, center);
        let evicted = self.evict_far(store, center);
        let report = StreamReport { loaded, evicted };
        if !report.is_quiet() {
            log::debug!(
                "Streaming around ({}, {}): {} loaded, {} evicted, {} resident",
                center.x,
                center.y,
                loaded,
                evicted,
                store.loaded_count()
            );
        }
        report
    }
}

impl Default for StreamingPolicy {
    fn default() -> Self {
        Self::new(meadow_core::constants::DEFAULT_RENDER_DISTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meadow_core::math::chebyshev;

    fn setup() -> (StreamingPolicy, ChunkStore, ChunkGenerator, Lcg) {
        (
            StreamingPolicy::default(),
            ChunkStore::new(),
            ChunkGenerator::default(),
            Lcg::new(12345),
        )
    }

    #[test]
    fn test_desired_window_order() {
        let policy = StreamingPolicy::new(1);
        let coords: Vec<_> = policy.desired_window(ChunkCoord::new(5, -2)).collect();
        assert_eq!(coords.len(), 9);
        assert_eq!(coords[0], ChunkCoord::new(4, -3));
        assert_eq!(coords[1], ChunkCoord::new(5, -3));
        assert_eq!(coords[3], ChunkCoord::new(4, -2));
        assert_eq!(coords[8], ChunkCoord::new(6, -1));
    }

    #[test]
    fn test_zero_render_distance_is_single_chunk() {
        let policy = StreamingPolicy::new(0);
        assert_eq!(policy.window_size(), 1);
        let coords: Vec<_> = policy.desired_window(ChunkCoord::new(2, 3)).collect();
        assert_eq!(coords, vec![ChunkCoord::new(2, 3)]);
    }

    #[test]
    fn test_initial_sync_loads_window() {
        let (policy, mut store, generator, mut rng) = setup();
        let report = policy.sync(&mut store, &generator, 12345, &mut rng, ChunkCoord::ZERO);
        assert_eq!(report, StreamReport { loaded: 25, evicted: 0 });
        assert_eq!(store.loaded_count(), 25);
        for coord in policy.desired_window(ChunkCoord::ZERO) {
            assert!(store.contains(&coord), "missing {coord}");
        }
    }

    #[test]
    fn test_sync_is_idempotent() {
        let (policy, mut store, generator, mut rng) = setup();
        policy.sync(&mut store, &generator, 12345, &mut rng, ChunkCoord::ZERO);
        let state = rng.state();
        let report = policy.sync(&mut store, &generator, 12345, &mut rng, ChunkCoord::ZERO);
        assert!(report.is_quiet());
        assert_eq!(rng.state(), state, "no draws for resident chunks");
    }

    #[test]
    fn test_margin_keeps_previous_edge() {
        let (policy, mut store, generator, mut rng) = setup();
        policy.sync(&mut store, &generator, 12345, &mut rng, ChunkCoord::ZERO);

        // One step east: a new column of 5 appears, the old west column stays.
        let report = policy.sync(&mut store, &generator, 12345, &mut rng, ChunkCoord::new(1, 0));
        assert_eq!(report, StreamReport { loaded: 5, evicted: 0 });
        assert!(store.contains(&ChunkCoord::new(-2, 0)));

        // Back west: everything is already resident.
        let report = policy.sync(&mut store, &generator, 12345, &mut rng, ChunkCoord::ZERO);
        assert!(report.is_quiet());

        // Two steps east of origin: the -2 column is now 4 away and goes.
        let report = policy.sync(&mut store, &generator, 12345, &mut rng, ChunkCoord::new(2, 0));
        assert_eq!(report.loaded, 5);
        assert_eq!(report.evicted, 5);
        assert!(!store.contains(&ChunkCoord::new(-2, 0)));
    }

    #[test]
    fn test_eviction_bound_after_wandering() {
        let (policy, mut store, generator, mut rng) = setup();
        let path = [
            (0, 0),
            (3, 0),
            (3, 4),
            (-5, 4),
            (-5, -6),
            (-4, -6),
            (0, 0),
            (10, 10),
        ];
        for (x, y) in path {
            let center = ChunkCoord::new(x, y);
            policy.sync(&mut store, &generator, 12345, &mut rng, center);
            for coord in policy.desired_window(center) {
                assert!(store.contains(&coord));
            }
            for (coord, _) in store.iter() {
                assert!(chebyshev(*coord, center) <= policy.render_distance() + 1);
            }
        }
    }

    #[test]
    fn test_evict_far_alone() {
        let (policy, mut store, generator, mut rng) = setup();
        policy.ensure_loaded(&mut store, &generator, 12345, &mut rng, ChunkCoord::ZERO);
        assert_eq!(policy.evict_far(&mut store, ChunkCoord::new(3, 0)), 10);
        assert_eq!(policy.evict_far(&mut store, ChunkCoord::new(100, 100)), 15);
        assert!(store.is_empty());
    }
}
