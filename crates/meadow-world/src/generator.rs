//! Deterministic chunk generation.
//!
//! A chunk is built by a fixed sequence of passes that all draw from one
//! [`Lcg`] stream. The order of passes, and of draws within each pass, is
//! part of the world format: reordering anything changes every world.
//!
//! 1. Grass base (every tile, row-major)
//! 2. Water body (40%)
//! 3. Forest cluster (60%)
//! 4. Decor: grass blades (optional) and rocks, per tile
//! 5. Solitary trees (0–4)
//! 6. Building (40%, at most one)

use glam::{DVec2, IVec2};
use meadow_core::constants::{
    BUILDING_EDGE_MARGIN, BUILDING_PLACEMENT_ATTEMPTS, CHUNK_SEED_X_STRIDE, CHUNK_SIZE,
    MIN_TREE_DISTANCE, TILE_SIZE,
};
use meadow_core::math::tile_origin;
use meadow_core::{ChunkCoord, Lcg, LocalTile, WorldPos};

use crate::chunk::{Chunk, Occupancy};
use crate::config::{GeneratorFeatures, StreamMode};
use crate::object::{Building, GroundTile, Rock, SmallGrass, Tree, WorldObject};
use crate::palette;

const TS: f64 = TILE_SIZE as f64;

const WATER_CHANCE: f64 = 0.4;
const FOREST_CHANCE: f64 = 0.6;
const SMALL_GRASS_CHANCE: f64 = 0.05;
const ROCK_CHANCE: f64 = 0.02;
const MAX_SOLITARY_TREES: u32 = 5;
const BUILDING_CHANCE: f64 = 0.4;

/// Seed for a chunk's private stream in [`StreamMode::PerChunk`].
pub fn chunk_seed(world_seed: u32, coord: ChunkCoord) -> i64 {
    world_seed as i64 + coord.x as i64 * CHUNK_SEED_X_STRIDE + coord.y as i64
}

/// Builds chunks from chunk coordinates and a PRNG stream.
#[derive(Debug, Clone, Default)]
pub struct ChunkGenerator {
    features: GeneratorFeatures,
    stream_mode: StreamMode,
}

impl ChunkGenerator {
    pub fn new(features: GeneratorFeatures, stream_mode: StreamMode) -> Self {
        Self {
            features,
            stream_mode,
        }
    }

    /// Generate a chunk, drawing from `shared` or from a private per-chunk
    /// stream depending on the stream mode.
    pub fn generate(&self, coord: ChunkCoord, world_seed: u32, shared: &mut Lcg) -> Chunk {
        match self.stream_mode {
            StreamMode::Shared => self.generate_from(coord, shared),
            StreamMode::PerChunk => {
                let mut own = Lcg::new(chunk_seed(world_seed, coord));
                self.generate_from(coord, &mut own)
            }
        }
    }

    /// Run every pass against the given stream.
    pub fn generate_from(&self, coord: ChunkCoord, rng: &mut Lcg) -> Chunk {
        let mut builder = ChunkBuilder::new(coord, rng);
        builder.grass_base();
        builder.water_body();
        builder.forest();
        builder.decor(self.features.small_grass);
        builder.solitary_trees();
        builder.building();
        let chunk = builder.finish();

        let stats = chunk.stats();
        log::trace!(
            "Generated chunk ({}, {}): {} water, {} trees, {} rocks, {} blades, {} buildings",
            coord.x,
            coord.y,
            stats.water,
            stats.trees,
            stats.rocks,
            stats.small_grass,
            stats.buildings
        );
        chunk
    }
}

/// Mutable state for one chunk while its passes run.
struct ChunkBuilder<'a> {
    coord: ChunkCoord,
    rng: &'a mut Lcg,
    objects: Vec<WorldObject>,
    occupancy: Occupancy,
    /// Tile origins of trees placed so far, for the minimum-distance rule.
    tree_origins: Vec<WorldPos>,
}

impl<'a> ChunkBuilder<'a> {
    fn new(coord: ChunkCoord, rng: &'a mut Lcg) -> Self {
        Self {
            coord,
            rng,
            objects: Vec::with_capacity((CHUNK_SIZE * CHUNK_SIZE) as usize + 128),
            occupancy: Occupancy::new(),
            tree_origins: Vec::new(),
        }
    }

    fn finish(self) -> Chunk {
        Chunk::new(self.coord, self.objects, self.occupancy)
    }

    fn origin(&self, local: LocalTile) -> WorldPos {
        tile_origin(self.coord, local)
    }

    /// Tiles of the box `center ± radius` clipped to the chunk, row-major.
    fn clipped_box(center: LocalTile, radius: i32) -> impl Iterator<Item = LocalTile> {
        let y0 = (center.y - radius).max(0);
        let y1 = (center.y + radius).min(CHUNK_SIZE);
        let x0 = (center.x - radius).max(0);
        let x1 = (center.x + radius).min(CHUNK_SIZE);
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| IVec2::new(x, y)))
    }

    fn all_tiles() -> impl Iterator<Item = LocalTile> {
        (0..CHUNK_SIZE).flat_map(|y| (0..CHUNK_SIZE).map(move |x| IVec2::new(x, y)))
    }

    fn tile_distance(a: LocalTile, b: LocalTile) -> f64 {
        (a - b).as_dvec2().length()
    }

    fn random_tile(&mut self) -> LocalTile {
        let x = self.rng.below(CHUNK_SIZE as u32) as i32;
        let y = self.rng.below(CHUNK_SIZE as u32) as i32;
        IVec2::new(x, y)
    }

    fn grass_base(&mut self) {
        for local in Self::all_tiles() {
            let origin = self.origin(local);
            let color = palette::grass_color(self.rng);
            self.objects
                .push(WorldObject::Grass(GroundTile::new(origin, color)));
        }
    }

    /// One irregular pond: each tile in the bounding box gets its own jittered
    /// radius threshold.
    fn water_body(&mut self) {
        if !self.rng.chance(WATER_CHANCE) {
            return;
        }
        let center = self.random_tile();
        let size = self.rng.below(8) as i32 + 3;

        for local in Self::clipped_box(center, size) {
            let dist = Self::tile_distance(local, center);
            let threshold = size as f64 * (0.7 + self.rng.next_f64() * 0.3);
            if dist < threshold {
                let origin = self.origin(local);
                let color = palette::water_color(self.rng);
                self.objects
                    .push(WorldObject::Water(GroundTile::new(origin, color)));
                self.occupancy.mark_water(local);
            }
        }
    }

    /// A tree cluster, denser near its centre.
    fn forest(&mut self) {
        if !self.rng.chance(FOREST_CHANCE) {
            return;
        }
        let center = self.random_tile();
        let size = self.rng.below(10) as i32 + 5;
        let density = self.rng.range(0.4, 0.4);
        let size_f = size as f64;

        for local in Self::clipped_box(center, size) {
            let dist = Self::tile_distance(local, center);
            let tree_chance = density * (1.0 - dist / size_f);
            // The draw happens for every tile, hit or miss.
            if self.rng.next_f64() < tree_chance && dist < size_f {
                self.try_place_tree(local);
            }
        }
    }

    fn too_close_to_trees(&self, origin: WorldPos) -> bool {
        self.tree_origins
            .iter()
            .any(|p| p.distance(origin) < MIN_TREE_DISTANCE)
    }

    /// Place a tree unless the tile is water or another tree is too close.
    /// Rejected candidates consume no draws.
    fn try_place_tree(&mut self, local: LocalTile) -> bool {
        let origin = self.origin(local);
        if self.occupancy.has_water(local) || self.too_close_to_trees(origin) {
            return false;
        }
        let variation = self.rng.next_f64() * 0.3 + 0.85;
        let leaves_color = palette::tree_color(self.rng);
        self.tree_origins.push(origin);
        self.occupancy.mark_tree(local);
        self.objects
            .push(WorldObject::Tree(Tree::at_tile(origin, variation, leaves_color)));
        true
    }

    /// Per-tile decor. With blades enabled each tile draws a blade chance and
    /// then a rock chance; both checks run regardless of each other, and both
    /// skip water and tree tiles.
    ///
    /// The rocks-only pass keeps rocks off water but lets them share a tile
    /// with a tree, as the classic world format does.
    fn decor(&mut self, small_grass: bool) {
        for local in Self::all_tiles() {
            let flags = self.occupancy.get(local);
            if small_grass && self.rng.chance(SMALL_GRASS_CHANCE) && !flags.is_blocked() {
                self.place_small_grass(local);
            }
            let rock_blocked = if small_grass {
                flags.is_blocked()
            } else {
                flags.water
            };
            if self.rng.chance(ROCK_CHANCE) && !rock_blocked {
                self.place_rock(local);
            }
        }
    }

    fn place_small_grass(&mut self, local: LocalTile) {
        let origin = self.origin(local);
        let width = self.rng.range(2.0, 3.0);
        let height = self.rng.range(6.0, 8.0);
        let offset_x = self.rng.next_f64() * (TS - width);
        let offset_y = self.rng.next_f64() * (TS - height);
        let color = palette::small_grass_color(self.rng);
        let pos = origin + DVec2::new(offset_x, offset_y);
        self.objects.push(WorldObject::SmallGrass(SmallGrass {
            pos,
            z: pos.y + height,
            width,
            height,
            color,
        }));
    }

    fn place_rock(&mut self, local: LocalTile) {
        let origin = self.origin(local);
        let x = origin.x + self.rng.next_f64() * TS / 2.0;
        let y = origin.y + self.rng.next_f64() * TS / 2.0;
        let width = TS / 2.0 + self.rng.next_f64() * TS / 2.0;
        let height = TS / 2.0 + self.rng.next_f64() * TS / 3.0;
        let color = palette::rock_color(self.rng);
        self.objects.push(WorldObject::Rock(Rock {
            pos: DVec2::new(x, y),
            z: origin.y + TS / 2.0,
            width,
            height,
            color,
        }));
    }

    /// 0–4 trees at uniformly random tiles; invalid spots are skipped, not retried.
    fn solitary_trees(&mut self) {
        let count = self.rng.below(MAX_SOLITARY_TREES);
        for _ in 0..count {
            let local = self.random_tile();
            self.try_place_tree(local);
        }
    }

    /// Whether a building anchored at `site` would crowd water or trees.
    ///
    /// For each tile of the 3×3 neighbourhood: water on that tile blocks, and
    /// so does any tree whose pivot (tile centre, bottom edge) lies within one
    /// tile width on both axes, which is a tree on the row above, in the same
    /// column or the one to its left.
    fn site_blocked(&self, site: LocalTile) -> bool {
        (-1..=1).any(|dy| {
            (-1..=1).any(|dx| {
                let n = site + IVec2::new(dx, dy);
                self.occupancy.has_water(n)
                    || self.occupancy.has_tree(n + IVec2::new(0, -1))
                    || self.occupancy.has_tree(n + IVec2::new(-1, -1))
            })
        })
    }

    /// At most one building, kept away from the chunk edges. After
    /// BUILDING_PLACEMENT_ATTEMPTS blocked samples the last one is used anyway.
    fn building(&mut self) {
        if !self.rng.chance(BUILDING_CHANCE) {
            return;
        }
        let span = (CHUNK_SIZE - 2 * BUILDING_EDGE_MARGIN) as u32;
        let mut site = IVec2::ZERO;
        let mut clear = false;
        for _ in 0..BUILDING_PLACEMENT_ATTEMPTS {
            let x = self.rng.below(span) as i32 + BUILDING_EDGE_MARGIN;
            let y = self.rng.below(span) as i32 + BUILDING_EDGE_MARGIN;
            site = IVec2::new(x, y);
            if !self.site_blocked(site) {
                clear = true;
                break;
            }
        }
        if !clear {
            log::debug!(
                "No clear building site in chunk ({}, {}), using last sample ({}, {})",
                self.coord.x,
                self.coord.y,
                site.x,
                site.y
            );
        }

        let origin = self.origin(site);
        let width = (self.rng.below(4) + 4) as f64 * TS;
        let height = (self.rng.below(4) + 4) as f64 * TS;
        let floors = self.rng.below(3) as u8 + 1;
        let has_balcony = floors > 1 && self.rng.next_f64() > 0.3;
        let body_color = *self.rng.pick(&palette::BUILDING_BODY_COLORS);
        let window_color = *self.rng.pick(&palette::BUILDING_WINDOW_COLORS);
        let door_color = *self.rng.pick(&palette::BUILDING_DOOR_COLORS);

        self.objects.push(WorldObject::Building(Building {
            pos: origin,
            z: origin.y + height,
            width,
            height,
            floors,
            has_balcony,
            body_color,
            window_color,
            door_color,
        }));
    }
}
