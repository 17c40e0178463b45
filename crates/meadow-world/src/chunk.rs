use meadow_core::constants::{CHUNK_SIZE, TILES_PER_CHUNK};
use meadow_core::math::{in_chunk_bounds, world_to_chunk, world_to_local};
use meadow_core::{ChunkCoord, LocalTile, WorldPos};
use serde::Serialize;

use crate::object::{ObjectKind, WorldObject};

/// What already stands on one tile of a chunk being generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileFlags {
    pub water: bool,
    pub tree: bool,
}

impl TileFlags {
    /// Water or tree: the tile cannot take a tree, rock or grass blade.
    pub fn is_blocked(self) -> bool {
        self.water || self.tree
    }
}

/// Per-chunk occupancy grid (CHUNK_SIZE × CHUNK_SIZE), indexed by local tile.
/// Out-of-bounds lookups read as empty.
#[derive(Debug, Clone)]
pub struct Occupancy {
    tiles: Vec<TileFlags>,
}

impl Default for Occupancy {
    fn default() -> Self {
        Self::new()
    }
}

impl Occupancy {
    pub fn new() -> Self {
        Self {
            tiles: vec![TileFlags::default(); TILES_PER_CHUNK],
        }
    }

    fn index(local: LocalTile) -> Option<usize> {
        in_chunk_bounds(local).then(|| (local.y * CHUNK_SIZE + local.x) as usize)
    }

    pub fn get(&self, local: LocalTile) -> TileFlags {
        Self::index(local)
            .map(|i| self.tiles[i])
            .unwrap_or_default()
    }

    pub fn has_water(&self, local: LocalTile) -> bool {
        self.get(local).water
    }

    pub fn has_tree(&self, local: LocalTile) -> bool {
        self.get(local).tree
    }

    pub fn mark_water(&mut self, local: LocalTile) {
        if let Some(i) = Self::index(local) {
            self.tiles[i].water = true;
        }
    }

    pub fn mark_tree(&mut self, local: LocalTile) {
        if let Some(i) = Self::index(local) {
            self.tiles[i].tree = true;
        }
    }

    /// Number of tiles with the water flag set.
    pub fn water_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.water).count()
    }
}

/// Object counts for one chunk, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChunkStats {
    pub grass: u32,
    pub water: u32,
    pub trees: u32,
    pub small_grass: u32,
    pub rocks: u32,
    pub buildings: u32,
}

impl ChunkStats {
    pub fn from_objects(objects: &[WorldObject]) -> Self {
        let mut stats = Self::default();
        for obj in objects {
            match obj.kind() {
                ObjectKind::Grass => stats.grass += 1,
                ObjectKind::Water => stats.water += 1,
                ObjectKind::Tree => stats.trees += 1,
                ObjectKind::SmallGrass => stats.small_grass += 1,
                ObjectKind::Rock => stats.rocks += 1,
                ObjectKind::Building => stats.buildings += 1,
                ObjectKind::Player => {}
            }
        }
        stats
    }

    pub fn total(&self) -> u32 {
        self.grass + self.water + self.trees + self.small_grass + self.rocks + self.buildings
    }

    /// Element-wise sum, for window totals.
    pub fn accumulate(&mut self, other: &ChunkStats) {
        self.grass += other.grass;
        self.water += other.water;
        self.trees += other.trees;
        self.small_grass += other.small_grass;
        self.rocks += other.rocks;
        self.buildings += other.buildings;
    }
}

/// A generated chunk. Immutable once built; the streaming policy drops it
/// whole when it falls outside the retention radius.
#[derive(Debug, Clone)]
pub struct Chunk {
    coord: ChunkCoord,
    objects: Vec<WorldObject>,
    occupancy: Occupancy,
    stats: ChunkStats,
}

impl Chunk {
    pub(crate) fn new(coord: ChunkCoord, objects: Vec<WorldObject>, occupancy: Occupancy) -> Self {
        let stats = ChunkStats::from_objects(&objects);
        Self {
            coord,
            objects,
            occupancy,
            stats,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Objects in generation order.
    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub fn stats(&self) -> ChunkStats {
        self.stats
    }

    /// Whether `pos` falls inside a water tile of this chunk. Positions in
    /// other chunks are never water here.
    pub fn is_water_at(&self, pos: WorldPos) -> bool {
        world_to_chunk(pos) == self.coord && self.occupancy.has_water(world_to_local(pos))
    }
}
