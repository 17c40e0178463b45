use glam::{DVec2, IVec2};

/// Chunk coordinate in chunk-space (each unit = CHUNK_SIZE tiles).
pub type ChunkCoord = IVec2;

/// Tile offset inside a chunk, each axis in [0, CHUNK_SIZE).
pub type LocalTile = IVec2;

/// Position in world units (TILE_SIZE units per tile).
pub type WorldPos = DVec2;
