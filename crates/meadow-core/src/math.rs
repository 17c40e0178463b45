use crate::constants::{CHUNK_SIZE, CHUNK_WORLD_SIZE, TILE_SIZE};
use crate::error::MeadowError;
use crate::types::{ChunkCoord, LocalTile, WorldPos};
use glam::{DVec2, IVec2};

/// Convert a world-space position to its containing chunk coordinate.
pub fn world_to_chunk(world: WorldPos) -> ChunkCoord {
    let cs = CHUNK_WORLD_SIZE as f64;
    IVec2::new((world.x / cs).floor() as i32, (world.y / cs).floor() as i32)
}

/// Convert a world-space position to the tile offset inside its chunk.
pub fn world_to_local(world: WorldPos) -> LocalTile {
    let ts = TILE_SIZE as f64;
    let tile = IVec2::new((world.x / ts).floor() as i32, (world.y / ts).floor() as i32);
    IVec2::new(tile.x.rem_euclid(CHUNK_SIZE), tile.y.rem_euclid(CHUNK_SIZE))
}

/// World-space origin (top-left corner) of a tile inside a chunk.
pub fn tile_origin(chunk: ChunkCoord, local: LocalTile) -> WorldPos {
    DVec2::new(
        (chunk.x as f64 * CHUNK_SIZE as f64 + local.x as f64) * TILE_SIZE as f64,
        (chunk.y as f64 * CHUNK_SIZE as f64 + local.y as f64) * TILE_SIZE as f64,
    )
}

/// Chebyshev (king-move) distance between two chunk coordinates.
pub fn chebyshev(a: ChunkCoord, b: ChunkCoord) -> u32 {
    let d = (a - b).abs();
    d.x.max(d.y) as u32
}

/// Whether a local tile offset lies inside a chunk.
pub fn in_chunk_bounds(local: LocalTile) -> bool {
    local.x >= 0 && local.x < CHUNK_SIZE && local.y >= 0 && local.y < CHUNK_SIZE
}

/// Parse `"x,y"` into a chunk coordinate.
pub fn parse_chunk_coord(text: &str) -> Result<ChunkCoord, MeadowError> {
    let invalid = || MeadowError::InvalidChunkCoord(text.to_string());
    let (x, y) = text.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(IVec2::new(x, y))
}
