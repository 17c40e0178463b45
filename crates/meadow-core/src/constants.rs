//! Single source of truth for shared world constants.
//! Generation, streaming and the host renderer all read these values.

/// Side length of a tile in world units.
pub const TILE_SIZE: i32 = 32;

/// Side length of a chunk in tiles.
pub const CHUNK_SIZE: i32 = 32;

/// Side length of a chunk in world units (CHUNK_SIZE * TILE_SIZE).
pub const CHUNK_WORLD_SIZE: i32 = CHUNK_SIZE * TILE_SIZE;

/// Tiles per chunk (32^2).
pub const TILES_PER_CHUNK: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// LCG multiplier. Must match exactly for seed-compatible worlds.
pub const LCG_MULTIPLIER: i64 = 9301;

/// LCG increment.
pub const LCG_INCREMENT: i64 = 49297;

/// LCG modulus; also the upper bound on the period.
pub const LCG_MODULUS: i64 = 233_280;

/// Fresh seeds are drawn uniformly from [0, SEED_RANGE).
pub const SEED_RANGE: u32 = 1_000_000;

/// Multiplier applied to chunk X when deriving a per-chunk seed.
pub const CHUNK_SEED_X_STRIDE: i64 = 10_000;

/// Chebyshev radius (in chunks) kept loaded around the viewer.
pub const DEFAULT_RENDER_DISTANCE: u32 = 2;

/// Largest render distance accepted from configuration.
pub const MAX_RENDER_DISTANCE: u32 = 16;

/// Viewer step per tick, in world units.
pub const DEFAULT_MOVE_SPEED: f64 = 6.0;

/// Viewer depth key offset below its position: z = y + 1.5 * TILE_SIZE.
pub const PLAYER_DEPTH_OFFSET: f64 = TILE_SIZE as f64 * 1.5;

/// Minimum Euclidean distance between two trees of one chunk.
pub const MIN_TREE_DISTANCE: f64 = TILE_SIZE as f64 * 1.5;

/// Building site search gives up after this many samples.
pub const BUILDING_PLACEMENT_ATTEMPTS: u32 = 20;

/// Buildings keep this many tiles away from every chunk edge.
pub const BUILDING_EDGE_MARGIN: i32 = 4;

/// Ticks per full day/night cycle (one minute at 60 Hz).
pub const DEFAULT_DAY_LENGTH_TICKS: u32 = 3600;

/// Hour of day a fresh clock starts at.
pub const DEFAULT_START_HOUR: f32 = 8.0;

/// Darkest daylight factor reached at night.
pub const NIGHT_DAYLIGHT: f32 = 0.25;
