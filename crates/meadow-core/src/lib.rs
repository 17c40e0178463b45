pub mod color;
pub mod constants;
pub mod error;
pub mod math;
pub mod rng;
pub mod types;

pub use color::{Rgb, Rgba};
pub use error::MeadowError;
pub use rng::Lcg;
pub use types::{ChunkCoord, LocalTile, WorldPos};
