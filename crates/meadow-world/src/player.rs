use meadow_core::constants::PLAYER_DEPTH_OFFSET;
use meadow_core::math::world_to_chunk;
use meadow_core::{ChunkCoord, MeadowError, WorldPos};
use serde::{Deserialize, Serialize};

use crate::chunk_store::ChunkStore;
use crate::object::PlayerSprite;

/// Directions held during one tick. Opposite directions cancel out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    pub const IDLE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Parse direction letters such as `"UL"` or `"r"`. An empty string is idle.
    pub fn from_letters(letters: &str) -> Result<Self, MeadowError> {
        let mut intent = Self::IDLE;
        for ch in letters.chars() {
            match ch.to_ascii_uppercase() {
                'U' => intent.up = true,
                'D' => intent.down = true,
                'L' => intent.left = true,
                'R' => intent.right = true,
                other => {
                    return Err(MeadowError::InvalidMoveStep {
                        step: letters.to_string(),
                        reason: format!("unknown direction '{other}'"),
                    })
                }
            }
        }
        Ok(intent)
    }

    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// The viewer the world streams around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Viewer {
    pub pos: WorldPos,
    pub on_water: bool,
}

impl Viewer {
    pub fn new(pos: WorldPos) -> Self {
        Self {
            pos,
            on_water: false,
        }
    }

    /// Depth key; the sprite sorts as if its feet were 1.5 tiles below `pos`.
    pub fn z(&self) -> f64 {
        self.pos.y + PLAYER_DEPTH_OFFSET
    }

    pub fn chunk(&self) -> ChunkCoord {
        world_to_chunk(self.pos)
    }

    /// Apply one tick of movement. No collision checks.
    pub fn step(&mut self, intent: MovementIntent, speed: f64) {
        if intent.up {
            self.pos.y -= speed;
        }
        if intent.down {
            self.pos.y += speed;
        }
        if intent.left {
            self.pos.x -= speed;
        }
        if intent.right {
            self.pos.x += speed;
        }
    }

    /// Recompute `on_water` from the chunk under the viewer. A chunk that is
    /// not resident yet reads as dry.
    pub fn refresh_on_water(&mut self, store: &ChunkStore) {
        self.on_water = store
            .get(&self.chunk())
            .is_some_and(|chunk| chunk.is_water_at(self.pos));
    }

    pub fn sprite(&self) -> PlayerSprite {
        PlayerSprite {
            pos: self.pos,
            z: self.z(),
            color: PlayerSprite::COLOR,
        }
    }
}
