//! Drawable world objects.
//!
//! Every object carries a world-space position and a depth key `z`. The host
//! paints in ascending `z` (painter's algorithm); z is a 2D "feet line" proxy,
//! not a third axis. Geometry and colours are outputs of generation and are
//! never mutated after a chunk is built.

use meadow_core::constants::TILE_SIZE;
use meadow_core::{Rgb, Rgba, WorldPos};
use serde::{Deserialize, Serialize};

const TS: f64 = TILE_SIZE as f64;

/// Axis-aligned rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment test: [x, x+width) × [y, y+height).
    pub fn contains(&self, p: WorldPos) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn center(&self) -> WorldPos {
        WorldPos::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Grass or water terrain tile: a full TILE_SIZE square at `pos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTile {
    pub pos: WorldPos,
    pub z: f64,
    pub color: Rgb,
}

impl GroundTile {
    pub fn new(origin: WorldPos, color: Rgb) -> Self {
        Self {
            pos: origin,
            z: origin.y + TS,
            color,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, TS, TS)
    }
}

/// A composite tree: shadow, trunk, rounded leaf block and leaf highlight,
/// all anchored at the pivot (centre of the tile's bottom edge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub pivot: WorldPos,
    pub z: f64,
    /// Scale factor in [0.85, 1.15), applied to the shadow by the painter.
    pub variation: f64,
    pub shadow: Rect,
    pub trunk: Rect,
    pub leaves: Rect,
    pub highlight: Rect,
    pub leaves_color: Rgb,
}

impl Tree {
    pub const TRUNK_COLOR: Rgb = Rgb::from_hex(0x8B4513);
    pub const SHADOW_COLOR: Rgba = Rgba::new(0, 0, 0, 0.2);
    pub const HIGHLIGHT_COLOR: Rgba = Rgba::new(255, 255, 255, 0.15);

    const TRUNK_HEIGHT: f64 = TS * 1.5;
    const TRUNK_WIDTH: f64 = TS * 0.6;
    const LEAVES_SIZE: f64 = TS * 2.5;

    /// Build a tree standing on the tile whose top-left corner is `origin`.
    pub fn at_tile(origin: WorldPos, variation: f64, leaves_color: Rgb) -> Self {
        let pivot = WorldPos::new(origin.x + TS / 2.0, origin.y + TS);
        let leaves_x = pivot.x - Self::LEAVES_SIZE / 2.0;
        let leaves_y = pivot.y - Self::TRUNK_HEIGHT - Self::LEAVES_SIZE * 0.8;

        Self {
            pivot,
            z: origin.y + TS,
            variation,
            shadow: Rect::new(
                pivot.x - Self::LEAVES_SIZE * 0.6,
                pivot.y - TS * 0.3,
                Self::LEAVES_SIZE * 1.2,
                TS * 0.5,
            ),
            trunk: Rect::new(
                pivot.x - Self::TRUNK_WIDTH / 2.0,
                pivot.y - Self::TRUNK_HEIGHT,
                Self::TRUNK_WIDTH,
                Self::TRUNK_HEIGHT,
            ),
            leaves: Rect::new(leaves_x, leaves_y, Self::LEAVES_SIZE, Self::LEAVES_SIZE),
            highlight: Rect::new(
                leaves_x + Self::LEAVES_SIZE * 0.2,
                leaves_y + Self::LEAVES_SIZE * 0.1,
                Self::LEAVES_SIZE * 0.6,
                Self::LEAVES_SIZE * 0.5,
            ),
            leaves_color,
        }
    }

    /// Corner radius of the rounded leaf block.
    pub fn leaves_corner_radius(&self) -> f64 {
        self.leaves.width / 4.0
    }

    /// Top-left corner of the tile this tree stands on.
    pub fn tile_origin(&self) -> WorldPos {
        WorldPos::new(self.pivot.x - TS / 2.0, self.pivot.y - TS)
    }
}

/// A single decorative grass blade inside one tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmallGrass {
    pub pos: WorldPos,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

/// An elliptical rock with a jittered origin inside its tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rock {
    pub pos: WorldPos,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub pos: WorldPos,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    /// 1–3 rows of windows.
    pub floors: u8,
    pub has_balcony: bool,
    pub body_color: Rgb,
    pub window_color: Rgb,
    pub door_color: Rgb,
}

/// The viewer as a drawable pseudo-object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSprite {
    pub pos: WorldPos,
    pub z: f64,
    pub color: Rgb,
}

impl PlayerSprite {
    pub const COLOR: Rgb = Rgb::from_hex(0xFF0000);
}

/// Closed set of everything the renderer can be asked to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldObject {
    Grass(GroundTile),
    Water(GroundTile),
    Tree(Tree),
    SmallGrass(SmallGrass),
    Rock(Rock),
    Building(Building),
    Player(PlayerSprite),
}

/// Discriminant of [`WorldObject`], for counting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Grass,
    Water,
    Tree,
    SmallGrass,
    Rock,
    Building,
    Player,
}

impl WorldObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            WorldObject::Grass(_) => ObjectKind::Grass,
            WorldObject::Water(_) => ObjectKind::Water,
            WorldObject::Tree(_) => ObjectKind::Tree,
            WorldObject::SmallGrass(_) => ObjectKind::SmallGrass,
            WorldObject::Rock(_) => ObjectKind::Rock,
            WorldObject::Building(_) => ObjectKind::Building,
            WorldObject::Player(_) => ObjectKind::Player,
        }
    }

    /// Anchor position. Trees report their pivot, everything else its origin.
    pub fn position(&self) -> WorldPos {
        match self {
            WorldObject::Grass(t) | WorldObject::Water(t) => t.pos,
            WorldObject::Tree(t) => t.pivot,
            WorldObject::SmallGrass(g) => g.pos,
            WorldObject::Rock(r) => r.pos,
            WorldObject::Building(b) => b.pos,
            WorldObject::Player(p) => p.pos,
        }
    }

    /// Depth key: larger paints later.
    pub fn z(&self) -> f64 {
        match self {
            WorldObject::Grass(t) | WorldObject::Water(t) => t.z,
            WorldObject::Tree(t) => t.z,
            WorldObject::SmallGrass(g) => g.z,
            WorldObject::Rock(r) => r.z,
            WorldObject::Building(b) => b.z,
            WorldObject::Player(p) => p.z,
        }
    }
}

/// Stable ascending-z sort, the order the host paints in.
pub fn depth_sorted(mut objects: Vec<WorldObject>) -> Vec<WorldObject> {
    objects.sort_by(|a, b| a.z().total_cmp(&b.z()));
    objects
}
