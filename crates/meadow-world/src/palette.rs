//! Colour draws and fixed building palettes.
//!
//! Each routine consumes a fixed number of draws from the stream:
//! grass 3, water 3, tree 4 (season + 3), rock 1, small grass 3.

use meadow_core::{Lcg, Rgb};

pub const BUILDING_BODY_COLORS: [Rgb; 7] = [
    Rgb::from_hex(0x8B4513),
    Rgb::from_hex(0xA0522D),
    Rgb::from_hex(0xCD853F),
    Rgb::from_hex(0xD2691E),
    Rgb::from_hex(0xB22222),
    Rgb::from_hex(0x8B0000),
    Rgb::from_hex(0x4B0082),
];

pub const BUILDING_WINDOW_COLORS: [Rgb; 5] = [
    Rgb::from_hex(0x87CEEB),
    Rgb::from_hex(0xADD8E6),
    Rgb::from_hex(0xB0E0E6),
    Rgb::from_hex(0xAFEEEE),
    Rgb::from_hex(0xF0FFFF),
];

pub const BUILDING_DOOR_COLORS: [Rgb; 5] = [
    Rgb::from_hex(0x8B4513),
    Rgb::from_hex(0xA52A2A),
    Rgb::from_hex(0x800000),
    Rgb::from_hex(0x4B0082),
    Rgb::from_hex(0x2F4F4F),
];

/// Foliage season picked by the first draw of [`tree_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    /// 70%: spring/summer greens.
    Green,
    /// 20%: autumn reds and oranges.
    Fall,
    /// 10%: cool blue-green.
    Cool,
}

impl Season {
    fn from_draw(draw: f64) -> Self {
        if draw < 0.7 {
            Season::Green
        } else if draw < 0.9 {
            Season::Fall
        } else {
            Season::Cool
        }
    }
}

fn channel(rng: &mut Lcg, lo: f64, span: f64) -> u8 {
    rng.range(lo, span).floor() as u8
}

fn rgb_in(rng: &mut Lcg, r: (f64, f64), g: (f64, f64), b: (f64, f64)) -> Rgb {
    let r = channel(rng, r.0, r.1);
    let g = channel(rng, g.0, g.1);
    let b = channel(rng, b.0, b.1);
    Rgb::new(r, g, b)
}

pub fn grass_color(rng: &mut Lcg) -> Rgb {
    rgb_in(rng, (60.0, 15.0), (160.0, 25.0), (60.0, 15.0))
}

pub fn water_color(rng: &mut Lcg) -> Rgb {
    rgb_in(rng, (10.0, 20.0), (90.0, 40.0), (170.0, 50.0))
}

pub fn tree_color(rng: &mut Lcg) -> Rgb {
    match Season::from_draw(rng.next_f64()) {
        Season::Green => rgb_in(rng, (20.0, 40.0), (100.0, 80.0), (20.0, 40.0)),
        Season::Fall => rgb_in(rng, (150.0, 100.0), (50.0, 100.0), (10.0, 40.0)),
        Season::Cool => rgb_in(rng, (20.0, 40.0), (80.0, 60.0), (80.0, 100.0)),
    }
}

pub fn rock_color(rng: &mut Lcg) -> Rgb {
    Rgb::grey(channel(rng, 100.0, 80.0))
}

pub fn small_grass_color(rng: &mut Lcg) -> Rgb {
    rgb_in(rng, (40.0, 30.0), (120.0, 40.0), (30.0, 30.0))
}
