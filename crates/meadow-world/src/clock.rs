//! In-game time of day, advanced once per tick.
//!
//! The world only supplies the numbers; tinting the frame is up to the host.

use meadow_core::constants::{DEFAULT_DAY_LENGTH_TICKS, DEFAULT_START_HOUR, NIGHT_DAYLIGHT};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DayPhase {
    /// 05:00–07:00
    Dawn,
    /// 07:00–17:00
    Day,
    /// 17:00–19:00
    Dusk,
    /// 19:00–05:00
    Night,
}

impl DayPhase {
    pub fn from_hour(hour: f32) -> Self {
        if (5.0..7.0).contains(&hour) {
            DayPhase::Dawn
        } else if (7.0..17.0).contains(&hour) {
            DayPhase::Day
        } else if (17.0..19.0).contains(&hour) {
            DayPhase::Dusk
        } else {
            DayPhase::Night
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayClock {
    tick: u64,
    day_length_ticks: u32,
    start_hour: f32,
}

impl Default for DayClock {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_LENGTH_TICKS, DEFAULT_START_HOUR)
    }
}

impl DayClock {
    /// `day_length_ticks` of zero is treated as one.
    pub fn new(day_length_ticks: u32, start_hour: f32) -> Self {
        Self {
            tick: 0,
            day_length_ticks: day_length_ticks.max(1),
            start_hour: start_hour.rem_euclid(24.0),
        }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn day_length_ticks(&self) -> u32 {
        self.day_length_ticks
    }

    /// Completed days since the clock started.
    pub fn day(&self) -> u64 {
        let len = self.day_length_ticks as f64;
        ((self.start_offset_ticks() + self.tick as f64) / len).floor() as u64
    }

    /// Fraction of the day elapsed, in [0, 1). Midnight is 0.
    pub fn time_of_day(&self) -> f32 {
        (self.ticks_into_day() / self.day_length_ticks as f64) as f32 % 1.0
    }

    /// Hour of day in [0, 24).
    pub fn hour(&self) -> f32 {
        (self.ticks_into_day() * 24.0 / self.day_length_ticks as f64) as f32 % 24.0
    }

    pub fn phase(&self) -> DayPhase {
        DayPhase::from_hour(self.hour())
    }

    /// Light level in [NIGHT_DAYLIGHT, 1.0]: full by day, dim at night, and a
    /// linear ramp across dawn and dusk.
    pub fn daylight(&self) -> f32 {
        let hour = self.hour();
        match DayPhase::from_hour(hour) {
            DayPhase::Day => 1.0,
            DayPhase::Night => NIGHT_DAYLIGHT,
            DayPhase::Dawn => lerp(NIGHT_DAYLIGHT, 1.0, (hour - 5.0) / 2.0),
            DayPhase::Dusk => lerp(1.0, NIGHT_DAYLIGHT, (hour - 17.0) / 2.0),
        }
    }

    fn start_offset_ticks(&self) -> f64 {
        self.start_hour as f64 * self.day_length_ticks as f64 / 24.0
    }

    fn ticks_into_day(&self) -> f64 {
        let len = self.day_length_ticks as f64;
        (self.start_offset_ticks() + self.tick as f64).rem_euclid(len)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
