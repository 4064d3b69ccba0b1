//! Fixed wheel layout and the angle arithmetic mapping rotations to segments.

use std::fmt;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of sectors painted on the wheel.
pub const SEGMENT_COUNT: usize = 6;
/// Angular width of a single sector, in degrees.
pub const SEGMENT_ANGLE: f64 = 360.0 / SEGMENT_COUNT as f64;
/// Degrees in a full turn.
pub const FULL_TURN: f64 = 360.0;

/// The two labels a spin can end on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Black sector.
    Dark,
    /// White sector.
    Light,
}

impl Outcome {
    /// Parse the lowercase form accepted by the rig endpoints (`dark`, `light`).
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Outcome::Dark),
            "light" => Some(Outcome::Light),
            _ => None,
        }
    }

    /// Parse the uppercase label stored in the spin log (`DARK`, `LIGHT`).
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "DARK" => Some(Outcome::Dark),
            "LIGHT" => Some(Outcome::Light),
            _ => None,
        }
    }

    /// Lowercase wire form.
    pub fn as_wire(self) -> &'static str {
        match self {
            Outcome::Dark => "dark",
            Outcome::Light => "light",
        }
    }

    /// Uppercase label written to the log and shown to players.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Dark => "DARK",
            Outcome::Light => "LIGHT",
        }
    }

    /// Background and text colors used when announcing this outcome.
    pub fn colors(self) -> (&'static str, &'static str) {
        match self {
            Outcome::Dark => ("#000000", "#ffffff"),
            Outcome::Light => ("#ffffff", "#000000"),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One painted sector of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Label carried by the sector.
    pub outcome: Outcome,
    /// Sector fill.
    pub fill_color: &'static str,
    /// Label color.
    pub text_color: &'static str,
}

impl Segment {
    const fn new(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Dark => Self {
                outcome,
                fill_color: "#000000",
                text_color: "#ffffff",
            },
            Outcome::Light => Self {
                outcome,
                fill_color: "#ffffff",
                text_color: "#000000",
            },
        }
    }
}

/// Sectors in clockwise order starting at 0°.
pub const SEGMENTS: [Segment; SEGMENT_COUNT] = [
    Segment::new(Outcome::Dark),
    Segment::new(Outcome::Light),
    Segment::new(Outcome::Dark),
    Segment::new(Outcome::Light),
    Segment::new(Outcome::Dark),
    Segment::new(Outcome::Light),
];

/// Wrap an angle into `[0, 360)`.
pub fn normalize(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN { 0.0 } else { wrapped }
}

/// Index of the sector sitting under the pointer once the wheel rests at `angle`.
///
/// `index = floor(((360 - (angle mod 360)) mod 360) / 60)`
pub fn winning_index(angle: f64) -> usize {
    let under_pointer = normalize(FULL_TURN - normalize(angle));
    ((under_pointer / SEGMENT_ANGLE).floor() as usize).min(SEGMENT_COUNT - 1)
}

/// Resting angle (mod 360) that puts the center of sector `index` under the pointer.
pub fn resting_angle(index: usize) -> f64 {
    normalize(FULL_TURN - (index as f64 * SEGMENT_ANGLE + SEGMENT_ANGLE / 2.0))
}

/// Final rotation for a spin that reached `base` and must come to rest on `index`
/// after `extra_turns` more full turns.
pub fn target_angle(base: f64, index: usize, extra_turns: u32) -> f64 {
    let offset = normalize(resting_angle(index) - normalize(base));
    base + f64::from(extra_turns) * FULL_TURN + offset
}

/// Indices of every sector carrying `outcome`.
pub fn indices_for(outcome: Outcome) -> Vec<usize> {
    SEGMENTS
        .iter()
        .enumerate()
        .filter(|(_, segment)| segment.outcome == outcome)
        .map(|(index, _)| index)
        .collect()
}

/// Choose the sector a spin will land on: any sector matching the forced
/// outcome, or any sector at all when the spin is fair.
pub fn pick_segment<R: Rng>(forced: Option<Outcome>, rng: &mut R) -> usize {
    match forced {
        Some(outcome) => indices_for(outcome)
            .choose(rng)
            .copied()
            .unwrap_or_default(),
        None => rng.random_range(0..SEGMENT_COUNT),
    }
}
