//! Core types shared across screens

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier for a character skill.
///
/// Any string is accepted; the known ids are listed in [`SkillId::STARTING`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub String);

impl SkillId {
    pub const JUMP_HEIGHT: &'static str = "jumpHeight";
    pub const PUNCH_POWER: &'static str = "punchPower";
    pub const DODGE_CHANCE: &'static str = "dodgeChance";
    pub const INNER_PEACE: &'static str = "innerPeace";
    pub const FOCUSED_MIND: &'static str = "focusedMind";

    /// Skills every new character starts with at level 0
    pub const STARTING: [&'static str; 5] = [
        Self::JUMP_HEIGHT,
        Self::PUNCH_POWER,
        Self::DODGE_CHANCE,
        Self::INNER_PEACE,
        Self::FOCUSED_MIND,
    ];

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SkillId {
    fn from(s: &str) -> Self {
        SkillId(s.to_string())
    }
}

impl From<String> for SkillId {
    fn from(s: String) -> Self {
        SkillId(s)
    }
}

impl Borrow<str> for SkillId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A point in the unit-less plane used by pointer effects
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}
