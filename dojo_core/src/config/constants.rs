//! Dojo tunables

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// All tunable values for a DuskDojo session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DojoConfig {
    pub character: CharacterConstants,
    pub progression: ProgressionConstants,
    pub door: DoorConstants,
    pub typing: TypingConstants,
    pub obstacle: ObstacleConstants,
}

impl DojoConfig {
    /// Load and validate a config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: DojoConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a config string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: DojoConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The config file shipped with the crate
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse(include_str!("../../config/dojo.toml"))
    }

    /// Reject values that would stall timers or make ranges empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let door = &self.door;
        if door.target_min >= door.target_max {
            return Err(invalid(format!(
                "door.target_min ({}) must be below door.target_max ({})",
                door.target_min, door.target_max
            )));
        }
        if door.slider_max == 0 || door.slider_max > MAX_SLIDER {
            return Err(invalid(format!(
                "door.slider_max ({}) must be within 1..={}",
                door.slider_max, MAX_SLIDER
            )));
        }
        if door.shake_ms == 0 || door.open_delay_ms == 0 {
            return Err(invalid("door timers must be non-zero".to_string()));
        }

        let typing = &self.typing;
        if typing.duration_secs == 0 || typing.idle_secs == 0 {
            return Err(invalid("typing timers must be non-zero".to_string()));
        }
        if typing.pool_size == 0 {
            return Err(invalid("typing.pool_size must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&typing.confusing_chance) {
            return Err(invalid(format!(
                "typing.confusing_chance ({}) must be within [0, 1]",
                typing.confusing_chance
            )));
        }
        if typing.confusing_chance > 0.0 && typing.confusing_words.is_empty() {
            return Err(invalid(
                "typing.confusing_words is empty but confusing_chance is above zero".to_string(),
            ));
        }

        let obstacle = &self.obstacle;
        if obstacle.spawn_interval_ms == 0
            || obstacle.move_interval_ms == 0
            || obstacle.jump_duration_ms == 0
        {
            return Err(invalid("obstacle timers must be non-zero".to_string()));
        }
        if !(0.0..=1.0).contains(&obstacle.sample_point) {
            return Err(invalid(format!(
                "obstacle.sample_point ({}) must be within [0, 1]",
                obstacle.sample_point
            )));
        }
        for (name, value) in [
            ("jump_height_bonus", obstacle.jump_height_bonus),
            ("jump_duration_penalty", obstacle.jump_duration_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "obstacle.{} ({}) must be a non-negative number",
                    name, value
                )));
            }
        }
        if !obstacle.jump_peak.is_finite() || obstacle.jump_peak <= 0.0 {
            return Err(invalid(format!(
                "obstacle.jump_peak ({}) must be positive",
                obstacle.jump_peak
            )));
        }
        if obstacle.discard_x >= obstacle.spawn_x {
            return Err(invalid(
                "obstacle.discard_x must be below obstacle.spawn_x".to_string(),
            ));
        }

        Ok(())
    }
}

/// Largest slider value whose square still fits a `u32` torque
pub const MAX_SLIDER: u32 = u16::MAX as u32;

fn invalid(msg: String) -> ConfigError {
    ConfigError::ValidationError(msg)
}

/// Starting values for the protagonist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConstants {
    pub name: String,
    pub health: u32,
    pub attack: u32,
    pub agility: u32,
    pub defense: u32,
}

impl Default for CharacterConstants {
    fn default() -> Self {
        CharacterConstants {
            name: "Po".to_string(),
            health: 100,
            attack: 10,
            agility: 5,
            defense: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConstants {
    /// Experience granted for picking the real warrior
    pub selection_bonus: u32,
    /// Experience granted by a training that carries no score of its own
    pub default_training_reward: u32,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            selection_bonus: 50,
            default_training_reward: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConstants {
    /// Upper bound of both sliders
    pub slider_max: u32,
    /// Hidden target is drawn from [target_min, target_max)
    pub target_min: u32,
    pub target_max: u32,
    /// Allowed |torque - target|
    pub tolerance: u32,
    pub shake_ms: u64,
    /// Largest shake offset in cells
    pub shake_amplitude: i16,
    /// Pause between the door opening and moving on
    pub open_delay_ms: u64,
}

impl DoorConstants {
    pub fn shake_duration(&self) -> Duration {
        Duration::from_millis(self.shake_ms)
    }

    pub fn open_delay(&self) -> Duration {
        Duration::from_millis(self.open_delay_ms)
    }
}

impl Default for DoorConstants {
    fn default() -> Self {
        DoorConstants {
            slider_max: 100,
            target_min: 1500,
            target_max: 3500,
            tolerance: 2,
            shake_ms: 200,
            shake_amplitude: 3,
            open_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConstants {
    pub duration_secs: u32,
    /// Seconds without a keystroke before input is suspended
    pub idle_secs: u32,
    /// Number of target words per session
    pub pool_size: usize,
    /// Chance that a slot holds a confusing word instead of a real one
    pub confusing_chance: f64,
    pub confusing_words: Vec<String>,
    /// Points to tap before input resumes
    pub mantra_points: usize,
    pub exp_per_word: u32,
    /// Word file; the built-in list is used when unset
    pub words_path: Option<PathBuf>,
}

impl Default for TypingConstants {
    fn default() -> Self {
        TypingConstants {
            duration_secs: 60,
            idle_secs: 5,
            pool_size: 15,
            confusing_chance: 0.25,
            confusing_words: ["xzkd", "pqvw", "jxmn", "bfhp", "zqkl"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            mantra_points: 4,
            exp_per_word: 2,
            words_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConstants {
    pub spawn_interval_ms: u64,
    pub move_interval_ms: u64,
    /// Distance an obstacle travels per move
    pub step: f64,
    pub spawn_x: f64,
    /// Obstacles at or below this x are dropped
    pub discard_x: f64,
    pub player_x: f64,
    /// Obstacles with |x - player_x| < hit_band are tested at the sample point
    pub hit_band: f64,
    pub jump_duration_ms: u64,
    pub jump_peak: f64,
    /// Fraction of the jump at which clearance is tested
    pub sample_point: f64,
    pub low_clearance: f64,
    pub high_clearance: f64,
    pub clears_to_win: u32,
    /// Peak multiplier per jumpHeight level
    pub jump_height_bonus: f64,
    /// Duration multiplier per jumpHeight level
    pub jump_duration_penalty: f64,
}

impl ObstacleConstants {
    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }
}

impl Default for ObstacleConstants {
    fn default() -> Self {
        ObstacleConstants {
            spawn_interval_ms: 800,
            move_interval_ms: 30,
            step: 5.0,
            spawn_x: 100.0,
            discard_x: -50.0,
            player_x: 50.0,
            hit_band: 20.0,
            jump_duration_ms: 600,
            jump_peak: 125.0,
            sample_point: 0.45,
            low_clearance: 50.0,
            high_clearance: 120.0,
            clears_to_win: 10,
            jump_height_bonus: 0.30,
            jump_duration_penalty: 0.50,
        }
    }
}
