//! dojo_core - Game rules behind DuskDojo
//!
//! This library provides:
//! - CharacterStats: experience, skill points and skill levels
//! - DoorPuzzle: the torque gate in front of the dojo
//! - WarriorSelection: decoy warriors and the one real choice
//! - TrainingSession: typing and obstacle mini-games and their rewards
//! - Navigator: which screen may follow which

pub mod config;
pub mod door;
pub mod effects;
pub mod navigation;
pub mod prelude;
pub mod progression;
pub mod selection;
pub mod timer;
pub mod training;
pub mod types;

// Re-export core types for convenience
pub use config::{default_skills, ConfigError, DojoConfig, SkillDef};
pub use door::{DoorPuzzle, DoorSignal, DoorState, PushOutcome};
pub use navigation::{NavigationError, Navigator, Route};
pub use progression::{CharacterStats, ExperienceGain, EXP_THRESHOLD};
pub use selection::{Rejection, SelectionError, SelectionPhase, Warrior, WarriorSelection};
pub use training::{
    GameKind, ObstacleCourse, TrainingPhase, TrainingSession, TrainingSummary, TypingGame,
    WordList, WordListError,
};
pub use types::{Point, SkillId};
