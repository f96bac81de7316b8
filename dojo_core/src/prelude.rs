//! Prelude module for convenient imports
//!
//! ```rust
//! use dojo_core::prelude::*;
//! ```

// Progression
pub use crate::progression::{CharacterStats, EXP_THRESHOLD};
pub use crate::types::{Point, SkillId};

// Screens
pub use crate::door::{DoorPuzzle, DoorSignal, DoorState, PushOutcome};
pub use crate::navigation::{Navigator, Route};
pub use crate::selection::{WarriorSelection, DECOYS, REAL_WARRIOR};
pub use crate::training::{
    CourseState, GameKind, ObstacleKind, SubmitOutcome, TrainingPhase, TrainingSession,
    TrainingSummary, WordList,
};

// Config
pub use crate::config::{default_skills, DojoConfig, SkillDef};
