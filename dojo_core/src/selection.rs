//! Warrior selection
//!
//! Every listed warrior is already taken. Once each decoy has been tried the
//! one real option appears and can be picked exactly once.

use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warrior {
    pub id: u32,
    pub name: &'static str,
    pub display_name: &'static str,
}

pub const DECOYS: [Warrior; 5] = [
    Warrior { id: 1, name: "furious-tiger", display_name: "Option 1" },
    Warrior { id: 2, name: "sneaky-crane", display_name: "Option 2" },
    Warrior { id: 3, name: "mighty-serpent", display_name: "Option 3" },
    Warrior { id: 4, name: "noble-mantis", display_name: "Option 4" },
    Warrior { id: 5, name: "graceful-monkey", display_name: "Option 5" },
];

pub const REAL_WARRIOR: Warrior = Warrior {
    id: 0,
    name: "po",
    display_name: "Po",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Choosing,
    /// Every decoy tried; the rejection notice may still be up
    AllAttempted,
    RealOptionOffered,
}

/// Shown after a decoy is picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub warrior: Warrior,
    pub message: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no decoy warrior with id {0}")]
    UnknownWarrior(u32),
    #[error("the real warrior is hidden until every option has been tried")]
    NotYetAvailable,
    #[error("the real warrior has already been chosen")]
    AlreadyChosen,
}

#[derive(Debug, Clone, Default)]
pub struct WarriorSelection {
    attempted: BTreeSet<u32>,
    notice: Option<Rejection>,
    revealed: bool,
    chosen: bool,
}

impl WarriorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decoys(&self) -> &'static [Warrior] {
        &DECOYS
    }

    pub fn phase(&self) -> SelectionPhase {
        if self.revealed {
            SelectionPhase::RealOptionOffered
        } else if self.all_attempted() {
            SelectionPhase::AllAttempted
        } else {
            SelectionPhase::Choosing
        }
    }

    pub fn is_attempted(&self, id: u32) -> bool {
        self.attempted.contains(&id)
    }

    pub fn attempted_count(&self) -> usize {
        self.attempted.len()
    }

    pub fn all_attempted(&self) -> bool {
        self.attempted.len() == DECOYS.len()
    }

    /// The real warrior can be picked
    pub fn is_real_option_available(&self) -> bool {
        self.all_attempted() && !self.chosen
    }

    pub fn is_chosen(&self) -> bool {
        self.chosen
    }

    pub fn notice(&self) -> Option<&Rejection> {
        self.notice.as_ref()
    }

    /// Try a decoy. Repeats are harmless and show the notice again.
    pub fn attempt(&mut self, id: u32) -> Result<&Rejection, SelectionError> {
        let warrior = DECOYS
            .iter()
            .find(|w| w.id == id)
            .copied()
            .ok_or(SelectionError::UnknownWarrior(id))?;

        if self.attempted.insert(id) {
            tracing::debug!(warrior = warrior.name, tried = self.attempted.len(), "decoy tried");
        }

        let message = format!(
            "\"{}\" is already taken by another student!",
            warrior.display_name
        );
        Ok(self.notice.insert(Rejection { warrior, message }))
    }

    /// Close the notice; after the last decoy this reveals the real option
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        if self.all_attempted() {
            self.revealed = true;
        }
    }

    pub fn select_real(&mut self) -> Result<Warrior, SelectionError> {
        if self.chosen {
            return Err(SelectionError::AlreadyChosen);
        }
        if !self.all_attempted() {
            return Err(SelectionError::NotYetAvailable);
        }

        self.chosen = true;
        self.revealed = true;
        self.notice = None;
        tracing::info!(warrior = REAL_WARRIOR.name, "warrior chosen");
        Ok(REAL_WARRIOR)
    }
}
