//! Screen routing with gated transitions

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Entry,
    Selection,
    Training,
    Skills,
    Dashboard,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[
            Route::Entry,
            Route::Selection,
            Route::Training,
            Route::Skills,
            Route::Dashboard,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Entry => "Gate",
            Route::Selection => "Warriors",
            Route::Training => "Training",
            Route::Skills => "Skill Tree",
            Route::Dashboard => "Progress",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Selection => "/warrior-selection",
            Route::Training => "/training",
            Route::Skills => "/skills",
            Route::Dashboard => "/progress",
        }
    }

    /// Routes reachable from here by a user action
    fn links(&self) -> &'static [Route] {
        match self {
            Route::Entry => &[Route::Selection],
            Route::Selection => &[Route::Training],
            Route::Training => &[Route::Skills, Route::Dashboard],
            Route::Skills => &[Route::Training, Route::Dashboard],
            Route::Dashboard => &[Route::Skills],
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("no link from {from:?} to {to:?}")]
    NoLink { from: Route, to: Route },
    #[error("the door is still shut")]
    DoorShut,
    #[error("no warrior has been chosen yet")]
    NoWarrior,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: Route,
    entry_unlocked: bool,
    warrior_chosen: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            current: Route::Entry,
            entry_unlocked: false,
            warrior_chosen: false,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// The door puzzle was solved
    pub fn unlock_entry(&mut self) {
        self.entry_unlocked = true;
    }

    pub fn mark_warrior_chosen(&mut self) {
        self.warrior_chosen = true;
    }

    pub fn can_navigate(&self, to: Route) -> Result<(), NavigationError> {
        let from = self.current;
        if !from.links().contains(&to) {
            return Err(NavigationError::NoLink { from, to });
        }
        if from == Route::Entry && !self.entry_unlocked {
            return Err(NavigationError::DoorShut);
        }
        if to != Route::Selection && !self.warrior_chosen {
            return Err(NavigationError::NoWarrior);
        }
        Ok(())
    }

    /// Move to `to`, returning the route that was left
    pub fn navigate(&mut self, to: Route) -> Result<Route, NavigationError> {
        self.can_navigate(to)?;
        let from = self.current;
        self.current = to;
        tracing::debug!(from = from.path(), to = to.path(), "navigated");
        Ok(from)
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
