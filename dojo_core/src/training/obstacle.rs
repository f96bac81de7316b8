//! Obstacle jumping mini-game
//!
//! Obstacles slide toward the player on a fixed cadence. A jump follows a
//! symmetric quadratic arc, and clearance is tested once near the peak against
//! every obstacle inside the hit band.

use crate::config::ObstacleConstants;
use crate::timer::IntervalTimer;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Low,
    High,
}

impl ObstacleKind {
    /// Minimum jump height that clears this obstacle
    pub fn clearance(self, constants: &ObstacleConstants) -> f64 {
        match self {
            ObstacleKind::Low => constants.low_clearance,
            ObstacleKind::High => constants.high_clearance,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u64,
    pub x: f64,
    pub kind: ObstacleKind,
    pub cleared: bool,
}

impl Obstacle {
    /// Fade applied as the obstacle approaches the left edge
    pub fn opacity(&self) -> f64 {
        if self.x > 30.0 {
            1.0
        } else if self.x > 10.0 {
            0.3
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Jump {
    elapsed: Duration,
    duration: Duration,
    peak: f64,
    sampled: bool,
}

impl Jump {
    fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CourseState {
    Running,
    Failed { kind: ObstacleKind, height: f64 },
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CourseEvent {
    Spawned(ObstacleKind),
    /// A jump sampled its height; `clears` obstacles were passed
    Landed { height: f64, clears: u32 },
    /// Obstacles reached the player while it was high enough
    Vaulted { height: f64, clears: u32 },
    Failed { kind: ObstacleKind, height: f64 },
    Completed,
}

/// Height of a jump arc at `progress` in [0, 1]: ease-out to the peak at 0.5,
/// then ease-in back to the ground
pub fn arc_height(progress: f64, peak: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let u = if p < 0.5 { 1.0 - 2.0 * p } else { 2.0 * p - 1.0 };
    peak * (1.0 - u * u)
}

#[derive(Debug, Clone)]
pub struct ObstacleCourse {
    obstacles: Vec<Obstacle>,
    jump: Option<Jump>,
    clears: u32,
    state: CourseState,
    spawner: IntervalTimer,
    mover: IntervalTimer,
    next_id: u64,
    jump_peak: f64,
    jump_duration: Duration,
    constants: ObstacleConstants,
}

impl ObstacleCourse {
    /// Start a course for a character with the given jumpHeight level
    pub fn new(constants: &ObstacleConstants, jump_level: u32) -> Self {
        let level = jump_level as f64;
        let jump_peak = constants.jump_peak * (1.0 + constants.jump_height_bonus * level);
        let base = Duration::from_millis(constants.jump_duration_ms);
        // Unvalidated constants keep the base duration rather than overflow
        let factor = 1.0 + constants.jump_duration_penalty * level;
        let jump_duration = Duration::try_from_secs_f64(base.as_secs_f64() * factor).unwrap_or(base);

        ObstacleCourse {
            obstacles: Vec::new(),
            jump: None,
            clears: 0,
            state: CourseState::Running,
            spawner: IntervalTimer::new(constants.spawn_interval()),
            mover: IntervalTimer::new(constants.move_interval()),
            next_id: 0,
            jump_peak,
            jump_duration,
            constants: constants.clone(),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn clears(&self) -> u32 {
        self.clears
    }

    pub fn clears_to_win(&self) -> u32 {
        self.constants.clears_to_win
    }

    pub fn state(&self) -> CourseState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CourseState::Running
    }

    pub fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    pub fn jump_peak(&self) -> f64 {
        self.jump_peak
    }

    pub fn jump_duration(&self) -> Duration {
        self.jump_duration
    }

    pub fn player_x(&self) -> f64 {
        self.constants.player_x
    }

    /// Current height of the player above the ground
    pub fn player_height(&self) -> f64 {
        self.jump
            .map(|jump| arc_height(jump.progress(), jump.peak))
            .unwrap_or(0.0)
    }

    /// Place an obstacle at `x`
    pub fn spawn(&mut self, kind: ObstacleKind, x: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x,
            kind,
            cleared: false,
        });
        id
    }

    /// Start a jump; rejected mid-air or once the course is over
    pub fn jump(&mut self) -> bool {
        if !self.is_running() || self.jump.is_some() {
            return false;
        }

        self.jump = Some(Jump {
            elapsed: Duration::ZERO,
            duration: self.jump_duration,
            peak: self.jump_peak,
            sampled: false,
        });
        true
    }

    pub fn tick(&mut self, dt: Duration, rng: &mut impl Rng) -> Vec<CourseEvent> {
        let mut events = Vec::new();
        if !self.is_running() {
            return events;
        }

        for _ in 0..self.spawner.advance(dt) {
            let kind = if rng.gen_bool(0.5) {
                ObstacleKind::High
            } else {
                ObstacleKind::Low
            };
            self.spawn(kind, self.constants.spawn_x);
            events.push(CourseEvent::Spawned(kind));
        }

        let moves = self.mover.advance(dt);
        let mut crossed = Vec::new();
        if moves > 0 {
            let shift = self.constants.step * moves as f64;
            let player_x = self.constants.player_x;
            for obstacle in &mut self.obstacles {
                let before = obstacle.x;
                obstacle.x -= shift;
                if before > player_x && obstacle.x <= player_x {
                    crossed.push(obstacle.id);
                }
            }
        }

        if let Some(mut jump) = self.jump.take() {
            jump.elapsed += dt;
            let progress = jump.progress();

            if !jump.sampled && progress >= self.constants.sample_point {
                jump.sampled = true;
                let height = arc_height(self.constants.sample_point, jump.peak);
                events.extend(self.check_clearance(height));
            }

            if progress < 1.0 && self.is_running() {
                self.jump = Some(jump);
            }
        }

        if !crossed.is_empty() {
            events.extend(self.check_crossing(&crossed));
        }

        let discard_x = self.constants.discard_x;
        self.obstacles.retain(|o| o.x > discard_x);

        events
    }

    /// Test every uncleared obstacle inside the hit band against `height`
    pub fn check_clearance(&mut self, height: f64) -> Vec<CourseEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let player_x = self.constants.player_x;
        let band = self.constants.hit_band;
        let in_band = |o: &Obstacle| !o.cleared && (o.x - player_x).abs() < band;

        let hit = self
            .obstacles
            .iter()
            .filter(|o| in_band(*o))
            .find(|o| height < o.kind.clearance(&self.constants))
            .map(|o| o.kind);

        if let Some(kind) = hit {
            return self.fail(kind, height);
        }

        let mut clears = 0;
        for obstacle in self.obstacles.iter_mut().filter(|o| in_band(&**o)) {
            obstacle.cleared = true;
            clears += 1;
        }

        let mut events = vec![CourseEvent::Landed { height, clears }];
        self.add_clears(clears, &mut events);
        events
    }

    /// Uncleared obstacles that just reached the player meet its current
    /// height: below their clearance is a hit, above it is a clear
    fn check_crossing(&mut self, crossed: &[u64]) -> Vec<CourseEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let height = self.player_height();
        let arriving = |o: &Obstacle| !o.cleared && crossed.contains(&o.id);

        let hit = self
            .obstacles
            .iter()
            .filter(|o| arriving(*o))
            .find(|o| height < o.kind.clearance(&self.constants))
            .map(|o| o.kind);

        if let Some(kind) = hit {
            return self.fail(kind, height);
        }

        let mut clears = 0;
        for obstacle in self.obstacles.iter_mut().filter(|o| arriving(&**o)) {
            obstacle.cleared = true;
            clears += 1;
        }

        let mut events = Vec::new();
        if clears > 0 {
            events.push(CourseEvent::Vaulted { height, clears });
            self.add_clears(clears, &mut events);
        }
        events
    }

    fn fail(&mut self, kind: ObstacleKind, height: f64) -> Vec<CourseEvent> {
        self.state = CourseState::Failed { kind, height };
        self.jump = None;
        self.stop_timers();
        tracing::info!(?kind, height, clears = self.clears, "hit by obstacle");
        vec![CourseEvent::Failed { kind, height }]
    }

    fn add_clears(&mut self, clears: u32, events: &mut Vec<CourseEvent>) {
        self.clears += clears;
        if self.clears >= self.constants.clears_to_win {
            self.state = CourseState::Cleared;
            self.stop_timers();
            tracing::info!(clears = self.clears, "obstacle course cleared");
            events.push(CourseEvent::Completed);
        }
    }

    fn stop_timers(&mut self) {
        self.spawner.cancel();
        self.mover.cancel();
    }

    /// Stop spawning and moving
    pub fn cancel(&mut self) {
        self.stop_timers();
        self.jump = None;
    }

    pub fn timers_running(&self) -> bool {
        self.spawner.is_running() || self.mover.is_running()
    }
}
