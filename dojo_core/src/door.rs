//! Entry door torque puzzle
//!
//! Two sliders set force and distance; the door opens when their product lands
//! within tolerance of a hidden target drawn once per session.

use crate::config::DoorConstants;
use crate::timer::Delay;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Idle,
    /// Wrong torque; the door rattles by `offset` cells until the shake ends
    Shaking { offset: (i16, i16) },
    Open,
}

/// Result of a single push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Opened { torque: u32 },
    Shook { torque: u32 },
    AlreadyOpen,
}

/// Emitted by [`DoorPuzzle::tick`] once the open door should hand over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorSignal {
    Enter,
}

#[derive(Debug, Clone)]
pub struct DoorPuzzle {
    force: u32,
    distance: u32,
    target: u32,
    attempts: u32,
    state: DoorState,
    shake: Delay,
    open_delay: Delay,
    constants: DoorConstants,
}

impl DoorPuzzle {
    /// Start a puzzle with a target drawn from the configured range
    pub fn new(constants: &DoorConstants, rng: &mut impl Rng) -> Self {
        let target = rng.gen_range(constants.target_min..constants.target_max);
        Self::with_target(constants, target)
    }

    pub fn with_target(constants: &DoorConstants, target: u32) -> Self {
        DoorPuzzle {
            force: 0,
            distance: 0,
            target,
            attempts: 0,
            state: DoorState::Idle,
            shake: Delay::idle(),
            open_delay: Delay::idle(),
            constants: constants.clone(),
        }
    }

    pub fn force(&self) -> u32 {
        self.force
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DoorState::Open
    }

    pub fn slider_max(&self) -> u32 {
        self.constants.slider_max
    }

    pub fn torque(&self) -> u32 {
        self.force.saturating_mul(self.distance)
    }

    pub fn set_force(&mut self, force: u32) {
        if !self.is_open() {
            self.force = force.min(self.constants.slider_max);
        }
    }

    pub fn set_distance(&mut self, distance: u32) {
        if !self.is_open() {
            self.distance = distance.min(self.constants.slider_max);
        }
    }

    pub fn adjust_force(&mut self, delta: i32) {
        self.set_force(offset_slider(self.force, delta));
    }

    pub fn adjust_distance(&mut self, delta: i32) {
        self.set_distance(offset_slider(self.distance, delta));
    }

    pub fn push(&mut self, rng: &mut impl Rng) -> PushOutcome {
        if self.is_open() {
            return PushOutcome::AlreadyOpen;
        }

        self.attempts += 1;
        let torque = self.torque();
        tracing::debug!(
            attempt = self.attempts,
            force = self.force,
            distance = self.distance,
            torque,
            "door pushed"
        );

        if torque.abs_diff(self.target) <= self.constants.tolerance {
            self.state = DoorState::Open;
            self.shake.cancel();
            self.open_delay = Delay::start(self.constants.open_delay());
            tracing::info!(attempts = self.attempts, torque, "door opened");
            return PushOutcome::Opened { torque };
        }

        let amplitude = self.constants.shake_amplitude.max(0);
        let offset = (
            rng.gen_range(-amplitude..=amplitude),
            rng.gen_range(-amplitude..=amplitude),
        );
        self.state = DoorState::Shaking { offset };
        self.shake = Delay::start(self.constants.shake_duration());
        PushOutcome::Shook { torque }
    }

    /// Advance the shake and the hand-over delay
    pub fn tick(&mut self, dt: Duration) -> Option<DoorSignal> {
        if self.shake.advance(dt) {
            if let DoorState::Shaking { .. } = self.state {
                self.state = DoorState::Idle;
            }
        }

        if self.open_delay.advance(dt) {
            return Some(DoorSignal::Enter);
        }
        None
    }

    /// Disarm every pending timer
    pub fn cancel(&mut self) {
        self.shake.cancel();
        self.open_delay.cancel();
        if let DoorState::Shaking { .. } = self.state {
            self.state = DoorState::Idle;
        }
    }
}

fn offset_slider(value: u32, delta: i32) -> u32 {
    if delta.is_negative() {
        value.saturating_sub(delta.unsigned_abs())
    } else {
        value.saturating_add(delta as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn puzzle(target: u32) -> DoorPuzzle {
        DoorPuzzle::with_target(&DoorConstants::default(), target)
    }

    #[test]
    fn test_matching_torque_opens() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut door = puzzle(2500);
        door.set_force(50);
        door.set_distance(50);

        assert_eq!(door.push(&mut rng), PushOutcome::Opened { torque: 2500 });
        assert!(door.is_open());
        assert_eq!(door.attempts(), 1);
    }

    #[test]
    fn test_torque_within_tolerance_opens() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut door = puzzle(2502);
        door.set_force(50);
        door.set_distance(50);
        assert!(matches!(door.push(&mut rng), PushOutcome::Opened { .. }));

        let mut door = puzzle(2503);
        door.set_force(50);
        door.set_distance(50);
        assert!(matches!(door.push(&mut rng), PushOutcome::Shook { .. }));
    }

    #[test]
    fn test_wrong_torque_shakes_then_settles() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut door = puzzle(2500);
        door.set_force(10);
        door.set_distance(10);

        assert_eq!(door.push(&mut rng), PushOutcome::Shook { torque: 100 });
        match door.state() {
            DoorState::Shaking { offset } => {
                assert!(offset.0.abs() <= 3 && offset.1.abs() <= 3);
            }
            other => panic!("expected shaking, got {:?}", other),
        }

        assert_eq!(door.tick(Duration::from_millis(100)), None);
        assert!(matches!(door.state(), DoorState::Shaking { .. }));
        assert_eq!(door.tick(Duration::from_millis(100)), None);
        assert_eq!(door.state(), DoorState::Idle);
    }

    #[test]
    fn test_no_retry_limit() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut door = puzzle(2500);
        for _ in 0..50 {
            door.push(&mut rng);
        }
        assert_eq!(door.attempts(), 50);

        door.set_force(50);
        door.set_distance(50);
        assert!(matches!(door.push(&mut rng), PushOutcome::Opened { .. }));
    }

    #[test]
    fn test_open_signals_once_after_delay() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut door = puzzle(2500);
        door.set_force(50);
        door.set_distance(50);
        door.push(&mut rng);

        assert_eq!(door.tick(Duration::from_millis(900)), None);
        assert_eq!(door.tick(Duration::from_millis(100)), Some(DoorSignal::Enter));
        assert_eq!(door.tick(Duration::from_millis(1000)), None);
        assert_eq!(door.push(&mut rng), PushOutcome::AlreadyOpen);
        assert_eq!(door.attempts(), 1);
    }

    #[test]
    fn test_cancel_suppresses_signal() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut door = puzzle(2500);
        door.set_force(50);
        door.set_distance(50);
        door.push(&mut rng);

        door.cancel();
        assert_eq!(door.tick(Duration::from_secs(5)), None);
        assert!(door.is_open());
    }

    #[test]
    fn test_sliders_clamp_and_freeze() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut door = puzzle(2500);
        door.set_force(250);
        assert_eq!(door.force(), 100);
        door.adjust_force(-300);
        assert_eq!(door.force(), 0);
        door.adjust_distance(25);
        door.adjust_distance(25);
        assert_eq!(door.distance(), 50);

        door.set_force(50);
        door.push(&mut rng);
        door.set_force(10);
        assert_eq!(door.force(), 50);
    }

    #[test]
    fn test_random_target_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let door = DoorPuzzle::new(&DoorConstants::default(), &mut rng);
            assert!((1500..3500).contains(&door.target));
        }
    }

    #[test]
    fn test_torque_saturates() {
        let constants = DoorConstants {
            slider_max: u32::MAX,
            ..DoorConstants::default()
        };
        let mut door = DoorPuzzle::with_target(&constants, 2500);
        door.set_force(70_000);
        door.set_distance(70_000);
        assert_eq!(door.torque(), u32::MAX);
    }
}
