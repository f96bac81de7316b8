//! Typing mini-game
//!
//! A timed run through a queue of target words. A wrong entry makes the current
//! target one letter longer instead of being rejected. Going quiet for too long
//! suspends input until every mantra point is tapped.

use crate::config::TypingConstants;
use crate::timer::IntervalTimer;
use rand::Rng;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MantraPoint {
    pub id: usize,
    pub active: bool,
}

/// Result of submitting the current input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct { word: String },
    /// Mismatch; the target grew to `word`
    Extended { word: String },
    /// Empty input, suspended or finished game
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingEvent {
    WentIdle,
    TimeUp,
}

#[derive(Debug, Clone)]
pub struct TypingGame {
    words: Vec<String>,
    index: usize,
    input: String,
    correct: u32,
    remaining_secs: u32,
    idle_secs: u32,
    idle_limit: u32,
    idle: bool,
    mantra: Vec<MantraPoint>,
    clock: IntervalTimer,
    finished: bool,
    exp_per_word: u32,
}

impl TypingGame {
    pub fn new(words: Vec<String>, constants: &TypingConstants) -> Self {
        let finished = words.is_empty();
        TypingGame {
            words,
            index: 0,
            input: String::new(),
            correct: 0,
            remaining_secs: constants.duration_secs,
            idle_secs: 0,
            idle_limit: constants.idle_secs,
            idle: false,
            mantra: (1..=constants.mantra_points)
                .map(|id| MantraPoint { id, active: false })
                .collect(),
            clock: IntervalTimer::new(Duration::from_secs(1)),
            finished,
            exp_per_word: constants.exp_per_word,
        }
    }

    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.index).map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn idle_secs(&self) -> u32 {
        self.idle_secs
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn mantra_points(&self) -> &[MantraPoint] {
        &self.mantra
    }

    /// Experience this run is worth
    pub fn reward(&self) -> u32 {
        self.correct.saturating_mul(self.exp_per_word)
    }

    fn accepts_input(&self) -> bool {
        !self.finished && !self.idle
    }

    pub fn type_char(&mut self, c: char) {
        if self.accepts_input() {
            self.idle_secs = 0;
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.accepts_input() {
            self.idle_secs = 0;
            self.input.pop();
        }
    }

    /// Compare the input with the current target
    pub fn submit(&mut self, rng: &mut impl Rng) -> SubmitOutcome {
        if !self.accepts_input() {
            return SubmitOutcome::Ignored;
        }
        self.idle_secs = 0;

        let entry = self.input.trim().to_lowercase();
        if entry.is_empty() {
            self.input.clear();
            return SubmitOutcome::Ignored;
        }
        self.input.clear();

        let Some(target) = self.words.get_mut(self.index) else {
            return SubmitOutcome::Ignored;
        };

        if entry == *target {
            let word = target.clone();
            self.correct += 1;
            self.index += 1;
            tracing::debug!(word = %word, correct = self.correct, "word typed");
            if self.index >= self.words.len() {
                self.finish();
            }
            SubmitOutcome::Correct { word }
        } else {
            target.push(rng.gen_range(b'a'..=b'z') as char);
            tracing::debug!(entry = %entry, target = %target, "word extended");
            SubmitOutcome::Extended {
                word: target.clone(),
            }
        }
    }

    /// Tap a mantra point while suspended; input resumes once all are tapped
    pub fn tap_mantra(&mut self, id: usize) -> bool {
        if !self.idle || self.finished {
            return false;
        }

        let Some(point) = self.mantra.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        point.active = true;

        if self.mantra.iter().all(|p| p.active) {
            self.idle = false;
            self.idle_secs = 0;
            for point in &mut self.mantra {
                point.active = false;
            }
            tracing::debug!("typing resumed");
        }
        true
    }

    /// Run the countdown and the inactivity watchdog
    pub fn tick(&mut self, dt: Duration) -> Vec<TypingEvent> {
        let mut events = Vec::new();
        for _ in 0..self.clock.advance(dt) {
            if self.finished {
                break;
            }

            self.remaining_secs = self.remaining_secs.saturating_sub(1);
            if self.remaining_secs == 0 {
                self.finish();
                events.push(TypingEvent::TimeUp);
                break;
            }

            self.idle_secs += 1;
            if !self.idle && self.idle_secs >= self.idle_limit {
                self.idle = true;
                events.push(TypingEvent::WentIdle);
            }
        }
        events
    }

    fn finish(&mut self) {
        self.finished = true;
        self.clock.cancel();
        tracing::info!(correct = self.correct, "typing game finished");
    }

    /// Stop the clock without scoring
    pub fn cancel(&mut self) {
        self.clock.cancel();
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game(words: &[&str]) -> TypingGame {
        let words = words.iter().map(|w| w.to_string()).collect();
        TypingGame::new(words, &TypingConstants::default())
    }

    fn type_str(game: &mut TypingGame, s: &str) {
        for c in s.chars() {
            game.type_char(c);
        }
    }

    #[test]
    fn test_correct_word_advances() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = game(&["dojo", "panda"]);
        type_str(&mut game, "dojo");

        let outcome = game.submit(&mut rng);

        assert_eq!(outcome, SubmitOutcome::Correct { word: "dojo".to_string() });
        assert_eq!(game.correct(), 1);
        assert_eq!(game.index(), 1);
        assert_eq!(game.input(), "");
        assert_eq!(game.current_word(), Some("panda"));
    }

    #[test]
    fn test_match_is_case_and_space_insensitive() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = game(&["dojo", "panda"]);
        type_str(&mut game, " DoJo ");

        assert!(matches!(game.submit(&mut rng), SubmitOutcome::Correct { .. }));
    }

    #[test]
    fn test_mistake_extends_target() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = game(&["dojo", "panda"]);
        type_str(&mut game, "doj");

        let outcome = game.submit(&mut rng);

        let word = game.current_word().unwrap().to_string();
        assert_eq!(outcome, SubmitOutcome::Extended { word: word.clone() });
        assert_eq!(word.len(), 5);
        assert!(word.starts_with("dojo"));
        assert!(word.chars().last().unwrap().is_ascii_lowercase());
        assert_eq!(game.correct(), 0);
        assert_eq!(game.index(), 0);
        assert_eq!(game.input(), "");
    }

    #[test]
    fn test_empty_submit_ignored() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = game(&["dojo"]);
        type_str(&mut game, "   ");

        assert_eq!(game.submit(&mut rng), SubmitOutcome::Ignored);
        assert_eq!(game.current_word(), Some("dojo"));
    }

    #[test]
    fn test_backspace() {
        let mut game = game(&["dojo"]);
        type_str(&mut game, "dojx");
        game.backspace();
        assert_eq!(game.input(), "doj");
    }

    #[test]
    fn test_time_up_after_duration() {
        let mut game = game(&["dojo"]);
        for _ in 0..59 {
            type_str(&mut game, "d");
            game.backspace();
            assert!(game.tick(Duration::from_secs(1)).is_empty());
        }
        assert_eq!(game.remaining_secs(), 1);

        assert_eq!(game.tick(Duration::from_secs(1)), vec![TypingEvent::TimeUp]);
        assert!(game.is_finished());
        assert!(!game.is_clock_running());
        assert_eq!(game.remaining_secs(), 0);
    }

    #[test]
    fn test_idle_suspends_until_mantra_tapped() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = game(&["dojo"]);

        assert!(game.tick(Duration::from_secs(4)).is_empty());
        assert_eq!(game.tick(Duration::from_secs(1)), vec![TypingEvent::WentIdle]);
        assert!(game.is_idle());

        type_str(&mut game, "dojo");
        assert_eq!(game.input(), "");
        assert_eq!(game.submit(&mut rng), SubmitOutcome::Ignored);

        assert!(game.tap_mantra(1));
        assert!(game.tap_mantra(2));
        assert!(game.tap_mantra(3));
        assert!(game.is_idle());
        assert!(!game.tap_mantra(9));
        assert!(game.tap_mantra(4));

        assert!(!game.is_idle());
        assert_eq!(game.idle_secs(), 0);
        assert!(game.mantra_points().iter().all(|p| !p.active));

        type_str(&mut game, "dojo");
        assert!(matches!(game.submit(&mut rng), SubmitOutcome::Correct { .. }));
    }

    #[test]
    fn test_mantra_ignored_when_awake() {
        let mut game = game(&["dojo"]);
        assert!(!game.tap_mantra(1));
        assert!(game.mantra_points().iter().all(|p| !p.active));
    }

    #[test]
    fn test_keystrokes_reset_idle_counter() {
        let mut game = game(&["dojo"]);
        for _ in 0..10 {
            game.tick(Duration::from_secs(3));
            game.type_char('d');
        }
        assert!(!game.is_idle());
    }

    #[test]
    fn test_exhausted_queue_finishes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut game = game(&["dojo"]);
        type_str(&mut game, "dojo");
        game.submit(&mut rng);

        assert!(game.is_finished());
        assert_eq!(game.reward(), 2);
        type_str(&mut game, "more");
        assert_eq!(game.input(), "");
    }

    #[test]
    fn test_cancel_stops_clock() {
        let mut game = game(&["dojo"]);
        game.cancel();
        assert!(game.tick(Duration::from_secs(120)).is_empty());
        assert_eq!(game.remaining_secs(), 60);
    }
}
