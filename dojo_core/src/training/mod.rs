//! Training hall: picks a mini-game, runs it, and pays out the reward

mod obstacle;
mod typing;
mod words;

pub use obstacle::{arc_height, CourseEvent, CourseState, Obstacle, ObstacleCourse, ObstacleKind};
pub use typing::{MantraPoint, SubmitOutcome, TypingEvent, TypingGame};
pub use words::{WordList, WordListError};

use crate::config::DojoConfig;
use crate::progression::CharacterStats;
use rand::Rng;
use std::time::Duration;

/// Which mini-game a summary belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Typing,
    Jumping,
}

/// Outcome waiting to be claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSummary {
    pub kind: GameKind,
    /// Words typed or obstacles cleared
    pub score: u32,
    pub reward: u32,
}

impl TrainingSummary {
    pub fn can_claim(&self) -> bool {
        self.reward > 0
    }
}

#[derive(Debug, Clone)]
pub enum TrainingPhase {
    Selection,
    Typing(TypingGame),
    Jumping(ObstacleCourse),
    Summary(TrainingSummary),
}

#[derive(Debug, Clone)]
pub struct TrainingSession {
    phase: TrainingPhase,
    notice: Option<String>,
    config: DojoConfig,
}

impl TrainingSession {
    pub fn new(config: &DojoConfig) -> Self {
        TrainingSession {
            phase: TrainingPhase::Selection,
            notice: None,
            config: config.clone(),
        }
    }

    pub fn phase(&self) -> &TrainingPhase {
        &self.phase
    }

    pub fn phase_mut(&mut self) -> &mut TrainingPhase {
        &mut self.phase
    }

    /// Message for the selection screen, e.g. after a failed run
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Start a typing run from an already loaded word list
    pub fn start_typing(&mut self, words: &WordList, rng: &mut impl Rng) {
        self.leave();
        let pool = words.generate_pool(&self.config.typing, rng);
        tracing::info!(words = pool.len(), "typing training started");
        self.phase = TrainingPhase::Typing(TypingGame::new(pool, &self.config.typing));
    }

    /// Load the word list and start typing. A load failure leaves the session
    /// on the selection screen with the error as the notice.
    pub fn start_typing_from_source(
        &mut self,
        rng: &mut impl Rng,
    ) -> Result<(), WordListError> {
        let path = self.config.typing.words_path.clone();
        match WordList::resolve(path.as_deref()) {
            Ok(words) => {
                self.start_typing(&words, rng);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("typing dojo unavailable: {}", e);
                self.leave();
                self.notice = Some(format!("Typing Dojo unavailable: {}", e));
                Err(e)
            }
        }
    }

    pub fn start_jumping(&mut self, jump_level: u32) {
        self.leave();
        tracing::info!(jump_level, "obstacle training started");
        self.phase = TrainingPhase::Jumping(ObstacleCourse::new(&self.config.obstacle, jump_level));
    }

    /// Drive the active game and move on when it ends
    pub fn tick(&mut self, dt: Duration, rng: &mut impl Rng) {
        match &mut self.phase {
            TrainingPhase::Typing(game) => {
                game.tick(dt);
                if game.is_finished() {
                    let summary = TrainingSummary {
                        kind: GameKind::Typing,
                        score: game.correct(),
                        reward: game.reward(),
                    };
                    self.phase = TrainingPhase::Summary(summary);
                }
            }
            TrainingPhase::Jumping(course) => {
                course.tick(dt, rng);
                match course.state() {
                    CourseState::Failed { .. } => {
                        self.phase = TrainingPhase::Selection;
                        self.notice = Some("HIT BY OBSTACLE! Training Failed!".to_string());
                    }
                    CourseState::Cleared => {
                        let summary = TrainingSummary {
                            kind: GameKind::Jumping,
                            score: course.clears(),
                            reward: self.config.progression.default_training_reward,
                        };
                        self.phase = TrainingPhase::Summary(summary);
                    }
                    CourseState::Running => {}
                }
            }
            TrainingPhase::Selection | TrainingPhase::Summary(_) => {}
        }
    }

    /// Grant the pending reward. Returns the experience granted, if any.
    pub fn claim_reward(&mut self, stats: &mut CharacterStats) -> Option<u32> {
        let TrainingPhase::Summary(summary) = self.phase else {
            return None;
        };
        if !summary.can_claim() {
            return None;
        }

        stats.complete_training(summary.reward);
        self.phase = TrainingPhase::Selection;
        Some(summary.reward)
    }

    /// Tear down the active game and go back to the selection screen
    pub fn leave(&mut self) {
        match &mut self.phase {
            TrainingPhase::Typing(game) => game.cancel(),
            TrainingPhase::Jumping(course) => course.cancel(),
            TrainingPhase::Selection | TrainingPhase::Summary(_) => {}
        }
        self.phase = TrainingPhase::Selection;
    }

    pub fn is_in_game(&self) -> bool {
        matches!(self.phase, TrainingPhase::Typing(_) | TrainingPhase::Jumping(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn typing_session() -> (TrainingSession, StdRng) {
        let mut config = DojoConfig::default();
        config.typing.confusing_chance = 0.0;
        let mut session = TrainingSession::new(&config);
        let mut rng = StdRng::seed_from_u64(11);
        let words = WordList::parse("dojo\n").unwrap();
        session.start_typing(&words, &mut rng);
        (session, rng)
    }

    fn type_word(session: &mut TrainingSession, word: &str, rng: &mut StdRng) {
        if let TrainingPhase::Typing(game) = session.phase_mut() {
            for c in word.chars() {
                game.type_char(c);
            }
            game.submit(rng);
        }
    }

    #[test]
    fn test_typing_reward_claimed_once() {
        let (mut session, mut rng) = typing_session();
        for _ in 0..3 {
            type_word(&mut session, "dojo", &mut rng);
        }
        session.tick(Duration::from_secs(60), &mut rng);

        match session.phase() {
            TrainingPhase::Summary(summary) => {
                assert_eq!(summary.kind, GameKind::Typing);
                assert_eq!(summary.score, 3);
                assert_eq!(summary.reward, 6);
            }
            other => panic!("expected summary, got {:?}", other),
        }

        let mut stats = CharacterStats::default();
        assert_eq!(session.claim_reward(&mut stats), Some(6));
        assert_eq!(stats.experience, 6);
        assert_eq!(stats.training_completed, 1);

        assert_eq!(session.claim_reward(&mut stats), None);
        assert_eq!(stats.training_completed, 1);
    }

    #[test]
    fn test_typing_without_words_pays_nothing() {
        let (mut session, mut rng) = typing_session();
        session.tick(Duration::from_secs(60), &mut rng);

        let mut stats = CharacterStats::default();
        assert_eq!(session.claim_reward(&mut stats), None);
        assert_eq!(stats.training_completed, 0);
        assert!(matches!(session.phase(), TrainingPhase::Summary(_)));

        session.leave();
        assert!(matches!(session.phase(), TrainingPhase::Selection));
    }

    #[test]
    fn test_missing_word_file_disables_typing() {
        let mut config = DojoConfig::default();
        config.typing.words_path = Some(PathBuf::from("/no/such/words.txt"));
        let mut session = TrainingSession::new(&config);
        let mut rng = StdRng::seed_from_u64(1);

        assert!(session.start_typing_from_source(&mut rng).is_err());
        assert!(matches!(session.phase(), TrainingPhase::Selection));
        assert!(session.notice().unwrap().contains("unavailable"));
    }

    #[test]
    fn test_builtin_words_start_typing() {
        let mut session = TrainingSession::new(&DojoConfig::default());
        let mut rng = StdRng::seed_from_u64(1);

        session.start_typing_from_source(&mut rng).unwrap();
        match session.phase() {
            TrainingPhase::Typing(game) => assert_eq!(game.words().len(), 15),
            other => panic!("expected typing, got {:?}", other),
        }
    }

    #[test]
    fn test_obstacle_failure_returns_to_selection() {
        let mut session = TrainingSession::new(&DojoConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        session.start_jumping(0);

        // A grounded player meets an obstacle one step away
        if let TrainingPhase::Jumping(course) = session.phase_mut() {
            course.spawn(ObstacleKind::Low, 55.0);
        }
        session.tick(Duration::from_millis(30), &mut rng);

        assert!(matches!(session.phase(), TrainingPhase::Selection));
        assert!(session.notice().unwrap().contains("HIT BY OBSTACLE"));
    }

    #[test]
    fn test_cleared_course_pays_default_reward() {
        let mut session = TrainingSession::new(&DojoConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        session.start_jumping(0);

        if let TrainingPhase::Jumping(course) = session.phase_mut() {
            for _ in 0..10 {
                course.spawn(ObstacleKind::High, 50.0);
                course.check_clearance(125.0);
            }
        }
        session.tick(Duration::from_millis(1), &mut rng);

        let mut stats = CharacterStats::default();
        assert_eq!(session.claim_reward(&mut stats), Some(150));
        assert_eq!(stats.experience, 150);
    }

    #[test]
    fn test_leave_cancels_running_game() {
        let mut session = TrainingSession::new(&DojoConfig::default());
        session.start_jumping(0);
        assert!(session.is_in_game());

        session.leave();
        assert!(!session.is_in_game());
    }
}
