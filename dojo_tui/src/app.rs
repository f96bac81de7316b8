//! Application state

use dojo_core::{
    config::default_skills,
    door::{DoorPuzzle, DoorSignal, PushOutcome},
    effects::within_radius,
    navigation::{Navigator, Route},
    progression::CharacterStats,
    selection::{WarriorSelection, REAL_WARRIOR},
    training::{SubmitOutcome, TrainingPhase, TrainingSession},
    DojoConfig, Point, SkillDef, SkillId,
};
use ratatui::layout::Rect;
use rand::rngs::StdRng;
use std::cell::Cell;
use std::time::Duration;

/// Lamp reach on the dashboard, in percent of the screen
pub const LAMP_RADIUS: f64 = 30.0;
/// Where the hidden back button sits on the dashboard
pub const BACK_BUTTON: Point = Point { x: 88.0, y: 92.0 };
const LAMP_STEP: f64 = 4.0;

/// Which door slider the arrow keys move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorField {
    Force,
    Distance,
}

pub struct App {
    pub config: DojoConfig,
    pub stats: CharacterStats,
    pub skills: Vec<SkillDef>,
    pub nav: Navigator,
    pub door: DoorPuzzle,
    pub door_field: DoorField,
    pub selection: WarriorSelection,
    pub selected_card: usize,
    pub training: TrainingSession,
    pub selected_skill: usize,
    pub lamp: Point,
    /// Last drawn dashboard area, for mapping the mouse onto the lamp
    pub dashboard_area: Cell<Rect>,
    pub status: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    pub rng: StdRng,
}

impl App {
    pub fn new(config: DojoConfig, mut rng: StdRng) -> Self {
        let door = DoorPuzzle::new(&config.door, &mut rng);
        let stats = CharacterStats::new(&config.character);
        let training = TrainingSession::new(&config);

        App {
            config,
            stats,
            skills: default_skills(),
            nav: Navigator::new(),
            door,
            door_field: DoorField::Force,
            selection: WarriorSelection::new(),
            selected_card: 0,
            training,
            selected_skill: 0,
            lamp: Point::new(50.0, 50.0),
            dashboard_area: Cell::new(Rect::default()),
            status: None,
            show_help: false,
            should_quit: false,
            rng,
        }
    }

    pub fn route(&self) -> Route {
        self.nav.current()
    }

    /// Typing game owns the keyboard
    pub fn is_typing(&self) -> bool {
        self.route() == Route::Training
            && matches!(self.training.phase(), TrainingPhase::Typing(_))
    }

    /// Cards on the selection screen: the decoys, then the real warrior once revealed
    pub fn card_count(&self) -> usize {
        let decoys = self.selection.decoys().len();
        if self.selection.is_real_option_available() {
            decoys + 1
        } else {
            decoys
        }
    }

    pub fn lamp_on_back_button(&self) -> bool {
        within_radius(self.lamp, BACK_BUTTON, LAMP_RADIUS)
    }

    pub fn go(&mut self, to: Route) {
        match self.nav.navigate(to) {
            Ok(from) => {
                self.teardown(from);
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Stop every timer the screen we just left was running
    fn teardown(&mut self, from: Route) {
        match from {
            Route::Entry => self.door.cancel(),
            Route::Training => self.training.leave(),
            Route::Selection => self.selection.dismiss_notice(),
            Route::Skills | Route::Dashboard => {}
        }
    }

    pub fn tick(&mut self, dt: Duration) {
        match self.route() {
            Route::Entry => {
                if let Some(DoorSignal::Enter) = self.door.tick(dt) {
                    self.nav.unlock_entry();
                    self.go(Route::Selection);
                }
            }
            Route::Training => self.training.tick(dt, &mut self.rng),
            Route::Selection | Route::Skills | Route::Dashboard => {}
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn on_up(&mut self) {
        match self.route() {
            Route::Entry => self.door_field = DoorField::Force,
            Route::Skills => {
                if self.selected_skill > 0 {
                    self.selected_skill -= 1;
                }
            }
            Route::Dashboard => self.move_lamp(0.0, -LAMP_STEP),
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.route() {
            Route::Entry => self.door_field = DoorField::Distance,
            Route::Skills => {
                if self.selected_skill < self.skills.len().saturating_sub(1) {
                    self.selected_skill += 1;
                }
            }
            Route::Dashboard => self.move_lamp(0.0, LAMP_STEP),
            _ => {}
        }
    }

    pub fn on_left(&mut self) {
        match self.route() {
            Route::Entry => self.adjust_door(-1),
            Route::Selection => {
                if self.selected_card > 0 {
                    self.selected_card -= 1;
                }
            }
            Route::Dashboard => self.move_lamp(-LAMP_STEP, 0.0),
            _ => {}
        }
    }

    pub fn on_right(&mut self) {
        match self.route() {
            Route::Entry => self.adjust_door(1),
            Route::Selection => {
                if self.selected_card < self.card_count().saturating_sub(1) {
                    self.selected_card += 1;
                }
            }
            Route::Dashboard => self.move_lamp(LAMP_STEP, 0.0),
            _ => {}
        }
    }

    /// Coarse slider steps
    pub fn on_plus(&mut self) {
        if self.route() == Route::Entry {
            self.adjust_door(10);
        }
    }

    pub fn on_minus(&mut self) {
        if self.route() == Route::Entry {
            self.adjust_door(-10);
        }
    }

    fn adjust_door(&mut self, delta: i32) {
        match self.door_field {
            DoorField::Force => self.door.adjust_force(delta),
            DoorField::Distance => self.door.adjust_distance(delta),
        }
    }

    pub fn on_enter(&mut self) {
        match self.route() {
            Route::Entry => self.push_door(),
            Route::Selection => self.choose_card(),
            Route::Training => {
                if self.is_typing() {
                    self.submit_word();
                } else if matches!(self.training.phase(), TrainingPhase::Summary(_)) {
                    self.claim_reward();
                }
            }
            Route::Skills => self.upgrade_selected_skill(),
            Route::Dashboard => self.press_back_button(),
        }
    }

    pub fn on_space(&mut self) {
        if self.route() != Route::Training {
            self.on_enter();
            return;
        }
        if self.is_typing() {
            self.submit_word();
        } else if let TrainingPhase::Jumping(course) = self.training.phase_mut() {
            course.jump();
        }
    }

    pub fn on_escape(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.route() {
            Route::Selection => self.selection.dismiss_notice(),
            Route::Training => {
                self.training.leave();
                self.training.clear_notice();
            }
            _ => self.status = None,
        }
    }

    /// Digits start games in the training hall and tap mantra points while idle
    pub fn on_digit(&mut self, digit: u32) {
        if self.route() != Route::Training {
            return;
        }
        if matches!(self.training.phase(), TrainingPhase::Selection) {
            match digit {
                1 => self.start_typing(),
                2 => self.start_jumping(),
                _ => {}
            }
        } else if let TrainingPhase::Typing(game) = self.training.phase_mut() {
            if game.is_idle() {
                game.tap_mantra(digit as usize);
            }
        }
    }

    /// Raw character input for the typing game
    pub fn on_char(&mut self, c: char) {
        if c == ' ' {
            self.submit_word();
            return;
        }
        if let TrainingPhase::Typing(game) = self.training.phase_mut() {
            if game.is_idle() {
                if let Some(digit) = c.to_digit(10) {
                    game.tap_mantra(digit as usize);
                }
            } else {
                game.type_char(c);
            }
        }
    }

    pub fn on_backspace(&mut self) {
        if let TrainingPhase::Typing(game) = self.training.phase_mut() {
            game.backspace();
        }
    }

    /// Mouse moved to a terminal cell
    pub fn on_pointer(&mut self, column: u16, row: u16) {
        if self.route() != Route::Dashboard {
            return;
        }
        let area = self.dashboard_area.get();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let x = (column.saturating_sub(area.x)) as f64 / area.width as f64 * 100.0;
        let y = (row.saturating_sub(area.y)) as f64 / area.height as f64 * 100.0;
        self.lamp = Point::new(x.clamp(0.0, 100.0), y.clamp(0.0, 100.0));
    }

    fn move_lamp(&mut self, dx: f64, dy: f64) {
        self.lamp = Point::new(
            (self.lamp.x + dx).clamp(0.0, 100.0),
            (self.lamp.y + dy).clamp(0.0, 100.0),
        );
    }

    fn push_door(&mut self) {
        let outcome = self.door.push(&mut self.rng);
        self.status = match outcome {
            PushOutcome::Opened { torque } => {
                Some(format!("Torque {} - the door swings open!", torque))
            }
            PushOutcome::Shook { torque } => {
                Some(format!("Torque {} - the door rattles but holds.", torque))
            }
            PushOutcome::AlreadyOpen => None,
        };
    }

    fn choose_card(&mut self) {
        if self.selection.notice().is_some() {
            self.selection.dismiss_notice();
            return;
        }

        let decoys = self.selection.decoys();
        if let Some(warrior) = decoys.get(self.selected_card) {
            if let Err(e) = self.selection.attempt(warrior.id) {
                self.status = Some(e.to_string());
            }
            return;
        }

        match self.selection.select_real() {
            Ok(warrior) => {
                self.stats.award_bonus(self.config.progression.selection_bonus);
                self.stats.name = REAL_WARRIOR.display_name.to_string();
                self.nav.mark_warrior_chosen();
                self.go(Route::Training);
                self.status = Some(format!("{} joins the dojo.", warrior.display_name));
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn start_typing(&mut self) {
        self.training.clear_notice();
        if let Err(e) = self.training.start_typing_from_source(&mut self.rng) {
            self.status = Some(format!("No words to type: {}", e));
        }
    }

    fn start_jumping(&mut self) {
        self.training.clear_notice();
        let level = self.stats.skill_level(SkillId::JUMP_HEIGHT);
        self.training.start_jumping(level);
    }

    fn submit_word(&mut self) {
        if let TrainingPhase::Typing(game) = self.training.phase_mut() {
            if let SubmitOutcome::Extended { word } = game.submit(&mut self.rng) {
                self.status = Some(format!("Wrong! The word grows: {}", word));
            } else {
                self.status = None;
            }
        }
    }

    fn claim_reward(&mut self) {
        match self.training.claim_reward(&mut self.stats) {
            Some(exp) => {
                self.go(Route::Skills);
                self.status = Some(format!("+{} EXP claimed.", exp));
            }
            None => self.training.leave(),
        }
    }

    fn upgrade_selected_skill(&mut self) {
        let Some(skill) = self.skills.get(self.selected_skill) else {
            return;
        };
        if self.stats.upgrade_skill(skill.id.clone()) {
            self.status = Some(format!("{} upgraded.", skill.name));
        } else {
            self.status = Some("Not enough skill points.".to_string());
        }
    }

    fn press_back_button(&mut self) {
        if self.lamp_on_back_button() {
            self.go(Route::Skills);
        } else {
            self.status = Some("It's way too dark to find the way back.".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn app() -> App {
        App::new(DojoConfig::default(), StdRng::seed_from_u64(7))
    }

    fn open_door(app: &mut App) {
        app.door = DoorPuzzle::with_target(&app.config.door, 2500);
        app.door.set_force(50);
        app.door.set_distance(50);
        app.on_enter();
        app.tick(Duration::from_secs(1));
    }

    fn pick_po(app: &mut App) {
        for card in 0..5 {
            app.selected_card = card;
            app.on_enter();
            app.on_enter();
        }
        app.selected_card = 5;
        app.on_enter();
    }

    #[test]
    fn test_door_opens_onto_selection() {
        let mut app = app();
        open_door(&mut app);
        assert_eq!(app.route(), Route::Selection);
        assert!(app.door.is_open());
    }

    #[test]
    fn test_shut_door_blocks_navigation() {
        let mut app = app();
        app.go(Route::Selection);
        assert_eq!(app.route(), Route::Entry);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_po_chosen_after_decoys() {
        let mut app = app();
        open_door(&mut app);
        assert_eq!(app.card_count(), 5);

        pick_po(&mut app);

        assert_eq!(app.route(), Route::Training);
        assert_eq!(app.stats.name, "Po");
        assert_eq!(app.stats.experience, 50);
        assert_eq!(app.stats.training_completed, 0);
    }

    #[test]
    fn test_leaving_training_stops_game() {
        let mut app = app();
        open_door(&mut app);
        pick_po(&mut app);

        app.on_digit(2);
        assert!(app.training.is_in_game());
        app.go(Route::Skills);

        assert_eq!(app.route(), Route::Skills);
        assert!(!app.training.is_in_game());
    }

    #[test]
    fn test_typing_keys_reach_game() {
        let mut app = app();
        open_door(&mut app);
        pick_po(&mut app);

        app.on_digit(1);
        assert!(app.is_typing());
        app.on_char('x');
        app.on_char('y');
        app.on_backspace();

        match app.training.phase() {
            TrainingPhase::Typing(game) => assert_eq!(game.input(), "x"),
            _ => panic!("typing game not running"),
        }
    }

    #[test]
    fn test_missing_word_file_reports_status() {
        let mut app = app();
        open_door(&mut app);
        pick_po(&mut app);

        let mut config = app.config.clone();
        config.typing.words_path = Some("does/not/exist.txt".into());
        app.training = TrainingSession::new(&config);
        app.status = None;

        app.on_digit(1);
        assert!(!app.is_typing());
        assert!(matches!(app.training.phase(), TrainingPhase::Selection));
        assert!(app
            .status
            .as_deref()
            .is_some_and(|s| s.starts_with("No words to type")));
        assert!(app.training.notice().is_some());
    }

    #[test]
    fn test_dashboard_back_button_needs_lamp() {
        let mut app = app();
        open_door(&mut app);
        pick_po(&mut app);
        app.go(Route::Dashboard);

        app.on_enter();
        assert_eq!(app.route(), Route::Dashboard);

        app.lamp = BACK_BUTTON;
        app.on_enter();
        assert_eq!(app.route(), Route::Skills);
    }

    #[test]
    fn test_upgrade_without_points_reports() {
        let mut app = app();
        open_door(&mut app);
        pick_po(&mut app);
        app.go(Route::Skills);

        app.on_enter();
        assert_eq!(app.stats.skill_points, 0);
        assert_eq!(app.status.as_deref(), Some("Not enough skill points."));
    }
}
