//! Screen flow for the terminal binary.
//!
//! ```text
//! Menu --Start Game--> Playing --game over--> GameOver --> Menu
//!  |  \--Select Level--> Difficulty --> Menu
//!   \--High Scores--> HighScores --> Menu
//! ```
//!
//! [`App`] owns the [`Session`] and holds no terminal handles, so the whole flow
//! can be driven from tests with synthetic key events.

use crossterm::event::KeyEvent;

use crate::core::GameSnapshot;
use crate::engine::{HighScoreStore, Session};
use crate::input::{
    game_command, is_actionable, is_back, is_new_game, menu_key, should_quit, MenuKey,
};
use crate::term::{FrameBuffer, GameOverSummary, GameView, MenuView, Viewport};
use crate::types::Difficulty;

/// Start menu entries, top to bottom.
pub const MENU_ITEMS: [MenuItem; 4] = [
    MenuItem::StartGame,
    MenuItem::SelectLevel,
    MenuItem::HighScores,
    MenuItem::Quit,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    StartGame,
    SelectLevel,
    HighScores,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::StartGame => "Start Game",
            MenuItem::SelectLevel => "Select Level",
            MenuItem::HighScores => "High Scores",
            MenuItem::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Difficulty,
    Playing,
    GameOver(GameOverSummary),
    HighScores,
}

pub struct App<S: HighScoreStore> {
    session: Session<S>,
    screen: Screen,
    menu_index: usize,
    difficulty: Difficulty,
    difficulty_index: usize,
    quit: bool,
    game_view: GameView,
    menu_view: MenuView,
    snapshot: GameSnapshot,
    /// Table shown on the high-score screen, read when the screen opens
    high_scores: Vec<u32>,
}

impl<S: HighScoreStore> App<S> {
    pub fn new(session: Session<S>) -> Self {
        Self {
            session,
            screen: Screen::Menu,
            menu_index: 0,
            difficulty: Difficulty::default(),
            difficulty_index: 0,
            quit: false,
            game_view: GameView::default(),
            menu_view: MenuView,
            snapshot: GameSnapshot::default(),
            high_scores: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if !is_actionable(key) {
            return;
        }
        if should_quit(key) {
            self.quit = true;
            return;
        }

        match self.screen {
            Screen::Menu => self.on_menu_key(key),
            Screen::Difficulty => self.on_difficulty_key(key),
            Screen::Playing => self.on_game_key(key),
            Screen::GameOver(_) | Screen::HighScores => {
                if matches!(menu_key(key), Some(MenuKey::Select | MenuKey::Back)) {
                    self.screen = Screen::Menu;
                }
            }
        }
    }

    /// Advance game time; only the game screen has a clock.
    pub fn update(&mut self, elapsed_ms: u32) {
        if self.screen != Screen::Playing {
            return;
        }
        if let Some(report) = self.session.advance(elapsed_ms) {
            self.screen = Screen::GameOver(GameOverSummary {
                stats: report.stats,
                rank: report.rank,
                saved: report.saved,
            });
        }
    }

    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        match self.screen {
            Screen::Menu => {
                let labels = MENU_ITEMS.map(|item| item.label());
                self.menu_view.render_menu(fb, viewport, "MAIN MENU", &labels, self.menu_index);
            }
            Screen::Difficulty => {
                let labels = Difficulty::ALL.map(|d| d.label());
                let selected = self.difficulty_index;
                self.menu_view.render_menu(fb, viewport, "SELECT LEVEL", &labels, selected);
            }
            Screen::Playing => {
                self.session.snapshot_into(&mut self.snapshot);
                self.game_view.render_into(&self.snapshot, viewport, fb);
            }
            Screen::GameOver(summary) => {
                self.menu_view.render_game_over(fb, viewport, &summary);
            }
            Screen::HighScores => {
                self.menu_view.render_high_scores(fb, viewport, &self.high_scores);
            }
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        match menu_key(key) {
            Some(MenuKey::Up) => self.menu_index = wrap_prev(self.menu_index, MENU_ITEMS.len()),
            Some(MenuKey::Down) => self.menu_index = wrap_next(self.menu_index, MENU_ITEMS.len()),
            Some(MenuKey::Select) => match MENU_ITEMS[self.menu_index] {
                MenuItem::StartGame => self.start_game(),
                MenuItem::SelectLevel => {
                    self.difficulty_index = Difficulty::ALL
                        .iter()
                        .position(|&d| d == self.difficulty)
                        .unwrap_or(0);
                    self.screen = Screen::Difficulty;
                }
                MenuItem::HighScores => {
                    self.high_scores = self.session.high_scores();
                    self.screen = Screen::HighScores;
                }
                MenuItem::Quit => self.quit = true,
            },
            Some(MenuKey::Back) | None => {}
        }
    }

    fn on_difficulty_key(&mut self, key: KeyEvent) {
        let n = Difficulty::ALL.len();
        match menu_key(key) {
            Some(MenuKey::Up) => self.difficulty_index = wrap_prev(self.difficulty_index, n),
            Some(MenuKey::Down) => self.difficulty_index = wrap_next(self.difficulty_index, n),
            Some(MenuKey::Select) => {
                self.difficulty = Difficulty::ALL[self.difficulty_index];
                self.session.set_difficulty(self.difficulty);
                self.screen = Screen::Menu;
            }
            Some(MenuKey::Back) => self.screen = Screen::Menu,
            None => {}
        }
    }

    fn on_game_key(&mut self, key: KeyEvent) {
        if is_new_game(key) {
            self.start_game();
        } else if is_back(key) {
            self.screen = Screen::Menu;
        } else if let Some(command) = game_command(key) {
            self.session.push(command);
        }
    }

    fn start_game(&mut self) {
        self.session.start();
        self.screen = Screen::Playing;
    }
}

fn wrap_next(i: usize, n: usize) -> usize {
    (i + 1) % n
}

fn wrap_prev(i: usize, n: usize) -> usize {
    (i + n - 1) % n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameEngine;
    use crate::engine::MemoryHighScores;
    use crossterm::event::KeyCode;
    use std::cell::Cell;

    fn app() -> App<MemoryHighScores> {
        App::new(Session::new(GameEngine::new(7), MemoryHighScores::new()))
    }

    fn press<S: HighScoreStore>(app: &mut App<S>, code: KeyCode) {
        app.handle_key(KeyEvent::from(code));
    }

    /// Counts how often the table is read.
    #[derive(Default)]
    struct CountingStore {
        loads: Cell<usize>,
    }

    impl HighScoreStore for CountingStore {
        fn load(&self) -> Vec<u32> {
            self.loads.set(self.loads.get() + 1);
            vec![300, 200]
        }

        fn record(&mut self, _score: u32) -> anyhow::Result<Vec<u32>> {
            Ok(self.load())
        }
    }

    #[test]
    fn start_game_from_menu() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Playing);
        assert!(app.session().engine().is_running());
    }

    #[test]
    fn difficulty_choice_sets_start_level() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Difficulty);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.difficulty(), Difficulty::Hard);
        assert_eq!(app.screen(), Screen::Menu);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().engine().level(), 3);
    }

    #[test]
    fn menu_wraps_and_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit());
    }

    #[test]
    fn game_keys_reach_the_engine() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        let x0 = app.session().engine().current().unwrap().x;
        press(&mut app, KeyCode::Left);
        app.update(0);
        assert_eq!(app.session().engine().current().unwrap().x, x0 - 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn high_scores_screen_returns_to_menu() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::HighScores);

        let mut fb = FrameBuffer::new(40, 24);
        app.render_into(Viewport::new(40, 24), &mut fb);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Menu);
    }

    #[test]
    fn high_scores_are_read_once_per_visit() {
        let mut app = App::new(Session::new(GameEngine::new(7), CountingStore::default()));
        let viewport = Viewport::new(40, 24);
        let mut fb = FrameBuffer::new(40, 24);

        for visit in 1..=2 {
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Enter);
            assert_eq!(app.screen(), Screen::HighScores);

            for _ in 0..60 {
                app.render_into(viewport, &mut fb);
            }
            assert_eq!(app.session().store().loads.get(), visit);
            assert!((0..fb.height()).any(|y| fb.row_text(y).contains("300")));

            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Up);
            press(&mut app, KeyCode::Up);
        }
    }
}
