use std::{path::PathBuf, time::Duration};

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tetrion_engine::{Direction, GameState, SessionState};

use crate::{
    score_log::{self, ScoreEntry},
    tui::{App, Tui},
    view::widgets::{GameDisplay, KeyBinding, KeyBindingDisplay},
};

const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["Space"], "Drop"),
    (&["X", "Z"], "Rotate"),
    (&["P"], "Pause"),
    (&["Esc", "Q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[(&["P", "R"], "Resume"), (&["Esc", "Q"], "Quit")];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["R"], "Restart"), (&["Esc", "Q"], "Quit")];

/// Interactive game driven by the terminal.
///
/// Each finished game is appended to the score log exactly once, when the
/// game-over transition is first observed.
#[derive(Debug)]
pub struct PlayApp {
    game: GameState,
    tick_rate: f64,
    score_log: PathBuf,
    score_logged: bool,
    // Sub-millisecond remainder carried to the next tick
    pending: Duration,
    is_exiting: bool,
    error: Option<anyhow::Error>,
}

impl PlayApp {
    pub fn new(game: GameState, tick_rate: f64, score_log: PathBuf) -> Self {
        Self {
            game,
            tick_rate,
            score_log,
            score_logged: false,
            pending: Duration::ZERO,
            is_exiting: false,
            error: None,
        }
    }

    /// Returns the error that ended the session early, if any.
    pub fn into_result(self) -> anyhow::Result<()> {
        self.error.map_or(Ok(()), Err)
    }

    fn restart(&mut self) {
        self.game.reset();
        self.score_logged = false;
        self.pending = Duration::ZERO;
    }

    fn log_score_once(&mut self) {
        if self.score_logged || !self.game.is_game_over() {
            return;
        }
        self.score_logged = true;
        let entry = ScoreEntry::now(self.game.score());
        if let Err(e) = score_log::append(&self.score_log, &entry) {
            self.error = Some(e);
            self.is_exiting = true;
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(self.tick_rate);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: &Event) {
        let Some(key) = event.as_key_press_event() else {
            return;
        };
        let is_running = self.game.is_running();
        match key.code {
            KeyCode::Left if is_running => _ = self.game.move_piece(Direction::Left),
            KeyCode::Right if is_running => _ = self.game.move_piece(Direction::Right),
            KeyCode::Down if is_running => _ = self.game.move_piece(Direction::Down),
            KeyCode::Char(' ') if is_running => self.game.drop_piece(),
            KeyCode::Char('x' | 'X') if is_running => _ = self.game.rotate_piece(false),
            KeyCode::Char('z' | 'Z') if is_running => _ = self.game.rotate_piece(true),
            KeyCode::Char('p' | 'P') => self.game.toggle_pause(),
            KeyCode::Char('r' | 'R') if self.game.is_game_over() => self.restart(),
            KeyCode::Char('r' | 'R') => self.game.set_paused(false),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => self.is_exiting = true,
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let game_display = GameDisplay::new(&self.game);
        let bindings = match self.game.state() {
            SessionState::Playing => PLAYING_KEYS,
            SessionState::Paused => PAUSED_KEYS,
            SessionState::GameOver => GAME_OVER_KEYS,
        };

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(game_display.height()),
            Constraint::Length(1),
        ])
        .areas::<2>(frame.area());
        frame.render_widget(game_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self, _tui: &mut Tui, elapsed: Duration) {
        self.pending += elapsed;
        let millis = u64::try_from(self.pending.as_millis()).unwrap_or(u64::MAX);
        self.pending -= Duration::from_millis(millis);
        self.game.advance(millis);
        self.log_score_once();
    }
}
