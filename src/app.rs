use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;

use crate::config::Config;
use crate::event::KeyTracker;
use crate::sim::{FrameInput, Session, ShipIntent};

const ROTATE_LEFT_KEYS: [KeyCode; 2] = [KeyCode::Left, KeyCode::Char('a')];
const ROTATE_RIGHT_KEYS: [KeyCode; 2] = [KeyCode::Right, KeyCode::Char('d')];
const THRUST_KEYS: [KeyCode; 2] = [KeyCode::Up, KeyCode::Char('w')];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub session: Session,
    pub paused: bool,
    /// Set once play has begun; the menu then offers to resume
    started: bool,
    /// Best score this run; nothing is written to disk
    pub best_score: u32,
    /// Frames drawn since startup, drives blinking
    pub frame_count: u64,
    keys: KeyTracker,
    /// Edge-triggered commands waiting for the next frame
    pending: FrameInput,
}

impl App {
    pub fn new(config: &Config, seed: u64, release_events: bool) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Menu,
            session: Session::new(config.simulation.clone(), seed),
            paused: false,
            started: false,
            best_score: 0,
            frame_count: 0,
            keys: KeyTracker::new(release_events),
            pending: FrameInput::default(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        self.on_key_at(key, Instant::now());
    }

    pub fn on_key_at(&mut self, key: KeyEvent, now: Instant) {
        self.keys.record(&key, now);
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Menu => self.handle_menu_input(key),
            Screen::Game => self.handle_game_input(key),
        }
    }

    fn handle_menu_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.session.is_game_over() {
                    self.session.restart();
                }
                self.screen = Screen::Game;
                self.started = true;
                self.paused = false;
                self.keys.clear();
            }
            _ => {}
        }
    }

    fn handle_game_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
                self.pending = FrameInput::default();
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if !self.session.is_game_over() {
                    self.paused = !self.paused;
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') if !self.paused => self.pending.restart = true,
            KeyCode::Enter if self.session.is_game_over() => self.pending.restart = true,
            KeyCode::Char(' ') if !self.paused => self.pending.fire = true,
            _ => {}
        }
    }

    /// A session is under way that Enter on the menu would resume
    pub fn game_in_progress(&self) -> bool {
        self.started && !self.session.is_game_over()
    }

    pub fn on_frame(&mut self, dt: f32) {
        self.on_frame_at(dt, Instant::now());
    }

    pub fn on_frame_at(&mut self, dt: f32, now: Instant) {
        self.frame_count = self.frame_count.wrapping_add(1);
        if self.screen != Screen::Game || self.paused {
            return;
        }

        let input = FrameInput {
            intent: ShipIntent {
                accelerating: self.keys.any_held(&THRUST_KEYS, now),
                rotating_left: self.keys.any_held(&ROTATE_LEFT_KEYS, now),
                rotating_right: self.keys.any_held(&ROTATE_RIGHT_KEYS, now),
            },
            ..std::mem::take(&mut self.pending)
        };

        let was_over = self.session.is_game_over();
        self.session.step(dt, &input);

        if self.session.score > self.best_score {
            self.best_score = self.session.score;
        }
        if !was_over && self.session.is_game_over() {
            info!("run ended with {} points, best this run {}", self.session.score, self.best_score);
        }
    }
}
