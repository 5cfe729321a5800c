use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind};

/// Without release reporting a key counts as held for a while after each
/// press. The first window has to bridge the terminal's auto-repeat delay.
const FIRST_HOLD: Duration = Duration::from_millis(550);
const REPEAT_HOLD: Duration = Duration::from_millis(120);

/// Input gathered while waiting for a frame boundary
pub struct FrameEvents {
    /// Wall-clock seconds since the previous frame
    pub dt: f32,
    pub keys: Vec<KeyEvent>,
}

/// Frame pacer. Polling the terminal with the time left until the next frame
/// is also what sleeps, so input, update and draw all stay on one thread.
pub struct EventHandler {
    frame: Duration,
    last_frame: Instant,
    deadline: Instant,
}

impl EventHandler {
    pub fn new(fps: u32) -> Self {
        let frame = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        let now = Instant::now();
        Self {
            frame,
            last_frame: now,
            deadline: now + frame,
        }
    }

    pub fn next_frame(&mut self) -> io::Result<FrameEvents> {
        let mut keys = Vec::new();
        loop {
            let timeout = self.deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() {
                break;
            }
            if event::poll(timeout)? {
                if let event::Event::Key(key) = event::read()? {
                    keys.push(key);
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.deadline += self.frame;
        if self.deadline < now {
            // Fell behind (slow draw, suspended terminal): don't try to catch up
            self.deadline = now + self.frame;
        }

        Ok(FrameEvents { dt, keys })
    }
}

/// Tracks which keys are currently held down
pub struct KeyTracker {
    release_events: bool,
    /// `None` means held until a release event arrives
    held: HashMap<KeyCode, Option<Instant>>,
}

impl KeyTracker {
    /// `release_events`: the terminal reports key releases (kitty protocol)
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            held: HashMap::new(),
        }
    }

    pub fn record(&mut self, key: &KeyEvent, now: Instant) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Release => {
                self.held.remove(&code);
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let until = if self.release_events {
                    None
                } else if self.is_held(code, now) {
                    Some(now + REPEAT_HOLD)
                } else {
                    Some(now + FIRST_HOLD)
                };
                self.held.insert(code, until);
            }
        }
    }

    pub fn is_held(&self, code: KeyCode, now: Instant) -> bool {
        match self.held.get(&normalize(code)) {
            Some(None) => true,
            Some(Some(until)) => now < *until,
            None => false,
        }
    }

    pub fn any_held(&self, codes: &[KeyCode], now: Instant) -> bool {
        codes.iter().any(|&c| self.is_held(c, now))
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
