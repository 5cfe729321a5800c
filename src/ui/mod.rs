pub mod field;
pub mod game;
pub mod home;

use ratatui::prelude::*;

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match app.screen {
        Screen::Menu => home::render_home(frame, area, app),
        Screen::Game => game::render_game(frame, area, app),
    }
}
