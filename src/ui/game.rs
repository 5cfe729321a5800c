use ratatui::prelude::*;
use ratatui::widgets::*;

use super::field::render_field;
use crate::app::App;
use crate::sim::Session;

/// Fresh session nobody has touched yet
fn shows_start_hint(session: &Session) -> bool {
    session.score == 0
        && session.level == 1
        && !session.ship.intent.accelerating
        && session.projectiles.is_empty()
        && !session.is_game_over()
}

fn status_line(app: &App) -> Line<'static> {
    let session = &app.session;
    let lives_str = "\u{2666} ".repeat(session.ship.lives as usize);
    Line::from(vec![
        Span::styled(" \u{2604} ", Style::default()),
        Span::styled(
            format!("Score: {} ", session.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Lives: {}", lives_str),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Best: {} ", app.best_score),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Level: {} ", session.level),
            Style::default().fg(Color::Green),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Rocks: {} ", session.asteroids.len()),
            Style::default().fg(Color::Rgb(160, 140, 120)),
        ),
    ])
}

fn help_line(app: &App) -> Line<'static> {
    let sep = || Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60)));
    if app.session.is_game_over() {
        Line::from(vec![
            Span::styled(" GAME OVER! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("Press R or ENTER to restart, Esc for menu", Style::default().fg(Color::Gray)),
        ])
    } else if app.paused {
        Line::from(vec![
            Span::styled(" PAUSED - Press P to resume ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        ])
    } else {
        Line::from(vec![
            Span::styled(" \u{2190}\u{2192}/AD Rotate ", Style::default().fg(Color::DarkGray)),
            sep(),
            Span::styled("\u{2191}/W Thrust ", Style::default().fg(Color::DarkGray)),
            sep(),
            Span::styled("Space Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            sep(),
            Span::styled("P Pause ", Style::default().fg(Color::DarkGray)),
            sep(),
            Span::styled("Esc Menu", Style::default().fg(Color::DarkGray)),
        ])
    }
}

fn render_start_hint(frame: &mut Frame, field: Rect) {
    let w = 40u16.min(field.width);
    let h = 3u16.min(field.height);
    if w < 4 || h < 3 {
        return;
    }
    let x = field.x + (field.width - w) / 2;
    // Below the ship so it stays visible
    let y = field.y + (field.height.saturating_sub(h)) * 3 / 4;
    let area = Rect::new(x, y, w, h);

    frame.render_widget(Clear, area);
    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Arrows / WASD", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(" to fly, ", Style::default().fg(Color::Rgb(140, 140, 140))),
        Span::styled("Space", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" to shoot", Style::default().fg(Color::Rgb(140, 140, 140))),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .style(Style::default().bg(Color::Rgb(15, 15, 25))),
    );
    frame.render_widget(hint, area);
}

pub fn render_game(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(100, 200, 255)))
        .title(" Asteroids ")
        .title_style(Style::default().fg(Color::Rgb(130, 220, 255)).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(app)), chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = render_field(&app.session, app.frame_count, fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
        if shows_start_hint(&app.session) {
            render_start_hint(frame, chunks[1]);
        }
    }

    frame.render_widget(Paragraph::new(help_line(app)), chunks[2]);
}
