use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;

const BANNER: &str = r#"
 ╔══════════════════════════════════════════════════════════════════════╗
 ║   █████╗ ███████╗████████╗███████╗██████╗  ██████╗ ██╗██████╗ ███████╗ ║
 ║  ██╔══██╗██╔════╝╚══██╔══╝██╔════╝██╔══██╗██╔═══██╗██║██╔══██╗██╔════╝ ║
 ║  ███████║███████╗   ██║   █████╗  ██████╔╝██║   ██║██║██║  ██║███████╗ ║
 ║  ██╔══██║╚════██║   ██║   ██╔══╝  ██╔══██╗██║   ██║██║██║  ██║╚════██║ ║
 ║  ██║  ██║███████║   ██║   ███████╗██║  ██║╚██████╔╝██║██████╔╝███████║ ║
 ║  ╚═╝  ╚═╝╚══════╝   ╚═╝   ╚══════╝╚═╝  ╚═╝ ╚═════╝ ╚═╝╚═════╝ ╚══════╝ ║
 ╚══════════════════════════════════════════════════════════════════════╝"#;

const KEY_STYLE: Style = Style::new().fg(Color::Rgb(80, 200, 255));
const DESC_STYLE: Style = Style::new().fg(Color::Rgb(140, 140, 140));

fn control(keys: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<17}", keys), KEY_STYLE),
        Span::styled(desc, DESC_STYLE),
    ])
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(text, Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
    ])
}

fn flight_controls() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        heading("  \u{2604} In flight"),
        control("\u{2190} / A", "Rotate left"),
        control("\u{2192} / D", "Rotate right"),
        control("\u{2191} / W", "Thrust"),
        control("Space", "Shoot"),
        control("P", "Pause / Unpause"),
        control("R / Enter", "Restart after game over"),
        control("Esc", "Back to this menu"),
    ]
}

fn start_label(app: &App) -> &'static str {
    if app.game_in_progress() { "Resume" } else { "Start" }
}

fn menu_controls(app: &App) -> Vec<Line<'static>> {
    let action = start_label(app);
    vec![
        Line::from(""),
        heading("  \u{1f527} Menu"),
        control("Enter / Space", action),
        control("q / Ctrl+C", "Quit"),
        Line::from(""),
        heading("  \u{1f3c6} This run"),
        Line::from(vec![
            Span::styled("    Best score       ", KEY_STYLE),
            Span::styled(
                app.best_score.to_string(),
                Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
            ),
        ]),
    ]
}

fn panel(title: &'static str, border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD))
}

pub fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Min(12),    // Controls
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(vec![
        Span::styled(
            "  \u{2604} Blast rocks in deep space \u{2604}  ",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .split(chunks[2]);

    let menu = Paragraph::new(menu_controls(app))
        .block(panel(" \u{2328} Menu ", Color::Rgb(60, 150, 200)));
    frame.render_widget(menu, ctrl_cols[0]);

    let flight = Paragraph::new(flight_controls())
        .block(panel(" \u{1f3ae} Controls ", Color::Rgb(50, 100, 140)));
    frame.render_widget(flight, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  \u{1f980} ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(concat!("v", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::Rgb(80, 80, 100))),
        Span::styled("  \u{2502}  ", Style::default().fg(Color::Rgb(40, 40, 60))),
        Span::styled("Enter", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(" to play", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}
