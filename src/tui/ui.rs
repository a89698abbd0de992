//! Stateless rendering of the render model.

use connect_four_client::{NotificationKind, Notifications, Player, RenderModel, StatusKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

use super::app::App;

const HELP: &str =
    "←/→ move  Enter drop  0-9 column  a AI  u undo  r reset  n new game  g refresh  q quit";

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App, model: &RenderModel, notifications: &Notifications) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Status
            Constraint::Min(4),    // Board
            Constraint::Length(1), // New game form
            Constraint::Length(2), // Notifications
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Connect Four")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_status(frame, chunks[1], app, model);
    draw_board(frame, chunks[2], app, model);

    let form = app.form();
    let form_line = Paragraph::new(format!(
        "New game: {} rows x {} columns, {} to win   [h/H rows  w/W columns  k/K win]",
        form.height, form.width, form.win
    ))
    .style(Style::default().fg(Color::Gray))
    .alignment(Alignment::Center);
    frame.render_widget(form_line, chunks[3]);

    draw_notifications(frame, chunks[4], notifications);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    }
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App, model: &RenderModel) {
    let style = match model.status.kind {
        StatusKind::Waiting => Style::default().fg(Color::Gray),
        StatusKind::Turn(player) => Style::default().fg(player_color(player)),
        StatusKind::Won(player) => Style::default()
            .fg(player_color(player))
            .add_modifier(Modifier::BOLD),
        StatusKind::Tie => Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    };
    let title = if app.busy() { " Working... " } else { " Status " };
    let status = Paragraph::new(model.status.text.as_str())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(status, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, model: &RenderModel) {
    let mut lines = Vec::with_capacity(model.height + 1);

    let header: Vec<Span> = model
        .columns
        .iter()
        .map(|column| {
            let mut style = if column.selectable {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if column.index == app.cursor() {
                style = style.bg(Color::White).fg(Color::Black);
            }
            Span::styled(format!("{:^3}", column.index), style)
        })
        .collect();
    lines.push(Line::from(header));

    for row in &model.cells {
        let cells: Vec<Span> = row
            .iter()
            .map(|mark| match mark.owner() {
                Some(player) => Span::styled(
                    " ● ",
                    Style::default()
                        .fg(player_color(player))
                        .add_modifier(Modifier::BOLD),
                ),
                None => Span::styled(" · ", Style::default().fg(Color::DarkGray)),
            })
            .collect();
        lines.push(Line::from(cells));
    }

    let win = model
        .win
        .map(|win| format!(" {} in a row ", win))
        .unwrap_or_default();
    let board = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(win));
    frame.render_widget(board, area);
}

fn draw_notifications(frame: &mut Frame, area: Rect, notifications: &Notifications) {
    let lines: Vec<Line> = NotificationKind::iter()
        .filter_map(|kind| notifications.active(kind))
        .map(|notification| {
            let color = match notification.kind() {
                NotificationKind::Error => Color::Red,
                NotificationKind::Success => Color::Green,
            };
            Line::from(Span::styled(
                notification.message().clone(),
                Style::default().fg(color),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
