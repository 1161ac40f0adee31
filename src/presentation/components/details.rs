use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use textwrap::wrap;

use crate::domain::{User, about_description};

pub fn render_details(frame: &mut Frame<'_>, area: Rect, user: &User) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(4)])
        .split(area);

    let summary = vec![
        Line::from(format!("Age: {}", user.age)),
        Line::from(format!(
            "Location: {}, {} ({})",
            user.address.city,
            user.address.state,
            user.address.country.as_deref().unwrap_or("—")
        )),
        Line::from(format!(
            "Work: {} — {}, {}",
            user.company.name, user.company.title, user.company.department
        )),
        Line::from(format!("Email: {}  Phone: {}", user.email, user.phone)),
        Line::from(format!("Image: {}", user.image)),
    ];
    let summary_widget = Paragraph::new(summary).block(
        Block::default()
            .title(user.full_name())
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .borders(Borders::ALL),
    );
    frame.render_widget(summary_widget, chunks[0]);

    let width = chunks[1].width.saturating_sub(4).max(10) as usize;
    let about: Vec<Line<'_>> = wrap(&about_description(user), width)
        .into_iter()
        .map(|line| Line::from(line.into_owned()))
        .collect();
    let about_widget = Paragraph::new(about).block(
        Block::default()
            .title("About")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(about_widget, chunks[1]);
}
