use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, status: &str, help: Option<&str>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let actions = help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Actions: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let status_widget = Paragraph::new(format!("Status: {status}")).wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[1]);
}

/// Full-body placeholder for loading and error states.
pub fn render_message(frame: &mut Frame<'_>, area: Rect, message: &str) {
    let widget = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}
