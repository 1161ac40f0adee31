use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{GridSurface, ListSurface, ViewMode};
use crate::domain::User;

use super::super::view::{DirectoryContent, DirectoryView};

const CARD_HEIGHT: u16 = 5;
const CARD_MIN_WIDTH: u16 = 28;

pub fn render_directory(frame: &mut Frame<'_>, area: Rect, view: DirectoryView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_header(frame, chunks[0], &view);

    match view.content {
        DirectoryContent::Loading => render_placeholder(frame, chunks[1], "Loading users..."),
        DirectoryContent::Error => render_placeholder(frame, chunks[1], "Error loading users"),
        DirectoryContent::Empty => {
            let message = if view.search_term.trim().is_empty() {
                "No users found".to_string()
            } else {
                format!("No users found matching \"{}\"", view.search_term)
            };
            render_placeholder(frame, chunks[1], &message);
        }
        DirectoryContent::Grid {
            users,
            selected,
            surface,
        } => render_grid(frame, chunks[1], &users, selected, surface),
        DirectoryContent::List {
            users,
            selected,
            surface,
        } => render_list(frame, chunks[1], &users, selected, surface),
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, view: &DirectoryView<'_>) {
    let mode = match view.view_mode {
        ViewMode::Grid => "grid",
        ViewMode::List => "list",
    };
    let line = format!(
        "Search: {}▏   {} result(s) • {} view (Tab switches)",
        view.search_term, view.result_count, mode
    );
    let header = Paragraph::new(line).block(Block::default().title("Users").borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_placeholder(frame: &mut Frame<'_>, area: Rect, message: &str) {
    let widget = Paragraph::new(message.to_string()).block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_grid(
    frame: &mut Frame<'_>,
    area: Rect,
    users: &[&User],
    selected: usize,
    surface: &mut GridSurface,
) {
    let columns = (area.width / CARD_MIN_WIDTH).max(1) as usize;
    let viewport_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    surface.columns = columns;
    surface.viewport_rows = viewport_rows;
    surface.clamp_offset();

    let card_width = area.width / columns as u16;
    let row_count = surface.row_count();
    for visible_row in 0..viewport_rows {
        let row = surface.offset_row + visible_row;
        if row >= row_count {
            break;
        }
        let y = area.y + visible_row as u16 * CARD_HEIGHT;
        for column in 0..columns {
            let index = row * columns + column;
            let Some(user) = users.get(index) else {
                break;
            };
            let card = Rect {
                x: area.x + column as u16 * card_width,
                y,
                width: card_width,
                height: CARD_HEIGHT,
            };
            render_card(frame, card, user, index == selected);
        }
    }
}

fn render_card(frame: &mut Frame<'_>, area: Rect, user: &User, selected: bool) {
    let border_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let width = area.width.saturating_sub(2) as usize;
    let lines = vec![
        Line::from(truncated(
            &format!("{} | {} {}", user.age, user.address.city, user.address.state_code),
            width,
        )),
        Line::from(truncated(&user.email, width)),
        Line::from("Enter: details"),
    ];
    let card = Paragraph::new(lines).block(
        Block::default()
            .title(truncated(&user.full_name(), width))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

fn render_list(
    frame: &mut Frame<'_>,
    area: Rect,
    users: &[&User],
    selected: usize,
    surface: &mut ListSurface,
) {
    let block = Block::default().title("All Users").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_area = Rect {
        height: 1.min(inner.height),
        ..inner
    };
    let header = Paragraph::new(format!(
        "  {:<24} {:<30} {:>3}  {}",
        "Name", "Email", "Age", "Location"
    ))
    .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, header_area);

    let rows_area = Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    };
    surface.viewport_rows = rows_area.height.max(1) as usize;
    surface.clamp_offset();

    let items: Vec<ListItem<'static>> = users
        .iter()
        .map(|user| {
            ListItem::new(format!(
                "{:<24} {:<30} {:>3}  {}, {}",
                truncated(&user.full_name(), 24),
                truncated(&user.email, 30),
                user.age,
                user.address.city,
                user.address.state_code
            ))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(selected.min(users.len().saturating_sub(1))));
    *state.offset_mut() = surface.offset;

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, rows_area, &mut state);
    surface.offset = state.offset();
}

fn truncated(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
