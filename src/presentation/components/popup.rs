use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

/// Rect of the given size centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render_list_popup(frame: &mut Frame<'_>, title: &str, options: &[String], selected: usize) {
    if options.is_empty() {
        return;
    }
    let max_width = options
        .iter()
        .map(|option| option.chars().count())
        .max()
        .unwrap_or(10) as u16;
    let width = max_width
        .max(title.chars().count() as u16)
        .saturating_add(6);
    let height = (options.len() as u16).saturating_add(2).max(3);
    let area = centered(frame.area(), width, height);
    frame.render_widget(Clear, area);

    let items: Vec<ListItem<'static>> = options
        .iter()
        .map(|option| ListItem::new(option.clone()))
        .collect();
    let mut state = ListState::default();
    state.select(Some(selected.min(options.len().saturating_sub(1))));

    let list = List::new(items)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_notice_popup(frame: &mut Frame<'_>, title: &str, body: &str, hint: &str) {
    let width = frame.area().width.saturating_sub(8).clamp(20, 60);
    let area = centered(frame.area(), width, 6);
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(body.to_string()),
        Line::from(""),
        Line::styled(hint.to_string(), Style::default().fg(Color::Yellow)),
    ];
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(widget, area);
}
