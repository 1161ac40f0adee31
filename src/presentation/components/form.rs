use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::fields::{self, FieldId, UiControl};
use crate::form;

use super::super::view::FormView;

pub fn render_form(frame: &mut Frame<'_>, area: Rect, view: FormView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(4)])
        .split(area);

    render_actions(frame, chunks[0], &view);
    render_fields(frame, chunks[1], &view);
}

fn render_actions(frame: &mut Frame<'_>, area: Rect, view: &FormView<'_>) {
    let save = if view.derived.is_saving {
        Span::styled("Saving...", Style::default().fg(Color::Yellow))
    } else if view.derived.can_submit {
        Span::styled("Save (Ctrl+S)", Style::default().fg(Color::Green))
    } else {
        Span::styled("Save (Ctrl+S, disabled)", Style::default().fg(Color::DarkGray))
    };
    let more = if view.form.show_more_details() {
        "Hide Additional Details (Ctrl+E)"
    } else {
        "Add More Details (Ctrl+E)"
    };
    let line = Line::from(vec![
        save,
        Span::raw(" • Cancel (Esc) • "),
        Span::raw(more),
    ]);
    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            "User Form",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        line,
    ]);
    frame.render_widget(widget, area);
}

fn render_fields(frame: &mut Frame<'_>, area: Rect, view: &FormView<'_>) {
    let first_additional = fields::ADDITIONAL_FIELDS.first().copied();
    let items: Vec<ListItem<'static>> = view
        .visible
        .iter()
        .enumerate()
        .map(|(index, &id)| field_item(view, index, id, first_additional))
        .collect();

    let mut state = ListState::default();
    state.select(Some(view.focus.min(view.visible.len().saturating_sub(1))));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut state);
}

fn field_item(
    view: &FormView<'_>,
    index: usize,
    id: FieldId,
    first_additional: Option<FieldId>,
) -> ListItem<'static> {
    let descriptor = fields::descriptor(id);
    let focused = index == view.focus;
    let value = view.form.value_of(id);
    let error = form::field_error(view.form.values(), id);

    let mut lines: Vec<Line<'static>> = Vec::new();
    if first_additional == Some(id) {
        lines.push(Line::from(Span::styled(
            "— Additional Details —",
            Style::default().fg(Color::Cyan),
        )));
    }

    let mut label = descriptor.label.to_string();
    if descriptor.required {
        label.push_str(" *");
    }
    lines.push(Line::from(Span::styled(
        label,
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let shown = if value.is_empty() && !focused {
        Span::styled(
            placeholder_for(&descriptor.control).to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else if focused {
        Span::raw(format!("{value}▏"))
    } else {
        Span::raw(value.to_string())
    };
    let mut value_line = vec![Span::raw("  "), shown];
    if matches!(descriptor.control, UiControl::Select { .. }) {
        value_line.push(Span::styled(
            "  (Enter to choose)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(value_line));

    if let Some(message) = error {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(Color::Red),
        )));
    }

    ListItem::new(lines)
}

fn placeholder_for(control: &UiControl) -> &'static str {
    match control {
        UiControl::Text { placeholder }
        | UiControl::Email { placeholder }
        | UiControl::UrlWithPreview { placeholder } => placeholder,
        UiControl::Number { .. } => "0",
        UiControl::Date => "YYYY-MM-DD",
        UiControl::Select { .. } => "Select...",
    }
}
