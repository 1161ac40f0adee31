use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    app::{GridSurface, ListSurface, ViewMode},
    domain::User,
    fields::FieldId,
    form::{Derived, FormStore},
};

use super::components::{
    render_details, render_directory, render_footer, render_form, render_list_popup,
    render_message, render_notice_popup,
};

pub(crate) struct UiContext<'a> {
    pub body: BodyView<'a>,
    pub status: &'a str,
    pub help: Option<&'a str>,
    pub popup: Option<PopupRender<'a>>,
}

pub(crate) enum BodyView<'a> {
    Message(&'static str),
    Directory(DirectoryView<'a>),
    Details(&'a User),
    Form(FormView<'a>),
}

pub(crate) struct DirectoryView<'a> {
    pub search_term: &'a str,
    pub result_count: usize,
    pub view_mode: ViewMode,
    pub content: DirectoryContent<'a>,
}

pub(crate) enum DirectoryContent<'a> {
    Loading,
    Error,
    Empty,
    Grid {
        users: Vec<&'a User>,
        selected: usize,
        surface: &'a mut GridSurface,
    },
    List {
        users: Vec<&'a User>,
        selected: usize,
        surface: &'a mut ListSurface,
    },
}

pub(crate) struct FormView<'a> {
    pub form: &'a FormStore,
    pub visible: Vec<FieldId>,
    pub focus: usize,
    pub derived: Derived,
}

pub(crate) enum PopupRender<'a> {
    List {
        title: &'a str,
        options: &'a [String],
        selected: usize,
    },
    Notice {
        title: &'static str,
        body: String,
        hint: &'static str,
    },
}

pub(crate) fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(2)])
        .split(frame.area());

    match ctx.body {
        BodyView::Message(message) => render_message(frame, chunks[0], message),
        BodyView::Directory(view) => render_directory(frame, chunks[0], view),
        BodyView::Details(user) => render_details(frame, chunks[0], user),
        BodyView::Form(view) => render_form(frame, chunks[0], view),
    }

    render_footer(frame, chunks[1], ctx.status, ctx.help);

    match ctx.popup {
        Some(PopupRender::List {
            title,
            options,
            selected,
        }) => render_list_popup(frame, title, options, selected),
        Some(PopupRender::Notice { title, body, hint }) => {
            render_notice_popup(frame, title, &body, hint)
        }
        None => {}
    }
}
