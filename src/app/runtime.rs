use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::{
    domain::{User, filter_users_by_name},
    fetch::{ApiEvent, FetchError, FetchResult, QuerySlot, UserApi},
    fields::{self, FieldId, UiControl},
    form::{self, DraftStore, FileDraftStore, FormStore, MemoryDraftStore},
    presentation::{self, BodyView, DirectoryContent, DirectoryView, FormView, PopupRender, UiContext},
    scroll::{ScrollRestore, ScrollableContent},
};

use super::{
    AppPopup, GridSurface, ListSurface, SelectPopup, ViewMode,
    nav::Route,
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

const DIRECTORY_HELP: &str =
    "Type to search • Tab switch view • Arrows move • Enter details • Ctrl+Q quit";
const DETAILS_HELP: &str = "E edit • Esc back to directory • Ctrl+Q quit";
const EDIT_HELP: &str =
    "Tab/arrows fields • Enter pick option • Ctrl+E more details • Ctrl+S save • Esc cancel";

/// Entry point: configure and run the directory UI.
#[derive(Debug)]
pub struct UserDirectoryUi {
    base_url: String,
    options: UiOptions,
    draft_dir: Option<PathBuf>,
    scope: String,
    route: Route,
}

impl UserDirectoryUi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            options: UiOptions::default(),
            draft_dir: None,
            scope: "default".to_string(),
            route: Route::Directory,
        }
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Directory for draft files. Without one, drafts live in memory only.
    pub fn with_draft_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.draft_dir = Some(dir.into());
        self
    }

    /// Persistence-scope token keeping independent sessions apart.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    pub fn run(self) -> Result<()> {
        let (sender, receiver) = mpsc::channel();
        let api = UserApi::new(self.base_url, sender);
        let mut app = App::new(api, receiver, self.options, self.draft_dir, self.scope);
        app.navigate(self.route);
        let mut terminal = TerminalGuard::new()?;
        app.run(&mut terminal)
    }
}

enum Screen {
    Directory,
    Details { user_id: String },
    Edit(EditSession),
}

struct EditSession {
    user_id: String,
    form: FormStore,
    focus: usize,
    saving: bool,
}

impl EditSession {
    fn visible_fields(&self) -> Vec<FieldId> {
        let mut visible: Vec<FieldId> = fields::MAIN_FIELDS.to_vec();
        if self.form.show_more_details() {
            visible.extend(fields::ADDITIONAL_FIELDS);
        }
        visible
    }

    fn focused_field(&self) -> Option<FieldId> {
        self.visible_fields().get(self.focus).copied()
    }
}

enum PopupAction {
    None,
    Close,
    Apply { field: FieldId, value: String },
    Discard { user_id: String },
    DismissFailure { user_id: String },
}

struct App {
    api: UserApi,
    events: Receiver<ApiEvent>,
    options: UiOptions,
    draft_dir: Option<PathBuf>,
    scope: String,

    users: QuerySlot<Vec<User>>,
    user_queries: HashMap<String, QuerySlot<User>>,

    screen: Screen,
    search_term: String,
    view_mode: ViewMode,
    selected: usize,
    grid: GridSurface,
    list: ListSurface,
    scroll_restore: ScrollRestore,

    status: StatusLine,
    popup: Option<AppPopup>,
    should_quit: bool,
}

impl App {
    fn new(
        api: UserApi,
        events: Receiver<ApiEvent>,
        options: UiOptions,
        draft_dir: Option<PathBuf>,
        scope: String,
    ) -> Self {
        let mut app = Self {
            api,
            events,
            options,
            draft_dir,
            scope,
            users: QuerySlot::new(),
            user_queries: HashMap::new(),
            screen: Screen::Directory,
            search_term: String::new(),
            view_mode: ViewMode::Grid,
            selected: 0,
            grid: GridSurface::default(),
            list: ListSurface::default(),
            scroll_restore: ScrollRestore::new(),
            status: StatusLine::new(),
            popup: None,
            should_quit: false,
        };
        let generation = app.users.begin();
        app.api.fetch_users(generation);
        app
    }

    fn navigate(&mut self, route: Route) {
        match route {
            Route::Directory => {}
            Route::Details { user_id } => self.open_details(user_id),
            Route::Edit { user_id } => self.open_edit(Some(user_id)),
        }
    }

    fn run(&mut self, terminal: &mut TerminalGuard) -> Result<()> {
        while !self.should_quit {
            self.drain_api_events();
            terminal.draw(|frame| self.draw(frame))?;
            self.advance_scroll_restore(Instant::now());
            if event::poll(self.options.tick_rate).context("failed to poll for input")? {
                if let Event::Key(key) = event::read().context("failed to read input")? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    // ----- remote results -----

    fn drain_api_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                ApiEvent::UsersLoaded { generation, result } => {
                    if self.users.settle(generation, result) {
                        if let FetchResult::Error(err) = self.users.result() {
                            let reason = err.to_string();
                            self.status.fetch_failed(&reason);
                        }
                    }
                }
                ApiEvent::UserLoaded {
                    id,
                    generation,
                    result,
                } => {
                    let slot = self.user_queries.entry(id.clone()).or_default();
                    if slot.settle(generation, result) {
                        let loaded = slot.result().success().cloned();
                        if let (Some(user), Screen::Edit(session)) = (loaded, &mut self.screen) {
                            if session.user_id == id {
                                session.form.on_user_loaded(&user);
                            }
                        }
                    }
                }
                ApiEvent::UserUpdated { id, result } => self.on_user_updated(id, result),
            }
        }
    }

    fn on_user_updated(&mut self, id: String, result: Result<User, FetchError>) {
        if let Screen::Edit(session) = &mut self.screen {
            if session.user_id == id {
                session.saving = false;
            }
        }
        match result {
            Ok(updated) => {
                if let FetchResult::Success(list) = self.users.result_mut() {
                    if let Some(existing) = list.iter_mut().find(|user| user.id == id) {
                        *existing = updated.clone();
                    }
                }
                self.user_queries
                    .entry(id.clone())
                    .or_default()
                    .put(updated);
                self.status.saved();
                if matches!(&self.screen, Screen::Edit(session) if session.user_id == id) {
                    self.open_details(id);
                }
            }
            Err(err) => {
                let message = err.to_string();
                self.status.save_failed(&message);
                if matches!(&self.screen, Screen::Edit(session) if session.user_id == id) {
                    self.popup = Some(AppPopup::SaveFailed {
                        user_id: id,
                        message,
                    });
                }
            }
        }
    }

    // ----- navigation -----

    fn open_details(&mut self, user_id: String) {
        self.ensure_user_query(&user_id);
        self.scroll_restore.cancel();
        self.popup = None;
        self.screen = Screen::Details { user_id };
        self.status.ready();
    }

    fn open_edit(&mut self, user_id: Option<String>) {
        let Some(user_id) = user_id else {
            // No identity to edit; fall back to the listing.
            self.status.set_raw("No user selected");
            self.back_to_directory(None);
            return;
        };
        self.ensure_user_query(&user_id);
        let mut form = FormStore::open(&self.scope, &user_id, self.new_draft_store());
        if let Some(user) = self
            .user_queries
            .get(&user_id)
            .and_then(|slot| slot.result().success())
        {
            form.on_user_loaded(user);
        }
        self.scroll_restore.cancel();
        self.popup = None;
        self.screen = Screen::Edit(EditSession {
            user_id,
            form,
            focus: 0,
            saving: false,
        });
        self.status.ready();
    }

    fn back_to_directory(&mut self, return_to: Option<String>) {
        self.popup = None;
        self.screen = Screen::Directory;
        match return_to {
            Some(user_id) => self.scroll_restore.arm(user_id),
            None => self.scroll_restore.cancel(),
        }
        self.status.ready();
    }

    fn new_draft_store(&self) -> Box<dyn DraftStore> {
        match &self.draft_dir {
            Some(dir) => Box::new(FileDraftStore::new(dir)),
            None => Box::new(MemoryDraftStore::new()),
        }
    }

    /// Make sure a single-user query exists, seeding it from the list
    /// cache when the record is already known.
    fn ensure_user_query(&mut self, user_id: &str) {
        let settled = self
            .user_queries
            .get(user_id)
            .is_some_and(|slot| !slot.result().is_loading());
        if settled {
            return;
        }
        let cached = self
            .users
            .result()
            .success()
            .and_then(|list| list.iter().find(|user| user.id == user_id))
            .cloned();
        if let Some(user) = cached {
            self.user_queries
                .entry(user_id.to_string())
                .or_default()
                .put(user);
            return;
        }
        let generation = self
            .user_queries
            .entry(user_id.to_string())
            .or_default()
            .begin();
        self.api.fetch_user(user_id, generation);
    }

    // ----- scroll restoration -----

    fn advance_scroll_restore(&mut self, now: Instant) {
        if !matches!(self.screen, Screen::Directory) {
            return;
        }
        self.scroll_restore
            .note_painted(self.users.result().is_loading(), now);
        if let Some(target) = self.scroll_restore.take_due(now) {
            let landed = match self.view_mode {
                ViewMode::Grid => {
                    let index = self.grid.item_ids.iter().position(|id| *id == target);
                    self.grid.scroll_to_user(&target).then_some(index).flatten()
                }
                ViewMode::List => {
                    let index = self.list.item_ids.iter().position(|id| *id == target);
                    self.list.scroll_to_user(&target).then_some(index).flatten()
                }
            };
            if let Some(index) = landed {
                self.selected = index;
            }
        }
    }

    // ----- input -----

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }
        if self.popup.is_some() {
            self.handle_popup_key(key);
            return;
        }
        match &self.screen {
            Screen::Directory => self.handle_directory_key(key),
            Screen::Details { .. } => self.handle_details_key(key),
            Screen::Edit(_) => self.handle_edit_key(key),
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let action = match self.popup.as_mut() {
            Some(AppPopup::Select(select)) => match key.code {
                KeyCode::Up => {
                    select.select_previous();
                    PopupAction::None
                }
                KeyCode::Down => {
                    select.select_next();
                    PopupAction::None
                }
                KeyCode::Enter => match select.selection() {
                    Some(value) => PopupAction::Apply {
                        field: select.field,
                        value: value.to_string(),
                    },
                    None => PopupAction::Close,
                },
                KeyCode::Esc => PopupAction::Close,
                _ => PopupAction::None,
            },
            Some(AppPopup::ConfirmDiscard { user_id }) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => PopupAction::Discard {
                    user_id: user_id.clone(),
                },
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => PopupAction::Close,
                _ => PopupAction::None,
            },
            Some(AppPopup::SaveFailed { user_id, .. }) => match key.code {
                KeyCode::Enter | KeyCode::Esc => PopupAction::DismissFailure {
                    user_id: user_id.clone(),
                },
                _ => PopupAction::None,
            },
            None => PopupAction::None,
        };

        match action {
            PopupAction::None => {}
            PopupAction::Close => {
                self.popup = None;
                self.status.ready();
            }
            PopupAction::Apply { field, value } => {
                self.popup = None;
                if let Screen::Edit(session) = &mut self.screen {
                    session.form.on_field_changed(field, value);
                }
            }
            PopupAction::Discard { user_id } => {
                // Confirmed: abandon the edits and leave the form.
                self.open_details(user_id);
            }
            PopupAction::DismissFailure { user_id } => {
                // The failed save is terminal for this session; leave anyway.
                self.open_details(user_id);
            }
        }
    }

    fn handle_directory_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.view_mode = self.view_mode.toggled(),
            KeyCode::Backspace => {
                self.search_term.pop();
                self.selected = 0;
            }
            KeyCode::Enter => {
                if let Some(user_id) = self.selected_user_id() {
                    self.open_details(user_id);
                }
            }
            KeyCode::Up => self.move_selection(-self.vertical_step()),
            KeyCode::Down => self.move_selection(self.vertical_step()),
            KeyCode::Left if self.view_mode == ViewMode::Grid => self.move_selection(-1),
            KeyCode::Right if self.view_mode == ViewMode::Grid => self.move_selection(1),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_term.push(c);
                self.selected = 0;
            }
            _ => {}
        }
    }

    fn vertical_step(&self) -> isize {
        match self.view_mode {
            ViewMode::Grid => self.grid.columns.max(1) as isize,
            ViewMode::List => 1,
        }
    }

    fn filtered_count(&self) -> usize {
        self.users
            .result()
            .success()
            .map(|list| filter_users_by_name(list, &self.search_term).len())
            .unwrap_or(0)
    }

    fn selected_user_id(&self) -> Option<String> {
        let list = self.users.result().success()?;
        let filtered = filter_users_by_name(list, &self.search_term);
        filtered.get(self.selected).map(|user| user.id.clone())
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.filtered_count();
        if count == 0 {
            return;
        }
        let next = (self.selected as isize + delta).clamp(0, count as isize - 1);
        self.selected = next as usize;
        match self.view_mode {
            ViewMode::Grid => {
                let row = self.selected / self.grid.columns.max(1);
                self.grid.ensure_row_visible(row);
            }
            ViewMode::List => self.list.ensure_visible(self.selected),
        }
    }

    fn handle_details_key(&mut self, key: KeyEvent) {
        let Screen::Details { user_id } = &self.screen else {
            return;
        };
        let user_id = user_id.clone();
        match key.code {
            KeyCode::Char('e') | KeyCode::Char('E') => self.open_edit(Some(user_id)),
            KeyCode::Esc | KeyCode::Backspace => self.back_to_directory(Some(user_id)),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.request_cancel();
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('e') => {
                    if let Screen::Edit(session) = &mut self.screen {
                        session.form.on_toggle_more_details();
                        let upper = session.visible_fields().len().saturating_sub(1);
                        session.focus = session.focus.min(upper);
                    }
                }
                _ => {}
            }
            return;
        }

        let Screen::Edit(session) = &mut self.screen else {
            return;
        };
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                let count = session.visible_fields().len();
                session.focus = (session.focus + 1) % count.max(1);
            }
            KeyCode::BackTab | KeyCode::Up => {
                let count = session.visible_fields().len().max(1);
                session.focus = (session.focus + count - 1) % count;
            }
            KeyCode::Enter => {
                if let Some(field) = session.focused_field() {
                    if let Some(popup) = SelectPopup::from_field(field, session.form.value_of(field))
                    {
                        self.popup = Some(AppPopup::Select(popup));
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = session.focused_field() {
                    if !is_select_field(field) {
                        let mut value = session.form.value_of(field).to_string();
                        value.pop();
                        session.form.on_field_changed(field, value);
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = session.focused_field() {
                    if !is_select_field(field) {
                        let mut value = session.form.value_of(field).to_string();
                        value.push(c);
                        session.form.on_field_changed(field, value);
                    }
                }
            }
            _ => {}
        }
    }

    fn request_cancel(&mut self) {
        let Screen::Edit(session) = &self.screen else {
            return;
        };
        let user_id = session.user_id.clone();
        let dirty = match self
            .user_queries
            .get(&user_id)
            .and_then(|slot| slot.result().success())
        {
            Some(user) => form::derive(session.form.values(), user, session.saving).is_dirty,
            // Record never arrived; a restored draft is the only thing at risk.
            None => session.form.has_editing_history(),
        };
        if dirty && self.options.confirm_discard {
            self.popup = Some(AppPopup::ConfirmDiscard { user_id });
            self.status
                .set_raw("You have unsaved changes. Leave without saving?");
        } else {
            self.open_details(user_id);
        }
    }

    fn submit(&mut self) {
        let Screen::Edit(session) = &mut self.screen else {
            return;
        };
        let Some(user) = self
            .user_queries
            .get(&session.user_id)
            .and_then(|slot| slot.result().success())
        else {
            return;
        };
        match form::decide_submit(session.form.values(), user, session.saving) {
            form::SubmitDecision::Send(patch) => {
                session.saving = true;
                self.api.update_user(&session.user_id, patch);
                self.status.saving();
            }
            form::SubmitDecision::Invalid { issues } => self.status.issues_remaining(issues),
            form::SubmitDecision::Unchanged => self.status.nothing_to_save(),
            form::SubmitDecision::Incomplete => self.status.set_raw("Fill in all required fields"),
            form::SubmitDecision::Busy => {}
        }
    }

    // ----- rendering -----

    fn current_help(&self) -> Option<&'static str> {
        if !self.options.show_help {
            return None;
        }
        Some(match &self.screen {
            Screen::Directory => DIRECTORY_HELP,
            Screen::Details { .. } => DETAILS_HELP,
            Screen::Edit(_) => EDIT_HELP,
        })
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let help = self.current_help();
        let popup = match &self.popup {
            Some(AppPopup::Select(select)) => Some(PopupRender::List {
                title: &select.title,
                options: &select.options,
                selected: select.selected,
            }),
            Some(AppPopup::ConfirmDiscard { .. }) => Some(PopupRender::Notice {
                title: "Unsaved changes",
                body: "You have unsaved changes. Are you sure you want to leave without saving?"
                    .to_string(),
                hint: "Y leave • N stay",
            }),
            Some(AppPopup::SaveFailed { message, .. }) => Some(PopupRender::Notice {
                title: "Save failed",
                body: message.clone(),
                hint: "Press Enter to continue",
            }),
            None => None,
        };

        let result_count = self.filtered_count();
        let body = match &self.screen {
            Screen::Directory => {
                let content = match self.users.result() {
                    FetchResult::Loading => DirectoryContent::Loading,
                    FetchResult::Error(_) => DirectoryContent::Error,
                    FetchResult::Success(list) => {
                        let filtered = filter_users_by_name(list, &self.search_term);
                        if filtered.is_empty() {
                            DirectoryContent::Empty
                        } else {
                            let selected = self.selected.min(filtered.len() - 1);
                            let item_ids: Vec<String> =
                                filtered.iter().map(|user| user.id.clone()).collect();
                            match self.view_mode {
                                ViewMode::Grid => {
                                    self.grid.item_ids = item_ids;
                                    DirectoryContent::Grid {
                                        users: filtered,
                                        selected,
                                        surface: &mut self.grid,
                                    }
                                }
                                ViewMode::List => {
                                    self.list.item_ids = item_ids;
                                    DirectoryContent::List {
                                        users: filtered,
                                        selected,
                                        surface: &mut self.list,
                                    }
                                }
                            }
                        }
                    }
                };
                BodyView::Directory(DirectoryView {
                    search_term: &self.search_term,
                    result_count,
                    view_mode: self.view_mode,
                    content,
                })
            }
            Screen::Details { user_id } => {
                match self
                    .user_queries
                    .get(user_id)
                    .map(|slot| slot.result())
                {
                    None | Some(FetchResult::Loading) => {
                        BodyView::Message("Loading user details...")
                    }
                    Some(FetchResult::Error(_)) => BodyView::Message("Error loading user details"),
                    Some(FetchResult::Success(user)) => BodyView::Details(user),
                }
            }
            Screen::Edit(session) => {
                match self
                    .user_queries
                    .get(&session.user_id)
                    .map(|slot| slot.result())
                {
                    None | Some(FetchResult::Loading) => {
                        BodyView::Message("Loading user details...")
                    }
                    Some(FetchResult::Error(_)) => BodyView::Message("Error loading user details"),
                    Some(FetchResult::Success(user)) => {
                        let derived =
                            form::derive(session.form.values(), user, session.saving);
                        BodyView::Form(FormView {
                            form: &session.form,
                            visible: session.visible_fields(),
                            focus: session.focus,
                            derived,
                        })
                    }
                }
            }
        };

        let ctx = UiContext {
            body,
            status: self.status.message(),
            help,
            popup,
        };
        presentation::draw(frame, ctx);
    }
}

fn is_select_field(field: FieldId) -> bool {
    matches!(fields::descriptor(field).control, UiControl::Select { .. })
}
