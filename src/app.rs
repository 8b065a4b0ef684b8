use crate::config::Config;
use crate::error::HubError;
use crate::hub::{Hub, ThemeEdit};
use crate::input::{handle_key, Action};
use crate::links::{self, Direction};
use crate::models::hub_config::{ConfigText, ConfigToggle};
use crate::models::link::{LinkDraft, LinkEntry, FALLBACK_ICON};
use crate::models::theme::presets;
use crate::store::loader::{LoadSource, Loaded};
use crate::suggest::{LinkMetadata, MetadataSuggester};
use crate::ui::theme::{parse_hex, Theme};
use crate::ui::{admin, dashboard, help, popup};
use anyhow::Result;
use crossterm::event::{self, Event, MouseEventKind};
use ratatui::widgets::ListState;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

// ── View / tab enums ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveView {
    Dashboard,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdminTab {
    Links,
    Form,
    Theme,
    Settings,
}

impl AdminTab {
    pub const ALL: [AdminTab; 4] = [Self::Links, Self::Form, Self::Theme, Self::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Links    => "Links",
            Self::Form     => "Link form",
            Self::Theme    => "Theme",
            Self::Settings => "Settings",
        }
    }

    fn step(&self, delta: i32) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0) as i32;
        let n = Self::ALL.len() as i32;
        Self::ALL[((idx + delta).rem_euclid(n)) as usize]
    }
}

// ── Overlays & prompts ────────────────────────────────────────────────

/// An action waiting for an explicit yes.
#[derive(Debug, Clone, PartialEq)]
pub enum Pending {
    DeleteLink { id: String, title: String },
    ApplyPreset { id: String, name: String },
    ResetTheme,
    ClearCache,
}

impl Pending {
    pub fn prompt(&self) -> String {
        match self {
            Pending::DeleteLink { title, .. } => format!("Delete \"{}\" permanently?", title),
            Pending::ApplyPreset { name, .. } => format!("Replace the current theme with \"{}\"?", name),
            Pending::ResetTheme               => "Reset the theme to the default preset?".to_string(),
            Pending::ClearCache               => "Erase all locally cached hub data?".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Help,
    Login,
    Confirm(Pending),
}

/// Single-line text editor targets (theme colours, config strings).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextTarget {
    Accent,
    Background,
    BackgroundImage,
    Config(ConfigText),
}

impl TextTarget {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accent          => "Accent colour (#rrggbb)",
            Self::Background      => "Background colour (#rrggbb)",
            Self::BackgroundImage => "Background image URL (empty = none)",
            Self::Config(c)       => c.label(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextEdit {
    pub target: TextTarget,
    pub buffer: String,
}

// ── Link form ─────────────────────────────────────────────────────────

pub const FORM_FIELDS: [&str; 5] = ["Title", "URL", "Description", "Category", "Icon"];
const F_TITLE: usize = 0;
const F_URL:   usize = 1;
const F_DESC:  usize = 2;
const F_CAT:   usize = 3;
const F_ICON:  usize = 4;

#[derive(Debug, Clone, Default)]
pub struct LinkForm {
    /// Id of the link being edited; `None` = new link.
    pub editing: Option<String>,
    pub values:  [String; 5],
    pub focus:   usize,
}

impl LinkForm {
    fn blank() -> Self {
        let mut f = Self::default();
        f.values[F_ICON] = FALLBACK_ICON.to_string();
        f
    }

    fn from_entry(e: &LinkEntry) -> Self {
        Self {
            editing: Some(e.id.clone()),
            values:  [e.title.clone(), e.url.clone(), e.description.clone(), e.category.clone(), e.icon.clone()],
            focus:   0,
        }
    }

    fn draft(&self) -> LinkDraft {
        let v = &self.values;
        LinkDraft {
            title:       Some(v[F_TITLE].clone()),
            url:         Some(v[F_URL].clone()),
            description: Some(v[F_DESC].clone()),
            category:    Some(v[F_CAT].clone()).filter(|s| !s.trim().is_empty()),
            icon:        Some(v[F_ICON].clone()).filter(|s| !s.trim().is_empty()),
            order:       None,
        }
    }

    fn apply_suggestion(&mut self, m: LinkMetadata) {
        self.values[F_DESC] = m.description;
        self.values[F_CAT]  = m.category;
        self.values[F_ICON] = m.icon;
    }
}

// ── Admin panel rows ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeRow {
    Preset(usize),
    Reset,
    Particles,
    Blur,
    Opacity,
    Fixed,
    Accent,
    Background,
    Image,
}

pub fn theme_rows() -> Vec<ThemeRow> {
    let mut rows: Vec<ThemeRow> = (0..presets().len()).map(ThemeRow::Preset).collect();
    rows.extend([
        ThemeRow::Reset, ThemeRow::Particles, ThemeRow::Blur, ThemeRow::Opacity,
        ThemeRow::Fixed, ThemeRow::Accent, ThemeRow::Background, ThemeRow::Image,
    ]);
    rows
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsRow {
    Toggle(ConfigToggle),
    Text(ConfigText),
    Layout,
    ForceSync,
    ClearCache,
    Logout,
}

pub fn settings_rows() -> Vec<SettingsRow> {
    let mut rows: Vec<SettingsRow> = ConfigToggle::ALL.iter().map(|t| SettingsRow::Toggle(*t)).collect();
    rows.extend(ConfigText::ALL.iter().map(|t| SettingsRow::Text(*t)));
    rows.extend([SettingsRow::Layout, SettingsRow::ForceSync, SettingsRow::ClearCache, SettingsRow::Logout]);
    rows
}

// ── App ───────────────────────────────────────────────────────────────

const FLASH_TTL: Duration = Duration::from_secs(4);
const PAGE:      usize = 5;

pub struct App {
    pub config: Config,
    pub hub:    Hub,
    pub theme:  Theme,

    // View routing
    pub active_view: ActiveView,
    pub admin_tab:   AdminTab,
    pub overlay:     Overlay,

    // Dashboard state
    pub search:    String,
    pub searching: bool,
    pub category:  Option<String>,
    pub selected:  usize,

    // Admin panel state
    pub links_state:     ListState,
    pub theme_cursor:    usize,
    pub settings_cursor: usize,
    pub form:            LinkForm,
    pub text_edit:       Option<TextEdit>,
    pub password:        String,

    // Status-line message: (text, shown_at, is_error)
    pub flash: Option<(String, Instant, bool)>,

    // Metadata suggestions run off-thread
    suggester:      Arc<dyn MetadataSuggester>,
    pub suggesting: bool,
    suggest_tx:     mpsc::Sender<(String, Option<LinkMetadata>)>,
    suggest_rx:     mpsc::Receiver<(String, Option<LinkMetadata>)>,

    // Startup remote load, adopted when it lands
    startup: Option<mpsc::Receiver<Loaded>>,

    tick: Duration,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, hub: Hub, suggester: Arc<dyn MetadataSuggester>) -> Self {
        let (suggest_tx, suggest_rx) = mpsc::channel();
        let theme = Theme::from_settings(&hub.state().theme, &hub.effective_accent());
        let tick = Duration::from_millis(config.general.tick_ms.clamp(50, 2000));

        Self {
            config,
            hub,
            theme,
            active_view:     ActiveView::Dashboard,
            admin_tab:       AdminTab::Links,
            overlay:         Overlay::None,
            search:          String::new(),
            searching:       false,
            category:        None,
            selected:        0,
            links_state:     ListState::default(),
            theme_cursor:    0,
            settings_cursor: 0,
            form:            LinkForm::blank(),
            text_edit:       None,
            password:        String::new(),
            flash:           None,
            suggester,
            suggesting:      false,
            suggest_tx,
            suggest_rx,
            startup:         None,
            tick,
            should_quit:     false,
        }
    }

    /// Show the local snapshot now and swap in the remote one when `rx` delivers.
    pub fn with_startup_load(mut self, rx: mpsc::Receiver<Loaded>) -> Self {
        self.hub.begin_load();
        self.startup = Some(rx);
        self
    }

    // ── Main event loop ───────────────────────────────────────────────

    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        loop {
            self.hub.poll_sync();
            self.consume_startup_load();
            self.consume_suggestions();
            self.refresh_theme();
            self.clamp_selection();

            terminal.draw(|f| {
                match self.active_view {
                    ActiveView::Dashboard => dashboard::render(f, self),
                    ActiveView::Admin     => admin::render(f, self),
                }
                match &self.overlay {
                    Overlay::None       => {}
                    Overlay::Help       => help::render(f, &self.theme),
                    Overlay::Login      => popup::render_login(f, self.password.chars().count(), &self.theme),
                    Overlay::Confirm(p) => popup::render_confirm(f, &p.prompt(), &self.theme),
                }
                if let Some(edit) = &self.text_edit {
                    popup::render_text_edit(f, edit, &self.theme);
                }
            })?;

            if event::poll(self.tick)? {
                match event::read()? {
                    Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                        let action = handle_key(key, self.is_typing());
                        self.handle_action(action);
                    }
                    Event::Mouse(me) => match me.kind {
                        MouseEventKind::ScrollDown => self.handle_action(Action::SelectDown),
                        MouseEventKind::ScrollUp   => self.handle_action(Action::SelectUp),
                        _ => {}
                    },
                    _ => {}
                }
            }

            if self.should_quit { break; }
        }
        Ok(())
    }

    fn consume_startup_load(&mut self) {
        let Some(rx) = &self.startup else { return };
        match rx.try_recv() {
            Ok(loaded) => {
                self.startup = None;
                let remote = loaded.source == LoadSource::Remote;
                self.hub.adopt(loaded);
                if remote {
                    self.flash_ok("Hub loaded from remote store");
                } else {
                    self.flash_err("Remote store unavailable, using local cache");
                }
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.startup = None;
                self.hub.adopt(Loaded { state: self.hub.state().clone(), source: LoadSource::Local });
            }
        }
    }

    fn refresh_theme(&mut self) {
        self.theme = Theme::from_settings(&self.hub.state().theme, &self.hub.effective_accent());
    }

    /// Whether printable keys should go into a text field.
    pub fn is_typing(&self) -> bool {
        self.text_edit.is_some()
            || self.overlay == Overlay::Login
            || (self.overlay == Overlay::None && self.searching)
            || (self.overlay == Overlay::None
                && self.active_view == ActiveView::Admin
                && self.admin_tab == AdminTab::Form)
    }

    // ── Views over the hub snapshot ────────────────────────────────────

    pub fn visible_links(&self) -> Vec<&LinkEntry> {
        links::filtered(&self.hub.state().links, &self.search, self.category.as_deref())
    }

    /// The search bar shows when enabled and there is something to search or edit.
    pub fn search_visible(&self) -> bool {
        let state = self.hub.state();
        state.config.show_search && (!state.links.is_empty() || self.hub.is_admin())
    }

    pub fn categories(&self) -> Vec<String> {
        links::categories(&self.hub.state().links)
    }

    pub fn sorted_links(&self) -> Vec<&LinkEntry> {
        links::sorted(&self.hub.state().links)
    }

    fn clamp_selection(&mut self) {
        if let Some(c) = &self.category {
            if !self.categories().contains(c) {
                self.category = None;
            }
        }
        let n = self.visible_links().len();
        self.selected = self.selected.min(n.saturating_sub(1));

        let total = self.hub.state().links.len();
        match self.links_state.selected() {
            _ if total == 0 => self.links_state.select(None),
            None            => self.links_state.select(Some(0)),
            Some(i)         => self.links_state.select(Some(i.min(total - 1))),
        }
    }

    // ── Flash messages ─────────────────────────────────────────────────

    fn flash_ok(&mut self, msg: impl Into<String>) {
        self.flash = Some((msg.into(), Instant::now(), false));
    }

    fn flash_err(&mut self, msg: impl Into<String>) {
        self.flash = Some((msg.into(), Instant::now(), true));
    }

    pub fn active_flash(&self) -> Option<(&str, bool)> {
        match &self.flash {
            Some((m, t, err)) if t.elapsed() < FLASH_TTL => Some((m.as_str(), *err)),
            _ => None,
        }
    }

    fn report(&mut self, result: Result<(), HubError>, ok_msg: &str) {
        match result {
            Ok(())                         => self.flash_ok(ok_msg),
            Err(HubError::MissingField(_)) => self.flash_err("Required fields: title and URL"),
            Err(e)                         => self.flash_err(e.to_string()),
        }
    }

    // ── Input dispatch ────────────────────────────────────────────────

    pub fn handle_action(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        if self.text_edit.is_some() {
            self.handle_text_edit(action);
            return;
        }
        match self.overlay.clone() {
            Overlay::Help => {
                if matches!(action, Action::ShowHelp | Action::Back) {
                    self.overlay = Overlay::None;
                }
                return;
            }
            Overlay::Login => {
                self.handle_login(action);
                return;
            }
            Overlay::Confirm(pending) => {
                match action {
                    Action::Yes | Action::Confirm => {
                        self.overlay = Overlay::None;
                        self.execute(pending);
                    }
                    Action::New | Action::Back => self.overlay = Overlay::None,
                    _ => {}
                }
                return;
            }
            Overlay::None => {}
        }

        match self.active_view {
            ActiveView::Dashboard => self.handle_dashboard(action),
            ActiveView::Admin     => self.handle_admin(action),
        }
    }

    fn handle_login(&mut self, action: Action) {
        match action {
            Action::Input(c)  => self.password.push(c),
            Action::Backspace => { self.password.pop(); }
            Action::Confirm   => {
                let pw = std::mem::take(&mut self.password);
                match self.hub.login(&pw) {
                    Ok(()) => {
                        self.overlay     = Overlay::None;
                        self.active_view = ActiveView::Admin;
                        self.admin_tab   = AdminTab::Links;
                        self.flash_ok("Admin mode enabled");
                    }
                    Err(e) => self.flash_err(e.to_string()),
                }
            }
            Action::Back => {
                self.password.clear();
                self.overlay = Overlay::None;
            }
            _ => {}
        }
    }

    fn handle_text_edit(&mut self, action: Action) {
        let Some(edit) = self.text_edit.as_mut() else { return };
        match action {
            Action::Input(c)  => edit.buffer.push(c),
            Action::Backspace => { edit.buffer.pop(); }
            Action::Back      => self.text_edit = None,
            Action::Confirm   => {
                if let Some(edit) = self.text_edit.take() {
                    self.apply_text_edit(edit);
                }
            }
            _ => {}
        }
    }

    fn apply_text_edit(&mut self, edit: TextEdit) {
        let value = edit.buffer.trim().to_string();
        match edit.target {
            TextTarget::Accent | TextTarget::Background => {
                if parse_hex(&value).is_none() {
                    self.flash_err(format!("\"{}\" is not a #rrggbb colour", value));
                    return;
                }
                let e = if edit.target == TextTarget::Accent {
                    ThemeEdit::Accent(value)
                } else {
                    ThemeEdit::Background(value)
                };
                self.hub.edit_theme(e);
            }
            TextTarget::BackgroundImage => {
                self.hub.edit_theme(ThemeEdit::BackgroundImage(Some(value).filter(|v| !v.is_empty())));
            }
            TextTarget::Config(field) => self.hub.set_config_text(field, value),
        }
        self.flash_ok("Saved");
    }

    fn move_selection(cur: usize, len: usize, delta: i64) -> usize {
        if len == 0 { return 0; }
        (cur as i64 + delta).clamp(0, len as i64 - 1) as usize
    }

    // ── Dashboard ─────────────────────────────────────────────────────

    fn handle_dashboard(&mut self, action: Action) {
        if self.searching {
            match action {
                Action::Input(c)  => { self.search.push(c); self.selected = 0; }
                Action::Backspace => { self.search.pop(); self.selected = 0; }
                Action::Confirm | Action::Back | Action::SelectDown => self.searching = false,
                _ => {}
            }
            return;
        }

        let n = self.visible_links().len();
        match action {
            Action::SelectUp   => self.selected = Self::move_selection(self.selected, n, -1),
            Action::SelectDown => self.selected = Self::move_selection(self.selected, n, 1),
            Action::Left       => self.selected = Self::move_selection(self.selected, n, -1),
            Action::Right      => self.selected = Self::move_selection(self.selected, n, 1),
            Action::ScrollUp   => self.selected = Self::move_selection(self.selected, n, -(PAGE as i64)),
            Action::ScrollDown => self.selected = Self::move_selection(self.selected, n, PAGE as i64),
            Action::JumpTop    => self.selected = 0,
            Action::JumpBottom => self.selected = n.saturating_sub(1),

            Action::Confirm => self.open_selected(),

            Action::Search => {
                if self.search_visible() {
                    self.searching = true;
                }
            }
            Action::CycleCategory => {
                let cats = self.categories();
                self.category = match &self.category {
                    None    => cats.first().cloned(),
                    Some(c) => cats.iter().position(|x| x == c)
                        .and_then(|i| cats.get(i + 1).cloned()),
                };
                self.selected = 0;
            }
            Action::CycleLayout => self.hub.cycle_layout(),
            Action::Admin => {
                if self.hub.is_admin() {
                    self.active_view = ActiveView::Admin;
                } else if self.hub.is_loading() {
                    self.flash_err("Still syncing the hub document, try again in a moment");
                } else {
                    self.password.clear();
                    self.overlay = Overlay::Login;
                }
            }
            Action::ForceSync => {
                let r = self.hub.force_sync();
                self.report(r, "Sync started");
            }
            Action::ShowHelp => self.overlay = Overlay::Help,
            Action::Back => {
                if !self.search.is_empty() {
                    self.search.clear();
                } else {
                    self.category = None;
                }
            }
            _ => {}
        }
    }

    fn open_selected(&mut self) {
        let Some(url) = self.visible_links().get(self.selected).map(|l| l.url.clone()) else {
            return;
        };
        match open::that_detached(&url) {
            Ok(())  => self.flash_ok(format!("Opened {}", url)),
            Err(e)  => {
                tracing::warn!(url = %url, error = %e, "could not open link");
                self.flash_err(format!("Could not open {}", url));
            }
        }
    }

    // ── Admin panel ───────────────────────────────────────────────────

    fn handle_admin(&mut self, action: Action) {
        if self.admin_tab == AdminTab::Form {
            self.handle_form(action);
            return;
        }
        match action {
            Action::FocusNext => self.admin_tab = self.admin_tab.step(1),
            Action::FocusPrev => self.admin_tab = self.admin_tab.step(-1),
            Action::Back      => self.active_view = ActiveView::Dashboard,
            Action::ShowHelp  => self.overlay = Overlay::Help,
            Action::Logout    => self.logout(),
            Action::ForceSync => {
                let r = self.hub.force_sync();
                self.report(r, "Sync started");
            }
            Action::New => {
                self.form = LinkForm::blank();
                self.admin_tab = AdminTab::Form;
            }
            _ => match self.admin_tab {
                AdminTab::Links    => self.handle_links_tab(action),
                AdminTab::Theme    => self.handle_theme_tab(action),
                AdminTab::Settings => self.handle_settings_tab(action),
                AdminTab::Form     => {}
            },
        }
    }

    fn logout(&mut self) {
        self.hub.logout();
        self.active_view = ActiveView::Dashboard;
        self.flash_ok("Admin session closed");
    }

    fn selected_admin_link(&self) -> Option<LinkEntry> {
        let i = self.links_state.selected()?;
        self.sorted_links().get(i).map(|l| (*l).clone())
    }

    fn handle_links_tab(&mut self, action: Action) {
        let n = self.hub.state().links.len();
        let cur = self.links_state.selected().unwrap_or(0);
        match action {
            Action::SelectUp   => self.links_state.select(Some(Self::move_selection(cur, n, -1))),
            Action::SelectDown => self.links_state.select(Some(Self::move_selection(cur, n, 1))),
            Action::JumpTop    => self.links_state.select(Some(0)),
            Action::JumpBottom => self.links_state.select(Some(n.saturating_sub(1))),
            Action::MoveUp | Action::MoveDown => {
                let Some(link) = self.selected_admin_link() else { return };
                let (dir, delta) = if action == Action::MoveUp { (Direction::Up, -1) } else { (Direction::Down, 1) };
                match self.hub.move_link(&link.id, dir) {
                    Ok(()) => self.links_state.select(Some(Self::move_selection(cur, n, delta))),
                    Err(e) => self.flash_err(e.to_string()),
                }
            }
            Action::Edit | Action::Confirm => {
                if let Some(link) = self.selected_admin_link() {
                    self.form = LinkForm::from_entry(&link);
                    self.admin_tab = AdminTab::Form;
                }
            }
            Action::Delete => {
                if let Some(link) = self.selected_admin_link() {
                    self.overlay = Overlay::Confirm(Pending::DeleteLink { id: link.id, title: link.title });
                }
            }
            _ => {}
        }
    }

    fn handle_form(&mut self, action: Action) {
        let last = FORM_FIELDS.len() - 1;
        match action {
            Action::Input(c)  => self.form.values[self.form.focus].push(c),
            Action::Backspace => { self.form.values[self.form.focus].pop(); }
            Action::FocusNext | Action::SelectDown => self.form.focus = (self.form.focus + 1).min(last),
            Action::FocusPrev | Action::SelectUp   => self.form.focus = self.form.focus.saturating_sub(1),
            Action::Confirm => self.save_form(),
            Action::Suggest => self.request_suggestion(),
            Action::Back => {
                self.form = LinkForm::blank();
                self.admin_tab = AdminTab::Links;
            }
            _ => {}
        }
    }

    fn save_form(&mut self) {
        let draft = self.form.draft();
        let result = match self.form.editing.clone() {
            Some(id) => self.hub.edit_link(&id, &draft),
            None     => self.hub.add_link(&draft).map(|_| ()),
        };
        let ok = result.is_ok();
        self.report(result, "Link saved");
        if ok {
            self.form = LinkForm::blank();
            self.admin_tab = AdminTab::Links;
        }
    }

    fn request_suggestion(&mut self) {
        let url = self.form.values[F_URL].trim().to_string();
        if url.is_empty() {
            self.flash_err("Enter a URL first");
            return;
        }
        if self.suggesting { return; }
        self.suggesting = true;
        let suggester = Arc::clone(&self.suggester);
        let tx = self.suggest_tx.clone();
        std::thread::spawn(move || {
            let result = suggester.suggest(&url);
            let _ = tx.send((url, result));
        });
    }

    fn consume_suggestions(&mut self) {
        while let Ok((url, result)) = self.suggest_rx.try_recv() {
            self.suggesting = false;
            match result {
                Some(m) if self.form.values[F_URL].trim() == url => {
                    self.form.apply_suggestion(m);
                    self.flash_ok("Suggestion applied");
                }
                Some(_) => {}
                None => self.flash_err("No suggestion available"),
            }
        }
    }

    fn handle_theme_tab(&mut self, action: Action) {
        let rows = theme_rows();
        let row = rows[self.theme_cursor.min(rows.len() - 1)];
        let theme = self.hub.state().theme.clone();
        match action {
            Action::SelectUp   => self.theme_cursor = Self::move_selection(self.theme_cursor, rows.len(), -1),
            Action::SelectDown => self.theme_cursor = Self::move_selection(self.theme_cursor, rows.len(), 1),
            Action::Left | Action::Right => {
                let sign = if action == Action::Right { 1 } else { -1 };
                match row {
                    ThemeRow::Blur => {
                        let cur = theme.blur_amount.unwrap_or(0) as i32;
                        self.hub.edit_theme(ThemeEdit::Blur(cur + sign));
                    }
                    ThemeRow::Opacity => {
                        let next = ((theme.card_opacity * 100.0).round() + sign as f64 * 5.0) / 100.0;
                        self.hub.edit_theme(ThemeEdit::CardOpacity(next));
                    }
                    ThemeRow::Particles if sign > 0 => self.hub.edit_theme(ThemeEdit::Particles(theme.particles.next())),
                    _ => {}
                }
            }
            Action::Confirm => match row {
                ThemeRow::Preset(i) => {
                    if let Some(p) = presets().get(i) {
                        self.overlay = Overlay::Confirm(Pending::ApplyPreset { id: p.id.clone(), name: p.name.clone() });
                    }
                }
                ThemeRow::Reset      => self.overlay = Overlay::Confirm(Pending::ResetTheme),
                ThemeRow::Particles  => self.hub.edit_theme(ThemeEdit::Particles(theme.particles.next())),
                ThemeRow::Fixed      => self.hub.edit_theme(ThemeEdit::ToggleFixed),
                ThemeRow::Accent     => self.begin_edit(TextTarget::Accent, theme.accent),
                ThemeRow::Background => self.begin_edit(TextTarget::Background, theme.background),
                ThemeRow::Image      => self.begin_edit(TextTarget::BackgroundImage, theme.background_image.unwrap_or_default()),
                ThemeRow::Blur | ThemeRow::Opacity => {}
            },
            _ => {}
        }
    }

    fn handle_settings_tab(&mut self, action: Action) {
        let rows = settings_rows();
        match action {
            Action::SelectUp   => self.settings_cursor = Self::move_selection(self.settings_cursor, rows.len(), -1),
            Action::SelectDown => self.settings_cursor = Self::move_selection(self.settings_cursor, rows.len(), 1),
            Action::Confirm => match rows[self.settings_cursor.min(rows.len() - 1)] {
                SettingsRow::Toggle(t) => self.hub.toggle_config(t),
                SettingsRow::Text(f)   => {
                    let current = f.get(&self.hub.state().config).to_string();
                    self.begin_edit(TextTarget::Config(f), current);
                }
                SettingsRow::Layout    => self.hub.cycle_layout(),
                SettingsRow::ForceSync => {
                    let r = self.hub.force_sync();
                    self.report(r, "Sync started");
                }
                SettingsRow::ClearCache => self.overlay = Overlay::Confirm(Pending::ClearCache),
                SettingsRow::Logout     => self.logout(),
            },
            _ => {}
        }
    }

    fn begin_edit(&mut self, target: TextTarget, current: String) {
        self.text_edit = Some(TextEdit { target, buffer: current });
    }

    fn execute(&mut self, pending: Pending) {
        match pending {
            Pending::DeleteLink { id, .. } => {
                let r = self.hub.delete_link(&id, true);
                self.report(r, "Link deleted");
            }
            Pending::ApplyPreset { id, .. } => {
                let r = self.hub.apply_preset(&id, true);
                self.report(r, "Theme applied");
            }
            Pending::ResetTheme => {
                let r = self.hub.reset_theme(true);
                self.report(r, "Theme reset");
            }
            Pending::ClearCache => {
                let r = self.hub.clear_local_cache(true);
                if r.is_ok() {
                    self.active_view = ActiveView::Dashboard;
                    self.selected = 0;
                    if self.startup.is_none() {
                        self.startup = self.hub.reload();
                    }
                }
                self.report(r, "Local cache cleared");
            }
        }
    }
}
