use crate::app::{settings_rows, theme_rows, AdminTab, App, SettingsRow, ThemeRow, FORM_FIELDS};
use crate::config::Config;
use crate::models::theme::presets;
use crate::ui::footer::render_footer;
use crate::ui::theme::{parse_hex, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &mut App) {
    let area  = f.area();
    let theme = app.theme.clone();

    f.render_widget(Block::default().style(theme.base), area);

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_tabs(f, root[0], app, &theme);
    match app.admin_tab {
        AdminTab::Links    => render_links(f, root[1], app, &theme),
        AdminTab::Form     => render_form(f, root[1], app, &theme),
        AdminTab::Theme    => render_theme(f, root[1], app, &theme),
        AdminTab::Settings => render_settings(f, root[1], app, &theme),
    }
    render_footer(f, root[2], app, &theme);
}

fn render_tabs(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mut spans = vec![Span::styled(" ADMIN ", theme.selected), Span::raw(" ")];
    for tab in AdminTab::ALL {
        let style = if tab == app.admin_tab { theme.accent } else { theme.text_dim };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
        spans.push(Span::styled("│", theme.border));
    }
    spans.push(Span::styled(format!("  {} ", app.hub.status.label()), theme.text_dim));
    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.header), area);
}

// ── Links tab ──────────────────────────────────────────────────────────

fn render_links(f: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
    let items: Vec<ListItem> = app.sorted_links().iter().map(|l| {
        ListItem::new(Line::from(vec![
            Span::styled(format!("{:>3} ", l.order), theme.text_dim),
            Span::styled(format!("{:<28}", l.title), theme.title),
            Span::styled(format!(" {:<14}", l.category), theme.accent),
            Span::styled(format!(" {}", l.url), theme.text_dim),
        ]))
    }).collect();

    let count = items.len();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .style(theme.card)
        .title(Span::styled(format!(" Links ({})  n new · e edit · d delete · K/J move ", count), theme.title));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected)
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, &mut app.links_state);
}

// ── Link form ──────────────────────────────────────────────────────────

fn render_form(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let title = match &app.form.editing {
        Some(id) => format!(" Edit link {} ", id),
        None     => " New link ".to_string(),
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .style(theme.card)
        .title(Span::styled(title, theme.title));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let mut constraints: Vec<Constraint> = FORM_FIELDS.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, label) in FORM_FIELDS.iter().enumerate() {
        let focused = i == app.form.focus;
        let required = i < 2;
        let border = if focused { theme.border_focused } else { theme.border };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(
                format!(" {}{} ", label, if required { " *" } else { "" }),
                if focused { theme.accent } else { theme.text_dim },
            ));
        let value = &app.form.values[i];
        let text = if focused { format!("{}▏", value) } else { value.clone() };
        f.render_widget(Paragraph::new(Span::styled(text, theme.text)).block(block), rows[i]);
    }

    let hint = if app.suggesting {
        Span::styled(" Asking for a suggestion…", theme.warn)
    } else {
        Span::styled(" Ctrl-G fills description, category and icon from the URL", theme.text_dim)
    };
    f.render_widget(Paragraph::new(Line::from(hint)), rows[FORM_FIELDS.len()]);
}

// ── Theme tab ──────────────────────────────────────────────────────────

fn swatch(hex: &str) -> Span<'static> {
    let style = parse_hex(hex).map(|c| Style::default().bg(c)).unwrap_or_default();
    Span::styled("    ", style)
}

fn render_theme(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let settings = app.hub.state().theme.clone();
    let all = presets();
    let rows = theme_rows();

    let items: Vec<ListItem> = rows.iter().map(|row| {
        let line = match row {
            ThemeRow::Preset(i) => {
                let p = &all[*i];
                let mark = if p.id == settings.id { "●" } else { " " };
                Line::from(vec![
                    Span::styled(format!("{} ", mark), theme.accent),
                    swatch(&p.background),
                    swatch(&p.accent),
                    Span::styled(format!(" {}", p.name), theme.text),
                ])
            }
            ThemeRow::Reset      => Line::from(Span::styled("  Reset to default", theme.warn)),
            ThemeRow::Particles  => kv("Particles", settings.particles.label(), theme),
            ThemeRow::Blur       => kv("Blur", &format!("{} px", settings.blur_amount.unwrap_or(0)), theme),
            ThemeRow::Opacity    => kv("Card opacity", &format!("{:.2}", settings.card_opacity), theme),
            ThemeRow::Fixed      => kv("Accent", if settings.is_fixed { "fixed" } else { "follows roster" }, theme),
            ThemeRow::Accent     => kv("Accent colour", &settings.accent, theme),
            ThemeRow::Background => kv("Background", &settings.background, theme),
            ThemeRow::Image      => kv("Background image", settings.background_image.as_deref().unwrap_or("none"), theme),
        };
        ListItem::new(line)
    }).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .style(theme.card)
        .title(Span::styled(" Theme ", theme.title));
    let list = List::new(items).block(block).highlight_style(theme.selected);
    let mut state = ListState::default();
    state.select(Some(app.theme_cursor.min(rows.len() - 1)));
    f.render_stateful_widget(list, cols[0], &mut state);

    let roster = app.hub.roster();
    let accent = app.hub.effective_accent();
    let preview = vec![
        Line::from(vec![Span::styled(" Theme      ", theme.text_dim), Span::styled(settings.name.clone(), theme.title)]),
        Line::from(vec![Span::styled(" Background ", theme.text_dim), swatch(&settings.background)]),
        Line::from(vec![Span::styled(" Accent     ", theme.text_dim), swatch(&accent), Span::styled(format!(" {}", accent), theme.text)]),
        Line::from(vec![
            Span::styled(" Roster     ", theme.text_dim),
            Span::styled(roster.label(), Theme::roster_style(roster)),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Theme changes outside a preset stay local", theme.text_dim)),
        Line::from(Span::styled(" until the next sync (S).", theme.text_dim)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .style(theme.card)
        .title(Span::styled(" Preview ", theme.title));
    f.render_widget(Paragraph::new(preview).block(block), cols[1]);
}

// ── Settings tab ───────────────────────────────────────────────────────

fn render_settings(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let state = app.hub.state();
    let rows = settings_rows();
    let items: Vec<ListItem> = rows.iter().map(|row| {
        let line = match row {
            SettingsRow::Toggle(t) => kv(t.label(), if state.config.is_on(*t) { "on" } else { "off" }, theme),
            SettingsRow::Text(t)   => kv(t.label(), t.get(&state.config), theme),
            SettingsRow::Layout    => kv("Layout", state.layout.label(), theme),
            SettingsRow::ForceSync => Line::from(Span::styled("  Push to remote now", theme.accent)),
            SettingsRow::ClearCache => Line::from(Span::styled("  Clear local cache", theme.warn)),
            SettingsRow::Logout    => Line::from(Span::styled("  Log out", theme.text)),
        };
        ListItem::new(line)
    }).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .style(theme.card)
        .title(Span::styled(" Settings ", theme.title));
    let list = List::new(items).block(block).highlight_style(theme.selected);
    let mut ls = ListState::default();
    ls.select(Some(app.settings_cursor.min(rows.len() - 1)));
    f.render_stateful_widget(list, cols[0], &mut ls);

    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(unknown)".to_string());
    let info = vec![
        kv("Endpoint", &state.config.gas_url, theme),
        kv("Remote", if app.hub.remote_enabled() { "enabled" } else { "disabled" }, theme),
        kv("Data dir", &app.config.data_dir().display().to_string(), theme),
        kv("Config", &config_path, theme),
        kv("Credits", &state.config.credits, theme),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .style(theme.card)
        .title(Span::styled(" Storage ", theme.title));
    f.render_widget(Paragraph::new(info).block(block), cols[1]);
}

fn kv<'a>(key: &str, val: &str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", key), theme.text_dim),
        Span::styled(val.to_string(), theme.text),
    ])
}
