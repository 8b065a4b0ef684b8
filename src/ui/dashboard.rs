use crate::app::App;
use crate::models::link::LinkEntry;
use crate::models::state::{ConnectionStatus, LayoutMode};
use crate::ui::footer::render_footer;
use crate::ui::theme::Theme;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const GRID_CARD_W:    u16 = 36;
const COMPACT_CARD_W: u16 = 26;

pub fn render(f: &mut Frame, app: &App) {
    let area  = f.area();
    let theme = app.theme.clone();
    let cfg   = app.hub.state().config.clone();

    f.render_widget(Block::default().style(theme.base), area);

    let show_search = app.search_visible();
    let search_h   = if show_search { 3 } else { 0 };
    let category_h = if cfg.show_categories { 1 } else { 0 };

    // ── Root: header | search | categories | cards | footer ───────
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(search_h),
            Constraint::Length(category_h),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, root[0], app, &theme);
    if show_search {
        render_search(f, root[1], app, &theme);
    }
    if cfg.show_categories {
        render_categories(f, root[2], app, &theme);
    }

    let links: Vec<LinkEntry> = app.visible_links().into_iter().cloned().collect();
    let body = root[3];
    if links.is_empty() {
        render_empty(f, body, app, &theme);
    } else {
        match app.hub.state().layout {
            LayoutMode::Grid    => render_cards(f, body, &links, app, &theme, false),
            LayoutMode::Compact => render_cards(f, body, &links, app, &theme, true),
            LayoutMode::List    => render_list(f, body, &links, app, &theme),
        }
    }

    render_footer(f, root[4], app, &theme);
}

// ── Header ─────────────────────────────────────────────────────────────

fn render_header(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let state  = app.hub.state();
    let roster = app.hub.roster();

    let left   = format!(" {} v{} ", state.config.title, state.config.version);
    let sub    = format!(" {} ", state.config.subtitle);
    let badge  = format!(" ● ROSTER {} ", roster.label());
    let clock  = format!(" {} ", Local::now().format("%H:%M:%S"));
    let pad = (area.width as usize).saturating_sub(
        left.chars().count() + sub.chars().count() + badge.chars().count() + clock.chars().count(),
    );

    let line1 = Line::from(vec![
        Span::styled(left, theme.accent),
        Span::styled(sub, theme.text_dim),
        Span::styled(" ".repeat(pad), theme.header),
        Span::styled(badge, theme.accent),
        Span::styled(clock, theme.text_dim),
    ]);

    let status_style = match app.hub.status {
        ConnectionStatus::Connected => theme.ok,
        ConnectionStatus::Syncing   => theme.warn,
        ConnectionStatus::Error     => theme.crit,
        ConnectionStatus::Local     => theme.text_dim,
    };
    let last_sync = app.hub.last_sync
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let mut spans = vec![
        Span::styled(format!(" ● {} ", app.hub.status.label()), status_style),
        Span::styled(format!(" last sync {} ", last_sync), theme.text_dim),
        Span::styled(format!(" │ {} links ", state.links.len()), theme.text_dim),
        Span::styled(format!(" │ layout {} ", state.layout.label()), theme.text_dim),
    ];
    if app.hub.is_admin() {
        spans.push(Span::styled(" │ ADMIN ", theme.warn));
    }
    if let Some(img) = &state.theme.background_image {
        spans.push(Span::styled(format!(" │ bg {} ", img), theme.text_dim));
    }

    let para = Paragraph::new(vec![line1, Line::from(spans)]).style(theme.header);
    f.render_widget(para, area);
}

fn render_search(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let border = if app.searching { theme.border_focused } else { theme.border };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(" Search (/) ", theme.title));

    let content = if app.search.is_empty() && !app.searching {
        Span::styled("title or category…", theme.text_dim)
    } else if app.searching {
        Span::styled(format!("{}▏", app.search), theme.text)
    } else {
        Span::styled(app.search.clone(), theme.text)
    };
    f.render_widget(Paragraph::new(Line::from(content)).block(block).style(theme.base), area);
}

fn render_categories(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mut spans = vec![Span::styled(" c ", theme.footer_key)];
    let tab = |label: &str, active: bool| {
        let style = if active { theme.selected } else { theme.text_dim };
        Span::styled(format!(" {} ", label), style)
    };
    spans.push(tab("All", app.category.is_none()));
    for cat in app.categories() {
        let active = app.category.as_deref() == Some(cat.as_str());
        spans.push(Span::raw(" "));
        spans.push(tab(&cat, active));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.base), area);
}

fn render_empty(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let msg = if app.hub.state().links.is_empty() {
        if app.hub.is_admin() {
            "No links yet. Press n to add one."
        } else {
            "No links yet. Press A to log in as admin and add one."
        }
    } else {
        "No links match the current search or category."
    };
    let para = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(msg, theme.text_dim))])
        .alignment(ratatui::layout::Alignment::Center)
        .style(theme.base);
    f.render_widget(para, area);
}

// ── Card layouts ───────────────────────────────────────────────────────

/// Single-width glyph for a named icon; unknown names get a bullet.
pub fn icon_glyph(name: &str) -> &'static str {
    match name {
        "Link" | "ExternalLink"          => "↗",
        "Mail" | "Inbox"                 => "✉",
        "FileText" | "File" | "Book"     => "≡",
        "Database" | "Server"            => "◫",
        "Settings" | "Wrench" | "Tool"   => "⚙",
        "Calendar" | "Clock"             => "◷",
        "Shield" | "Lock" | "Key"        => "◈",
        "Users" | "User"                 => "☺",
        "Globe" | "Map"                  => "◎",
        "BarChart" | "PieChart" | "Activity" => "▤",
        "Phone" | "MessageSquare"        => "☎",
        "Star" | "Heart"                 => "★",
        _                                => "•",
    }
}

fn card_height(app: &App, compact: bool) -> u16 {
    if compact { return 3; }
    let cfg = &app.hub.state().config;
    let mut h = 2 + 1; // borders + url
    if cfg.show_descriptions { h += 2; }
    if cfg.show_categories   { h += 1; }
    if cfg.show_previews     { h += 1; }
    h
}

fn render_cards(f: &mut Frame, area: Rect, links: &[LinkEntry], app: &App, theme: &Theme, compact: bool) {
    let cfg    = app.hub.state().config.clone();
    let card_w = if compact { COMPACT_CARD_W } else { GRID_CARD_W };
    let card_h = card_height(app, compact);
    let cols   = (area.width / card_w).max(1) as usize;
    let width  = area.width / cols as u16;
    let rows_visible = (area.height / card_h).max(1) as usize;

    // Keep the selected card's row on screen.
    let sel_row   = app.selected / cols;
    let first_row = sel_row.saturating_sub(rows_visible - 1);

    for (i, link) in links.iter().enumerate().skip(first_row * cols) {
        let row = i / cols - first_row;
        if row >= rows_visible { break; }
        let col = i % cols;
        let rect = Rect::new(
            area.x + col as u16 * width,
            area.y + row as u16 * card_h,
            width,
            card_h,
        ).intersection(area);
        let selected = i == app.selected;
        let border = if selected { theme.border_focused } else { theme.border };

        let icon = if cfg.show_icons { format!("{} ", icon_glyph(&link.icon)) } else { String::new() };
        let title_style = if selected { theme.accent } else { theme.title };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(theme.card)
            .title(Span::styled(format!(" {}{} ", icon, link.title), title_style));

        let mut lines = Vec::new();
        if !compact {
            if cfg.show_descriptions {
                lines.push(Line::from(Span::styled(link.description.clone(), theme.text)));
                lines.push(Line::from(""));
            }
            if cfg.show_categories {
                lines.push(Line::from(Span::styled(format!("[{}]", link.category), theme.accent)));
            }
            lines.push(Line::from(Span::styled(link.url.clone(), theme.text_dim)));
            if cfg.show_previews {
                lines.push(Line::from(Span::styled(format!("preview: {}", link.preview_url()), theme.text_dim)));
            }
        }

        let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
        f.render_widget(para, rect);
    }
}

fn render_list(f: &mut Frame, area: Rect, links: &[LinkEntry], app: &App, theme: &Theme) {
    let cfg = &app.hub.state().config;
    let items: Vec<ListItem> = links.iter().map(|l| {
        let mut spans = Vec::new();
        if cfg.show_icons {
            spans.push(Span::styled(format!(" {} ", icon_glyph(&l.icon)), theme.accent));
        }
        spans.push(Span::styled(format!("{:<28}", l.title), theme.title));
        if cfg.show_categories {
            spans.push(Span::styled(format!(" {:<14}", l.category), theme.accent));
        }
        if cfg.show_descriptions && !l.description.is_empty() {
            spans.push(Span::styled(format!(" {}", l.description), theme.text));
        }
        spans.push(Span::styled(format!("  {}", l.url), theme.text_dim));
        ListItem::new(Line::from(spans))
    }).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .style(theme.card)
        .title(Span::styled(format!(" Links ({}) ", links.len()), theme.title));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected)
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}
