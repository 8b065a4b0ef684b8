use crate::app::{ActiveView, AdminTab, App};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render_footer(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let keys: &[(&str, &str)] = match (app.active_view, app.admin_tab) {
        _ if app.searching => &[
            ("Enter/Esc", "Done"), ("Bksp", "Delete"),
        ],
        (ActiveView::Dashboard, _) => &[
            ("q", "Quit"), ("↑↓/jk", "Select"), ("Enter", "Open"), ("/", "Search"),
            ("c", "Category"), ("p", "Layout"), ("A", "Admin"), ("?", "Help"),
        ],
        (ActiveView::Admin, AdminTab::Links) => &[
            ("Tab", "Tab"), ("n", "New"), ("e/Enter", "Edit"), ("d", "Delete"),
            ("K/J", "Reorder"), ("S", "Sync"), ("X", "Logout"), ("Esc", "Dashboard"),
        ],
        (ActiveView::Admin, AdminTab::Form) => &[
            ("Tab/↑↓", "Field"), ("Enter", "Save"), ("Ctrl-G", "Suggest"), ("Esc", "Cancel"),
        ],
        (ActiveView::Admin, AdminTab::Theme) => &[
            ("Tab", "Tab"), ("↑↓", "Select"), ("Enter", "Apply/Edit"), ("←→", "Adjust"),
            ("Esc", "Dashboard"),
        ],
        (ActiveView::Admin, AdminTab::Settings) => &[
            ("Tab", "Tab"), ("↑↓", "Select"), ("Enter", "Toggle/Edit"), ("Esc", "Dashboard"),
        ],
    };

    let mut spans: Vec<Span> = vec![Span::styled(" ", theme.footer_bg)];
    for (key, desc) in keys {
        spans.push(Span::styled(format!(" {} ", key), theme.footer_key));
        spans.push(Span::styled(format!("{}  ", desc), theme.footer_text));
    }

    if let Some((msg, is_err)) = app.active_flash() {
        spans.push(Span::styled("  \u{2502}  ", theme.footer_text));
        spans.push(Span::styled(msg.to_string(), if is_err { theme.crit } else { theme.ok }));
    } else if app.hub.pending_pushes() > 0 {
        spans.push(Span::styled("  \u{2502}  ", theme.footer_text));
        spans.push(Span::styled("syncing…", theme.warn));
    }

    let para = Paragraph::new(Line::from(spans)).style(theme.footer_bg);
    f.render_widget(para, area);
}
