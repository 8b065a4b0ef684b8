use crate::ui::popup::centered_rect;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, theme: &Theme) {
    let area = centered_rect(76, 26, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .title(Span::styled(" LinkHub — Keybindings (? or Esc to close) ", theme.title));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left = vec![
        key_line(theme, "Global", ""),
        key_line(theme, "  q / Ctrl-C",  "Quit"),
        key_line(theme, "  Esc",         "Back / clear filter"),
        key_line(theme, "  ↑↓ / j k",    "Select"),
        key_line(theme, "  ←→ / h l",    "Select / adjust"),
        key_line(theme, "  g / G",       "Jump first / last"),
        key_line(theme, "  ? / F1",      "Toggle this help"),
        Line::from(""),
        key_line(theme, "Dashboard", ""),
        key_line(theme, "  Enter / o",   "Open link in browser"),
        key_line(theme, "  /",           "Search title or category"),
        key_line(theme, "  c",           "Cycle category filter"),
        key_line(theme, "  p",           "Cycle layout (grid/compact/list)"),
        key_line(theme, "  A",           "Admin login / panel"),
        Line::from(""),
        key_line(theme, "Prompts", ""),
        key_line(theme, "  y / Enter",   "Confirm"),
        key_line(theme, "  n / Esc",     "Cancel"),
    ];

    let right = vec![
        key_line(theme, "Admin panel", ""),
        key_line(theme, "  Tab / S-Tab", "Switch tab"),
        key_line(theme, "  n",           "New link"),
        key_line(theme, "  e / Enter",   "Edit selected link"),
        key_line(theme, "  d / Del",     "Delete selected link"),
        key_line(theme, "  K / J",       "Move link up / down"),
        key_line(theme, "  S",           "Push to remote now"),
        key_line(theme, "  X",           "Log out"),
        Line::from(""),
        key_line(theme, "Link form", ""),
        key_line(theme, "  Tab / ↑↓",    "Next / previous field"),
        key_line(theme, "  Ctrl-G",      "Suggest description/category"),
        key_line(theme, "  Enter",       "Save"),
        Line::from(""),
        key_line(theme, "Files", ""),
        key_line(theme, "  ~/.config/linkhub/linkhub.toml", ""),
        key_line(theme, "  ~/.local/share/linkhub/", ""),
    ];

    f.render_widget(Paragraph::new(left), cols[0]);
    f.render_widget(Paragraph::new(right), cols[1]);
}

fn key_line<'a>(theme: &Theme, key: &'a str, desc: &'a str) -> Line<'a> {
    if desc.is_empty() {
        Line::from(vec![Span::styled(key, theme.title)])
    } else {
        Line::from(vec![
            Span::styled(format!("{:<16}", key), theme.footer_key),
            Span::styled(desc, theme.text_dim),
        ])
    }
}
