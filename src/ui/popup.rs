use crate::app::TextEdit;
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Centered rect of the given size, capped at the available area.
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    Rect::new(
        r.x + (r.width.saturating_sub(w)) / 2,
        r.y + (r.height.saturating_sub(h)) / 2,
        w, h,
    )
}

fn frame(f: &mut Frame, width: u16, height: u16, title: &str, lines: Vec<Line>, theme: &Theme) {
    let area = centered_rect(width, height, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_focused)
        .style(theme.card)
        .title(Span::styled(format!(" {} ", title), theme.title));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

pub fn render_login(f: &mut Frame, typed: usize, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Password: ", theme.text_dim),
            Span::styled(format!("{}▏", "•".repeat(typed)), theme.text),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Enter to log in, Esc to cancel", theme.text_dim)),
    ];
    frame(f, 46, 6, "Admin login", lines, theme);
}

pub fn render_confirm(f: &mut Frame, prompt: &str, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}", prompt), theme.text)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme.footer_key),
            Span::styled("confirm   ", theme.text_dim),
            Span::styled(" n/Esc ", theme.footer_key),
            Span::styled("cancel", theme.text_dim),
        ]),
    ];
    frame(f, 56, 7, "Confirm", lines, theme);
}

pub fn render_text_edit(f: &mut Frame, edit: &TextEdit, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {}▏", edit.buffer), theme.text)),
        Line::from(""),
        Line::from(Span::styled("  Enter to save, Esc to cancel", theme.text_dim)),
    ];
    frame(f, 64, 7, edit.target.label(), lines, theme);
}
