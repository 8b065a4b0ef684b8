use crate::models::theme::ThemeSettings;
use crate::util::roster::RosterStatus;
use ratatui::style::{Color, Modifier, Style};

// ── Helper: build an Rgb Color from a hex literal ──────────────────────

const fn rgb(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >>  8) & 0xFF) as u8,
        ( hex        & 0xFF) as u8,
    )
}

/// Parse "#rrggbb" or "#rgb". Anything else is `None`.
pub fn parse_hex(s: &str) -> Option<Color> {
    let h = s.trim().strip_prefix('#')?;
    let full = match h.len() {
        6 => h.to_string(),
        3 => h.chars().flat_map(|c| [c, c]).collect(),
        _ => return None,
    };
    u32::from_str_radix(&full, 16).ok().map(rgb)
}

fn luminance(c: Color) -> f64 {
    match c {
        Color::Rgb(r, g, b) => (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0,
        _ => 0.0,
    }
}

/// Blend `c` towards `over` by `t` (0 = c, 1 = over).
fn mix(c: Color, over: Color, t: f64) -> Color {
    match (c, over) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let m = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            Color::Rgb(m(r1, r2), m(g1, g2), m(b1, b2))
        }
        _ => c,
    }
}

// ── Theme struct ────────────────────────────────────────────────────────

/// Terminal styles derived from the hub's `ThemeSettings`.
#[derive(Clone)]
pub struct Theme {
    pub base:           Style,
    pub card:           Style,
    pub border:         Style,
    pub border_focused: Style,
    pub title:          Style,
    pub accent:         Style,
    pub text:           Style,
    pub text_dim:       Style,
    pub selected:       Style,
    pub header:         Style,
    pub ok:             Style,
    pub warn:           Style,
    pub crit:           Style,
    pub footer_bg:      Style,
    pub footer_key:     Style,
    pub footer_text:    Style,
}

impl Theme {
    /// `accent` is the effective accent (theme colour or roster colour).
    pub fn from_settings(settings: &ThemeSettings, accent: &str) -> Self {
        let bg     = parse_hex(&settings.background).unwrap_or(rgb(0x020617));
        let accent = parse_hex(accent).unwrap_or(rgb(0x3b82f6));
        let light  = luminance(bg) > 0.6;

        let fg     = if light { rgb(0x0f172a) } else { rgb(0xe2e8f0) };
        let dim    = mix(fg, bg, 0.55);
        // Card opacity tints the card surface towards the foreground.
        let card   = mix(bg, fg, settings.card_opacity.clamp(0.0, 1.0) * 0.5);
        let bar    = settings.secondary.as_deref()
            .and_then(parse_hex)
            .map(|s| mix(bg, s, 0.6))
            .unwrap_or(mix(bg, fg, 0.15));

        Self {
            base:           Style::default().fg(fg).bg(bg),
            card:           Style::default().fg(fg).bg(card),
            border:         Style::default().fg(dim),
            border_focused: Style::default().fg(accent),
            title:          Style::default().fg(fg).add_modifier(Modifier::BOLD),
            accent:         Style::default().fg(accent).add_modifier(Modifier::BOLD),
            text:           Style::default().fg(fg),
            text_dim:       Style::default().fg(dim),
            selected:       Style::default().fg(bg).bg(accent),
            header:         Style::default().fg(fg).bg(bar),
            ok:             Style::default().fg(rgb(0x10b981)),
            warn:           Style::default().fg(rgb(0xf59e0b)),
            crit:           Style::default().fg(rgb(0xef4444)).add_modifier(Modifier::BOLD),
            footer_bg:      Style::default().bg(bar).fg(fg),
            footer_key:     Style::default().bg(bar).fg(accent).add_modifier(Modifier::BOLD),
            footer_text:    Style::default().bg(bar).fg(dim),
        }
    }

    pub fn roster_style(roster: RosterStatus) -> Style {
        let c = parse_hex(roster.color()).unwrap_or(Color::White);
        Style::default().fg(c).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::theme::find_preset;

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("#ef4444"), Some(Color::Rgb(0xef, 0x44, 0x44)));
        assert_eq!(parse_hex("#fff"), Some(Color::Rgb(0xff, 0xff, 0xff)));
        assert_eq!(parse_hex("ef4444"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn light_background_gets_dark_text() {
        let frost = find_preset("frost").unwrap();
        let t = Theme::from_settings(&frost, &frost.accent);
        assert_eq!(t.text.fg, Some(rgb(0x0f172a)));
        assert_eq!(t.border_focused.fg, Some(rgb(0x0ea5e9)));
    }
}
