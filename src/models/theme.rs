use serde::{Deserialize, Serialize};

// ── Particle effect selector ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleEffect {
    None,
    Fire,
    Sparks,
    Snow,
    Rain,
    Digital,
    Bubbles,
}

impl ParticleEffect {
    pub const ALL: [ParticleEffect; 7] = [
        Self::None, Self::Digital, Self::Sparks, Self::Snow,
        Self::Fire, Self::Rain,    Self::Bubbles,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::None    => "None",
            Self::Fire    => "Fire",
            Self::Sparks  => "Sparks",
            Self::Snow    => "Snow",
            Self::Rain    => "Rain",
            Self::Digital => "Digital",
            Self::Bubbles => "Bubbles",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

// ── Theme settings ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub id:               String,
    pub name:             String,
    pub background:       String,
    pub accent:           String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary:        Option<String>,
    pub card_opacity:     f64,
    pub particles:        ParticleEffect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// true = accent is the theme's own colour; false = accent follows the roster.
    pub is_fixed:         bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_amount:      Option<u8>,
}

pub const MAX_BLUR: u8 = 40;

impl Default for ThemeSettings {
    fn default() -> Self {
        presets().swap_remove(0)
    }
}

fn preset(
    id: &str, name: &str, background: &str, accent: &str, secondary: &str,
    card_opacity: f64, particles: ParticleEffect, is_fixed: bool, blur: u8,
) -> ThemeSettings {
    ThemeSettings {
        id:               id.to_string(),
        name:             name.to_string(),
        background:       background.to_string(),
        accent:           accent.to_string(),
        secondary:        Some(secondary.to_string()),
        card_opacity,
        particles,
        background_image: None,
        is_fixed,
        blur_amount:      Some(blur),
    }
}

/// Built-in theme presets. The first one is the default theme.
pub fn presets() -> Vec<ThemeSettings> {
    use ParticleEffect::*;
    vec![
        preset("readiness",        "Protocolo Prontidão", "#020617", "#3b82f6", "#1e293b", 0.12, Digital, false, 20),
        preset("emerald-matrix",   "Emerald Matrix",      "#010501", "#10b981", "#064e3b", 0.10, Digital, true,  15),
        preset("crimson-protocol", "Crimson Protocol",    "#0a0000", "#ef4444", "#450a0a", 0.15, Sparks,  true,  10),
        preset("indigo-deep",      "Indigo Deep",         "#030014", "#6366f1", "#1e1b4b", 0.10, Bubbles, true,  25),
        preset("amber-alert",      "Amber Alert",         "#0f0a00", "#f59e0b", "#451a03", 0.12, Fire,    true,  18),
        preset("cyberpunk",        "Cyberpunk Neon",      "#050505", "#ff00ff", "#00ffff", 0.15, Digital, true,  20),
        preset("obsidian",         "Obsidian Tech",       "#0a0a0a", "#ffffff", "#404040", 0.08, Digital, true,  25),
        preset("frost",            "Frost Byte",          "#f0f9ff", "#0ea5e9", "#ffffff", 0.40, Snow,    true,  30),
    ]
}

pub fn find_preset(id: &str) -> Option<ThemeSettings> {
    presets().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_preset() {
        let d = ThemeSettings::default();
        assert_eq!(d.id, "readiness");
        assert!(!d.is_fixed);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(find_preset("crimson-protocol").unwrap()).unwrap();
        assert_eq!(json["cardOpacity"], 0.15);
        assert_eq!(json["isFixed"], true);
        assert_eq!(json["blurAmount"], 10);
        assert_eq!(json["particles"], "sparks");
        assert!(json.get("backgroundImage").is_none());
    }

    #[test]
    fn particle_cycle_wraps() {
        let mut p = ParticleEffect::None;
        for _ in 0..ParticleEffect::ALL.len() { p = p.next(); }
        assert_eq!(p, ParticleEffect::None);
    }
}
