use crate::models::hub_config::AppConfig;
use crate::models::link::LinkEntry;
use crate::models::theme::ThemeSettings;
use serde::{Deserialize, Serialize};

// ── Layout mode ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Grid,
    Compact,
    List,
}

impl LayoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grid    => "grid",
            Self::Compact => "compact",
            Self::List    => "list",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "grid"    => Some(Self::Grid),
            "compact" => Some(Self::Compact),
            "list"    => Some(Self::List),
            _         => None,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Grid    => Self::Compact,
            Self::Compact => Self::List,
            Self::List    => Self::Grid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Grid    => "Grid",
            Self::Compact => "Compact",
            Self::List    => "List",
        }
    }
}

// ── Aggregate root ─────────────────────────────────────────────────────

/// The whole hub document: the only unit that is persisted or synced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub links:  Vec<LinkEntry>,
    pub theme:  ThemeSettings,
    pub config: AppConfig,
    pub layout: LayoutMode,
}

/// Built-in values used when neither the remote document nor the local
/// cache provides a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub theme:  ThemeSettings,
    pub config: AppConfig,
    pub layout: LayoutMode,
}

impl Defaults {
    pub fn new(endpoint: &str, admin_password: &str) -> Self {
        Self {
            theme:  ThemeSettings::default(),
            config: AppConfig::defaults(endpoint, admin_password),
            layout: LayoutMode::Grid,
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            links:  Vec::new(),
            theme:  self.theme.clone(),
            config: self.config.clone(),
            layout: self.layout,
        }
    }
}

// ── Connection indicator ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Syncing,
    Error,
    Local,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connected => "Remote OK",
            Self::Syncing   => "Syncing",
            Self::Error     => "Sync error",
            Self::Local     => "Local cache",
        }
    }
}
