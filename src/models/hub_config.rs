use serde::{Deserialize, Serialize};

/// Display and behaviour settings carried inside the hub document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub title:              String,
    pub subtitle:           String,
    pub version:            String,
    pub credits:            String,
    /// Remote document endpoint.
    pub gas_url:            String,
    pub show_icons:         bool,
    pub show_descriptions:  bool,
    pub show_categories:    bool,
    pub show_search:        bool,
    pub show_previews:      bool,
    /// Shared admin secret, stored in clear text under its historical name.
    pub admin_password_hash: String,
}

impl AppConfig {
    /// Built-in display defaults with the given endpoint and admin secret.
    pub fn defaults(endpoint: &str, admin_password: &str) -> Self {
        Self {
            title:               "LinkHub Pro".to_string(),
            subtitle:            "Terminal de Comando Integrado".to_string(),
            version:             "3.3.0".to_string(),
            credits:             "Desenvolvido por Intelligence Unit".to_string(),
            gas_url:             endpoint.to_string(),
            show_icons:          true,
            show_descriptions:   true,
            show_categories:     true,
            show_search:         true,
            show_previews:       true,
            admin_password_hash: admin_password.to_string(),
        }
    }

    pub fn toggle(&mut self, t: ConfigToggle) {
        let flag = match t {
            ConfigToggle::Icons        => &mut self.show_icons,
            ConfigToggle::Descriptions => &mut self.show_descriptions,
            ConfigToggle::Categories   => &mut self.show_categories,
            ConfigToggle::Search       => &mut self.show_search,
            ConfigToggle::Previews     => &mut self.show_previews,
        };
        *flag = !*flag;
    }

    pub fn is_on(&self, t: ConfigToggle) -> bool {
        match t {
            ConfigToggle::Icons        => self.show_icons,
            ConfigToggle::Descriptions => self.show_descriptions,
            ConfigToggle::Categories   => self.show_categories,
            ConfigToggle::Search       => self.show_search,
            ConfigToggle::Previews     => self.show_previews,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigToggle {
    Icons,
    Descriptions,
    Categories,
    Search,
    Previews,
}

impl ConfigToggle {
    pub const ALL: [ConfigToggle; 5] = [
        Self::Previews, Self::Descriptions, Self::Categories, Self::Icons, Self::Search,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Icons        => "Show icons",
            Self::Descriptions => "Show descriptions",
            Self::Categories   => "Show categories",
            Self::Search       => "Show search bar",
            Self::Previews     => "Show link previews",
        }
    }
}

/// Free-text config fields editable from the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigText {
    Title,
    Subtitle,
    Credits,
}

impl ConfigText {
    pub const ALL: [ConfigText; 3] = [Self::Title, Self::Subtitle, Self::Credits];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title    => "Hub title",
            Self::Subtitle => "Subtitle",
            Self::Credits  => "Credits",
        }
    }

    pub fn get<'a>(&self, cfg: &'a AppConfig) -> &'a str {
        match self {
            Self::Title    => &cfg.title,
            Self::Subtitle => &cfg.subtitle,
            Self::Credits  => &cfg.credits,
        }
    }

    pub fn set(&self, cfg: &mut AppConfig, value: String) {
        match self {
            Self::Title    => cfg.title = value,
            Self::Subtitle => cfg.subtitle = value,
            Self::Credits  => cfg.credits = value,
        }
    }
}
