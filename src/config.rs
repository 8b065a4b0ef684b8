use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://script.google.com/macros/s/AKfycby7dlbNYzLKVBNrmfdmB87yZFa1pJwPC2K_dFhFmwkF3dKKGUoG8FycErIwsdb_huk5/exec";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub hub: HubConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub suggest: SuggestConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// UI redraw / event poll interval in milliseconds
    pub tick_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Spreadsheet script endpoint. The hub document can never change it.
    pub endpoint: String,
    /// Set false to run purely on the local cache.
    pub enabled: bool,
    /// Startup read timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Admin password used until the hub document carries its own.
    pub default_password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Local cache directory. Empty = ~/.local/share/linkhub
    #[serde(default)]
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Environment variable holding the Gemini API key. Unset = suggestions off.
    pub api_key_env: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter, e.g. "info" or "linkhub=debug". LINKHUB_LOG overrides.
    pub level: String,
    /// Write TUI logs to <data dir>/linkhub.log. CLI modes log to stderr.
    pub file: bool,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { tick_ms: 250 }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint:     DEFAULT_ENDPOINT.to_string(),
            enabled:      true,
            timeout_secs: 15,
        }
    }
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { default_password: "change-me".to_string() }
    }
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            model:       "gemini-2.0-flash".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), file: true }
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(_) => {
                // Write defaults on first run (best-effort)
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("linkhub").join("linkhub.toml"))
    }

    pub fn data_dir(&self) -> PathBuf {
        if !self.storage.dir.trim().is_empty() {
            return PathBuf::from(self.storage.dir.trim());
        }
        dirs::data_local_dir()
            .map(|p| p.join("linkhub"))
            .unwrap_or_else(|| PathBuf::from(".linkhub"))
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs.max(1))
    }

    pub fn suggest_api_key(&self) -> Option<String> {
        std::env::var(&self.suggest.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    let text = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&text)?;
    Ok(cfg)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = toml::to_string_pretty(&Config::default())?;
    fs::write(path, format!("# linkhub configuration\n# Generated on first run, edit freely\n\n{}", text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: Config = toml::from_str(
            "[remote]\nendpoint = \"https://store.test/exec\"\nenabled = false\ntimeout_secs = 3\n",
        ).unwrap();
        assert_eq!(cfg.remote.endpoint, "https://store.test/exec");
        assert!(!cfg.remote.enabled);
        assert_eq!(cfg.read_timeout(), Duration::from_secs(3));
        assert_eq!(cfg.general.tick_ms, 250);
        assert_eq!(cfg.suggest.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.remote.timeout_secs, 15);
        assert_eq!(back.remote.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn storage_dir_override() {
        let mut cfg = Config::default();
        cfg.storage.dir = "/tmp/hub-cache".into();
        assert_eq!(cfg.data_dir(), PathBuf::from("/tmp/hub-cache"));
    }
}
