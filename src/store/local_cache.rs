use crate::models::state::{AppState, Defaults, LayoutMode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const KEY_LINKS:  &str = "hub_links";
pub const KEY_THEME:  &str = "hub_theme";
pub const KEY_CONFIG: &str = "hub_config";
pub const KEY_LAYOUT: &str = "hub_layout";

const ALL_KEYS: [&str; 4] = [KEY_LINKS, KEY_THEME, KEY_CONFIG, KEY_LAYOUT];

/// Per-user key/value store: one file per key under `root`.
/// Each field is written and parsed on its own, so a damaged entry only
/// costs that field.
#[derive(Debug, Clone)]
pub struct LocalCache {
    root: PathBuf,
}

impl LocalCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
            .filter(|s| !s.is_empty())
    }

    fn write_raw(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path(key), value)
    }

    /// JSON value under `key`, or `default` if absent or unparsable.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.read_raw(key) {
            Some(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                tracing::debug!(key, error = %e, "cached value unreadable, using default");
                default
            }),
            None => default,
        }
    }

    /// Layout is stored as its bare literal, not JSON.
    pub fn read_layout(&self, default: LayoutMode) -> LayoutMode {
        self.read_raw(KEY_LAYOUT)
            .and_then(|s| LayoutMode::parse(&s))
            .unwrap_or(default)
    }

    /// Rebuild a full state from the cache, defaulting each field separately.
    pub fn load_state(&self, defaults: &Defaults) -> AppState {
        AppState {
            links:  self.read(KEY_LINKS, Vec::new()),
            theme:  self.read(KEY_THEME, defaults.theme.clone()),
            config: self.read(KEY_CONFIG, defaults.config.clone()),
            layout: self.read_layout(defaults.layout),
        }
    }

    /// Write all four fields. Failures are logged and swallowed.
    pub fn persist(&self, state: &AppState) {
        if let Err(e) = self.try_persist(state) {
            tracing::warn!(dir = %self.root.display(), error = %e, "local cache write failed");
        }
    }

    fn try_persist(&self, state: &AppState) -> anyhow::Result<()> {
        self.write_json(KEY_LINKS, &state.links)?;
        self.write_json(KEY_THEME, &state.theme)?;
        self.write_json(KEY_CONFIG, &state.config)?;
        self.write_raw(KEY_LAYOUT, state.layout.as_str())?;
        Ok(())
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let text = serde_json::to_string(value)?;
        self.write_raw(key, &text)?;
        Ok(())
    }

    /// Remove every cached field. Missing files are fine.
    pub fn clear(&self) {
        for key in ALL_KEYS {
            match fs::remove_file(self.path(key)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(key, error = %e, "could not remove cached value"),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        ALL_KEYS.iter().all(|k| !self.path(k).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::link::LinkEntry;
    use crate::models::theme::find_preset;

    fn defaults() -> Defaults {
        Defaults::new("https://store.test/exec", "pw")
    }

    fn sample_state() -> AppState {
        let mut s = defaults().state();
        s.links.push(LinkEntry {
            id: "id-1".into(), title: "Docs".into(), url: "https://x.test".into(),
            description: "team docs".into(), category: "TI".into(), icon: "Book".into(), order: 0,
        });
        s.theme = find_preset("frost").unwrap();
        s.config.title = "Ops Hub".into();
        s.config.show_previews = false;
        s.layout = LayoutMode::List;
        s
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path());
        let state = sample_state();
        cache.persist(&state);
        assert_eq!(cache.load_state(&defaults()), state);
    }

    #[test]
    fn layout_is_stored_as_raw_literal() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path());
        cache.persist(&sample_state());
        let raw = fs::read_to_string(dir.path().join(KEY_LAYOUT)).unwrap();
        assert_eq!(raw, "list");
    }

    #[test]
    fn empty_cache_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path().join("never-created"));
        assert_eq!(cache.load_state(&defaults()), defaults().state());
    }

    #[test]
    fn corrupt_field_only_loses_that_field() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path());
        let state = sample_state();
        cache.persist(&state);
        fs::write(dir.path().join(KEY_THEME), "{not json").unwrap();

        let loaded = cache.load_state(&defaults());
        assert_eq!(loaded.theme, defaults().theme);
        assert_eq!(loaded.links, state.links);
        assert_eq!(loaded.config, state.config);
        assert_eq!(loaded.layout, LayoutMode::List);
    }

    #[test]
    fn write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        // root is a regular file, so create_dir_all fails
        let cache = LocalCache::new(&blocker);
        cache.persist(&sample_state());
    }

    #[test]
    fn clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalCache::new(dir.path());
        cache.persist(&sample_state());
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
        cache.clear();
    }
}
