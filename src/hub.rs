//! Application-state container. Owns the current `AppState` snapshot and
//! replaces it on every operation, then persists: local cache always,
//! remote push only in admin mode.

use crate::error::HubError;
use crate::links::{self, Direction};
use crate::models::hub_config::{ConfigText, ConfigToggle};
use crate::models::link::LinkDraft;
use crate::models::state::{AppState, ConnectionStatus, Defaults, LayoutMode};
use crate::models::theme::{find_preset, ParticleEffect, ThemeSettings, MAX_BLUR};
use crate::store::loader::{self, LoadSource, Loaded};
use crate::store::local_cache::LocalCache;
use crate::store::sync::Synchronizer;
use crate::util::roster::{self, RosterStatus};
use chrono::{DateTime, Local};
use std::sync::mpsc;
use std::time::Duration;

/// Single-property theme change.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeEdit {
    Accent(String),
    Background(String),
    Particles(ParticleEffect),
    Blur(i32),
    CardOpacity(f64),
    ToggleFixed,
    BackgroundImage(Option<String>),
}

pub struct Hub {
    state:    AppState,
    defaults: Defaults,
    admin:    bool,
    loading:  bool,
    roster:   RosterStatus,
    cache:    LocalCache,
    sync:     Option<Synchronizer>,

    pub status:    ConnectionStatus,
    pub last_sync: Option<DateTime<Local>>,
}

impl Hub {
    pub fn new(
        loaded: Loaded,
        defaults: Defaults,
        cache: LocalCache,
        sync: Option<Synchronizer>,
        roster: RosterStatus,
    ) -> Self {
        let mut hub = Self {
            state: defaults.state(),
            defaults,
            admin: false,
            loading: false,
            roster,
            cache,
            sync,
            status: ConnectionStatus::Local,
            last_sync: None,
        };
        hub.adopt(loaded);
        hub
    }

    /// Mark a background load as in flight. Until it is adopted, login and
    /// remote pushes are refused so the remote document can't be overwritten
    /// by a snapshot that predates it.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.status = ConnectionStatus::Syncing;
    }

    /// Re-read the remote document in the background. `None` without a store.
    pub fn reload(&mut self) -> Option<mpsc::Receiver<Loaded>> {
        let store = self.sync.as_ref()?.store();
        self.begin_load();
        Some(loader::spawn_load(store, self.cache.clone(), self.defaults.clone()))
    }

    /// Replace the snapshot with a finished load and mirror it locally.
    pub fn adopt(&mut self, loaded: Loaded) {
        let mut state = loaded.state;
        state.theme = roster::annotate(&state.theme, self.roster);
        self.state = state;
        self.loading = false;

        match loaded.source {
            LoadSource::Remote => {
                self.status = ConnectionStatus::Connected;
                self.last_sync = Some(Local::now());
            }
            LoadSource::Local => self.status = ConnectionStatus::Local,
        }
        self.cache.persist(&self.state);
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn roster(&self) -> RosterStatus {
        self.roster
    }

    pub fn effective_accent(&self) -> String {
        roster::effective_accent(&self.state.theme, self.roster)
    }

    pub fn remote_enabled(&self) -> bool {
        self.sync.is_some()
    }

    pub fn pending_pushes(&self) -> usize {
        self.sync.as_ref().map_or(0, |s| s.in_flight())
    }

    // ── Admin session ────────────────────────────────────────────────

    /// Exact match against the hub's shared secret. No lockout.
    pub fn login(&mut self, password: &str) -> Result<(), HubError> {
        if self.loading {
            return Err(HubError::Loading);
        }
        let secret = &self.state.config.admin_password_hash;
        if !secret.is_empty() && password == secret {
            self.admin = true;
            tracing::info!("admin mode enabled");
            Ok(())
        } else {
            tracing::warn!("admin login rejected");
            Err(HubError::BadCredential)
        }
    }

    pub fn logout(&mut self) {
        self.admin = false;
    }

    fn require_admin(&self) -> Result<(), HubError> {
        if self.admin { Ok(()) } else { Err(HubError::AdminRequired) }
    }

    // ── Commit ───────────────────────────────────────────────────────

    fn commit(&mut self, next: AppState) {
        self.state = next;
        self.cache.persist(&self.state);
        if self.admin && !self.loading {
            if let Some(sync) = self.sync.as_mut() {
                sync.spawn_push(self.state.clone());
                self.status = ConnectionStatus::Syncing;
            }
        }
    }

    // ── Links ────────────────────────────────────────────────────────

    pub fn add_link(&mut self, draft: &LinkDraft) -> Result<String, HubError> {
        self.require_admin()?;
        let (next, id) = links::add(&self.state, draft, Local::now().timestamp_millis())?;
        self.commit(next);
        Ok(id)
    }

    pub fn edit_link(&mut self, id: &str, draft: &LinkDraft) -> Result<(), HubError> {
        self.require_admin()?;
        let next = links::edit(&self.state, id, draft)?;
        self.commit(next);
        Ok(())
    }

    pub fn delete_link(&mut self, id: &str, confirmed: bool) -> Result<(), HubError> {
        self.require_admin()?;
        let next = links::delete(&self.state, id, confirmed)?;
        self.commit(next);
        Ok(())
    }

    pub fn move_link(&mut self, id: &str, dir: Direction) -> Result<(), HubError> {
        self.require_admin()?;
        let next = links::move_link(&self.state, id, dir)?;
        if next != self.state {
            self.commit(next);
        }
        Ok(())
    }

    // ── Theme ────────────────────────────────────────────────────────

    pub fn edit_theme(&mut self, edit: ThemeEdit) {
        let mut theme = self.state.theme.clone();
        match edit {
            ThemeEdit::Accent(c)          => theme.accent = c,
            ThemeEdit::Background(c)      => theme.background = c,
            ThemeEdit::Particles(p)       => theme.particles = p,
            ThemeEdit::Blur(px)           => theme.blur_amount = Some(px.clamp(0, MAX_BLUR as i32) as u8),
            ThemeEdit::CardOpacity(o)     => theme.card_opacity = o.clamp(0.0, 1.0),
            ThemeEdit::ToggleFixed        => theme.is_fixed = !theme.is_fixed,
            ThemeEdit::BackgroundImage(i) => theme.background_image = i.filter(|s| !s.trim().is_empty()),
        }
        self.commit(AppState { theme, ..self.state.clone() });
    }

    fn replace_theme(&mut self, base: ThemeSettings) {
        let mut theme = roster::annotate(&base, self.roster);
        theme.background_image = self.state.theme.background_image.clone();
        self.commit(AppState { theme, ..self.state.clone() });
    }

    /// Swap in a preset wholesale, keeping any custom background image.
    pub fn apply_preset(&mut self, id: &str, confirmed: bool) -> Result<(), HubError> {
        if !confirmed {
            return Err(HubError::NotConfirmed);
        }
        let preset = find_preset(id).ok_or_else(|| HubError::PresetNotFound(id.to_string()))?;
        self.replace_theme(preset);
        Ok(())
    }

    /// Back to the built-in default theme, keeping any custom background image.
    pub fn reset_theme(&mut self, confirmed: bool) -> Result<(), HubError> {
        if !confirmed {
            return Err(HubError::NotConfirmed);
        }
        self.replace_theme(self.defaults.theme.clone());
        Ok(())
    }

    // ── Config & layout ──────────────────────────────────────────────

    pub fn toggle_config(&mut self, t: ConfigToggle) {
        let mut config = self.state.config.clone();
        config.toggle(t);
        self.commit(AppState { config, ..self.state.clone() });
    }

    pub fn set_config_text(&mut self, field: ConfigText, value: String) {
        let mut config = self.state.config.clone();
        field.set(&mut config, value);
        self.commit(AppState { config, ..self.state.clone() });
    }

    pub fn set_layout(&mut self, layout: LayoutMode) {
        if layout != self.state.layout {
            self.commit(AppState { layout, ..self.state.clone() });
        }
    }

    pub fn cycle_layout(&mut self) {
        self.set_layout(self.state.layout.next());
    }

    // ── Sync ─────────────────────────────────────────────────────────

    /// Push the current snapshot now. Result arrives through `poll_sync`.
    pub fn force_sync(&mut self) -> Result<(), HubError> {
        self.require_admin()?;
        if self.loading {
            return Err(HubError::Loading);
        }
        let sync = self.sync.as_mut().ok_or(HubError::RemoteDisabled)?;
        sync.spawn_push(self.state.clone());
        self.status = ConnectionStatus::Syncing;
        Ok(())
    }

    /// Apply finished push reports. Returns how many arrived.
    pub fn poll_sync(&mut self) -> usize {
        let reports = match self.sync.as_mut() {
            Some(s) => s.drain(),
            None    => return 0,
        };
        for r in &reports {
            self.apply_report(r.ok, r.at);
        }
        reports.len()
    }

    /// Block for the next push report (CLI force-sync).
    pub fn wait_sync(&mut self, timeout: Duration) -> Option<bool> {
        let report = self.sync.as_mut()?.wait(timeout)?;
        self.apply_report(report.ok, report.at);
        Some(report.ok)
    }

    fn apply_report(&mut self, ok: bool, at: DateTime<Local>) {
        if ok {
            self.last_sync = Some(at);
            if self.pending_pushes() == 0 {
                self.status = ConnectionStatus::Connected;
            }
        } else {
            self.status = ConnectionStatus::Error;
        }
    }

    // ── Local cache ──────────────────────────────────────────────────

    /// Wipe the local cache and drop back to a fresh session: default
    /// snapshot, logged out. The defaults are not written back, so the cache
    /// stays empty until the next edit or load.
    pub fn clear_local_cache(&mut self, confirmed: bool) -> Result<(), HubError> {
        if !confirmed {
            return Err(HubError::NotConfirmed);
        }
        self.cache.clear();
        let mut state = self.defaults.state();
        state.theme = roster::annotate(&state.theme, self.roster);
        self.state = state;
        self.admin = false;
        self.status = ConnectionStatus::Local;
        tracing::info!("local cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::link::LinkEntry;
    use crate::models::theme::presets;
    use crate::store::sync::tests::RecordingStore;
    use std::sync::Arc;

    const WAIT: Duration = Duration::from_secs(5);

    fn defaults() -> Defaults {
        Defaults::new("https://store.test/exec", "s3cret")
    }

    fn local_hub(dir: &tempfile::TempDir, roster: RosterStatus) -> Hub {
        let loaded = Loaded { state: defaults().state(), source: LoadSource::Local };
        Hub::new(loaded, defaults(), LocalCache::new(dir.path()), None, roster)
    }

    fn synced_hub(dir: &tempfile::TempDir) -> (Hub, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::default());
        let loaded = Loaded { state: defaults().state(), source: LoadSource::Remote };
        let hub = Hub::new(
            loaded, defaults(), LocalCache::new(dir.path()),
            Some(Synchronizer::new(store.clone())), RosterStatus::Green,
        );
        (hub, store)
    }

    #[test]
    fn fresh_install_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let hub = local_hub(&dir, RosterStatus::Blue);
        let s = hub.state();
        assert!(s.links.is_empty());
        assert_eq!(s.theme.id, presets()[0].id);
        assert_eq!(s.theme.accent, RosterStatus::Blue.color());
        assert_eq!(s.config, defaults().config);
        assert_eq!(s.layout, LayoutMode::Grid);
        assert_eq!(hub.status, ConnectionStatus::Local);
    }

    #[test]
    fn login_checks_the_shared_secret_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Green);
        assert_eq!(hub.login("123456"), Err(HubError::BadCredential));
        assert_eq!(hub.login("wrong"), Err(HubError::BadCredential));
        assert!(!hub.is_admin());
        assert!(hub.login("s3cret").is_ok());
        assert!(hub.is_admin());
        hub.logout();
        assert!(!hub.is_admin());
    }

    #[test]
    fn link_writes_need_admin() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Green);
        let draft = LinkDraft::new("Docs", "https://x.test");
        assert_eq!(hub.add_link(&draft), Err(HubError::AdminRequired));
        assert!(hub.state().links.is_empty());
    }

    #[test]
    fn admin_add_persists_locally_and_pushes() {
        let dir = tempfile::tempdir().unwrap();
        let (mut hub, store) = synced_hub(&dir);
        hub.login("s3cret").unwrap();

        let before = hub.state().links.len();
        let id = hub.add_link(&LinkDraft::new("Docs", "https://x.test")).unwrap();
        assert_eq!(hub.state().links.len(), before + 1);
        assert_eq!(hub.status, ConnectionStatus::Syncing);

        assert_eq!(hub.wait_sync(WAIT), Some(true));
        assert_eq!(hub.status, ConnectionStatus::Connected);
        let saved = store.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].links.iter().any(|l| l.id == id));

        let cached = LocalCache::new(dir.path()).load_state(&defaults());
        assert_eq!(&cached, hub.state());
    }

    #[test]
    fn non_admin_theme_edit_is_local_only() {
        let dir = tempfile::tempdir().unwrap();
        let (mut hub, store) = synced_hub(&dir);
        hub.edit_theme(ThemeEdit::Blur(99));
        assert_eq!(hub.state().theme.blur_amount, Some(MAX_BLUR));
        assert_eq!(hub.pending_pushes(), 0);
        assert!(store.saved.lock().unwrap().is_empty());
        let cached = LocalCache::new(dir.path()).load_state(&defaults());
        assert_eq!(cached.theme.blur_amount, Some(MAX_BLUR));
    }

    #[test]
    fn preset_keeps_background_image_and_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Yellow);
        hub.edit_theme(ThemeEdit::BackgroundImage(Some("https://img.test/bg.png".into())));

        assert_eq!(hub.apply_preset("crimson-protocol", false), Err(HubError::NotConfirmed));
        hub.apply_preset("crimson-protocol", true).unwrap();
        let t = &hub.state().theme;
        assert_eq!(t.id, "crimson-protocol");
        assert_eq!(t.background_image.as_deref(), Some("https://img.test/bg.png"));
        assert_eq!(hub.effective_accent(), "#ef4444");

        assert_eq!(hub.apply_preset("nope", true), Err(HubError::PresetNotFound("nope".into())));
    }

    #[test]
    fn reset_theme_follows_roster_again() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Yellow);
        hub.apply_preset("frost", true).unwrap();
        hub.reset_theme(true).unwrap();
        assert_eq!(hub.state().theme.id, "readiness");
        assert_eq!(hub.state().theme.accent, RosterStatus::Yellow.color());
    }

    #[test]
    fn toggling_fixed_switches_effective_accent() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Green);
        hub.edit_theme(ThemeEdit::ToggleFixed);
        hub.edit_theme(ThemeEdit::Accent("#123456".into()));
        assert_eq!(hub.effective_accent(), "#123456");
        hub.edit_theme(ThemeEdit::ToggleFixed);
        assert_eq!(hub.effective_accent(), RosterStatus::Green.color());
    }

    #[test]
    fn failed_push_marks_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(RecordingStore { fail: true, ..RecordingStore::default() });
        let loaded = Loaded { state: defaults().state(), source: LoadSource::Remote };
        let mut hub = Hub::new(
            loaded, defaults(), LocalCache::new(dir.path()),
            Some(Synchronizer::new(store)), RosterStatus::Green,
        );
        hub.login("s3cret").unwrap();
        hub.force_sync().unwrap();
        assert_eq!(hub.wait_sync(WAIT), Some(false));
        assert_eq!(hub.status, ConnectionStatus::Error);
    }

    #[test]
    fn force_sync_rules() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Green);
        assert_eq!(hub.force_sync(), Err(HubError::AdminRequired));
        hub.login("s3cret").unwrap();
        assert_eq!(hub.force_sync(), Err(HubError::RemoteDisabled));
    }

    #[test]
    fn clear_cache_needs_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Green);
        let cache = LocalCache::new(dir.path());
        assert!(!cache.is_empty());
        assert_eq!(hub.clear_local_cache(false), Err(HubError::NotConfirmed));
        assert!(!cache.is_empty());
        hub.clear_local_cache(true).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_cache_resets_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Yellow);
        hub.login("s3cret").unwrap();
        hub.add_link(&LinkDraft::new("Docs", "https://x.test")).unwrap();
        hub.cycle_layout();

        hub.clear_local_cache(true).unwrap();
        assert!(hub.state().links.is_empty());
        assert_eq!(hub.state().layout, LayoutMode::Grid);
        assert_eq!(hub.state().theme.accent, RosterStatus::Yellow.color());
        assert!(!hub.is_admin());
        assert!(LocalCache::new(dir.path()).is_empty());

        // The next edit writes a fresh snapshot, not the pre-clear one.
        hub.toggle_config(ConfigToggle::Search);
        let cached = LocalCache::new(dir.path()).load_state(&defaults());
        assert!(cached.links.is_empty());
    }

    #[test]
    fn no_login_or_push_before_the_load_lands() {
        let dir = tempfile::tempdir().unwrap();
        let (mut hub, store) = synced_hub(&dir);
        hub.begin_load();
        assert!(hub.is_loading());
        assert_eq!(hub.login("s3cret"), Err(HubError::Loading));

        let mut remote = defaults().state();
        for i in 0..50 {
            remote.links.push(LinkEntry {
                id: format!("r{i}"), title: format!("Remote {i}"), url: format!("https://r{i}.test"),
                description: String::new(), category: "Geral".into(), icon: "Link".into(), order: i,
            });
        }
        hub.adopt(Loaded { state: remote, source: LoadSource::Remote });
        assert!(!hub.is_loading());

        hub.login("s3cret").unwrap();
        hub.add_link(&LinkDraft::new("New", "https://new.test")).unwrap();
        assert_eq!(hub.wait_sync(WAIT), Some(true));
        let saved = store.saved.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].links.len(), 51);
    }

    #[test]
    fn admin_edits_during_a_reload_stay_local() {
        let dir = tempfile::tempdir().unwrap();
        let (mut hub, store) = synced_hub(&dir);
        hub.login("s3cret").unwrap();
        let rx = hub.reload().unwrap();
        assert_eq!(hub.status, ConnectionStatus::Syncing);

        hub.add_link(&LinkDraft::new("Early", "https://early.test")).unwrap();
        assert_eq!(hub.pending_pushes(), 0);
        assert_eq!(hub.force_sync(), Err(HubError::Loading));

        hub.adopt(rx.recv_timeout(WAIT).unwrap());
        assert!(!hub.is_loading());
        assert!(store.saved.lock().unwrap().is_empty());
    }

    #[test]
    fn reload_needs_a_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Green);
        assert!(hub.reload().is_none());
        assert!(!hub.is_loading());
    }

    #[test]
    fn layout_and_config_edits_replace_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Green);
        hub.cycle_layout();
        assert_eq!(hub.state().layout, LayoutMode::Compact);
        hub.toggle_config(ConfigToggle::Search);
        assert!(!hub.state().config.show_search);
        hub.set_config_text(ConfigText::Title, "Ops".into());
        assert_eq!(hub.state().config.title, "Ops");
        let cached = LocalCache::new(dir.path()).load_state(&defaults());
        assert_eq!(cached.layout, LayoutMode::Compact);
        assert_eq!(cached.config.title, "Ops");
    }

    #[test]
    fn adopting_a_remote_load_marks_connected() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = local_hub(&dir, RosterStatus::Blue);
        hub.begin_load();
        assert_eq!(hub.status, ConnectionStatus::Syncing);

        let mut remote = defaults().state();
        remote.theme = find_preset("crimson-protocol").unwrap();
        remote.theme.is_fixed = false;
        remote.layout = LayoutMode::List;
        hub.adopt(Loaded { state: remote, source: LoadSource::Remote });

        assert_eq!(hub.status, ConnectionStatus::Connected);
        assert!(hub.last_sync.is_some());
        assert_eq!(hub.effective_accent(), RosterStatus::Blue.color());
        assert_eq!(LocalCache::new(dir.path()).load_state(&defaults()).layout, LayoutMode::List);
    }
}
