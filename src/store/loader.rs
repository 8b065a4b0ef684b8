use crate::models::hub_config::AppConfig;
use crate::models::link::LinkEntry;
use crate::models::state::{AppState, Defaults, LayoutMode};
use crate::store::local_cache::LocalCache;
use crate::store::remote::DocumentStore;
use serde_json::{Map, Value};
use std::sync::{mpsc, Arc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Local,
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub state:  AppState,
    pub source: LoadSource,
}

/// Produce the startup snapshot. Tries the remote document first (when a
/// store is given), then falls back to the local cache. Never fails.
pub fn load(remote: Option<&dyn DocumentStore>, cache: &LocalCache, defaults: &Defaults) -> Loaded {
    if let Some(store) = remote {
        match store.fetch() {
            Ok(doc) => match from_document(&doc, defaults) {
                Some(state) => {
                    tracing::info!(links = state.links.len(), "remote document loaded");
                    return Loaded { state, source: LoadSource::Remote };
                }
                None => tracing::warn!("remote document is not an object, using local cache"),
            },
            Err(e) => tracing::warn!(error = %e, "remote store unavailable, using local cache"),
        }
    }

    Loaded { state: cache.load_state(defaults), source: LoadSource::Local }
}

/// Run `load` on a detached thread; the result arrives once on the channel.
pub fn spawn_load(store: Arc<dyn DocumentStore>, cache: LocalCache, defaults: Defaults) -> mpsc::Receiver<Loaded> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let loaded = load(Some(store.as_ref()), &cache, &defaults);
        let _ = tx.send(loaded);
    });
    rx
}

/// Coerce a fetched document into a state. `None` unless it is a JSON object.
pub fn from_document(doc: &Value, defaults: &Defaults) -> Option<AppState> {
    let obj = doc.as_object()?;

    let theme = obj.get("theme")
        .and_then(|t| serde_json::from_value(t.clone()).ok())
        .unwrap_or_else(|| defaults.theme.clone());

    let layout = obj.get("layout")
        .and_then(Value::as_str)
        .and_then(LayoutMode::parse)
        .unwrap_or(defaults.layout);

    Some(AppState {
        links:  coerce_links(obj.get("links")),
        theme,
        config: merge_config(obj.get("config"), &defaults.config),
        layout,
    })
}

fn coerce_links(v: Option<&Value>) -> Vec<LinkEntry> {
    let Some(items) = v.and_then(Value::as_array) else {
        return Vec::new();
    };
    items.iter()
        .filter_map(|item| match serde_json::from_value::<LinkEntry>(item.clone()) {
            Ok(l)  => Some(l),
            Err(e) => {
                tracing::debug!(error = %e, "dropping malformed link entry");
                None
            }
        })
        .collect()
}

fn same_kind(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::String(_), Value::String(_))
            | (Value::Bool(_), Value::Bool(_))
            | (Value::Number(_), Value::Number(_))
    )
}

/// Field-by-field overlay of the remote config on the defaults. A remote
/// field is only taken when its JSON type matches; the endpoint always
/// stays the default one.
fn merge_config(remote: Option<&Value>, defaults: &AppConfig) -> AppConfig {
    let Ok(Value::Object(mut merged)) = serde_json::to_value(defaults) else {
        return defaults.clone();
    };
    let empty = Map::new();
    let remote = remote.and_then(Value::as_object).unwrap_or(&empty);

    for (key, slot) in merged.iter_mut() {
        if let Some(rv) = remote.get(key) {
            if same_kind(slot, rv) {
                *slot = rv.clone();
            }
        }
    }

    let mut cfg: AppConfig = serde_json::from_value(Value::Object(merged))
        .unwrap_or_else(|_| defaults.clone());
    cfg.gas_url = defaults.gas_url.clone();
    cfg
}
