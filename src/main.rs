mod app;
mod config;
mod error;
mod hub;
mod input;
mod links;
mod models;
mod store;
mod suggest;
mod telemetry;
mod ui;
mod util;

use anyhow::{bail, Result};
use app::App;
use clap::{CommandFactory, Parser};
use config::Config;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hub::Hub;
use models::state::Defaults;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;
use store::loader::{self, LoadSource, Loaded};
use store::local_cache::LocalCache;
use store::remote::{DocumentStore, HttpDocumentStore};
use store::sync::Synchronizer;
use suggest::{GeminiSuggester, MetadataSuggester, NoSuggester};
use telemetry::LogTarget;
use util::roster;

#[derive(Parser, Debug)]
#[command(name = "linkhub", about = "Themeable terminal link hub with remote sync", version)]
struct Cli {
    /// Skip the remote read at startup; start from the local cache
    #[arg(long)]
    offline: bool,

    /// Print the loaded hub document as JSON and exit
    #[arg(long)]
    json: bool,

    /// Print all links grouped by category and exit
    #[arg(long)]
    list: bool,

    /// Print today's roster colour and the effective accent, then exit
    #[arg(long)]
    roster: bool,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,

    /// Push the loaded document to the remote store and exit (needs --password)
    #[arg(long, requires = "password")]
    push: bool,

    /// Admin password for --push
    #[arg(long)]
    password: Option<String>,

    /// Delete the local cache files and exit (needs --yes)
    #[arg(long)]
    clear_cache: bool,

    /// Confirm destructive one-shot operations
    #[arg(short = 'y', long)]
    yes: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "linkhub", &mut io::stdout());
        return Ok(());
    }

    let cfg = Config::load();
    let one_shot = cli.json || cli.list || cli.roster || cli.config || cli.push || cli.clear_cache;
    let target = if one_shot { LogTarget::Stderr } else { LogTarget::File };
    telemetry::init(&cfg.logging, &cfg.data_dir(), target);

    if cli.config {
        return run_print_config(&cfg);
    }
    if cli.clear_cache {
        return run_clear_cache(&cfg, cli.yes);
    }
    if cli.roster {
        return run_roster(&cfg);
    }
    if cli.json {
        return run_json(&cfg, cli.offline);
    }
    if cli.list {
        return run_list(&cfg, cli.offline);
    }
    if cli.push {
        return run_push(&cfg, cli.offline, cli.password.as_deref().unwrap_or_default());
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let result = run(cfg, cli.offline);
    restore_terminal()?;
    result
}

// ── Wiring ─────────────────────────────────────────────────────────────

fn defaults(cfg: &Config) -> Defaults {
    Defaults::new(&cfg.remote.endpoint, &cfg.hub.default_password)
}

fn remote_store(cfg: &Config) -> Option<Arc<dyn DocumentStore>> {
    if !cfg.remote.enabled {
        return None;
    }
    match HttpDocumentStore::new(&cfg.remote.endpoint, cfg.read_timeout()) {
        Ok(s)  => Some(Arc::new(s)),
        Err(e) => {
            tracing::warn!(error = %e, "remote store unavailable");
            None
        }
    }
}

/// Load the document (remote first unless offline) and assemble the hub.
fn build_hub(cfg: &Config, offline: bool) -> Hub {
    let defaults = defaults(cfg);
    let cache    = LocalCache::new(cfg.data_dir());
    let store    = remote_store(cfg);

    let reader = if offline { None } else { store.as_deref() };
    let loaded = loader::load(reader, &cache, &defaults);
    let sync   = store.map(Synchronizer::new);

    Hub::new(loaded, defaults, cache, sync, roster::current_roster())
}

fn suggester(cfg: &Config) -> Arc<dyn MetadataSuggester> {
    match cfg.suggest_api_key().and_then(|k| GeminiSuggester::new(k, cfg.suggest.model.clone())) {
        Some(g) => Arc::new(g),
        None    => Arc::new(NoSuggester),
    }
}

// ── One-shot modes ─────────────────────────────────────────────────────

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  tick_ms       = {}", cfg.general.tick_ms);
    println!();
    println!("[remote]");
    println!("  endpoint      = {}", cfg.remote.endpoint);
    println!("  enabled       = {}", cfg.remote.enabled);
    println!("  timeout_secs  = {}", cfg.remote.timeout_secs);
    println!();
    println!("[hub]");
    println!("  default_password = (set)");
    println!();
    println!("[storage]");
    println!("  dir           = {}", cfg.data_dir().display());
    println!();
    println!("[suggest]");
    let key = if cfg.suggest_api_key().is_some() { "(present)" } else { "(not set)" };
    println!("  api_key_env   = {} {}", cfg.suggest.api_key_env, key);
    println!("  model         = {}", cfg.suggest.model);
    println!();
    println!("[logging]");
    println!("  level         = {}", cfg.logging.level);
    println!("  file          = {} ({})", cfg.logging.file, telemetry::log_path(&cfg.data_dir()).display());
    Ok(())
}

fn run_clear_cache(cfg: &Config, yes: bool) -> Result<()> {
    let cache = LocalCache::new(cfg.data_dir());
    if !yes {
        bail!("refusing to clear {} without --yes", cache.root().display());
    }
    if cache.is_empty() {
        println!("Local cache in {} is already empty", cache.root().display());
        return Ok(());
    }
    cache.clear();
    println!("Cleared local cache in {}", cache.root().display());
    Ok(())
}

fn run_roster(cfg: &Config) -> Result<()> {
    let cache  = LocalCache::new(cfg.data_dir());
    let state  = cache.load_state(&defaults(cfg));
    let today  = roster::current_roster();
    let accent = roster::effective_accent(&state.theme, today);
    println!("Roster: {} ({})", today.label(), today.color());
    println!("Theme:  {}{}", state.theme.name, if state.theme.is_fixed { " (fixed accent)" } else { "" });
    println!("Accent: {}", accent);
    Ok(())
}

fn run_json(cfg: &Config, offline: bool) -> Result<()> {
    let hub = build_hub(cfg, offline);
    println!("{}", serde_json::to_string_pretty(hub.state())?);
    Ok(())
}

fn run_list(cfg: &Config, offline: bool) -> Result<()> {
    let hub   = build_hub(cfg, offline);
    let state = hub.state();
    println!("{}  [{}]", state.config.title, hub.status.label());
    if state.links.is_empty() {
        println!("No links.");
        return Ok(());
    }
    for cat in links::categories(&state.links) {
        println!();
        println!("{}", cat);
        for l in links::filtered(&state.links, "", Some(cat.as_str())) {
            println!("  {:<30} {}", l.title, l.url);
        }
    }
    Ok(())
}

fn run_push(cfg: &Config, offline: bool, password: &str) -> Result<()> {
    let mut hub = build_hub(cfg, offline);
    hub.login(password)?;
    hub.force_sync()?;
    match hub.wait_sync(Duration::from_secs(cfg.remote.timeout_secs.max(1) * 2)) {
        Some(true) => {
            println!("Pushed {} links to {}", hub.state().links.len(), hub.state().config.gas_url);
            Ok(())
        }
        Some(false) => bail!("push failed; see the log for details"),
        None        => bail!("push did not finish in time"),
    }
}

// ── TUI ────────────────────────────────────────────────────────────────

fn run(cfg: Config, offline: bool) -> Result<()> {
    // Start from the local cache; the remote read lands while the UI runs.
    let defaults = defaults(&cfg);
    let cache    = LocalCache::new(cfg.data_dir());
    let store    = remote_store(&cfg);
    let local    = Loaded { state: cache.load_state(&defaults), source: LoadSource::Local };

    let startup = match (&store, offline) {
        (Some(s), false) => Some(loader::spawn_load(Arc::clone(s), cache.clone(), defaults.clone())),
        _                => None,
    };
    let hub = Hub::new(local, defaults, cache, store.map(Synchronizer::new), roster::current_roster());
    let suggester = suggester(&cfg);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut term = Terminal::new(backend)?;

    let mut app = App::new(cfg, hub, suggester);
    if let Some(rx) = startup {
        app = app.with_startup_load(rx);
    }
    app.run(&mut term)?;

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
