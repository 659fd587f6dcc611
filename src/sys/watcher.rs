use crate::config::{ConfigError, get_config_path};
use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Editors save in several steps; events closer together than this count as one save.
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(200);

type WatchEvents = Receiver<notify::Result<Event>>;

/// Watches the config file's directory and sends one `ConfigReload` per save.
pub async fn run(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };

    // the watcher stops when dropped
    let (_watcher, events) = match watch_parent(&config_path) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch {}: {}", config_path.display(), e);
            return;
        }
    };
    log::info!("Watching {}", config_path.display());

    forward_reloads(events, config_path, tx, RELOAD_DEBOUNCE).await;
}

fn watch_parent(config_path: &Path) -> Result<(RecommendedWatcher, WatchEvents), ConfigError> {
    let config_dir = config_path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, bridge_rx))
}

/// Turns raw watch events into reload requests.
///
/// After the first event touching `config_path`, waits `quiet` and drops
/// whatever else arrived meanwhile, so a burst yields a single reload. Returns
/// when either channel closes.
pub async fn forward_reloads(
    events: WatchEvents,
    config_path: PathBuf,
    tx: Sender<AppEvent>,
    quiet: Duration,
) {
    while let Ok(res) = events.recv().await {
        if !touches(&res, &config_path) {
            continue;
        }

        tokio::time::sleep(quiet).await;
        let coalesced = std::iter::from_fn(|| events.try_recv().ok()).count();
        log::debug!("Config changed ({} more events coalesced)", coalesced);

        if tx.send(AppEvent::ConfigReload).await.is_err() {
            break;
        }
    }
}

fn touches(res: &notify::Result<Event>, config_path: &Path) -> bool {
    match res {
        Ok(event) => {
            matches!(
                event.kind,
                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
            ) && event.paths.iter().any(|p| p == config_path)
        }
        Err(e) => {
            log::error!("Watch error: {}", e);
            false
        }
    }
}
