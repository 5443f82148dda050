use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::game_manager::GameManager;
use hangman_core::{GameEvent, GameEventHandler};

/// Asks the statistics refresher for an early run whenever a game starts or
/// ends. Never blocks the request that published the event.
pub struct StatsRefreshTrigger {
    notify: Arc<Notify>,
}

impl StatsRefreshTrigger {
    pub fn new(notify: Arc<Notify>) -> Self {
        Self { notify }
    }
}

impl GameEventHandler for StatsRefreshTrigger {
    fn handle_event(&self, event: &GameEvent) {
        if event.changes_active_games() {
            // A stored permit collapses bursts of events into one recompute
            self.notify.notify_one();
        }
    }
}

/// Recompute the cached average on every tick of `interval` and whenever
/// `notify` fires.
pub fn spawn_statistics_refresher(
    game_manager: Arc<GameManager>,
    interval: Duration,
    notify: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = notify.notified() => {}
            }

            match game_manager.cache_average_attempts().await {
                Ok(Some(message)) => debug!("{}", message),
                Ok(None) => debug!("No games in progress, keeping cached average"),
                Err(err) => error!("Failed to refresh average moves remaining: {}", err),
            }
        }
    })
}
