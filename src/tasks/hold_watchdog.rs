//! Hold watchdog background task

use std::{sync::Arc, time::Duration};
use tokio::time::interval;
use tracing::{error, info};

use crate::state::AppState;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Background task that releases holds running past the configured maximum.
/// A client that never sends its release would otherwise keep the timer
/// ticking forever.
pub async fn hold_watchdog_task(state: Arc<AppState>) {
    let Some(max_hold) = state.max_hold else {
        info!("No maximum hold configured, watchdog disabled");
        return;
    };

    info!("Starting hold watchdog, maximum hold {:?}", max_hold);
    let mut interval = interval(POLL_INTERVAL);

    loop {
        interval.tick().await;

        // Check and release under one lock so a newer hold is never cut short
        if let Err(e) = state.release_overlong(max_hold) {
            error!("Failed to auto-release hold: {}", e);
        }
    }
}
