//! Tick logger background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Background task that logs every tick of the held gesture
pub async fn tick_logger_task(state: Arc<AppState>) {
    info!("Starting tick logger task");

    let mut tick_rx = state.subscribe_ticks();
    // The host keeps its own sender alive; drop our handle to the state so
    // closing is decided by the owner.
    drop(state);

    loop {
        match tick_rx.recv().await {
            Ok(tick) => {
                debug!("Tick #{} at {}", tick.sequence, tick.at.format("%H:%M:%S%.3f"));
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Tick logger lagged, skipped {} ticks", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Tick channel closed, stopping tick logger");
                break;
            }
        }
    }
}
