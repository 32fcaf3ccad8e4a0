//! Repeat Gesture - A repeating timer for press-and-hold gesture actions
//! 
//! This is the main entry point for the gesture host.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use repeat_gesture::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{hold_watchdog_task, tick_logger_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("repeat_gesture={},tower_http=info", config.log_level()))
        .init();

    info!("Starting repeat-gesture host v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, interval={}ms, max_hold={}s",
          config.host, config.port, config.interval_ms, config.max_hold_secs);

    // The one shared timer lives here and is handed to handlers by reference
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.repeat_interval(),
        config.max_hold(),
    ));

    tokio::spawn(hold_watchdog_task(Arc::clone(&state)));
    tokio::spawn(tick_logger_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /press    - Press and hold the gesture");
    info!("  POST /release  - Release the gesture");
    info!("  POST /interval - Set the repeat interval ({{\"ms\": 400}})");
    info!("  GET  /status   - Check timer status and tick count");
    info!("  GET  /health   - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // No tick may outlive the host
    state.timer().stop();

    info!("Server shutdown complete");
    Ok(())
}
