//! Ring Timer - A countdown timer service with a progress ring and alarm
//!
//! This is the main entry point for the ring-timer application.

use tokio::net::TcpListener;
use tracing::{info, warn};

use ring_timer::{
    api::create_router,
    config::Config,
    engine::Field,
    services::{check_sound_available, CommandPlayback},
    tasks::start_timer_runtime,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("ring_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting ring-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, preset={}h{}m, alarm={}s",
          config.host, config.port, config.hours, config.minutes, config.alarm_secs);

    // A missing sound is not fatal, the alarm still runs silently
    if let Err(e) = check_sound_available(&config.sound) {
        warn!("{}", e);
    }

    let playback = CommandPlayback::new(config.player.clone(), config.sound.clone());
    let state = start_timer_runtime(
        config.port,
        config.host.clone(),
        config.runtime_options(),
        Box::new(playback),
    );

    // Apply the initial preset
    let hours = i64::try_from(config.hours).unwrap_or(i64::MAX);
    let minutes = i64::try_from(config.minutes).unwrap_or(i64::MAX);
    if let Err(e) = state.configure(Field::Hours, hours).and_then(|_| state.configure(Field::Minutes, minutes)) {
        warn!("Failed to apply initial preset: {}", e);
    }

    // Create HTTP router with all endpoints
    let app = create_router(std::sync::Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /select/:field - Select hours or minutes for plus/minus");
    info!("  POST /plus          - Increment the selected field");
    info!("  POST /minus         - Decrement the selected field");
    info!("  POST /configure     - Adjust a field by a delta");
    info!("  POST /start         - Start or resume the countdown");
    info!("  POST /pause         - Pause the countdown");
    info!("  POST /reset         - Stop the alarm and restore the preset");
    info!("  POST /toggle        - Main button (start/pause/stop)");
    info!("  GET  /status        - Current timer state and frame");
    info!("  GET  /health        - Health check");

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

    // Silence any ringing alarm before exiting
    if let Err(e) = state.reset() {
        warn!("Failed to reset timer on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
