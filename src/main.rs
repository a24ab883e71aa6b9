/*!
 * Exec Service - Main Entry Point
 *
 * Accepts launch and status requests over TCP and tracks the
 * spawned processes until they exit.
 */

use anyhow::Context;
use std::time::Duration;
use tracing::info;

use exec_service::{api, init_tracing, ExecService, ServiceConfig};

/// Waiters of still-running children occupy blocking threads; shutdown
/// does not wait for those processes to exit
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env().context("Failed to load configuration")?;

    init_tracing(config.trace_json);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = runtime.block_on(run(config));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    info!("Exec service starting...");
    let service = ExecService::new(&config);

    let listener = api::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!("Exec service is ready to receive requests");
    info!("Press Ctrl+C to exit");

    tokio::select! {
        _ = api::serve(listener, service.clone()) => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl+C")?;
            info!(tracked = service.table().len(), "Shutdown requested");
        }
    }

    Ok(())
}
