//! Graceful shutdown signal handling

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

#[derive(Debug, Clone, Copy)]
enum Signal {
    CtrlC,
    #[cfg(unix)]
    Terminate,
}

async fn ctrl_c() -> Result<Signal, ShutdownSignalError> {
    signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC)?;

    Ok(Signal::CtrlC)
}

#[cfg(unix)]
async fn terminate() -> Result<Signal, ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?
        .recv()
        .await;

    Ok(Signal::Terminate)
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<Signal, ShutdownSignalError> {
    tokio::select! {
        signal = ctrl_c() => signal,
        signal = terminate() => signal,
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<Signal, ShutdownSignalError> {
    ctrl_c().await
}

/// Wait for Ctrl+C or SIGTERM, then stop accepting connections and give in-flight requests
/// `grace` to finish.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Duration,
) -> Result<(), ShutdownSignalError> {
    let signal = wait_for_signal().await?;

    info!(?signal, grace_seconds = grace.as_secs(), "shutdown signal received");

    handle.stop_graceful(Some(grace));

    Ok(())
}
