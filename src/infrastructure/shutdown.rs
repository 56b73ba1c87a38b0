//! Graceful Shutdown Handler
//!
//! Signal handling for the local gateway. The Lambda runtime loop is
//! stopped by the platform and needs none of this.

/// Install signal handlers for graceful shutdown.
///
/// Returns a future that completes when SIGINT or SIGTERM is received.
#[cfg_attr(coverage_nightly, coverage(off))]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating shutdown");
        }
    }
}
