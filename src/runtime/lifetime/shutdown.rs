use tokio::signal;
use tracing::{error, warn};

/// 等待 Ctrl+C 或 SIGTERM（unix）
pub async fn listen_for_shutdown() {
    #[cfg(unix)]
    {
        let mut terminate = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(stream) => Some(stream),
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                None
            }
        };

        tokio::select! {
            res = signal::ctrl_c() => {
                if let Err(e) = res {
                    error!("Failed to listen for Ctrl+C: {}", e);
                }
            }
            _ = async {
                match terminate.as_mut() {
                    Some(stream) => {
                        stream.recv().await;
                    }
                    None => std::future::pending::<()>().await,
                }
            } => {}
        }
    }

    #[cfg(not(unix))]
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
    }

    warn!("Shutdown signal received, initiating graceful shutdown...");
}
