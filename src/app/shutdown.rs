//! Graceful shutdown handling.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Stops the run's background tasks and waits for them to exit.
///
/// Every task is expected to watch `cancel` (or a child token of it).
pub async fn shutdown_gracefully(cancel: CancellationToken, tasks: Vec<JoinHandle<()>>) {
    cancel.cancel();
    for task in tasks {
        if let Err(e) = task.await {
            log::debug!("Background task ended abnormally: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_stops_watching_tasks() {
        let cancel = CancellationToken::new();
        let child = cancel.child_token();
        let task = tokio::spawn(async move { child.cancelled().await });

        tokio::time::timeout(
            std::time::Duration::from_secs(1),
            shutdown_gracefully(cancel, vec![task]),
        )
        .await
        .expect("shutdown should not hang");
    }
}
