//! # Refresh Signal
//!
//! The scheduler override. Any number of requests made before the tick loop
//! gets to them collapse into a single pending refresh: the signal holds at
//! most one permit, and requesting never blocks.

use std::sync::Arc;

use tokio::sync::Notify;

/// A cloneable, single-slot refresh request.
#[derive(Clone, Debug, Default)]
pub struct RefreshSignal {
    notify: Arc<Notify>,
    #[cfg(test)]
    requests: Arc<std::sync::atomic::AtomicUsize>,
}

impl RefreshSignal {
    /// Creates a signal with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a refresh. Repeated requests before the next wait coalesce.
    pub fn request(&self) {
        #[cfg(test)]
        self.requests.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Requests made through this signal or any clone, before coalescing.
    #[cfg(test)]
    pub(crate) fn request_count(&self) -> usize {
        self.requests.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Waits until a refresh has been requested, consuming the request.
    pub async fn requested(&self) {
        self.notify.notified().await;
    }
}

/// # Forward Signal
///
/// Spawns a task that turns every delivery of the OS signal `signal` (for
/// example `SIGUSR1` or a real-time signal) into a refresh request. Must be
/// called from within a Tokio runtime.
#[cfg(unix)]
pub fn forward_signal(
    signal: i32,
    refresh: RefreshSignal,
) -> std::io::Result<tokio::task::JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal as listen};

    let mut stream = listen(SignalKind::from_raw(signal))?;
    log::info!("Forwarding signal {} to refresh requests", signal);

    Ok(tokio::spawn(async move {
        while stream.recv().await.is_some() {
            log::debug!("Signal {} received, refreshing", signal);
            refresh.request();
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test(start_paused = true)]
    async fn requests_coalesce_into_one() {
        let signal = RefreshSignal::new();
        signal.request();
        signal.clone().request();
        signal.request();
        assert_eq!(signal.request_count(), 3);

        timeout(Duration::from_millis(10), signal.requested())
            .await
            .expect("first wait sees the pending request");
        assert!(
            timeout(Duration::from_millis(10), signal.requested())
                .await
                .is_err(),
            "second wait has nothing pending"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_pending_by_default() {
        let signal = RefreshSignal::new();
        assert!(timeout(Duration::from_millis(10), signal.requested()).await.is_err());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn os_signal_requests_refresh() {
        const SIGUSR2: i32 = 12;
        let signal = RefreshSignal::new();
        let _task = forward_signal(SIGUSR2, signal.clone()).unwrap();

        let status = std::process::Command::new("kill")
            .args(["-USR2", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        timeout(Duration::from_secs(5), signal.requested())
            .await
            .expect("signal was forwarded");
    }
}
