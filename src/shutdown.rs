use std::time::Duration;
use tokio::sync::watch;

/// Stop signal observed by every long-running loop.
#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

pub fn channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Shutdown {
    pub fn is_requested(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once a stop has been requested.
    pub async fn requested(&mut self) {
        let _ = self.rx.wait_for(|stop| *stop).await;
    }

    /// Sleeps for `duration` unless a stop arrives first.
    ///
    /// Returns `true` when the caller should stop. A dropped trigger counts as
    /// a stop request.
    pub async fn sleep(&mut self, duration: Duration) -> bool {
        if self.is_requested() {
            return true;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => false,
            _ = self.rx.wait_for(|stop| *stop) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_sleep_runs_to_completion() {
        let (_trigger, mut shutdown) = channel();
        let start = Instant::now();
        assert!(!shutdown.sleep(Duration::from_secs(5)).await);
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_interrupted() {
        let (trigger, mut shutdown) = channel();
        let start = Instant::now();

        let waiter = tokio::spawn(async move { shutdown.sleep(Duration::from_secs(3600)).await });
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.trigger();

        assert!(waiter.await.unwrap());
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_requested() {
        let (trigger, mut shutdown) = channel();
        trigger.trigger();
        assert!(shutdown.is_requested());
        assert!(shutdown.sleep(Duration::from_secs(60)).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_trigger_stops() {
        let (trigger, mut shutdown) = channel();
        drop(trigger);
        assert!(shutdown.sleep(Duration::from_secs(60)).await);
    }
}
