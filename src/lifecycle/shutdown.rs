//! Single-use stop signal for background servers.

use tokio::sync::oneshot;

/// Create a linked trigger/signal pair.
pub fn stop_signal() -> (StopTrigger, StopSignal) {
    let (tx, rx) = oneshot::channel();
    (StopTrigger { tx }, StopSignal { rx })
}

/// Sending half. Consumed by [`StopTrigger::trigger`], so it fires at most once.
#[derive(Debug)]
pub struct StopTrigger {
    tx: oneshot::Sender<()>,
}

impl StopTrigger {
    /// Fire the stop signal. Returns false if the receiving task is already gone.
    pub fn trigger(self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// Receiving half, owned by the task that must stop.
#[derive(Debug)]
pub struct StopSignal {
    rx: oneshot::Receiver<()>,
}

impl StopSignal {
    /// Wait for the stop signal.
    ///
    /// Returns true when triggered, false when the trigger was dropped unfired.
    /// Either way the task should stop.
    pub async fn wait(self) -> bool {
        self.rx.await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_is_observed() {
        let (trigger, signal) = stop_signal();
        let waiter = tokio::spawn(signal.wait());

        assert!(trigger.trigger());
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_dropped_trigger_still_releases_waiter() {
        let (trigger, signal) = stop_signal();
        drop(trigger);
        assert!(!signal.wait().await);
    }

    #[test]
    fn test_trigger_after_receiver_dropped() {
        let (trigger, signal) = stop_signal();
        drop(signal);
        assert!(!trigger.trigger());
    }
}
