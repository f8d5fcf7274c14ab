///! Cooperative teardown signal shared by the background loops.
///!
///! A single `ShutdownTrigger` fans out to any number of `Shutdown`
///! listeners. Once triggered the signal stays set; a listener whose
///! trigger has been dropped also treats that as shutdown.

use tokio::sync::watch;

pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

#[derive(Debug, Clone)]
pub struct Shutdown {
    rx: watch::Receiver<bool>,
}

pub fn shutdown_channel() -> (ShutdownTrigger, Shutdown) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, Shutdown { rx })
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn subscribe(&self) -> Shutdown {
        Shutdown { rx: self.tx.subscribe() }
    }
}

impl Shutdown {
    pub fn is_signalled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been signalled, immediately if it already was.
    pub async fn wait(&mut self) {
        // Err means the trigger is gone, which is a teardown as well
        let _ = self.rx.wait_for(|stop| *stop).await;
    }
}
