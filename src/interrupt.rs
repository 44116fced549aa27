//! Ctrl-C handling for the measurement run
//!
//! The OS handler is registered synchronously by [`Interrupt::listen`], so a
//! Ctrl-C at any point after that (reading manifests, between installs,
//! while measuring, before the report) is recorded and ends the run instead
//! of killing the process with sandboxes still on disk.

use crate::error::AppError;
use tokio::sync::watch;

/// Shared view of whether the operator asked to stop
#[derive(Debug, Clone)]
pub struct Interrupt {
    rx: watch::Receiver<bool>,
}

impl Interrupt {
    /// Register the Ctrl-C handler and forward the first signal
    ///
    /// Must be called inside a tokio runtime. If the handler cannot be
    /// registered the run continues without interrupt support.
    pub fn listen() -> Self {
        let (tx, interrupt) = Self::channel();
        match register() {
            Ok(mut signal) => {
                tokio::spawn(async move {
                    if signal.recv().await.is_some() {
                        tracing::debug!("interrupt received");
                        let _ = tx.send(true);
                    }
                });
            }
            Err(e) => tracing::warn!(error = %e, "unable to listen for Ctrl-C"),
        }
        interrupt
    }

    /// Create an interrupt fired through the returned sender
    pub fn channel() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self { rx })
    }

    /// Whether an interrupt has been received
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Fail with [`AppError::Interrupted`] once an interrupt has been received
    pub fn check(&self, dependency: Option<&str>) -> Result<(), AppError> {
        if self.is_triggered() {
            return Err(AppError::interrupted(dependency));
        }
        Ok(())
    }

    /// Resolve when an interrupt arrives; never resolves if none can
    pub async fn triggered(&mut self) {
        if self.rx.wait_for(|fired| *fired).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(unix)]
fn register() -> std::io::Result<tokio::signal::unix::Signal> {
    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
}

#[cfg(windows)]
fn register() -> std::io::Result<tokio::signal::windows::CtrlC> {
    tokio::signal::windows::ctrl_c()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_check_before_and_after_trigger() {
        let (tx, interrupt) = Interrupt::channel();
        assert!(!interrupt.is_triggered());
        assert!(interrupt.check(Some("lodash")).is_ok());

        tx.send(true).unwrap();
        assert!(interrupt.is_triggered());
        match interrupt.check(Some("lodash")) {
            Err(AppError::Interrupted { dependency }) => {
                assert_eq!(dependency.as_deref(), Some("lodash"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_triggered_resolves_after_send() {
        let (tx, mut interrupt) = Interrupt::channel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let _ = tx.send(true);
        });

        tokio::time::timeout(Duration::from_secs(5), interrupt.triggered())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_triggered_pends_when_sender_dropped() {
        let (tx, mut interrupt) = Interrupt::channel();
        drop(tx);

        let result = tokio::time::timeout(Duration::from_millis(50), interrupt.triggered()).await;
        assert!(result.is_err());
        assert!(!interrupt.is_triggered());
    }

    #[tokio::test]
    async fn test_listen_starts_untriggered() {
        let interrupt = Interrupt::listen();
        assert!(!interrupt.is_triggered());
    }
}
