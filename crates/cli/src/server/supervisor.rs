use queried_domain::ListenerFailurePolicy;
use std::future::Future;
use tokio::task::JoinSet;
use tracing::{error, warn};

type ListenerExit = (String, anyhow::Result<()>);

/// Owns every listener task and decides what a listener failure means for
/// the process.
pub struct ListenerSupervisor {
    policy: ListenerFailurePolicy,
    listeners: JoinSet<ListenerExit>,
}

impl ListenerSupervisor {
    pub fn new(policy: ListenerFailurePolicy) -> Self {
        Self {
            policy,
            listeners: JoinSet::new(),
        }
    }

    pub fn spawn<F>(&mut self, label: String, listener: F)
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.listeners
            .spawn(async move { (label, listener.await) });
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Waits on the listeners. Listeners serve forever, so any exit counts
    /// as a failure. Returns once the policy says the process must stop.
    pub async fn run(mut self) -> anyhow::Result<()> {
        if self.listeners.is_empty() {
            anyhow::bail!("no listeners configured");
        }

        while let Some(joined) = self.listeners.join_next().await {
            let (label, failure) = match joined {
                Ok((label, Ok(()))) => (label, anyhow::anyhow!("server exited unexpectedly")),
                Ok((label, Err(e))) => (label, e),
                Err(e) => ("<unknown>".to_string(), anyhow::anyhow!("listener task failed: {}", e)),
            };

            match self.policy {
                ListenerFailurePolicy::Abort => {
                    error!(listener = %label, error = %failure, "Unable to listen");
                    return Err(failure.context(format!("listener {}", label)));
                }
                ListenerFailurePolicy::Continue => {
                    warn!(
                        listener = %label,
                        error = %failure,
                        remaining = self.listeners.len(),
                        "Listener stopped, continuing with the rest"
                    );
                }
            }
        }

        anyhow::bail!("all listeners stopped")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn pending_forever() -> impl Future<Output = anyhow::Result<()>> {
        async {
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_abort_stops_on_first_failure() {
        let mut supervisor = ListenerSupervisor::new(ListenerFailurePolicy::Abort);
        supervisor.spawn("udp://127.0.0.1:53".into(), pending_forever());
        supervisor.spawn("tcp://127.0.0.1:53".into(), async {
            Err(anyhow::anyhow!("address in use"))
        });

        let err = tokio::time::timeout(Duration::from_secs(2), supervisor.run())
            .await
            .unwrap()
            .unwrap_err();

        assert!(format!("{:#}", err).contains("address in use"));
        assert!(format!("{:#}", err).contains("tcp://127.0.0.1:53"));
    }

    #[tokio::test]
    async fn test_abort_treats_clean_exit_as_failure() {
        let mut supervisor = ListenerSupervisor::new(ListenerFailurePolicy::Abort);
        supervisor.spawn("udp://[::]:53".into(), async { Ok(()) });

        let err = supervisor.run().await.unwrap_err();
        assert!(format!("{:#}", err).contains("exited unexpectedly"));
    }

    #[tokio::test]
    async fn test_continue_keeps_remaining_listeners() {
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let mut supervisor = ListenerSupervisor::new(ListenerFailurePolicy::Continue);
        supervisor.spawn("udp://0.0.0.0:53".into(), async {
            Err(anyhow::anyhow!("permission denied"))
        });
        supervisor.spawn("tcp://0.0.0.0:53".into(), async move {
            let _ = release_rx.await;
            Err(anyhow::anyhow!("released"))
        });
        assert_eq!(supervisor.len(), 2);

        let running = tokio::spawn(supervisor.run());
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!running.is_finished());

        release_tx.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(2), running)
            .await
            .unwrap()
            .unwrap();

        assert!(format!("{:#}", result.unwrap_err()).contains("all listeners stopped"));
    }

    #[tokio::test]
    async fn test_empty_supervisor_fails() {
        let supervisor = ListenerSupervisor::new(ListenerFailurePolicy::Continue);
        assert!(supervisor.run().await.is_err());
    }
}
