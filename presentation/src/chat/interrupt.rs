//! Ctrl-C handling for pending work

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Cancels its token on Ctrl-C until dropped.
///
/// Once tokio installs its SIGINT handler it stays installed, so anything
/// that may wait on the network after the first watch must be raced
/// against [`token`](Self::token) or Ctrl-C will never reach it.
pub struct InterruptWatch {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl InterruptWatch {
    pub fn start() -> Self {
        let token = CancellationToken::new();
        let task = {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            })
        };
        Self { token, task }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for InterruptWatch {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_token_starts_uncancelled() {
        let watch = InterruptWatch::start();
        assert!(!watch.token().is_cancelled());
    }

    #[tokio::test]
    async fn test_drop_leaves_clones_uncancelled() {
        let token = {
            let watch = InterruptWatch::start();
            watch.token().clone()
        };
        tokio::task::yield_now().await;
        assert!(!token.is_cancelled());
    }
}
