//! Acknowledgement side action run alongside a search.
//!
//! The resolver starts it at the same time as the search and never waits
//! for it: a slow or failing acknowledgement cannot change the result.

use crate::error::SearchError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Something that tells the user their question is being worked on,
/// e.g. by speaking "Searching for answer to: ...".
#[async_trait]
pub trait Acknowledger: Send + Sync {
    async fn acknowledge(&self, question: &str) -> Result<(), SearchError>;
}

/// Start the acknowledgement on its own task. Failures are logged.
pub(crate) fn spawn_acknowledgement(ack: Arc<dyn Acknowledger>, question: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = ack.acknowledge(&question).await {
            tracing::warn!(error = %err, "acknowledgement failed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl Acknowledger for Recording {
        async fn acknowledge(&self, question: &str) -> Result<(), SearchError> {
            self.seen
                .lock()
                .expect("lock")
                .push(question.to_owned());
            if self.fail {
                return Err(SearchError::Acknowledge("speaker unavailable".into()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn spawned_acknowledgement_runs() {
        let ack = Arc::new(Recording {
            seen: Mutex::new(Vec::new()),
            fail: false,
        });
        spawn_acknowledgement(ack.clone(), "who wrote hamlet".into())
            .await
            .expect("task completes");
        assert_eq!(*ack.seen.lock().expect("lock"), vec!["who wrote hamlet"]);
    }

    #[tokio::test]
    async fn failing_acknowledgement_does_not_panic_the_task() {
        let ack = Arc::new(Recording {
            seen: Mutex::new(Vec::new()),
            fail: true,
        });
        let joined = spawn_acknowledgement(ack.clone(), "q".into()).await;
        assert!(joined.is_ok());
        assert_eq!(ack.seen.lock().expect("lock").len(), 1);
    }
}
