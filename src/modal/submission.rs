use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::modal::{FormData, ModalId, SubmitError};

/// Message shown to the user once a submission went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

const EMPTY_SUBMISSION: &str = "Keine Angaben übermittelt.";

/// Delivers the data of a submitted dialog form.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, modal: &ModalId, data: FormData)
    -> Result<Acknowledgement, SubmitError>;
}

/// Accepts submissions after a fixed delay without sending anything.
///
/// A form that carries no value at all is rejected once the delay has passed.
pub struct SimulatedSubmitter {
    delay: Duration,
    acknowledgement: String,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration, acknowledgement: impl Into<String>) -> Self {
        Self {
            delay,
            acknowledgement: acknowledgement.into(),
        }
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(
        &self,
        modal: &ModalId,
        data: FormData,
    ) -> Result<Acknowledgement, SubmitError> {
        debug!(%modal, fields = data.len(), "Simulating submission");
        tokio::time::sleep(self.delay).await;
        if data.values().all(|value| value.trim().is_empty()) {
            return Err(SubmitError::Rejected(EMPTY_SUBMISSION.to_string()));
        }
        Ok(Acknowledgement::new(self.acknowledgement.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Acknowledged(Acknowledgement),
    Failed(SubmitError),
    Cancelled,
}

/// Completion of one submission, reported back to the manager.
#[derive(Debug, Clone)]
pub struct SubmissionReport {
    pub modal: ModalId,
    pub ticket: u64,
    pub outcome: SubmissionOutcome,
}

/// Run a submission on the runtime and report its outcome on `reports`.
pub(crate) fn spawn_submission(
    submitter: Arc<dyn Submitter>,
    modal: ModalId,
    ticket: u64,
    data: FormData,
    token: CancellationToken,
    reports: UnboundedSender<SubmissionReport>,
) {
    tokio::spawn(async move {
        let outcome = tokio::select! {
            () = token.cancelled() => SubmissionOutcome::Cancelled,
            result = submitter.submit(&modal, data) => match result {
                Ok(ack) => SubmissionOutcome::Acknowledged(ack),
                Err(e) => {
                    warn!(%modal, error = %e, "Submission failed");
                    SubmissionOutcome::Failed(e)
                }
            },
        };

        let report = SubmissionReport {
            modal,
            ticket,
            outcome,
        };
        if reports.send(report).is_err() {
            debug!(ticket, "Dialog manager dropped before submission finished");
        }
    });
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_submitter_waits_for_delay() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(2000), "Danke");
        let started = tokio::time::Instant::now();

        let ack = submitter
            .submit(&ModalId::from("login"), data(&[("email", "max@example.com")]))
            .await
            .unwrap();

        assert_eq!(ack.message, "Danke");
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_submitter_rejects_empty_form() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(2000), "Danke");
        let started = tokio::time::Instant::now();

        let result = submitter
            .submit(&ModalId::from("consultation"), data(&[("symptoms", "  "), ("time", "")]))
            .await;

        assert_eq!(
            result,
            Err(SubmitError::Rejected("Keine Angaben übermittelt.".to_string()))
        );
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submission_reports_cancelled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let submitter = Arc::new(SimulatedSubmitter::new(Duration::from_millis(2000), "Danke"));

        spawn_submission(submitter, "login".into(), 7, FormData::new(), token.clone(), tx);
        tokio::time::sleep(Duration::from_millis(500)).await;
        token.cancel();

        let report = rx.recv().await.unwrap();
        assert_eq!(report.ticket, 7);
        assert_eq!(report.outcome, SubmissionOutcome::Cancelled);
    }
}
