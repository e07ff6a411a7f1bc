//! Audit session: the Idle → Analyzing → Results lifecycle around the engine.
//!
//! An accepted upload schedules one evaluation after a fixed simulated
//! delay. A newer upload or a reset aborts the scheduled task, and the task
//! only publishes while the session is still analyzing its own ticket, so a
//! stale evaluation can never replace a newer state.
//!
//! Uploads spawn onto the current tokio runtime and must be made from
//! within one.

use crate::engine;
use crate::models::{AuditResult, Role};
use crate::upload::{ArtifactRef, Upload};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Analyzing {
        ticket: u64,
        artifact: ArtifactRef,
    },
    Results {
        ticket: u64,
        artifact: ArtifactRef,
        result: AuditResult,
    },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Analyzing { .. } => "analyzing",
            Phase::Results { .. } => "results",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Analysis scheduled under this ticket.
    Accepted { ticket: u64 },
    /// Not image-typed; the session was left untouched.
    Ignored { mime: String },
}

pub struct AuditSession {
    delay: Duration,
    role: Option<Role>,
    state: Arc<watch::Sender<Phase>>,
    pending: Option<JoinHandle<()>>,
    last_ticket: u64,
}

impl AuditSession {
    pub fn new(delay: Duration, role: Option<Role>) -> Self {
        let (tx, _rx) = watch::channel(Phase::Idle);
        AuditSession {
            delay,
            role,
            state: Arc::new(tx),
            pending: None,
            last_ticket: 0,
        }
    }

    /// Role used for uploads accepted from now on.
    pub fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.state.subscribe()
    }

    /// Accept an image and schedule its evaluation, replacing any analysis
    /// still in flight. Non-image uploads are ignored.
    pub fn upload(&mut self, upload: &Upload) -> UploadOutcome {
        if !upload.is_image() {
            tracing::warn!(mime = upload.mime(), "ignoring non-image upload");
            return UploadOutcome::Ignored {
                mime: upload.mime().to_string(),
            };
        }
        if self.cancel_pending() {
            tracing::info!(ticket = self.last_ticket, "superseded analysis in flight");
        }
        self.last_ticket += 1;
        let ticket = self.last_ticket;
        let artifact = upload.artifact();
        tracing::info!(
            ticket,
            name = %artifact.name,
            size = artifact.size,
            "analyzing upload"
        );
        self.state.send_replace(Phase::Analyzing { ticket, artifact });

        let state = Arc::clone(&self.state);
        let role = self.role;
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = engine::evaluate(role);
            let published =
                state.send_if_modified(|phase| publish_if_current(phase, ticket, result));
            if published {
                tracing::info!(ticket, "analysis complete");
            } else {
                tracing::debug!(ticket, "dropping stale analysis");
            }
        }));
        UploadOutcome::Accepted { ticket }
    }

    /// Discard the current image and result and return to Idle.
    pub fn reset(&mut self) {
        self.cancel_pending();
        let prev = self.state.send_replace(Phase::Idle);
        tracing::info!(from = prev.name(), "session reset");
    }

    /// Wait until the session leaves Analyzing. Returns the result, or
    /// `None` when the session is Idle.
    pub async fn wait_for_result(&self) -> Option<AuditResult> {
        let mut rx = self.state.subscribe();
        let phase = rx
            .wait_for(|p| !matches!(p, Phase::Analyzing { .. }))
            .await
            .ok()?;
        match &*phase {
            Phase::Results { result, .. } => Some(result.clone()),
            _ => None,
        }
    }

    fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(h) if !h.is_finished() => {
                h.abort();
                true
            }
            _ => false,
        }
    }
}

/// Move `phase` to Results only while it is still Analyzing `ticket`.
fn publish_if_current(phase: &mut Phase, ticket: u64, result: AuditResult) -> bool {
    let current = matches!(phase, Phase::Analyzing { ticket: t, .. } if *t == ticket);
    if current {
        if let Phase::Analyzing { artifact, .. } = std::mem::replace(phase, Phase::Idle) {
            *phase = Phase::Results {
                ticket,
                artifact,
                result,
            };
        }
    }
    current
}

impl Drop for AuditSession {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1500);

    fn png(name: &str) -> Upload {
        Upload::from_bytes(name, "image/png", vec![0u8; 8])
    }

    fn analyzing(ticket: u64) -> Phase {
        Phase::Analyzing {
            ticket,
            artifact: png("a.png").artifact(),
        }
    }

    #[test]
    fn test_publish_if_current_matches_ticket() {
        let mut phase = analyzing(3);
        assert!(publish_if_current(&mut phase, 3, engine::evaluate(None)));
        match phase {
            Phase::Results { ticket, artifact, result } => {
                assert_eq!(ticket, 3);
                assert_eq!(artifact.name, "a.png");
                assert_eq!(result.score(), 80);
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[test]
    fn test_publish_if_current_drops_stale_ticket() {
        let mut phase = analyzing(2);
        assert!(!publish_if_current(&mut phase, 1, engine::evaluate(None)));
        assert_eq!(phase, analyzing(2));
    }

    #[test]
    fn test_publish_if_current_leaves_idle_and_results_alone() {
        let mut phase = Phase::Idle;
        assert!(!publish_if_current(&mut phase, 1, engine::evaluate(None)));
        assert_eq!(phase, Phase::Idle);

        let mut phase = Phase::Results {
            ticket: 1,
            artifact: png("a.png").artifact(),
            result: engine::evaluate(Some(Role::Developer)),
        };
        let before = phase.clone();
        assert!(!publish_if_current(&mut phase, 1, engine::evaluate(None)));
        assert_eq!(phase, before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_moves_to_results_after_delay() {
        let mut s = AuditSession::new(DELAY, None);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.upload(&png("a.png")), UploadOutcome::Accepted { ticket: 1 });
        assert_eq!(s.phase().name(), "analyzing");

        let res = s.wait_for_result().await.unwrap();
        assert_eq!(res.score(), 80);
        match s.phase() {
            Phase::Results {
                ticket,
                artifact,
                result,
            } => {
                assert_eq!(ticket, 1);
                assert_eq!(artifact.name, "a.png");
                assert_eq!(result, res);
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_not_published_before_delay() {
        let mut s = AuditSession::new(DELAY, None);
        s.upload(&png("a.png"));
        tokio::time::sleep(DELAY / 2).await;
        assert_eq!(s.phase().name(), "analyzing");
        tokio::time::sleep(DELAY).await;
        assert_eq!(s.phase().name(), "results");
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_image_is_ignored_and_keeps_state() {
        let mut s = AuditSession::new(DELAY, None);
        let pdf = Upload::from_bytes("doc.pdf", "application/pdf", vec![1, 2, 3]);
        assert_eq!(
            s.upload(&pdf),
            UploadOutcome::Ignored {
                mime: "application/pdf".into()
            }
        );
        assert_eq!(s.phase(), Phase::Idle);

        // A rejected upload must not cancel an analysis in flight either
        s.upload(&png("a.png"));
        s.upload(&pdf);
        let res = s.wait_for_result().await;
        assert!(res.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reupload_cancels_and_restarts() {
        let mut s = AuditSession::new(DELAY, None);
        s.upload(&png("first.png"));
        tokio::time::sleep(DELAY / 2).await;
        assert_eq!(s.upload(&png("second.png")), UploadOutcome::Accepted { ticket: 2 });

        s.wait_for_result().await.unwrap();
        tokio::time::sleep(DELAY * 2).await;
        match s.phase() {
            Phase::Results { ticket, artifact, .. } => {
                assert_eq!(ticket, 2);
                assert_eq!(artifact.name, "second.png");
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_analysis_discards_pending_result() {
        let mut s = AuditSession::new(DELAY, None);
        s.upload(&png("a.png"));
        s.reset();
        assert_eq!(s.phase(), Phase::Idle);
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.wait_for_result().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_from_results_returns_to_idle() {
        let mut s = AuditSession::new(DELAY, Some(Role::Developer));
        s.upload(&png("a.png"));
        assert!(s.wait_for_result().await.is_some());
        s.reset();
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_role_is_captured_at_upload() {
        let mut s = AuditSession::new(DELAY, Some(Role::Developer));
        s.upload(&png("a.png"));
        s.set_role(None);
        let res = s.wait_for_result().await.unwrap();
        assert_eq!(res.issues().len(), 4);
        assert_eq!(res.score(), 75);

        s.upload(&png("b.png"));
        let res = s.wait_for_result().await.unwrap();
        assert_eq!(res.issues().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_transitions() {
        let mut s = AuditSession::new(DELAY, None);
        let mut rx = s.subscribe();
        s.upload(&png("a.png"));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().name(), "analyzing");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().name(), "results");
    }
}
