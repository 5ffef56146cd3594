use crate::coordinator::{CoordinatorConfig, InterviewCoordinator};
use crate::traits::ProctorApi;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use viva_core::proctor::{ProctorSignal, SignalSource};
use viva_core::types::ProctorSessionId;

/// Handles for the background timers one proctoring session owns. Dropping
/// this aborts all of them atomically, so no poll result or frame can land
/// on a superseded session after teardown.
pub(crate) struct MonitorTasks {
    status_poll: JoinHandle<()>,
    frame_refresh: JoinHandle<()>,
}

impl Drop for MonitorTasks {
    fn drop(&mut self) {
        self.status_poll.abort();
        self.frame_refresh.abort();
    }
}

pub(crate) fn spawn(
    coordinator: InterviewCoordinator,
    proctor: Arc<dyn ProctorApi>,
    session: ProctorSessionId,
    epoch: u64,
    cfg: CoordinatorConfig,
) -> MonitorTasks {
    let status_poll = tokio::spawn({
        let coordinator = coordinator.clone();
        let proctor = proctor.clone();
        let session = session.clone();
        async move {
            let mut ticker = tokio::time::interval(cfg.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; consume it so the first
            // poll happens one interval after the session starts.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match proctor.status(&session).await {
                    Ok(report) => {
                        coordinator
                            .apply_proctor_signal(
                                epoch,
                                ProctorSignal {
                                    source: SignalSource::Poll,
                                    warnings: report.warnings,
                                    reason: report.reason,
                                    stopped: report.stopped,
                                },
                            )
                            .await;
                    }
                    // Best-effort: the next tick simply tries again.
                    Err(e) => log::warn!("proctor status poll failed: {e}"),
                }
            }
        }
    });

    let frame_refresh = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(cfg.frame_refresh);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        let mut seq: u64 = 0;
        loop {
            ticker.tick().await;
            seq += 1;
            match proctor.latest_frame(&session, seq).await {
                Ok(bytes) => coordinator.store_frame(epoch, bytes).await,
                Err(e) => log::warn!("proctor frame fetch failed: {e}"),
            }
        }
    });

    MonitorTasks {
        status_poll,
        frame_refresh,
    }
}
