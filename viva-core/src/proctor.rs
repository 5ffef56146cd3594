use serde::{Deserialize, Serialize};

/// Local fallback shown when a tab-switch event produced a warning but the
/// service has not attached a reason to it yet.
pub const TAB_SWITCH_REASON: &str = "Tab switched";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalSource {
    /// Regular 1s status poll.
    Poll,
    /// Out-of-band status fetch triggered by a host visibility event.
    HostEvent,
}

/// One observation of the proctoring service's status, tagged with where it
/// came from. Both the poll loop and the one-shot host-event path produce
/// these; reconciliation order and precedence live in `ProctorStatus::apply`
/// instead of two code paths racing to set the same fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProctorSignal {
    pub source: SignalSource,
    pub warnings: u32,
    pub reason: String,
    pub stopped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProctorStatus {
    pub warnings: u32,
    pub last_reason: String,
    pub stopped: bool,
}

/// What a single `apply` changed, for callers that react to transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Applied {
    pub anomalous_decrease: bool,
    pub newly_stopped: bool,
}

impl ProctorStatus {
    /// Applies a status observation. Last-received wins for the count and
    /// reason, with two exceptions:
    ///
    /// - `stopped` latches: once true it never resets within a session.
    /// - a *decrease* in the count is outside the service's protocol
    ///   (the count is monotonically non-decreasing); we keep the higher
    ///   count and report the anomaly instead of displaying a drop.
    pub fn apply(&mut self, signal: &ProctorSignal) -> Applied {
        let mut applied = Applied::default();

        if signal.warnings < self.warnings {
            applied.anomalous_decrease = true;
        } else {
            self.warnings = signal.warnings;
            self.last_reason = reconcile_reason(signal);
        }

        if signal.stopped && !self.stopped {
            self.stopped = true;
            applied.newly_stopped = true;
        }

        applied
    }
}

fn reconcile_reason(signal: &ProctorSignal) -> String {
    // A host-event fetch can observe the warning before the service has
    // attached a reason; substitute the local literal so the user always
    // gets feedback for this trigger. Regular polls are taken verbatim.
    if signal.source == SignalSource::HostEvent
        && signal.reason.is_empty()
        && signal.warnings > 0
    {
        TAB_SWITCH_REASON.to_string()
    } else {
        signal.reason.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll(warnings: u32, reason: &str, stopped: bool) -> ProctorSignal {
        ProctorSignal {
            source: SignalSource::Poll,
            warnings,
            reason: reason.into(),
            stopped,
        }
    }

    #[test]
    fn poll_overwrites_count_and_reason_verbatim() {
        let mut status = ProctorStatus::default();
        status.apply(&poll(2, "Face not visible", false));
        assert_eq!(status.warnings, 2);
        assert_eq!(status.last_reason, "Face not visible");

        // Same count, different reason: still last-received-wins.
        status.apply(&poll(2, "", false));
        assert_eq!(status.last_reason, "");
    }

    #[test]
    fn stopped_is_one_way() {
        let mut status = ProctorStatus::default();
        let first = status.apply(&poll(5, "Too many warnings", true));
        assert!(first.newly_stopped);

        let second = status.apply(&poll(5, "Too many warnings", false));
        assert!(status.stopped, "stopped must never reset within a session");
        assert!(!second.newly_stopped);
    }

    #[test]
    fn decrease_is_anomalous_and_kept_at_maximum() {
        let mut status = ProctorStatus::default();
        status.apply(&poll(3, "Multiple faces", false));

        let applied = status.apply(&poll(1, "Face not visible", false));
        assert!(applied.anomalous_decrease);
        assert_eq!(status.warnings, 3);
        assert_eq!(status.last_reason, "Multiple faces");
    }

    #[test]
    fn host_event_with_empty_reason_falls_back_to_tab_switched() {
        let mut status = ProctorStatus::default();
        let signal = ProctorSignal {
            source: SignalSource::HostEvent,
            warnings: 1,
            reason: String::new(),
            stopped: false,
        };
        status.apply(&signal);
        assert_eq!(status.last_reason, TAB_SWITCH_REASON);
    }

    #[test]
    fn host_event_keeps_service_reason_when_present() {
        let mut status = ProctorStatus::default();
        let signal = ProctorSignal {
            source: SignalSource::HostEvent,
            warnings: 1,
            reason: "Tab change detected".into(),
            stopped: false,
        };
        status.apply(&signal);
        assert_eq!(status.last_reason, "Tab change detected");
    }

    #[test]
    fn poll_with_empty_reason_does_not_fabricate_one() {
        let mut status = ProctorStatus::default();
        status.apply(&poll(1, "", false));
        assert_eq!(status.last_reason, "");
    }
}
