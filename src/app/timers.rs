//! Deadline-based timer slots.
//!
//! The plugin has no threads of its own, so timers are modelled as explicit
//! deadlines that the host wakes us up for. Each slot holds at most one deadline
//! and re-arming replaces it. A wake-up requested for an older deadline only
//! fires the slot if the current deadline has also passed, so it can never hide
//! a newer notification or complete a newer command early.

/// One re-armable deadline.
///
/// Deadlines are absolute milliseconds on the same clock the caller passes to
/// every method.
///
/// ```
/// use ztodo::app::timers::TimerSlot;
///
/// let mut slot = TimerSlot::default();
/// slot.arm(1_000, 500);
/// assert_eq!(slot.deadline(), Some(1_500));
/// assert!(!slot.fire_if_due(1_499));
/// assert!(slot.fire_if_due(1_500));
/// assert_eq!(slot.deadline(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<i64>,
}

impl TimerSlot {
    /// Arms the slot to fire `delay_ms` after `now_ms`, replacing any pending
    /// deadline.
    pub fn arm(&mut self, now_ms: i64, delay_ms: u64) {
        let delay = i64::try_from(delay_ms).unwrap_or(i64::MAX);
        self.deadline = Some(now_ms.saturating_add(delay));
    }

    /// The armed deadline, or `None` once fired or never armed.
    #[must_use]
    pub const fn deadline(&self) -> Option<i64> {
        self.deadline
    }

    /// Disarms and returns `true` if the deadline has been reached.
    pub fn fire_if_due(&mut self, now_ms: i64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Earliest of two optional deadlines.
#[must_use]
pub fn earliest(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_deadline() {
        let mut slot = TimerSlot::default();
        slot.arm(1_000, 2_000);
        assert!(!slot.fire_if_due(2_999));
        assert!(slot.fire_if_due(3_000));
        assert!(!slot.fire_if_due(4_000));
        assert_eq!(slot.deadline(), None);
    }

    #[test]
    fn rearming_supersedes_the_old_deadline() {
        let mut slot = TimerSlot::default();
        slot.arm(0, 2_000);
        slot.arm(1_000, 2_000);
        assert_eq!(slot.deadline(), Some(3_000));
        // the wake-up scheduled for the first deadline finds nothing due
        assert!(!slot.fire_if_due(2_000));
        assert!(slot.fire_if_due(3_000));
    }

    #[test]
    fn earliest_ignores_missing_deadlines() {
        assert_eq!(earliest(Some(5), Some(3)), Some(3));
        assert_eq!(earliest(None, Some(3)), Some(3));
        assert_eq!(earliest(Some(5), None), Some(5));
        assert_eq!(earliest(None, None), None);
    }
}
