//! Per-slot request sequencing.
//!
//! Overlapping fetches for the same slot may complete in any order. The
//! tracker hands out increasing sequence numbers and accepts a completion only
//! if it is newer than the last one applied, so a slow early response can never
//! overwrite a faster later one.

use crate::api::{FetchSlot, FetchTicket};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SlotSequence {
    /// Highest sequence number handed out.
    issued: u64,
    /// Highest sequence number whose data was stored.
    applied: u64,
    /// Highest sequence number that completed, successfully or not.
    ///
    /// No completion at or below it is ever applied.
    settled: u64,
}

/// Sequence bookkeeping for the search and random slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchTracker {
    search: SlotSequence,
    random: SlotSequence,
}

impl FetchTracker {
    fn slot(&self, slot: FetchSlot) -> &SlotSequence {
        match slot {
            FetchSlot::Search => &self.search,
            FetchSlot::Random => &self.random,
        }
    }

    fn slot_mut(&mut self, slot: FetchSlot) -> &mut SlotSequence {
        match slot {
            FetchSlot::Search => &mut self.search,
            FetchSlot::Random => &mut self.random,
        }
    }

    /// Issues the next ticket for `slot`.
    pub fn issue(&mut self, slot: FetchSlot) -> FetchTicket {
        let sequence = self.slot_mut(slot);
        sequence.issued += 1;
        FetchTicket::new(slot, sequence.issued)
    }

    /// Records a successful completion.
    ///
    /// Returns `true` if the response is newer than every completion seen so
    /// far for its slot, failed ones included, and must be applied; `false` if
    /// it is stale and must be dropped.
    pub fn accept(&mut self, ticket: &FetchTicket) -> bool {
        let sequence = self.slot_mut(ticket.slot);
        if ticket.seq <= sequence.settled {
            return false;
        }
        sequence.settled = ticket.seq;
        sequence.applied = ticket.seq;
        true
    }

    /// Records a failed completion.
    ///
    /// Returns `true` if the failure belongs to the most recently issued
    /// request and nothing newer has been applied, i.e. the user is still
    /// waiting on it and should see the error.
    pub fn reject(&mut self, ticket: &FetchTicket) -> bool {
        let sequence = self.slot_mut(ticket.slot);
        sequence.settled = sequence.settled.max(ticket.seq);
        ticket.seq == sequence.issued && ticket.seq > sequence.applied
    }

    /// Settles every outstanding request for `slot` without a response.
    ///
    /// Used when the requests were never sent. Returns `true` if anything was
    /// outstanding.
    pub fn abandon(&mut self, slot: FetchSlot) -> bool {
        let sequence = self.slot_mut(slot);
        let outstanding = sequence.issued > sequence.settled;
        sequence.settled = sequence.issued;
        outstanding
    }

    /// Whether the newest request for `slot` is still outstanding.
    #[must_use]
    pub fn is_loading(&self, slot: FetchSlot) -> bool {
        let sequence = self.slot(slot);
        sequence.issued > sequence.settled
    }

    /// Sequence number of the data currently stored in `slot` (0 if none).
    #[must_use]
    pub fn applied(&self, slot: FetchSlot) -> u64 {
        self.slot(slot).applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_per_slot() {
        let mut tracker = FetchTracker::default();
        assert_eq!(tracker.issue(FetchSlot::Search).seq, 1);
        assert_eq!(tracker.issue(FetchSlot::Search).seq, 2);
        assert_eq!(tracker.issue(FetchSlot::Random).seq, 1);
    }

    #[test]
    fn in_order_completions_are_applied() {
        let mut tracker = FetchTracker::default();
        let first = tracker.issue(FetchSlot::Search);
        let second = tracker.issue(FetchSlot::Search);
        assert!(tracker.accept(&first));
        assert!(tracker.is_loading(FetchSlot::Search));
        assert!(tracker.accept(&second));
        assert!(!tracker.is_loading(FetchSlot::Search));
        assert_eq!(tracker.applied(FetchSlot::Search), 2);
    }

    #[test]
    fn late_older_response_is_discarded() {
        let mut tracker = FetchTracker::default();
        let first = tracker.issue(FetchSlot::Search);
        let second = tracker.issue(FetchSlot::Search);
        assert!(tracker.accept(&second));
        assert!(!tracker.accept(&first));
        assert_eq!(tracker.applied(FetchSlot::Search), 2);
    }

    #[test]
    fn stale_failure_is_not_surfaced() {
        let mut tracker = FetchTracker::default();
        let first = tracker.issue(FetchSlot::Random);
        let second = tracker.issue(FetchSlot::Random);
        assert!(!tracker.reject(&first));
        assert!(tracker.is_loading(FetchSlot::Random));
        assert!(tracker.reject(&second));
        assert!(!tracker.is_loading(FetchSlot::Random));
    }

    #[test]
    fn failure_after_newer_success_is_ignored() {
        let mut tracker = FetchTracker::default();
        let first = tracker.issue(FetchSlot::Search);
        assert!(tracker.accept(&first));
        let duplicate = first.clone();
        assert!(!tracker.reject(&duplicate));
    }

    #[test]
    fn older_success_after_newer_failure_is_discarded() {
        let mut tracker = FetchTracker::default();
        let older = tracker.issue(FetchSlot::Search);
        let newer = tracker.issue(FetchSlot::Search);
        assert!(tracker.reject(&newer));
        assert!(!tracker.accept(&older));
        assert_eq!(tracker.applied(FetchSlot::Search), 0);
    }

    #[test]
    fn abandoned_requests_stop_loading() {
        let mut tracker = FetchTracker::default();
        let ticket = tracker.issue(FetchSlot::Random);
        assert!(tracker.abandon(FetchSlot::Random));
        assert!(!tracker.is_loading(FetchSlot::Random));
        assert!(!tracker.abandon(FetchSlot::Random));
        assert!(!tracker.accept(&ticket));
    }

    #[test]
    fn slots_do_not_interfere() {
        let mut tracker = FetchTracker::default();
        let search = tracker.issue(FetchSlot::Search);
        let random = tracker.issue(FetchSlot::Random);
        assert!(tracker.accept(&random));
        assert!(tracker.is_loading(FetchSlot::Search));
        assert!(tracker.accept(&search));
    }
}
