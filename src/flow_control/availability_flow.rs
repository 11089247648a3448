use crate::http_handler::http_response::availability_search::AvailabilitySearchResponse;
use crate::http_handler::http_response::response_common::ResponseError;
use chrono::{NaiveDate, NaiveTime};

/// What the user picked from the results grid, handed off to the booking
/// creation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSelection {
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    pub party_size: u32,
}

#[derive(Debug)]
pub enum AvailabilityState {
    Idle,
    Searching { seq: u64, visit_date: NaiveDate, party_size: u32 },
    Results(AvailabilitySearchResponse),
    SearchFailed(ResponseError),
}

#[derive(Debug)]
pub enum AvailabilityEvent {
    /// Explicit user action carrying the inputs as of trigger time.
    SearchRequested { visit_date: NaiveDate, party_size: u32 },
    SearchSucceeded { seq: u64, result: AvailabilitySearchResponse },
    SearchFailed { seq: u64, error: ResponseError },
}

#[derive(Debug, PartialEq, Eq)]
pub enum AvailabilityCommand {
    Search { seq: u64, visit_date: NaiveDate, party_size: u32 },
}

/// Availability search workflow: `Idle -> Searching -> {Results |
/// SearchFailed}`. Every outgoing search carries a fresh sequence number and
/// a completion event for anything but the latest search is discarded, so a
/// late response can never overwrite newer data.
pub struct AvailabilityFlow {
    state: AvailabilityState,
    last_seq: u64,
}

impl AvailabilityFlow {
    pub fn new() -> Self {
        Self { state: AvailabilityState::Idle, last_seq: 0 }
    }

    pub fn state(&self) -> &AvailabilityState { &self.state }

    fn pending_seq_matches(&self, seq: u64) -> bool {
        matches!(self.state, AvailabilityState::Searching { seq: pending, .. } if pending == seq)
    }

    /// Pure transition function: mutates only local state and returns the
    /// command the caller must execute, if any.
    pub fn dispatch(&mut self, event: AvailabilityEvent) -> Option<AvailabilityCommand> {
        match event {
            AvailabilityEvent::SearchRequested { visit_date, party_size } => {
                if matches!(self.state, AvailabilityState::Searching { .. }) {
                    return None;
                }
                self.last_seq += 1;
                let seq = self.last_seq;
                self.state = AvailabilityState::Searching { seq, visit_date, party_size };
                Some(AvailabilityCommand::Search { seq, visit_date, party_size })
            }
            AvailabilityEvent::SearchSucceeded { seq, result } => {
                if !self.pending_seq_matches(seq) {
                    return None;
                }
                // Wholesale replacement, no merge with prior results.
                self.state = AvailabilityState::Results(result);
                None
            }
            AvailabilityEvent::SearchFailed { seq, error } => {
                if !self.pending_seq_matches(seq) {
                    return None;
                }
                self.state = AvailabilityState::SearchFailed(error);
                None
            }
        }
    }

    /// Honors a slot pick only when results are shown and the slot is
    /// available; everything else is a strict no-op with no state change.
    pub fn select_slot(&self, time: NaiveTime) -> Option<SlotSelection> {
        let AvailabilityState::Results(results) = &self.state else {
            return None;
        };
        let slot = results.slot_at(time)?;
        if !slot.available {
            return None;
        }
        Some(SlotSelection {
            visit_date: results.visit_date,
            visit_time: slot.time,
            party_size: results.party_size,
        })
    }
}

impl Default for AvailabilityFlow {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_handler::http_response::availability_search::AvailabilitySlot;

    fn date() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 3, 1).unwrap() }
    fn time(h: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, 0, 0).unwrap() }

    fn one_slot_response() -> AvailabilitySearchResponse {
        AvailabilitySearchResponse {
            restaurant: String::from("TheHungryUnicorn"),
            restaurant_id: 1,
            visit_date: date(),
            party_size: 2,
            channel_code: String::from("ONLINE"),
            available_slots: vec![AvailabilitySlot {
                time: time(18),
                available: true,
                max_party_size: 4,
                current_bookings: 1,
            }],
            total_slots: 1,
        }
    }

    fn searched(flow: &mut AvailabilityFlow) -> u64 {
        let cmd = flow
            .dispatch(AvailabilityEvent::SearchRequested { visit_date: date(), party_size: 2 })
            .unwrap();
        let AvailabilityCommand::Search { seq, .. } = cmd;
        seq
    }

    #[test]
    fn search_renders_an_enabled_selectable_slot() {
        let mut flow = AvailabilityFlow::new();
        let seq = searched(&mut flow);
        flow.dispatch(AvailabilityEvent::SearchSucceeded { seq, result: one_slot_response() });

        let AvailabilityState::Results(results) = flow.state() else {
            panic!("expected results");
        };
        assert_eq!(results.available_slots.len() as u32, results.total_slots);

        let selection = flow.select_slot(time(18)).unwrap();
        assert_eq!(selection, SlotSelection {
            visit_date: date(),
            visit_time: time(18),
            party_size: 2,
        });
    }

    #[test]
    fn unavailable_slot_selection_is_a_no_op() {
        let mut flow = AvailabilityFlow::new();
        let seq = searched(&mut flow);
        let mut result = one_slot_response();
        result.available_slots[0].available = false;
        flow.dispatch(AvailabilityEvent::SearchSucceeded { seq, result });

        assert_eq!(flow.select_slot(time(18)), None);
        assert_eq!(flow.select_slot(time(19)), None);
        assert!(matches!(flow.state(), AvailabilityState::Results(_)));
    }

    #[test]
    fn search_is_not_reentrant_while_pending() {
        let mut flow = AvailabilityFlow::new();
        searched(&mut flow);
        let again = flow
            .dispatch(AvailabilityEvent::SearchRequested { visit_date: date(), party_size: 4 });
        assert!(again.is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut flow = AvailabilityFlow::new();
        let first = searched(&mut flow);
        // The first search fails over to a retry before its response lands.
        flow.dispatch(AvailabilityEvent::SearchFailed {
            seq: first,
            error: ResponseError::Timeout,
        });
        let second = searched(&mut flow);
        assert!(second > first);

        // Late success from the superseded search must not land.
        let stale = flow
            .dispatch(AvailabilityEvent::SearchSucceeded { seq: first, result: one_slot_response() });
        assert!(stale.is_none());
        assert!(matches!(flow.state(), AvailabilityState::Searching { .. }));

        flow.dispatch(AvailabilityEvent::SearchSucceeded {
            seq: second,
            result: one_slot_response(),
        });
        assert!(matches!(flow.state(), AvailabilityState::Results(_)));
    }

    #[test]
    fn failure_surfaces_the_raw_error() {
        let mut flow = AvailabilityFlow::new();
        let seq = searched(&mut flow);
        flow.dispatch(AvailabilityEvent::SearchFailed {
            seq,
            error: ResponseError::Api { status: 500, detail: Some(String::from("boom")) },
        });
        let AvailabilityState::SearchFailed(error) = flow.state() else {
            panic!("expected failure state");
        };
        assert_eq!(error.detail(), Some("boom"));
    }
}
