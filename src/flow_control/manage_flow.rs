use crate::flow_control::cancellation::CancellationReason;
use crate::http_handler::http_request::booking_update_patch::BookingPatch;
use crate::http_handler::http_response::booking::{Booking, STATUS_CANCELLED};
use crate::http_handler::http_response::cancel_booking::CancelBookingResponse;
use crate::http_handler::http_response::response_common::ResponseError;
use chrono::Utc;

const GENERIC_LOOKUP_ERROR: &str = "Booking not found";
const GENERIC_UPDATE_ERROR: &str = "Update failed";
const GENERIC_CANCEL_ERROR: &str = "Cancellation failed";

/// Party size bounds offered by the editing controls.
const MIN_PARTY_SIZE: u32 = 1;
const MAX_PARTY_SIZE: u32 = 8;

/// Pending/success/error sub-state of one action on a looked-up booking.
/// Update and cancel each own one, so a failed update never blocks a cancel
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionStatus {
    Idle,
    Pending { seq: u64 },
    Saved,
    Failed(String),
}

impl ActionStatus {
    pub fn is_pending(&self) -> bool { matches!(self, ActionStatus::Pending { .. }) }

    fn pending_seq_matches(&self, seq: u64) -> bool {
        matches!(self, ActionStatus::Pending { seq: pending } if *pending == seq)
    }
}

/// A looked-up booking plus the locally editable fields seeded from it.
/// The copy is display-convenience only and may drift from server truth.
#[derive(Debug)]
pub struct ManagedBooking {
    pub booking: Booking,
    pub party_size: u32,
    pub special_requests: String,
    seed_party_size: u32,
    seed_special_requests: String,
    pub reason: CancellationReason,
    pub update_status: ActionStatus,
    pub cancel_status: ActionStatus,
}

impl ManagedBooking {
    fn seeded(booking: Booking) -> Self {
        let party_size = booking.party_size;
        let special_requests = booking.special_requests.clone().unwrap_or_default();
        Self {
            booking,
            party_size,
            special_requests: special_requests.clone(),
            seed_party_size: party_size,
            seed_special_requests: special_requests,
            reason: CancellationReason::default(),
            update_status: ActionStatus::Idle,
            cancel_status: ActionStatus::Idle,
        }
    }

    /// Fields changed from seed, in partial-update form. Untouched fields
    /// stay absent so they cannot overwrite server state.
    fn changed_fields(&self) -> BookingPatch {
        let mut patch = BookingPatch::default();
        if self.party_size != self.seed_party_size {
            patch.party_size = Some(self.party_size);
        }
        if self.special_requests != self.seed_special_requests && !self.special_requests.is_empty()
        {
            patch.special_requests = Some(self.special_requests.clone());
        }
        patch
    }

    pub fn can_update(&self) -> bool {
        !self.booking.is_cancelled() && !self.update_status.is_pending()
    }

    pub fn can_cancel(&self) -> bool {
        !self.booking.is_cancelled() && !self.cancel_status.is_pending()
    }
}

#[derive(Debug)]
pub enum ManageState {
    NoBooking,
    LookingUp { seq: u64 },
    LookupFailed(String),
    Found(ManagedBooking),
}

#[derive(Debug)]
pub enum ManageEvent {
    LookupRequested { reference: String },
    LookupSucceeded { seq: u64, booking: Booking },
    LookupFailed { seq: u64, error: ResponseError },
    PartySizeEdited(u32),
    SpecialRequestsEdited(String),
    ReasonSelected(CancellationReason),
    UpdateRequested,
    UpdateSucceeded { seq: u64, booking: Booking },
    UpdateFailed { seq: u64, error: ResponseError },
    CancelRequested,
    CancelSucceeded { seq: u64, response: CancelBookingResponse },
    CancelFailed { seq: u64, error: ResponseError },
}

#[derive(Debug, PartialEq, Eq)]
pub enum ManageCommand {
    Lookup { seq: u64, reference: String },
    Update { seq: u64, reference: String, patch: BookingPatch },
    Cancel { seq: u64, reference: String, reason: CancellationReason },
}

/// Booking management workflow: `NoBooking -> LookingUp -> {Found |
/// LookupFailed}`. From `Found`, update and cancel run independently with
/// their own sequence counters; stale completions are discarded.
pub struct ManageFlow {
    state: ManageState,
    lookup_seq: u64,
    update_seq: u64,
    cancel_seq: u64,
}

impl ManageFlow {
    pub fn new() -> Self {
        Self { state: ManageState::NoBooking, lookup_seq: 0, update_seq: 0, cancel_seq: 0 }
    }

    pub fn state(&self) -> &ManageState { &self.state }

    pub fn dispatch(&mut self, event: ManageEvent) -> Option<ManageCommand> {
        match event {
            ManageEvent::LookupRequested { reference } => self.on_lookup_requested(&reference),
            ManageEvent::LookupSucceeded { seq, booking } => {
                if !matches!(self.state, ManageState::LookingUp { seq: pending } if pending == seq)
                {
                    return None;
                }
                self.state = ManageState::Found(ManagedBooking::seeded(booking));
                None
            }
            ManageEvent::LookupFailed { seq, error } => {
                if !matches!(self.state, ManageState::LookingUp { seq: pending } if pending == seq)
                {
                    return None;
                }
                self.state = ManageState::LookupFailed(error.user_message(GENERIC_LOOKUP_ERROR));
                None
            }
            ManageEvent::PartySizeEdited(size) => {
                if let ManageState::Found(managed) = &mut self.state {
                    managed.party_size = size.clamp(MIN_PARTY_SIZE, MAX_PARTY_SIZE);
                }
                None
            }
            ManageEvent::SpecialRequestsEdited(text) => {
                if let ManageState::Found(managed) = &mut self.state {
                    managed.special_requests = text;
                }
                None
            }
            ManageEvent::ReasonSelected(reason) => {
                if let ManageState::Found(managed) = &mut self.state {
                    managed.reason = reason;
                }
                None
            }
            ManageEvent::UpdateRequested => self.on_update_requested(),
            ManageEvent::UpdateSucceeded { seq, .. } => {
                if let ManageState::Found(managed) = &mut self.state {
                    if !managed.update_status.pending_seq_matches(seq) {
                        return None;
                    }
                    // Optimistic in-place patch, stamped client-side; the
                    // server copy stays authoritative until re-fetched.
                    managed.booking.party_size = managed.party_size;
                    managed.booking.special_requests = Some(managed.special_requests.clone());
                    managed.booking.updated_at = Some(Utc::now());
                    managed.seed_party_size = managed.party_size;
                    managed.seed_special_requests = managed.special_requests.clone();
                    managed.update_status = ActionStatus::Saved;
                }
                None
            }
            ManageEvent::UpdateFailed { seq, error } => {
                if let ManageState::Found(managed) = &mut self.state {
                    if !managed.update_status.pending_seq_matches(seq) {
                        return None;
                    }
                    managed.update_status =
                        ActionStatus::Failed(error.user_message(GENERIC_UPDATE_ERROR));
                }
                None
            }
            ManageEvent::CancelRequested => self.on_cancel_requested(),
            ManageEvent::CancelSucceeded { seq, .. } => {
                if let ManageState::Found(managed) = &mut self.state {
                    if !managed.cancel_status.pending_seq_matches(seq) {
                        return None;
                    }
                    managed.booking.status = String::from(STATUS_CANCELLED);
                    managed.cancel_status = ActionStatus::Saved;
                }
                None
            }
            ManageEvent::CancelFailed { seq, error } => {
                if let ManageState::Found(managed) = &mut self.state {
                    if !managed.cancel_status.pending_seq_matches(seq) {
                        return None;
                    }
                    managed.cancel_status =
                        ActionStatus::Failed(error.user_message(GENERIC_CANCEL_ERROR));
                }
                None
            }
        }
    }

    fn on_lookup_requested(&mut self, reference: &str) -> Option<ManageCommand> {
        let reference = reference.trim();
        if reference.is_empty() || matches!(self.state, ManageState::LookingUp { .. }) {
            return None;
        }
        self.lookup_seq += 1;
        let seq = self.lookup_seq;
        self.state = ManageState::LookingUp { seq };
        Some(ManageCommand::Lookup { seq, reference: String::from(reference) })
    }

    fn on_update_requested(&mut self) -> Option<ManageCommand> {
        let ManageState::Found(managed) = &mut self.state else {
            return None;
        };
        if !managed.can_update() {
            return None;
        }
        let patch = managed.changed_fields();
        if patch.is_empty() {
            return None;
        }
        self.update_seq += 1;
        let seq = self.update_seq;
        managed.update_status = ActionStatus::Pending { seq };
        Some(ManageCommand::Update {
            seq,
            reference: managed.booking.booking_reference.clone(),
            patch,
        })
    }

    fn on_cancel_requested(&mut self) -> Option<ManageCommand> {
        let ManageState::Found(managed) = &mut self.state else {
            return None;
        };
        if !managed.can_cancel() {
            return None;
        }
        self.cancel_seq += 1;
        let seq = self.cancel_seq;
        managed.cancel_status = ActionStatus::Pending { seq };
        Some(ManageCommand::Cancel {
            seq,
            reference: managed.booking.booking_reference.clone(),
            reason: managed.reason,
        })
    }
}

impl Default for ManageFlow {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, NaiveTime};

    fn confirmed_booking() -> Booking {
        Booking {
            booking_reference: String::from("ABC1234"),
            booking_id: 42,
            restaurant: String::from("TheHungryUnicorn"),
            visit_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            visit_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            party_size: 2,
            status: String::from("confirmed"),
            special_requests: Some(String::from("window seat")),
            customer: None,
            created_at: "2025-02-20T12:00:00Z".parse::<DateTime<chrono::Utc>>().unwrap(),
            updated_at: None,
        }
    }

    fn looked_up(flow: &mut ManageFlow) {
        let cmd = flow
            .dispatch(ManageEvent::LookupRequested { reference: String::from(" ABC1234 ") })
            .unwrap();
        let ManageCommand::Lookup { seq, reference } = cmd else {
            panic!("expected lookup command");
        };
        // Surrounding whitespace is trimmed before use.
        assert_eq!(reference, "ABC1234");
        flow.dispatch(ManageEvent::LookupSucceeded { seq, booking: confirmed_booking() });
    }

    fn managed(flow: &ManageFlow) -> &ManagedBooking {
        let ManageState::Found(managed) = flow.state() else {
            panic!("expected a looked-up booking");
        };
        managed
    }

    #[test]
    fn lookup_seeds_editable_fields() {
        let mut flow = ManageFlow::new();
        looked_up(&mut flow);
        let m = managed(&flow);
        assert_eq!(m.party_size, 2);
        assert_eq!(m.special_requests, "window seat");
        assert_eq!(m.reason, CancellationReason::CustomerRequest);
        assert!(m.can_update() && m.can_cancel());
    }

    #[test]
    fn empty_reference_is_a_no_op() {
        let mut flow = ManageFlow::new();
        assert!(flow.dispatch(ManageEvent::LookupRequested { reference: String::from("  ") })
            .is_none());
        assert!(matches!(flow.state(), ManageState::NoBooking));
    }

    #[test]
    fn failed_lookup_surfaces_the_exact_detail_and_stays_empty() {
        let mut flow = ManageFlow::new();
        let ManageCommand::Lookup { seq, .. } = flow
            .dispatch(ManageEvent::LookupRequested { reference: String::from("NOPE999") })
            .unwrap()
        else {
            panic!("expected lookup command");
        };
        flow.dispatch(ManageEvent::LookupFailed {
            seq,
            error: ResponseError::Api {
                status: 404,
                detail: Some(String::from("Booking not found")),
            },
        });
        let ManageState::LookupFailed(message) = flow.state() else {
            panic!("expected lookup failure");
        };
        assert_eq!(message, "Booking not found");
    }

    #[test]
    fn update_sends_only_changed_fields() {
        let mut flow = ManageFlow::new();
        looked_up(&mut flow);
        flow.dispatch(ManageEvent::PartySizeEdited(4));

        let ManageCommand::Update { seq, reference, patch } =
            flow.dispatch(ManageEvent::UpdateRequested).unwrap()
        else {
            panic!("expected update command");
        };
        assert_eq!(reference, "ABC1234");
        assert_eq!(patch.party_size, Some(4));
        assert_eq!(patch.special_requests, None);

        flow.dispatch(ManageEvent::UpdateSucceeded { seq, booking: confirmed_booking() });
        let m = managed(&flow);
        assert_eq!(m.booking.party_size, 4);
        assert!(m.booking.updated_at.is_some());
        assert_eq!(m.update_status, ActionStatus::Saved);

        // Saved values become the new seed; re-saving is a no-op.
        assert!(flow.dispatch(ManageEvent::UpdateRequested).is_none());
    }

    #[test]
    fn untouched_booking_issues_no_update() {
        let mut flow = ManageFlow::new();
        looked_up(&mut flow);
        assert!(flow.dispatch(ManageEvent::UpdateRequested).is_none());
    }

    #[test]
    fn party_size_edits_are_clamped() {
        let mut flow = ManageFlow::new();
        looked_up(&mut flow);
        flow.dispatch(ManageEvent::PartySizeEdited(99));
        assert_eq!(managed(&flow).party_size, 8);
        flow.dispatch(ManageEvent::PartySizeEdited(0));
        assert_eq!(managed(&flow).party_size, 1);
    }

    #[test]
    fn cancel_marks_cancelled_and_disables_both_actions() {
        let mut flow = ManageFlow::new();
        looked_up(&mut flow);
        flow.dispatch(ManageEvent::ReasonSelected(CancellationReason::Weather));

        let ManageCommand::Cancel { seq, reference, reason } =
            flow.dispatch(ManageEvent::CancelRequested).unwrap()
        else {
            panic!("expected cancel command");
        };
        assert_eq!(reference, "ABC1234");
        assert_eq!(reason, CancellationReason::Weather);

        // Re-cancelling while pending is refused.
        assert!(flow.dispatch(ManageEvent::CancelRequested).is_none());

        flow.dispatch(ManageEvent::CancelSucceeded {
            seq,
            response: CancelBookingResponse {
                booking_reference: Some(String::from("ABC1234")),
                status: String::from("cancelled"),
            },
        });
        let m = managed(&flow);
        assert_eq!(m.booking.status, "cancelled");
        assert!(!m.can_update());
        assert!(!m.can_cancel());
        assert!(flow.dispatch(ManageEvent::CancelRequested).is_none());

        flow.dispatch(ManageEvent::PartySizeEdited(5));
        assert!(flow.dispatch(ManageEvent::UpdateRequested).is_none());
    }

    #[test]
    fn failed_update_does_not_block_cancel() {
        let mut flow = ManageFlow::new();
        looked_up(&mut flow);
        flow.dispatch(ManageEvent::PartySizeEdited(3));
        let ManageCommand::Update { seq, .. } =
            flow.dispatch(ManageEvent::UpdateRequested).unwrap()
        else {
            panic!("expected update command");
        };
        flow.dispatch(ManageEvent::UpdateFailed { seq, error: ResponseError::NoConnection });

        let m = managed(&flow);
        assert_eq!(m.update_status, ActionStatus::Failed(String::from("Update failed")));
        // The displayed booking is untouched and cancel still works.
        assert_eq!(m.booking.party_size, 2);
        assert!(flow.dispatch(ManageEvent::CancelRequested).is_some());
    }

    #[test]
    fn stale_action_completions_are_discarded() {
        let mut flow = ManageFlow::new();
        looked_up(&mut flow);
        flow.dispatch(ManageEvent::PartySizeEdited(3));
        let ManageCommand::Update { seq: first, .. } =
            flow.dispatch(ManageEvent::UpdateRequested).unwrap()
        else {
            panic!("expected update command");
        };
        flow.dispatch(ManageEvent::UpdateFailed { seq: first, error: ResponseError::Timeout });

        flow.dispatch(ManageEvent::PartySizeEdited(5));
        let ManageCommand::Update { seq: second, .. } =
            flow.dispatch(ManageEvent::UpdateRequested).unwrap()
        else {
            panic!("expected update command");
        };

        // The first request resolves late; its success must not land.
        flow.dispatch(ManageEvent::UpdateSucceeded { seq: first, booking: confirmed_booking() });
        assert!(managed(&flow).update_status.is_pending());

        flow.dispatch(ManageEvent::UpdateSucceeded { seq: second, booking: confirmed_booking() });
        assert_eq!(managed(&flow).booking.party_size, 5);
    }

    #[test]
    fn fresh_lookup_replaces_the_whole_state() {
        let mut flow = ManageFlow::new();
        looked_up(&mut flow);
        flow.dispatch(ManageEvent::PartySizeEdited(7));
        looked_up(&mut flow);
        assert_eq!(managed(&flow).party_size, 2);
    }
}
