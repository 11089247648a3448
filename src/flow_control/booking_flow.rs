use crate::flow_control::availability_flow::SlotSelection;
use crate::flow_control::form::{CustomerForm, FieldError};
use crate::http_handler::http_request::booking_create_post::Customer;
use crate::http_handler::http_response::booking::Booking;
use crate::http_handler::http_response::response_common::ResponseError;
use chrono::{NaiveDate, NaiveTime};

const GENERIC_CREATE_ERROR: &str = "Booking failed";

#[derive(Debug)]
pub enum BookingState {
    Editing {
        form: CustomerForm,
        field_errors: Vec<FieldError>,
        submit_error: Option<String>,
    },
    Submitting { seq: u64, form: CustomerForm },
    Confirmed { booking: Booking },
}

#[derive(Debug)]
pub enum BookingEvent {
    SubmitRequested(CustomerForm),
    CreateSucceeded { seq: u64, booking: Booking },
    CreateFailed { seq: u64, error: ResponseError },
}

#[derive(Debug)]
pub enum BookingCommand {
    CreateBooking {
        seq: u64,
        visit_date: NaiveDate,
        visit_time: NaiveTime,
        party_size: u32,
        special_requests: Option<String>,
        customer: Customer,
    },
}

/// Booking creation workflow for one selected slot. Validation gates the
/// single create call; while it is pending both re-submission and going back
/// are refused, so no duplicate booking can be issued.
pub struct BookingFlow {
    slot: SlotSelection,
    state: BookingState,
    last_seq: u64,
}

impl BookingFlow {
    pub fn new(slot: SlotSelection) -> Self {
        Self {
            slot,
            state: BookingState::Editing {
                form: CustomerForm::default(),
                field_errors: Vec::new(),
                submit_error: None,
            },
            last_seq: 0,
        }
    }

    pub fn state(&self) -> &BookingState { &self.state }

    /// Back is always available except while a submission is in flight.
    pub fn can_go_back(&self) -> bool {
        !matches!(self.state, BookingState::Submitting { .. })
    }

    pub fn dispatch(&mut self, event: BookingEvent) -> Option<BookingCommand> {
        match event {
            BookingEvent::SubmitRequested(form) => {
                if matches!(self.state, BookingState::Submitting { .. })
                    || matches!(self.state, BookingState::Confirmed { .. })
                {
                    return None;
                }
                if let Err(field_errors) = form.validate() {
                    self.state = BookingState::Editing { form, field_errors, submit_error: None };
                    return None;
                }
                self.last_seq += 1;
                let seq = self.last_seq;
                let command = BookingCommand::CreateBooking {
                    seq,
                    visit_date: self.slot.visit_date,
                    visit_time: self.slot.visit_time,
                    party_size: self.slot.party_size,
                    special_requests: form.special_requests_opt(),
                    customer: form.customer(),
                };
                self.state = BookingState::Submitting { seq, form };
                Some(command)
            }
            BookingEvent::CreateSucceeded { seq, booking } => {
                if !self.pending_seq_matches(seq) {
                    return None;
                }
                self.state = BookingState::Confirmed { booking };
                None
            }
            BookingEvent::CreateFailed { seq, error } => {
                if !self.pending_seq_matches(seq) {
                    return None;
                }
                let BookingState::Submitting { form, .. } =
                    std::mem::replace(&mut self.state, BookingState::Editing {
                        form: CustomerForm::default(),
                        field_errors: Vec::new(),
                        submit_error: None,
                    })
                else {
                    unreachable!("pending_seq_matches checked the state");
                };
                // The entered details survive the failure so the user can
                // correct and retry without reloading.
                self.state = BookingState::Editing {
                    form,
                    field_errors: Vec::new(),
                    submit_error: Some(error.user_message(GENERIC_CREATE_ERROR)),
                };
                None
            }
        }
    }

    fn pending_seq_matches(&self, seq: u64) -> bool {
        matches!(self.state, BookingState::Submitting { seq: pending, .. } if pending == seq)
    }
}
