use super::request_common::{HTTPRequestMethod, HTTPRequestType};
use crate::flow_control::cancellation::CancellationReason;
use crate::http_handler::http_response::cancel_booking::CancelBookingResponse;

/// Cancelling twice is not assumed to be safe; callers must disable the
/// action once a booking's status is cancelled.
#[derive(Debug)]
pub struct CancelBookingRequest {
    pub restaurant: String,
    pub booking_reference: String,
    pub reason: CancellationReason,
}

impl HTTPRequestType for CancelBookingRequest {
    type Response = CancelBookingResponse;
    fn endpoint(&self) -> String {
        format!(
            "/api/ConsumerApi/v1/Restaurant/{}/Booking/{}/Cancel",
            self.restaurant, self.booking_reference
        )
    }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
    fn form_body(&self) -> Vec<(&'static str, String)> {
        vec![
            ("micrositeName", self.restaurant.clone()),
            ("bookingReference", self.booking_reference.clone()),
            ("cancellationReasonId", self.reason.id().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_body_names_restaurant_reference_and_reason() {
        let req = CancelBookingRequest {
            restaurant: String::from("TheHungryUnicorn"),
            booking_reference: String::from("ABC1234"),
            reason: CancellationReason::CustomerRequest,
        };
        assert_eq!(
            req.endpoint(),
            "/api/ConsumerApi/v1/Restaurant/TheHungryUnicorn/Booking/ABC1234/Cancel"
        );
        assert_eq!(req.form_body(), vec![
            ("micrositeName", String::from("TheHungryUnicorn")),
            ("bookingReference", String::from("ABC1234")),
            ("cancellationReasonId", String::from("1")),
        ]);
    }
}
