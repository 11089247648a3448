use super::request_common::{HTTPRequestMethod, HTTPRequestType};
use crate::http_handler::http_response::booking::Booking;

#[derive(Debug)]
pub struct GetBookingRequest {
    pub restaurant: String,
    pub booking_reference: String,
}

impl HTTPRequestType for GetBookingRequest {
    type Response = Booking;
    fn endpoint(&self) -> String {
        format!(
            "/api/ConsumerApi/v1/Restaurant/{}/Booking/{}",
            self.restaurant, self.booking_reference
        )
    }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
