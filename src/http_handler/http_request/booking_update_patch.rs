use super::request_common::{HTTPRequestMethod, HTTPRequestType, push_present};
use crate::http_handler::http_response::booking::Booking;
use chrono::{NaiveDate, NaiveTime};

/// Partial update: only supplied fields are sent, so omitted fields can
/// never overwrite server state with empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPatch {
    pub visit_date: Option<NaiveDate>,
    pub visit_time: Option<NaiveTime>,
    pub party_size: Option<u32>,
    pub special_requests: Option<String>,
    pub is_leave_time_confirmed: Option<bool>,
}

impl BookingPatch {
    pub fn is_empty(&self) -> bool {
        self.visit_date.is_none()
            && self.visit_time.is_none()
            && self.party_size.is_none()
            && self.special_requests.is_none()
            && self.is_leave_time_confirmed.is_none()
    }
}

#[derive(Debug)]
pub struct UpdateBookingRequest {
    pub restaurant: String,
    pub booking_reference: String,
    pub patch: BookingPatch,
}

impl HTTPRequestType for UpdateBookingRequest {
    type Response = Booking;
    fn endpoint(&self) -> String {
        format!(
            "/api/ConsumerApi/v1/Restaurant/{}/Booking/{}",
            self.restaurant, self.booking_reference
        )
    }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Patch }
    fn form_body(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_present(
            &mut pairs,
            "VisitDate",
            self.patch.visit_date.map(|d| d.format("%Y-%m-%d")).as_ref(),
        );
        push_present(
            &mut pairs,
            "VisitTime",
            self.patch.visit_time.map(|t| t.format("%H:%M:%S")).as_ref(),
        );
        push_present(&mut pairs, "PartySize", self.patch.party_size.as_ref());
        push_present(&mut pairs, "SpecialRequests", self.patch.special_requests.as_ref());
        push_present(
            &mut pairs,
            "IsLeaveTimeConfirmed",
            self.patch.is_leave_time_confirmed.as_ref(),
        );
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_fields_are_absent_from_the_body() {
        let req = UpdateBookingRequest {
            restaurant: String::from("TheHungryUnicorn"),
            booking_reference: String::from("ABC1234"),
            patch: BookingPatch { party_size: Some(4), ..BookingPatch::default() },
        };
        assert_eq!(req.form_body(), vec![("PartySize", String::from("4"))]);
        assert_eq!(
            req.endpoint(),
            "/api/ConsumerApi/v1/Restaurant/TheHungryUnicorn/Booking/ABC1234"
        );
    }

    #[test]
    fn empty_patch_produces_an_empty_body() {
        let patch = BookingPatch::default();
        assert!(patch.is_empty());
        let req = UpdateBookingRequest {
            restaurant: String::from("TheHungryUnicorn"),
            booking_reference: String::from("ABC1234"),
            patch,
        };
        assert!(req.form_body().is_empty());
    }
}
