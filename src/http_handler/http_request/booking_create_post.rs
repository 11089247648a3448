use super::request_common::{CHANNEL_CODE, HTTPRequestMethod, HTTPRequestType, push_present};
use crate::http_handler::http_response::booking::Booking;
use chrono::{NaiveDate, NaiveTime};

/// Customer details attached to a creation request. Every field is optional;
/// absent fields never reach the wire.
#[derive(Debug, Clone, Default)]
pub struct Customer {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub mobile_country_code: Option<String>,
    pub phone_country_code: Option<String>,
    pub receive_email_marketing: Option<bool>,
    pub receive_sms_marketing: Option<bool>,
}

/// Static mapping from structured customer fields to their bracketed wire
/// keys. The transport is flat form-encoding, so the nested record is
/// flattened through this table rather than by runtime shape inspection.
const CUSTOMER_FIELD_MAP: &[(&str, fn(&Customer) -> Option<String>)] = &[
    ("Customer[FirstName]", |c| c.first_name.clone()),
    ("Customer[Surname]", |c| c.surname.clone()),
    ("Customer[Email]", |c| c.email.clone()),
    ("Customer[Mobile]", |c| c.mobile.clone()),
    ("Customer[Phone]", |c| c.phone.clone()),
    ("Customer[MobileCountryCode]", |c| c.mobile_country_code.clone()),
    ("Customer[PhoneCountryCode]", |c| c.phone_country_code.clone()),
    ("Customer[ReceiveEmailMarketing]", |c| c.receive_email_marketing.map(|v| v.to_string())),
    ("Customer[ReceiveSmsMarketing]", |c| c.receive_sms_marketing.map(|v| v.to_string())),
];

#[derive(Debug)]
pub struct CreateBookingRequest {
    pub restaurant: String,
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    pub party_size: u32,
    pub special_requests: Option<String>,
    pub customer: Option<Customer>,
}

impl HTTPRequestType for CreateBookingRequest {
    type Response = Booking;
    fn endpoint(&self) -> String {
        format!("/api/ConsumerApi/v1/Restaurant/{}/BookingWithStripeToken", self.restaurant)
    }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
    fn form_body(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("VisitDate", self.visit_date.format("%Y-%m-%d").to_string()),
            ("VisitTime", self.visit_time.format("%H:%M:%S").to_string()),
            ("PartySize", self.party_size.to_string()),
            ("ChannelCode", String::from(CHANNEL_CODE)),
        ];
        push_present(&mut pairs, "SpecialRequests", self.special_requests.as_ref());
        if let Some(customer) = &self.customer {
            for &(key, extract) in CUSTOMER_FIELD_MAP {
                if let Some(value) = extract(customer) {
                    pairs.push((key, value));
                }
            }
        }
        pairs
    }
}
