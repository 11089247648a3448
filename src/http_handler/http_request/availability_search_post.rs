use super::request_common::{CHANNEL_CODE, HTTPRequestMethod, HTTPRequestType};
use crate::http_handler::http_response::availability_search::AvailabilitySearchResponse;
use chrono::NaiveDate;

#[derive(Debug)]
pub struct AvailabilitySearchRequest {
    pub restaurant: String,
    pub visit_date: NaiveDate,
    pub party_size: u32,
}

impl HTTPRequestType for AvailabilitySearchRequest {
    type Response = AvailabilitySearchResponse;
    fn endpoint(&self) -> String {
        format!("/api/ConsumerApi/v1/Restaurant/{}/AvailabilitySearch", self.restaurant)
    }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
    fn form_body(&self) -> Vec<(&'static str, String)> {
        vec![
            ("VisitDate", self.visit_date.format("%Y-%m-%d").to_string()),
            ("PartySize", self.party_size.to_string()),
            ("ChannelCode", String::from(CHANNEL_CODE)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_body_carries_date_party_and_channel() {
        let req = AvailabilitySearchRequest {
            restaurant: String::from("TheHungryUnicorn"),
            visit_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            party_size: 2,
        };
        assert_eq!(
            req.endpoint(),
            "/api/ConsumerApi/v1/Restaurant/TheHungryUnicorn/AvailabilitySearch"
        );
        let body = req.form_body();
        assert_eq!(body, vec![
            ("VisitDate", String::from("2025-03-01")),
            ("PartySize", String::from("2")),
            ("ChannelCode", String::from("ONLINE")),
        ]);
    }
}
