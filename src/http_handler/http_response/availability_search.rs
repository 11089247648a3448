use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;
use chrono::{NaiveDate, NaiveTime};

/// A single seating candidate returned by an availability search. Produced
/// only by the server, never mutated locally.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AvailabilitySlot {
    pub time: NaiveTime,
    pub available: bool,
    pub max_party_size: u32,
    pub current_bookings: u32,
}

/// Result of one availability search. Replaced wholesale by the next search.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AvailabilitySearchResponse {
    pub restaurant: String,
    pub restaurant_id: i64,
    pub visit_date: NaiveDate,
    pub party_size: u32,
    pub channel_code: String,
    pub available_slots: Vec<AvailabilitySlot>,
    pub total_slots: u32,
}

impl AvailabilitySearchResponse {
    /// Looks up a slot by its exact time of day.
    pub fn slot_at(&self, time: NaiveTime) -> Option<&AvailabilitySlot> {
        self.available_slots.iter().find(|s| s.time == time)
    }
}

impl SerdeJSONBodyHTTPResponseType for AvailabilitySearchResponse {}
