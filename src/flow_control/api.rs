use crate::flow_control::cancellation::CancellationReason;
use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_request::{
    availability_search_post::AvailabilitySearchRequest,
    booking_cancel_post::CancelBookingRequest,
    booking_create_post::{CreateBookingRequest, Customer},
    booking_get::GetBookingRequest,
    booking_update_patch::{BookingPatch, UpdateBookingRequest},
    request_common::HTTPRequestType,
};
use crate::http_handler::http_response::{
    availability_search::AvailabilitySearchResponse, booking::Booking,
    cancel_booking::CancelBookingResponse, response_common::ResponseError,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;

/// The five operations of the booking backend, each mapping 1:1 to an
/// endpoint. Workflows depend on this trait so tests can drive them with a
/// stub instead of a live server.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn search_availability(
        &self,
        visit_date: NaiveDate,
        party_size: u32,
    ) -> Result<AvailabilitySearchResponse, ResponseError>;

    async fn create_booking(
        &self,
        visit_date: NaiveDate,
        visit_time: NaiveTime,
        party_size: u32,
        special_requests: Option<String>,
        customer: Customer,
    ) -> Result<Booking, ResponseError>;

    async fn get_booking(&self, reference: &str) -> Result<Booking, ResponseError>;

    async fn update_booking(
        &self,
        reference: &str,
        patch: BookingPatch,
    ) -> Result<Booking, ResponseError>;

    async fn cancel_booking(
        &self,
        reference: &str,
        reason: CancellationReason,
    ) -> Result<CancelBookingResponse, ResponseError>;
}

/// Live implementation backed by the shared `HTTPClient`. The restaurant
/// identifier is fixed at construction and substituted into every endpoint.
pub struct LiveBookingApi {
    client: Arc<HTTPClient>,
    restaurant: String,
}

impl LiveBookingApi {
    pub fn new(client: Arc<HTTPClient>, restaurant: String) -> Self {
        Self { client, restaurant }
    }
}

#[async_trait]
impl BookingApi for LiveBookingApi {
    async fn search_availability(
        &self,
        visit_date: NaiveDate,
        party_size: u32,
    ) -> Result<AvailabilitySearchResponse, ResponseError> {
        AvailabilitySearchRequest { restaurant: self.restaurant.clone(), visit_date, party_size }
            .send_request(&self.client)
            .await
    }

    async fn create_booking(
        &self,
        visit_date: NaiveDate,
        visit_time: NaiveTime,
        party_size: u32,
        special_requests: Option<String>,
        customer: Customer,
    ) -> Result<Booking, ResponseError> {
        CreateBookingRequest {
            restaurant: self.restaurant.clone(),
            visit_date,
            visit_time,
            party_size,
            special_requests,
            customer: Some(customer),
        }
        .send_request(&self.client)
        .await
    }

    async fn get_booking(&self, reference: &str) -> Result<Booking, ResponseError> {
        GetBookingRequest {
            restaurant: self.restaurant.clone(),
            booking_reference: String::from(reference),
        }
        .send_request(&self.client)
        .await
    }

    async fn update_booking(
        &self,
        reference: &str,
        patch: BookingPatch,
    ) -> Result<Booking, ResponseError> {
        UpdateBookingRequest {
            restaurant: self.restaurant.clone(),
            booking_reference: String::from(reference),
            patch,
        }
        .send_request(&self.client)
        .await
    }

    async fn cancel_booking(
        &self,
        reference: &str,
        reason: CancellationReason,
    ) -> Result<CancelBookingResponse, ResponseError> {
        CancelBookingRequest {
            restaurant: self.restaurant.clone(),
            booking_reference: String::from(reference),
            reason,
        }
        .send_request(&self.client)
        .await
    }
}
