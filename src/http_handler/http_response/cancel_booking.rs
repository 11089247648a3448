use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

/// Acknowledgement returned by the cancel endpoint.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CancelBookingResponse {
    #[serde(default)]
    pub booking_reference: Option<String>,
    pub status: String,
}

impl SerdeJSONBodyHTTPResponseType for CancelBookingResponse {}
