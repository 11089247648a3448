use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Status string the backend uses for a cancelled booking. The rest of the
/// status vocabulary is server-defined and treated as opaque.
pub const STATUS_CANCELLED: &str = "cancelled";

/// A booking record as returned by create, get and update. The local copy is
/// best-effort and may drift from server truth until re-fetched.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Booking {
    /// Server-assigned, immutable, human-readable reference.
    pub booking_reference: String,
    pub booking_id: i64,
    pub restaurant: String,
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    pub party_size: u32,
    pub status: String,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub customer: Option<BookedCustomer>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool { self.status.eq_ignore_ascii_case(STATUS_CANCELLED) }
}

/// Customer sub-record attached to a fetched booking.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BookedCustomer {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

impl SerdeJSONBodyHTTPResponseType for Booking {}
