pub mod availability_search;
pub mod booking;
pub mod cancel_booking;
pub mod response_common;
