pub mod availability_search_post;
pub mod booking_cancel_post;
pub mod booking_create_post;
pub mod booking_get;
pub mod booking_update_patch;
pub mod request_common;
