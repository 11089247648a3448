pub mod api;
pub mod availability_flow;
pub mod booking_flow;
pub mod cancellation;
pub mod form;
pub mod manage_flow;
