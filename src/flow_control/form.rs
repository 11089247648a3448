use crate::http_handler::http_request::booking_create_post::Customer;
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_SPECIAL_REQUESTS_LEN: usize = 300;
const MIN_MOBILE_LEN: usize = 7;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Customer details entered before a booking is created. Validation runs
/// before any network call; failures are field-scoped and block submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub mobile: String,
    pub special_requests: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl CustomerForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.first_name.is_empty() {
            errors.push(FieldError { field: "first_name", message: "First name is required" });
        }
        if self.surname.is_empty() {
            errors.push(FieldError { field: "surname", message: "Surname is required" });
        }
        if !EMAIL_RE.is_match(&self.email) {
            errors.push(FieldError { field: "email", message: "Enter a valid email" });
        }
        if self.mobile.chars().count() < MIN_MOBILE_LEN {
            errors.push(FieldError { field: "mobile", message: "Enter a valid phone" });
        }
        if self.special_requests.chars().count() > MAX_SPECIAL_REQUESTS_LEN {
            errors.push(FieldError {
                field: "special_requests",
                message: "Special requests must be at most 300 characters",
            });
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// The customer record sent to the backend. Only the fields this form
    /// collects are present.
    pub fn customer(&self) -> Customer {
        Customer {
            first_name: Some(self.first_name.clone()),
            surname: Some(self.surname.clone()),
            email: Some(self.email.clone()),
            mobile: Some(self.mobile.clone()),
            ..Customer::default()
        }
    }

    /// Special requests are optional; an empty entry is absent, not "".
    pub fn special_requests_opt(&self) -> Option<String> {
        if self.special_requests.is_empty() {
            None
        } else {
            Some(self.special_requests.clone())
        }
    }
}
