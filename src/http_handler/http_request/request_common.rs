use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_response::response_common::{HTTPResponseType, ResponseError};

/// Fixed classification tag identifying the booking origin to the backend.
pub const CHANNEL_CODE: &str = "ONLINE";

#[derive(Debug, Clone, Copy, strum_macros::Display)]
pub(crate) enum HTTPRequestMethod {
    Get,
    Post,
    Patch,
}

/// One request to a booking API endpoint. Implementors supply the method,
/// the endpoint path and an `application/x-www-form-urlencoded` body as
/// key/value pairs; absent optional fields must simply not appear as pairs.
pub(crate) trait HTTPRequestType {
    type Response: HTTPResponseType;

    fn endpoint(&self) -> String;
    fn request_method(&self) -> HTTPRequestMethod;
    fn form_body(&self) -> Vec<(&'static str, String)> { Vec::new() }

    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, ResponseError> {
        let url = format!("{}{}", client.url(), self.endpoint());
        let mut builder = match self.request_method() {
            HTTPRequestMethod::Get => client.client().get(url),
            HTTPRequestMethod::Post => client.client().post(url),
            HTTPRequestMethod::Patch => client.client().patch(url),
        };
        let body = self.form_body();
        if !body.is_empty() {
            builder = builder.form(&body);
        }
        let response = builder.send().await?;
        Self::Response::read_response(response).await
    }
}

/// Pushes `(key, value)` onto `pairs` when the value is present. Absence
/// never becomes a literal "null" or empty pair on the wire.
pub(crate) fn push_present<T: ToString>(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<&T>,
) {
    if let Some(v) = value {
        pairs.push((key, v.to_string()));
    }
}
