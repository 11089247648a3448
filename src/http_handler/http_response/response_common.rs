pub(crate) trait JSONBodyHTTPResponseType: HTTPResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: for<'de> serde::Deserialize<'de> {
        Ok(response.json::<Self::ParsedResponseType>().await?)
    }
}

pub(crate) trait SerdeJSONBodyHTTPResponseType {}

impl<T> JSONBodyHTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
}

impl<T> HTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_json_body(resp).await
    }
}

pub(crate) trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            // Error bodies commonly carry a `detail` field; anything else is
            // kept as an opaque status-only error.
            let detail =
                response.json::<ApiErrorBody>().await.ok().and_then(|body| body.detail);
            Err(ResponseError::Api { status, detail })
        }
    }
}

/// Structured error body returned by the booking backend on non-success
/// statuses.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    pub detail: Option<String>,
}

/// Error taxonomy for a round trip to the booking API.
#[derive(Debug, Clone)]
pub enum ResponseError {
    /// No response was received at all.
    NoConnection,
    /// The per-request deadline elapsed before a response arrived.
    Timeout,
    /// The server answered with a non-success status.
    Api { status: u16, detail: Option<String> },
    Unknown,
}

impl ResponseError {
    /// The server-provided error detail, when one was present in the body.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ResponseError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The message shown to the user: the server detail if present, else the
    /// given per-action fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().map_or_else(|| String::from(fallback), String::from)
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseError::NoConnection => write!(f, "no connection to the booking API"),
            ResponseError::Timeout => write!(f, "request deadline exceeded"),
            ResponseError::Api { status, detail: Some(d) } => {
                write!(f, "API error {status}: {d}")
            }
            ResponseError::Api { status, detail: None } => write!(f, "API error {status}"),
            ResponseError::Unknown => write!(f, "unknown request failure"),
        }
    }
}

impl std::error::Error for ResponseError {}
impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            ResponseError::Timeout
        } else if value.is_connect() {
            ResponseError::NoConnection
        } else if let Some(status) = value.status() {
            ResponseError::Api { status: status.as_u16(), detail: None }
        } else {
            ResponseError::Unknown
        }
    }
}
