use std::fmt;

use miette::Diagnostic;
use oauth2::{HttpClientError, basic::BasicErrorResponse};
use thiserror::Error;
use tracing_error::SpanTrace;

use crate::entities::transaction_line::{LineField, LineType};

pub type OAuth2Error = oauth2::RequestTokenError<HttpClientError<reqwest::Error>, BasicErrorResponse>;

/// Messages returned by the service alongside a `result="0"` response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteMessages(pub Vec<String>);

impl fmt::Display for RemoteMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "no messages given");
        }
        write!(f, "{}", self.0.join("; "))
    }
}

/// Failures while reading or writing XML documents.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),

    #[error(transparent)]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Output(#[from] std::string::FromUtf8Error),

    /// The document is well-formed XML but not shaped as expected.
    #[error("{0}")]
    Structure(String),
}

/// Errors that can occur when interacting with the Twinfield API.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("error making request: {0:?}")]
    #[diagnostic(
        code(twinfield_rs::request_error),
        help("Check your network connection and Twinfield availability")
    )]
    Request(#[source] reqwest::Error),

    #[error("endpoint could not be parsed as a URL")]
    #[diagnostic(
        code(twinfield_rs::invalid_endpoint),
        help("Check that the cluster URL is correctly formatted")
    )]
    InvalidEndpoint,

    /// A field was set on a transaction line whose type does not allow it.
    #[error("field {field} is not allowed for line type {line_type}")]
    #[diagnostic(
        code(twinfield_rs::invalid_field_for_line_type),
        help("Change the line type first or leave the field empty")
    )]
    InvalidFieldForLineType { field: LineField, line_type: LineType },

    /// A batch operation was called without any entities.
    #[error("at least one {entity} is required")]
    #[diagnostic(code(twinfield_rs::empty_batch))]
    EmptyBatch { entity: &'static str },

    #[error("no office configured on the client")]
    #[diagnostic(
        code(twinfield_rs::missing_office),
        help("Call `Client::set_office` before sending documents")
    )]
    MissingOffice,

    #[error("configuration error: {0}")]
    #[diagnostic(code(twinfield_rs::configuration))]
    Configuration(String),

    #[error("malformed xml: {0}")]
    #[diagnostic(
        code(twinfield_rs::xml),
        help("The service returned data in an unexpected format")
    )]
    Xml(#[source] XmlError),

    #[error("invalid value for {field}: {value:?}")]
    #[diagnostic(code(twinfield_rs::invalid_value))]
    InvalidValue { field: &'static str, value: String },

    #[error("{entity} is missing required field {field}")]
    #[diagnostic(code(twinfield_rs::missing_field))]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("object not found: {entity}")]
    #[diagnostic(
        code(twinfield_rs::not_found),
        help("Verify that the {entity} exists in the requested office")
    )]
    NotFound { entity: &'static str },

    /// The service processed the document but rejected it (`result="0"`).
    #[error("request rejected by Twinfield: {messages}")]
    #[diagnostic(
        code(twinfield_rs::remote),
        help("Review the messages returned by Twinfield")
    )]
    Remote {
        messages: RemoteMessages,
        span_trace: SpanTrace,
    },

    #[error("soap fault {code}: {message}")]
    #[diagnostic(code(twinfield_rs::soap_fault))]
    Fault { code: String, message: String },

    /// An error returned when the access token is rejected.
    #[error("encountered forbidden response from {url} ({status_code})")]
    #[diagnostic(
        code(twinfield_rs::forbidden),
        help("Check your access token and the organisation it was issued for")
    )]
    Forbidden {
        url: String,
        status_code: reqwest::StatusCode,
        response_body: Option<String>,
    },

    #[error("unexpected status {status_code} from {url}")]
    #[diagnostic(code(twinfield_rs::unexpected_status))]
    UnexpectedStatus {
        url: String,
        status_code: reqwest::StatusCode,
        response_body: Option<String>,
    },

    #[error("error decoding response: {0:?}")]
    #[diagnostic(
        code(twinfield_rs::deserialization_error),
        help("The API returned data in an unexpected format")
    )]
    DeserializationError(#[source] serde_json::Error, Option<String>),

    /// An error returned during `OAuth2` operations
    #[error("oauth2 error: {0:?}")]
    #[diagnostic(
        code(twinfield_rs::oauth2_error),
        help("Verify your OAuth2 configuration and credentials")
    )]
    OAuth2(OAuth2Error),
}

impl Error {
    /// Builds a [`Error::Remote`] and captures the current span trace.
    #[must_use]
    pub fn remote(messages: Vec<String>) -> Self {
        Self::Remote {
            messages: RemoteMessages(messages),
            span_trace: SpanTrace::capture(),
        }
    }

    /// Whether the error was raised locally, before any network activity.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidFieldForLineType { .. } | Self::EmptyBatch { .. }
        )
    }

    /// The span trace captured when the service rejected a request.
    #[must_use]
    pub fn span_trace(&self) -> Option<&SpanTrace> {
        match self {
            Self::Remote { span_trace, .. } => Some(span_trace),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::DeserializationError(e, None)
    }
}

impl From<OAuth2Error> for Error {
    fn from(e: OAuth2Error) -> Self {
        Self::OAuth2(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(_: url::ParseError) -> Self {
        Self::InvalidEndpoint
    }
}

/// Maps any `quick-xml` or encoding failure into [`Error::Xml`], keeping it as the source.
pub(crate) fn xml<E: Into<XmlError>>(e: E) -> Error {
    Error::Xml(e.into())
}

pub(crate) fn malformed(message: impl Into<String>) -> Error {
    Error::Xml(XmlError::Structure(message.into()))
}

/// Type alias for results from this crate.
///
/// This is already a Miette diagnostic result due to the implementation of
/// the Diagnostic trait for the Error type.
pub type Result<O> = std::result::Result<O, Error>;
