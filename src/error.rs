//! Error taxonomy shared by the broker, the request pipeline, and the catalog client.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by every public operation.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The connectivity monitor reports no usable network path; nothing was sent.
	#[error("Network is unavailable.")]
	NetworkUnavailable,
	/// Transport failure or a non-success HTTP status.
	#[error(transparent)]
	InvalidResponse(#[from] ResponseError),
	/// A success response carried an empty body where content was expected.
	#[error("Response body was empty.")]
	DataFailure,
	/// The request could not be constructed.
	#[error(transparent)]
	InvalidRequest(#[from] RequestError),
	/// The response body did not match the expected shape.
	#[error("Response body could not be decoded.")]
	Decode {
		/// Structured decoding failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// No access token is stored.
	#[error("No access token is stored; sign in first.")]
	NotSignedIn,
	/// A token refresh attempt failed; delivered to every caller waiting on it.
	#[error("Token refresh failed: {reason}.")]
	RefreshFailed {
		/// Failure summary from the attempt that led the refresh.
		reason: String,
	},
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}
impl Error {
	/// Returns the coarse classification of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::NetworkUnavailable => ErrorKind::NetworkUnavailable,
			Self::InvalidResponse(_) => ErrorKind::InvalidResponse,
			Self::DataFailure => ErrorKind::DataFailure,
			Self::InvalidRequest(_) | Self::Config(_) => ErrorKind::InvalidRequest,
			Self::Decode { .. } => ErrorKind::Decode,
			Self::NotSignedIn => ErrorKind::NotSignedIn,
			Self::RefreshFailed { .. } => ErrorKind::RefreshFailed,
		}
	}

	/// HTTP status attached to the failure, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::InvalidResponse(e) => e.status(),
			_ => None,
		}
	}

	pub(crate) fn decode(source: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::Decode { source }
	}
}

/// Field-less classification of [`Error`], convenient for comparisons and callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// See [`Error::NetworkUnavailable`].
	NetworkUnavailable,
	/// See [`Error::InvalidResponse`].
	InvalidResponse,
	/// See [`Error::DataFailure`].
	DataFailure,
	/// See [`Error::InvalidRequest`] and [`Error::Config`].
	InvalidRequest,
	/// See [`Error::Decode`].
	Decode,
	/// See [`Error::NotSignedIn`].
	NotSignedIn,
	/// See [`Error::RefreshFailed`].
	RefreshFailed,
}

/// Failures observed after a request left the process.
#[derive(Debug, ThisError)]
pub enum ResponseError {
	/// Server answered with a non-success status.
	#[error("Server responded with HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
	},
	/// Transport failed before a response arrived (DNS, TCP, TLS, timeout).
	#[error("Transport failed before a response was received.")]
	Transport {
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// Token endpoint returned an OAuth error document.
	#[error("Token endpoint rejected the request: {message}.")]
	Rejected {
		/// OAuth error code and description.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token endpoint returned an `expires_in` outside the supported range.
	#[error("The expires_in value is out of range.")]
	ExpiresInOutOfRange,
}
impl ResponseError {
	/// Wraps a transport-specific failure.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Transport { source: Box::new(src) }
	}

	/// HTTP status code carried by this failure, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status } => Some(*status),
			Self::Rejected { status, .. } => *status,
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ResponseError {
	fn from(e: ReqwestError) -> Self {
		Self::transport(e)
	}
}

/// Failures raised while assembling a request.
#[derive(Debug, ThisError)]
pub enum RequestError {
	/// A URL could not be parsed.
	#[error("URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The API base URL cannot carry path segments.
	#[error("URL `{url}` cannot be used as a base.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// A route template expected more path parameters than were supplied.
	#[error("Route `{route}` is missing a path parameter.")]
	MissingPathParameter {
		/// Route template.
		route: &'static str,
	},
	/// A route template received more path parameters than it declares.
	#[error("Route `{route}` received unexpected path parameters.")]
	UnexpectedPathParameter {
		/// Route template.
		route: &'static str,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	Body {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// A header value contains forbidden characters.
	#[error("Header value is invalid.")]
	InvalidHeader {
		/// Underlying validation failure.
		#[source]
		source: oauth2::http::header::InvalidHeaderValue,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	Http(#[from] oauth2::http::Error),
	/// The redirect does not belong to the registered callback.
	#[error("Redirect does not match the registered callback URI.")]
	ForeignRedirect,
	/// The authorization server reported an error on the redirect.
	#[error("Authorization was denied: {reason}.")]
	AuthorizationDenied {
		/// Error code carried on the redirect.
		reason: String,
	},
	/// A required query parameter is absent.
	#[error("Missing required parameter `{name}`.")]
	MissingParameter {
		/// Parameter name.
		name: &'static str,
	},
}
impl From<url::ParseError> for RequestError {
	fn from(source: url::ParseError) -> Self {
		Self::InvalidUrl { source }
	}
}
impl From<url::ParseError> for Error {
	fn from(e: url::ParseError) -> Self {
		RequestError::from(e).into()
	}
}

/// Configuration and validation failures raised while wiring the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Service descriptor failed validation.
	#[error(transparent)]
	InvalidDescriptor(#[from] crate::provider::ServiceDescriptorError),
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Credential record builder validation failed.
	#[error("Unable to build credential record.")]
	CredentialBuild(#[from] crate::auth::CredentialRecordBuilderError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}
