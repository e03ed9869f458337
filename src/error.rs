//! Crate-level error types shared by the request helper and its transports.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The request was assembled incorrectly; never retryable.
	#[error(transparent)]
	Request(#[from] RequestError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Remote service answered with a non-success status code.
	#[error("Remote service responded with HTTP {status}: {body}")]
	Status {
		/// HTTP status code returned by the remote service.
		status: u16,
		/// Raw response body text, lossily decoded as UTF-8.
		body: String,
	},
	/// Successful response body could not be decoded into the requested type.
	#[error("Response body could not be decoded.")]
	Decode {
		/// HTTP status code of the response being decoded.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Successful response body held more than one JSON value.
	#[error("Response body has trailing content after the JSON value.")]
	TrailingContent {
		/// HTTP status code of the response being decoded.
		status: u16,
		/// Parser failure raised at the first unexpected byte.
		#[source]
		source: serde_json::Error,
	},
	/// Caller cancelled the exchange before it completed.
	#[error("Request was cancelled before it completed.")]
	Cancelled,
}
impl Error {
	/// Returns the HTTP status code associated with the failure, when one is known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. }
			| Self::Decode { status, .. }
			| Self::TrailingContent { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Returns the captured response body for non-success responses.
	pub fn body(&self) -> Option<&str> {
		match self {
			Self::Status { body, .. } => Some(body),
			_ => None,
		}
	}

	/// True when the remote service rejected the request with a 4xx status.
	pub fn is_client_error(&self) -> bool {
		matches!(self, Self::Status { status: 400..=499, .. })
	}

	/// True when the remote service failed with a 5xx status.
	pub fn is_server_error(&self) -> bool {
		matches!(self, Self::Status { status: 500..=599, .. })
	}
}

/// Usage errors raised while assembling a request, before any I/O happens.
#[derive(Debug, ThisError)]
pub enum RequestError {
	/// Query parameters require the request to already target an address.
	#[error("Request has no target address; set one before adding query parameters.")]
	MissingAddress,
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	Encode(#[source] serde_json::Error),
	/// HTTP request construction failed.
	#[error(transparent)]
	Build(#[from] ::http::Error),
	/// Transport could not represent the assembled request (for example a relative URI).
	#[error("Request could not be handed to the transport.")]
	Unsupported {
		/// Transport-specific conversion error.
		#[source]
		source: BoxError,
	},
}
impl RequestError {
	/// Wraps a transport's request conversion failure.
	pub fn unsupported(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Unsupported { source: Box::new(src) }
	}
}

/// Configuration failures raised while constructing transports.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A default header name or value is not valid HTTP.
	#[error("Default header `{name}` is invalid.")]
	InvalidHeader {
		/// Header name as supplied by the caller.
		name: String,
	},
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

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the remote service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the remote service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
