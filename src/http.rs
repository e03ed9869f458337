//! Transport primitives and the fluent request helper used for service-to-service calls.
//!
//! [`HttpTransport`] is the only dependency the request helper has on an HTTP stack. The
//! `reqwest` feature provides [`ReqwestTransport`]; tests can swap in
//! [`StubTransport`](crate::testing::StubTransport) or any custom implementation.

pub mod request;

pub use request::*;

pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

// std
#[cfg(feature = "reqwest")] use std::{ops::Deref, time::Duration};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, RequestError, TransportError};

/// Fully buffered outbound request handed to a transport.
pub type HttpRequest = ::http::Request<Vec<u8>>;
/// Fully buffered response returned by a transport.
pub type HttpResponse = ::http::Response<Vec<u8>>;
/// Boxed future returned by [`HttpTransport::send`].
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<HttpResponse>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of sending one buffered request.
///
/// Implementations must return every response they receive, whatever its status code;
/// classifying non-success statuses is the caller's job. Genuine transport failures (DNS, TCP,
/// TLS, IO) surface as [`Error::Transport`]; requests the stack cannot represent surface as
/// [`Error::Request`].
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` once and buffers the full response body.
	fn send(&self, request: HttpRequest) -> TransportFuture<'_>;
}
impl<T> HttpTransport for Arc<T>
where
	T: ?Sized + HttpTransport,
{
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		(**self).send(request)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Starts a builder for a transport with custom timeouts and default headers.
	pub fn builder() -> ReqwestTransportBuilder {
		ReqwestTransportBuilder::default()
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(async move {
			let request =
				reqwest::Request::try_from(request).map_err(RequestError::unsupported)?;
			let response = self.0.execute(request).await.map_err(TransportError::from)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await.map_err(TransportError::from)?;
			let mut buffered = HttpResponse::new(body.to_vec());

			*buffered.status_mut() = status;
			*buffered.headers_mut() = headers;

			Ok::<_, Error>(buffered)
		})
	}
}

/// Builder for [`ReqwestTransport`] values.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportBuilder {
	/// Total request timeout; unbounded when unset.
	pub timeout: Option<Duration>,
	/// Connection establishment timeout; unbounded when unset.
	pub connect_timeout: Option<Duration>,
	/// `User-Agent` header sent with every request.
	pub user_agent: Option<String>,
	/// Headers attached to every request, in insertion order.
	pub default_headers: Vec<(String, String)>,
}
#[cfg(feature = "reqwest")]
impl ReqwestTransportBuilder {
	/// Sets the total request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Sets the connection timeout.
	pub fn connect_timeout(mut self, timeout: Duration) -> Self {
		self.connect_timeout = Some(timeout);

		self
	}

	/// Sets the `User-Agent` header.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Adds a header sent with every request.
	pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.default_headers.push((name.into(), value.into()));

		self
	}

	/// Consumes the builder and constructs the reqwest client.
	pub fn build(self) -> Result<ReqwestTransport, ConfigError> {
		let mut headers = HeaderMap::new();

		for (name, value) in self.default_headers {
			let header_name = HeaderName::from_bytes(name.as_bytes());
			let header_value = HeaderValue::from_str(&value);

			match (header_name, header_value) {
				(Ok(header_name), Ok(header_value)) => {
					headers.append(header_name, header_value);
				},
				_ => return Err(ConfigError::InvalidHeader { name }),
			}
		}

		let mut builder = ReqwestClient::builder().default_headers(headers);

		if let Some(timeout) = self.timeout {
			builder = builder.timeout(timeout);
		}
		if let Some(timeout) = self.connect_timeout {
			builder = builder.connect_timeout(timeout);
		}
		if let Some(user_agent) = self.user_agent {
			builder = builder.user_agent(user_agent);
		}

		Ok(ReqwestTransport(builder.build()?))
	}
}
