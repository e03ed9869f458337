//! Fluent single-use request builder.

// crates.io
use ::http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
// self
use crate::{
	_prelude::*,
	error::RequestError,
	http::{HeaderMap, HeaderName, HeaderValue, HttpRequest, HttpResponse, HttpTransport, Method},
	obs::{self, Operation},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// One outbound request plus the transport that will send it.
///
/// The builder is consumed by its terminal `execute*` call, so a request is sent at most once.
/// Chain [`with_content`](Self::with_content) and [`with_query`](Self::with_query) before
/// executing:
///
/// ```no_run
/// # async fn demo(
/// # 	transport: std::sync::Arc<impl mamis_utils::http::HttpTransport>,
/// # ) -> mamis_utils::error::Result<()> {
/// use mamis_utils::{CancellationToken, http::ReadyRequest, url::Url};
///
/// let address = Url::parse("http://donors/api/donors").expect("Address should parse.");
/// let donors: Vec<serde_json::Value> = ReadyRequest::get(transport, address)
/// 	.with_query([("campaign", Some("Navidemos")), ("page", None)])?
/// 	.execute(&CancellationToken::new())
/// 	.await?;
/// # let _ = donors;
/// # Ok(())
/// # }
/// ```
pub struct ReadyRequest<C>
where
	C: ?Sized + HttpTransport,
{
	client: Arc<C>,
	method: Method,
	address: Option<Url>,
	headers: HeaderMap,
	body: Option<Vec<u8>>,
}
impl<C> ReadyRequest<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a request without a target address.
	///
	/// An address must be supplied through [`with_address`](Self::with_address) before query
	/// parameters are attached or the request is executed.
	pub fn new(client: Arc<C>, method: Method) -> Self {
		Self { client, method, address: None, headers: HeaderMap::new(), body: None }
	}

	/// Creates a `GET` request targeting `address`.
	pub fn get(client: Arc<C>, address: Url) -> Self {
		Self::new(client, Method::GET).with_address(address)
	}

	/// Creates a `POST` request targeting `address`.
	pub fn post(client: Arc<C>, address: Url) -> Self {
		Self::new(client, Method::POST).with_address(address)
	}

	/// Creates a `PUT` request targeting `address`.
	pub fn put(client: Arc<C>, address: Url) -> Self {
		Self::new(client, Method::PUT).with_address(address)
	}

	/// Creates a `PATCH` request targeting `address`.
	pub fn patch(client: Arc<C>, address: Url) -> Self {
		Self::new(client, Method::PATCH).with_address(address)
	}

	/// Creates a `DELETE` request targeting `address`.
	pub fn delete(client: Arc<C>, address: Url) -> Self {
		Self::new(client, Method::DELETE).with_address(address)
	}

	/// Sets (or replaces) the target address.
	pub fn with_address(mut self, address: Url) -> Self {
		self.address = Some(address);

		self
	}

	/// Adds a header, keeping any values already present under the same name.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.append(name, value);

		self
	}

	/// Serializes `body` as JSON into a fully buffered payload.
	pub fn with_content<T>(mut self, body: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let payload = serde_json::to_vec(body).map_err(RequestError::Encode)?;

		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
		self.body = Some(payload);

		Ok(self)
	}

	/// Replaces the query string with the pairs whose value is present.
	///
	/// Pairs are joined as `key=value` segments separated by `&`, in iteration order. Pairs with
	/// an absent value are dropped; when none remain the query string is removed entirely.
	pub fn with_query<I, K, V>(mut self, parameters: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, Option<V>)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let address = self.address.as_mut().ok_or(RequestError::MissingAddress)?;
		let query = parameters
			.into_iter()
			.filter_map(|(key, value)| {
				value.map(|value| format!("{}={}", key.as_ref(), value.as_ref()))
			})
			.collect::<Vec<_>>()
			.join("&");

		address.set_query(if query.is_empty() { None } else { Some(query.as_str()) });

		Ok(self)
	}

	/// HTTP method of the request.
	pub fn method(&self) -> &Method {
		&self.method
	}

	/// Target address, when one has been set.
	pub fn address(&self) -> Option<&Url> {
		self.address.as_ref()
	}

	/// Headers attached so far.
	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// Serialized payload, when a body has been attached.
	pub fn body(&self) -> Option<&[u8]> {
		self.body.as_deref()
	}

	/// Sends the request and decodes a successful JSON body into `T`.
	///
	/// Non-2xx responses fail with [`Error::Status`] carrying the status code and body text.
	pub async fn execute<T>(self, cancel: &CancellationToken) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.complete(cancel, |response| decode(&response)).await
	}

	/// Sends the request and decodes a successful JSON body, treating an empty body or a JSON
	/// `null` as [`None`].
	pub async fn execute_optional<T>(self, cancel: &CancellationToken) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		self.complete(cancel, |response| {
			if response.body().iter().all(u8::is_ascii_whitespace) {
				Ok(None)
			} else {
				decode(&response)
			}
		})
		.await
	}

	/// Sends the request, discarding a successful body.
	pub async fn execute_empty(self, cancel: &CancellationToken) -> Result<()> {
		self.complete(cancel, |_| Ok(())).await
	}

	async fn complete<T, F>(self, cancel: &CancellationToken, finish: F) -> Result<T>
	where
		F: FnOnce(HttpResponse) -> Result<T>,
	{
		obs::observe_async(
			Operation::HttpRequest,
			|result: &Result<T>| result.is_ok(),
			async move { finish(self.dispatch(cancel).await?) },
		)
		.await
	}

	async fn dispatch(self, cancel: &CancellationToken) -> Result<HttpResponse> {
		let client = Arc::clone(&self.client);
		let request = self.into_http()?;
		let response = tokio::select! {
			biased;
			_ = cancel.cancelled() => return Err(Error::Cancelled),
			response = client.send(request) => response?,
		};
		let status = response.status();

		if status.is_success() {
			return Ok(response);
		}

		#[cfg(feature = "tracing")]
		tracing::debug!(status = status.as_u16(), "Remote service returned a non-success status.");

		Err(Error::Status {
			status: status.as_u16(),
			body: String::from_utf8_lossy(response.body()).into_owned(),
		})
	}

	fn into_http(self) -> Result<HttpRequest> {
		let address = self.address.ok_or(RequestError::MissingAddress)?;
		let mut builder = ::http::Request::builder().method(self.method).uri(address.as_str());

		if let Some(headers) = builder.headers_mut() {
			headers.extend(self.headers);
		}

		Ok(builder.body(self.body.unwrap_or_default()).map_err(RequestError::from)?)
	}
}
impl<C> Debug for ReadyRequest<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ReadyRequest")
			.field("method", &self.method)
			.field("address", &self.address.as_ref().map(Url::as_str))
			.field("headers", &self.headers)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.finish()
	}
}

fn decode<T>(response: &HttpResponse) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = response.status().as_u16();
	let mut deserializer = serde_json::Deserializer::from_slice(response.body());
	let value = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { status, source })?;

	deserializer.end().map_err(|source| Error::TrailingContent { status, source })?;

	Ok(value)
}
