//! Scripted in-memory [`HttpTransport`] for exercising request code without a network.

// std
use std::{collections::VecDeque, io};
// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::{
		HeaderMap, HttpRequest, HttpResponse, HttpTransport, Method, StatusCode, TransportFuture,
	},
};

/// Request captured by [`StubTransport`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	/// HTTP method.
	pub method: Method,
	/// Full target URI, including the query string.
	pub uri: String,
	/// Request headers.
	pub headers: HeaderMap,
	/// Buffered request body.
	pub body: Vec<u8>,
}

#[derive(Debug)]
enum Scripted {
	Respond { status: u16, body: Vec<u8> },
	Fail { message: String },
	Hang,
}

/// Transport that replays scripted outcomes in FIFO order and records every request.
///
/// Requests arriving after the script is exhausted fail with a transport error.
#[derive(Debug, Default)]
pub struct StubTransport {
	script: Mutex<VecDeque<Scripted>>,
	requests: Mutex<Vec<RecordedRequest>>,
}
impl StubTransport {
	/// Creates a transport with an empty script.
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a response with `status` and a raw body.
	pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
		self.push(Scripted::Respond { status, body: body.into() })
	}

	/// Queues a response with `status` and a JSON body.
	pub fn respond_json(&self, status: u16, body: &serde_json::Value) -> &Self {
		self.respond(status, body.to_string())
	}

	/// Queues a transport-level failure.
	pub fn fail(&self, message: impl Into<String>) -> &Self {
		self.push(Scripted::Fail { message: message.into() })
	}

	/// Queues a send that never completes; pair it with a cancellation token.
	pub fn hang(&self) -> &Self {
		self.push(Scripted::Hang)
	}

	/// Requests received so far, in arrival order.
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.requests.lock().clone()
	}

	/// Number of scripted outcomes not yet consumed.
	pub fn remaining(&self) -> usize {
		self.script.lock().len()
	}

	fn push(&self, scripted: Scripted) -> &Self {
		self.script.lock().push_back(scripted);

		self
	}
}
impl HttpTransport for StubTransport {
	fn send(&self, request: HttpRequest) -> TransportFuture<'_> {
		let (parts, body) = request.into_parts();

		self.requests.lock().push(RecordedRequest {
			method: parts.method,
			uri: parts.uri.to_string(),
			headers: parts.headers,
			body,
		});

		let next = self.script.lock().pop_front();

		Box::pin(async move {
			match next {
				Some(Scripted::Respond { status, body }) => StatusCode::from_u16(status)
					.map(|status| {
						let mut response = HttpResponse::new(body);

						*response.status_mut() = status;

						response
					})
					.map_err(|e| io_failure(io::Error::other(e))),
				Some(Scripted::Fail { message }) => Err(io_failure(io::Error::other(message))),
				Some(Scripted::Hang) => std::future::pending().await,
				None => Err(io_failure(io::Error::new(
					io::ErrorKind::NotConnected,
					"StubTransport has no scripted response left.",
				))),
			}
		})
	}
}

fn io_failure(e: io::Error) -> Error {
	Error::Transport(TransportError::Io(e))
}
