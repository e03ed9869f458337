//! Spans and counters wrapped around the crate's instrumented operations.
//!
//! Every instrumented call goes through [`observe`] or [`observe_async`], which open one span,
//! count the attempt, and count the outcome once the call returns.
//!
//! # Feature Flags
//!
//! - `tracing` opens an `info` span named `mamis_utils.operation` carrying an `operation` field
//!   and, once finished, an `outcome` field.
//! - `metrics` increments `mamis_utils_operations_total` (labels `operation`, `outcome`) on entry
//!   and exit, and records `mamis_utils_operation_duration_seconds` (label `operation`).

// std
#[cfg(feature = "metrics")] use std::time::Instant;
// self
use crate::_prelude::*;

/// Operations instrumented by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Outbound call sent through [`ReadyRequest`](crate::http::ReadyRequest).
	HttpRequest,
	/// Named policy evaluated against a claim set.
	Authorization,
	/// Endpoint instance assembled by the test factory.
	EndpointBuild,
}
impl Operation {
	/// Label used for span fields and metric labels.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::HttpRequest => "http_request",
			Self::Authorization => "authorization",
			Self::EndpointBuild => "endpoint_build",
		}
	}
}

/// Runs `run` inside the operation's span; `succeeded` classifies its return value.
pub(crate) fn observe<T>(
	operation: Operation,
	succeeded: impl FnOnce(&T) -> bool,
	run: impl FnOnce() -> T,
) -> T {
	let attempt = Attempt::begin(operation);
	let output = {
		#[cfg(feature = "tracing")]
		let _entered = attempt.span.enter();

		run()
	};

	attempt.finish(succeeded(&output));

	output
}

/// Async counterpart of [`observe`]; the span is attached to the future, never held across
/// `.await`.
pub(crate) async fn observe_async<F>(
	operation: Operation,
	succeeded: impl FnOnce(&F::Output) -> bool,
	fut: F,
) -> F::Output
where
	F: Future,
{
	let attempt = Attempt::begin(operation);
	#[cfg(feature = "tracing")]
	let output = {
		use tracing::Instrument;

		fut.instrument(attempt.span.clone()).await
	};
	#[cfg(not(feature = "tracing"))]
	let output = fut.await;

	attempt.finish(succeeded(&output));

	output
}

struct Attempt {
	operation: Operation,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
	#[cfg(feature = "metrics")]
	started: Instant,
}
impl Attempt {
	fn begin(operation: Operation) -> Self {
		#[cfg(feature = "metrics")]
		metrics::counter!(
			"mamis_utils_operations_total",
			"operation" => operation.as_str(),
			"outcome" => "attempt"
		)
		.increment(1);

		Self {
			operation,
			#[cfg(feature = "tracing")]
			span: tracing::info_span!(
				"mamis_utils.operation",
				operation = operation.as_str(),
				outcome = tracing::field::Empty
			),
			#[cfg(feature = "metrics")]
			started: Instant::now(),
		}
	}

	fn finish(self, succeeded: bool) {
		let outcome = if succeeded { "success" } else { "failure" };

		#[cfg(feature = "tracing")]
		self.span.record("outcome", outcome);
		#[cfg(feature = "metrics")]
		{
			metrics::counter!(
				"mamis_utils_operations_total",
				"operation" => self.operation.as_str(),
				"outcome" => outcome
			)
			.increment(1);
			metrics::histogram!(
				"mamis_utils_operation_duration_seconds",
				"operation" => self.operation.as_str()
			)
			.record(self.started.elapsed().as_secs_f64());
		}

		let _ = (self.operation, outcome);
	}
}
