//! Typed logger shapes resolved by endpoints, with an optional in-memory recorder.

// self
use crate::_prelude::*;

/// Severity of a logged entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
	/// Diagnostic detail.
	Debug,
	/// Normal operation.
	Info,
	/// Unexpected but handled condition.
	Warn,
	/// Failure.
	Error,
}

/// Entry captured by a [`LogRecorder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
	/// Severity of the entry.
	pub level: LogLevel,
	/// Category of the logger that wrote the entry.
	pub category: &'static str,
	/// Rendered message.
	pub message: String,
}

/// Shared sink collecting entries written by stub loggers.
#[derive(Clone, Debug, Default)]
pub struct LogRecorder(Arc<Mutex<Vec<LogEntry>>>);
impl LogRecorder {
	/// Snapshot of every entry recorded so far.
	pub fn entries(&self) -> Vec<LogEntry> {
		self.0.lock().clone()
	}

	/// Entries written by `Logger<T>`.
	pub fn entries_for<T>(&self) -> Vec<LogEntry>
	where
		T: ?Sized,
	{
		let category = std::any::type_name::<T>();

		self.0.lock().iter().filter(|entry| entry.category == category).cloned().collect()
	}

	/// Drops every recorded entry.
	pub fn clear(&self) {
		self.0.lock().clear();
	}

	fn push(&self, entry: LogEntry) {
		self.0.lock().push(entry);
	}
}

/// Logger whose category is the type it logs for.
///
/// Entries go to `tracing` when the feature is enabled and, for stub loggers, into the
/// attached [`LogRecorder`].
pub struct Logger<T>
where
	T: ?Sized,
{
	recorder: Option<LogRecorder>,
	_category: PhantomData<fn(&T)>,
}
impl<T> Logger<T>
where
	T: ?Sized,
{
	/// Creates a logger that only forwards to `tracing`.
	pub fn new() -> Self {
		Self { recorder: None, _category: PhantomData }
	}

	/// Creates a logger that also records into `recorder`.
	pub fn stub(recorder: LogRecorder) -> Self {
		Self { recorder: Some(recorder), _category: PhantomData }
	}

	/// Category name, the fully qualified name of `T`.
	pub fn category(&self) -> &'static str {
		std::any::type_name::<T>()
	}

	/// Logs at [`LogLevel::Debug`].
	pub fn debug(&self, message: impl Display) {
		self.log(LogLevel::Debug, message);
	}

	/// Logs at [`LogLevel::Info`].
	pub fn info(&self, message: impl Display) {
		self.log(LogLevel::Info, message);
	}

	/// Logs at [`LogLevel::Warn`].
	pub fn warn(&self, message: impl Display) {
		self.log(LogLevel::Warn, message);
	}

	/// Logs at [`LogLevel::Error`].
	pub fn error(&self, message: impl Display) {
		self.log(LogLevel::Error, message);
	}

	/// Logs `message` at `level`.
	pub fn log(&self, level: LogLevel, message: impl Display) {
		let message = message.to_string();
		let category = self.category();

		#[cfg(feature = "tracing")]
		{
			match level {
				LogLevel::Debug => tracing::debug!(category, "{message}"),
				LogLevel::Info => tracing::info!(category, "{message}"),
				LogLevel::Warn => tracing::warn!(category, "{message}"),
				LogLevel::Error => tracing::error!(category, "{message}"),
			}
		}

		if let Some(recorder) = &self.recorder {
			recorder.push(LogEntry { level, category, message });
		}
	}
}
impl<T> Clone for Logger<T>
where
	T: ?Sized,
{
	fn clone(&self) -> Self {
		Self { recorder: self.recorder.clone(), _category: PhantomData }
	}
}
impl<T> Default for Logger<T>
where
	T: ?Sized,
{
	fn default() -> Self {
		Self::new()
	}
}
impl<T> Debug for Logger<T>
where
	T: ?Sized,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Logger")
			.field("category", &self.category())
			.field("recording", &self.recorder.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	struct DonationsEndpoint;
	struct CampaignsEndpoint;

	#[test]
	fn stub_loggers_record_by_category() {
		let recorder = LogRecorder::default();
		let donations = Logger::<DonationsEndpoint>::stub(recorder.clone());
		let campaigns = Logger::<CampaignsEndpoint>::stub(recorder.clone());

		donations.info("donation stored");
		campaigns.error(format_args!("campaign {} missing", 12));

		assert_eq!(recorder.entries().len(), 2);

		let donation_entries = recorder.entries_for::<DonationsEndpoint>();

		assert_eq!(donation_entries.len(), 1);
		assert_eq!(donation_entries[0].level, LogLevel::Info);
		assert_eq!(donation_entries[0].message, "donation stored");
		assert!(donation_entries[0].category.ends_with("DonationsEndpoint"));
		assert_eq!(recorder.entries_for::<CampaignsEndpoint>()[0].message, "campaign 12 missing");

		recorder.clear();

		assert!(recorder.entries().is_empty());
	}

	#[test]
	fn plain_loggers_do_not_record() {
		let logger = Logger::<str>::new();

		logger.warn("ignored");

		assert!(logger.category().contains("str"));
	}
}
