//! Endpoint factory that wires a caller identity and injected services into endpoints under
//! test.

// self
use crate::{
	_prelude::*,
	obs::{self, Operation},
	security::ClaimsPrincipal,
	testing::{LogRecorder, Logger, ServiceCollection, ServiceError, ServiceProvider},
};

type Injector = Box<dyn Fn(&mut ServiceCollection) + Send + Sync>;
type LoggerRegistration = Box<dyn Fn(&mut ServiceCollection, &LogRecorder) + Send + Sync>;

/// An endpoint that can be constructed from its own dependencies plus the request context.
pub trait Endpoint
where
	Self: 'static + Sized,
{
	/// Values passed to the endpoint constructor.
	type Dependencies: Clone;

	/// Creates the endpoint for one request.
	fn create(dependencies: Self::Dependencies, context: EndpointContext) -> Self;
}

/// Per-request state observed by an endpoint.
#[derive(Clone, Debug, Default)]
pub struct EndpointContext {
	user: ClaimsPrincipal,
	services: ServiceProvider,
}
impl EndpointContext {
	/// Creates a context for `user` backed by `services`.
	pub fn new(user: ClaimsPrincipal, services: ServiceProvider) -> Self {
		Self { user, services }
	}

	/// Authenticated caller; anonymous when no claims were supplied.
	pub fn user(&self) -> &ClaimsPrincipal {
		&self.user
	}

	/// Services available to the request.
	pub fn services(&self) -> &ServiceProvider {
		&self.services
	}

	/// Shorthand for [`ServiceProvider::get`].
	pub fn resolve<T>(&self) -> Option<Arc<T>>
	where
		T: Any + Send + Sync,
	{
		self.services.get()
	}

	/// Shorthand for [`ServiceProvider::require`].
	pub fn require<T>(&self) -> Result<Arc<T>, ServiceError>
	where
		T: Any + Send + Sync,
	{
		self.services.require()
	}
}

/// Entry point for building endpoints under test.
#[derive(Clone, Copy, Debug, Default)]
pub struct EndpointFactory;
impl EndpointFactory {
	/// Starts configuring an endpoint constructed from `dependencies`.
	pub fn create_endpoint<E>(dependencies: E::Dependencies) -> EndpointConfiguration<E>
	where
		E: Endpoint,
	{
		EndpointConfiguration::new(dependencies)
	}
}

/// Builder collecting everything an endpoint instance observes.
///
/// Every [`build`](Self::build) starts from an empty [`ServiceCollection`], registers a stub
/// [`Logger`] for the endpoint type and for each type passed to
/// [`with_stub_logger`](Self::with_stub_logger), then runs the injected callbacks in
/// registration order, so callbacks can replace the stub loggers.
pub struct EndpointConfiguration<E>
where
	E: Endpoint,
{
	dependencies: E::Dependencies,
	user: Option<ClaimsPrincipal>,
	injectors: Vec<Injector>,
	loggers: Vec<LoggerRegistration>,
	recorder: LogRecorder,
}
impl<E> EndpointConfiguration<E>
where
	E: Endpoint,
{
	/// Creates a configuration without claims or injected services.
	pub fn new(dependencies: E::Dependencies) -> Self {
		Self {
			dependencies,
			user: None,
			injectors: Vec::new(),
			loggers: Vec::new(),
			recorder: LogRecorder::default(),
		}
	}

	/// Sets the authenticated caller.
	pub fn with_claims(mut self, user: ClaimsPrincipal) -> Self {
		self.user = Some(user);

		self
	}

	/// Adds a callback that registers services for every built endpoint.
	pub fn with_injected_services<F>(mut self, inject: F) -> Self
	where
		F: 'static + Send + Sync + Fn(&mut ServiceCollection),
	{
		self.injectors.push(Box::new(inject));

		self
	}

	/// Registers an extra stub `Logger<T>` next to the endpoint's own logger.
	pub fn with_stub_logger<T>(mut self) -> Self
	where
		T: 'static + ?Sized,
	{
		self.loggers.push(Box::new(|services: &mut ServiceCollection, recorder: &LogRecorder| {
			services.add_singleton(Logger::<T>::stub(recorder.clone()));
		}));

		self
	}

	/// Recorder shared by every stub logger this configuration registers.
	pub fn log_recorder(&self) -> &LogRecorder {
		&self.recorder
	}

	/// Constructs one endpoint instance.
	pub fn build(&self) -> E {
		obs::observe(
			Operation::EndpointBuild,
			|_| true,
			|| {
				let mut services = ServiceCollection::default();

				services.add_singleton(Logger::<E>::stub(self.recorder.clone()));

				for register in &self.loggers {
					register(&mut services, &self.recorder);
				}
				for inject in &self.injectors {
					inject(&mut services);
				}

				let context = EndpointContext::new(
					self.user.clone().unwrap_or_default(),
					services.build_service_provider(),
				);

				E::create(self.dependencies.clone(), context)
			},
		)
	}
}
impl<E> Debug for EndpointConfiguration<E>
where
	E: Endpoint,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("EndpointConfiguration")
			.field("endpoint", &std::any::type_name::<E>())
			.field("user", &self.user)
			.field("injectors", &self.injectors.len())
			.field("loggers", &self.loggers.len())
			.finish()
	}
}
