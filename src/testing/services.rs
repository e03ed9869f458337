//! Minimal type-keyed service registry handed to endpoints under test.

// std
use std::{
	sync::OnceLock,
	thread::{self, ThreadId},
};
// self
use crate::_prelude::*;

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn(&ServiceProvider) -> Instance + Send + Sync>;

/// Errors raised while resolving services.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ServiceError {
	/// No registration exists for the requested type.
	#[error("No service of type `{type_name}` has been registered.")]
	NotRegistered {
		/// Name of the requested type.
		type_name: &'static str,
	},
	/// A factory asked the provider for the type it is building.
	#[error("Factory for `{type_name}` resolved its own type.")]
	Reentrant {
		/// Name of the type whose factory re-entered the provider.
		type_name: &'static str,
	},
}

#[derive(Clone)]
enum Registration {
	Instance(Instance),
	Factory(Factory),
}

/// Registrations collected before the provider is built.
///
/// Services are keyed by their concrete type; register trait objects by wrapping them, e.g.
/// as `Arc<dyn Repository>`. A later registration for the same type replaces the earlier one.
#[derive(Clone, Default)]
pub struct ServiceCollection {
	registrations: Vec<(TypeId, &'static str, Registration)>,
}
impl ServiceCollection {
	/// Registers a ready-made instance.
	pub fn add_singleton<T>(&mut self, value: T) -> &mut Self
	where
		T: Any + Send + Sync,
	{
		self.add_arc(Arc::new(value))
	}

	/// Registers an instance that is already shared.
	pub fn add_arc<T>(&mut self, value: Arc<T>) -> &mut Self
	where
		T: Any + Send + Sync,
	{
		self.push::<T>(Registration::Instance(value))
	}

	/// Registers a factory invoked lazily, at most once per provider.
	///
	/// Factories may resolve other services. A factory that resolves its own type gets
	/// [`ServiceError::Reentrant`] back instead of recursing.
	pub fn add_factory<T, F>(&mut self, factory: F) -> &mut Self
	where
		T: Any + Send + Sync,
		F: 'static + Send + Sync + Fn(&ServiceProvider) -> T,
	{
		let factory: Factory =
			Arc::new(move |provider: &ServiceProvider| Arc::new(factory(provider)) as Instance);

		self.push::<T>(Registration::Factory(factory))
	}

	/// True when a registration exists for `T`.
	pub fn contains<T>(&self) -> bool
	where
		T: Any,
	{
		let id = TypeId::of::<T>();

		self.registrations.iter().any(|(candidate, _, _)| *candidate == id)
	}

	/// Number of registrations, counting replaced ones.
	pub fn len(&self) -> usize {
		self.registrations.len()
	}

	/// True when nothing has been registered.
	pub fn is_empty(&self) -> bool {
		self.registrations.is_empty()
	}

	/// Freezes the registrations into a provider.
	pub fn build_service_provider(self) -> ServiceProvider {
		let mut slots = HashMap::with_capacity(self.registrations.len());

		for (id, type_name, registration) in self.registrations {
			let slot = Slot {
				type_name,
				registration,
				resolved: OnceLock::new(),
				building: Mutex::new(None),
			};

			slots.insert(id, slot);
		}

		ServiceProvider(Arc::new(slots))
	}

	fn push<T>(&mut self, registration: Registration) -> &mut Self
	where
		T: Any,
	{
		self.registrations.push((TypeId::of::<T>(), std::any::type_name::<T>(), registration));

		self
	}
}
impl Debug for ServiceCollection {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_list().entries(self.registrations.iter().map(|(_, name, _)| name)).finish()
	}
}

struct Slot {
	type_name: &'static str,
	registration: Registration,
	resolved: OnceLock<Instance>,
	building: Mutex<Option<ThreadId>>,
}
impl Slot {
	fn resolve(&self, provider: &ServiceProvider) -> Result<Instance, ServiceError> {
		let factory = match &self.registration {
			Registration::Instance(instance) => return Ok(instance.clone()),
			Registration::Factory(factory) => factory,
		};

		if let Some(instance) = self.resolved.get() {
			return Ok(instance.clone());
		}

		let current = thread::current().id();

		if *self.building.lock() == Some(current) {
			return Err(ServiceError::Reentrant { type_name: self.type_name });
		}

		let instance = self.resolved.get_or_init(|| {
			*self.building.lock() = Some(current);

			let instance = factory(provider);

			*self.building.lock() = None;

			instance
		});

		Ok(instance.clone())
	}
}

/// Read-only registry mapping a type to its shared instance.
#[derive(Clone, Default)]
pub struct ServiceProvider(Arc<HashMap<TypeId, Slot>>);
impl ServiceProvider {
	/// Resolves `T`, running its factory on first use.
	pub fn get<T>(&self) -> Option<Arc<T>>
	where
		T: Any + Send + Sync,
	{
		self.require().ok()
	}

	/// Resolves `T`, failing when it has not been registered or its factory re-enters.
	pub fn require<T>(&self) -> Result<Arc<T>, ServiceError>
	where
		T: Any + Send + Sync,
	{
		let type_name = std::any::type_name::<T>();
		let slot =
			self.0.get(&TypeId::of::<T>()).ok_or(ServiceError::NotRegistered { type_name })?;

		slot.resolve(self)?.downcast::<T>().map_err(|_| ServiceError::NotRegistered { type_name })
	}

	/// True when a registration exists for `T`.
	pub fn contains<T>(&self) -> bool
	where
		T: Any,
	{
		self.0.contains_key(&TypeId::of::<T>())
	}
}
impl Debug for ServiceProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_list().entries(self.0.values().map(|slot| slot.type_name)).finish()
	}
}
