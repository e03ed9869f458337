//! Services on the network and the permission strings that guard them.

// self
use crate::_prelude::*;

/// Every service that exposes permission-guarded endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Service {
	/// Users service.
	Users,
	/// Beneficiaries service.
	Beneficiaries,
	/// Donors service.
	Donors,
}
impl Service {
	/// Every service in declaration order.
	pub const ALL: &'static [Self] = &[Self::Users, Self::Beneficiaries, Self::Donors];

	/// Returns the service name used inside permission strings.
	pub const fn as_str(self) -> &'static str {
		match self {
			Service::Users => "Users",
			Service::Beneficiaries => "Beneficiaries",
			Service::Donors => "Donors",
		}
	}

	/// Permission string granting read access, e.g. `Users/read`.
	pub fn read_permission(self) -> String {
		format!("{}/read", self.as_str())
	}

	/// Permission string granting write access, e.g. `Users/write`.
	pub fn write_permission(self) -> String {
		format!("{}/write", self.as_str())
	}
}
impl Display for Service {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Service {
	type Err = UnknownServiceError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.iter()
			.copied()
			.find(|service| service.as_str() == s)
			.ok_or_else(|| UnknownServiceError { name: s.to_owned() })
	}
}

/// Error returned when parsing an unknown service name.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown service: {name}.")]
pub struct UnknownServiceError {
	/// The rejected name.
	pub name: String,
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashSet;
	// self
	use super::*;

	#[test]
	fn permissions_follow_service_name() {
		assert_eq!(Service::Users.read_permission(), "Users/read");
		assert_eq!(Service::Users.write_permission(), "Users/write");
		assert_eq!(Service::Beneficiaries.read_permission(), "Beneficiaries/read");
		assert_eq!(Service::Donors.write_permission(), "Donors/write");
	}

	#[test]
	fn permissions_are_distinct_across_services() {
		let permissions = Service::ALL
			.iter()
			.flat_map(|service| [service.read_permission(), service.write_permission()])
			.collect::<HashSet<_>>();

		assert_eq!(permissions.len(), Service::ALL.len() * 2);

		for service in Service::ALL {
			assert_eq!(service.read_permission(), format!("{service}/read"));
			assert_eq!(service.write_permission(), format!("{service}/write"));
		}
	}

	#[test]
	fn parses_case_sensitive_names() {
		assert_eq!("Donors".parse::<Service>(), Ok(Service::Donors));
		assert!("donors".parse::<Service>().is_err());
	}
}
