//! Named authorization policies evaluated against a caller's claims.

// self
use crate::{
	_prelude::*,
	obs::{self, Operation},
	security::{ClaimSource, PERMISSIONS_CLAIM_TYPE, Service},
};

/// Policies registered for every service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
	/// Callers with read access to the service.
	CanRead,
	/// Callers with write access to the service.
	CanWrite,
	/// Callers with both read and write access to the service.
	All,
}
impl Policy {
	/// Every policy in declaration order.
	pub const ALL: &'static [Self] = &[Self::CanRead, Self::CanWrite, Self::All];

	/// Returns the name the policy is registered under.
	pub const fn as_str(self) -> &'static str {
		match self {
			Policy::CanRead => "CanRead",
			Policy::CanWrite => "CanWrite",
			Policy::All => "All",
		}
	}
}
impl Display for Policy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Requires a claim of `claim_type` whose value is one of `allowed_values`.
///
/// An empty `allowed_values` list accepts any claim of the given type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimRequirement {
	/// Claim type that must be present.
	pub claim_type: String,
	/// Accepted values for the claim.
	pub allowed_values: Vec<String>,
}
impl ClaimRequirement {
	/// Creates a requirement accepting any of `allowed_values`.
	pub fn new<I, S>(claim_type: impl Into<String>, allowed_values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			claim_type: claim_type.into(),
			allowed_values: allowed_values.into_iter().map(Into::into).collect(),
		}
	}

	/// Creates a requirement for a single permission string.
	pub fn permission(permission: impl Into<String>) -> Self {
		Self::new(PERMISSIONS_CLAIM_TYPE, [permission])
	}

	/// True when `claims` contains a matching claim.
	pub fn is_satisfied_by<S>(&self, claims: &S) -> bool
	where
		S: ?Sized + ClaimSource,
	{
		claims.claims().iter().any(|claim| {
			claim.kind == self.claim_type
				&& (self.allowed_values.is_empty()
					|| self.allowed_values.iter().any(|value| *value == claim.value))
		})
	}
}

/// A named conjunction of [`ClaimRequirement`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationPolicy {
	name: String,
	requirements: Vec<ClaimRequirement>,
}
impl AuthorizationPolicy {
	/// Creates a policy without requirements; it denies everyone until one is added.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), requirements: Vec::new() }
	}

	/// Adds a claim requirement.
	pub fn require(mut self, requirement: ClaimRequirement) -> Self {
		self.requirements.push(requirement);

		self
	}

	/// Adds a requirement for a claim of `claim_type` with one of `allowed_values`.
	pub fn require_claim<I, S>(self, claim_type: impl Into<String>, allowed_values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.require(ClaimRequirement::new(claim_type, allowed_values))
	}

	/// Adds a requirement for a permission string.
	pub fn require_permission(self, permission: impl Into<String>) -> Self {
		self.require(ClaimRequirement::permission(permission))
	}

	/// Name the policy is registered under.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Requirements in registration order.
	pub fn requirements(&self) -> &[ClaimRequirement] {
		&self.requirements
	}

	/// True when every requirement is satisfied by `claims`.
	pub fn evaluate<S>(&self, claims: &S) -> bool
	where
		S: ?Sized + ClaimSource,
	{
		!self.requirements.is_empty()
			&& self.requirements.iter().all(|requirement| requirement.is_satisfied_by(claims))
	}
}

/// Registry of named policies configured at startup.
#[derive(Clone, Debug, Default)]
pub struct AuthorizationOptions {
	policies: BTreeMap<String, AuthorizationPolicy>,
}
impl AuthorizationOptions {
	/// Registers `policy`, replacing and returning any policy with the same name.
	pub fn add_policy(&mut self, policy: AuthorizationPolicy) -> Option<AuthorizationPolicy> {
		self.policies.insert(policy.name.clone(), policy)
	}

	/// Looks up a policy by name.
	pub fn policy(&self, name: &str) -> Option<&AuthorizationPolicy> {
		self.policies.get(name)
	}

	/// Registered policies ordered by name.
	pub fn policies(&self) -> impl Iterator<Item = &AuthorizationPolicy> {
		self.policies.values()
	}

	/// Registers [`Policy::CanRead`], [`Policy::CanWrite`], and [`Policy::All`] for `service`.
	///
	/// Calling this again for another service replaces the three policies.
	pub fn configure_policies(&mut self, service: Service) -> &mut Self {
		let read = service.read_permission();
		let write = service.write_permission();

		self.add_policy(
			AuthorizationPolicy::new(Policy::CanRead.as_str()).require_permission(&read),
		);
		self.add_policy(
			AuthorizationPolicy::new(Policy::CanWrite.as_str()).require_permission(&write),
		);
		self.add_policy(
			AuthorizationPolicy::new(Policy::All.as_str())
				.require_permission(read)
				.require_permission(write),
		);

		self
	}

	/// Evaluates the named policy; unknown policies deny access.
	pub fn is_authorized<S>(&self, name: &str, claims: &S) -> bool
	where
		S: ?Sized + ClaimSource,
	{
		obs::observe(
			Operation::Authorization,
			|granted: &bool| *granted,
			|| match self.policy(name) {
				Some(policy) => policy.evaluate(claims),
				None => {
					#[cfg(feature = "tracing")]
					tracing::warn!(
						policy = name,
						"Authorization requested for an unregistered policy."
					);

					false
				},
			},
		)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::security::{Claim, ClaimsPrincipal};

	fn configured(service: Service) -> AuthorizationOptions {
		let mut options = AuthorizationOptions::default();

		options.configure_policies(service);

		options
	}

	#[test]
	fn read_only_claims_pass_only_can_read() {
		for service in Service::ALL.iter().copied() {
			let options = configured(service);
			let reader = ClaimsPrincipal::anonymous().with_permission(service.read_permission());

			assert!(options.is_authorized(Policy::CanRead.as_str(), &reader));
			assert!(!options.is_authorized(Policy::CanWrite.as_str(), &reader));
			assert!(!options.is_authorized(Policy::All.as_str(), &reader));
		}
	}

	#[test]
	fn all_requires_both_permissions() {
		let options = configured(Service::Beneficiaries);
		let writer =
			ClaimsPrincipal::anonymous().with_permission(Service::Beneficiaries.write_permission());
		let both = writer.clone().with_permission(Service::Beneficiaries.read_permission());

		assert!(options.is_authorized("CanWrite", &writer));
		assert!(!options.is_authorized("All", &writer));
		assert!(options.is_authorized("All", &both));
		assert!(options.is_authorized("CanRead", &both));
	}

	#[test]
	fn other_service_permissions_do_not_leak() {
		let options = configured(Service::Users);
		let donor_admin = ClaimsPrincipal::anonymous()
			.with_permission(Service::Donors.read_permission())
			.with_permission(Service::Donors.write_permission());

		for policy in Policy::ALL {
			assert!(!options.is_authorized(policy.as_str(), &donor_admin));
		}
	}

	#[test]
	fn permission_must_use_permissions_claim_type() {
		let options = configured(Service::Users);
		let impostor = vec![Claim::new("role", "Users/read")];

		assert!(!options.is_authorized("CanRead", &impostor));
	}

	#[test]
	fn unknown_policies_and_empty_policies_deny() {
		let mut options = configured(Service::Users);
		let reader = ClaimsPrincipal::anonymous().with_permission("Users/read");

		assert!(!options.is_authorized("CanDelete", &reader));

		options.add_policy(AuthorizationPolicy::new("Empty"));

		assert!(!options.is_authorized("Empty", &reader));
	}

	#[test]
	fn reconfiguring_replaces_policies() {
		let mut options = configured(Service::Users);

		options.configure_policies(Service::Donors);

		assert_eq!(options.policies().count(), 3);
		assert_eq!(
			options.policy("CanRead").map(AuthorizationPolicy::requirements),
			Some([ClaimRequirement::permission("Donors/read")].as_slice())
		);
	}

	#[test]
	fn claim_requirement_without_values_accepts_any_value() {
		let requirement = ClaimRequirement::new("Id", Vec::<String>::new());

		assert!(requirement.is_satisfied_by(&ClaimsPrincipal::anonymous().with_user_id(5)));
		assert!(!requirement.is_satisfied_by(&ClaimsPrincipal::anonymous()));
	}
}
