//! Claims about an authenticated caller and helpers to inspect them.

// self
use crate::{
	_prelude::*,
	security::{PERMISSIONS_CLAIM_TYPE, USER_ID_CLAIM_TYPE},
};

/// A single `type = value` assertion issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
	/// Claim type, e.g. `permissions` or `Id`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Claim value.
	pub value: String,
}
impl Claim {
	/// Creates a claim of the given type.
	pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
		Self { kind: kind.into(), value: value.into() }
	}

	/// Creates a permission claim, e.g. for `Service::Users.read_permission()`.
	pub fn permission(permission: impl Into<String>) -> Self {
		Self::new(PERMISSIONS_CLAIM_TYPE, permission)
	}
}

/// The authenticated identity attached to a request.
///
/// A principal without claims represents an anonymous caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsPrincipal {
	claims: Vec<Claim>,
}
impl ClaimsPrincipal {
	/// Creates a principal holding `claims` in the given order.
	pub fn new<I>(claims: I) -> Self
	where
		I: IntoIterator<Item = Claim>,
	{
		Self { claims: claims.into_iter().collect() }
	}

	/// Creates a principal without claims.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// Appends a claim.
	pub fn with_claim(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
		self.claims.push(Claim::new(kind, value));

		self
	}

	/// Appends a permission claim.
	pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
		self.claims.push(Claim::permission(permission));

		self
	}

	/// Appends the numeric account identifier claim.
	pub fn with_user_id(self, id: i32) -> Self {
		self.with_claim(USER_ID_CLAIM_TYPE, id.to_string())
	}

	/// True when the principal carries at least one claim.
	pub fn is_authenticated(&self) -> bool {
		!self.claims.is_empty()
	}
}
impl FromIterator<Claim> for ClaimsPrincipal {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = Claim>,
	{
		Self::new(iter)
	}
}

/// Anything that can hand out the claims of a caller.
pub trait ClaimSource {
	/// Claims in issue order.
	fn claims(&self) -> &[Claim];
}
impl ClaimSource for ClaimsPrincipal {
	fn claims(&self) -> &[Claim] {
		&self.claims
	}
}
impl ClaimSource for [Claim] {
	fn claims(&self) -> &[Claim] {
		self
	}
}
impl ClaimSource for Vec<Claim> {
	fn claims(&self) -> &[Claim] {
		self
	}
}

/// Inspection helpers available on every [`ClaimSource`].
pub trait ClaimsExt
where
	Self: ClaimSource,
{
	/// Returns the first claim of the given type.
	fn find_claim(&self, kind: &str) -> Option<&Claim> {
		self.claims().iter().find(|claim| claim.kind == kind)
	}

	/// True when a claim with exactly this type and value is present.
	fn has_claim(&self, kind: &str, value: &str) -> bool {
		self.claims().iter().any(|claim| claim.kind == kind && claim.value == value)
	}

	/// True when the caller holds the given permission string.
	fn has_permission(&self, permission: &str) -> bool {
		self.has_claim(PERMISSIONS_CLAIM_TYPE, permission)
	}

	/// Numeric account identifier from the first `Id` claim.
	///
	/// Returns `None` when the claim is absent or its value is not an integer.
	fn user_id(&self) -> Option<i32> {
		self.find_claim(USER_ID_CLAIM_TYPE).and_then(|claim| claim.value.trim().parse().ok())
	}

	/// True when the caller holds `permission` or owns the account identified by
	/// `account_owner_id`.
	fn has_permission_or_is_account_owner(&self, permission: &str, account_owner_id: i32) -> bool {
		self.has_permission(permission) || self.user_id() == Some(account_owner_id)
	}
}
impl<T> ClaimsExt for T where T: ?Sized + ClaimSource {}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::security::Service;

	#[test]
	fn owner_without_permission_is_granted() {
		let user = ClaimsPrincipal::anonymous().with_claim("Id", "42");
		let permission = Service::Users.write_permission();

		assert!(user.has_permission_or_is_account_owner(&permission, 42));
		assert!(!user.has_permission_or_is_account_owner(&permission, 43));
	}

	#[test]
	fn permission_holder_is_granted_for_any_account() {
		let permission = Service::Users.write_permission();
		let admin = ClaimsPrincipal::anonymous().with_permission(&permission).with_user_id(1);

		assert!(admin.has_permission_or_is_account_owner(&permission, 99));
		assert!(!admin.has_permission_or_is_account_owner(&Service::Donors.write_permission(), 99));
	}

	#[test]
	fn user_id_requires_an_integer_claim() {
		assert_eq!(ClaimsPrincipal::anonymous().user_id(), None);
		assert_eq!(ClaimsPrincipal::anonymous().with_claim("Id", "abc").user_id(), None);
		assert_eq!(ClaimsPrincipal::anonymous().with_claim("id", "7").user_id(), None);
		assert_eq!(ClaimsPrincipal::anonymous().with_claim("Id", "-7").user_id(), Some(-7));

		let shadowed = ClaimsPrincipal::new([Claim::new("Id", "x"), Claim::new("Id", "5")]);

		assert_eq!(shadowed.user_id(), None, "Only the first Id claim is considered.");
	}

	#[test]
	fn unparsable_identity_is_denied_not_failed() {
		let user = ClaimsPrincipal::anonymous().with_claim("Id", "not-a-number");

		assert!(!user.has_permission_or_is_account_owner("Users/read", 0));
	}

	#[test]
	fn claim_slices_are_claim_sources() {
		let claims = vec![Claim::permission("Beneficiaries/read")];

		assert!(claims.has_permission("Beneficiaries/read"));
		assert!(claims.as_slice().has_claim("permissions", "Beneficiaries/read"));
		assert!(!claims.has_permission("beneficiaries/read"), "Permissions are case-sensitive.");
	}

	#[test]
	fn principal_serializes_claim_type_field() {
		let user = ClaimsPrincipal::anonymous().with_user_id(3);
		let json = serde_json::to_string(&user).expect("Principal should serialize.");

		assert_eq!(json, r#"{"claims":[{"type":"Id","value":"3"}]}"#);
		assert!(user.is_authenticated());
		assert!(!ClaimsPrincipal::anonymous().is_authenticated());
	}
}
