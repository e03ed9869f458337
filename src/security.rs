//! Claim-based authorization: service permissions, claim inspection, and named policies.

pub mod claims;
pub mod policy;
pub mod service;

pub use claims::*;
pub use policy::*;
pub use service::*;

/// Claim type carrying permission strings such as `Users/read`.
pub const PERMISSIONS_CLAIM_TYPE: &str = "permissions";
/// Claim type carrying the caller's numeric account identifier.
pub const USER_ID_CLAIM_TYPE: &str = "Id";
