//! Versioned message contracts exchanged between services over the messaging infrastructure.
//!
//! Contracts evolve by adding fields; fields are never removed or renamed, and consumers
//! ignore fields they do not know. Only the latest shape of each message is modeled here.

pub mod campaign;
pub mod currency;
pub mod donation;

pub use campaign::*;
pub use currency::*;
pub use donation::*;

// self
use crate::_prelude::*;

/// Error returned when a wire enum cannot be resolved from its name or ordinal.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum WireEnumError {
	/// The supplied name matches no variant.
	#[error("Unknown {kind} name: {value}.")]
	UnknownName {
		/// Kind of enumeration (campaign, currency).
		kind: &'static str,
		/// The rejected name.
		value: String,
	},
	/// The supplied ordinal is outside the variant range.
	#[error("Unknown {kind} ordinal: {value}.")]
	UnknownOrdinal {
		/// Kind of enumeration (campaign, currency).
		kind: &'static str,
		/// The rejected ordinal.
		value: u64,
	},
}

/// Defines a closed enumeration whose wire form is its name, while also accepting the
/// zero-based ordinal emitted by producers configured to write enums as integers.
macro_rules! def_wire_enum {
	(
		$(#[$meta:meta])*
		$name:ident, $kind:literal {
			$($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub enum $name {
			$($(#[$vmeta])* $variant),+
		}
		impl $name {
			/// Every variant in declaration (ordinal) order.
			pub const ALL: &'static [Self] = &[$(Self::$variant),+];

			/// Returns the wire name of the variant.
			pub const fn as_str(self) -> &'static str {
				match self {
					$(Self::$variant => $wire),+
				}
			}

			/// Returns the zero-based ordinal of the variant.
			pub fn ordinal(self) -> u64 {
				Self::ALL.iter().position(|candidate| *candidate == self).unwrap_or_default() as u64
			}

			/// Resolves a variant from its zero-based ordinal.
			pub fn from_ordinal(value: u64) -> Result<Self, $crate::messages::WireEnumError> {
				usize::try_from(value)
					.ok()
					.and_then(|idx| Self::ALL.get(idx).copied())
					.ok_or($crate::messages::WireEnumError::UnknownOrdinal { kind: $kind, value })
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
		impl FromStr for $name {
			type Err = $crate::messages::WireEnumError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::ALL
					.iter()
					.copied()
					.find(|candidate| candidate.as_str() == s)
					.ok_or_else(|| $crate::messages::WireEnumError::UnknownName {
						kind: $kind,
						value: s.to_owned(),
					})
			}
		}
		impl Serialize for $name {
			fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
			where
				S: serde::Serializer,
			{
				serializer.serialize_str(self.as_str())
			}
		}
		impl<'de> Deserialize<'de> for $name {
			fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
			where
				D: serde::Deserializer<'de>,
			{
				match $crate::messages::NameOrOrdinal::deserialize(deserializer)? {
					$crate::messages::NameOrOrdinal::Name(name) =>
						name.parse().map_err(serde::de::Error::custom),
					$crate::messages::NameOrOrdinal::Ordinal(value) =>
						Self::from_ordinal(value).map_err(serde::de::Error::custom),
				}
			}
		}
	};
}
pub(crate) use def_wire_enum;

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum NameOrOrdinal {
	Name(String),
	Ordinal(u64),
}
