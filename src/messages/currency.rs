//! Currencies accepted for donation amounts.

// self
use crate::{_prelude::*, messages::def_wire_enum};

def_wire_enum! {
	/// ISO 4217 codes accepted by the donation services.
	Currency, "currency" {
		/// Argentine peso.
		Ars => "ARS",
		/// United States dollar.
		Usd => "USD",
		/// Euro.
		Eur => "EUR",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn wire_codes_are_uppercase_iso() {
		let codes = Currency::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>();

		assert_eq!(codes, vec!["ARS", "USD", "EUR"]);
		assert_eq!("EUR".parse::<Currency>(), Ok(Currency::Eur));
		assert!("Eur".parse::<Currency>().is_err());
		assert_eq!(
			serde_json::from_str::<Currency>("1").expect("Currency ordinal should deserialize."),
			Currency::Usd
		);
	}
}
