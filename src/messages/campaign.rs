//! Campaigns a donation can be associated with.

// self
use crate::{_prelude::*, messages::def_wire_enum};

def_wire_enum! {
	/// Fixed set of yearly campaigns run by the organization.
	Campaign, "campaign" {
		/// School supplies campaign.
		UnaMochiComoLaTuya => "UnaMochiComoLaTuya",
		/// Back-to-school pairing campaign.
		JuntosALaPar => "JuntosALaPar",
		/// Winter clothing campaign.
		Abrigaditos => "Abrigaditos",
		/// Child sponsorship campaign.
		ApadrinaMiSonriza => "ApadrinaMiSonriza",
		/// Christmas gifts campaign.
		Navidemos => "Navidemos",
		/// Shared Christmas dinner campaign.
		NavidadCompartida => "NavidadCompartida",
		/// Missions campaign.
		Misiones => "Misiones",
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn ordinals_follow_declaration_order() {
		assert_eq!(Campaign::ALL.len(), 7);
		assert_eq!(Campaign::UnaMochiComoLaTuya.ordinal(), 0);
		assert_eq!(Campaign::Misiones.ordinal(), 6);
		assert_eq!(Campaign::from_ordinal(2), Ok(Campaign::Abrigaditos));
		assert!(Campaign::from_ordinal(7).is_err());
	}

	#[test]
	fn deserializes_from_name_or_ordinal() {
		let by_name: Campaign =
			serde_json::from_str("\"Navidemos\"").expect("Campaign name should deserialize.");
		let by_ordinal: Campaign =
			serde_json::from_str("4").expect("Campaign ordinal should deserialize.");

		assert_eq!(by_name, Campaign::Navidemos);
		assert_eq!(by_ordinal, Campaign::Navidemos);
		assert!(serde_json::from_str::<Campaign>("\"navidemos\"").is_err());
		assert!(serde_json::from_str::<Campaign>("99").is_err());
	}

	#[test]
	fn serializes_as_name() {
		let json = serde_json::to_string(&Campaign::JuntosALaPar)
			.expect("Campaign should serialize successfully.");

		assert_eq!(json, "\"JuntosALaPar\"");
		assert_eq!(Campaign::from_str("Misiones"), Ok(Campaign::Misiones));
	}
}
