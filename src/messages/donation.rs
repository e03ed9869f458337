//! Donation lifecycle events.

// crates.io
use rust_decimal::Decimal;
use serde::{Serializer, ser::Error as _};
use serde_json::value::RawValue;
use uuid::Uuid;
// self
use crate::{
	_prelude::*,
	messages::{Campaign, Currency},
};

/// Published when a donation is attributed to a campaign.
///
/// Field order is part of the wire contract. Optional identifiers are always written (as `null`
/// when absent) so every producer emits the same shape; readers treat missing optional fields
/// as `None` and ignore fields they do not recognize. `amount` is written as a JSON number with
/// every digit of its decimal representation, and read from either a number or a string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationAddedToCampaign {
	/// Identifier of the donation.
	pub donation_id: Uuid,
	/// Donor that made the donation, when known.
	#[serde(default)]
	pub donor_id: Option<i32>,
	/// Campaign participant the donation is attributed to, when known.
	#[serde(default)]
	pub participant_id: Option<i32>,
	/// Identifier of the campaign edition.
	pub campaign_id: i32,
	/// Campaign the edition belongs to.
	pub campaign: Campaign,
	/// Donated amount, expressed in [`currency`](Self::currency).
	#[serde(serialize_with = "serialize_amount")]
	pub amount: Decimal,
	/// Currency of [`amount`](Self::amount).
	pub currency: Currency,
}
impl DonationAddedToCampaign {
	/// Stable message name used for routing on the messaging infrastructure.
	pub const MESSAGE_TYPE: &'static str = "DonationAddedToCampaign";

	/// Creates an event without donor or participant attribution.
	pub fn new(
		donation_id: Uuid,
		campaign_id: i32,
		campaign: Campaign,
		amount: Decimal,
		currency: Currency,
	) -> Self {
		Self {
			donation_id,
			donor_id: None,
			participant_id: None,
			campaign_id,
			campaign,
			amount,
			currency,
		}
	}

	/// Attributes the donation to a donor.
	pub fn with_donor(mut self, donor_id: i32) -> Self {
		self.donor_id = Some(donor_id);

		self
	}

	/// Attributes the donation to a campaign participant.
	pub fn with_participant(mut self, participant_id: i32) -> Self {
		self.participant_id = Some(participant_id);

		self
	}
}

fn serialize_amount<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	RawValue::from_string(amount.to_string()).map_err(S::Error::custom)?.serialize(serializer)
}
