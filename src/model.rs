//! Core domain types for the booking client.
//!
//! Field names follow the JSON records exchanged with local storage and the
//! backend (camelCase). Unknown keys on a draft are kept in `extra` so that a
//! submission carries everything the upstream booking flow wrote.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::Amount;

/// Route the client navigates to after sign-in or a confirmed payment.
pub const HOME_ROUTE: &str = "/";

/// Placeholder shown for an unset parking slot or vehicle list.
pub const NOT_APPLICABLE: &str = "N/A";

/// Vehicle category a parking slot was booked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParkingType {
    TwoWheeler,
    FourWheeler,
    /// Any label the tariff does not know about.
    Other(String),
}

impl From<String> for ParkingType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Two-Wheeler" => ParkingType::TwoWheeler,
            "Four-Wheeler" => ParkingType::FourWheeler,
            _ => ParkingType::Other(value),
        }
    }
}

impl From<ParkingType> for String {
    fn from(value: ParkingType) -> Self {
        match value {
            ParkingType::TwoWheeler => "Two-Wheeler".to_string(),
            ParkingType::FourWheeler => "Four-Wheeler".to_string(),
            ParkingType::Other(label) => label,
        }
    }
}

/// Slot identifiers per vehicle category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_wheeler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub four_wheeler: Option<String>,
}

impl SelectedSlot {
    pub fn two_wheeler(&self) -> &str {
        or_not_applicable(self.two_wheeler.as_deref())
    }

    pub fn four_wheeler(&self) -> &str {
        or_not_applicable(self.four_wheeler.as_deref())
    }
}

/// Registered vehicle numbers per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleNumbers {
    #[serde(default, deserialize_with = "null_as_default")]
    pub two_wheeler: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub four_wheeler: Vec<String>,
}

/// Optional parking add-on of a draft booking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_type: Option<ParkingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_slot: Option<SelectedSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_numbers: Option<VehicleNumbers>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The in-progress reservation persisted locally before payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftBooking {
    #[serde(default, deserialize_with = "null_as_default")]
    pub movie: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screen: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timing: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seats: Vec<String>,
    /// Kept as written so the submission forwards it untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_details: Option<ParkingDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DraftBooking {
    /// Precomputed seat cost, 0 when the draft has none.
    pub fn movie_cost(&self) -> Amount {
        self.total_cost
            .as_ref()
            .and_then(Number::as_f64)
            .map(Amount::from_float)
            .unwrap_or_default()
    }

    pub fn parking_type(&self) -> Option<&ParkingType> {
        self.parking_details.as_ref()?.parking_type.as_ref()
    }
}

/// The signed-in user as far as payment is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub email: String,
}

/// A draft merged with the paying user, ready to be confirmed.
///
/// Only lives for the duration of one confirmation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    #[serde(flatten)]
    pub booking: DraftBooking,
    pub user_email: String,
}

impl PaymentSubmission {
    /// Merge `draft` with `identity`, replacing the parking vehicle number with
    /// the locally edited one. A draft without parking details still gets a
    /// `parkingDetails` record holding the vehicle number.
    pub fn assemble(draft: &DraftBooking, identity: &UserIdentity, vehicle_number: &str) -> Self {
        let mut booking = draft.clone();
        booking.extra.remove("userEmail");

        let parking = booking.parking_details.get_or_insert_with(ParkingDetails::default);
        parking.vehicle_number = Some(vehicle_number.to_string());

        Self {
            booking,
            user_email: identity.email.clone(),
        }
    }
}

/// A catalog entry as served by `GET /api/movies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub cast: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub ratings: Option<f64>,
    #[serde(default)]
    pub votes: Option<u64>,
    #[serde(default)]
    pub screen: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub timing: String,
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn or_not_applicable(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_APPLICABLE,
    }
}
