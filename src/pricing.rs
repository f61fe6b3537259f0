//! Cost breakdown for a draft booking.

use serde::Serialize;

use crate::Amount;
use crate::model::{DraftBooking, ParkingType};

/// Flat parking surcharge for a two-wheeler slot.
pub const TWO_WHEELER_TARIFF: Amount = Amount::units(20);

/// Flat parking surcharge for a four-wheeler slot.
pub const FOUR_WHEELER_TARIFF: Amount = Amount::units(30);

/// Parking surcharge for the given vehicle category. Unknown or missing
/// categories are free.
pub fn parking_surcharge(parking_type: Option<&ParkingType>) -> Amount {
    match parking_type {
        Some(ParkingType::TwoWheeler) => TWO_WHEELER_TARIFF,
        Some(ParkingType::FourWheeler) => FOUR_WHEELER_TARIFF,
        Some(ParkingType::Other(_)) | None => Amount::ZERO,
    }
}

/// What the payment view shows before confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub movie_cost: Amount,
    pub parking_cost: Amount,
    pub total_amount: Amount,
}

impl CostBreakdown {
    /// Price a draft. Missing fields count as zero and sums saturate, so this
    /// never fails.
    pub fn compute(draft: &DraftBooking) -> Self {
        let movie_cost = draft.movie_cost();
        let parking_cost = parking_surcharge(draft.parking_type());
        Self {
            movie_cost,
            parking_cost,
            total_amount: movie_cost + parking_cost,
        }
    }

    /// The parking line is only shown when something is charged for it.
    pub fn shows_parking(&self) -> bool {
        !self.parking_cost.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParkingDetails;
    use serde_json::Number;

    fn draft(total_cost: Option<i64>, parking_type: Option<ParkingType>) -> DraftBooking {
        DraftBooking {
            movie: "X".to_string(),
            total_cost: total_cost.map(Number::from),
            parking_details: Some(ParkingDetails {
                parking_type,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn two_wheeler_costs_twenty() {
        let cost = CostBreakdown::compute(&draft(Some(100), Some(ParkingType::TwoWheeler)));
        assert_eq!(cost.parking_cost, Amount::units(20));
        assert_eq!(cost.total_amount, Amount::units(120));
    }

    #[test]
    fn four_wheeler_costs_thirty() {
        let cost = CostBreakdown::compute(&draft(Some(300), Some(ParkingType::FourWheeler)));
        assert_eq!(
            cost,
            CostBreakdown {
                movie_cost: Amount::units(300),
                parking_cost: Amount::units(30),
                total_amount: Amount::units(330),
            }
        );
        assert!(cost.shows_parking());
    }

    #[test]
    fn unknown_parking_type_is_free() {
        let cost = CostBreakdown::compute(&draft(
            Some(250),
            Some(ParkingType::Other("Bus".to_string())),
        ));
        assert_eq!(cost.parking_cost, Amount::ZERO);
        assert_eq!(cost.total_amount, Amount::units(250));
        assert!(!cost.shows_parking());
    }

    #[test]
    fn missing_parking_details_is_free() {
        let mut d = draft(Some(250), None);
        d.parking_details = None;
        let cost = CostBreakdown::compute(&d);
        assert_eq!(cost.parking_cost, Amount::ZERO);
        assert_eq!(cost.total_amount, Amount::units(250));
    }

    #[test]
    fn missing_total_cost_counts_as_zero() {
        let cost = CostBreakdown::compute(&draft(None, Some(ParkingType::TwoWheeler)));
        assert_eq!(cost.movie_cost, Amount::ZERO);
        assert_eq!(cost.total_amount, Amount::units(20));
    }

    #[test]
    fn huge_total_cost_saturates() {
        let mut d = draft(None, Some(ParkingType::FourWheeler));
        d.total_cost = Number::from_f64(1e20);
        let cost = CostBreakdown::compute(&d);
        assert_eq!(cost.total_amount, Amount::from_scaled(i64::MAX));
        assert_eq!(cost.total_amount.to_string(), "92233720368547758.07");

        d.total_cost = Number::from_f64(-1e20);
        let cost = CostBreakdown::compute(&d);
        assert_eq!(cost.movie_cost.to_string(), "-92233720368547758.08");
        assert_eq!(cost.total_amount, cost.movie_cost + cost.parking_cost);
    }

    #[test]
    fn total_is_always_movie_plus_parking() {
        let types = [
            None,
            Some(ParkingType::TwoWheeler),
            Some(ParkingType::FourWheeler),
            Some(ParkingType::Other(String::new())),
        ];
        for parking_type in types {
            for total in [None, Some(0), Some(1), Some(450)] {
                let cost = CostBreakdown::compute(&draft(total, parking_type.clone()));
                assert_eq!(cost.total_amount, cost.movie_cost + cost.parking_cost);
            }
        }
    }
}
