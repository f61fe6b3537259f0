use std::fmt;

use crate::model::{DraftBooking, or_not_applicable};
use crate::pricing::CostBreakdown;

use super::state::LocalParking;

/// Parking lines of the booking summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSummary {
    pub two_wheeler_slot: String,
    pub four_wheeler_slot: String,
    pub two_wheeler_vehicles: String,
    pub four_wheeler_vehicles: String,
}

/// Everything the payment view shows for a loaded draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingSummary {
    pub movie: String,
    pub screen: String,
    pub timing: String,
    pub seats: String,
    pub parking: Option<ParkingSummary>,
    pub cost: CostBreakdown,
}

impl BookingSummary {
    pub fn new(draft: &DraftBooking, parking: &LocalParking) -> Self {
        let parking_summary = draft.parking_details.as_ref().map(|details| {
            let numbers = details.vehicle_numbers.clone().unwrap_or_default();
            ParkingSummary {
                two_wheeler_slot: parking.selected_slot.two_wheeler().to_string(),
                four_wheeler_slot: parking.selected_slot.four_wheeler().to_string(),
                two_wheeler_vehicles: join_or_not_applicable(&numbers.two_wheeler),
                four_wheeler_vehicles: join_or_not_applicable(&numbers.four_wheeler),
            }
        });

        Self {
            movie: draft.movie.clone(),
            screen: draft.screen.clone(),
            timing: draft.timing.clone(),
            seats: draft.seats.join(", "),
            parking: parking_summary,
            cost: CostBreakdown::compute(draft),
        }
    }
}

fn join_or_not_applicable(values: &[String]) -> String {
    let joined = values.join(", ");
    or_not_applicable(Some(joined.as_str())).to_string()
}

impl fmt::Display for BookingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Booking Details")?;
        writeln!(f, "Movie Title: {}", self.movie)?;
        writeln!(f, "Screen: {}", self.screen)?;
        writeln!(f, "Show Timing: {}", self.timing)?;
        writeln!(f, "Selected Seats: {}", self.seats)?;

        if let Some(parking) = &self.parking {
            writeln!(f, "Parking Details")?;
            writeln!(f, "Two-Wheeler Slot: {}", parking.two_wheeler_slot)?;
            writeln!(f, "Four-Wheeler Slot: {}", parking.four_wheeler_slot)?;
            writeln!(f, "Two-Wheeler Vehicle Numbers: {}", parking.two_wheeler_vehicles)?;
            writeln!(f, "Four-Wheeler Vehicle Numbers: {}", parking.four_wheeler_vehicles)?;
        }

        writeln!(f, "Cost Breakdown")?;
        writeln!(f, "Movie Seat Cost: ${}", self.cost.movie_cost)?;
        if self.cost.shows_parking() {
            writeln!(f, "Parking Cost: ${}", self.cost.parking_cost)?;
        }
        write!(f, "Total Amount: ${}", self.cost.total_amount)
    }
}
