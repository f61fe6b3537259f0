use crate::model::{DraftBooking, SelectedSlot};

/// Where the payment view is in its lifecycle.
///
/// `NoData` and `Confirmed` are terminal for the loaded draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No draft was found; the breakdown is hidden and payment disabled.
    NoData,
    Idle,
    Submitting,
    Confirmed,
    /// Last attempt failed; waiting for the user to acknowledge or retry.
    Failed,
}

impl ViewState {
    pub fn can_submit(&self) -> bool {
        matches!(self, ViewState::Idle | ViewState::Failed)
    }
}

/// Parking fields the user may see or edit before paying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalParking {
    pub selected_slot: SelectedSlot,
    pub vehicle_number: String,
}

impl LocalParking {
    pub fn from_draft(draft: &DraftBooking) -> Self {
        let Some(details) = &draft.parking_details else {
            return Self::default();
        };
        Self {
            selected_slot: details.selected_slot.clone().unwrap_or_default(),
            vehicle_number: details.vehicle_number.clone().unwrap_or_default(),
        }
    }
}
