//! Payment confirmation for a draft booking.
//!
//! The reconciler takes the draft left behind by the booking flow, prices it,
//! merges it with the signed-in user and confirms it with the backend. A draft
//! is consumed by exactly one successful confirmation; a failed attempt leaves
//! it in place so the user can retry.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{info, warn};

use crate::api::BookingApi;
use crate::model::{DraftBooking, HOME_ROUTE, PaymentSubmission, UserIdentity};
use crate::notice::Notice;
use crate::pricing::CostBreakdown;
use crate::store::{DRAFT_KEY, LocalStore, StoreError, read_json};

mod state;
pub use state::{LocalParking, ViewState};

mod summary;
pub use summary::{BookingSummary, ParkingSummary};

mod error;
pub use error::{PaymentFailure, SubmitError};

/// Default bound on a confirmation round trip.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Read the draft booking left in `store`, if any.
pub fn load<S: LocalStore + ?Sized>(store: &S) -> Result<Option<DraftBooking>, StoreError> {
    read_json(store, DRAFT_KEY)
}

/// A successful confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Route to leave the payment view for.
    pub redirect: &'static str,
}

impl Confirmation {
    pub fn notice(&self) -> Notice {
        Notice::payment_confirmed()
    }
}

/// Drives one payment view over one draft.
///
/// All methods take `&self` so the view can be shared between concurrent
/// user actions; the state lock is never held across an await.
pub struct BookingReconciler<A, S> {
    api: A,
    store: S,
    draft: Option<DraftBooking>,
    parking: Mutex<LocalParking>,
    state: Mutex<ViewState>,
    timeout: Duration,
}

/// Public API
impl<A: BookingApi, S: LocalStore> BookingReconciler<A, S> {
    /// Build a view over an already loaded draft. `None` puts the view in
    /// [`ViewState::NoData`].
    pub fn new(api: A, store: S, draft: Option<DraftBooking>) -> Self {
        let (parking, state) = match &draft {
            Some(draft) => (LocalParking::from_draft(draft), ViewState::Idle),
            None => (LocalParking::default(), ViewState::NoData),
        };
        Self {
            api,
            store,
            draft,
            parking: Mutex::new(parking),
            state: Mutex::new(state),
            timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    /// Load the draft from `store` and build a view over it.
    pub fn open(api: A, store: S) -> Result<Self, StoreError> {
        let draft = load(&store)?;
        if draft.is_none() {
            info!("no booking data found");
        }
        Ok(Self::new(api, store, draft))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn state(&self) -> ViewState {
        *self.lock_state()
    }

    pub fn draft(&self) -> Option<&DraftBooking> {
        self.draft.as_ref()
    }

    /// Cost breakdown, or `None` when there is no draft to price.
    pub fn cost(&self) -> Option<CostBreakdown> {
        self.draft.as_ref().map(CostBreakdown::compute)
    }

    pub fn summary(&self) -> Option<BookingSummary> {
        let parking = self.lock_parking();
        self.draft
            .as_ref()
            .map(|draft| BookingSummary::new(draft, &parking))
    }

    pub fn vehicle_number(&self) -> String {
        self.lock_parking().vehicle_number.clone()
    }

    /// Edit the vehicle number sent with the next submission.
    pub fn set_vehicle_number(&self, value: impl Into<String>) {
        self.lock_parking().vehicle_number = value.into();
    }

    /// Dismiss a failure so the user can try again.
    pub fn acknowledge(&self) {
        let mut state = self.lock_state();
        if *state == ViewState::Failed {
            *state = ViewState::Idle;
        }
    }

    /// Confirm the draft for `identity`.
    ///
    /// Issues at most one request per call and never more than one at a
    /// time: a call made while another is pending is rejected with
    /// [`SubmitError::InFlight`]. On success the stored draft is deleted.
    pub async fn submit(
        &self,
        identity: Option<&UserIdentity>,
    ) -> Result<Confirmation, SubmitError> {
        if let Some(err) = refusal(self.state()) {
            return Err(err);
        }
        let draft = self.draft.as_ref().ok_or(SubmitError::NoBookingData)?;
        let identity = identity.ok_or(SubmitError::NotAuthenticated)?;
        let in_flight = self.begin()?;

        let submission = PaymentSubmission::assemble(draft, identity, &self.vehicle_number());
        let result = self.confirm(&submission).await;

        match result {
            Ok(()) => {
                in_flight.finish(ViewState::Confirmed);
                // payment went through; a stale draft is only a nuisance
                if let Err(e) = self.store.remove(DRAFT_KEY) {
                    warn!(reason = %e, "could not delete confirmed booking data");
                }
                info!(
                    movie = %draft.movie,
                    seats = draft.seats.len(),
                    email = %identity.email,
                    "payment confirmed"
                );
                Ok(Confirmation {
                    redirect: HOME_ROUTE,
                })
            }
            Err(failure) => {
                in_flight.finish(ViewState::Failed);
                warn!(
                    movie = %draft.movie,
                    email = %identity.email,
                    reason = %failure,
                    "payment failed"
                );
                Err(failure.into())
            }
        }
    }
}

/// Private API
impl<A: BookingApi, S: LocalStore> BookingReconciler<A, S> {
    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_parking(&self) -> MutexGuard<'_, LocalParking> {
        self.parking.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `Submitting`, or explain why a submission cannot start.
    fn begin(&self) -> Result<InFlight<'_>, SubmitError> {
        let mut state = self.lock_state();
        if let Some(err) = refusal(*state) {
            return Err(err);
        }
        *state = ViewState::Submitting;
        Ok(InFlight {
            state: &self.state,
            finished: false,
        })
    }

    /// One request, bounded by the configured timeout. Only status 200 counts
    /// as confirmed.
    async fn confirm(&self, submission: &PaymentSubmission) -> Result<(), PaymentFailure> {
        match tokio::time::timeout(self.timeout, self.api.confirm_payment(submission)).await {
            Ok(Ok(200)) => Ok(()),
            Ok(Ok(status)) => Err(PaymentFailure::Rejected(status)),
            Ok(Err(e)) => Err(PaymentFailure::Transport(e)),
            Err(_) => Err(PaymentFailure::Timeout(self.timeout)),
        }
    }
}

/// Why a view in `state` cannot start a submission, if it cannot.
fn refusal(state: ViewState) -> Option<SubmitError> {
    if state.can_submit() {
        return None;
    }
    Some(match state {
        ViewState::Submitting => SubmitError::InFlight,
        ViewState::Confirmed => SubmitError::AlreadyConfirmed,
        _ => SubmitError::NoBookingData,
    })
}

/// Marks the view as submitting. If the submission future is dropped before
/// it resolves, the view goes back to `Idle`.
struct InFlight<'a> {
    state: &'a Mutex<ViewState>,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(mut self, next: ViewState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = ViewState::Idle;
        }
    }
}
