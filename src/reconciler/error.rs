//! Error types for payment confirmation.

use std::time::Duration;

use thiserror::Error;

use crate::api::ApiError;
use crate::notice::Notice;

/// Top-level error returned by [`BookingReconciler::submit`](super::BookingReconciler::submit).
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no booking data loaded")]
    NoBookingData,

    #[error("user is not signed in")]
    NotAuthenticated,

    #[error("a payment confirmation is already in flight")]
    InFlight,

    #[error("booking has already been confirmed")]
    AlreadyConfirmed,

    #[error("payment failed: {0}")]
    PaymentFailed(#[from] PaymentFailure),
}

/// Why a confirmation request did not succeed. The draft is kept in every case.
#[derive(Debug, Error)]
pub enum PaymentFailure {
    #[error("confirmation rejected with status {0}")]
    Rejected(u16),

    #[error("{0}")]
    Transport(#[from] ApiError),

    #[error("no answer within {0:?}")]
    Timeout(Duration),
}

impl SubmitError {
    /// The dialog shown for this error. Requests that are simply ignored
    /// (a second click while processing) get none.
    pub fn notice(&self) -> Option<Notice> {
        let notice = match self {
            SubmitError::NoBookingData => Notice::error(
                "No booking data!",
                "There was an issue fetching your booking data. Please try again.",
            ),
            SubmitError::NotAuthenticated => Notice::error(
                "User not logged in!",
                "Please log in to complete the payment.",
            ),
            SubmitError::PaymentFailed(PaymentFailure::Rejected(_)) => Notice::error(
                "Payment Failed!",
                "There was an error processing your payment. Please try again.",
            ),
            SubmitError::PaymentFailed(_) => Notice::error(
                "Payment Failed!",
                "An error occurred while processing the payment.",
            ),
            SubmitError::InFlight | SubmitError::AlreadyConfirmed => return None,
        };
        Some(notice)
    }
}
