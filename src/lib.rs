pub mod amount;
pub mod api;
pub mod catalog;
pub mod config;
pub mod identity;
pub mod model;
pub mod notice;
pub mod pricing;
pub mod reconciler;
pub mod store;

pub use amount::Amount;
pub use model::{DraftBooking, Movie, ParkingDetails, ParkingType, PaymentSubmission, UserIdentity};
pub use pricing::CostBreakdown;
pub use reconciler::{BookingReconciler, SubmitError, ViewState};
