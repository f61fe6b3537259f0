//! Current-user session and the Google sign-in exchange.
//!
//! The identity provider's own popup/redirect protocol is out of reach here;
//! it is consumed through [`IdentityProvider`], which only has to hand back
//! the profile it obtained.

use std::error::Error as StdError;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiError, BookingApi};
use crate::model::{HOME_ROUTE, UserIdentity};
use crate::notice::Notice;
use crate::store::{LocalStore, SESSION_KEY, StoreError, read_json, write_json};

/// Profile returned by the identity provider after a successful popup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Body of `POST /api/auth/google`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoogleExchange {
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
}

impl From<ProviderProfile> for GoogleExchange {
    fn from(profile: ProviderProfile) -> Self {
        Self {
            name: profile.display_name,
            email: profile.email,
            photo: profile.photo_url,
        }
    }
}

/// User record issued by the backend. Only `email` is interpreted; the rest
/// is kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl SessionUser {
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity provider failed: {0}")]
    Provider(#[source] Box<dyn StdError + Send + Sync>),

    #[error("auth exchange failed: {0}")]
    Exchange(#[from] ApiError),

    #[error("could not store session: {0}")]
    Session(#[from] StoreError),
}

impl AuthError {
    pub fn notice(&self) -> Notice {
        Notice::error(
            "Sign-in failed!",
            "Could not log in with Google. Please try again.",
        )
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_popup(&self) -> Result<ProviderProfile, Box<dyn StdError + Send + Sync>>;
}

/// Provider that returns a profile obtained out of band, e.g. passed on the
/// command line.
#[derive(Debug, Clone)]
pub struct PresetProfile(pub ProviderProfile);

#[async_trait]
impl IdentityProvider for PresetProfile {
    async fn sign_in_with_popup(&self) -> Result<ProviderProfile, Box<dyn StdError + Send + Sync>> {
        if self.0.email.is_none() {
            return Err("profile has no email".into());
        }
        Ok(self.0.clone())
    }
}

/// The signed-in user, persisted across runs.
///
/// Initialised on sign-in, cleared on sign-out.
#[derive(Debug, Clone)]
pub struct Session<S> {
    store: S,
}

impl<S: LocalStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn current(&self) -> Result<Option<SessionUser>, StoreError> {
        read_json(&self.store, SESSION_KEY)
    }

    pub fn identity(&self) -> Result<Option<UserIdentity>, StoreError> {
        Ok(self.current()?.as_ref().map(SessionUser::identity))
    }

    pub fn sign_in(&self, user: &SessionUser) -> Result<(), StoreError> {
        write_json(&self.store, SESSION_KEY, user)
    }

    pub fn sign_out(&self) -> Result<(), StoreError> {
        self.store.remove(SESSION_KEY)
    }
}

/// Run the provider popup, exchange the profile with the backend and start a
/// session. Returns the route to navigate to.
///
/// Failures are logged and returned; the caller decides how to show them.
pub async fn sign_in_with_google<P, A, S>(
    provider: &P,
    api: &A,
    session: &Session<S>,
) -> Result<&'static str, AuthError>
where
    P: IdentityProvider + ?Sized,
    A: BookingApi + ?Sized,
    S: LocalStore,
{
    let result = exchange(provider, api, session).await;
    if let Err(e) = &result {
        warn!(reason = %e, "could not login with google");
    }
    result
}

async fn exchange<P, A, S>(
    provider: &P,
    api: &A,
    session: &Session<S>,
) -> Result<&'static str, AuthError>
where
    P: IdentityProvider + ?Sized,
    A: BookingApi + ?Sized,
    S: LocalStore,
{
    let profile = provider
        .sign_in_with_popup()
        .await
        .map_err(AuthError::Provider)?;
    let user = api.exchange_google(&profile.into()).await?;
    session.sign_in(&user)?;
    info!(email = %user.email, "signed in");
    Ok(HOME_ROUTE)
}
