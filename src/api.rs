//! Backend calls made by the client.
//!
//! Every path lives under the `/api` prefix and is forwarded to a single
//! backend base URL, the way the development proxy routes them.

use std::error::Error as StdError;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::identity::{GoogleExchange, SessionUser};
use crate::model::{Movie, PaymentSubmission};

pub const API_PREFIX: &str = "/api";
pub const CONFIRM_PAYMENT_PATH: &str = "/confirm-payment";
pub const GOOGLE_AUTH_PATH: &str = "/auth/google";
pub const MOVIES_PATH: &str = "/movies";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("{path} answered with status {status}")]
    Status { path: &'static str, status: u16 },

    #[error("{path} returned an unreadable body: {source}")]
    Decode {
        path: &'static str,
        source: serde_json::Error,
    },
}

/// Body of `POST /api/confirm-payment`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPayment<'a> {
    pub booking_data: &'a PaymentSubmission,
}

#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Post a submission and return the raw HTTP status. Interpreting the
    /// status is left to the caller.
    async fn confirm_payment(&self, submission: &PaymentSubmission) -> Result<u16, ApiError>;

    /// Trade a provider profile for the backend's user record.
    async fn exchange_google(&self, profile: &GoogleExchange) -> Result<SessionUser, ApiError>;

    async fn movies(&self) -> Result<Vec<Movie>, ApiError>;
}

/// [`BookingApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Full URL for a path below the `/api` prefix.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    async fn read_json<T: DeserializeOwned>(
        path: &'static str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path,
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await.map_err(transport(path))?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { path, source })
    }
}

fn transport(path: &'static str) -> impl FnOnce(reqwest::Error) -> ApiError {
    move |e| ApiError::Transport {
        path,
        source: Box::new(e),
    }
}

#[async_trait]
impl BookingApi for HttpApi {
    async fn confirm_payment(&self, submission: &PaymentSubmission) -> Result<u16, ApiError> {
        let url = self.endpoint(CONFIRM_PAYMENT_PATH);
        debug!(%url, "posting payment confirmation");
        let response = self
            .client
            .post(url)
            .json(&ConfirmPayment {
                booking_data: submission,
            })
            .send()
            .await
            .map_err(transport(CONFIRM_PAYMENT_PATH))?;
        Ok(response.status().as_u16())
    }

    async fn exchange_google(&self, profile: &GoogleExchange) -> Result<SessionUser, ApiError> {
        let response = self
            .client
            .post(self.endpoint(GOOGLE_AUTH_PATH))
            .json(profile)
            .send()
            .await
            .map_err(transport(GOOGLE_AUTH_PATH))?;
        Self::read_json(GOOGLE_AUTH_PATH, response).await
    }

    async fn movies(&self) -> Result<Vec<Movie>, ApiError> {
        let response = self
            .client
            .get(self.endpoint(MOVIES_PATH))
            .send()
            .await
            .map_err(transport(MOVIES_PATH))?;
        Self::read_json(MOVIES_PATH, response).await
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::Value;

    use super::*;

    /// How the mock answers a payment confirmation.
    #[derive(Debug, Clone, Copy)]
    pub enum Reply {
        Status(u16),
        Unreachable,
    }

    struct Inner {
        reply: Mutex<Reply>,
        latency: Mutex<Duration>,
        confirm_calls: AtomicUsize,
        bodies: Mutex<Vec<Value>>,
        movies: Mutex<Vec<Movie>>,
        user: Mutex<Option<SessionUser>>,
        exchanges: Mutex<Vec<GoogleExchange>>,
    }

    /// Scripted backend. Clones share state, so a test can keep a handle
    /// while the code under test owns another.
    #[derive(Clone)]
    pub struct MockApi {
        inner: Arc<Inner>,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self {
                inner: Arc::new(Inner {
                    reply: Mutex::new(Reply::Status(200)),
                    latency: Mutex::new(Duration::ZERO),
                    confirm_calls: AtomicUsize::new(0),
                    bodies: Mutex::new(Vec::new()),
                    movies: Mutex::new(Vec::new()),
                    user: Mutex::new(None),
                    exchanges: Mutex::new(Vec::new()),
                }),
            }
        }

        pub fn reply(self, reply: Reply) -> Self {
            *self.inner.reply.lock().unwrap() = reply;
            self
        }

        pub fn latency(self, latency: Duration) -> Self {
            *self.inner.latency.lock().unwrap() = latency;
            self
        }

        pub fn movies(self, movies: Vec<Movie>) -> Self {
            *self.inner.movies.lock().unwrap() = movies;
            self
        }

        pub fn user(self, user: SessionUser) -> Self {
            *self.inner.user.lock().unwrap() = Some(user);
            self
        }

        pub fn set_reply(&self, reply: Reply) {
            *self.inner.reply.lock().unwrap() = reply;
        }

        pub fn confirm_calls(&self) -> usize {
            self.inner.confirm_calls.load(Ordering::SeqCst)
        }

        /// Request bodies as they would go over the wire.
        pub fn bodies(&self) -> Vec<Value> {
            self.inner.bodies.lock().unwrap().clone()
        }

        pub fn exchanges(&self) -> Vec<GoogleExchange> {
            self.inner.exchanges.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BookingApi for MockApi {
        async fn confirm_payment(&self, submission: &PaymentSubmission) -> Result<u16, ApiError> {
            self.inner.confirm_calls.fetch_add(1, Ordering::SeqCst);
            let body = serde_json::to_value(ConfirmPayment {
                booking_data: submission,
            })
            .unwrap();
            self.inner.bodies.lock().unwrap().push(body);

            let latency = *self.inner.latency.lock().unwrap();
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }

            let reply = *self.inner.reply.lock().unwrap();
            match reply {
                Reply::Status(status) => Ok(status),
                Reply::Unreachable => Err(ApiError::Transport {
                    path: CONFIRM_PAYMENT_PATH,
                    source: "connection refused".into(),
                }),
            }
        }

        async fn exchange_google(
            &self,
            profile: &GoogleExchange,
        ) -> Result<SessionUser, ApiError> {
            self.inner.exchanges.lock().unwrap().push(profile.clone());
            self.inner
                .user
                .lock()
                .unwrap()
                .clone()
                .ok_or(ApiError::Status {
                    path: GOOGLE_AUTH_PATH,
                    status: 500,
                })
        }

        async fn movies(&self) -> Result<Vec<Movie>, ApiError> {
            Ok(self.inner.movies.lock().unwrap().clone())
        }
    }
}
