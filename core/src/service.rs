//! High-level operations: search, fetch, auth, health.
//!
//! # Design
//! `LodgingService` is the explicit store object handed to the presentation
//! layer: it owns the stateless client, the transport (already wrapped in
//! the cold-start retry), the session store, and the "last results" slot.
//! Each operation runs build → send → parse; the bearer credential is
//! attached in exactly one place (`send`).
//!
//! Failure policy: auth and health errors propagate untouched. Search and
//! fetch substitute fallback data after the transport (including its one
//! retry) has given up, and the original error rides along in the outcome
//! so the caller can tell the user the data is not live.
//!
//! Operations take `&mut self`, so a second search cannot start before the
//! first resolves; the last-response-wins race of concurrent searches is
//! ruled out by construction.

use tracing::{debug, warn};

use crate::client::LodgingClient;
use crate::error::ApiError;
use crate::fallback;
use crate::http::{HttpRequest, HttpResponse};
use crate::retry::ColdStartRetry;
use crate::session::{Session, SessionStore, TokenStore};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Accommodation, Credentials, SearchParams, SignupProfile};

/// Result of a search: the records to display, plus the error that forced
/// degraded mode when the data is not live.
#[derive(Debug)]
pub struct SearchOutcome {
    pub accommodations: Vec<Accommodation>,
    pub degraded: Option<ApiError>,
}

impl SearchOutcome {
    pub fn is_live(&self) -> bool {
        self.degraded.is_none()
    }
}

/// Result of a single-record fetch, with the same degraded-mode marker.
#[derive(Debug)]
pub struct FetchOutcome {
    pub accommodation: Accommodation,
    pub degraded: Option<ApiError>,
}

/// Client-side access layer for the lodging API.
pub struct LodgingService<T: Transport, S: TokenStore> {
    client: LodgingClient,
    transport: T,
    session: SessionStore<S>,
    last_results: Vec<Accommodation>,
}

impl<S: TokenStore> LodgingService<ColdStartRetry<UreqTransport>, S> {
    /// Production service: ureq transport behind the cold-start retry. Any
    /// token left in `storage` by a previous run is restored into the
    /// bearer slot (unvalidated; the session stays anonymous).
    pub fn new(base_url: &str, storage: S) -> Self {
        Self::with_transport(base_url, ColdStartRetry::new(UreqTransport::new()), storage)
    }
}

impl<T: Transport, S: TokenStore> LodgingService<T, S> {
    pub fn with_transport(base_url: &str, transport: T, storage: S) -> Self {
        let mut session = SessionStore::new(storage);
        session.restore();
        Self {
            client: LodgingClient::new(base_url),
            transport,
            session,
            last_results: Vec::new(),
        }
    }

    pub fn health_check(&self) -> Result<serde_json::Value, ApiError> {
        let response = self.send(self.client.build_health())?;
        self.client.parse_health(response)
    }

    /// Authenticate. On success the token and user record are committed
    /// together; on any failure the prior session is left untouched.
    pub fn login(&mut self, credentials: &Credentials) -> Result<&Session, ApiError> {
        let response = self.send(self.client.build_login(credentials)?)?;
        let auth = self.client.parse_login(response)?;
        debug!(email = %auth.user.email, "login succeeded");
        Ok(self.session.establish(auth))
    }

    /// Register a new account. Same commit discipline as `login`.
    pub fn signup(&mut self, profile: &SignupProfile) -> Result<&Session, ApiError> {
        let response = self.send(self.client.build_signup(profile)?)?;
        let auth = self.client.parse_signup(response)?;
        debug!(email = %auth.user.email, "signup succeeded");
        Ok(self.session.establish(auth))
    }

    /// Drop the session and the stored token. Idempotent.
    pub fn logout(&mut self) {
        self.session.clear();
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.session.current()
    }

    /// Search accommodations. A live result replaces the "last results" slot
    /// wholesale. When the call fails after the single cold-start retry,
    /// the sample set is filtered by the destination text and substituted,
    /// and the error is surfaced alongside it.
    pub fn search(&mut self, params: &SearchParams) -> SearchOutcome {
        match self.live_search(params) {
            Ok(accommodations) => {
                self.last_results = accommodations.clone();
                SearchOutcome {
                    accommodations,
                    degraded: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "search failed, substituting sample data");
                let accommodations = fallback::degraded_search(params.city.as_deref());
                self.last_results = accommodations.clone();
                SearchOutcome {
                    accommodations,
                    degraded: Some(err),
                }
            }
        }
    }

    /// Parameterless search used on startup to populate the first screen.
    pub fn load_initial(&mut self) -> SearchOutcome {
        self.search(&SearchParams::default())
    }

    /// Fetch one accommodation by id. When the live call fails, the last
    /// live results are consulted first, then the sample set; a miss in both
    /// is `NotFoundLocal`.
    pub fn accommodation(&self, id: u64) -> Result<FetchOutcome, ApiError> {
        match self.live_fetch(id) {
            Ok(accommodation) => Ok(FetchOutcome {
                accommodation,
                degraded: None,
            }),
            Err(err) => {
                warn!(id, error = %err, "fetch failed, trying local data");
                let accommodation = fallback::degraded_lookup(id, &self.last_results)?;
                Ok(FetchOutcome {
                    accommodation,
                    degraded: Some(err),
                })
            }
        }
    }

    pub fn last_results(&self) -> &[Accommodation] {
        &self.last_results
    }

    fn live_search(&self, params: &SearchParams) -> Result<Vec<Accommodation>, ApiError> {
        let response = self.send(self.client.build_search(params))?;
        self.client.parse_search(response)
    }

    fn live_fetch(&self, id: u64) -> Result<Accommodation, ApiError> {
        let response = self.send(self.client.build_accommodation(id))?;
        self.client.parse_accommodation(response)
    }

    /// Single bearer-attachment site: every outgoing request passes through
    /// here.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = match self.session.bearer() {
            Some(token) => request.with_bearer(token),
            None => request,
        };
        self.transport.execute(&request)
    }
}
