//! Credential broker: sign-in, code exchange, single-flight refresh, and sign-out.

pub mod authorization;
pub mod refresh;

pub(crate) mod common;

pub use refresh::*;

// self
use crate::{
	_prelude::*,
	flows::common::RefreshState,
	http::HttpTransport,
	oauth::TokenEndpointFacade,
	provider::ServiceDescriptor,
	store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

/// Broker specialized for the crate's default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestBroker = Broker<ReqwestHttpClient>;

/// Sole authority over the credential lifecycle.
///
/// The broker owns the HTTP transport, the token store, and the service descriptor, and
/// serializes refreshes so that any number of concurrent callers trigger at most one
/// network refresh. Share it behind an `Arc`.
pub struct Broker<C>
where
	C: ?Sized + HttpTransport,
{
	/// HTTP transport used for token endpoint calls and catalog requests.
	pub http_client: Arc<C>,
	/// Credential persistence.
	pub store: TokenStore,
	/// Endpoints, redirect URI, and scopes.
	pub descriptor: ServiceDescriptor,
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret, sent with HTTP Basic authentication when present.
	pub client_secret: Option<String>,
	/// Counters for network refresh attempts.
	pub refresh_metrics: Arc<RefreshMetrics>,
	refresh_state: Arc<Mutex<RefreshState>>,
}
impl<C> Broker<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(
		store: TokenStore,
		descriptor: ServiceDescriptor,
		client_id: impl Into<String>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			store,
			descriptor,
			client_id: client_id.into(),
			client_secret: None,
			refresh_metrics: Default::default(),
			refresh_state: Default::default(),
		}
	}

	/// Sets or replaces the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Returns `true` while a refresh is in flight.
	pub fn is_refreshing(&self) -> bool {
		self.refresh_state.lock().is_refreshing()
	}

	pub(crate) fn token_endpoint(&self) -> TokenEndpointFacade<C> {
		TokenEndpointFacade::from_descriptor(
			&self.descriptor,
			&self.client_id,
			self.client_secret.as_deref(),
			self.http_client.clone(),
		)
	}
}
#[cfg(feature = "reqwest")]
impl Broker<ReqwestHttpClient> {
	/// Creates a broker with its own reqwest-backed transport that never follows redirects.
	pub fn new(
		store: TokenStore,
		descriptor: ServiceDescriptor,
		client_id: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(store, descriptor, client_id, ReqwestHttpClient::new()?))
	}
}
impl<C> Debug for Broker<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("descriptor", &self.descriptor)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("refreshing", &self.is_refreshing())
			.finish()
	}
}
