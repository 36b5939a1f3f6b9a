//! Music catalog client core: OAuth token lifecycle with single-flight refresh, an
//! authenticated request pipeline with response caching, and typed catalog endpoints.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod callback;
pub mod catalog;
pub mod connectivity;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod pipeline;
pub mod provider;
pub mod store;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::CredentialRecord,
		catalog::CatalogClient,
		connectivity::{ConnectivityMonitor, InterfaceKind, PathStatus},
		flows::Broker,
		http::ReqwestHttpClient,
		pipeline::{RequestExecutor, ResponseCache},
		provider::ServiceDescriptor,
		store::{KeyValueStore, MemoryStore, TokenStore},
	};

	/// Broker type alias used by reqwest-backed integration tests.
	pub type ReqwestTestBroker = Broker<ReqwestHttpClient>;

	/// Redirect URI registered by every test descriptor.
	pub const TEST_REDIRECT_URI: &str = "https://app.example.com/callback";

	/// Fully wired client stack pointed at a mock server.
	pub struct TestStack {
		/// Credential broker backed by [`TestStack::memory`].
		pub broker: Arc<ReqwestTestBroker>,
		/// Raw key-value backend behind the broker's token store.
		pub memory: Arc<MemoryStore>,
		/// Connectivity monitor shared by the executor; starts as reachable over Wi-Fi.
		pub connectivity: Arc<ConnectivityMonitor>,
		/// Response cache shared by the executor.
		pub cache: Arc<ResponseCache>,
		/// Request pipeline.
		pub executor: Arc<RequestExecutor<ReqwestHttpClient>>,
		/// Catalog client built on [`TestStack::executor`].
		pub catalog: Arc<CatalogClient<ReqwestHttpClient>>,
	}

	/// Builds a non-redirecting reqwest HTTP client that tolerates the self-signed
	/// certificates some mock servers produce.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a descriptor whose endpoints all live under `base` (e.g. `http://127.0.0.1:port`).
	pub fn test_descriptor(base: &str) -> ServiceDescriptor {
		let parse = |path: &str| {
			Url::parse(&format!("{base}{path}")).expect("Failed to parse mock endpoint URL.")
		};

		ServiceDescriptor::builder()
			.authorization_endpoint(parse("/authorize"))
			.token_endpoint(parse("/api/token"))
			.api_base(parse("/v1"))
			.redirect_uri(Url::parse(TEST_REDIRECT_URI).expect("Failed to parse test redirect URI."))
			.scopes(["user-read-private", "playlist-modify-public", "user-library-read"])
			.build()
			.expect("Test descriptor should pass validation.")
	}

	/// Wires a broker, executor, and catalog client around an in-memory token store.
	pub fn build_reqwest_test_stack(
		descriptor: ServiceDescriptor,
		client_id: &str,
		client_secret: &str,
	) -> TestStack {
		let memory = Arc::new(MemoryStore::default());
		let backend: Arc<dyn KeyValueStore> = memory.clone();
		let broker = Arc::new(
			Broker::with_http_client(
				TokenStore::new(backend),
				descriptor,
				client_id,
				test_reqwest_http_client(),
			)
			.with_client_secret(client_secret),
		);
		let connectivity = Arc::new(ConnectivityMonitor::with_status(PathStatus::satisfied(
			InterfaceKind::Wifi,
		)));
		let cache = Arc::new(ResponseCache::default());
		let executor =
			Arc::new(RequestExecutor::new(broker.clone(), connectivity.clone(), cache.clone()));
		let catalog = Arc::new(CatalogClient::new(executor.clone()));

		TestStack { broker, memory, connectivity, cache, executor, catalog }
	}

	/// Writes a credential triple that expires `expires_in` from now.
	pub fn seed_credentials(
		store: &TokenStore,
		access: &str,
		refresh: Option<&str>,
		expires_in: Duration,
	) {
		let mut builder = CredentialRecord::builder().access_token(access).expires_in(expires_in);

		if let Some(refresh) = refresh {
			builder = builder.refresh_token(refresh);
		}

		store.write(&builder.build().expect("Credential fixture should build."));
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap, VecDeque},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {base64 as _, color_eyre as _, httpmock as _, tokio as _};
