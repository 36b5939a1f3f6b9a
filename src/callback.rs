//! Callback-passing surface over the async core.
//!
//! [`CallbackAdapter`] spawns each operation on a [`LocalSpawn`] executor (for example a
//! UI thread's event loop driving a [`futures::executor::LocalPool`]) and hands the result to
//! a completion closure on that executor. Semantics are exactly those of the async methods
//! it wraps; only the signaling differs.

// crates.io
use futures::task::{LocalSpawn, LocalSpawnExt, SpawnError};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	catalog::CatalogClient,
	flows::RefreshOutcome,
	http::HttpTransport,
	pipeline::{ApiRequest, CachePolicy, HttpMethod},
};

/// Runs broker, pipeline, and catalog operations and reports through completions.
pub struct CallbackAdapter<C, S>
where
	C: ?Sized + HttpTransport,
{
	catalog: Arc<CatalogClient<C>>,
	spawner: S,
}
impl<C, S> CallbackAdapter<C, S>
where
	C: ?Sized + HttpTransport,
	S: LocalSpawn,
{
	/// Creates an adapter that spawns onto `spawner`.
	pub fn new(catalog: Arc<CatalogClient<C>>, spawner: S) -> Self {
		Self { catalog, spawner }
	}

	/// Catalog client the adapter drives.
	pub fn catalog(&self) -> &Arc<CatalogClient<C>> {
		&self.catalog
	}

	/// Spawns `fut` and passes its output to `completion`.
	pub fn spawn_with<Fut, F>(&self, fut: Fut, completion: F) -> Result<(), SpawnError>
	where
		Fut: 'static + Future,
		F: 'static + FnOnce(Fut::Output),
	{
		self.spawner.spawn_local(async move { completion(fut.await) })
	}

	/// Delivers a valid access token, refreshing first when it is near expiry.
	pub fn with_valid_token<F>(&self, completion: F) -> Result<(), SpawnError>
	where
		F: 'static + FnOnce(Result<TokenSecret>),
	{
		let catalog = self.catalog.clone();

		self.spawn_with(async move { catalog.executor().broker().valid_token().await }, completion)
	}

	/// Exchanges an authorization code; the completion receives `true` on success.
	pub fn exchange_code_for_token<F>(
		&self,
		code: impl Into<String>,
		completion: F,
	) -> Result<(), SpawnError>
	where
		F: 'static + FnOnce(bool),
	{
		let catalog = self.catalog.clone();
		let code = code.into();

		self.spawn_with(
			async move { catalog.executor().broker().exchange_code_for_token(&code).await.is_ok() },
			completion,
		)
	}

	/// Refreshes stored credentials when needed. A second call while a refresh is in flight
	/// completes immediately with [`RefreshOutcome::AlreadyInFlight`].
	pub fn refresh_access_token<F>(&self, completion: F) -> Result<(), SpawnError>
	where
		F: 'static + FnOnce(Result<RefreshOutcome>),
	{
		let catalog = self.catalog.clone();

		self.spawn_with(
			async move { catalog.executor().broker().refresh_access_token().await },
			completion,
		)
	}

	/// Builds an authorized request.
	pub fn build_request<F>(
		&self,
		url: Url,
		method: HttpMethod,
		use_cache: bool,
		completion: F,
	) -> Result<(), SpawnError>
	where
		F: 'static + FnOnce(Result<ApiRequest>),
	{
		let catalog = self.catalog.clone();

		self.spawn_with(
			async move {
				catalog
					.executor()
					.build_request(url, method, CachePolicy::from_use_cache(use_cache))
					.await
			},
			completion,
		)
	}

	/// Executes `request` and decodes the body as `T`.
	pub fn perform<T, F>(&self, request: ApiRequest, completion: F) -> Result<(), SpawnError>
	where
		T: 'static + DeserializeOwned,
		F: 'static + FnOnce(Result<T>),
	{
		let catalog = self.catalog.clone();

		self.spawn_with(async move { catalog.executor().perform(request).await }, completion)
	}

	/// Runs any catalog operation, e.g.
	/// `adapter.catalog_call(|c| async move { c.new_releases().await }, done)`.
	pub fn catalog_call<Call, Fut, F>(&self, call: Call, completion: F) -> Result<(), SpawnError>
	where
		Call: FnOnce(Arc<CatalogClient<C>>) -> Fut,
		Fut: 'static + Future,
		F: 'static + FnOnce(Fut::Output),
	{
		self.spawn_with(call(self.catalog.clone()), completion)
	}
}
impl<C, S> Debug for CallbackAdapter<C, S>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CallbackAdapter").field("catalog", &self.catalog).finish()
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// std
	use std::{cell::RefCell, rc::Rc};
	// crates.io
	use futures::executor::LocalPool;
	// self
	use super::*;
	use crate::{
		connectivity::{ConnectivityMonitor, PathStatus},
		error::ErrorKind,
		flows::Broker,
		http::ReqwestHttpClient,
		pipeline::{RequestExecutor, ResponseCache},
		provider::ServiceDescriptor,
		store::TokenStore,
	};

	fn catalog(connectivity: PathStatus) -> Arc<CatalogClient<ReqwestHttpClient>> {
		let descriptor = ServiceDescriptor::spotify(
			Url::parse("https://app.example.com/callback").expect("Redirect fixture should parse."),
		)
		.expect("Descriptor fixture should validate.");
		let broker = Arc::new(
			Broker::new(TokenStore::in_memory(), descriptor, "client")
				.expect("Broker fixture should build."),
		);
		let executor = Arc::new(RequestExecutor::new(
			broker,
			Arc::new(ConnectivityMonitor::with_status(connectivity)),
			Arc::new(ResponseCache::default()),
		));

		Arc::new(CatalogClient::new(executor))
	}

	#[test]
	fn completions_run_on_the_local_pool() {
		let mut pool = LocalPool::new();
		let adapter = CallbackAdapter::new(catalog(PathStatus::unsatisfied()), pool.spawner());
		let seen = Rc::new(RefCell::new(None));
		let slot = seen.clone();

		adapter
			.with_valid_token(move |result| {
				*slot.borrow_mut() = Some(result.map(|_| ()).map_err(|e| e.kind()));
			})
			.expect("Spawn should succeed.");

		assert!(seen.borrow().is_none(), "Completion should not run before the pool is driven.");

		pool.run_until_stalled();

		assert_eq!(*seen.borrow(), Some(Err(ErrorKind::NotSignedIn)));
	}

	#[test]
	fn refresh_without_credentials_is_not_needed() {
		let mut pool = LocalPool::new();
		let adapter = CallbackAdapter::new(catalog(PathStatus::unsatisfied()), pool.spawner());
		let seen = Rc::new(RefCell::new(None));
		let slot = seen.clone();

		adapter
			.refresh_access_token(move |result| *slot.borrow_mut() = result.ok())
			.expect("Spawn should succeed.");
		pool.run_until_stalled();

		assert_eq!(*seen.borrow(), Some(RefreshOutcome::NotNeeded));
	}

	#[test]
	fn empty_code_reports_failure() {
		let mut pool = LocalPool::new();
		let adapter = CallbackAdapter::new(catalog(PathStatus::unsatisfied()), pool.spawner());
		let seen = Rc::new(RefCell::new(None));
		let slot = seen.clone();

		adapter
			.exchange_code_for_token("", move |ok| *slot.borrow_mut() = Some(ok))
			.expect("Spawn should succeed.");
		pool.run_until_stalled();

		assert_eq!(*seen.borrow(), Some(false));
	}

	#[test]
	fn offline_perform_reports_network_unavailable() {
		let mut pool = LocalPool::new();
		let adapter = CallbackAdapter::new(catalog(PathStatus::unsatisfied()), pool.spawner());
		let request = ApiRequest::new(
			HttpMethod::Get,
			Url::parse("https://api.spotify.com/v1/me").expect("URL fixture should parse."),
		);
		let seen = Rc::new(RefCell::new(None));
		let slot = seen.clone();

		adapter
			.perform::<serde_json::Value, _>(request, move |result| {
				*slot.borrow_mut() = result.err().map(|e| e.kind());
			})
			.expect("Spawn should succeed.");
		pool.run_until_stalled();

		assert_eq!(*seen.borrow(), Some(ErrorKind::NetworkUnavailable));
	}
}
