//! Typed catalog endpoints layered on the [`RequestExecutor`].
//!
//! Each operation resolves a fixed route against the descriptor's API base, picks the HTTP
//! method and cache policy, and delegates execution and decoding to the executor.

pub mod browse;
pub mod home;
pub mod library;
pub mod model;
pub mod playlist;
pub mod profile;
pub mod search;

mod route;

pub use home::HomeFeed;
pub use model::*;

// self
use crate::{
	_prelude::*,
	catalog::route::Route,
	http::HttpTransport,
	pipeline::{CachePolicy, EmptyBody, HttpMethod, RequestExecutor},
};

/// Catalog client sharing one [`RequestExecutor`].
pub struct CatalogClient<C>
where
	C: ?Sized + HttpTransport,
{
	executor: Arc<RequestExecutor<C>>,
}
impl<C> CatalogClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client over `executor`.
	pub fn new(executor: Arc<RequestExecutor<C>>) -> Self {
		Self { executor }
	}

	/// Request executor backing this client.
	pub fn executor(&self) -> &Arc<RequestExecutor<C>> {
		&self.executor
	}

	/// Signs out through [`RequestExecutor::sign_out`], clearing the response cache as well.
	pub fn sign_out(&self) {
		self.executor.sign_out();
	}

	fn url(&self, route: Route, args: &[&str]) -> Result<Url> {
		let base = &self.executor.broker().descriptor.endpoints.api_base;

		Ok(route.resolve(base, args)?)
	}

	async fn get<T>(&self, url: Url, use_cache: bool) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let request = self
			.executor
			.build_request(url, HttpMethod::Get, CachePolicy::from_use_cache(use_cache))
			.await?;

		self.executor.perform(request).await
	}

	async fn send_json<T, B>(
		&self,
		method: HttpMethod,
		url: Url,
		body: &B,
		empty_body: EmptyBody,
	) -> Result<T>
	where
		T: DeserializeOwned,
		B: ?Sized + Serialize,
	{
		let mut request = self
			.executor
			.build_request(url, method, CachePolicy::ReloadIgnoringCache)
			.await?
			.with_json_body(body)?;

		request.empty_body = empty_body;

		self.executor.perform(request).await
	}
}
impl<C> Debug for CatalogClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CatalogClient").field("executor", &self.executor).finish()
	}
}
