//! Authenticated request pipeline: bearer attachment, connectivity gating, response
//! caching, status classification, and typed decoding.

pub mod cache;
pub mod request;

pub use cache::*;
pub use request::*;

// crates.io
use oauth2::{AsyncHttpClient, HttpResponse};
// self
use crate::{
	_prelude::*,
	connectivity::ConnectivityMonitor,
	error::ResponseError,
	flows::Broker,
	http::{HttpTransport, ResponseMetadataSlot},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Turns [`ApiRequest`]s into decoded values.
///
/// The executor never retries; every failure is returned to the caller as an [`Error`].
pub struct RequestExecutor<C>
where
	C: ?Sized + HttpTransport,
{
	broker: Arc<Broker<C>>,
	connectivity: Arc<ConnectivityMonitor>,
	cache: Arc<ResponseCache>,
}
impl<C> RequestExecutor<C>
where
	C: ?Sized + HttpTransport,
{
	/// Wires the executor to a broker, a connectivity monitor, and a response cache.
	pub fn new(
		broker: Arc<Broker<C>>,
		connectivity: Arc<ConnectivityMonitor>,
		cache: Arc<ResponseCache>,
	) -> Self {
		Self { broker, connectivity, cache }
	}

	/// Credential broker supplying bearer tokens.
	pub fn broker(&self) -> &Arc<Broker<C>> {
		&self.broker
	}

	/// Connectivity monitor gating every request.
	pub fn connectivity(&self) -> &Arc<ConnectivityMonitor> {
		&self.connectivity
	}

	/// Response cache consulted by [`CachePolicy::ReturnCacheElseLoad`] requests.
	pub fn cache(&self) -> &Arc<ResponseCache> {
		&self.cache
	}

	/// Signs out and drops every cached response, so the next account never sees data
	/// fetched for the previous one.
	pub fn sign_out(&self) {
		self.broker.sign_out();
		self.cache.clear();
	}

	/// Builds an authorized request, waiting for a valid token when a refresh is due.
	pub async fn build_request(
		&self,
		url: Url,
		method: HttpMethod,
		cache_policy: CachePolicy,
	) -> Result<ApiRequest> {
		let token = self.broker.valid_token().await?;

		ApiRequest::new(method, url).with_cache_policy(cache_policy).with_bearer(&token)
	}

	/// Executes `request` and decodes the body as `T`.
	pub async fn perform<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		const KIND: FlowKind = FlowKind::ApiRequest;

		let span = FlowSpan::new(KIND, "perform");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result: Result<T> = span.instrument(self.perform_inner(&request)).await;

		if let Err(e) = &result {
			tracing::warn!(
				method = %request.method,
				url = %request.url,
				error = %e,
				"Catalog request failed."
			);
		}

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}

	async fn perform_inner<T>(&self, request: &ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		if !self.connectivity.is_available() {
			return Err(Error::NetworkUnavailable);
		}

		let key = request.cache_key();

		let cached = request.cache_policy.reads_cache().then(|| self.cache.get(&key)).flatten();

		if let Some(cached) = cached {
			tracing::debug!(url = %request.url, "Serving response from cache.");

			return decode(request, &cached.body);
		}

		tracing::debug!(method = %request.method, url = %request.url, "Sending catalog request.");

		let response = self.send(request).await?;
		let status = response.status().as_u16();

		if !response.status().is_success() {
			return Err(ResponseError::Status { status }.into());
		}

		let body = response.into_body();
		let value = decode(request, &body)?;

		if request.method == HttpMethod::Get && !body.is_empty() {
			self.cache.insert(key, CachedResponse { status, body });
		}

		Ok(value)
	}

	async fn send(&self, request: &ApiRequest) -> Result<HttpResponse> {
		let http_request = request.to_http()?;
		let handle = self.broker.http_client.with_metadata(ResponseMetadataSlot::default());

		handle.call(http_request).await.map_err(|e| ResponseError::transport(e).into())
	}
}
impl<C> Debug for RequestExecutor<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestExecutor")
			.field("network_available", &self.connectivity.is_available())
			.field("cached_entries", &self.cache.len())
			.finish()
	}
}

fn decode<T>(request: &ApiRequest, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let body = if body.is_empty() {
		match request.empty_body {
			EmptyBody::Allowed => b"null".as_slice(),
			EmptyBody::Rejected => return Err(Error::DataFailure),
		}
	} else {
		body
	};
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	match serde_path_to_error::deserialize(&mut deserializer) {
		Ok(value) => {
			tracing::debug!(url = %request.url, "Response decoded.");

			Ok(value)
		},
		Err(e) if request.empty_body == EmptyBody::Allowed && body == b"null" => {
			tracing::debug!(url = %request.url, error = %e, "Empty body does not fit the target type.");

			Err(Error::DataFailure)
		},
		Err(e) => {
			tracing::debug!(url = %request.url, path = %e.path(), "Response decoding failed.");

			Err(Error::decode(e))
		},
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[derive(Debug, Deserialize, PartialEq)]
	struct Named {
		name: String,
	}

	#[derive(Debug, Deserialize, PartialEq)]
	struct Unit;

	fn request() -> ApiRequest {
		ApiRequest::new(
			HttpMethod::Get,
			Url::parse("https://api.example.com/v1/me").expect("URL fixture should parse."),
		)
	}

	#[test]
	fn empty_body_is_a_data_failure_by_default() {
		assert!(matches!(decode::<Named>(&request(), b""), Err(Error::DataFailure)));
	}

	#[test]
	fn empty_body_decodes_from_null_when_allowed() {
		let request = request().allow_empty_body();

		assert_eq!(decode::<Unit>(&request, b"").expect("Unit should decode from null."), Unit);
		assert_eq!(decode::<Option<Named>>(&request, b"").expect("Option should decode."), None);
		assert!(matches!(decode::<Named>(&request, b""), Err(Error::DataFailure)));
	}

	#[test]
	fn decode_errors_keep_the_json_path() {
		let err = decode::<Named>(&request(), br#"{"name":7}"#)
			.expect_err("Numeric name should not decode.");

		match err {
			Error::Decode { source } => assert_eq!(source.path().to_string(), "name"),
			other => panic!("Unexpected error: {other:?}."),
		}
	}
}
