//! Request descriptions handed to the [`RequestExecutor`](crate::pipeline::RequestExecutor).

// std
use std::time::Duration as StdDuration;
// crates.io
use oauth2::{
	HttpRequest,
	http::{
		HeaderMap, HeaderName, HeaderValue, Method,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::RequestError,
	http::RequestTimeout,
	pipeline::cache::CacheKey,
};

pub use crate::http::REQUEST_TIMEOUT;

/// HTTP verbs used by catalog endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Upper-case method token.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Delete => "DELETE",
		}
	}

	fn to_http(self) -> Method {
		match self {
			Self::Get => Method::GET,
			Self::Post => Method::POST,
			Self::Put => Method::PUT,
			Self::Delete => Method::DELETE,
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Whether a request may be answered from the response cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
	/// Serve a cached response when one exists, otherwise load and cache.
	ReturnCacheElseLoad,
	/// Always hit the network.
	#[default]
	ReloadIgnoringCache,
}
impl CachePolicy {
	/// Maps the `use_cache` flag carried by catalog operations.
	pub fn from_use_cache(use_cache: bool) -> Self {
		if use_cache { Self::ReturnCacheElseLoad } else { Self::ReloadIgnoringCache }
	}

	/// Returns `true` when the cache is consulted before the network.
	pub fn reads_cache(self) -> bool {
		matches!(self, Self::ReturnCacheElseLoad)
	}
}

/// How a successful response with an empty body is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyBody {
	/// An empty body is a [`Error::DataFailure`].
	#[default]
	Rejected,
	/// An empty body decodes the target type from JSON `null`.
	Allowed,
}

/// Fully described outbound catalog request.
#[derive(Clone)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute request URL, including the query string.
	pub url: Url,
	/// Request headers, including `Authorization` once attached.
	pub headers: HeaderMap,
	/// Serialized request body.
	pub body: Option<Vec<u8>>,
	/// Per-request deadline.
	pub timeout: StdDuration,
	/// Cache behavior.
	pub cache_policy: CachePolicy,
	/// Empty-body behavior.
	pub empty_body: EmptyBody,
}
impl ApiRequest {
	/// Creates an unauthenticated request with the default timeout and no caching.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		let mut headers = HeaderMap::new();

		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

		Self {
			method,
			url,
			headers,
			body: None,
			timeout: REQUEST_TIMEOUT,
			cache_policy: CachePolicy::default(),
			empty_body: EmptyBody::default(),
		}
	}

	/// Attaches `Authorization: Bearer <token>`; the header value is marked sensitive.
	pub fn with_bearer(mut self, token: &TokenSecret) -> Result<Self> {
		let mut value = HeaderValue::from_str(&token.bearer_value())
			.map_err(|source| RequestError::InvalidHeader { source })?;

		value.set_sensitive(true);
		self.headers.insert(AUTHORIZATION, value);

		Ok(self)
	}

	/// Serializes `body` as JSON and sets `Content-Type: application/json`.
	pub fn with_json_body<B>(mut self, body: &B) -> Result<Self>
	where
		B: ?Sized + Serialize,
	{
		let bytes = serde_json::to_vec(body).map_err(|source| RequestError::Body { source })?;

		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		self.body = Some(bytes);

		Ok(self)
	}

	/// Replaces the cache policy.
	pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
		self.cache_policy = cache_policy;

		self
	}

	/// Accepts an empty success body.
	pub fn allow_empty_body(mut self) -> Self {
		self.empty_body = EmptyBody::Allowed;

		self
	}

	/// Returns a header value as text, if present and visible ASCII.
	pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
		let name = HeaderName::from_bytes(name.as_ref().as_bytes()).ok()?;

		self.headers.get(name).and_then(|value| value.to_str().ok())
	}

	/// Identity of this request within the response cache.
	pub fn cache_key(&self) -> CacheKey {
		CacheKey {
			method: self.method,
			url: self.url.as_str().to_owned(),
			accept: self.header(ACCEPT.as_str()).map(ToOwned::to_owned),
		}
	}

	pub(crate) fn to_http(&self) -> Result<HttpRequest> {
		let mut request = oauth2::http::Request::builder()
			.method(self.method.to_http())
			.uri(self.url.as_str())
			.extension(RequestTimeout(self.timeout))
			.body(self.body.clone().unwrap_or_default())
			.map_err(RequestError::from)?;

		*request.headers_mut() = self.headers.clone();

		Ok(request)
	}
}
impl Debug for ApiRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let headers = self
			.headers
			.iter()
			.map(|(name, value)| {
				let shown = if value.is_sensitive() || name == AUTHORIZATION {
					"<redacted>"
				} else {
					value.to_str().unwrap_or("<binary>")
				};

				(name.as_str(), shown)
			})
			.collect::<Vec<_>>();

		f.debug_struct("ApiRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("headers", &headers)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.field("timeout", &self.timeout)
			.field("cache_policy", &self.cache_policy)
			.field("empty_body", &self.empty_body)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn request() -> ApiRequest {
		ApiRequest::new(
			HttpMethod::Get,
			Url::parse("https://api.example.com/v1/me").expect("URL fixture should parse."),
		)
	}

	#[test]
	fn defaults_match_catalog_expectations() {
		let request = request();

		assert_eq!(request.timeout, StdDuration::from_secs(30));
		assert_eq!(request.cache_policy, CachePolicy::ReloadIgnoringCache);
		assert_eq!(request.empty_body, EmptyBody::Rejected);
		assert_eq!(request.header("accept"), Some("application/json"));
	}

	#[test]
	fn bearer_is_attached_and_redacted() {
		let request = request()
			.with_bearer(&TokenSecret::new("secret-token"))
			.expect("Bearer header should be valid.");

		assert_eq!(request.header("authorization"), Some("Bearer secret-token"));
		assert!(!format!("{request:?}").contains("secret-token"));
	}

	#[test]
	fn control_characters_in_tokens_are_rejected() {
		let err = request()
			.with_bearer(&TokenSecret::new("bad\ntoken"))
			.expect_err("Newlines are not valid header content.");

		assert!(matches!(err, Error::InvalidRequest(RequestError::InvalidHeader { .. })));
	}

	#[test]
	fn json_body_sets_content_type() {
		let request = request()
			.with_json_body(&serde_json::json!({ "ids": ["a"] }))
			.expect("Body should serialize.");

		assert_eq!(request.header("content-type"), Some("application/json"));
		assert_eq!(request.body.as_deref(), Some(br#"{"ids":["a"]}"#.as_slice()));
	}

	#[test]
	fn http_conversion_carries_timeout_and_headers() {
		let request = request()
			.with_bearer(&TokenSecret::new("token"))
			.expect("Bearer header should be valid.");
		let http = request.to_http().expect("Request should convert.");

		assert_eq!(http.method(), Method::GET);
		assert_eq!(http.uri(), "https://api.example.com/v1/me");
		assert_eq!(
			http.extensions().get::<RequestTimeout>(),
			Some(&RequestTimeout(REQUEST_TIMEOUT))
		);
		assert_eq!(
			http.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
			Some("Bearer token")
		);
	}

	#[test]
	fn cache_policy_follows_use_cache_flag() {
		assert!(CachePolicy::from_use_cache(true).reads_cache());
		assert!(!CachePolicy::from_use_cache(false).reads_cache());
	}
}
