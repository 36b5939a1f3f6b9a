//! Authorization code sign-in: the browser URL, redirect parsing, and the code exchange.

// self
use crate::{
	_prelude::*,
	auth::CredentialRecord,
	error::RequestError,
	flows::Broker,
	http::HttpTransport,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl<C> Broker<C>
where
	C: ?Sized + HttpTransport,
{
	/// Builds the authorization URL the host opens in a browser.
	///
	/// Deterministic for a given descriptor and client id; performs no I/O.
	pub fn sign_in_url(&self) -> Url {
		let mut url = self.descriptor.endpoints.authorization.clone();

		{
			let mut query = url.query_pairs_mut();

			query
				.append_pair("response_type", "code")
				.append_pair("client_id", &self.client_id)
				.append_pair("scope", &self.descriptor.scopes.normalized())
				.append_pair("redirect_uri", self.descriptor.redirect_uri.as_str());

			if self.descriptor.show_dialog {
				query.append_pair("show_dialog", "TRUE");
			}
		}

		url
	}

	/// Extracts the authorization code from an intercepted redirect.
	///
	/// The redirect must target the registered redirect URI (scheme, host, port, and path).
	pub fn authorization_code_from_redirect(&self, redirect: &Url) -> Result<String> {
		let expected = &self.descriptor.redirect_uri;

		if redirect.scheme() != expected.scheme()
			|| redirect.host_str() != expected.host_str()
			|| redirect.port_or_known_default() != expected.port_or_known_default()
			|| redirect.path() != expected.path()
		{
			return Err(RequestError::ForeignRedirect.into());
		}

		let mut code = None;

		for (key, value) in redirect.query_pairs() {
			match key.as_ref() {
				"error" =>
					return Err(RequestError::AuthorizationDenied { reason: value.into_owned() }.into()),
				"code" if !value.is_empty() => code = Some(value.into_owned()),
				_ => {},
			}
		}

		code.ok_or_else(|| RequestError::MissingParameter { name: "code" }.into())
	}

	/// Returns `true` when an access token is stored, regardless of its expiry.
	pub fn is_signed_in(&self) -> bool {
		self.store.read().is_signed_in()
	}

	/// Exchanges an authorization code for credentials and persists them.
	///
	/// The store is left untouched on failure.
	pub async fn exchange_code_for_token(&self, code: &str) -> Result<CredentialRecord> {
		const KIND: FlowKind = FlowKind::AuthorizationCode;

		let span = FlowSpan::new(KIND, "exchange_code_for_token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result: Result<CredentialRecord> = span
			.instrument(async {
				if code.is_empty() {
					return Err(Error::from(RequestError::MissingParameter { name: "code" }));
				}

				let record = self.token_endpoint().exchange_code(code).await?;

				self.store.write(&record);
				tracing::info!("Authorization code exchanged for credentials.");

				Ok(record)
			})
			.await;

		if let Err(e) = &result {
			tracing::warn!(error = %e, "Authorization code exchange failed.");
		}

		obs::record_flow_outcome(KIND, FlowOutcome::of(&result));

		result
	}

	/// Removes stored credentials. The app-lock preference is kept.
	///
	/// Cached catalog responses are untouched; hosts with a response cache sign out through
	/// [`RequestExecutor::sign_out`](crate::pipeline::RequestExecutor::sign_out).
	pub fn sign_out(&self) {
		self.store.clear();
		tracing::info!("Signed out.");
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::{
		http::ReqwestHttpClient,
		provider::ServiceDescriptor,
		store::TokenStore,
	};

	fn broker() -> Broker<ReqwestHttpClient> {
		let descriptor = ServiceDescriptor::builder()
			.authorization_endpoint(
				Url::parse("https://accounts.example.com/authorize")
					.expect("Authorization endpoint fixture should parse."),
			)
			.token_endpoint(
				Url::parse("https://accounts.example.com/api/token")
					.expect("Token endpoint fixture should parse."),
			)
			.api_base(Url::parse("https://api.example.com/v1").expect("API base should parse."))
			.redirect_uri(
				Url::parse("https://app.example.com/callback").expect("Redirect should parse."),
			)
			.scopes(["user-read-private", "user-read-email"])
			.build()
			.expect("Descriptor fixture should validate.");

		Broker::new(TokenStore::in_memory(), descriptor, "client-123")
			.expect("Default transport should build.")
	}

	#[test]
	fn sign_in_url_is_deterministic() {
		let broker = broker();
		let url = broker.sign_in_url();

		assert_eq!(url, broker.sign_in_url());
		assert_eq!(
			url.as_str(),
			"https://accounts.example.com/authorize?response_type=code&client_id=client-123\
			 &scope=user-read-email+user-read-private\
			 &redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&show_dialog=TRUE"
		);
	}

	#[test]
	fn redirect_yields_code() {
		let broker = broker();
		let redirect = Url::parse("https://app.example.com/callback?code=abc123&state=xyz")
			.expect("Redirect fixture should parse.");

		assert_eq!(
			broker.authorization_code_from_redirect(&redirect).expect("Code should be extracted."),
			"abc123"
		);
	}

	#[test]
	fn redirect_errors_are_invalid_requests() {
		let broker = broker();
		let denied = Url::parse("https://app.example.com/callback?error=access_denied")
			.expect("Redirect fixture should parse.");
		let foreign = Url::parse("https://evil.example.com/callback?code=abc")
			.expect("Redirect fixture should parse.");
		let missing =
			Url::parse("https://app.example.com/callback").expect("Redirect fixture should parse.");

		assert!(matches!(
			broker.authorization_code_from_redirect(&denied),
			Err(Error::InvalidRequest(RequestError::AuthorizationDenied { reason })) if reason == "access_denied"
		));
		assert!(matches!(
			broker.authorization_code_from_redirect(&foreign),
			Err(Error::InvalidRequest(RequestError::ForeignRedirect))
		));
		assert!(matches!(
			broker.authorization_code_from_redirect(&missing),
			Err(Error::InvalidRequest(RequestError::MissingParameter { name: "code" }))
		));
	}

	#[test]
	fn sign_out_clears_sign_in_state() {
		let broker = broker();
		let record = CredentialRecord::builder()
			.access_token("a")
			.expires_in(Duration::hours(-1))
			.build()
			.expect("Record fixture should build.");

		broker.store.write(&record);

		assert!(broker.is_signed_in(), "Expired tokens still count as signed in.");

		broker.sign_out();

		assert!(!broker.is_signed_in());
	}
}
