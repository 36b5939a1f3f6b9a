//! Token endpoint facade built on the `oauth2` crate.

pub use oauth2;

// crates.io
use oauth2::{
	AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RedirectUrl, RefreshToken, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError, BasicTokenResponse},
};
// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, CredentialRecordBuilderError, TokenSecret},
	error::{ConfigError, RequestError, ResponseError},
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot, Timed},
	provider::ServiceDescriptor,
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Issues authorization-code and refresh-token grants with HTTP Basic client authentication.
///
/// The facade owns its transport handle so a refresh can outlive the caller that started it.
pub(crate) struct TokenEndpointFacade<C>
where
	C: ?Sized + HttpTransport,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
}
impl<C> TokenEndpointFacade<C>
where
	C: ?Sized + HttpTransport,
{
	pub(crate) fn from_descriptor(
		descriptor: &ServiceDescriptor,
		client_id: &str,
		client_secret: Option<&str>,
		http_client: Arc<C>,
	) -> Self {
		let mut oauth_client = BasicClient::new(ClientId::new(client_id.to_owned()))
			.set_auth_uri(AuthUrl::from_url(descriptor.endpoints.authorization.clone()))
			.set_redirect_uri(RedirectUrl::from_url(descriptor.redirect_uri.clone()))
			.set_token_uri(TokenUrl::from_url(descriptor.endpoints.token.clone()));

		if let Some(secret) = client_secret {
			oauth_client = oauth_client.set_client_secret(ClientSecret::new(secret.to_owned()));
		}

		Self { oauth_client, http_client }
	}

	/// `grant_type=authorization_code` with the configured redirect URI.
	pub(crate) async fn exchange_code(&self, code: &str) -> Result<CredentialRecord> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = Timed(self.http_client.with_metadata(meta.clone()));
		let response = self
			.oauth_client
			.exchange_code(AuthorizationCode::new(code.to_owned()))
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(meta.take(), err))?;

		map_token_response(response)
	}

	/// `grant_type=refresh_token`. The returned record carries a refresh token only if the
	/// server rotated it.
	pub(crate) async fn refresh(&self, refresh_token: &TokenSecret) -> Result<CredentialRecord> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = Timed(self.http_client.with_metadata(meta.clone()));
		let refresh_secret = RefreshToken::new(refresh_token.expose().to_owned());
		let response = self
			.oauth_client
			.exchange_refresh_token(&refresh_secret)
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(meta.take(), err))?;

		map_token_response(response)
	}
}

fn map_token_response(response: BasicTokenResponse) -> Result<CredentialRecord> {
	let expires_in = response.expires_in().ok_or(ResponseError::MissingExpiresIn)?.as_secs();
	let expires_in = i64::try_from(expires_in).map_err(|_| ResponseError::ExpiresInOutOfRange)?;
	let mut builder = CredentialRecord::builder()
		.access_token(response.access_token().secret().to_owned())
		.issued_at(OffsetDateTime::now_utc())
		.expires_in(Duration::seconds(expires_in));

	if let Some(refresh) = response.refresh_token() {
		builder = builder.refresh_token(refresh.secret().to_owned());
	}

	builder.build().map_err(|e| match e {
		CredentialRecordBuilderError::ExpiryOutOfRange => ResponseError::ExpiresInOutOfRange.into(),
		e => ConfigError::from(e).into(),
	})
}

fn map_request_error<E>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	let status = meta.and_then(|value| value.status);
	let failed_status = status.filter(|code| !(200..300).contains(code));

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response, status),
		RequestTokenError::Request(HttpClientError::Http(inner)) => RequestError::from(inner).into(),
		RequestTokenError::Request(error) => ResponseError::transport(error).into(),
		RequestTokenError::Parse(source, _body) => match failed_status {
			Some(status) => ResponseError::Status { status }.into(),
			None => Error::decode(source),
		},
		RequestTokenError::Other(message) => match failed_status {
			Some(status) => ResponseError::Status { status }.into(),
			None => ResponseError::Rejected { message, status }.into(),
		},
	}
}

fn map_server_response_error(response: BasicErrorResponse, status: Option<u16>) -> Error {
	let message = match response.error_description() {
		Some(description) => format!("{}: {description}", response.error().as_ref()),
		None => response.error().as_ref().to_owned(),
	};

	ResponseError::Rejected { message, status }.into()
}
