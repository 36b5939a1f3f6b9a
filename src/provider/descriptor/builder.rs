// std
use std::net::IpAddr;
// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, ScopeValidationError},
	provider::{ServiceDescriptor, ServiceEndpoints},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ServiceDescriptorError {
	/// Authorization endpoint is required for sign-in.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is required for exchanges and refreshes.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// API base is required for catalog requests.
	#[error("Missing API base URL.")]
	MissingApiBase,
	/// Redirect URI is required for sign-in and code exchange.
	#[error("Missing redirect URI.")]
	MissingRedirectUri,
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// The API base cannot carry path segments.
	#[error("The API base URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// A preset URL failed to parse.
	#[error("Endpoint `{endpoint}` is not a valid URL: {reason}.")]
	InvalidUrl {
		/// Raw endpoint string.
		endpoint: String,
		/// Parser message.
		reason: String,
	},
	/// A scope failed validation.
	#[error(transparent)]
	InvalidScope(#[from] ScopeValidationError),
}

/// Builder for [`ServiceDescriptor`] values.
#[derive(Debug, Default)]
pub struct ServiceDescriptorBuilder {
	/// Authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint.
	pub token_endpoint: Option<Url>,
	/// Catalog API base.
	pub api_base: Option<Url>,
	/// Registered redirect URI.
	pub redirect_uri: Option<Url>,
	/// Raw scope strings; normalized on build.
	pub scopes: Vec<String>,
	/// Consent dialog toggle; defaults to `true`.
	pub show_dialog: Option<bool>,
}
impl ServiceDescriptorBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the catalog API base.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Sets the registered redirect URI.
	pub fn redirect_uri(mut self, url: Url) -> Self {
		self.redirect_uri = Some(url);

		self
	}

	/// Adds scopes to request during sign-in.
	pub fn scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes.extend(scopes.into_iter().map(Into::into));

		self
	}

	/// Overrides the consent dialog toggle.
	pub fn show_dialog(mut self, show: bool) -> Self {
		self.show_dialog = Some(show);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ServiceDescriptor, ServiceDescriptorError> {
		let authorization = self
			.authorization_endpoint
			.ok_or(ServiceDescriptorError::MissingAuthorizationEndpoint)?;
		let token = self.token_endpoint.ok_or(ServiceDescriptorError::MissingTokenEndpoint)?;
		let api_base = self.api_base.ok_or(ServiceDescriptorError::MissingApiBase)?;
		let redirect_uri = self.redirect_uri.ok_or(ServiceDescriptorError::MissingRedirectUri)?;
		let descriptor = ServiceDescriptor {
			endpoints: ServiceEndpoints { authorization, token, api_base },
			redirect_uri,
			scopes: ScopeSet::new(self.scopes)?,
			show_dialog: self.show_dialog.unwrap_or(true),
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ServiceDescriptor {
	/// Validates invariants for the descriptor.
	pub fn validate(&self) -> Result<(), ServiceDescriptorError> {
		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("token", &self.endpoints.token)?;
		validate_endpoint("api_base", &self.endpoints.api_base)?;

		if self.endpoints.api_base.cannot_be_a_base() {
			return Err(ServiceDescriptorError::CannotBeABase {
				url: self.endpoints.api_base.to_string(),
			});
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ServiceDescriptorError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(ServiceDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
		Some(url::Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
		None => false,
	}
}
