//! Service descriptor data structures shared by the broker and the catalog client.

/// Builder API for assembling service descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, auth::ScopeSet};

/// Scopes requested by the production sign-in flow.
pub const DEFAULT_SCOPES: [&str; 7] = [
	"user-read-private",
	"playlist-modify-public",
	"playlist-read-private",
	"user-follow-read",
	"user-library-modify",
	"user-library-read",
	"user-read-email",
];

/// Endpoint set declared by a service descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
	/// Authorization endpoint opened in the browser for sign-in.
	pub authorization: Url,
	/// Token endpoint used for code exchanges and refreshes.
	pub token: Url,
	/// Base URL every catalog path is appended to.
	pub api_base: Url,
}

/// Immutable service descriptor consumed by the broker and catalog client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
	/// Endpoint definitions.
	pub endpoints: ServiceEndpoints,
	/// Redirect URI registered with the authorization server.
	pub redirect_uri: Url,
	/// Scopes requested during sign-in.
	pub scopes: ScopeSet,
	/// Forces the consent dialog even when the user already approved the app.
	#[serde(default = "show_dialog_default")]
	pub show_dialog: bool,
}
impl ServiceDescriptor {
	/// Creates a new builder.
	pub fn builder() -> ServiceDescriptorBuilder {
		ServiceDescriptorBuilder::new()
	}

	/// Production preset for the Spotify Web API.
	pub fn spotify(redirect_uri: Url) -> Result<Self, ServiceDescriptorError> {
		let parse = |raw: &str| {
			Url::parse(raw).map_err(|e| ServiceDescriptorError::InvalidUrl {
				endpoint: raw.to_owned(),
				reason: e.to_string(),
			})
		};

		Self::builder()
			.authorization_endpoint(parse("https://accounts.spotify.com/authorize")?)
			.token_endpoint(parse("https://accounts.spotify.com/api/token")?)
			.api_base(parse("https://api.spotify.com/v1")?)
			.redirect_uri(redirect_uri)
			.scopes(DEFAULT_SCOPES)
			.build()
	}
}

fn show_dialog_default() -> bool {
	true
}
