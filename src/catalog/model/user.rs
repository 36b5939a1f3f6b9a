//! Current user profile.

// self
use crate::{
	_prelude::*,
	auth::UserId,
	catalog::model::{ExternalUrls, Followers, Image},
};

/// Profile of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
	/// User identifier; used to address the user's playlists.
	pub id: UserId,
	/// Name shown on the profile.
	#[serde(default)]
	pub display_name: Option<String>,
	/// Account e-mail; requires the `user-read-email` scope.
	#[serde(default)]
	pub email: Option<String>,
	/// ISO 3166-1 alpha-2 country code.
	#[serde(default)]
	pub country: Option<String>,
	/// Subscription level (`premium`, `free`).
	#[serde(default)]
	pub product: Option<String>,
	/// Explicit-content settings keyed by setting name.
	#[serde(default)]
	pub explicit_content: BTreeMap<String, bool>,
	/// Provider links.
	#[serde(default)]
	pub external_urls: ExternalUrls,
	/// Follower count.
	#[serde(default)]
	pub followers: Option<Followers>,
	/// Profile images.
	#[serde(default)]
	pub images: Vec<Image>,
}
