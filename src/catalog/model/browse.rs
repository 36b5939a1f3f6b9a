//! Browse and recommendation payloads.

// self
use crate::{
	_prelude::*,
	auth::CategoryId,
	catalog::model::{Album, Image, Page, Playlist, Track},
};

/// Browse category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	/// Category identifier.
	pub id: CategoryId,
	/// Display name.
	pub name: String,
	/// API link.
	#[serde(default)]
	pub href: String,
	/// Category artwork.
	#[serde(default)]
	pub icons: Vec<Image>,
}

/// Wrapper returned by the category list endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesResponse {
	/// Categories page.
	pub categories: Page<Category>,
}

/// Wrapper returned by the new-releases endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReleases {
	/// Newly released albums.
	pub albums: Page<Album>,
}

/// Wrapper returned by the featured and per-category playlist endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistCollection {
	/// Localized headline, when the service provides one.
	#[serde(default)]
	pub message: Option<String>,
	/// Playlists page.
	pub playlists: Page<Playlist>,
}

/// Featured playlists.
pub type FeaturedPlaylists = PlaylistCollection;
/// Playlists filed under a category.
pub type CategoryPlaylists = PlaylistCollection;

/// Genre seeds accepted by the recommendations endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genres {
	/// Genre names.
	pub genres: Vec<String>,
}

/// Seed used to produce recommendations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
	/// Seed identifier (genre name, artist id, or track id).
	pub id: String,
	/// `artist`, `track`, or `genre`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Tracks available after filtering.
	#[serde(default, rename = "afterFilteringSize")]
	pub after_filtering_size: u32,
	/// Tracks available after relinking for regional availability.
	#[serde(default, rename = "afterRelinkingSize")]
	pub after_relinking_size: u32,
	/// Size of the candidate pool.
	#[serde(default, rename = "initialPoolSize")]
	pub initial_pool_size: u32,
	/// API link to the seed object, if any.
	#[serde(default)]
	pub href: Option<String>,
}

/// Recommended tracks and the seeds that produced them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
	/// Seeds used.
	#[serde(default)]
	pub seeds: Vec<Seed>,
	/// Recommended tracks.
	pub tracks: Vec<Track>,
}
