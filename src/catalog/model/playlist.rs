//! Playlists and their owners.

// self
use crate::{
	_prelude::*,
	auth::{PlaylistId, UserId},
	catalog::model::{ExternalUrls, Followers, Image, Page, TrackItem},
};

/// Playlist owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
	/// Owner's user identifier.
	pub id: UserId,
	/// Name shown on the profile.
	#[serde(default)]
	pub display_name: Option<String>,
	/// Provider links.
	#[serde(default)]
	pub external_urls: ExternalUrls,
	/// API link.
	#[serde(default)]
	pub href: String,
	/// Catalog URI.
	pub uri: String,
}

/// Playlist summary, as listed in the user's library and browse results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
	/// Playlist identifier.
	pub id: PlaylistId,
	/// Title.
	pub name: String,
	/// Free-form description, possibly containing HTML entities.
	#[serde(default)]
	pub description: Option<String>,
	/// Whether other users may edit it.
	#[serde(default)]
	pub collaborative: bool,
	/// Current version; required for track removal.
	#[serde(default)]
	pub snapshot_id: Option<String>,
	/// Cover images.
	#[serde(default)]
	pub images: Option<Vec<Image>>,
	/// Provider links.
	#[serde(default)]
	pub external_urls: ExternalUrls,
	/// API link.
	#[serde(default)]
	pub href: String,
	/// Catalog URI.
	pub uri: String,
	/// Owning user.
	pub owner: Owner,
}

/// Full playlist object returned by the playlist detail endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistDetails {
	/// Summary fields shared with [`Playlist`].
	#[serde(flatten)]
	pub playlist: Playlist,
	/// Follower count.
	#[serde(default)]
	pub followers: Option<Followers>,
	/// Whether the playlist is public; `None` when not relevant.
	#[serde(default)]
	pub public: Option<bool>,
	/// Playlist tracks, first page.
	#[serde(default)]
	pub tracks: Option<Page<TrackItem>>,
}

/// Body returned after creating a playlist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
	/// Identifier of the new playlist.
	pub id: PlaylistId,
	/// Title.
	pub name: String,
	/// Description as stored.
	#[serde(default)]
	pub description: Option<String>,
	/// Whether other users may edit it.
	#[serde(default)]
	pub collaborative: bool,
	/// Provider links.
	#[serde(default)]
	pub external_urls: ExternalUrls,
	/// API link.
	#[serde(default)]
	pub href: String,
	/// Catalog URI.
	pub uri: String,
	/// Initial version.
	pub snapshot_id: String,
}

/// Page of the current user's playlists.
pub type CurrentPlaylists = Page<Playlist>;

/// Track reference used when removing tracks from a playlist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackUri {
	/// Catalog URI of the track.
	pub uri: String,
}
impl TrackUri {
	/// Wraps a track URI.
	pub fn new(uri: impl Into<String>) -> Self {
		Self { uri: uri.into() }
	}
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePlaylistBody<'a> {
	pub(crate) name: &'a str,
	pub(crate) description: &'a str,
	pub(crate) public: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddTracksBody<'a> {
	pub(crate) uris: &'a [String],
	pub(crate) position: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveTracksBody<'a> {
	pub(crate) tracks: &'a [TrackUri],
	pub(crate) snapshot_id: &'a str,
}
