//! Albums, artists, and tracks.

// self
use crate::{
	_prelude::*,
	auth::AlbumId,
	catalog::model::{ExternalUrls, Image, Page, Restrictions},
};

/// Artist summary or full artist object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
	/// Artist identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Object type, always `artist`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Catalog URI.
	pub uri: String,
	/// API link.
	#[serde(default)]
	pub href: String,
	/// Provider links.
	#[serde(default)]
	pub external_urls: ExternalUrls,
	/// Artist images; present on full artist objects only.
	#[serde(default)]
	pub images: Option<Vec<Image>>,
}

/// Album summary, as embedded in tracks, releases, and the user's library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
	/// Album identifier.
	pub id: AlbumId,
	/// Title.
	pub name: String,
	/// `album`, `single`, or `compilation`.
	pub album_type: String,
	/// Number of tracks.
	#[serde(default)]
	pub total_tracks: u32,
	/// Markets where the album is available.
	#[serde(default)]
	pub available_markets: Vec<String>,
	/// Provider links.
	#[serde(default)]
	pub external_urls: ExternalUrls,
	/// API link.
	#[serde(default)]
	pub href: String,
	/// Cover art, largest first.
	#[serde(default)]
	pub images: Vec<Image>,
	/// Release date at the precision given by `release_date_precision`.
	#[serde(default)]
	pub release_date: String,
	/// `year`, `month`, or `day`.
	#[serde(default)]
	pub release_date_precision: String,
	/// Why the album is unavailable, if it is.
	#[serde(default)]
	pub restrictions: Option<Restrictions>,
	/// Catalog URI.
	pub uri: String,
	/// Credited artists.
	#[serde(default)]
	pub artists: Vec<Artist>,
	/// Playability in the user's market, when relinking was requested.
	#[serde(default)]
	pub is_playable: Option<bool>,
}

/// Full track object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
	/// Track identifier.
	pub id: String,
	/// Title.
	pub name: String,
	/// Album the track belongs to.
	pub album: Album,
	/// Credited artists.
	#[serde(default)]
	pub artists: Vec<Artist>,
	/// Markets where the track is available.
	#[serde(default)]
	pub available_markets: Vec<String>,
	/// Disc number within the album.
	#[serde(default)]
	pub disc_number: u32,
	/// Length in milliseconds.
	pub duration_ms: u64,
	/// Whether the track has explicit lyrics.
	#[serde(default)]
	pub explicit: bool,
	/// Provider links.
	#[serde(default)]
	pub external_urls: ExternalUrls,
	/// API link.
	#[serde(default)]
	pub href: String,
	/// Playability in the user's market, when relinking was requested.
	#[serde(default)]
	pub is_playable: Option<bool>,
	/// Why the track is unavailable, if it is.
	#[serde(default)]
	pub restrictions: Option<Restrictions>,
	/// Popularity between 0 and 100.
	#[serde(default)]
	pub popularity: u32,
	/// 30-second preview clip.
	#[serde(default)]
	pub preview_url: Option<String>,
	/// Position on its disc.
	#[serde(default)]
	pub track_number: u32,
	/// Catalog URI.
	pub uri: String,
	/// Whether the track is a local file.
	#[serde(default)]
	pub is_local: bool,
}

/// Track entry in a saved-tracks list or playlist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackItem {
	/// When the track was added; absent for very old playlists.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub added_at: Option<OffsetDateTime>,
	/// Whether the entry is a local file.
	#[serde(default)]
	pub is_local: Option<bool>,
	/// The track itself; `null` when it was removed from the catalog.
	#[serde(default)]
	pub track: Option<Track>,
}

/// Album entry in the user's library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAlbum {
	/// When the album was saved.
	#[serde(with = "time::serde::rfc3339")]
	pub added_at: OffsetDateTime,
	/// The saved album.
	pub album: Album,
}

/// Track as listed inside an album.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumTrack {
	/// Track identifier.
	pub id: String,
	/// Title.
	pub name: String,
	/// Credited artists.
	#[serde(default)]
	pub artists: Vec<Artist>,
	/// Disc number within the album.
	#[serde(default)]
	pub disc_number: u32,
	/// Length in milliseconds.
	pub duration_ms: u64,
	/// Whether the track has explicit lyrics.
	#[serde(default)]
	pub explicit: bool,
	/// 30-second preview clip.
	#[serde(default)]
	pub preview_url: Option<String>,
	/// Position on its disc.
	#[serde(default)]
	pub track_number: u32,
	/// Catalog URI.
	pub uri: String,
	/// Whether the track is a local file.
	#[serde(default)]
	pub is_local: bool,
}

/// Full album object returned by the album detail endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDetails {
	/// Summary fields shared with [`Album`].
	#[serde(flatten)]
	pub album: Album,
	/// Album tracks, first page.
	pub tracks: Page<AlbumTrack>,
	/// Record label.
	#[serde(default)]
	pub label: String,
	/// Popularity between 0 and 100.
	#[serde(default)]
	pub popularity: u32,
}

/// Saved-tracks page.
pub type SavedTracks = Page<TrackItem>;
/// Saved-albums page.
pub type SavedAlbums = Page<SavedAlbum>;
