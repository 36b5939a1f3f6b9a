//! Playlist reads and edits.

// self
use crate::{
	_prelude::*,
	auth::{AlbumId, PlaylistId},
	catalog::{
		AlbumDetails, CatalogClient, CreatePlaylistResponse, CurrentPlaylists, PlaylistDetails,
		TrackUri, UpdatePlaylistResponse,
		model::playlist::{AddTracksBody, CreatePlaylistBody, RemoveTracksBody},
		route::Route,
	},
	http::HttpTransport,
	pipeline::{CachePolicy, EmptyBody, HttpMethod},
};

const CURRENT_PLAYLISTS: Route = Route::new("/me/playlists").with_query(&[("limit", "10")]);
const PLAYLIST: Route = Route::new("/playlists/{}");
const PLAYLIST_TRACKS: Route = Route::new("/playlists/{}/tracks");
const USER_PLAYLISTS: Route = Route::new("/users/{}/playlists");
const ALBUM: Route = Route::new("/albums/{}");

impl<C> CatalogClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Ten of the signed-in user's playlists. Pass
	/// [`CachePolicy::ReloadIgnoringCache`] after an edit.
	pub async fn current_playlists(&self, cache_policy: CachePolicy) -> Result<CurrentPlaylists> {
		self.get(self.url(CURRENT_PLAYLISTS, &[])?, cache_policy.reads_cache()).await
	}

	/// Full album with its first page of tracks.
	pub async fn album_details(&self, album: &AlbumId) -> Result<AlbumDetails> {
		self.get(self.url(ALBUM, &[album.as_ref()])?, true).await
	}

	/// Full playlist with its first page of tracks. Never cached.
	pub async fn playlist_details(&self, playlist: &PlaylistId) -> Result<PlaylistDetails> {
		self.get(self.url(PLAYLIST, &[playlist.as_ref()])?, false).await
	}

	/// Creates a public playlist owned by the signed-in user.
	///
	/// Looks up the profile first to learn the user id.
	pub async fn create_playlist(
		&self,
		name: &str,
		description: &str,
	) -> Result<CreatePlaylistResponse> {
		let profile = self.current_user_profile().await?;
		let url = self.url(USER_PLAYLISTS, &[profile.id.as_ref()])?;

		tracing::debug!(user = %profile.id, "Creating playlist.");

		self.send_json(
			HttpMethod::Post,
			url,
			&CreatePlaylistBody { name, description, public: true },
			EmptyBody::Rejected,
		)
		.await
	}

	/// Inserts `uris` at the top of `playlist`.
	pub async fn add_to_playlist(
		&self,
		playlist: &PlaylistId,
		uris: &[String],
	) -> Result<UpdatePlaylistResponse> {
		self.send_json(
			HttpMethod::Post,
			self.url(PLAYLIST_TRACKS, &[playlist.as_ref()])?,
			&AddTracksBody { uris, position: 0 },
			EmptyBody::Rejected,
		)
		.await
	}

	/// Removes `tracks` from the playlist version identified by `snapshot_id`.
	pub async fn remove_from_playlist(
		&self,
		playlist: &PlaylistId,
		snapshot_id: &str,
		tracks: &[TrackUri],
	) -> Result<UpdatePlaylistResponse> {
		self.send_json(
			HttpMethod::Delete,
			self.url(PLAYLIST_TRACKS, &[playlist.as_ref()])?,
			&RemoveTracksBody { tracks, snapshot_id },
			EmptyBody::Rejected,
		)
		.await
	}
}
