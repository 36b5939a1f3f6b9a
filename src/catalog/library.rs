//! The signed-in user's saved tracks and albums.

// self
use crate::{
	_prelude::*,
	auth::AlbumId,
	catalog::{CatalogClient, EmptyResponse, SavedAlbums, SavedTracks, route::Route},
	http::HttpTransport,
	pipeline::{EmptyBody, HttpMethod},
};

const SAVED_TRACKS: Route = Route::new("/me/tracks").with_query(&[("limit", "10")]);
const SAVED_ALBUMS: Route = Route::new("/me/albums");

#[derive(Debug, Serialize)]
struct AlbumIdsBody<'a> {
	ids: &'a [AlbumId],
}

impl<C> CatalogClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Ten most recently saved tracks.
	pub async fn saved_tracks(&self) -> Result<SavedTracks> {
		self.get(self.url(SAVED_TRACKS, &[])?, true).await
	}

	/// Saved albums; always loaded from the network so library edits show up immediately.
	pub async fn saved_albums(&self) -> Result<SavedAlbums> {
		self.get(self.url(SAVED_ALBUMS, &[])?, false).await
	}

	/// `PUT /me/albums` with `{ids}`.
	pub async fn save_albums(&self, ids: &[AlbumId]) -> Result<EmptyResponse> {
		self.send_json(
			HttpMethod::Put,
			self.url(SAVED_ALBUMS, &[])?,
			&AlbumIdsBody { ids },
			EmptyBody::Allowed,
		)
		.await
	}

	/// `DELETE /me/albums` with `{ids}`.
	pub async fn remove_saved_albums(&self, ids: &[AlbumId]) -> Result<EmptyResponse> {
		self.send_json(
			HttpMethod::Delete,
			self.url(SAVED_ALBUMS, &[])?,
			&AlbumIdsBody { ids },
			EmptyBody::Allowed,
		)
		.await
	}
}
