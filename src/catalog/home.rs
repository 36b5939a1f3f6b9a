//! Concurrent home-screen load.

// self
use crate::{
	_prelude::*,
	catalog::{CatalogClient, CategoriesResponse, CurrentPlaylists, NewReleases, SavedTracks},
	http::HttpTransport,
	pipeline::CachePolicy,
};

/// Outcome of each home-screen read, recorded individually.
#[derive(Debug)]
pub struct HomeFeed {
	/// New album releases.
	pub new_releases: Result<NewReleases>,
	/// The user's playlists.
	pub playlists: Result<CurrentPlaylists>,
	/// Browse categories.
	pub categories: Result<CategoriesResponse>,
	/// Recently saved tracks.
	pub saved_tracks: Result<SavedTracks>,
}
impl HomeFeed {
	/// Returns `true` when every read succeeded.
	pub fn is_complete(&self) -> bool {
		self.new_releases.is_ok()
			&& self.playlists.is_ok()
			&& self.categories.is_ok()
			&& self.saved_tracks.is_ok()
	}
}

impl<C> CatalogClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Runs the four home-screen reads concurrently and waits for all of them; one failure
	/// does not cancel the others.
	pub async fn home_feed(&self) -> HomeFeed {
		let (new_releases, playlists, categories, saved_tracks) = futures::join!(
			self.new_releases(),
			self.current_playlists(CachePolicy::ReturnCacheElseLoad),
			self.categories(),
			self.saved_tracks(),
		);
		let feed = HomeFeed { new_releases, playlists, categories, saved_tracks };

		tracing::debug!(complete = feed.is_complete(), "Home feed loaded.");

		feed
	}
}
