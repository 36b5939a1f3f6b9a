//! Catalog search.

// self
use crate::{
	_prelude::*,
	catalog::{CatalogClient, SearchResults, route::Route},
	http::HttpTransport,
};

const SEARCH: Route =
	Route::new("/search").with_query(&[("limit", "10"), ("type", "album,artist,playlist,track")]);

impl<C> CatalogClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Searches albums, artists, playlists, and tracks. Never cached.
	pub async fn search(&self, query: &str) -> Result<SearchResults> {
		let mut url = self.url(SEARCH, &[])?;

		url.query_pairs_mut().append_pair("q", query);

		self.get(url, false).await
	}
}
