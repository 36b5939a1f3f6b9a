//! Browse endpoints: releases, featured playlists, categories, and recommendations.

// self
use crate::{
	_prelude::*,
	auth::CategoryId,
	catalog::{
		CatalogClient, CategoriesResponse, Category, CategoryPlaylists, FeaturedPlaylists, Genres,
		NewReleases, Recommendations, route::Route,
	},
	http::HttpTransport,
};

const NEW_RELEASES: Route = Route::new("/browse/new-releases").with_query(&[("limit", "10")]);
const FEATURED_PLAYLISTS: Route =
	Route::new("/browse/featured-playlists").with_query(&[("limit", "10")]);
const CATEGORIES: Route = Route::new("/browse/categories");
const CATEGORY: Route = Route::new("/browse/categories/{}");
const CATEGORY_PLAYLISTS: Route = Route::new("/browse/categories/{}/playlists");
const GENRE_SEEDS: Route = Route::new("/recommendations/available-genre-seeds");
const RECOMMENDATIONS: Route = Route::new("/recommendations").with_query(&[("limit", "10")]);

impl<C> CatalogClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Ten newest album releases.
	pub async fn new_releases(&self) -> Result<NewReleases> {
		self.get(self.url(NEW_RELEASES, &[])?, true).await
	}

	/// Ten featured playlists.
	pub async fn featured_playlists(&self) -> Result<FeaturedPlaylists> {
		self.get(self.url(FEATURED_PLAYLISTS, &[])?, true).await
	}

	/// Browse categories.
	pub async fn categories(&self) -> Result<CategoriesResponse> {
		self.get(self.url(CATEGORIES, &[])?, true).await
	}

	/// A single category.
	pub async fn category_details(&self, category: &CategoryId) -> Result<Category> {
		self.get(self.url(CATEGORY, &[category.as_ref()])?, true).await
	}

	/// Playlists filed under `category`.
	pub async fn category_playlists(&self, category: &CategoryId) -> Result<CategoryPlaylists> {
		self.get(self.url(CATEGORY_PLAYLISTS, &[category.as_ref()])?, true).await
	}

	/// Genre names usable as recommendation seeds.
	pub async fn recommended_genres(&self) -> Result<Genres> {
		self.get(self.url(GENRE_SEEDS, &[])?, true).await
	}

	/// Ten tracks recommended from up to five genre seeds.
	pub async fn recommendations<I, S>(&self, seed_genres: I) -> Result<Recommendations>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let seeds = seed_genres
			.into_iter()
			.map(|genre| genre.as_ref().to_owned())
			.collect::<Vec<_>>()
			.join(",");
		let mut url = self.url(RECOMMENDATIONS, &[])?;

		url.query_pairs_mut().append_pair("seed_genres", &seeds);

		self.get(url, true).await
	}
}
