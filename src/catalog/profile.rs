//! Current user profile.

// self
use crate::{
	_prelude::*,
	catalog::{CatalogClient, UserProfile, route::Route},
	http::HttpTransport,
};

const PROFILE: Route = Route::new("/me");

impl<C> CatalogClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// `GET /me`, served from cache when available.
	pub async fn current_user_profile(&self) -> Result<UserProfile> {
		self.get(self.url(PROFILE, &[])?, true).await
	}
}
