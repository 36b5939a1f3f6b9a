//! Path templates for catalog endpoints.

// self
use crate::{_prelude::*, error::RequestError};

/// Endpoint path relative to the API base. `{}` segments are filled, in order, with
/// percent-encoded path parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Route {
	template: &'static str,
	query: &'static [(&'static str, &'static str)],
}
impl Route {
	pub(crate) const fn new(template: &'static str) -> Self {
		Self { template, query: &[] }
	}

	pub(crate) const fn with_query(self, query: &'static [(&'static str, &'static str)]) -> Self {
		Self { query, ..self }
	}

	/// Joins the template onto `base`, substituting `args` for the placeholders.
	pub(crate) fn resolve(&self, base: &Url, args: &[&str]) -> Result<Url, RequestError> {
		let mut url = base.clone();
		let mut args = args.iter();

		{
			let mut segments = url
				.path_segments_mut()
				.map_err(|_| RequestError::CannotBeABase { url: base.to_string() })?;

			segments.pop_if_empty();

			for segment in self.template.split('/').filter(|segment| !segment.is_empty()) {
				if segment == "{}" {
					let arg = args
						.next()
						.ok_or(RequestError::MissingPathParameter { route: self.template })?;

					segments.push(arg);
				} else {
					segments.push(segment);
				}
			}
		}

		if args.next().is_some() {
			return Err(RequestError::UnexpectedPathParameter { route: self.template });
		}
		if !self.query.is_empty() {
			url.query_pairs_mut().extend_pairs(self.query);
		}

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn base() -> Url {
		Url::parse("https://api.example.com/v1").expect("Base fixture should parse.")
	}

	#[test]
	fn static_routes_append_to_the_base_path() {
		let url = Route::new("/browse/new-releases")
			.with_query(&[("limit", "10")])
			.resolve(&base(), &[])
			.expect("Route should resolve.");

		assert_eq!(url.as_str(), "https://api.example.com/v1/browse/new-releases?limit=10");
	}

	#[test]
	fn trailing_slash_on_base_is_not_doubled() {
		let base = Url::parse("https://api.example.com/v1/").expect("Base fixture should parse.");
		let url = Route::new("/me").resolve(&base, &[]).expect("Route should resolve.");

		assert_eq!(url.as_str(), "https://api.example.com/v1/me");
	}

	#[test]
	fn placeholders_are_percent_encoded() {
		let url = Route::new("/browse/categories/{}/playlists")
			.resolve(&base(), &["hip hop/rap"])
			.expect("Route should resolve.");

		assert_eq!(url.path(), "/v1/browse/categories/hip%20hop%2Frap/playlists");
	}

	#[test]
	fn parameter_count_must_match() {
		let route = Route::new("/albums/{}");

		assert!(matches!(
			route.resolve(&base(), &[]),
			Err(RequestError::MissingPathParameter { route: "/albums/{}" })
		));
		assert!(matches!(
			route.resolve(&base(), &["a", "b"]),
			Err(RequestError::UnexpectedPathParameter { .. })
		));
	}
}
