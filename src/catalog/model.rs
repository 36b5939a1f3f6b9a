//! Decoded catalog payloads.
//!
//! Field names follow the wire format (snake_case). Optional fields the service omits for
//! some objects default to `None` or empty collections rather than failing the decode.

pub mod album;
pub mod browse;
pub mod playlist;
pub mod search;
pub mod user;

pub use album::*;
pub use browse::*;
pub use playlist::*;
pub use search::*;
pub use user::*;

// self
use crate::_prelude::*;

/// Provider links keyed by provider name (e.g. `spotify`).
pub type ExternalUrls = BTreeMap<String, String>;

/// Offset-paginated collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
	/// Endpoint that produced this page.
	#[serde(default)]
	pub href: String,
	/// Items on this page.
	pub items: Vec<T>,
	/// Requested page size.
	#[serde(default)]
	pub limit: u32,
	/// Offset of the first item.
	#[serde(default)]
	pub offset: u32,
	/// Total number of items available.
	#[serde(default)]
	pub total: u32,
	/// URL of the next page.
	#[serde(default)]
	pub next: Option<String>,
	/// URL of the previous page.
	#[serde(default)]
	pub previous: Option<String>,
}

/// Artwork or avatar image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
	/// Image URL.
	pub url: String,
	/// Pixel height, when known.
	#[serde(default)]
	pub height: Option<u32>,
	/// Pixel width, when known.
	#[serde(default)]
	pub width: Option<u32>,
}

/// Follower count summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followers {
	/// Always `null` in current responses.
	#[serde(default)]
	pub href: Option<String>,
	/// Number of followers.
	pub total: u64,
}

/// Reason content is unavailable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restrictions {
	/// Restriction reason (e.g. `market`, `explicit`).
	pub reason: String,
}

/// Success value for mutations that return no content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyResponse;

/// Result of mutating a playlist's tracks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePlaylistResponse {
	/// Playlist version after the change.
	pub snapshot_id: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn page_tolerates_missing_cursor_fields() {
		let page: Page<Image> = serde_json::from_str(
			r#"{"href":"h","items":[{"url":"https://i.example.com/a.png"}],"limit":10,"offset":0,"total":1}"#,
		)
		.expect("Page should decode.");

		assert_eq!(page.items.len(), 1);
		assert_eq!(page.items[0].height, None);
		assert!(page.next.is_none());
	}

	#[test]
	fn empty_response_decodes_from_null() {
		let value: EmptyResponse = serde_json::from_str("null").expect("Null should decode.");

		assert_eq!(value, EmptyResponse);
	}
}
