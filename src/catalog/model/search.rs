//! Search results.

// self
use crate::{
	_prelude::*,
	catalog::model::{Album, Artist, Playlist, Track},
};

/// Result bucket for one object type. The service returns `null` for entries it could not
/// render, so items are optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBucket<T> {
	/// Matches, in relevance order.
	pub items: Vec<Option<T>>,
	/// Total number of matches.
	#[serde(default)]
	pub total: u32,
}
impl<T> SearchBucket<T> {
	/// Iterates over the matches that were rendered.
	pub fn present(&self) -> impl Iterator<Item = &T> {
		self.items.iter().flatten()
	}
}

/// Matches across every searched object type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
	/// Album matches.
	pub albums: SearchBucket<Album>,
	/// Artist matches.
	pub artists: SearchBucket<Artist>,
	/// Playlist matches.
	pub playlists: SearchBucket<Playlist>,
	/// Track matches.
	pub tracks: SearchBucket<Track>,
}
