//! Strongly typed catalog identifiers.
//!
//! Each identifier is the bare base-62 style id the Web API puts in paths (`4aawyAB9vmqN3uQ7FjRGTy`).
//! Parsing through [`FromStr`] also accepts the `spotify:<kind>:<id>` URI form.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

macro_rules! catalog_id {
	($name:ident, $namespace:literal, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// URI namespace segment (`spotify:<namespace>:<id>`).
			pub const NAMESPACE: &'static str = $namespace;

			/// Validates a bare identifier.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let value = value.as_ref();

				check($namespace, value)?;

				Ok(Self(value.to_owned()))
			}

			/// Returns the `spotify:<namespace>:<id>` URI for this identifier.
			pub fn uri(&self) -> String {
				format!("{URI_SCHEME}:{}:{}", $namespace, self.0)
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				check($namespace, &value)?;

				Ok(Self(value))
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({})", stringify!($name), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(strip_uri($namespace, s)?)
			}
		}
	};
}

const URI_SCHEME: &str = "spotify";
const MAX_LEN: usize = 128;

/// Error returned when an identifier is rejected.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{namespace} identifier cannot be empty.")]
	Empty {
		/// URI namespace of the identifier (album, playlist, category, user).
		namespace: &'static str,
	},
	/// The identifier contains whitespace or a URI separator.
	#[error("{namespace} identifier contains {found:?}.")]
	InvalidCharacter {
		/// URI namespace of the identifier.
		namespace: &'static str,
		/// First offending character.
		found: char,
	},
	/// The identifier exceeded the allowed length.
	#[error("{namespace} identifier exceeds {max} bytes.")]
	TooLong {
		/// URI namespace of the identifier.
		namespace: &'static str,
		/// Maximum permitted length.
		max: usize,
	},
	/// A URI named a different namespace than the target type.
	#[error("Expected a {expected} URI, found {found:?}.")]
	WrongNamespace {
		/// Namespace the caller asked for.
		expected: &'static str,
		/// Namespace present in the URI.
		found: String,
	},
}

catalog_id! { AlbumId, "album", "Catalog identifier of an album." }
catalog_id! { PlaylistId, "playlist", "Catalog identifier of a playlist." }
catalog_id! { CategoryId, "category", "Catalog identifier of a browse category." }
catalog_id! { UserId, "user", "Catalog identifier of a user account." }

fn check(namespace: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() {
		return Err(IdentifierError::Empty { namespace });
	}
	if let Some(found) = value.chars().find(|c| c.is_whitespace() || *c == ':' || *c == '/') {
		return Err(IdentifierError::InvalidCharacter { namespace, found });
	}
	if value.len() > MAX_LEN {
		return Err(IdentifierError::TooLong { namespace, max: MAX_LEN });
	}

	Ok(())
}

fn strip_uri<'a>(namespace: &'static str, value: &'a str) -> Result<&'a str, IdentifierError> {
	let Some(rest) = value.strip_prefix(URI_SCHEME).and_then(|rest| rest.strip_prefix(':')) else {
		return Ok(value);
	};

	match rest.split_once(':') {
		Some((found, id)) if found == namespace => Ok(id),
		Some((found, _)) =>
			Err(IdentifierError::WrongNamespace { expected: namespace, found: found.to_owned() }),
		None => Err(IdentifierError::InvalidCharacter { namespace, found: ':' }),
	}
}
