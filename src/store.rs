//! Durable key-value persistence for the credential triple and the app-lock preference.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, StoredCredentials, TokenSecret},
};

/// Well-known keys written by [`TokenStore`].
pub mod keys {
	/// Access token key.
	pub const ACCESS_TOKEN: &str = "access_token";
	/// Refresh token key.
	pub const REFRESH_TOKEN: &str = "refresh_token";
	/// Expiry instant key (RFC 3339).
	pub const EXPIRATION_DATE: &str = "expiration_date";
	/// App-lock preference key (`"true"` or `"false"`).
	pub const APP_LOCK: &str = "is_app_lock";
}

/// Storage backend contract for small string values.
pub trait KeyValueStore
where
	Self: Send + Sync,
{
	/// Reads the value stored under `key`.
	fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

	/// Persists `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

	/// Removes `key`; absent keys are not an error.
	fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Error type produced by [`KeyValueStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Credential persistence facade over a [`KeyValueStore`].
///
/// Storage failures are logged and otherwise absorbed: reads fall back to "absent" and
/// writes are best-effort, so callers only ever observe a missing credential.
#[derive(Clone)]
pub struct TokenStore {
	backend: Arc<dyn KeyValueStore>,
}
impl TokenStore {
	/// Wraps an existing backend.
	pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
		Self { backend }
	}

	/// Builds a store over a fresh [`MemoryStore`].
	pub fn in_memory() -> Self {
		Self::new(Arc::new(MemoryStore::default()))
	}

	/// Loads whatever credential fields are present.
	pub fn read(&self) -> StoredCredentials {
		let expires_at = self.get(keys::EXPIRATION_DATE).and_then(|raw| {
			OffsetDateTime::parse(&raw, &time::format_description::well_known::Rfc3339)
				.inspect_err(|e| {
					tracing::warn!(error = %e, "Stored expiration date is unreadable; ignoring it.")
				})
				.ok()
		});

		StoredCredentials {
			access_token: self.get(keys::ACCESS_TOKEN).map(TokenSecret::new),
			refresh_token: self.get(keys::REFRESH_TOKEN).map(TokenSecret::new),
			expires_at,
		}
	}

	/// Persists the record; the refresh token is only written when present.
	pub fn write(&self, record: &CredentialRecord) {
		self.set(keys::ACCESS_TOKEN, record.access_token.expose().to_owned());

		if let Some(refresh) = &record.refresh_token {
			self.set(keys::REFRESH_TOKEN, refresh.expose().to_owned());
		}

		match record.expires_at.format(&time::format_description::well_known::Rfc3339) {
			Ok(formatted) => self.set(keys::EXPIRATION_DATE, formatted),
			Err(e) => tracing::warn!(error = %e, "Failed to format expiration date."),
		}
	}

	/// Removes the credential triple. The app-lock preference is left untouched.
	pub fn clear(&self) {
		for key in [keys::ACCESS_TOKEN, keys::REFRESH_TOKEN, keys::EXPIRATION_DATE] {
			if let Err(e) = self.backend.remove(key) {
				tracing::warn!(key, error = %e, "Failed to remove stored credential.");
			}
		}
	}

	/// Returns the app-lock preference; defaults to `false`.
	pub fn app_lock_enabled(&self) -> bool {
		self.get(keys::APP_LOCK).is_some_and(|raw| raw == "true")
	}

	/// Persists the app-lock preference.
	pub fn set_app_lock_enabled(&self, enabled: bool) {
		self.set(keys::APP_LOCK, enabled.to_string());
	}

	fn get(&self, key: &str) -> Option<String> {
		self.backend
			.get(key)
			.inspect_err(|e| tracing::warn!(key, error = %e, "Failed to read stored value."))
			.ok()
			.flatten()
	}

	fn set(&self, key: &str, value: String) {
		if let Err(e) = self.backend.set(key, value) {
			tracing::warn!(key, error = %e, "Failed to persist value.");
		}
	}
}
impl Debug for TokenStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenStore").finish_non_exhaustive()
	}
}
