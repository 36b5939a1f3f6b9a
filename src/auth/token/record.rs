//! Credential records, the refresh window, and their builder.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// A token whose expiry falls within this window of "now" is refreshed before use.
pub const REFRESH_WINDOW: Duration = Duration::minutes(5);

/// Lifecycle status for a credential at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token is valid and outside the refresh window.
	Active,
	/// Token is valid but expires within [`REFRESH_WINDOW`].
	NearExpiry,
	/// Token reached its expiry instant.
	Expired,
}

/// Errors produced by [`CredentialRecordBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CredentialRecordBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when no expiry (absolute or relative) was configured.
	#[error("Expiry must be supplied via expires_at or expires_in.")]
	MissingExpiry,
	/// Issued when `issued_at + expires_in` falls outside the representable date range.
	#[error("Relative expiry overflows the supported date range.")]
	ExpiryOutOfRange,
}

/// Complete credential triple produced by a successful token exchange or refresh.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Refresh token secret, when the server issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Absolute expiry instant.
	pub expires_at: OffsetDateTime,
}
impl CredentialRecord {
	/// Returns a builder for constructing records.
	pub fn builder() -> CredentialRecordBuilder {
		CredentialRecordBuilder::default()
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		status_at(self.expires_at, instant)
	}

	/// Returns `true` if the record should be refreshed before use at `instant`.
	pub fn needs_refresh_at(&self, instant: OffsetDateTime) -> bool {
		!matches!(self.status_at(instant), TokenStatus::Active)
	}

	/// Returns `true` if the record has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Fills in `previous` when the server omitted a rotated refresh token.
	pub fn retaining_refresh_token(mut self, previous: &TokenSecret) -> Self {
		if self.refresh_token.is_none() {
			self.refresh_token = Some(previous.clone());
		}

		self
	}
}
impl Debug for CredentialRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialRecord")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Partial credential view loaded from storage; any field may be absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StoredCredentials {
	/// Stored access token.
	pub access_token: Option<TokenSecret>,
	/// Stored refresh token.
	pub refresh_token: Option<TokenSecret>,
	/// Stored expiry instant.
	pub expires_at: Option<OffsetDateTime>,
}
impl StoredCredentials {
	/// Signed in means an access token is present, regardless of expiry.
	pub fn is_signed_in(&self) -> bool {
		self.access_token.is_some()
	}

	/// Returns `true` only when an expiry is stored and falls within [`REFRESH_WINDOW`].
	pub fn needs_refresh_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at
			.is_some_and(|expires_at| !matches!(status_at(expires_at, instant), TokenStatus::Active))
	}
}
impl Debug for StoredCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StoredCredentials")
			.field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
impl From<CredentialRecord> for StoredCredentials {
	fn from(record: CredentialRecord) -> Self {
		Self {
			access_token: Some(record.access_token),
			refresh_token: record.refresh_token,
			expires_at: Some(record.expires_at),
		}
	}
}

/// Builder for [`CredentialRecord`].
#[derive(Clone, Debug, Default)]
pub struct CredentialRecordBuilder {
	access_token: Option<TokenSecret>,
	refresh_token: Option<TokenSecret>,
	issued_at: Option<OffsetDateTime>,
	expires_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
}
impl CredentialRecordBuilder {
	/// Sets the instant `expires_in` is measured from; defaults to the current clock.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets an absolute expiry instant.
	pub fn expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Sets a relative expiry duration from the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(token));

		self
	}

	/// Consumes the builder and produces a [`CredentialRecord`].
	pub fn build(self) -> Result<CredentialRecord, CredentialRecordBuilderError> {
		let access_token =
			self.access_token.ok_or(CredentialRecordBuilderError::MissingAccessToken)?;
		let expires_at = match (self.expires_at, self.expires_in) {
			(Some(instant), _) => instant,
			(None, Some(delta)) => self
				.issued_at
				.unwrap_or_else(OffsetDateTime::now_utc)
				.checked_add(delta)
				.ok_or(CredentialRecordBuilderError::ExpiryOutOfRange)?,
			(None, None) => return Err(CredentialRecordBuilderError::MissingExpiry),
		};

		Ok(CredentialRecord { access_token, refresh_token: self.refresh_token, expires_at })
	}
}

fn status_at(expires_at: OffsetDateTime, instant: OffsetDateTime) -> TokenStatus {
	if instant >= expires_at {
		return TokenStatus::Expired;
	}
	if instant + REFRESH_WINDOW >= expires_at {
		return TokenStatus::NearExpiry;
	}

	TokenStatus::Active
}
