//! Refresh orchestration and the `valid_token` entry point.
//!
//! [`Broker::valid_token`] hands back the stored access token unless it is within
//! [`REFRESH_WINDOW`](crate::auth::REFRESH_WINDOW) of expiry, in which case it joins (or
//! starts) the single in-flight refresh. [`Broker::refresh_access_token`] starts a refresh
//! explicitly and reports whether one was performed.

mod metrics;

pub use metrics::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::{CredentialRecord, TokenSecret},
	flows::{
		Broker,
		common::{RefreshFailure, RefreshOutput, RefreshTicket, TokenTicket},
	},
	http::HttpTransport,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// What [`Broker::refresh_access_token`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
	/// A network refresh ran and the new credentials were persisted.
	Refreshed,
	/// The stored token is outside the refresh window, or there is nothing to refresh with.
	NotNeeded,
	/// Another caller's refresh was already in flight; nothing new was started.
	AlreadyInFlight,
}

impl<C> Broker<C>
where
	C: ?Sized + HttpTransport,
{
	/// Returns an access token suitable for an API call, refreshing first when the stored
	/// one is near expiry.
	///
	/// Fails with [`Error::NotSignedIn`] when no access token is stored. Callers that arrive
	/// while a refresh is in flight wait for it and receive its token, or
	/// [`Error::RefreshFailed`] when it fails. Cancelling any caller, including the one that
	/// started the refresh, leaves the refresh running for the others.
	pub async fn valid_token(&self) -> Result<TokenSecret> {
		match self.acquire_token(OffsetDateTime::now_utc())? {
			TokenTicket::Ready(token) => Ok(token),
			TokenTicket::Wait(refresh) => {
				tracing::debug!("Awaiting in-flight token refresh.");

				refresh.await.map_err(RefreshFailure::into_waiter_error)
			},
			TokenTicket::Lead(refresh) => refresh.await.map_err(RefreshFailure::into_original),
		}
	}

	/// Refreshes the stored credentials if they are near expiry and a refresh token exists.
	///
	/// Never starts a second refresh while one is in flight.
	pub async fn refresh_access_token(&self) -> Result<RefreshOutcome> {
		match self.acquire_refresh(OffsetDateTime::now_utc()) {
			RefreshTicket::InFlight => Ok(RefreshOutcome::AlreadyInFlight),
			RefreshTicket::NotNeeded => Ok(RefreshOutcome::NotNeeded),
			RefreshTicket::Lead(refresh) => refresh
				.await
				.map(|_| RefreshOutcome::Refreshed)
				.map_err(RefreshFailure::into_original),
		}
	}

	fn acquire_token(&self, now: OffsetDateTime) -> Result<TokenTicket> {
		let mut state = self.refresh_state.lock();

		if let Some(refresh) = state.join() {
			return Ok(TokenTicket::Wait(refresh));
		}

		let stored = self.store.read();
		let access_token = stored.access_token.clone().ok_or(Error::NotSignedIn)?;

		if !stored.needs_refresh_at(now) {
			return Ok(TokenTicket::Ready(access_token));
		}

		match stored.refresh_token {
			Some(refresh_token) =>
				Ok(TokenTicket::Lead(state.start(self.refresh_future(refresh_token)))),
			None => {
				tracing::debug!("Token is near expiry but no refresh token is stored.");

				Ok(TokenTicket::Ready(access_token))
			},
		}
	}

	fn acquire_refresh(&self, now: OffsetDateTime) -> RefreshTicket {
		let mut state = self.refresh_state.lock();

		if state.is_refreshing() {
			return RefreshTicket::InFlight;
		}

		let stored = self.store.read();

		match stored.refresh_token {
			Some(refresh_token) if stored.needs_refresh_at(now) =>
				RefreshTicket::Lead(state.start(self.refresh_future(refresh_token))),
			_ => RefreshTicket::NotNeeded,
		}
	}

	/// Builds the self-contained refresh: token request, persistence, and release of the
	/// coordinator. It owns everything it touches so any waiting caller can drive it.
	fn refresh_future(
		&self,
		refresh_token: TokenSecret,
	) -> impl 'static + Send + Future<Output = RefreshOutput> + use<C> {
		const KIND: FlowKind = FlowKind::Refresh;

		let endpoint = self.token_endpoint();
		let store = self.store.clone();
		let metrics = self.refresh_metrics.clone();
		let state = self.refresh_state.clone();
		let span = FlowSpan::new(KIND, "refresh_access_token");

		async move {
			obs::record_flow_outcome(KIND, FlowOutcome::Attempt);
			metrics.record_attempt();
			tracing::info!("Refreshing access token.");

			let result: Result<CredentialRecord> = span
				.instrument(async {
					let record =
						endpoint.refresh(&refresh_token).await?.retaining_refresh_token(&refresh_token);

					store.write(&record);

					Ok(record)
				})
				.await;

			obs::record_flow_outcome(KIND, FlowOutcome::of(&result));
			state.lock().finish();

			match result {
				Ok(record) => {
					metrics.record_success();
					tracing::info!("Access token refreshed.");

					Ok(record.access_token)
				},
				Err(e) => {
					metrics.record_failure();
					tracing::warn!(error = %e, "Access token refresh failed.");

					Err(RefreshFailure::new(e))
				},
			}
		}
	}
}
