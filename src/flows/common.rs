//! Single-flight refresh coordination shared by [`Broker`](crate::flows::Broker) flows.
//!
//! At most one refresh runs at a time. The caller that observes the need first installs
//! the refresh as a shared future; everyone arriving while it is installed awaits a clone
//! of the same future. Any clone drives it, so the token request runs to completion as
//! long as one caller is still waiting, even if the caller that started it went away.

// crates.io
use futures::future::{BoxFuture, FutureExt, Shared};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Outcome every clone of an in-flight refresh resolves with.
pub(crate) type RefreshOutput = std::result::Result<TokenSecret, RefreshFailure>;

/// Refresh future shared between its starter and every coalesced caller.
pub(crate) type InFlightRefresh = Shared<BoxFuture<'static, RefreshOutput>>;

/// Failure of a shared refresh.
///
/// The caller that started the refresh recovers the original error through
/// [`RefreshFailure::into_original`]; everyone else sees [`Error::RefreshFailed`].
#[derive(Clone, Debug)]
pub(crate) struct RefreshFailure {
	reason: String,
	original: Arc<Mutex<Option<Error>>>,
}
impl RefreshFailure {
	pub(crate) fn new(error: Error) -> Self {
		Self { reason: error.to_string(), original: Arc::new(Mutex::new(Some(error))) }
	}

	/// Takes the underlying error; falls back to [`Error::RefreshFailed`] once taken.
	pub(crate) fn into_original(self) -> Error {
		let taken = self.original.lock().take();

		taken.unwrap_or_else(|| self.into_waiter_error())
	}

	pub(crate) fn into_waiter_error(self) -> Error {
		Error::RefreshFailed { reason: self.reason }
	}
}

/// Coordinator state guarded by the broker's mutex.
#[derive(Default)]
pub(crate) struct RefreshState {
	in_flight: Option<InFlightRefresh>,
}
impl RefreshState {
	pub(crate) fn is_refreshing(&self) -> bool {
		self.in_flight.is_some()
	}

	/// Returns a clone of the in-flight refresh, if any.
	pub(crate) fn join(&self) -> Option<InFlightRefresh> {
		self.in_flight.clone()
	}

	/// Installs `refresh` as the in-flight refresh and returns the starter's handle.
	pub(crate) fn start(
		&mut self,
		refresh: impl 'static + Send + Future<Output = RefreshOutput>,
	) -> InFlightRefresh {
		let shared = refresh.boxed().shared();

		self.in_flight = Some(shared.clone());

		shared
	}

	/// Returns the coordinator to idle. Called by the refresh future itself once the
	/// outcome is persisted, before any clone observes it.
	pub(crate) fn finish(&mut self) {
		self.in_flight = None;
	}
}
impl Debug for RefreshState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RefreshState").field("refreshing", &self.is_refreshing()).finish()
	}
}

/// Result of evaluating a `valid_token` call under the coordinator lock.
pub(crate) enum TokenTicket {
	/// The stored token can be used as-is.
	Ready(TokenSecret),
	/// Another caller is refreshing; await its outcome.
	Wait(InFlightRefresh),
	/// This caller started the refresh.
	Lead(InFlightRefresh),
}

/// Result of evaluating an explicit refresh request under the coordinator lock.
pub(crate) enum RefreshTicket {
	/// Another caller is refreshing.
	InFlight,
	/// The stored credentials do not call for a refresh.
	NotNeeded,
	/// This caller started the refresh.
	Lead(InFlightRefresh),
}
