//! Passive network reachability state consulted before every API request.
//!
//! The host platform owns the actual path observer and forwards updates through
//! [`ConnectivityMonitor::report`]; reads never block on I/O.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::_prelude::*;

/// Interface carrying the current network path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterfaceKind {
	/// Wi-Fi.
	Wifi,
	/// Cellular data.
	Cellular,
	/// Wired ethernet.
	Wired,
	/// Loopback only.
	Loopback,
	/// Any other interface type.
	Other,
}

/// Snapshot of a network path update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStatus {
	/// Whether the path can carry traffic.
	pub available: bool,
	/// Interface the path uses, when known.
	pub interface: Option<InterfaceKind>,
}
impl PathStatus {
	/// A usable path over `interface`.
	pub const fn satisfied(interface: InterfaceKind) -> Self {
		Self { available: true, interface: Some(interface) }
	}

	/// No usable path.
	pub const fn unsatisfied() -> Self {
		Self { available: false, interface: None }
	}
}
impl Default for PathStatus {
	fn default() -> Self {
		Self::unsatisfied()
	}
}

/// Shared reachability flag plus the interface kind of the last reported path.
#[derive(Debug, Default)]
pub struct ConnectivityMonitor {
	status: RwLock<PathStatus>,
	stopped: AtomicBool,
}
impl ConnectivityMonitor {
	/// Creates a monitor that reports "unavailable" until the first update arrives.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a monitor seeded with a known status.
	pub fn with_status(status: PathStatus) -> Self {
		Self { status: RwLock::new(status), stopped: AtomicBool::new(false) }
	}

	/// Applies a path update. Returns `false` when monitoring has been stopped.
	pub fn report(&self, status: PathStatus) -> bool {
		if self.stopped.load(Ordering::Acquire) {
			return false;
		}

		let previous = std::mem::replace(&mut *self.status.write(), status);

		if previous.available != status.available {
			tracing::info!(
				available = status.available,
				interface = ?status.interface,
				"Network availability changed."
			);
		}

		true
	}

	/// Current availability.
	pub fn is_available(&self) -> bool {
		self.status.read().available
	}

	/// Interface of the last reported path.
	pub fn interface(&self) -> Option<InterfaceKind> {
		self.status.read().interface
	}

	/// Full snapshot of the last reported path.
	pub fn status(&self) -> PathStatus {
		*self.status.read()
	}

	/// Stops accepting updates; the last known status remains readable.
	pub fn stop_monitoring(&self) {
		self.stopped.store(true, Ordering::Release);
	}

	/// Returns `true` until [`stop_monitoring`](Self::stop_monitoring) is called.
	pub fn is_monitoring(&self) -> bool {
		!self.stopped.load(Ordering::Acquire)
	}
}
