//! Service-facing configuration.
//!
//! `descriptor` exposes validated metadata (`ServiceDescriptor`) covering the OAuth
//! endpoints, the catalog API base, the registered redirect URI, and the requested scopes.

pub mod descriptor;

pub use descriptor::*;
