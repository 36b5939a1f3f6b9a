//! Credential material and its lifecycle.

pub mod record;
pub mod secret;
