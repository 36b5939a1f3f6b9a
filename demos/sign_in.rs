//! Prints the sign-in URL for the production catalog service and shows how a host turns the
//! intercepted redirect into an authorization code before exchanging it.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use catalog_broker::{
	flows::Broker,
	provider::ServiceDescriptor,
	store::{FileStore, TokenStore},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let redirect = Url::parse("https://app.example.com/callback")?;
	let descriptor = ServiceDescriptor::spotify(redirect.clone())?;
	let store = TokenStore::new(Arc::new(FileStore::open(
		env::temp_dir().join("catalog-broker-demo.json"),
	)?));
	let broker = Broker::new(store, descriptor, "demo-client")?.with_client_secret("demo-secret");

	println!("Send your user to {}.", broker.sign_in_url());

	// Simulate the web view intercepting the redirect.
	let mut returned = redirect;

	returned.query_pairs_mut().append_pair("code", "demo-code");

	let code = broker.authorization_code_from_redirect(&returned)?;

	println!("Exchange `{code}` with Broker::exchange_code_for_token during the callback.");
	println!("Signed in already: {}.", broker.is_signed_in());

	Ok(())
}
