#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use catalog_broker::{
	_preludet::*,
	auth::AlbumId,
	catalog::{EmptyResponse, UserProfile},
	connectivity::{InterfaceKind, PathStatus},
	error::ErrorKind,
	pipeline::{CachePolicy, HttpMethod},
};

const CLIENT_ID: &str = "client-pipeline";
const CLIENT_SECRET: &str = "secret-pipeline";
const PROFILE_BODY: &str = "{\"id\":\"user-1\",\"display_name\":\"Listener\",\"country\":\"NL\"}";

fn signed_in_stack(server: &MockServer) -> TestStack {
	let stack =
		build_reqwest_test_stack(test_descriptor(&server.base_url()), CLIENT_ID, CLIENT_SECRET);

	seed_credentials(&stack.broker.store, "access-1", Some("refresh-1"), Duration::hours(1));

	stack
}

#[tokio::test]
async fn offline_requests_never_reach_the_network() {
	let server = MockServer::start_async().await;
	let stack = signed_in_stack(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(200).header("content-type", "application/json").body(PROFILE_BODY);
		})
		.await;

	stack.connectivity.report(PathStatus::unsatisfied());

	let err = stack.catalog.current_user_profile().await.expect_err("Offline call should fail.");

	assert_eq!(err.kind(), ErrorKind::NetworkUnavailable);
	mock.assert_calls_async(0).await;

	stack.connectivity.report(PathStatus::satisfied(InterfaceKind::Cellular));
	stack.catalog.current_user_profile().await.expect("Online call should succeed.");
	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn cached_responses_skip_the_network() {
	let server = MockServer::start_async().await;
	let stack = signed_in_stack(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me").header("authorization", "Bearer access-1");
			then.status(200).header("content-type", "application/json").body(PROFILE_BODY);
		})
		.await;
	let first = stack.catalog.current_user_profile().await.expect("First call should load.");
	let second = stack.catalog.current_user_profile().await.expect("Second call should hit cache.");

	mock.assert_calls_async(1).await;

	assert_eq!(first, second);
	assert_eq!(&*second.id, "user-1");
	assert_eq!(stack.cache.len(), 1);
}

#[tokio::test]
async fn reload_policy_bypasses_the_cache() {
	let server = MockServer::start_async().await;
	let stack = signed_in_stack(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(200).header("content-type", "application/json").body(PROFILE_BODY);
		})
		.await;
	let url = Url::parse(&server.url("/v1/me")).expect("Profile URL should parse.");

	for _ in 0..2 {
		let request = stack
			.executor
			.build_request(url.clone(), HttpMethod::Get, CachePolicy::ReloadIgnoringCache)
			.await
			.expect("Request should build.");

		assert_eq!(request.header("authorization"), Some("Bearer access-1"));

		stack.executor.perform::<UserProfile>(request).await.expect("Profile should decode.");
	}

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn empty_success_bodies_follow_the_declared_shape() {
	let server = MockServer::start_async().await;
	let stack = signed_in_stack(&server);

	server
		.mock_async(|when, then| {
			when.method(PUT).path("/v1/me/albums");
			then.status(200);
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(200);
		})
		.await;

	let ids = [AlbumId::new("4aawyAB9vmqN3uQ7FjRGTy").expect("Album id should be valid.")];
	let saved = stack.catalog.save_albums(&ids).await.expect("Empty body is allowed here.");

	assert_eq!(saved, EmptyResponse);

	let err = stack.catalog.current_user_profile().await.expect_err("Profile needs a body.");

	assert_eq!(err.kind(), ErrorKind::DataFailure);
	assert!(stack.cache.is_empty());
}

#[tokio::test]
async fn failure_statuses_are_invalid_responses() {
	let server = MockServer::start_async().await;
	let stack = signed_in_stack(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(503).body("{\"error\":{\"status\":503,\"message\":\"Service unavailable\"}}");
		})
		.await;

	let err = stack.catalog.current_user_profile().await.expect_err("503 should fail.");

	assert_eq!(err.kind(), ErrorKind::InvalidResponse);
	assert_eq!(err.status(), Some(503));
	assert!(stack.cache.is_empty());
}

#[tokio::test]
async fn decode_failures_surface_the_structural_error() {
	let server = MockServer::start_async().await;
	let stack = signed_in_stack(&server);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me");
			then.status(200).header("content-type", "application/json").body("{\"id\":5}");
		})
		.await;

	let err = stack.catalog.current_user_profile().await.expect_err("Numeric id should fail.");

	assert_eq!(err.kind(), ErrorKind::Decode);

	match err {
		Error::Decode { source } => assert_eq!(source.path().to_string(), "id"),
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[tokio::test]
async fn near_expiry_token_is_refreshed_before_the_request() {
	let server = MockServer::start_async().await;
	let stack =
		build_reqwest_test_stack(test_descriptor(&server.base_url()), CLIENT_ID, CLIENT_SECRET);

	seed_credentials(&stack.broker.store, "stale-access", Some("refresh-1"), Duration::minutes(3));

	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"fresh-access\",\"expires_in\":3600,\"token_type\":\"bearer\"}");
		})
		.await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me").header("authorization", "Bearer fresh-access");
			then.status(200).header("content-type", "application/json").body(PROFILE_BODY);
		})
		.await;

	stack.catalog.current_user_profile().await.expect("Profile should load after refresh.");

	token_mock.assert_calls_async(1).await;
	profile_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn signing_out_drops_cached_responses() {
	let server = MockServer::start_async().await;
	let stack = signed_in_stack(&server);
	let first_account = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me").header("authorization", "Bearer access-1");
			then.status(200).header("content-type", "application/json").body(PROFILE_BODY);
		})
		.await;

	stack.catalog.current_user_profile().await.expect("First account profile should load.");
	first_account.delete_async().await;

	assert_eq!(stack.cache.len(), 1);

	stack.catalog.sign_out();

	assert!(stack.cache.is_empty());
	assert!(!stack.broker.is_signed_in());

	seed_credentials(&stack.broker.store, "access-2", Some("refresh-2"), Duration::hours(1));

	let second_account = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/me").header("authorization", "Bearer access-2");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"user-2\",\"display_name\":\"Other\"}");
		})
		.await;
	let profile =
		stack.catalog.current_user_profile().await.expect("Second account profile should load.");

	second_account.assert_async().await;

	assert_eq!(&*profile.id, "user-2");
}
