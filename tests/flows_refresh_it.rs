#![cfg(feature = "reqwest")]

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
// self
use catalog_broker::{_preludet::*, error::ErrorKind, flows::RefreshOutcome};

const CLIENT_ID: &str = "client-refresh";
const CLIENT_SECRET: &str = "secret-refresh";

fn stack(server: &MockServer) -> TestStack {
	build_reqwest_test_stack(test_descriptor(&server.base_url()), CLIENT_ID, CLIENT_SECRET)
}

#[tokio::test]
async fn concurrent_callers_share_one_refresh() {
	let server = MockServer::start_async().await;
	let stack = stack(&server);

	seed_credentials(&stack.broker.store, "stale-access", Some("refresh-1"), Duration::minutes(2));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/token")
				.form_urlencoded_tuple("grant_type", "refresh_token")
				.form_urlencoded_tuple("refresh_token", "refresh-1");
			then.status(200)
				.header("content-type", "application/json")
				.delay(StdDuration::from_millis(100))
				.body("{\"access_token\":\"fresh-access\",\"expires_in\":3600,\"token_type\":\"bearer\"}");
		})
		.await;
	let broker = &stack.broker;
	let (first, second, third, fourth) = tokio::join!(
		broker.valid_token(),
		broker.valid_token(),
		broker.valid_token(),
		broker.valid_token(),
	);

	mock.assert_calls_async(1).await;

	for token in [first, second, third, fourth] {
		assert_eq!(token.expect("Every caller should receive a token.").expose(), "fresh-access");
	}

	assert_eq!(broker.refresh_metrics.attempts(), 1);
	assert_eq!(broker.refresh_metrics.successes(), 1);
	assert!(!broker.is_refreshing());
}

#[tokio::test]
async fn refresh_keeps_previous_refresh_token_when_not_rotated() {
	let server = MockServer::start_async().await;
	let stack = stack(&server);

	seed_credentials(&stack.broker.store, "stale-access", Some("keep-me"), Duration::minutes(1));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"new-access\",\"expires_in\":3600,\"token_type\":\"bearer\"}");
		})
		.await;
	let outcome =
		stack.broker.refresh_access_token().await.expect("Refresh should succeed.");

	mock.assert_async().await;

	assert_eq!(outcome, RefreshOutcome::Refreshed);

	let stored = stack.broker.store.read();

	assert_eq!(stored.access_token.as_ref().map(|token| token.expose()), Some("new-access"));
	assert_eq!(stored.refresh_token.as_ref().map(|token| token.expose()), Some("keep-me"));
	assert!(!stored.needs_refresh_at(OffsetDateTime::now_utc()));
}

#[tokio::test]
async fn rotated_refresh_token_replaces_the_old_one() {
	let server = MockServer::start_async().await;
	let stack = stack(&server);

	seed_credentials(&stack.broker.store, "stale-access", Some("old-refresh"), Duration::minutes(-1));

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"new-access\",\"refresh_token\":\"new-refresh\",\"expires_in\":3600,\"token_type\":\"bearer\"}",
			);
		})
		.await;

	let token = stack.broker.valid_token().await.expect("Expired token should be refreshed.");

	assert_eq!(token.expose(), "new-access");
	assert_eq!(
		stack.broker.store.read().refresh_token.as_ref().map(|token| token.expose()),
		Some("new-refresh")
	);
}

#[tokio::test]
async fn failed_refresh_resolves_every_waiter_with_an_error() {
	let server = MockServer::start_async().await;
	let stack = stack(&server);

	seed_credentials(&stack.broker.store, "stale-access", Some("revoked"), Duration::minutes(2));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(400)
				.header("content-type", "application/json")
				.delay(StdDuration::from_millis(100))
				.body("{\"error\":\"invalid_grant\",\"error_description\":\"Refresh token revoked\"}");
		})
		.await;
	let broker = &stack.broker;
	let (leader, waiter_a, waiter_b) =
		tokio::join!(broker.valid_token(), broker.valid_token(), broker.valid_token());

	mock.assert_calls_async(1).await;

	let leader = leader.expect_err("Leader should observe the endpoint failure.");

	assert_eq!(leader.kind(), ErrorKind::InvalidResponse);
	assert_eq!(leader.status(), Some(400));

	for waiter in [waiter_a, waiter_b] {
		let err = waiter.expect_err("Waiters should observe the failure.");

		assert_eq!(err.kind(), ErrorKind::RefreshFailed);
		assert!(err.to_string().contains("invalid_grant"));
	}

	assert!(!broker.is_refreshing());
	assert_eq!(broker.refresh_metrics.failures(), 1);
	assert_eq!(
		broker.store.read().access_token.as_ref().map(|token| token.expose()),
		Some("stale-access")
	);
}

#[tokio::test]
async fn explicit_refresh_while_in_flight_is_a_no_op() {
	let server = MockServer::start_async().await;
	let stack = stack(&server);

	seed_credentials(&stack.broker.store, "stale-access", Some("refresh"), Duration::minutes(2));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200)
				.header("content-type", "application/json")
				.delay(StdDuration::from_millis(100))
				.body("{\"access_token\":\"fresh\",\"expires_in\":3600,\"token_type\":\"bearer\"}");
		})
		.await;
	let broker = &stack.broker;
	let (first, second) = tokio::join!(broker.refresh_access_token(), broker.refresh_access_token());

	mock.assert_calls_async(1).await;

	assert_eq!(first.expect("Leading refresh should succeed."), RefreshOutcome::Refreshed);
	assert_eq!(second.expect("Second call should not fail."), RefreshOutcome::AlreadyInFlight);
	assert_eq!(
		broker.refresh_access_token().await.expect("Fresh token needs no refresh."),
		RefreshOutcome::NotNeeded
	);
}

#[tokio::test]
async fn cancelled_starter_does_not_abandon_the_refresh() {
	let server = MockServer::start_async().await;
	let stack = stack(&server);

	seed_credentials(&stack.broker.store, "stale", Some("r1"), Duration::minutes(2));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token").form_urlencoded_tuple("refresh_token", "r1");
			then.status(200)
				.header("content-type", "application/json")
				.delay(StdDuration::from_millis(200))
				.body(
					"{\"access_token\":\"fresh\",\"refresh_token\":\"r2\",\"expires_in\":3600,\"token_type\":\"bearer\"}",
				);
		})
		.await;
	let broker = &stack.broker;
	let (starter, waiter) = tokio::join!(
		tokio::time::timeout(StdDuration::from_millis(50), broker.valid_token()),
		async {
			tokio::time::sleep(StdDuration::from_millis(10)).await;

			broker.valid_token().await
		},
	);

	assert!(starter.is_err(), "Starter should have been cancelled by its timeout.");
	assert_eq!(waiter.expect("Waiter should receive the refreshed token.").expose(), "fresh");

	mock.assert_calls_async(1).await;

	let stored = broker.store.read();

	assert_eq!(stored.access_token.as_ref().map(|token| token.expose()), Some("fresh"));
	assert_eq!(stored.refresh_token.as_ref().map(|token| token.expose()), Some("r2"));
	assert!(!broker.is_refreshing());
}

#[tokio::test]
async fn refresh_left_unpolled_resumes_with_the_next_caller() {
	let server = MockServer::start_async().await;
	let stack = stack(&server);

	seed_credentials(&stack.broker.store, "stale", Some("r1"), Duration::minutes(2));

	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/token");
			then.status(200)
				.header("content-type", "application/json")
				.delay(StdDuration::from_millis(100))
				.body("{\"access_token\":\"fresh\",\"expires_in\":3600,\"token_type\":\"bearer\"}");
		})
		.await;
	let broker = &stack.broker;
	let abandoned = tokio::time::timeout(StdDuration::from_millis(20), broker.valid_token()).await;

	assert!(abandoned.is_err(), "Lone caller should time out mid-refresh.");
	assert!(broker.is_refreshing());

	let token = broker.valid_token().await.expect("Next caller should finish the refresh.");

	assert_eq!(token.expose(), "fresh");
	mock.assert_calls_async(1).await;
	assert!(!broker.is_refreshing());
}
