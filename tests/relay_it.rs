mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use oauth2_relay::{RelayError, Stage, TokenError, error::TransportError};

#[tokio::test]
async fn call_resource_relays_with_bearer_token() {
	let idp = MockServer::start_async().await;
	let api = MockServer::start_async().await;
	let broker = common::broker(common::config(&idp, &api.base_url()));
	let token = common::token_mock(&idp, "tok").await;
	let resource = api
		.mock_async(|when, then| {
			when.method(GET).path("/api/exercises").header("authorization", "Bearer tok");
			then.status(200)
				.header("content-type", "application/json")
				.body("[{\"difficulty\":\"beginner\"}]");
		})
		.await;
	let value = broker.call_resource("/api/exercises").await.expect("Relay should succeed.");

	assert_eq!(value, json!([{ "difficulty": "beginner" }]));

	token.assert_async().await;
	resource.assert_async().await;
}

#[tokio::test]
async fn token_failure_skips_resource_call() {
	let idp = MockServer::start_async().await;
	let api = MockServer::start_async().await;
	let broker = common::broker(common::config(&idp, &api.base_url()));
	let _token = idp
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(401).body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let resource = api
		.mock_async(|when, then| {
			when.any_request();
			then.status(200).body("{}");
		})
		.await;
	let err = broker.call_resource("/api/data").await.expect_err("401 token should fail relay.");

	assert!(matches!(err, RelayError::Auth(TokenError::Rejected { status: 401, .. })));
	assert_eq!(err.stage(), Stage::Token);

	resource.assert_calls_async(0).await;
}

#[tokio::test]
async fn unusable_token_is_a_token_stage_failure() {
	let idp = MockServer::start_async().await;
	let api = MockServer::start_async().await;
	let broker = common::broker(common::config(&idp, &api.base_url()));
	let _token = idp
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"abc\\n123\"}");
		})
		.await;
	let resource = api
		.mock_async(|when, then| {
			when.any_request();
			then.status(200).body("{}");
		})
		.await;
	let err = broker.call_resource("/api/data").await.expect_err("Header-unsafe token should fail.");

	assert!(matches!(err, RelayError::Auth(TokenError::MalformedResponse { status: 200, .. })));
	assert_eq!(err.stage(), Stage::Token);

	resource.assert_calls_async(0).await;
}

#[tokio::test]
async fn resource_rejection_is_classified() {
	let idp = MockServer::start_async().await;
	let api = MockServer::start_async().await;
	let broker = common::broker(common::config(&idp, &api.base_url()));
	let _token = common::token_mock(&idp, "tok").await;
	let _resource = api
		.mock_async(|when, then| {
			when.method(GET).path("/api/orders/7");
			then.status(500).body("boom");
		})
		.await;
	let err = broker.call_resource("/api/orders/7").await.expect_err("500 should fail relay.");

	match &err {
		RelayError::Rejected { status, body, .. } => {
			assert_eq!(*status, 500);
			assert_eq!(body, "boom");
		},
		other => panic!("expected a rejection, got {other:?}"),
	}
	assert_eq!(err.stage(), Stage::Resource);
}

#[tokio::test]
async fn resource_non_json_is_malformed() {
	let idp = MockServer::start_async().await;
	let api = MockServer::start_async().await;
	let broker = common::broker(common::config(&idp, &api.base_url()));
	let _token = common::token_mock(&idp, "tok").await;
	let _resource = api
		.mock_async(|when, then| {
			when.method(GET).path("/api/data");
			then.status(200).header("content-type", "text/html").body("<h1>hi</h1>");
		})
		.await;
	let err = broker.call_resource("/api/data").await.expect_err("HTML should not decode.");

	assert!(matches!(err, RelayError::MalformedResponse { status: 200, .. }));
}

#[tokio::test]
async fn path_is_appended_verbatim_to_base() {
	let idp = MockServer::start_async().await;
	let api = MockServer::start_async().await;
	let broker = common::broker(common::config(&idp, &api.url("/v1")));
	let _token = common::token_mock(&idp, "tok").await;
	let resource = api
		.mock_async(|when, then| {
			when.method(GET).path("/v1/orders");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"orders\":[{\"id\":1,\"status\":\"shipped\"}]}");
		})
		.await;
	let value = broker.call_resource("/orders").await.expect("Prefixed base should relay.");

	assert_eq!(value["orders"][0]["status"], "shipped");

	resource.assert_async().await;
}

#[tokio::test]
async fn invalid_target_fails_after_token_without_request() {
	let idp = MockServer::start_async().await;
	let api = MockServer::start_async().await;
	let broker = common::broker(common::config(&idp, &api.base_url()));
	let token = common::token_mock(&idp, "tok").await;
	let resource = api
		.mock_async(|when, then| {
			when.any_request();
			then.status(200).body("{}");
		})
		.await;
	let err = broker.call_resource("/bad path").await.expect_err("Spaces are not valid in URIs.");

	assert!(matches!(err, RelayError::InvalidTarget { ref target } if target.ends_with("/bad path")));

	token.assert_async().await;
	resource.assert_calls_async(0).await;
}

#[tokio::test]
async fn unreachable_resource_api_is_transport_failure() {
	let idp = MockServer::start_async().await;
	let broker = common::broker(common::config(&idp, "http://127.0.0.1:1"));
	let _token = common::token_mock(&idp, "tok").await;
	let err = broker.call_resource("/api/data").await.expect_err("Closed port should fail.");

	assert!(matches!(err, RelayError::Transport(TransportError::Network { .. })));
	assert_eq!(err.stage(), Stage::Resource);
}
