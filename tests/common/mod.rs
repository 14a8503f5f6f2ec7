// crates.io
use httpmock::prelude::*;
// self
use oauth2_relay::{Broker, Config, broker::ReqwestBroker};

pub const CLIENT_ID: &str = "svc-orders";
pub const CLIENT_SECRET: &str = "secret-orders";

/// Config pointing the token endpoint at `token_server` and the resource API at `resource_base`.
pub fn config(token_server: &MockServer, resource_base: &str) -> Config {
	Config::new(CLIENT_ID, CLIENT_SECRET, &token_server.url("/token"), resource_base)
		.expect("Mock endpoints should form a valid configuration.")
}

pub fn broker(config: Config) -> ReqwestBroker {
	Broker::new(config).expect("Reqwest transport should build for tests.")
}

pub async fn token_mock<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
	let body = format!("{{\"access_token\":\"{token}\",\"token_type\":\"Bearer\",\"expires_in\":300}}");

	server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}
