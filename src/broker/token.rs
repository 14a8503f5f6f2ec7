//! Client-credentials exchange against the configured token endpoint.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{
	HttpRequest,
	http::{
		HeaderValue, Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use serde_json::Map;
use url::form_urlencoded::{self, Serializer};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	broker::Broker,
	config::ClientAuthMethod,
	error::{TokenError, TransportError},
	http::{self, HttpTransport},
	json::{self, JsonPathError},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const GRANT_TYPE: &str = "client_credentials";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Token endpoint fields the broker relies on; everything else is ignored.
#[derive(Debug, Deserialize)]
struct TokenResponse {
	#[serde(deserialize_with = "non_empty_token")]
	access_token: String,
}

impl<C> Broker<C>
where
	C: ?Sized + HttpTransport,
{
	/// Exchanges the configured client credentials for a bearer token.
	///
	/// Exactly one POST is issued per call. Transport failures, non-2xx statuses, and 2xx bodies
	/// without a non-empty string `access_token` are reported as distinct [`TokenError`]s.
	pub async fn fetch_token(&self) -> Result<AccessToken, TokenError> {
		const KIND: CallKind = CallKind::TokenExchange;

		let span = CallSpan::new(KIND, "fetch_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.exchange_client_credentials(&span)).await;

		span.record_outcome(CallOutcome::of(&result));
		obs::record_call_result(KIND, &result);

		result
	}

	async fn exchange_client_credentials(
		&self,
		span: &CallSpan,
	) -> Result<AccessToken, TokenError> {
		let request = self.token_request().map_err(TokenError::Transport)?;
		let response = self.http_client.execute(request).await.map_err(TransportError::from)?;
		let status = response.status();

		span.record_status(status.as_u16());
		obs::record_upstream_status(CallKind::TokenExchange, status.as_u16());

		if !status.is_success() {
			return Err(TokenError::Rejected {
				status: status.as_u16(),
				body: http::body_preview(response.body()),
				retry_after: http::parse_retry_after(response.headers()),
			});
		}

		let parsed = parse_token_response(response.body())
			.map_err(|source| TokenError::MalformedResponse { status: status.as_u16(), source })?;

		Ok(AccessToken::new(parsed.access_token))
	}

	fn token_request(&self) -> Result<HttpRequest, TransportError> {
		let config = self.config.as_ref();
		let mut form = Serializer::new(String::new());
		let mut builder = Request::builder()
			.method(Method::POST)
			.uri(config.token_endpoint.as_str())
			.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
			.header(ACCEPT, JSON_CONTENT_TYPE);

		form.append_pair("grant_type", GRANT_TYPE);

		match config.auth_method {
			ClientAuthMethod::ClientSecretPost => {
				form.append_pair("client_id", config.client_id.as_str());
				form.append_pair("client_secret", config.client_secret.secret());
			},
			ClientAuthMethod::ClientSecretBasic => {
				builder = builder.header(
					AUTHORIZATION,
					basic_authorization(config.client_id.as_str(), config.client_secret.secret()),
				);
			},
		}

		Ok(builder.body(form.finish().into_bytes())?)
	}
}

/// Builds an RFC 6749 §2.3.1 Basic credential: both halves are form-encoded before base64.
fn basic_authorization(client_id: &str, client_secret: &str) -> String {
	let id = form_urlencoded::byte_serialize(client_id.as_bytes()).collect::<String>();
	let secret = form_urlencoded::byte_serialize(client_secret.as_bytes()).collect::<String>();

	format!("Basic {}", STANDARD.encode(format!("{id}:{secret}")))
}

fn parse_token_response(body: &[u8]) -> Result<TokenResponse, JsonPathError> {
	let object: Map<String, Value> = json::from_slice(body)?;

	serde_path_to_error::deserialize(Value::Object(object))
}

fn non_empty_token<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let value = String::deserialize(deserializer)?;

	if value.is_empty() {
		return Err(serde::de::Error::custom("access_token must not be empty"));
	}
	if HeaderValue::from_str(&value).is_err() {
		return Err(serde::de::Error::custom("access_token must be usable as a header value"));
	}

	Ok(value)
}
