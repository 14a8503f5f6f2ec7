//! Authenticated GET relay against the configured resource API.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		Method, Request, Uri,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	broker::Broker,
	error::{RelayError, TransportError},
	http::{self, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

impl<C> Broker<C>
where
	C: ?Sized + HttpTransport,
{
	/// Fetches a fresh token, then GETs `resource_api + path` with it.
	///
	/// The path is appended verbatim, so callers supply the leading slash. A token failure ends
	/// the call as [`RelayError::Auth`] before any resource request is issued. The decoded body is
	/// returned untyped.
	pub async fn call_resource(&self, path: &str) -> Result<Value, RelayError> {
		const KIND: CallKind = CallKind::ResourceCall;

		let span = CallSpan::new(KIND, "call_resource");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.relay(&span, path)).await;

		span.record_outcome(CallOutcome::of(&result));
		obs::record_call_result(KIND, &result);

		result
	}

	async fn relay(&self, span: &CallSpan, path: &str) -> Result<Value, RelayError> {
		let token = self.fetch_token().await?;
		let request = self.resource_request(path, &token)?;
		let response = self.http_client.execute(request).await.map_err(TransportError::from)?;
		let status = response.status();

		span.record_status(status.as_u16());
		obs::record_upstream_status(CallKind::ResourceCall, status.as_u16());

		if !status.is_success() {
			return Err(RelayError::Rejected {
				status: status.as_u16(),
				body: http::body_preview(response.body()),
				retry_after: http::parse_retry_after(response.headers()),
			});
		}

		serde_json::from_slice(response.body())
			.map_err(|source| RelayError::MalformedResponse { status: status.as_u16(), source })
	}

	fn resource_request(&self, path: &str, token: &AccessToken) -> Result<HttpRequest, RelayError> {
		let target = format!("{}{path}", self.config.resource_api);
		let uri = target.parse::<Uri>().map_err(|_| RelayError::InvalidTarget { target })?;

		Request::builder()
			.method(Method::GET)
			.uri(uri)
			.header(AUTHORIZATION, token.bearer_header())
			.header(ACCEPT, "application/json")
			.body(Vec::new())
			.map_err(|e| TransportError::from(e).into())
	}
}
