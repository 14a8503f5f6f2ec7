//! Client-credentials token broker and authenticated resource relay.
//!
//! [`Broker`] binds one immutable [`Config`] to one [`HttpTransport`]. Every call is independent:
//! [`Broker::fetch_token`] performs a fresh exchange and [`Broker::call_resource`] performs a fresh
//! exchange followed by one authenticated GET. Nothing is cached and nothing is retried; callers
//! that want either layer it on top using the classified errors.

mod relay;
mod token;

// self
use crate::{_prelude::*, config::Config, http::HttpTransport};
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Broker specialized for the crate's default reqwest transport.
pub type ReqwestBroker = Broker<ReqwestHttpClient>;

/// Performs token exchanges and authenticated resource calls for a single client identity.
pub struct Broker<C>
where
	C: ?Sized + HttpTransport,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Static configuration shared read-only by every call.
	pub config: Arc<Config>,
}
impl<C> Broker<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a broker that reuses the caller-provided transport.
	pub fn with_http_client(config: impl Into<Arc<Config>>, http_client: impl Into<Arc<C>>) -> Self {
		Self { http_client: http_client.into(), config: config.into() }
	}
}
#[cfg(feature = "reqwest")]
impl Broker<ReqwestHttpClient> {
	/// Creates a broker backed by a fresh reqwest transport with redirects disabled.
	pub fn new(config: impl Into<Arc<Config>>) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(config, ReqwestHttpClient::new(None)?))
	}
}
impl<C> Clone for Broker<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), config: Arc::clone(&self.config) }
	}
}
impl<C> Debug for Broker<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker").field("config", &self.config).finish()
	}
}
