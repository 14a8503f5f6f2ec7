//! Static process configuration: client identity, token endpoint, and resource API base.
//!
//! Values are read once at startup and shared read-only afterwards. [`load_config`] reads the
//! process environment; [`Config::from_lookup`] accepts any key lookup so callers can inject a
//! fake environment.

// crates.io
use oauth2::{ClientId, ClientSecret, http::Uri};
// self
use crate::{_prelude::*, error::ConfigError};

/// Environment key holding the OAuth client identifier.
pub const CLIENT_ID: &str = "CLIENT_ID";
/// Environment key holding the OAuth client secret.
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
/// Environment key holding the token endpoint URL.
pub const TOKEN_ENDPOINT: &str = "TOKEN_ENDPOINT";
/// Environment key holding the resource API base URL.
pub const RESOURCE_API: &str = "RESOURCE_API";
/// Optional environment key selecting the client authentication method.
pub const TOKEN_AUTH_METHOD: &str = "TOKEN_AUTH_METHOD";

/// How the client proves its identity to the token endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	#[default]
	/// Form POST body parameters for `client_id`/`client_secret`.
	ClientSecretPost,
	/// HTTP Basic with `client_id`/`client_secret`.
	ClientSecretBasic,
}
impl ClientAuthMethod {
	/// Returns the canonical configuration label.
	pub const fn as_str(self) -> &'static str {
		match self {
			ClientAuthMethod::ClientSecretPost => "client_secret_post",
			ClientAuthMethod::ClientSecretBasic => "client_secret_basic",
		}
	}
}
impl FromStr for ClientAuthMethod {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			v if v.eq_ignore_ascii_case("client_secret_post") => Ok(Self::ClientSecretPost),
			v if v.eq_ignore_ascii_case("client_secret_basic") => Ok(Self::ClientSecretBasic),
			v => Err(ConfigError::InvalidAuthMethod { value: v.to_owned() }),
		}
	}
}
impl Display for ClientAuthMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Immutable client identity and endpoint set.
#[derive(Clone)]
pub struct Config {
	/// OAuth 2.0 client identifier.
	pub client_id: ClientId,
	/// OAuth 2.0 client secret.
	pub client_secret: ClientSecret,
	/// Token endpoint receiving the client-credentials exchange.
	pub token_endpoint: Url,
	/// Resource API base, kept verbatim so request paths are appended without normalization.
	pub resource_api: String,
	/// Client authentication method used against the token endpoint.
	pub auth_method: ClientAuthMethod,
}
impl Config {
	/// Creates a configuration from explicit values, validating both endpoints.
	///
	/// The resource API base is trimmed and must also be usable as a request URI, since request
	/// paths are appended to it verbatim.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		token_endpoint: &str,
		resource_api: impl Into<String>,
	) -> Result<Self, ConfigError> {
		let token_endpoint = Url::parse(token_endpoint)
			.map_err(|source| ConfigError::InvalidUrl { key: TOKEN_ENDPOINT, source })?;
		let resource_api = resource_api.into().trim().to_owned();

		Url::parse(&resource_api)
			.map_err(|source| ConfigError::InvalidUrl { key: RESOURCE_API, source })?;
		resource_api
			.parse::<Uri>()
			.map_err(|source| ConfigError::InvalidUri { key: RESOURCE_API, source })?;

		Ok(Self {
			client_id: ClientId::new(client_id.into()),
			client_secret: ClientSecret::new(client_secret.into()),
			token_endpoint,
			resource_api,
			auth_method: ClientAuthMethod::default(),
		})
	}

	/// Builds a configuration from an arbitrary key lookup.
	///
	/// Required keys are checked in a fixed order and the first missing or blank one is
	/// reported. No defaults are applied to any required key.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let required = |key: &'static str| {
			lookup(key).filter(|value| !value.trim().is_empty()).ok_or(ConfigError::Missing { key })
		};
		let client_id = required(CLIENT_ID)?;
		let client_secret = required(CLIENT_SECRET)?;
		let token_endpoint = required(TOKEN_ENDPOINT)?;
		let resource_api = required(RESOURCE_API)?;
		let auth_method = match lookup(TOKEN_AUTH_METHOD).filter(|v| !v.trim().is_empty()) {
			Some(raw) => raw.parse()?,
			None => ClientAuthMethod::default(),
		};

		Ok(Self::new(client_id, client_secret, token_endpoint.trim(), resource_api)?
			.with_auth_method(auth_method))
	}

	/// Overrides the client authentication method.
	pub fn with_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.auth_method = method;

		self
	}
}
impl Debug for Config {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Config")
			.field("client_id", &self.client_id.as_str())
			.field("client_secret", &"<redacted>")
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("resource_api", &self.resource_api)
			.field("auth_method", &self.auth_method)
			.finish()
	}
}

/// Reads [`Config`] from the process environment.
pub fn load_config() -> Result<Config, ConfigError> {
	Config::from_lookup(|key| std::env::var(key).ok())
}
