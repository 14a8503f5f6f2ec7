//! Relay-level error types shared across configuration, token exchange, and resource calls.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs that span more than one stage.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token exchange failure.
	#[error(transparent)]
	Token(#[from] TokenError),
	/// Authenticated resource call failure.
	#[error(transparent)]
	Relay(#[from] RelayError),
	/// Service bootstrap failure.
	#[cfg(feature = "server")]
	#[error(transparent)]
	Service(#[from] crate::service::ServiceError),
}

/// Configuration failures raised while loading settings or building transports.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A required environment value is unset or blank.
	#[error("Required configuration value `{key}` is missing.")]
	Missing {
		/// Name of the missing key.
		key: &'static str,
	},
	/// A configured endpoint cannot be parsed as an absolute URL.
	#[error("Configuration value `{key}` is not a valid URL.")]
	InvalidUrl {
		/// Name of the offending key.
		key: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A configured URL cannot be used as an HTTP request URI.
	#[error("Configuration value `{key}` is not a valid request URI.")]
	InvalidUri {
		/// Name of the offending key.
		key: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: oauth2::http::uri::InvalidUri,
	},
	/// The token client authentication method is not recognized.
	#[error("Unsupported token auth method `{value}`.")]
	InvalidAuthMethod {
		/// Value that failed to parse.
		value: String,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while obtaining an access token.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// The token endpoint could not be reached.
	#[error("Token endpoint is unreachable.")]
	Transport(#[from] TransportError),
	/// The token endpoint answered with a non-2xx status.
	#[error("Token endpoint rejected the request with HTTP {status}.")]
	Rejected {
		/// HTTP status code.
		status: u16,
		/// Truncated response body.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// The token endpoint answered 2xx without a usable `access_token`.
	#[error("Token endpoint returned a malformed response.")]
	MalformedResponse {
		/// HTTP status code of the malformed response.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl TokenError {
	/// HTTP status reported by the token endpoint, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Transport(_) => None,
			Self::Rejected { status, .. } | Self::MalformedResponse { status, .. } => Some(*status),
		}
	}
}

/// Failures raised while calling the resource API.
#[derive(Debug, ThisError)]
pub enum RelayError {
	/// No token could be obtained, so the resource API was never called.
	#[error("Could not obtain an access token.")]
	Auth(#[source] TokenError),
	/// The resource base and path do not form a valid request target.
	#[error("Resource target `{target}` is not a valid URI.")]
	InvalidTarget {
		/// Concatenated target that failed to parse.
		target: String,
	},
	/// The resource API could not be reached.
	#[error("Resource API is unreachable.")]
	Transport(#[from] TransportError),
	/// The resource API answered with a non-2xx status.
	#[error("Resource API rejected the request with HTTP {status}.")]
	Rejected {
		/// HTTP status code.
		status: u16,
		/// Truncated response body.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// The resource API answered 2xx with a body that is not JSON.
	#[error("Resource API returned a malformed response.")]
	MalformedResponse {
		/// HTTP status code of the malformed response.
		status: u16,
		/// JSON decoding failure.
		#[source]
		source: serde_json::Error,
	},
}
impl RelayError {
	/// Reports which stage of the call failed.
	pub fn stage(&self) -> Stage {
		match self {
			Self::Auth(_) => Stage::Token,
			_ => Stage::Resource,
		}
	}
}
impl From<TokenError> for RelayError {
	fn from(e: TokenError) -> Self {
		Self::Auth(e)
	}
}

/// Stage of an authenticated call at which a failure happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
	/// Credentials could not be exchanged for a token.
	Token,
	/// The resource API could not be reached or parsed.
	Resource,
}
impl Stage {
	/// Returns a stable label suitable for logs and response envelopes.
	pub const fn as_str(self) -> &'static str {
		match self {
			Stage::Token => "token",
			Stage::Resource => "resource",
		}
	}
}
impl Display for Stage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Transport-level failures (network, IO, request construction).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the upstream endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the upstream endpoint.")]
	Io(#[from] std::io::Error),
	/// The outbound request could not be assembled.
	#[error("Outbound request could not be constructed.")]
	Request(#[from] oauth2::http::Error),
	/// The HTTP client failed without a structured error.
	#[error("HTTP client error occurred while calling the upstream endpoint: {message}.")]
	Other {
		/// Client-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl<E> From<HttpClientError<E>> for TransportError
where
	E: 'static + Send + Sync + StdError,
{
	fn from(e: HttpClientError<E>) -> Self {
		match e {
			HttpClientError::Reqwest(inner) => Self::Network { source: inner },
			HttpClientError::Http(inner) => Self::Request(inner),
			HttpClientError::Io(inner) => Self::Io(inner),
			HttpClientError::Other(message) => Self::Other { message },
			_ => Self::Other { message: "unknown transport failure".into() },
		}
	}
}
