//! OAuth 2.0 client-credentials token broker and authenticated resource relay.
//!
//! A [`broker::Broker`] exchanges one static client identity for a bearer token and relays
//! authenticated GETs to a single resource API. With the `server` feature the crate also ships a
//! thin, data-driven HTTP service layer whose endpoints either return fixed payloads or relay a
//! resource path through the broker.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod broker;
pub mod config;
pub mod error;
pub mod http;
mod json;
pub mod obs;
#[cfg(feature = "server")] pub mod service;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use oauth2::HttpClientError;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
pub use crate::{
	auth::AccessToken,
	broker::Broker,
	config::{Config, load_config},
	error::{ConfigError, RelayError, Stage, TokenError},
};
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
