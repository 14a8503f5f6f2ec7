//! Command-line surface of the service binary.

// std
use std::{net::SocketAddr, path::PathBuf};
// crates.io
use clap::Parser;
// self
use crate::service::LogFormat;

/// Serve a relay profile over HTTP.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ServeArgs {
	/// Socket address to listen on.
	#[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8001")]
	pub bind: SocketAddr,
	/// JSON service profile; the built-in B2B client profile is used when omitted.
	#[arg(long, env = "SERVICE_PROFILE")]
	pub profile: Option<PathBuf>,
	/// Log output format.
	#[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
	pub log_format: LogFormat,
	/// Overall timeout applied to each upstream request, in seconds.
	#[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
	pub upstream_timeout_secs: Option<u64>,
}
