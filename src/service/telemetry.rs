//! Process-wide logging setup for the service binary.

// crates.io
use clap::ValueEnum;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
// self
use crate::{_prelude::*, service::ServiceError};

/// Output format of the log stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
	/// Human-readable single-line records.
	#[default]
	Compact,
	/// One flattened JSON object per record.
	Json,
}

/// Installs the global subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_logging(format: LogFormat) -> Result<(), ServiceError> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let registry = tracing_subscriber::registry().with(filter);

	match format {
		LogFormat::Json =>
			registry.with(fmt::layer().json().flatten_event(true).with_ansi(false)).try_init(),
		LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
	}
	.map_err(ServiceError::Logging)
}
