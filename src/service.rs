//! Thin HTTP service layer over the broker.
//!
//! Endpoints are data, not code: a [`ServiceProfile`] lists routes that either answer with a
//! fixed JSON body or relay a resource path through [`Broker::call_resource`]. Each inbound
//! request runs on its own task and shares nothing mutable with its neighbours.

mod cli;
mod envelope;
mod profile;
mod telemetry;

pub use cli::*;
pub use envelope::*;
pub use profile::*;
pub use telemetry::*;

// std
use std::{io, net::SocketAddr, path::PathBuf};
// crates.io
use axum::{
	Json, Router,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{MethodRouter, get},
};
use tokio::net::TcpListener;
// self
use crate::{
	_prelude::*,
	broker::Broker,
	config,
	http::{HttpTransport, ReqwestHttpClient},
};

/// Failures raised while preparing or running the service.
#[derive(Debug, ThisError)]
pub enum ServiceError {
	/// The profile file could not be read.
	#[error("Service profile `{}` could not be read.", path.display())]
	ProfileRead {
		/// Path that failed to open.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: io::Error,
	},
	/// The profile is not valid JSON or does not match the expected shape.
	#[error("Service profile is malformed at `{}`.", source.path())]
	ProfileParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A route is not a literal path starting with `/`.
	#[error("Route `{route}` must be a literal path starting with `/`.")]
	InvalidRoute {
		/// Offending route.
		route: String,
	},
	/// A route is declared more than once.
	#[error("Route `{route}` is declared more than once.")]
	DuplicateRoute {
		/// Offending route.
		route: String,
	},
	/// A relay endpoint has nothing to relay.
	#[error("Relay endpoint `{route}` has an empty resource path.")]
	EmptyResourcePath {
		/// Offending route.
		route: String,
	},
	/// The global tracing subscriber could not be installed.
	#[error("Logging could not be initialized.")]
	Logging(#[source] tracing_subscriber::util::TryInitError),
	/// The listener could not bind.
	#[error("Listener could not bind to {addr}.")]
	Bind {
		/// Requested socket address.
		addr: SocketAddr,
		/// Underlying IO failure.
		#[source]
		source: io::Error,
	},
	/// The server loop stopped with an IO failure.
	#[error("Server terminated unexpectedly.")]
	Serve(#[source] io::Error),
}

/// Builds the router for `profile`, sharing `broker` across every relay endpoint.
///
/// The profile must already be validated; see [`ServiceProfile::validate`].
pub fn router<C>(profile: &ServiceProfile, broker: Broker<C>) -> Router
where
	C: ?Sized + HttpTransport,
{
	profile.endpoints.iter().fold(Router::new(), |router, endpoint| {
		router.route(&endpoint.route, endpoint_handler(endpoint, &broker))
	})
}

fn endpoint_handler<C>(endpoint: &EndpointSpec, broker: &Broker<C>) -> MethodRouter
where
	C: ?Sized + HttpTransport,
{
	match &endpoint.action {
		EndpointAction::Static { body } => {
			let body = body.clone();

			get(move || {
				let body = body.clone();

				async move { Json(body) }
			})
		},
		EndpointAction::Relay { resource_path } => {
			let broker = broker.clone();
			let route = Arc::<str>::from(endpoint.route.as_str());
			let resource_path = Arc::<str>::from(resource_path.as_str());

			get(move || relay(broker.clone(), route.clone(), resource_path.clone()))
		},
	}
}

async fn relay<C>(broker: Broker<C>, route: Arc<str>, resource_path: Arc<str>) -> Response
where
	C: ?Sized + HttpTransport,
{
	match broker.call_resource(&resource_path).await {
		Ok(data) => {
			tracing::info!(route = %route, resource_path = %resource_path, "Relay call succeeded.");

			(StatusCode::OK, Json(Envelope::success(data))).into_response()
		},
		Err(e) => {
			let envelope = Envelope::failure(&e);

			tracing::warn!(
				route = %route,
				resource_path = %resource_path,
				stage = %e.stage(),
				error = ?e,
				"Relay call failed."
			);

			(StatusCode::BAD_GATEWAY, Json(envelope)).into_response()
		},
	}
}

/// Serves `app` on `listener` until Ctrl-C is received.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServiceError> {
	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.map_err(ServiceError::Serve)
}

/// Loads everything from the environment and CLI, then serves until shutdown.
///
/// Configuration errors surface before the listener is bound, so a misconfigured process never
/// accepts traffic.
pub async fn run(args: ServeArgs) -> Result<()> {
	let dotenv = dotenvy::dotenv();

	telemetry::init_logging(args.log_format)?;

	match dotenv {
		Ok(path) => tracing::info!(path = %path.display(), "Loaded environment file."),
		Err(e) if e.not_found() => {},
		Err(e) => tracing::warn!(error = %e, "Environment file could not be loaded."),
	}

	let config = config::load_config()?;
	let profile = match &args.profile {
		Some(path) => ServiceProfile::load(path)?,
		None => ServiceProfile::default(),
	};
	let timeout = args.upstream_timeout_secs.map(std::time::Duration::from_secs);
	let broker =
		<Broker<ReqwestHttpClient>>::with_http_client(config, ReqwestHttpClient::new(timeout)?);

	tracing::info!(
		profile = %profile.name,
		endpoints = profile.endpoints.len(),
		config = ?broker.config,
		"Configuration loaded."
	);

	let listener = TcpListener::bind(args.bind)
		.await
		.map_err(|source| ServiceError::Bind { addr: args.bind, source })?;

	tracing::info!(addr = %args.bind, "Listening.");

	serve(listener, router(&profile, broker)).await?;

	Ok(())
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::warn!(error = %e, "Ctrl-C handler could not be installed.");

		std::future::pending::<()>().await;
	}

	tracing::info!("Shutting down.");
}
