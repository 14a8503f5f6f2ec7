//! Data-driven endpoint tables.

// std
use std::{collections::HashSet, path::Path};
// crates.io
use serde_json::json;
// self
use crate::{_prelude::*, json, service::ServiceError};

/// Named set of endpoints served by one process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceProfile {
	/// Human-readable profile name, used in logs.
	pub name: String,
	/// Endpoints in registration order.
	pub endpoints: Vec<EndpointSpec>,
}
impl ServiceProfile {
	/// Profile mirroring the B2B client service: a greeting at `/` and a relay of `/api/data`
	/// at `/test-oauth2`.
	pub fn b2b_client() -> Self {
		Self {
			name: "b2b-client".into(),
			endpoints: vec![
				EndpointSpec::fixed("/", json!({ "message": "B2B Client" })),
				EndpointSpec::relay("/test-oauth2", "/api/data"),
			],
		}
	}

	/// Parses and validates a profile from JSON bytes.
	pub fn from_json(bytes: &[u8]) -> Result<Self, ServiceError> {
		let profile: Self =
			json::from_slice(bytes).map_err(|source| ServiceError::ProfileParse { source })?;

		profile.validate()?;

		Ok(profile)
	}

	/// Reads, parses, and validates a profile file.
	pub fn load(path: &Path) -> Result<Self, ServiceError> {
		let bytes = std::fs::read(path)
			.map_err(|source| ServiceError::ProfileRead { path: path.to_owned(), source })?;

		Self::from_json(&bytes)
	}

	/// Checks that routes are unique literal paths and that relay paths are non-empty.
	///
	/// Routes carry no captures: segments starting with `:` or `*` and any `{`/`}` are rejected
	/// here instead of reaching the router, which would panic on them.
	pub fn validate(&self) -> Result<(), ServiceError> {
		let mut seen = HashSet::new();

		for endpoint in &self.endpoints {
			let route = &endpoint.route;

			if !is_literal_route(route) {
				return Err(ServiceError::InvalidRoute { route: route.clone() });
			}
			if !seen.insert(route.as_str()) {
				return Err(ServiceError::DuplicateRoute { route: route.clone() });
			}
			match &endpoint.action {
				EndpointAction::Relay { resource_path } if resource_path.trim().is_empty() =>
					return Err(ServiceError::EmptyResourcePath { route: route.clone() }),
				_ => {},
			}
		}

		Ok(())
	}
}
fn is_literal_route(route: &str) -> bool {
	route.starts_with('/')
		&& !route.contains(['{', '}'])
		&& route.split('/').all(|segment| !segment.starts_with([':', '*']))
}

impl Default for ServiceProfile {
	fn default() -> Self {
		Self::b2b_client()
	}
}

/// One `GET` route and what it does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointSpec {
	/// Route path, starting with `/`.
	pub route: String,
	/// Behavior bound to the route.
	#[serde(flatten)]
	pub action: EndpointAction,
}
impl EndpointSpec {
	/// Route answering with a fixed JSON body.
	pub fn fixed(route: impl Into<String>, body: Value) -> Self {
		Self { route: route.into(), action: EndpointAction::Static { body } }
	}

	/// Route relaying `resource_path` through the broker.
	pub fn relay(route: impl Into<String>, resource_path: impl Into<String>) -> Self {
		Self {
			route: route.into(),
			action: EndpointAction::Relay { resource_path: resource_path.into() },
		}
	}
}

/// Endpoint behaviors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EndpointAction {
	/// Answer with `body` as-is.
	Static {
		/// Fixed response payload.
		body: Value,
	},
	/// Answer with the resource API's body for `resource_path`, wrapped in an
	/// [`Envelope`](crate::service::Envelope).
	Relay {
		/// Path appended to the resource API base.
		resource_path: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_profile_is_valid() {
		let profile = ServiceProfile::default();

		profile.validate().expect("Built-in profile should validate.");

		assert_eq!(profile.endpoints.len(), 2);
		assert_eq!(
			profile.endpoints[1].action,
			EndpointAction::Relay { resource_path: "/api/data".into() }
		);
	}

	#[test]
	fn bundled_training_profile_loads() {
		let profile = ServiceProfile::from_json(include_bytes!("../../profiles/training.json"))
			.expect("Bundled training profile should load.");

		assert!(profile.endpoints.iter().any(|endpoint| matches!(
			&endpoint.action,
			EndpointAction::Relay { resource_path } if resource_path == "/api/exercises"
		)));
	}

	#[test]
	fn validation_rejects_bad_tables() {
		let relative = ServiceProfile {
			name: "bad".into(),
			endpoints: vec![EndpointSpec::relay("plans", "/api/plans")],
		};

		assert!(matches!(relative.validate(), Err(ServiceError::InvalidRoute { .. })));

		for route in ["/orders/:id", "/files/*rest", "/plans/{id", "/plans/{id}", "/x}"] {
			let captured = ServiceProfile {
				name: "bad".into(),
				endpoints: vec![EndpointSpec::relay(route, "/api/plans")],
			};

			assert!(
				matches!(captured.validate(), Err(ServiceError::InvalidRoute { .. })),
				"{route} should be rejected",
			);
		}

		let duplicate = ServiceProfile {
			name: "bad".into(),
			endpoints: vec![
				EndpointSpec::fixed("/", json!({})),
				EndpointSpec::relay("/", "/api/data"),
			],
		};

		assert!(matches!(duplicate.validate(), Err(ServiceError::DuplicateRoute { .. })));

		let empty = ServiceProfile {
			name: "bad".into(),
			endpoints: vec![EndpointSpec::relay("/x", " ")],
		};

		assert!(matches!(empty.validate(), Err(ServiceError::EmptyResourcePath { .. })));
	}

	#[test]
	fn parse_errors_carry_path() {
		let err = ServiceProfile::from_json(
			br#"{"name":"p","endpoints":[{"route":"/","kind":"teleport"}]}"#,
		)
		.expect_err("Unknown endpoint kind should fail.");

		assert!(matches!(err, ServiceError::ProfileParse { .. }));

		let err = ServiceProfile::from_json(br#"{"name":"p","endpoints":[]} trailing"#)
			.expect_err("Trailing bytes after the profile should fail.");

		assert!(matches!(err, ServiceError::ProfileParse { .. }));
	}

	#[test]
	fn capture_routes_fail_before_reaching_the_router() {
		let err = ServiceProfile::from_json(
			br#"{"name":"p","endpoints":[{"route":"/orders/:id","kind":"relay","resource_path":"/api/orders"}]}"#,
		)
		.expect_err("Capture segments should be rejected by validation.");

		assert!(matches!(err, ServiceError::InvalidRoute { route } if route == "/orders/:id"));
	}
}
