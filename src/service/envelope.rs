//! Response envelope shared by relay endpoints.

// self
use crate::{
	_prelude::*,
	error::{RelayError, Stage},
};

/// JSON body returned by relay endpoints.
///
/// Success renders as `{"status":"success","data":...}`; failure renders as
/// `{"status":"error","stage":"token"|"resource","message":...}` so operators can tell
/// credential problems from resource API outages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Envelope {
	/// The resource API answered with a JSON value.
	Success {
		/// Decoded resource API body.
		data: Value,
	},
	/// The relay failed.
	Error {
		/// Stage that failed.
		stage: Stage,
		/// Error message including its source chain.
		message: String,
	},
}
impl Envelope {
	/// Wraps a decoded resource API body.
	pub fn success(data: Value) -> Self {
		Self::Success { data }
	}

	/// Describes a relay failure.
	pub fn failure(error: &RelayError) -> Self {
		Self::Error { stage: error.stage(), message: error_chain(error) }
	}
}

/// Joins an error and its sources with `": "`, dropping the sentence period of every link but
/// the last.
fn error_chain(error: &dyn StdError) -> String {
	let mut links = vec![error.to_string()];
	let mut source = error.source();

	while let Some(cause) = source {
		links.push(cause.to_string());

		source = cause.source();
	}

	let last = links.len() - 1;

	links
		.iter()
		.enumerate()
		.map(|(i, link)| if i == last { link.as_str() } else { link.trim_end_matches('.') })
		.collect::<Vec<_>>()
		.join(": ")
}
