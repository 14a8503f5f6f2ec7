//! Strict JSON decoding that keeps the failing field path.

// crates.io
use serde::de::DeserializeOwned;
use serde_path_to_error::Track;

/// JSON decoding failure annotated with the path of the offending field.
pub type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Decodes exactly one JSON value from `bytes`.
///
/// Anything other than whitespace after the value is rejected, with an empty field path.
pub(crate) fn from_slice<T>(bytes: &[u8]) -> Result<T, JsonPathError>
where
	T: DeserializeOwned,
{
	let mut de = serde_json::Deserializer::from_slice(bytes);
	let value = serde_path_to_error::deserialize(&mut de)?;

	de.end().map_err(|e| serde_path_to_error::Error::new(Track::new().path(), e))?;

	Ok(value)
}
