// self
use crate::obs::{CallKind, CallOutcome};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_call_outcome(kind: CallKind, outcome: CallOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_relay_call_total",
			"call" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Records the terminal outcome of a finished call.
pub fn record_call_result<T, E>(kind: CallKind, result: &Result<T, E>) {
	record_call_outcome(kind, CallOutcome::of(result));
}

/// Counts upstream HTTP responses by status class (`2xx`, `4xx`, ...).
pub fn record_upstream_status(kind: CallKind, status: u16) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_relay_upstream_response_total",
			"call" => kind.as_str(),
			"class" => status_class(status)
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, status);
	}
}

#[cfg_attr(not(any(test, feature = "metrics")), allow(dead_code))]
fn status_class(status: u16) -> &'static str {
	match status {
		100..=199 => "1xx",
		200..=299 => "2xx",
		300..=399 => "3xx",
		400..=499 => "4xx",
		500..=599 => "5xx",
		_ => "other",
	}
}
