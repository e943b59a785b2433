//! Error taxonomy for graph loading and construction.
//!
//! Every failure is scoped to a single graph view: the hosting page renders
//! the message and may trigger a fresh load, nothing is fatal to the process.

use thiserror::Error;

/// Failure to retrieve or decode the raw dependency records.
#[derive(Debug, Error)]
pub enum FetchError {
	/// Transport-level failure (network unreachable, request aborted).
	#[error("request to {url} failed: {source}")]
	Request {
		/// Endpoint that was queried.
		url: String,
		/// Underlying client error.
		#[source]
		source: reqwest::Error,
	},
	/// The endpoint answered with a non-success status.
	#[error("{url} returned HTTP {status}")]
	Status {
		/// Endpoint that was queried.
		url: String,
		/// Numeric HTTP status code.
		status: u16,
	},
	/// The response body was not a JSON array.
	#[error("invalid dependency payload from {url}: {source}")]
	Parse {
		/// Endpoint that was queried.
		url: String,
		/// Decoder diagnostic for the malformed body.
		#[source]
		source: serde_json::Error,
	},
}

/// A record violated the expected `{name, dependencies[]}` shape.
///
/// Construction is all-or-nothing: the first malformed record aborts the
/// build and no partial graph is produced.
#[derive(Debug, Error)]
#[error("record {index}: {reason}")]
pub struct DataShapeError {
	/// Position of the offending record in the fetched array.
	pub index: usize,
	/// What was wrong with it.
	pub reason: String,
}

impl DataShapeError {
	pub(super) fn new(index: usize, reason: impl Into<String>) -> Self {
		Self {
			index,
			reason: reason.into(),
		}
	}
}
