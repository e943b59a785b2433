//! Retrieval of raw dependency records from the assessment data store.
//!
//! One fetch per graph (re)build, outside the tick loop. Responses are kept
//! loosely typed here; per-record shape validation happens in the builder so
//! its errors stay distinct from transport and JSON syntax failures.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use super::error::FetchError;

/// Fetch the records endpoint and decode its body.
///
/// Non-2xx responses and bodies that are not a JSON array both fail; retry
/// is the caller's policy, never automatic.
pub async fn fetch_records(url: &str) -> Result<Vec<Value>, FetchError> {
	let response = reqwest::get(url)
		.await
		.map_err(|source| FetchError::Request {
			url: url.to_string(),
			source,
		})?;
	let status = response.status().as_u16();
	let body = response.text().await.map_err(|source| FetchError::Request {
		url: url.to_string(),
		source,
	})?;
	parse_payload(url, status, &body)
}

/// Classify an HTTP response into records or a [`FetchError`].
pub fn parse_payload(url: &str, status: u16, body: &str) -> Result<Vec<Value>, FetchError> {
	if !(200..300).contains(&status) {
		return Err(FetchError::Status {
			url: url.to_string(),
			status,
		});
	}
	serde_json::from_str::<Vec<Value>>(body).map_err(|source| FetchError::Parse {
		url: url.to_string(),
		source,
	})
}

/// Monotonic token source guarding against stale in-flight responses.
///
/// Each (re)build begins a new generation; a response arriving under an
/// older token must be dropped instead of overwriting a newer graph.
#[derive(Debug, Default)]
pub struct FetchGeneration(AtomicU64);

impl FetchGeneration {
	/// Start a new generation, invalidating all earlier tokens.
	pub fn begin(&self) -> u64 {
		self.0.fetch_add(1, Ordering::Relaxed) + 1
	}

	/// Whether `token` still belongs to the latest generation.
	pub fn is_current(&self, token: u64) -> bool {
		self.0.load(Ordering::Relaxed) == token
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn server_error_carries_the_status_code() {
		let err = parse_payload("/data/deps.json", 500, "oops").unwrap_err();
		assert!(matches!(err, FetchError::Status { status: 500, .. }));
		assert!(err.to_string().contains("500"));
	}

	#[test]
	fn malformed_body_carries_the_parse_diagnostic() {
		let err = parse_payload("/data/deps.json", 200, "{not json").unwrap_err();
		assert!(matches!(err, FetchError::Parse { .. }));
		assert!(err.to_string().contains("/data/deps.json"));
	}

	#[test]
	fn non_array_payload_is_rejected() {
		let err = parse_payload("/data/deps.json", 200, r#"{"nodes": []}"#).unwrap_err();
		assert!(matches!(err, FetchError::Parse { .. }));
	}

	#[test]
	fn success_yields_raw_records() {
		let body = r#"[{"name": "A", "dependencies": ["B"]}]"#;
		let values = parse_payload("/data/deps.json", 200, body).unwrap();
		assert_eq!(values.len(), 1);
		assert_eq!(values[0]["name"], "A");
	}

	#[test]
	fn older_generation_tokens_go_stale() {
		let generation = FetchGeneration::default();
		let first = generation.begin();
		assert!(generation.is_current(first));

		let second = generation.begin();
		assert!(!generation.is_current(first));
		assert!(generation.is_current(second));
	}
}
