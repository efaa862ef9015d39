use thiserror::Error;

/// Failures mirroring the graph into session storage. None of these are fatal:
/// the in-memory store stays authoritative.
#[derive(Debug, Error)]
pub enum PersistError {
	#[error("session storage is unavailable: {0}")]
	Unavailable(String),
	#[error("failed to read persisted graph: {0}")]
	Read(String),
	#[error("failed to write persisted graph: {0}")]
	Write(String),
	#[error("failed to encode graph: {0}")]
	Encode(#[source] serde_json::Error),
	#[error("failed to decode persisted graph: {0}")]
	Decode(#[source] serde_json::Error),
	#[error("unsupported persisted graph version {0}")]
	UnsupportedVersion(u32),
}
