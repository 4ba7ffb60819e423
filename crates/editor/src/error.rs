//! Error types for the inline diagnostics engine.
//!
//! Aggregation and rendering never fail: anomalies there are absorbed by
//! defaulting, clamping, or skipping a cycle. Only settings parsing and the
//! user-facing commands return errors.

use thiserror::Error;

/// Errors raised while reading a settings document.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The document is not valid JSON.
	#[error("settings document is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// The document root is not a JSON object.
	#[error("settings document must be a JSON object")]
	NotAnObject,

	/// The namespace entry exists but is not an object.
	#[error("`{section}` settings must be a JSON object")]
	SectionNotAnObject {
		/// Namespace that held the wrong type.
		section: &'static str,
	},
}

/// Failures reported by the editor host.
#[derive(Debug, Error)]
pub enum HostError {
	/// Writing a setting to persistent configuration failed.
	#[error("failed to persist setting `{key}`: {reason}")]
	Persist {
		/// Fully qualified setting key.
		key: String,
		/// Host supplied reason.
		reason: String,
	},

	/// The host cannot service requests right now.
	#[error("editor host is unavailable")]
	Unavailable,
}

/// Errors returned by user-facing commands.
#[derive(Debug, Error)]
pub enum CommandError {
	/// The host rejected the request.
	#[error(transparent)]
	Host(#[from] HostError),

	/// The coordinator was disposed and accepts no further commands.
	#[error("inline diagnostics have been disposed")]
	Disposed,
}

/// Result type for command operations.
pub type CommandResult<T> = std::result::Result<T, CommandError>;
