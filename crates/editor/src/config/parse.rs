use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{CONFIG_SECTION, Settings, clamp_opacity, keys};
use crate::error::ConfigError;

/// Reads settings from a complete JSON settings document.
///
/// Accepts the nested form `{"inlineDiagnostics": {"enabled": false}}` and the
/// dotted form `{"inlineDiagnostics.enabled": false}`. When both name the same
/// key, the dotted entry wins. Unrelated keys are ignored.
pub fn from_json_str(text: &str) -> Result<Settings, ConfigError> {
	let Value::Object(root) = serde_json::from_str::<Value>(text)? else {
		return Err(ConfigError::NotAnObject);
	};

	let mut section = match root.get(CONFIG_SECTION) {
		None => Map::new(),
		Some(Value::Object(nested)) => nested.clone(),
		Some(_) => {
			return Err(ConfigError::SectionNotAnObject {
				section: CONFIG_SECTION,
			});
		}
	};

	let prefix = format!("{CONFIG_SECTION}.");
	for (key, value) in &root {
		if let Some(short) = key.strip_prefix(&prefix) {
			section.insert(short.to_string(), value.clone());
		}
	}

	Ok(from_section(&section))
}

/// Reads settings from the namespace object itself.
///
/// Never fails: each key falls back to its default independently.
pub fn from_section(section: &Map<String, Value>) -> Settings {
	let defaults = Settings::default();
	Settings {
		enabled: read(section, keys::ENABLED).unwrap_or(defaults.enabled),
		compact_mode: read(section, keys::COMPACT_MODE).unwrap_or(defaults.compact_mode),
		background_opacity: read::<f64>(section, keys::BACKGROUND_OPACITY)
			.map(clamp_opacity)
			.unwrap_or(defaults.background_opacity),
		dot_count: read_count(section, keys::DOT_COUNT, 1).unwrap_or(defaults.dot_count),
		show_icons: read(section, keys::SHOW_ICONS).unwrap_or(defaults.show_icons),
		max_message_length: read_count(section, keys::MAX_MESSAGE_LENGTH, 1).unwrap_or(defaults.max_message_length),
		update_debounce_ms: read_count(section, keys::UPDATE_DEBOUNCE, 0)
			.map(|ms| ms as u64)
			.unwrap_or(defaults.update_debounce_ms),
	}
}

fn read<T: DeserializeOwned>(section: &Map<String, Value>, key: &'static str) -> Option<T> {
	let value = section.get(key)?;
	match T::deserialize(value) {
		Ok(parsed) => Some(parsed),
		Err(error) => {
			warn!(key, %error, "config.settings.invalid_value");
			None
		}
	}
}

/// Reads a non-negative integer, truncating fractions and clamping to `min`.
fn read_count(section: &Map<String, Value>, key: &'static str, min: usize) -> Option<usize> {
	let raw = read::<f64>(section, key)?;
	let clamped = raw.trunc().max(min as f64).min(f64::from(u32::MAX));
	if clamped != raw {
		debug!(key, raw, clamped, "config.settings.clamped");
	}
	Some(clamped as usize)
}
