//! Global settings loaded from TOML, following the same OnceLock pattern as the phonetic table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub normalizer: NormalizerSettings,
    pub segmenter: SegmenterSettings,
    pub resolver: ResolverSettings,
    pub composer: ComposerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerSettings {
    pub abbreviation_min_prefix: usize,
    pub space_after_abbreviation: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SegmenterSettings {
    pub min_coverage: f64,
    /// Coverage needed to split a word longer than any dictionary key.
    pub joined_min_coverage: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResolverSettings {
    pub idiom_window: usize,
    pub phonetic_weight: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComposerSettings {
    pub preserve_trailing_newline: bool,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.normalizer.abbreviation_min_prefix < 2 {
        return Err(SettingsError::InvalidValue {
            field: "normalizer.abbreviation_min_prefix".to_string(),
            reason: "must be >= 2".to_string(),
        });
    }
    for (field, cov) in [
        ("segmenter.min_coverage", s.segmenter.min_coverage),
        ("segmenter.joined_min_coverage", s.segmenter.joined_min_coverage),
    ] {
        if !(0.0..=1.0).contains(&cov) {
            return Err(SettingsError::InvalidValue {
                field: field.to_string(),
                reason: "must be between 0.0 and 1.0".to_string(),
            });
        }
    }
    if s.resolver.idiom_window < 2 {
        return Err(SettingsError::InvalidValue {
            field: "resolver.idiom_window".to_string(),
            reason: "must be >= 2".to_string(),
        });
    }
    Ok(())
}
