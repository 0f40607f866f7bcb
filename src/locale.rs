//! Locale support for date formatting
//!
//! This module handles loading and managing the locale-specific names used
//! when printing and parsing dates, keyed by locale identifiers.

use std::collections::HashMap;
use std::sync::OnceLock;

use log::warn;
use thiserror::Error;

use crate::types::LocaleSettings;

/// Error type for locale operations
#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Error parsing locale data: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid locale table '{0}'")]
    InvalidTable(String),
}

type Result<T> = std::result::Result<T, LocaleError>;

/// Represents a locale manager that provides access to locale-specific settings
pub struct LocaleManager {
    locale_settings: HashMap<String, LocaleSettings>,
}

// Global singleton for locale settings
static LOCALE_MANAGER: OnceLock<LocaleManager> = OnceLock::new();

impl LocaleManager {
    fn new() -> Self {
        let mut manager = Self {
            locale_settings: HashMap::new(),
        };

        if let Err(e) = manager.parse_locale_settings(include_str!("locale/locale_settings.toml")) {
            warn!("Failed to load embedded locale data: {e}");
        }

        manager
    }

    /// Parse the locale settings TOML data
    fn parse_locale_settings(&mut self, toml_str: &str) -> Result<()> {
        let parsed_toml: toml::Value = toml::from_str(toml_str)?;
        let table = parsed_toml
            .as_table()
            .ok_or_else(|| LocaleError::InvalidTable("root".to_string()))?;

        let mut base_settings = LocaleSettings::default();
        if let Some(base) = table.get("base") {
            apply_locale_specific_settings(&mut base_settings, "base", base)?;
        }

        // Languages overlay the base, regional variants overlay their language
        let (languages, regions): (Vec<_>, Vec<_>) = table
            .iter()
            .filter(|(locale_id, _)| *locale_id != "base")
            .partition(|(locale_id, _)| !locale_id.contains('_'));

        for (locale_id, value) in languages {
            let mut settings = base_settings.clone();
            apply_locale_specific_settings(&mut settings, locale_id, value)?;
            self.locale_settings.insert(locale_id.to_string(), settings);
        }

        for (locale_id, value) in regions {
            let language = locale_id.split('_').next().unwrap_or_default();
            let mut settings = self
                .locale_settings
                .get(language)
                .unwrap_or(&base_settings)
                .clone();
            apply_locale_specific_settings(&mut settings, locale_id, value)?;
            self.locale_settings.insert(locale_id.to_string(), settings);
        }

        Ok(())
    }

    /// Get the global locale manager instance
    fn get() -> &'static Self {
        LOCALE_MANAGER.get_or_init(Self::new)
    }

    fn get_locale_settings(&self, locale_id: &str) -> Option<&LocaleSettings> {
        self.locale_settings.get(locale_id)
    }
}

/// Read a list of exactly `N` strings
fn string_array<const N: usize>(table: &toml::Table, key: &str) -> Option<[String; N]> {
    let values = table.get(key)?.as_array()?;
    let names: Vec<String> = values
        .iter()
        .map(|v| v.as_str().unwrap_or("").to_string())
        .collect();
    names.try_into().ok()
}

/// Apply the keys present in a locale table over `settings`
fn apply_locale_specific_settings(settings: &mut LocaleSettings, locale_id: &str, value: &toml::Value) -> Result<()> {
    let table = value
        .as_table()
        .ok_or_else(|| LocaleError::InvalidTable(locale_id.to_string()))?;

    if let Some(names) = string_array(table, "month_names") {
        settings.month_names = names;
    }
    if let Some(names) = string_array(table, "month_abbreviations") {
        settings.short_month_names = names;
    }
    if let Some(names) = string_array(table, "day_names") {
        settings.day_names = names;
    }
    if let Some(names) = string_array(table, "day_abbreviations") {
        settings.short_day_names = names;
    }
    if let Some(markers) = string_array(table, "ampm") {
        settings.ampm_markers = markers;
    }
    if let Some(names) = string_array(table, "era_names") {
        settings.era_names = names;
    }
    if let Some(names) = string_array(table, "quarter_names") {
        settings.quarter_names = names;
    }

    Ok(())
}

/// Get locale settings by exact locale identifier (e.g., "fr", "en_GB")
pub fn get_locale_settings(locale_id: &str) -> Option<LocaleSettings> {
    LocaleManager::get().get_locale_settings(locale_id).cloned()
}

impl LocaleSettings {
    /// Settings for a locale tag such as `fr-FR`, `fr_FR` or `fr`.
    ///
    /// Falls back from the full tag to its language, then to the defaults.
    pub fn for_locale(tag: &str) -> LocaleSettings {
        let normalized = tag.replace('-', "_");
        let language = normalized.split('_').next().unwrap_or_default().to_lowercase();
        get_locale_settings(&normalized)
            .or_else(|| get_locale_settings(&language))
            .unwrap_or_default()
    }
}

/// List all available locale identifiers
pub fn list_available_locales() -> Vec<String> {
    LocaleManager::get()
        .locale_settings
        .keys()
        .cloned()
        .collect()
}
