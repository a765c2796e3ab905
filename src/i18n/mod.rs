//! I18n Module - Übersetzungen der UI-Texte
//!
//! Fluent-Bundles pro Sprache, als `.ftl`-Ressourcen ins Binary
//! eingebettet. Aufgelöst wird in dieser Reihenfolge: vom Backend
//! bevorzugtes Sprach-Tag, System-Locale, Fallback `en`.

use fluent_bundle::{concurrent::FluentBundle, FluentResource};
use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Locales;

static FALLBACK_LOCALE: Lazy<LanguageIdentifier> =
    Lazy::new(|| "en".parse().expect("fallback locale is valid"));

// ============================================================================
// I18N
// ============================================================================

/// Übersetzungs-Schicht über den eingebetteten Fluent-Ressourcen
pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    current: LanguageIdentifier,
}

impl I18n {
    /// Lädt alle eingebetteten Locales und wählt die System-Sprache
    pub fn new() -> Self {
        let mut bundles = HashMap::new();

        for file in Locales::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
                tracing::warn!("skipping translation file with odd name: {}", filename);
                continue;
            };
            let Some(content) = Locales::get(filename) else {
                continue;
            };

            let source = String::from_utf8_lossy(content.data.as_ref()).into_owned();
            match FluentResource::try_new(source) {
                Ok(resource) => {
                    let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
                    if bundle.add_resource(resource).is_err() {
                        tracing::warn!("translation resource has overlapping ids: {}", filename);
                    }
                    bundles.insert(locale, bundle);
                }
                Err(_) => {
                    tracing::warn!("failed to parse translation file: {}", filename);
                }
            }
        }

        let mut i18n = Self {
            bundles,
            current: FALLBACK_LOCALE.clone(),
        };

        if let Some(os_locale) = sys_locale::get_locale() {
            if let Some(locale) = i18n.match_available(&os_locale) {
                i18n.current = locale;
            }
        }

        i18n
    }

    /// Übernimmt das vom Backend bevorzugte Sprach-Tag, falls vorhanden
    pub fn set_preferred(&mut self, tag: &str) {
        if let Some(locale) = self.match_available(tag) {
            tracing::debug!("switching locale to {}", locale);
            self.current = locale;
        } else {
            tracing::debug!("preferred locale '{}' not available, keeping {}", tag, self.current);
        }
    }

    /// Aktuell aktive Sprache
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current
    }

    /// Übersetzt einen Schlüssel; fällt auf `en` und zuletzt auf den
    /// Schlüssel selbst zurück
    pub fn tr(&self, key: &str) -> String {
        if let Some(text) = self.lookup(&self.current, key) {
            return text;
        }
        if let Some(text) = self.lookup(&FALLBACK_LOCALE, key) {
            return text;
        }
        tracing::warn!("missing translation for key '{}'", key);
        key.to_string()
    }

    fn lookup(&self, locale: &LanguageIdentifier, key: &str) -> Option<String> {
        let bundle = self.bundles.get(locale)?;
        let message = bundle.get_message(key)?;
        let pattern = message.value()?;

        let mut errors = Vec::new();
        let value = bundle.format_pattern(pattern, None, &mut errors);
        if errors.is_empty() {
            Some(value.into_owned())
        } else {
            None
        }
    }

    /// Sucht eine verfügbare Locale mit gleichem Sprach-Subtag
    fn match_available(&self, tag: &str) -> Option<LanguageIdentifier> {
        let wanted: LanguageIdentifier = tag.parse().ok()?;
        self.bundles
            .keys()
            .find(|available| available.language == wanted.language)
            .cloned()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("current", &self.current)
            .field("available", &self.bundles.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
