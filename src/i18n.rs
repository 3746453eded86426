//! Internationalization and accessibility support
//!
//! UI strings are looked up by their English source text. Built-in
//! translations cover the dialog vocabulary; applications can layer their own
//! with [`Locale::with_message`].

use std::collections::HashMap;

/// Text reading direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    /// Detect text direction from language code
    pub fn from_lang(lang: &str) -> Self {
        const RTL: [&str; 5] = ["ar", "he", "fa", "ur", "yi"];
        if RTL.iter().any(|prefix| lang.starts_with(prefix)) {
            TextDirection::RightToLeft
        } else {
            TextDirection::LeftToRight
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, TextDirection::RightToLeft)
    }
}

/// Built-in translations of the dialog vocabulary, keyed by language
const BUILTIN_MESSAGES: &[(&str, &[(&str, &str)])] = &[
    ("de", &[("Ok", "OK"), ("Cancel", "Abbrechen"), ("Confirm", "Bestätigen")]),
    ("fr", &[("Ok", "OK"), ("Cancel", "Annuler"), ("Confirm", "Confirmer")]),
    ("es", &[("Ok", "Aceptar"), ("Cancel", "Cancelar"), ("Confirm", "Confirmar")]),
    ("ja", &[("Ok", "OK"), ("Cancel", "キャンセル"), ("Confirm", "確認")]),
    ("ar", &[("Ok", "موافق"), ("Cancel", "إلغاء"), ("Confirm", "تأكيد")]),
    ("he", &[("Ok", "אישור"), ("Cancel", "ביטול"), ("Confirm", "אישור")]),
];

/// Locale information for display and translation
#[derive(Debug, Clone)]
pub struct Locale {
    /// Language code (ISO 639-1): "en", "ar", "he", "ja", etc.
    pub language: String,

    /// Optional region code (ISO 3166-1): "US", "GB", "SA", "IL", etc.
    pub region: Option<String>,

    /// Text direction for this locale
    pub text_direction: TextDirection,

    /// Application-supplied translations, checked before the built-ins
    messages: HashMap<String, String>,
}

impl Locale {
    /// Create a new locale from language and optional region
    pub fn new(language: impl Into<String>, region: Option<String>) -> Self {
        let language = language.into();
        let text_direction = TextDirection::from_lang(&language);

        Locale {
            language,
            region,
            text_direction,
            messages: HashMap::new(),
        }
    }

    /// Parse locale from string like "en-US", "ar-SA", "he-IL"
    pub fn from_string(locale_str: &str) -> Self {
        if locale_str.is_empty() {
            return Self::default();
        }

        let mut parts = locale_str.split('-');
        let language = parts
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("en")
            .to_string();
        let region = parts.next().map(|s| s.to_uppercase());

        Self::new(language, region)
    }

    /// Detect locale from environment
    pub fn from_env() -> Self {
        match std::env::var("LANG") {
            // LANG is typically like "en_US.UTF-8" or "ar_SA.UTF-8"
            Ok(lang) if !lang.is_empty() && lang != "C" && lang != "POSIX" => {
                let locale_part = lang.split('.').next().unwrap_or("en_US");
                Self::from_string(&locale_part.replace('_', "-"))
            }
            _ => Self::default(),
        }
    }

    /// Add or replace a translation for this locale
    pub fn with_message(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(key.into(), text.into());
        self
    }

    /// Translate a UI string, falling back to the key itself
    pub fn translate(&self, key: &str) -> String {
        if let Some(text) = self.messages.get(key) {
            return text.clone();
        }

        BUILTIN_MESSAGES
            .iter()
            .find(|(lang, _)| *lang == self.language)
            .and_then(|(_, table)| table.iter().find(|(k, _)| *k == key))
            .map(|(_, text)| text.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en", Some("US".to_string()))
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref region) = self.region {
            write!(f, "{}-{}", self.language, region)
        } else {
            write!(f, "{}", self.language)
        }
    }
}

/// Accessibility settings
#[derive(Debug, Clone)]
pub struct AccessibilitySettings {
    /// Use high contrast colors
    pub high_contrast: bool,

    /// Reduce or disable animations
    pub prefer_reduced_motion: bool,

    /// Screen reader is active
    pub screen_reader_enabled: bool,

    /// Font scale multiplier (1.0 = normal, 1.5 = 150%, etc.)
    pub font_scale: f32,
}

impl AccessibilitySettings {
    pub fn new() -> Self {
        Self {
            high_contrast: false,
            prefer_reduced_motion: false,
            screen_reader_enabled: false,
            font_scale: 1.0,
        }
    }

    /// Detect accessibility settings from environment
    pub fn from_env() -> Self {
        Self {
            high_contrast: std::env::var("ACCESSIBILITY_HIGH_CONTRAST").is_ok(),
            prefer_reduced_motion: std::env::var("ACCESSIBILITY_REDUCED_MOTION").is_ok(),
            screen_reader_enabled: std::env::var("SCREEN_READER").is_ok(),
            font_scale: std::env::var("FONT_SCALE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
        }
    }

    /// Apply font scaling to a dimension
    pub fn scale_dimension(&self, base: u16) -> u16 {
        (base as f32 * self.font_scale).round() as u16
    }
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Accessibility role for components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessibilityRole {
    None,
    Button,
    Img,
    Label,
    Dialog,
    AlertDialog,
}
