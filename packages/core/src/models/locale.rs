//! Locale Tags
//!
//! A small BCP-47 style language tag: `language[-script][-region][-variant...]`.
//! Both `-` and `_` separators are accepted on input; output always uses `-`
//! with canonical casing (`de-CH`, `zh-Hant-TW`, `sr-Latn`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure to parse a locale tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid locale tag '{tag}': {reason}")]
pub struct LocaleParseError {
    pub tag: String,
    pub reason: String,
}

impl LocaleParseError {
    fn new(tag: &str, reason: impl Into<String>) -> Self {
        Self {
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }
}

/// Language tag identifying a locale
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
    variants: Vec<String>,
}

impl Locale {
    /// Locale consisting of a language only
    pub fn from_language(language: &str) -> Result<Self, LocaleParseError> {
        language.parse()
    }

    /// Parse a language tag
    pub fn parse(tag: &str) -> Result<Self, LocaleParseError> {
        tag.parse()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Canonical tag representation
    pub fn to_language_tag(&self) -> String {
        self.to_string()
    }
}

fn is_alpha(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_digit(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

fn is_alphanumeric(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric())
}

fn title_case(s: &str) -> String {
    let lower = s.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        if tag.is_empty() {
            return Err(LocaleParseError::new(tag, "empty tag"));
        }

        let mut subtags = tag.split(['-', '_']).peekable();

        let language = match subtags.next() {
            Some(lang) if is_alpha(lang) && matches!(lang.len(), 2..=3 | 5..=8) => {
                lang.to_ascii_lowercase()
            }
            Some(lang) => {
                return Err(LocaleParseError::new(
                    tag,
                    format!("'{}' is not a valid language subtag", lang),
                ))
            }
            None => return Err(LocaleParseError::new(tag, "missing language subtag")),
        };

        let script = match subtags.peek() {
            Some(s) if s.len() == 4 && is_alpha(s) => {
                let script = title_case(s);
                subtags.next();
                Some(script)
            }
            _ => None,
        };

        let region = match subtags.peek() {
            Some(r) if (r.len() == 2 && is_alpha(r)) || (r.len() == 3 && is_digit(r)) => {
                let region = r.to_ascii_uppercase();
                subtags.next();
                Some(region)
            }
            _ => None,
        };

        let mut variants = Vec::new();
        for variant in subtags {
            let valid = is_alphanumeric(variant)
                && (matches!(variant.len(), 5..=8)
                    || (variant.len() == 4 && variant.starts_with(|c: char| c.is_ascii_digit())));
            if !valid {
                return Err(LocaleParseError::new(
                    tag,
                    format!("'{}' is not a valid subtag", variant),
                ));
            }
            variants.push(variant.to_ascii_lowercase());
        }

        Ok(Self {
            language,
            script,
            region,
            variants,
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{}", script)?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        for variant in &self.variants {
            write!(f, "-{}", variant)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleParseError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}
