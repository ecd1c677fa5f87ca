use anyhow::{Result, anyhow};
use isolang::Language;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Language utilities for ISO language code handling
///
/// Translation endpoints mostly use ISO 639-1 codes, occasionally with a
/// region or script subtag ("pt-BR", "zh-Hans"), but some ship their own
/// codes ("zt", "pb"). Source languages may also be "auto".
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
    /// Well-formed code outside the ISO tables, left for the endpoint to judge
    Unlisted,
    /// Auto-detection marker, valid only as a source
    Auto,
}

/// Marker accepted by translation endpoints in place of a source language
pub const AUTO_DETECT: &str = "auto";

/// Primary subtag of 2 or 3 letters, then optional region/script subtags
static LANGUAGE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]+)*$").expect("valid language tag regex")
});

/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(LanguageCodeType::Part1);
        }
    } else if normalized_code.len() == 3 && Language::from_639_3(&normalized_code).is_some() {
        return Ok(LanguageCodeType::Part3);
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Validate a code as sent to the translation endpoint
///
/// Only the shape is enforced. Codes whose primary subtag is not in the ISO
/// tables are accepted as `Unlisted`; `allow_auto` permits the "auto" marker
/// used for source languages.
pub fn validate_translation_code(code: &str, allow_auto: bool) -> Result<LanguageCodeType> {
    let trimmed = code.trim();
    if trimmed.eq_ignore_ascii_case(AUTO_DETECT) {
        if allow_auto {
            return Ok(LanguageCodeType::Auto);
        }
        return Err(anyhow!("'auto' is only valid as a source language"));
    }

    if !LANGUAGE_TAG_REGEX.is_match(trimmed) {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    let primary = trimmed.split(['-', '_']).next().unwrap_or_default();
    match validate_language_code(primary) {
        Ok(code_type) => Ok(code_type),
        Err(_) => {
            debug!("'{}' is not an ISO 639 code, passing it to the endpoint as-is", trimmed);
            Ok(LanguageCodeType::Unlisted)
        }
    }
}
