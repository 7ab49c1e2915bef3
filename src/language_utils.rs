use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// The translation language is configured as an ISO 639-1 or 639-3 code and
/// the speech language as a locale such as `ja-JP`. These helpers validate
/// both and resolve the names used in prompts.

/// Resolve an ISO 639-1 (2-letter) or ISO 639-3 (3-letter) code
fn lookup(code: &str) -> Option<Language> {
    let normalized_code = code.trim().to_lowercase();
    match normalized_code.len() {
        2 => Language::from_639_1(&normalized_code),
        3 => Language::from_639_3(&normalized_code),
        _ => None,
    }
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<()> {
    lookup(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-3 (3-letter) format
pub fn normalize_to_part3(code: &str) -> Result<String> {
    lookup(code)
        .map(|lang| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (lookup(code1), lookup(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup(code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}

/// Get the language's own name for itself (e.g. `ko` -> `한국어`),
/// falling back to the English name when no autonym is known
pub fn get_native_name(code: &str) -> Result<String> {
    let lang = lookup(code)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_autonym().unwrap_or_else(|| lang.to_name()).to_string())
}

/// Validate a locale code such as `ja-JP` and return its language subtag
pub fn validate_locale_code(locale: &str) -> Result<String> {
    let mut parts = locale.trim().split(['-', '_']);
    let language = parts.next().unwrap_or_default();
    let region = parts.next();

    validate_language_code(language)
        .map_err(|_| anyhow!("Invalid locale code: {}", locale))?;

    if let Some(region) = region {
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow!("Invalid region in locale code: {}", locale));
        }
    }
    if parts.next().is_some() {
        return Err(anyhow!("Unsupported locale code: {}", locale));
    }

    Ok(language.to_lowercase())
}
