// crates/scribe-core/src/naming.rs
// ============================================================================
// Module: Scribe Naming
// Description: Lexicon-aware case transforms for generated identifiers.
// Purpose: Derive identifier spellings consistently across all generators.
// Dependencies: crate::errors, heck
// ============================================================================

//! ## Overview
//! Name transformations are pure string functions parameterized by a
//! [`NamingConfig`]: a lexicon of vocabulary terms kept fully uppercased
//! inside camel case (`user_id` becomes `userID` when `id` is in the
//! lexicon) and an entity suffix appended to generated entity type names.
//!
//! A process-wide configuration mirrors the one handed to extension
//! subprocesses through `environment.json`. It is installed once during
//! program initialization (or at responder entry) and read by every
//! transform call site that does not thread a config explicitly;
//! mutating it after initialization is a contract violation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;
use std::sync::RwLock;

use heck::ToSnakeCase;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::DescriptionError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Process-wide string-transformation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingConfig {
    /// Vocabulary terms kept fully uppercased inside camel case.
    #[serde(default)]
    pub lexicon: Vec<String>,
    /// Suffix appended to generated entity type names.
    #[serde(default)]
    pub entity_suffix: String,
}

impl NamingConfig {
    /// Returns true when `token` is a lexicon term, compared
    /// case-insensitively.
    #[must_use]
    pub fn is_lexicon_term(&self, token: &str) -> bool {
        self.lexicon.iter().any(|term| term.eq_ignore_ascii_case(token))
    }
}

/// Backing store for the process-wide configuration.
static CONFIG: LazyLock<RwLock<NamingConfig>> =
    LazyLock::new(|| RwLock::new(NamingConfig::default()));

/// Installs the process-wide configuration.
///
/// Intended to be called once before descriptions are processed, or at
/// the start of a responder invocation.
pub fn install(config: NamingConfig) {
    match CONFIG.write() {
        Ok(mut guard) => *guard = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Returns a snapshot of the process-wide configuration.
#[must_use]
pub fn current() -> NamingConfig {
    match CONFIG.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

// ============================================================================
// SECTION: Tokenization
// ============================================================================

/// Splits an identifier into word tokens at separators and camel
/// boundaries.
///
/// # Errors
///
/// Returns [`DescriptionError::UnsupportedCaseConversion`] when the input
/// is empty or contains characters outside ASCII identifiers.
fn tokenize(input: &str) -> Result<Vec<String>, DescriptionError> {
    let characters: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    for (index, &character) in characters.iter().enumerate() {
        if matches!(character, '_' | '-' | ' ' | '.' | '/') {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !character.is_ascii_alphanumeric() {
            return Err(DescriptionError::UnsupportedCaseConversion);
        }
        if !current.is_empty()
            && let Some(&previous) = characters.get(index.wrapping_sub(1))
        {
            let lower_to_upper = (previous.is_ascii_lowercase() || previous.is_ascii_digit())
                && character.is_ascii_uppercase();
            let acronym_end = previous.is_ascii_uppercase()
                && character.is_ascii_uppercase()
                && characters.get(index + 1).is_some_and(char::is_ascii_lowercase);
            if lower_to_upper || acronym_end {
                tokens.push(std::mem::take(&mut current));
            }
        }
        current.push(character);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    if tokens.is_empty() {
        return Err(DescriptionError::UnsupportedCaseConversion);
    }
    Ok(tokens)
}

/// Renders one camel token, honoring the lexicon.
fn camel_token(config: &NamingConfig, token: &str) -> String {
    if config.is_lexicon_term(token) {
        return token.to_ascii_uppercase();
    }
    let lowered = token.to_ascii_lowercase();
    let mut characters = lowered.chars();
    match characters.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + characters.as_str(),
        None => lowered,
    }
}

// ============================================================================
// SECTION: Transforms
// ============================================================================

/// Converts a name to lower camel case under the lexicon.
///
/// # Errors
///
/// Returns [`DescriptionError::UnsupportedCaseConversion`] when the name
/// cannot be tokenized.
pub fn camel_cased(config: &NamingConfig, input: &str) -> Result<String, DescriptionError> {
    let tokens = tokenize(input)?;
    let mut output = String::new();
    for (index, token) in tokens.iter().enumerate() {
        if index == 0 {
            output.push_str(&token.to_ascii_lowercase());
        } else {
            output.push_str(&camel_token(config, token));
        }
    }
    Ok(output)
}

/// Converts a name to upper camel case under the lexicon.
///
/// # Errors
///
/// Returns [`DescriptionError::UnsupportedCaseConversion`] when the name
/// cannot be tokenized.
pub fn pascal_cased(config: &NamingConfig, input: &str) -> Result<String, DescriptionError> {
    let tokens = tokenize(input)?;
    Ok(tokens.iter().map(|token| camel_token(config, token)).collect())
}

/// Converts a name to snake case.
#[must_use]
pub fn snake_cased(input: &str) -> String {
    input.to_snake_case()
}

/// Derives the generated type name for an entity: upper camel case plus
/// the configured entity suffix.
///
/// # Errors
///
/// Returns [`DescriptionError::UnsupportedCaseConversion`] when the name
/// cannot be tokenized.
pub fn suffixed_name(config: &NamingConfig, input: &str) -> Result<String, DescriptionError> {
    Ok(pascal_cased(config, input)? + &config.entity_suffix)
}

/// Derives the plural spelling of a name.
#[must_use]
pub fn plural_name(input: &str) -> String {
    let lowered = input.to_ascii_lowercase();
    if let Some(stem) = input.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if penultimate.is_some_and(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{stem}ies");
        }
    }
    if lowered.ends_with('s')
        || lowered.ends_with('x')
        || lowered.ends_with('z')
        || lowered.ends_with("ch")
        || lowered.ends_with("sh")
    {
        return format!("{input}es");
    }
    format!("{input}s")
}

/// Reserved words of the generated surface that require escaping.
const RESERVED_WORDS: &[&str] = &[
    "associatedtype",
    "case",
    "catch",
    "class",
    "continue",
    "default",
    "defer",
    "do",
    "else",
    "enum",
    "extension",
    "fallthrough",
    "false",
    "for",
    "func",
    "guard",
    "if",
    "import",
    "in",
    "init",
    "internal",
    "is",
    "let",
    "nil",
    "operator",
    "private",
    "protocol",
    "public",
    "repeat",
    "return",
    "self",
    "static",
    "struct",
    "subscript",
    "super",
    "switch",
    "throw",
    "throws",
    "true",
    "try",
    "typealias",
    "var",
    "where",
    "while",
];

/// Converts a name to a safe camel-cased variable, escaping reserved
/// words of the generated surface.
///
/// # Errors
///
/// Returns [`DescriptionError::UnsupportedCaseConversion`] when the name
/// cannot be tokenized.
pub fn safe_variable_name(config: &NamingConfig, input: &str) -> Result<String, DescriptionError> {
    let cased = camel_cased(config, input)?;
    if RESERVED_WORDS.contains(&cased.as_str()) {
        return Ok(format!("`{cased}`"));
    }
    Ok(cased)
}
