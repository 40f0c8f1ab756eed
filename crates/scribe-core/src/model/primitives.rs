// crates/scribe-core/src/model/primitives.rs
// ============================================================================
// Module: Scribe Primitive Types
// Description: Scalar kinds, platform tags, and default-value literals.
// Purpose: Provide the leaf type algebra shared by every description element.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Scalar kinds carry three projections: a surface name used by the
//! serialization format, a persistence kind used by store bindings, and an
//! Objective-C interop classification used when generating optional
//! properties. Default values are a small literal algebra whose equality is
//! defined over the canonical string form, so `1.5s` and `1500ms` stay
//! distinct while float formatting noise does not.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Platforms
// ============================================================================

/// Platform tag restricting where a description element is generated.
///
/// # Invariants
/// - Platform sets are kept sorted; output ordering follows the derived
///   `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// iOS targets.
    #[serde(rename = "iOS")]
    Ios,
    /// macOS targets.
    #[serde(rename = "macOS")]
    Macos,
    /// watchOS targets.
    #[serde(rename = "watchOS")]
    Watchos,
    /// tvOS targets.
    #[serde(rename = "tvOS")]
    Tvos,
}

// ============================================================================
// SECTION: Scalar Kinds
// ============================================================================

/// Persistence representation a scalar maps onto in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceKind {
    /// Stored as a string column.
    String,
    /// Stored as a double column.
    Double,
    /// Stored as a float column.
    Float,
    /// Stored as a 64-bit integer column.
    Int64,
}

/// Scalar property kinds supported by the description format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// UTF-8 string.
    String,
    /// Signed integer.
    Int,
    /// Point in time.
    Date,
    /// Double-precision floating point.
    Double,
    /// Single-precision floating point.
    Float,
    /// Boolean flag.
    Bool,
    /// Duration counted in seconds.
    Seconds,
    /// Duration counted in milliseconds.
    Milliseconds,
    /// URL value.
    Url,
    /// Color value.
    Color,
}

impl ScalarKind {
    /// Returns the canonical surface name used by the serialization format.
    #[must_use]
    pub const fn surface_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Date => "date",
            Self::Double => "double",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
            Self::Url => "url",
            Self::Color => "color",
        }
    }

    /// Resolves a surface name, accepting the legacy `time` spelling for
    /// [`ScalarKind::Seconds`].
    #[must_use]
    pub fn from_surface_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "date" => Some(Self::Date),
            "double" => Some(Self::Double),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "seconds" | "time" => Some(Self::Seconds),
            "milliseconds" => Some(Self::Milliseconds),
            "url" => Some(Self::Url),
            "color" => Some(Self::Color),
            _ => None,
        }
    }

    /// Returns the persistence representation for this scalar.
    #[must_use]
    pub const fn persistence_kind(self) -> PersistenceKind {
        match self {
            Self::String | Self::Url | Self::Color => PersistenceKind::String,
            Self::Date | Self::Double | Self::Seconds | Self::Milliseconds => {
                PersistenceKind::Double
            }
            Self::Float => PersistenceKind::Float,
            Self::Int | Self::Bool => PersistenceKind::Int64,
        }
    }

    /// Returns true when the scalar bridges to an Objective-C value type
    /// that needs boxing in optional position.
    #[must_use]
    pub const fn is_objc_value_type(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Double
                | Self::Float
                | Self::Bool
                | Self::Seconds
                | Self::Milliseconds
        )
    }
}

// ============================================================================
// SECTION: Default Values
// ============================================================================

/// Literal default attached to a property.
///
/// # Invariants
/// - Equality and hashing are defined over [`DefaultValue::canonical_string`].
#[derive(Debug, Clone)]
pub enum DefaultValue {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Floating-point literal.
    Float(f64),
    /// Plain string literal.
    String(String),
    /// Fixed point in time.
    Date(OffsetDateTime),
    /// The moment of object creation.
    CurrentDate,
    /// Enumeration case reference, spelled `.case` in the input.
    EnumCase(String),
    /// Explicit null.
    Nil,
    /// Duration literal in seconds, spelled with an `s` suffix.
    Seconds(f64),
    /// Duration literal in milliseconds, spelled with an `ms` suffix.
    Milliseconds(f64),
}

impl DefaultValue {
    /// Returns the canonical string form used for equality and display.
    #[must_use]
    pub fn canonical_string(&self) -> String {
        match self {
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::String(value) => value.clone(),
            Self::Date(value) => value.format(&Rfc3339).unwrap_or_default(),
            Self::CurrentDate => "current_date".to_string(),
            Self::EnumCase(name) => format!(".{name}"),
            Self::Nil => "nil".to_string(),
            Self::Seconds(value) => format!("{value}s"),
            Self::Milliseconds(value) => format!("{value}ms"),
        }
    }

    /// Classifies a string literal through the tag dispatch used by the
    /// serialization format.
    ///
    /// Dispatch order: RFC 3339 date, `current_date`, `nil`, `ms` suffix,
    /// `s` suffix, leading `.` enumeration case, plain string.
    #[must_use]
    pub fn from_string_literal(value: &str) -> Self {
        if let Ok(date) = OffsetDateTime::parse(value, &Rfc3339) {
            return Self::Date(date);
        }
        match value {
            "current_date" => return Self::CurrentDate,
            "nil" => return Self::Nil,
            _ => {}
        }
        if let Some(millis) = value.strip_suffix("ms")
            && let Ok(parsed) = millis.parse::<f64>()
        {
            return Self::Milliseconds(parsed);
        }
        if let Some(seconds) = value.strip_suffix('s')
            && let Ok(parsed) = seconds.parse::<f64>()
        {
            return Self::Seconds(parsed);
        }
        if let Some(case) = value.strip_prefix('.')
            && !case.is_empty()
        {
            return Self::EnumCase(case.to_string());
        }
        Self::String(value.to_string())
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

impl PartialEq for DefaultValue {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_string() == other.canonical_string()
    }
}

impl Eq for DefaultValue {}

impl Hash for DefaultValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_string().hash(state);
    }
}

// ============================================================================
// SECTION: Default Value Serialization
// ============================================================================

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(_)
            | Self::Date(_)
            | Self::CurrentDate
            | Self::EnumCase(_)
            | Self::Nil
            | Self::Seconds(_)
            | Self::Milliseconds(_) => serializer.serialize_str(&self.canonical_string()),
        }
    }
}

/// Visitor decoding a default value from its JSON representation.
struct DefaultValueVisitor;

impl de::Visitor<'_> for DefaultValueVisitor {
    type Value = DefaultValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a boolean, number, or tagged default-value string")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(DefaultValue::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(DefaultValue::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(DefaultValue::Int)
            .map_err(|_| E::custom(format!("default value {value} overflows an integer")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(DefaultValue::Float(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(DefaultValue::from_string_literal(value))
    }
}

impl<'de> Deserialize<'de> for DefaultValue {
    fn deserialize<D: de::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DefaultValueVisitor)
    }
}

#[cfg(test)]
mod tests;
