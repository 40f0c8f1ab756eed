// crates/scribe-core/src/codec/subtype.rs
// ============================================================================
// Module: Subtype Codec
// Description: Raw wire shape for subtypes and their three item shapes.
// Purpose: Resolve item-shape precedence and subtype property invariants.
// Dependencies: crate::codec::property, crate::errors, crate::model, serde
// ============================================================================

//! ## Overview
//! A subtype's shape is resolved by key presence: `cases` wins over
//! `options`, which wins over `properties`; none of the three is a
//! data-corruption failure. Subtype properties must either log decoding
//! errors or carry a default; unused property declarations are dropped
//! and the survivors sorted by name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::codec::property::DictionaryPolicy;
use crate::codec::property::resolve_property_type;
use crate::errors::DescriptionError;
use crate::model::primitives::DefaultValue;
use crate::model::primitives::Platform;
use crate::model::subtype::Subtype;
use crate::model::subtype::SubtypeItems;
use crate::model::subtype::SubtypeProperty;

// ============================================================================
// SECTION: Raw Subtype Property
// ============================================================================

/// Wire shape of a subtype property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSubtypeProperty {
    /// Property name.
    pub name: String,
    /// Payload key override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Surface type string; dictionaries are permitted here.
    pub property_type: String,
    /// Nullability flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// Legacy spelling of `nullable`; input only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Default applied when the payload omits the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    /// Log decoding failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_error: Option<bool>,
    /// Objective-C interop flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objc: Option<bool>,
    /// Keep in schema but exclude from generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused: Option<bool>,
    /// Platform restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<BTreeSet<Platform>>,
}

impl TryFrom<RawSubtypeProperty> for SubtypeProperty {
    type Error = DescriptionError;

    fn try_from(raw: RawSubtypeProperty) -> Result<Self, Self::Error> {
        let log_error = raw.log_error.unwrap_or(true);
        if !log_error && raw.default_value.is_none() {
            return Err(DescriptionError::DataCorrupted(format!(
                "subtype property '{}' requires a default value when 'logError' is false",
                raw.name
            )));
        }
        let property_type = resolve_property_type(
            &raw.name,
            Some(raw.property_type),
            None,
            DictionaryPolicy::Allow,
        )?;
        let key = raw.key.unwrap_or_else(|| raw.name.clone());
        Ok(Self {
            key,
            property_type,
            nullable: raw.nullable.or(raw.optional).unwrap_or(false),
            default_value: raw.default_value,
            log_error,
            objc: raw.objc.unwrap_or(false),
            unused: raw.unused.unwrap_or(false),
            platforms: raw.platforms.unwrap_or_default(),
            name: raw.name,
        })
    }
}

impl TryFrom<&SubtypeProperty> for RawSubtypeProperty {
    type Error = DescriptionError;

    fn try_from(property: &SubtypeProperty) -> Result<Self, Self::Error> {
        let surface = property.property_type.surface_string().ok_or_else(|| {
            DescriptionError::DataCorrupted(format!(
                "subtype property '{}' has no surface type",
                property.name
            ))
        })?;
        Ok(Self {
            name: property.name.clone(),
            key: (property.key != property.name).then(|| property.key.clone()),
            property_type: surface,
            nullable: property.nullable.then_some(true),
            optional: None,
            default_value: property.default_value.clone(),
            log_error: (!property.log_error).then_some(false),
            objc: property.objc.then_some(true),
            unused: property.unused.then_some(true),
            platforms: (!property.platforms.is_empty()).then(|| property.platforms.clone()),
        })
    }
}

// ============================================================================
// SECTION: Raw Subtype
// ============================================================================

/// Wire shape of a subtype.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSubtype {
    /// Subtype name.
    pub name: String,
    /// Enumeration cases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cases: Option<Vec<String>>,
    /// Cases kept in the schema but not generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_cases: Option<Vec<String>>,
    /// Generate an Objective-C `none` case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objc_none_case: Option<bool>,
    /// Option flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Options kept in the schema but not generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unused_options: Option<Vec<String>>,
    /// Product properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<RawSubtypeProperty>>,
    /// Protocol conformances implemented by hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_implementations: Option<BTreeSet<String>>,
    /// Objective-C interop flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objc: Option<bool>,
    /// Platform restriction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<BTreeSet<Platform>>,
}

impl TryFrom<RawSubtype> for Subtype {
    type Error = DescriptionError;

    fn try_from(raw: RawSubtype) -> Result<Self, Self::Error> {
        let items = if let Some(used) = raw.cases {
            SubtypeItems::Cases {
                used,
                unused: raw.unused_cases.unwrap_or_default(),
                objc_none_case: raw.objc_none_case.unwrap_or(false),
            }
        } else if let Some(used) = raw.options {
            SubtypeItems::Options { used, unused: raw.unused_options.unwrap_or_default() }
        } else if let Some(raw_properties) = raw.properties {
            let mut properties = raw_properties
                .into_iter()
                .map(SubtypeProperty::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            properties.retain(|property| !property.unused);
            properties.sort_by(|left, right| left.name.cmp(&right.name));
            SubtypeItems::Properties(properties)
        } else {
            return Err(DescriptionError::DataCorrupted(format!(
                "subtype '{}' declares no cases, options, or properties",
                raw.name
            )));
        };
        Ok(Self {
            items,
            manual_implementations: raw.manual_implementations.unwrap_or_default(),
            objc: raw.objc.unwrap_or(false),
            platforms: raw.platforms.unwrap_or_default(),
            name: raw.name,
        })
    }
}

impl TryFrom<&Subtype> for RawSubtype {
    type Error = DescriptionError;

    fn try_from(subtype: &Subtype) -> Result<Self, Self::Error> {
        let mut raw = Self {
            name: subtype.name.clone(),
            cases: None,
            unused_cases: None,
            objc_none_case: None,
            options: None,
            unused_options: None,
            properties: None,
            manual_implementations: (!subtype.manual_implementations.is_empty())
                .then(|| subtype.manual_implementations.clone()),
            objc: subtype.objc.then_some(true),
            platforms: (!subtype.platforms.is_empty()).then(|| subtype.platforms.clone()),
        };
        match &subtype.items {
            SubtypeItems::Cases { used, unused, objc_none_case } => {
                raw.cases = Some(used.clone());
                raw.unused_cases = (!unused.is_empty()).then(|| unused.clone());
                raw.objc_none_case = objc_none_case.then_some(true);
            }
            SubtypeItems::Options { used, unused } => {
                raw.options = Some(used.clone());
                raw.unused_options = (!unused.is_empty()).then(|| unused.clone());
            }
            SubtypeItems::Properties(properties) => {
                raw.properties = Some(
                    properties
                        .iter()
                        .map(RawSubtypeProperty::try_from)
                        .collect::<Result<Vec<_>, _>>()?,
                );
            }
        }
        Ok(raw)
    }
}
