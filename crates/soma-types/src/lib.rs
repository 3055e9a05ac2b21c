//! Shared identifier types for the SOMA engine.
//!
//! Region, complaint, and structure identifiers are authored as stable slugs
//! (`knee-left`, `chest-pain`, `nervous-meninges`). To keep lookups and
//! cross-references deterministic, the engine uses a *canonical* slug form:
//! **lowercase ASCII letters, digits, and single interior hyphens**.
//!
//! This crate provides small wrapper types that guarantee the canonical form
//! once constructed. Non-canonical values (uppercase, whitespace, leading or
//! trailing hyphens, empty strings) are rejected at parse time, which turns
//! authoring mistakes into load failures rather than silent lookup misses.
//!
//! ## Canonical slug form
//! - Characters: `a-z`, `0-9` and `-` only
//! - Must start and end with an alphanumeric character
//! - No consecutive hyphens
//! - Length: 1 to 64 bytes

use std::borrow::Borrow;
use std::fmt;

/// Errors that can occur when parsing identifier slugs.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// The input was empty
    #[error("identifier cannot be empty")]
    Empty,
    /// The input exceeded the maximum slug length
    #[error("identifier exceeds maximum length of {MAX_SLUG_LEN} characters: '{0}'")]
    TooLong(String),
    /// The input contained characters outside the canonical slug alphabet
    #[error(
        "identifier must be lowercase alphanumeric with single interior hyphens, got: '{0}'"
    )]
    NotCanonical(String),
}

/// Maximum accepted slug length in bytes.
pub const MAX_SLUG_LEN: usize = 64;

/// Returns `Ok(())` if `input` is in canonical slug form.
fn validate_slug(input: &str) -> Result<(), IdError> {
    if input.is_empty() {
        return Err(IdError::Empty);
    }
    if input.len() > MAX_SLUG_LEN {
        return Err(IdError::TooLong(input.to_owned()));
    }

    let alphanumeric = |b: u8| matches!(b, b'0'..=b'9' | b'a'..=b'z');
    let bytes = input.as_bytes();

    let ok = bytes.iter().all(|&b| alphanumeric(b) || b == b'-')
        && alphanumeric(bytes[0])
        && alphanumeric(bytes[bytes.len() - 1])
        && !input.contains("--");

    if !ok {
        return Err(IdError::NotCanonical(input.to_owned()));
    }

    Ok(())
}

macro_rules! impl_slug_id {
    ($name:ident) => {
        impl $name {
            /// Validates and wraps a canonical slug.
            ///
            /// # Errors
            ///
            /// Returns an [`IdError`] if `input` is not in canonical slug form.
            pub fn parse(input: impl AsRef<str>) -> Result<Self, IdError> {
                let input = input.as_ref();
                validate_slug(input)?;
                Ok(Self(input.to_owned()))
            }

            /// Returns the slug as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        // Allows `HashMap<$name, _>` lookups keyed by a plain `&str`.
        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                $name::parse(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Identifier of a named, spatially-bounded body region.
///
/// Region ids are globally unique within a registry and stable across
/// releases of the content corpus (`head`, `knee-left`, `abdomen-upper`).
/// Bilateral regions conventionally carry a `-left`/`-right` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionId(String);

impl_slug_id!(RegionId);

/// Identifier of an authored chief complaint.
///
/// Unique within its owning region. Related-complaint references may point
/// across regions and are allowed to dangle; consumers resolve them by
/// omission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComplaintId(String);

impl_slug_id!(ComplaintId);

/// Identifier of a body-system structure in the 3D model
/// (`nervous-meninges`, `musculoskeletal-meniscus`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructureId(String);

impl_slug_id!(StructureId);
