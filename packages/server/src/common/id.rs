//! Typed snowflake wrappers for compile-time type safety.
//!
//! Chat platforms identify users, channels and messages with opaque
//! "snowflake" strings. `Snowflake<T>` wraps that string with a marker type so
//! an `ActorId` can never be passed where a `ChannelId` was expected.
//!
//! # Example
//!
//! ```rust
//! use counting_core::common::{ActorId, ChannelId};
//!
//! let actor = ActorId::new("1100");
//! let channel = ChannelId::new("2200");
//!
//! // This would be a compile error:
//! // let wrong: ChannelId = actor;
//! # let _ = (actor, channel);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

/// A typed wrapper around a platform identifier string.
///
/// The type parameter `T` is a marker for the entity the id belongs to.
#[repr(transparent)]
pub struct Snowflake<T>(String, PhantomData<fn() -> T>);

/// Error returned when parsing an empty or blank identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier must not be empty")]
pub struct EmptyIdError;

// ============================================================================
// Core implementations
// ============================================================================

impl<T> Snowflake<T> {
    /// Wraps a raw identifier without validation.
    #[inline]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into(), PhantomData)
    }

    /// Parses an identifier, rejecting blank input and trimming whitespace.
    pub fn parse(s: &str) -> Result<Self, EmptyIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyIdError);
        }
        Ok(Self::new(trimmed))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Chat mention markup for this id (`<@id>`).
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

// ============================================================================
// Standard trait implementations
// ============================================================================

impl<T> Clone for Snowflake<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<T> Debug for Snowflake<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = std::any::type_name::<T>().rsplit("::").next().unwrap_or("?");
        f.debug_tuple(&format!("Snowflake<{}>", name))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Snowflake<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Snowflake<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Snowflake<T> {}

impl<T> PartialOrd for Snowflake<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Snowflake<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Snowflake<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> AsRef<str> for Snowflake<T> {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<T> From<&str> for Snowflake<T> {
    #[inline]
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<T> From<String> for Snowflake<T> {
    #[inline]
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl<T> FromStr for Snowflake<T> {
    type Err = EmptyIdError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Serde support
// ============================================================================

impl<T> Serialize for Snowflake<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Snowflake<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct User;
    struct Room;

    #[test]
    fn test_parse_trims_and_rejects_blank() {
        let id: Snowflake<User> = Snowflake::parse("  42 ").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(Snowflake::<User>::parse("   "), Err(EmptyIdError));
    }

    #[test]
    fn test_equality_is_by_value() {
        let a: Snowflake<Room> = "7".into();
        let b: Snowflake<Room> = Snowflake::new(String::from("7"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_is_transparent_string() {
        let id: Snowflake<User> = Snowflake::new("123456789");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"123456789\"");

        let back: Snowflake<User> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_blank_id_is_rejected_when_deserializing() {
        assert!(serde_json::from_str::<Snowflake<User>>("\"\"").is_err());
        assert!(serde_json::from_str::<Snowflake<User>>("\"   \"").is_err());

        let trimmed: Snowflake<User> = serde_json::from_str("\" 42 \"").unwrap();
        assert_eq!(trimmed.as_str(), "42");
    }

    #[test]
    fn test_mention_markup() {
        let id: Snowflake<User> = Snowflake::new("99");
        assert_eq!(id.mention(), "<@99>");
    }

    #[test]
    fn test_debug_includes_marker_name() {
        let id: Snowflake<Room> = Snowflake::new("5");
        assert_eq!(format!("{:?}", id), "Snowflake<Room>(\"5\")");
    }
}
