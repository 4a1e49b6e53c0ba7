//! `key:value[:extra]*` tags attached to tiles

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not a valid tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The input did not contain at least a key and a value
    #[error("invalid tag '{0}', expected key:value[:extra]*")]
    Invalid(String),
    /// A single field contained the `:` separator
    #[error("tag field '{0}' must not contain ':'")]
    Separator(String),
}

fn check_field(field: &str) -> Result<(), TagError> {
    if field.contains(':') {
        return Err(TagError::Separator(field.to_string()));
    }
    Ok(())
}

/// A `key:value[:extra]*` tag.
///
/// A tile is considered tagged iff its tag list is non-empty. No field
/// contains `:`, so the string form always parses back to the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    key: String,
    value: String,
    extra: Vec<String>,
}

impl Tag {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        extra: Vec<String>,
    ) -> Result<Self, TagError> {
        let tag = Self {
            key: key.into(),
            value: value.into(),
            extra,
        };
        check_field(&tag.key)?;
        check_field(&tag.value)?;
        for extra in &tag.extra {
            check_field(extra)?;
        }
        Ok(tag)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    /// Replace the key, rejecting input that contains `:`
    pub fn set_key(&mut self, key: &str) -> Result<(), TagError> {
        check_field(key)?;
        self.key = key.to_string();
        Ok(())
    }

    /// Replace the value, rejecting input that contains `:`
    pub fn set_value(&mut self, value: &str) -> Result<(), TagError> {
        check_field(value)?;
        self.value = value.to_string();
        Ok(())
    }

    /// Parse a string into a tag.
    ///
    /// The first two `:`-separated fields are the key and value; everything
    /// after the second colon is split on `:` into the extra qualifiers.
    pub fn parse(input: &str) -> Result<Self, TagError> {
        let mut split = input.splitn(3, ':');
        let (Some(key), Some(value)) = (split.next(), split.next()) else {
            return Err(TagError::Invalid(input.to_string()));
        };

        let extra = split
            .next()
            .map(|rest| rest.split(':').map(str::to_string).collect())
            .unwrap_or_default();

        Ok(Self {
            key: key.to_string(),
            value: value.to_string(),
            extra,
        })
    }

    /// Check if the tag contains the specified extra qualifier
    pub fn has_extra(&self, extra_name: &str) -> bool {
        self.extra.iter().any(|e| e == extra_name)
    }

    /// Check if this tag's key and value are equal to another tag's (extras are ignored)
    pub fn equals_tag(&self, other: &Tag) -> bool {
        self.key == other.key && self.value == other.value
    }

    /// The extras joined back into their `a:b:c` form, as shown in edit forms
    pub fn extra_string(&self) -> String {
        self.extra.join(":")
    }

    /// Replace the extras from an `a:b:c` string. An empty string clears them.
    pub fn set_extra_string(&mut self, extras: &str) {
        self.extra = if extras.is_empty() {
            Vec::new()
        } else {
            extras.split(':').map(str::to_string).collect()
        };
    }
}

impl Default for Tag {
    fn default() -> Self {
        Self {
            key: "default".to_string(),
            value: "default".to_string(),
            extra: Vec::new(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.value)?;
        for extra in &self.extra {
            write!(f, ":{}", extra)?;
        }
        Ok(())
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Tag::parse(&raw).map_err(serde::de::Error::custom)
    }
}
