use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error;
use serde::de::Unexpected::Str;
use thiserror::Error;

/// A non-empty, URL-safe note identifier: ASCII letters, digits, `-`
/// and `_`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SlugString(String);

impl SlugString {
    pub fn parse(s: &str, max_len: usize) -> Result<Self, SlugParseError> {
        let slug = SlugString::from_str(s)?;
        if slug.0.len() > max_len {
            return Err(SlugParseError::TooLong(max_len))
        }
        Ok(slug)
    }

    /// Transliterates the title to ASCII and turns it into a slug
    /// no longer than `max_len`. `None` if nothing usable is left.
    pub fn from_title(title: &str, max_len: usize) -> Option<Self> {
        let mut slug = slug::slugify(title);
        slug.truncate(max_len);
        let slug = slug.trim_end_matches('-');
        SlugString::from_str(slug).ok()
    }
}

impl FromStr for SlugString {
    type Err = SlugParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SlugParseError::Empty)
        }
        if let Some(c) = s.chars().find(|c| !is_slug_char(*c)) {
            return Err(SlugParseError::InvalidCharacter(c))
        }
        Ok(SlugString(s.to_owned()))
    }
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl Deref for SlugString {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0[..]
    }
}

impl Borrow<str> for SlugString {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for SlugString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum SlugParseError {
    #[error("slug is empty")]
    Empty,

    #[error("slug is longer than {0} characters")]
    TooLong(usize),

    #[error("slug contains an invalid character '{0}'")]
    InvalidCharacter(char),
}

impl Serialize for SlugString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SlugString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;
        impl serde::de::Visitor<'_> for Visitor {
            type Value = SlugString;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                formatter.write_str("string containing a valid slug")
            }

            fn visit_str<E>(self, v: &str) -> Result<SlugString, E>
            where
                E: Error
            {
                SlugString::from_str(v)
                    .map_err(|_| Error::invalid_value(Str(v), &self))
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}
