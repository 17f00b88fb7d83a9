//! Key - Identity of a requested dependency
//!
//! Format: `[@Qualifier(args) ]<fully.qualified.Type>`
//!
//! Examples:
//! - `com.example.Database`
//! - `@Named("primary") com.example.Database`
//! - `java.util.Map<java.lang.String, com.example.Handler>`

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A requested dependency: the declared type plus an optional qualifier.
///
/// Keys are the lookup keys of every binding table in a [`BindingGraph`](crate::BindingGraph).
/// Two keys are equal iff both the type and the qualifier match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    /// Qualifier annotation, including the leading `@`
    qualifier: Option<String>,
    /// Fully qualified declared type
    type_name: String,
}

impl Key {
    /// Create an unqualified key
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            qualifier: None,
            type_name: type_name.into(),
        }
    }

    /// Create a qualified key
    pub fn qualified(qualifier: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Parse the textual form of a key.
    ///
    /// A qualifier starts with `@` and ends at the first whitespace outside of
    /// parentheses and string literals, so `@Named("main db") com.example.Db`
    /// keeps its argument intact. Parentheses inside `"..."` are not counted.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidKey("key must not be empty".to_string()));
        }

        if !text.starts_with('@') {
            return Ok(Self::new(text));
        }

        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        let mut split = None;
        for (idx, ch) in text.char_indices() {
            if in_string {
                match ch {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match ch {
                '"' => in_string = true,
                '(' => depth += 1,
                ')' => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        Error::InvalidKey(format!("unbalanced `)` in qualifier: {}", text))
                    })?;
                }
                ch if ch.is_whitespace() && depth == 0 => {
                    split = Some(idx);
                    break;
                }
                _ => {}
            }
        }

        if in_string {
            return Err(Error::InvalidKey(format!("unterminated string in qualifier: {}", text)));
        }
        if depth != 0 {
            return Err(Error::InvalidKey(format!("unbalanced `(` in qualifier: {}", text)));
        }

        let idx = split
            .ok_or_else(|| Error::InvalidKey(format!("qualified key has no type: {}", text)))?;
        let (qualifier, type_name) = text.split_at(idx);
        let type_name = type_name.trim();

        if qualifier.len() < 2 {
            return Err(Error::InvalidKey(format!("empty qualifier: {}", text)));
        }
        if type_name.starts_with('@') {
            return Err(Error::InvalidKey(format!("keys carry at most one qualifier: {}", text)));
        }

        Ok(Self::qualified(qualifier, type_name))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{} {}", qualifier, self.type_name),
            None => write!(f, "{}", self.type_name),
        }
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Key::parse(&s).map_err(serde::de::Error::custom)
    }
}
