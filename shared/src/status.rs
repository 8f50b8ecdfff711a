//! Status bodies returned by `status.json` and `full_status.json`
//!
//! Every leaf value sent by the module is a JSON string, booleans included
//! (`"0"` / `"1"`). Sections keep the raw object and coerce on read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

use crate::codec::{self, CodecError};

/// Which of the two status views a snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Simple,
    Full,
}

impl StatusKind {
    /// Path of the endpoint serving this view
    pub fn endpoint(self) -> &'static str {
        match self {
            StatusKind::Simple => crate::endpoints::SIMPLE_STATUS,
            StatusKind::Full => crate::endpoints::FULL_STATUS,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusKind::Simple => write!(f, "simple"),
            StatusKind::Full => write!(f, "full"),
        }
    }
}

/// One JSON object of a status body (`status`, `firmware`, `sensors`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(Map<String, Value>);

impl Section {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add a leaf, encoded as a string the way the module does
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Replace a leaf, encoded as a string
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), Value::String(value.to_string()));
    }

    /// Raw JSON value of a leaf
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Leaf as text. Numbers and booleans are rendered, containers are rejected.
    pub fn text(&self, key: &str) -> Result<Cow<'_, str>, CodecError> {
        match self.0.get(key) {
            None => Err(CodecError::MissingField(key.to_string())),
            Some(Value::String(s)) => Ok(Cow::Borrowed(s.as_str())),
            Some(Value::Number(n)) => Ok(Cow::Owned(n.to_string())),
            Some(Value::Bool(b)) => Ok(Cow::Owned(if *b { "1" } else { "0" }.to_string())),
            Some(other) => Err(CodecError::MalformedValue {
                field: key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Leaf coerced to a boolean
    pub fn flag(&self, key: &str) -> Result<bool, CodecError> {
        Ok(codec::to_bool(&self.text(key)?))
    }

    /// Leaf coerced to an integer
    pub fn int(&self, key: &str) -> Result<i64, CodecError> {
        codec::to_int(key, &self.text(key)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body of `status.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleStatus {
    /// Action the module reports having executed
    pub action: String,
    /// Whether the request was understood
    pub result: String,
    pub status: Section,
}

/// Body of `full_status.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullStatus {
    pub action: String,
    pub result: String,
    pub firmware: Section,
    pub tc_status: Section,
    pub power_status: Section,
    pub buttons: Section,
    pub sensors: Section,
    pub webview: Section,
}

/// The most recently fetched status, exactly one view at a time
#[derive(Debug, Clone, PartialEq)]
pub enum StatusSnapshot {
    Simple(SimpleStatus),
    Full(FullStatus),
}

impl StatusSnapshot {
    pub fn kind(&self) -> StatusKind {
        match self {
            StatusSnapshot::Simple(_) => StatusKind::Simple,
            StatusSnapshot::Full(_) => StatusKind::Full,
        }
    }

    pub fn action(&self) -> &str {
        match self {
            StatusSnapshot::Simple(s) => &s.action,
            StatusSnapshot::Full(f) => &f.action,
        }
    }

    pub fn result(&self) -> &str {
        match self {
            StatusSnapshot::Simple(s) => &s.result,
            StatusSnapshot::Full(f) => &f.result,
        }
    }

    /// The full view, if that is what is held
    pub fn as_full(&self) -> Option<&FullStatus> {
        match self {
            StatusSnapshot::Full(f) => Some(f),
            StatusSnapshot::Simple(_) => None,
        }
    }

    /// The simple view, if that is what is held
    pub fn as_simple(&self) -> Option<&SimpleStatus> {
        match self {
            StatusSnapshot::Simple(s) => Some(s),
            StatusSnapshot::Full(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_text_renders_scalars() {
        let section: Section =
            serde_json::from_str(r#"{"a":"7","b":12,"c":true,"d":[1]}"#).unwrap();
        assert_eq!(section.text("a").unwrap(), "7");
        assert_eq!(section.text("b").unwrap(), "12");
        assert_eq!(section.text("c").unwrap(), "1");
        assert!(matches!(
            section.text("d"),
            Err(CodecError::MalformedValue { .. })
        ));
        assert!(matches!(section.text("e"), Err(CodecError::MissingField(f)) if f == "e"));
    }

    #[test]
    fn test_section_builder_encodes_strings() {
        let section = Section::new().with("charge", 87).with("cleaning", "0");
        assert_eq!(section.raw("charge"), Some(&Value::String("87".into())));
        assert_eq!(section.int("charge").unwrap(), 87);
        assert!(!section.flag("cleaning").unwrap());
        assert_eq!(section.len(), 2);
    }

    #[test]
    fn test_kind_endpoints() {
        assert_eq!(StatusKind::Simple.endpoint(), "status.json");
        assert_eq!(StatusKind::Full.endpoint(), "full_status.json");
        assert_eq!(StatusKind::Full.to_string(), "full");
    }
}
