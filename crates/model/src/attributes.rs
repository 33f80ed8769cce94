//! Read-only access to subcatchment attribute records.
//!
//! The attribute store (a shapefile table, a database, a TOML file) is not
//! part of the model. Anything that can look up a value by field name and
//! report the drawn polygon area implements [`AttributeRecord`].

use std::collections::BTreeMap;

use serde::Deserialize;

/// One attribute value as stored.
///
/// Stores often keep numbers as text, so numeric and flag lookups accept
/// either representation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean flag.
    Flag(bool),
    /// Numeric value.
    Number(f64),
    /// Free text.
    Text(String),
}

impl AttributeValue {
    /// Returns the value as text.
    pub fn as_text(&self) -> String {
        match self {
            Self::Flag(true) => "True".to_string(),
            Self::Flag(false) => "False".to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }

    /// Returns the value as a number, parsing text if needed.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Flag(_) => None,
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Returns the value as a flag. Text `True`/`False` in any case.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Number(_) => None,
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Field-by-name access to one subcatchment's attributes.
pub trait AttributeRecord {
    /// Returns the value stored under `field`, or `None` if absent.
    fn value(&self, field: &str) -> Option<&AttributeValue>;

    /// Returns the area of the subcatchment's drawn polygon in map units
    /// squared, if the store has geometry.
    fn polygon_area(&self) -> Option<f64>;
}

/// Field for the polygon area in an [`AttributeMap`].
pub const POLYGON_AREA_FIELD: &str = "PolygonArea";

/// An in-memory attribute record.
///
/// The polygon area is read from the `PolygonArea` field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap {
    fields: BTreeMap<String, AttributeValue>,
}

impl AttributeMap {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field` to `value`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets `field` to `value` in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<AttributeValue>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl AttributeRecord for AttributeMap {
    fn value(&self, field: &str) -> Option<&AttributeValue> {
        self.fields.get(field)
    }

    fn polygon_area(&self) -> Option<f64> {
        self.fields
            .get(POLYGON_AREA_FIELD)
            .and_then(AttributeValue::as_number)
    }
}
