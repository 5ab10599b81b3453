//! Output tree produced by a partial transformation.

use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::collection::PageMeta;
use crate::deferred::{DeferredClosure, DeferredProp};

/// A transformed value.
#[derive(Debug, Clone)]
pub enum Transformed {
    Value(Value),
    Object(TransformedObject),
    List(Vec<Transformed>),
    Page(TransformedPage),
    Deferred(DeferredProp),
    Closure(DeferredClosure),
}

impl Transformed {
    pub fn as_object(&self) -> Option<&TransformedObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Transformed]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            Self::Page(page) => Some(page.data.as_slice()),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_) | Self::Closure(_))
    }

    /// Convert to JSON. Fails if the tree still holds deferred wrappers.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Serialize for Transformed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Object(object) => object.serialize(serializer),
            Self::List(items) => items.serialize(serializer),
            Self::Page(page) => page.serialize(serializer),
            Self::Deferred(_) | Self::Closure(_) => Err(S::Error::custom(
                "deferred values cannot be serialized; transform with deferred values resolved",
            )),
        }
    }
}

impl From<TransformedObject> for Transformed {
    fn from(value: TransformedObject) -> Self {
        Self::Object(value)
    }
}

/// Ordered mapping from property name to transformed value.
#[derive(Debug, Clone, Default)]
pub struct TransformedObject {
    entries: Vec<(String, Transformed)>,
}

impl TransformedObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Keys come from a schema, so they are unique.
    pub fn insert(&mut self, key: impl Into<String>, value: Transformed) {
        self.entries.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&Transformed> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Transformed)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Serialize for TransformedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A transformed paginated collection: filtered items plus untouched page
/// metadata.
#[derive(Debug, Clone)]
pub struct TransformedPage {
    pub data: Vec<Transformed>,
    pub meta: PageMeta,
}

impl Serialize for TransformedPage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("data", &self.data)?;
        map.serialize_entry("meta", &self.meta)?;
        map.end()
    }
}
