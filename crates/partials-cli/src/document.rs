//! JSON documents as data objects.
//!
//! A JSON object becomes a [`JsonData`] whose properties are its keys in
//! document order. Nested objects become nested data objects and non-empty
//! arrays of objects become collections; everything else is a plain value.
//!
//! Properties matched by a `--lazy` selector are wrapped in a lazy value and
//! only appear when included.

use std::any::Any;

use partials_model::{DataCollection, DataObject, Field, Lazy, ModelError, Property, Schema};
use partials_transform::{Selector, SelectorError, SelectorTree, split_list};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::trace;

const TYPE_NAME: &str = "JsonData";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("expected a JSON object or an array of objects, found {found}")]
    UnsupportedRoot { found: &'static str },
    #[error("invalid lazy selector: {0}")]
    Lazy(#[from] SelectorError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A JSON object exposed as a data object.
#[derive(Debug)]
pub struct JsonData {
    schema: Schema,
    properties: Vec<Property>,
}

impl JsonData {
    /// Convert `map`. Properties at which a selector in `lazy` ends become
    /// lazy.
    pub fn from_map(map: Map<String, Value>, lazy: &SelectorTree) -> Result<Self, DocumentError> {
        let schema = Schema::new(TYPE_NAME, map.keys().cloned())?;
        let mut properties = Vec::with_capacity(map.len());
        for (name, value) in map {
            let field = to_field(value, &lazy.scope(&name))?;
            let property = if lazy.is_terminal(&name) {
                trace!(property = %name, "wrapping property in a lazy value");
                Property::Lazy(Lazy::create(move || field))
            } else {
                Property::Eager(field)
            };
            properties.push(property);
        }
        Ok(Self { schema, properties })
    }
}

impl DataObject for JsonData {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn property(&self, name: &str) -> Option<&Property> {
        self.schema
            .names()
            .position(|candidate| candidate == name)
            .and_then(|index| self.properties.get(index))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn to_field(value: Value, lazy: &SelectorTree) -> Result<Field, DocumentError> {
    match value {
        Value::Object(map) => Ok(Field::data(JsonData::from_map(map, lazy)?)),
        Value::Array(items) if is_object_list(&items) => {
            Ok(Field::Collection(to_collection(items, lazy)?))
        }
        other => Ok(Field::Value(other)),
    }
}

fn to_collection(items: Vec<Value>, lazy: &SelectorTree) -> Result<DataCollection, DocumentError> {
    let mut collection = DataCollection::new();
    for item in items {
        if let Value::Object(map) = item {
            collection.push(JsonData::from_map(map, lazy)?);
        }
    }
    Ok(collection)
}

fn is_object_list(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(Value::is_object)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array of non-objects",
        Value::Object(_) => "an object",
    }
}

/// Selector tree of the properties to make lazy. Each entry may be a comma
/// list.
pub fn lazy_tree<S: AsRef<str>>(selectors: &[S]) -> Result<SelectorTree, SelectorError> {
    let parsed = selectors
        .iter()
        .flat_map(|entry| split_list(entry.as_ref()))
        .map(Selector::parse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(parsed.iter().collect())
}

/// The root of an input document.
#[derive(Debug)]
pub enum Document {
    Object(JsonData),
    Collection(DataCollection),
}

impl Document {
    pub fn from_value(value: Value, lazy: &SelectorTree) -> Result<Self, DocumentError> {
        match value {
            Value::Object(map) => Ok(Self::Object(JsonData::from_map(map, lazy)?)),
            Value::Array(items) if items.iter().all(Value::is_object) => {
                Ok(Self::Collection(to_collection(items, lazy)?))
            }
            other => Err(DocumentError::UnsupportedRoot {
                found: kind_of(&other),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value, lazy: &[&str]) -> JsonData {
        match Document::from_value(value, &lazy_tree(lazy).unwrap()).unwrap() {
            Document::Object(data) => data,
            Document::Collection(_) => panic!("expected an object"),
        }
    }

    #[test]
    fn keys_become_properties_in_document_order() {
        let data = object(json!({ "zeta": 1, "alpha": 2 }), &[]);
        let object: &dyn DataObject = &data;

        let names: Vec<&str> = object.properties().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }

    #[test]
    fn object_lists_become_collections() {
        let data = object(
            json!({ "songs": [{ "name": "A" }, { "name": "B" }], "tags": ["x", 1], "empty": [] }),
            &[],
        );

        let songs = data.property("songs").unwrap().get().unwrap();
        assert_eq!(songs.as_collection().map(DataCollection::len), Some(2));

        let tags = data.property("tags").unwrap().get().unwrap();
        assert_eq!(tags.as_value(), Some(&json!(["x", 1])));

        let empty = data.property("empty").unwrap().get().unwrap();
        assert_eq!(empty.as_value(), Some(&json!([])));
    }

    #[test]
    fn lazy_selectors_reach_into_collections() {
        let data = object(
            json!({ "title": "Hits", "songs": [{ "name": "A", "year": 1987 }] }),
            &["title", "songs.year"],
        );

        assert!(data.property("title").unwrap().is_lazy());
        assert!(!data.property("songs").unwrap().is_lazy());

        let songs = data.property("songs").unwrap().get().unwrap();
        let song = songs.as_collection().and_then(|songs| songs.get(0)).unwrap();
        assert!(song.property("year").unwrap().is_lazy());
        assert!(!song.property("name").unwrap().is_lazy());
    }

    #[test]
    fn scalar_roots_are_rejected() {
        let error = Document::from_value(json!(42), &SelectorTree::new()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "expected a JSON object or an array of objects, found a number"
        );
    }

    #[test]
    fn empty_key_is_a_model_error() {
        let error = Document::from_value(json!({ "": 1 }), &SelectorTree::new()).unwrap_err();
        assert!(matches!(error, DocumentError::Model(_)));
    }
}
